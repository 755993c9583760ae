use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackError {
    #[error("Invalid mobile number format: '{input}'")]
    InvalidNumberFormat { input: String },

    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type TrackResult<T> = Result<T, TrackError>;

/// Why the external enrichment lookup produced nothing.
/// Never surfaced to callers of the tracking service; it only selects
/// the offline fallback path.
#[derive(Error, Debug)]
pub enum EnrichmentError {
    #[error("enrichment disabled: no access key configured")]
    Disabled,

    #[error("enrichment transport error: {0}")]
    Transport(String),

    #[error("enrichment failed with http status {0}")]
    Status(u16),

    #[error("enrichment response malformed: {0}")]
    Malformed(String),

    #[error("enrichment reported number as not valid")]
    NotValid,
}
