//! Best-effort carrier enrichment from an external validation API.
//!
//! The tracker must work with this collaborator absent or always failing.
//! Every failure is an `EnrichmentError`; the tracking service logs it and
//! falls back to the offline prefix table.

use crate::{config::EnrichmentConfig, error::EnrichmentError, types::MobileNumber};
use serde::Deserialize;
use std::time::Duration;

/// What a successful lookup may add. Each field is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enrichment {
    pub carrier: Option<String>,
    pub location: Option<String>,
    pub line_type: Option<String>,
}

pub trait EnrichmentProvider {
    fn name(&self) -> &'static str;

    fn lookup(&self, number: &MobileNumber) -> Result<Enrichment, EnrichmentError>;
}

/// Used when no access key is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledEnrichment;

impl EnrichmentProvider for DisabledEnrichment {
    fn name(&self) -> &'static str {
        "disabled"
    }

    fn lookup(&self, _number: &MobileNumber) -> Result<Enrichment, EnrichmentError> {
        Err(EnrichmentError::Disabled)
    }
}

/// Wire shape of the validation API response. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
struct ValidateResponse {
    #[serde(default)]
    valid: bool,
    #[serde(default)]
    carrier: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    line_type: Option<String>,
}

/// HTTP client for a numverify-style `validate` endpoint.
pub struct NumverifyClient {
    agent: ureq::Agent,
    endpoint: String,
    access_key: String,
    country_code: String,
}

impl NumverifyClient {
    pub fn new(config: &EnrichmentConfig, access_key: &str) -> Self {
        let timeout = Duration::from_millis(config.timeout_ms.max(100));
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(timeout)
            .timeout_read(timeout)
            .timeout_write(timeout)
            .build();
        Self {
            agent,
            endpoint: config.endpoint.clone(),
            access_key: access_key.to_string(),
            country_code: config.country_code.clone(),
        }
    }
}

impl EnrichmentProvider for NumverifyClient {
    fn name(&self) -> &'static str {
        "numverify"
    }

    fn lookup(&self, number: &MobileNumber) -> Result<Enrichment, EnrichmentError> {
        let response = self
            .agent
            .get(&self.endpoint)
            .query("access_key", &self.access_key)
            .query("country_code", &self.country_code)
            .query("number", number.as_str())
            .call()
            .map_err(|e| match e {
                ureq::Error::Status(code, _) => EnrichmentError::Status(code),
                ureq::Error::Transport(t) => EnrichmentError::Transport(t.to_string()),
            })?;
        let body: ValidateResponse = response
            .into_json()
            .map_err(|e| EnrichmentError::Malformed(e.to_string()))?;
        parse_validate_response(body)
    }
}

/// Build a provider from config: a real client when an access key is set.
pub fn provider_from_config(config: &EnrichmentConfig) -> Box<dyn EnrichmentProvider> {
    match config.access_key.as_deref().map(str::trim) {
        Some(key) if !key.is_empty() => Box::new(NumverifyClient::new(config, key)),
        _ => Box::new(DisabledEnrichment),
    }
}

fn parse_validate_response(body: ValidateResponse) -> Result<Enrichment, EnrichmentError> {
    if !body.valid {
        return Err(EnrichmentError::NotValid);
    }
    Ok(Enrichment {
        carrier: non_blank(body.carrier),
        location: non_blank(body.location),
        line_type: non_blank(body.line_type),
    })
}

/// The API reports "unknown" fields as empty strings.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<Enrichment, EnrichmentError> {
        let body: ValidateResponse = serde_json::from_str(json).unwrap();
        parse_validate_response(body)
    }

    #[test]
    fn valid_response_keeps_non_blank_fields() {
        let e = parse(
            r#"{"valid":true,"number":"919876543210","carrier":"Bharti Airtel Ltd",
                "location":"","line_type":"mobile"}"#,
        )
        .unwrap();
        assert_eq!(e.carrier.as_deref(), Some("Bharti Airtel Ltd"));
        assert_eq!(e.location, None);
        assert_eq!(e.line_type.as_deref(), Some("mobile"));
    }

    #[test]
    fn invalid_or_error_payload_is_not_valid() {
        assert!(matches!(parse(r#"{"valid":false}"#), Err(EnrichmentError::NotValid)));
        // Quota errors come back without a "valid" field at all.
        assert!(matches!(
            parse(r#"{"success":false,"error":{"code":104}}"#),
            Err(EnrichmentError::NotValid)
        ));
    }

    #[test]
    fn provider_is_disabled_without_key() {
        let mut config = EnrichmentConfig::default();
        assert_eq!(provider_from_config(&config).name(), "disabled");
        config.access_key = Some("   ".into());
        assert_eq!(provider_from_config(&config).name(), "disabled");
        config.access_key = Some("abc123".into());
        assert_eq!(provider_from_config(&config).name(), "numverify");
    }
}
