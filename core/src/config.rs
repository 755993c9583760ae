use serde::{Deserialize, Serialize};

pub const DEFAULT_DB_PATH: &str = "mkc_database.db";
pub const DEFAULT_RECENT_LIMIT: usize = 5;
pub const DEFAULT_ENRICHMENT_ENDPOINT: &str = "http://apilayer.net/api/validate";
pub const DEFAULT_ENRICHMENT_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentConfig {
    pub endpoint: String,
    /// Enrichment is only attempted when this is set and non-empty.
    pub access_key: Option<String>,
    pub country_code: String,
    pub timeout_ms: u64,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENRICHMENT_ENDPOINT.into(),
            access_key: None,
            country_code: "IN".into(),
            timeout_ms: DEFAULT_ENRICHMENT_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub db_path: String,
    /// Row cap for the `recent` and `complaints` listings.
    pub recent_limit: usize,
    pub enrichment: EnrichmentConfig,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            db_path: DEFAULT_DB_PATH.into(),
            recent_limit: DEFAULT_RECENT_LIMIT,
            enrichment: EnrichmentConfig::default(),
        }
    }
}

impl TrackerConfig {
    /// Load from a JSON file. Missing fields take their defaults.
    /// In tests, use TrackerConfig::default_test().
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: TrackerConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        config.validated()
    }

    /// Apply `MKC_DB_PATH`, `NUMVERIFY_API_KEY` and `MKC_ENRICHMENT_TIMEOUT_MS`.
    pub fn with_env_overrides(self) -> anyhow::Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Same as `with_env_overrides` with an injectable lookup.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        if let Some(path) = lookup("MKC_DB_PATH").filter(|p| !p.is_empty()) {
            self.db_path = path;
        }
        if let Some(key) = lookup("NUMVERIFY_API_KEY").filter(|k| !k.is_empty()) {
            self.enrichment.access_key = Some(key);
        }
        if let Some(raw) = lookup("MKC_ENRICHMENT_TIMEOUT_MS") {
            self.enrichment.timeout_ms = raw
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("MKC_ENRICHMENT_TIMEOUT_MS={raw:?}: {e}"))?;
        }
        self.validated()
    }

    /// In-memory store, enrichment disabled.
    pub fn default_test() -> Self {
        Self {
            db_path: ":memory:".into(),
            ..Self::default()
        }
    }

    pub fn enrichment_enabled(&self) -> bool {
        self.enrichment
            .access_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty())
    }

    fn validated(self) -> anyhow::Result<Self> {
        if self.recent_limit == 0 {
            anyhow::bail!("recent_limit must be > 0");
        }
        if self.enrichment.timeout_ms == 0 {
            anyhow::bail!("enrichment.timeout_ms must be > 0");
        }
        Ok(self)
    }
}
