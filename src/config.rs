//! Resolver configuration.

use std::time::Duration;

use serde::Deserialize;

/// Tuning for `ReadModelResolver`.
///
/// ```toml
/// fetch_timeout_ms = 1500
/// resolve_model_details = true
/// resolve_names = true
/// catalog_status = "listing"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Upper bound for one batched fetch or name lookup. A slower call
    /// degrades like an unavailable collection. `None` waits indefinitely.
    pub fetch_timeout_ms: Option<u64>,
    /// Collect model IDs and resolve size/color through the name resolver.
    pub resolve_model_details: bool,
    /// Run name-resolver fallbacks for names the direct records lack.
    pub resolve_names: bool,
    /// Only listings with this status appear in the catalog; `None` shows all.
    pub catalog_status: Option<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_ms: Some(2000),
            resolve_model_details: true,
            resolve_names: true,
            catalog_status: Some("listing".to_string()),
        }
    }
}

impl ResolverConfig {
    /// Parse a TOML document; absent keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_ms.map(Duration::from_millis)
    }

    pub fn with_fetch_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.fetch_timeout_ms = timeout.map(|t| u64::try_from(t.as_millis()).unwrap_or(u64::MAX));
        self
    }
}
