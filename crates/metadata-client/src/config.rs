//! Client configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// TMDB connection settings.
///
/// Every field has a default, so an empty `[tmdb]` table (or none at all)
/// is a valid configuration; it just has no credentials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TmdbConfig {
    /// TMDB v3 API key. Without it every lookup returns `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl TmdbConfig {
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    /// The key, if one is set and not blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn has_credentials(&self) -> bool {
        self.api_key().is_some()
    }

    /// Per-request timeout. Zero falls back to the default.
    pub fn timeout(&self) -> Duration {
        match self.timeout_secs {
            0 => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            secs => Duration::from_secs(secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_key_is_no_key() {
        assert!(!TmdbConfig::default().has_credentials());
        assert!(!TmdbConfig::with_api_key("   ").has_credentials());
        assert_eq!(TmdbConfig::with_api_key(" abc ").api_key(), Some("abc"));
    }

    #[test]
    fn test_timeout_defaults() {
        let mut config = TmdbConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(10));
        config.timeout_secs = 0;
        assert_eq!(config.timeout(), Duration::from_secs(10));
        config.timeout_secs = 3;
        assert_eq!(config.timeout(), Duration::from_secs(3));
    }
}
