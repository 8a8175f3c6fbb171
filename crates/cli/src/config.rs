//! Layered configuration: built-in defaults, then `dataflix.toml`, then
//! environment variables. Command line flags are applied on top by `main`.
//!
//! ```toml
//! [data]
//! dir = "data"
//!
//! [data.files]
//! "Prime Video" = "amazon_prime_titles.csv"
//!
//! [tmdb]
//! api_key = "..."
//! timeout_secs = 10
//! ```
//!
//! Environment: `DATAFLIX_DATA__DIR`, `DATAFLIX_TMDB__API_KEY`, ... (double
//! underscore separates sections). `TMDB_API_KEY` is honored as well.

use anyhow::{Context, Result};
use data_loader::DatasetConfig;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use metadata_client::TmdbConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "dataflix.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data: DatasetConfig,
    pub tmdb: TmdbConfig,
}

impl AppConfig {
    /// Same configuration with the API key hidden, for display.
    pub fn redacted(&self) -> AppConfig {
        let mut shown = self.clone();
        if shown.tmdb.api_key.is_some() {
            shown.tmdb.api_key = Some("********".to_string());
        }
        shown
    }
}

/// Defaults only. File and environment layers are merged on top, table by
/// table, so a file that maps one platform keeps the defaults for the rest.
fn base() -> Figment {
    Figment::from(Serialized::defaults(AppConfig::default()))
}

fn env_layers(figment: Figment) -> Figment {
    figment
        .merge(
            Env::raw()
                .only(&["TMDB_API_KEY"])
                .map(|_| "tmdb.api_key".into()),
        )
        .merge(Env::prefixed("DATAFLIX_").split("__"))
}

/// Load configuration. A missing file is fine: defaults and environment
/// still apply.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let mut figment = base();
    if path.exists() {
        figment = figment.merge(Toml::file(path));
    }

    let config: AppConfig = env_layers(figment)
        .extract()
        .with_context(|| format!("Invalid configuration in {}", path.display()))?;
    config
        .data
        .validate()
        .with_context(|| format!("Invalid [data.files] mapping in {}", path.display()))?;
    Ok(config)
}

/// Load configuration from a TOML string (useful for testing). No
/// environment layer.
pub fn load_config_from_str(toml_str: &str) -> Result<AppConfig> {
    let config: AppConfig = base()
        .merge(Toml::string(toml_str))
        .extract()
        .context("Invalid configuration")?;
    config.data.validate()?;
    Ok(config)
}

/// Render the effective configuration as TOML.
pub fn to_toml(config: &AppConfig) -> Result<String> {
    toml::to_string_pretty(&config.redacted()).context("Serializing configuration")
}
