//! Dataset and combined catalog loading.
//!
//! This module turns the on-disk platform exports into catalogs:
//! - Resolve a platform to its file through the configured mapping
//! - Read and parse the file (once; later calls hit the cache)
//! - Combine every platform into one tagged catalog
//!
//! Rust concepts you'll learn:
//! - Sharing an injected cache through `Arc`
//! - Matching on error variants to recover from some and propagate others
//! - Using Rayon for order-preserving parallel work

use crate::cache::CatalogCache;
use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::{Catalog, CombinedCatalog, CombinedTitle, MissingDataset, Platform};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Where the platform files live and what they are called.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Directory holding the CSV exports
    #[serde(rename = "dir", alias = "data_dir")]
    pub data_dir: PathBuf,
    /// Platform display name -> file name inside `data_dir`
    pub files: BTreeMap<String, String>,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        let files = Platform::ALL
            .iter()
            .map(|p| (p.name().to_string(), p.default_file_name().to_string()))
            .collect();
        Self {
            data_dir: PathBuf::from("data"),
            files,
        }
    }
}

impl DatasetConfig {
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Every key of the file mapping must name a known platform.
    pub fn validate(&self) -> Result<()> {
        for key in self.files.keys() {
            let platform: Platform = key.parse()?;
            if platform.name() != key {
                return Err(DataLoadError::Configuration(format!(
                    "file mapping key '{}' should be written as '{}'",
                    key,
                    platform.name()
                )));
            }
        }
        Ok(())
    }

    /// Full path of a platform's file.
    pub fn path_for(&self, platform: Platform) -> Result<PathBuf> {
        let file = self.files.get(platform.name()).ok_or_else(|| {
            DataLoadError::Configuration(format!("no file configured for {}", platform))
        })?;
        Ok(self.data_dir.join(file))
    }
}

/// Loads platform catalogs through an injected cache.
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    config: DatasetConfig,
    cache: Arc<CatalogCache>,
}

impl DatasetLoader {
    /// Create a loader. Fails fast on a malformed file mapping.
    pub fn new(config: DatasetConfig, cache: Arc<CatalogCache>) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, cache })
    }

    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    pub fn cache(&self) -> &Arc<CatalogCache> {
        &self.cache
    }

    /// Load one platform's catalog
    ///
    /// Steps:
    /// 1. Return the cached catalog if there is one
    /// 2. Resolve the file (ConfigurationError if unmapped)
    /// 3. Read it (DataNotFound if absent)
    /// 4. Cache and return
    pub fn load(&self, platform: Platform) -> Result<Arc<Catalog>> {
        if let Some(catalog) = self.cache.get(platform) {
            debug!("Cache hit for {}", platform);
            return Ok(catalog);
        }

        let path = self.config.path_for(platform)?;
        let catalog = read_catalog(platform, &path)?;
        info!(
            "Loaded {} titles for {} from {}",
            catalog.len(),
            platform,
            path.display()
        );
        Ok(self.cache.insert(catalog))
    }

    /// Load by identifier, e.g. from a command line argument.
    pub fn load_by_name(&self, name: &str) -> Result<Arc<Catalog>> {
        let platform: Platform = name.parse()?;
        self.load(platform)
    }

    /// Load and combine every platform
    ///
    /// Platform files are parsed in parallel; results are assembled in
    /// `Platform::ALL` order so the combined catalog is deterministic.
    /// Missing files are skipped and listed in `missing()` for the caller
    /// to report. If nothing loads, `NoDataAvailable`.
    pub fn load_all(&self) -> Result<Arc<CombinedCatalog>> {
        if let Some(combined) = self.cache.combined() {
            debug!("Cache hit for combined catalog");
            return Ok(combined);
        }

        // Rayon's indexed collect keeps the input order
        let results: Vec<(Platform, Result<Arc<Catalog>>)> = Platform::ALL
            .as_slice()
            .par_iter()
            .map(|&platform| (platform, self.load(platform)))
            .collect();

        let mut titles = Vec::new();
        let mut missing = Vec::new();

        for (platform, result) in results {
            match result {
                Ok(catalog) => {
                    titles.extend(
                        catalog
                            .titles()
                            .iter()
                            .cloned()
                            .map(|record| CombinedTitle::new(platform, record)),
                    );
                }
                Err(DataLoadError::DataNotFound { platform, path }) => {
                    debug!("Skipping {} in combined view: {} missing", platform, path.display());
                    missing.push(MissingDataset { platform, path });
                }
                Err(e) => return Err(e),
            }
        }

        if titles.is_empty() && missing.len() == Platform::ALL.len() {
            return Err(DataLoadError::NoDataAvailable { missing });
        }

        info!(
            "Combined catalog: {} titles from {} platforms",
            titles.len(),
            Platform::ALL.len() - missing.len()
        );
        Ok(self.cache.set_combined(CombinedCatalog::new(titles, missing)))
    }
}

/// Read one platform file from disk.
fn read_catalog(platform: Platform, path: &Path) -> Result<Catalog> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(DataLoadError::DataNotFound {
                platform,
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(e.into()),
    };

    let titles = parser::parse_titles_file(path)?;
    Ok(Catalog::new(
        platform,
        path.to_path_buf(),
        metadata.modified().ok(),
        titles,
    ))
}
