//! # Data Loader Crate
//!
//! This crate handles loading the per-platform streaming catalogs
//! (Netflix, Prime Video, Disney+, Hulu) and combining them.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Platform, TitleRecord, Catalog, CombinedCatalog)
//! - **parser**: Parse catalog CSV files into Rust structs
//! - **cache**: Explicit, injectable catalog cache
//! - **loader**: Dataset loader and combined loader
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{CatalogCache, DatasetConfig, DatasetLoader, Platform};
//! use std::sync::Arc;
//!
//! let cache = Arc::new(CatalogCache::new());
//! let loader = DatasetLoader::new(DatasetConfig::with_data_dir("data"), cache)?;
//!
//! // One platform
//! let netflix = loader.load(Platform::Netflix)?;
//!
//! // Everything that is on disk, tagged by platform
//! let combined = loader.load_all()?;
//! println!("{} titles across {:?}", combined.len(), combined.platforms());
//! ```
//!
//! ## Learning Goals
//!
//! 1. **Ownership and Borrowing**: catalogs are shared as `Arc<Catalog>`, views borrow
//! 2. **Error Handling**: recoverable vs. fatal variants in one error enum
//! 3. **Traits**: `TitleLike` abstracts over plain and platform-tagged records
//! 4. **Interior Mutability**: `RwLock` inside the cache
//! 5. **Parallel Processing**: Using Rayon to read platform files concurrently

// Public modules
pub mod cache;
pub mod error;
pub mod loader;
pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use cache::CatalogCache;
pub use error::{DataLoadError, Result};
pub use loader::{DatasetConfig, DatasetLoader};
pub use types::{
    // Core types
    AddedDate,
    Catalog,
    CombinedCatalog,
    CombinedTitle,
    MissingDataset,
    TitleLike,
    TitleRecord,
    // Enums
    ContentType,
    Field,
    Platform,
    // Helpers
    parse_date_added,
    split_multi_value,
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_empty_combined_catalog() {
        let combined = CombinedCatalog::default();
        assert!(combined.is_empty());
        assert!(combined.platforms().is_empty());
        assert!(combined.missing().is_empty());
    }

    #[test]
    fn test_combined_catalog_platform_slices() {
        let titles = vec![
            CombinedTitle::new(Platform::Hulu, TitleRecord::default()),
            CombinedTitle::new(Platform::Netflix, TitleRecord::default()),
            CombinedTitle::new(Platform::Hulu, TitleRecord::default()),
        ];
        let combined = CombinedCatalog::new(
            titles,
            vec![MissingDataset {
                platform: Platform::DisneyPlus,
                path: PathBuf::from("data/disney_plus_titles.csv"),
            }],
        );

        // Load order, not insertion order
        assert_eq!(combined.platforms(), vec![Platform::Netflix, Platform::Hulu]);
        assert_eq!(combined.for_platform(Platform::Hulu).len(), 2);
        assert!(combined.for_platform(Platform::PrimeVideo).is_empty());
        assert_eq!(combined.missing().len(), 1);
    }

    #[test]
    fn test_catalog_accessors() {
        let catalog = Catalog::new(
            Platform::Netflix,
            PathBuf::from("data/netflix_titles.csv"),
            None,
            vec![TitleRecord::default()],
        );
        assert_eq!(catalog.platform(), Platform::Netflix);
        assert_eq!(catalog.len(), 1);
        assert!(!catalog.is_empty());
        assert!(catalog.source().ends_with("netflix_titles.csv"));
    }
}
