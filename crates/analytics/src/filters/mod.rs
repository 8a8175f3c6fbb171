//! Filter implementations for catalog views.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FilterPipeline.

pub mod content_type;
pub mod genre;
pub mod platform;
pub mod release_year;

// Re-export for convenience
pub use content_type::{ContentTypeFilter, ContentTypeSelection};
pub use genre::GenreFilter;
pub use platform::PlatformFilter;
pub use release_year::{ReleaseYearRangeFilter, release_year_bounds};
