//! Core traits for catalog filtering.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to any view of a catalog.

use data_loader::TitleLike;

/// Core trait for filtering titles.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows filters to be shared across threads
/// - Filters only decide; they never own or mutate the titles, so the
///   pipeline can hand back borrowed views of the original catalog
/// - `&dyn TitleLike` keeps the trait object-safe while still accepting
///   plain records and platform-tagged combined records
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Whether a title stays in the view.
    fn keep(&self, title: &dyn TitleLike) -> bool;
}
