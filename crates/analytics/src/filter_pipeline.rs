//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! multiple filters together using the builder pattern.

use crate::traits::Filter;
use data_loader::TitleLike;
use tracing;

/// Chains multiple filters together into a derived view.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(ContentTypeFilter::new(ContentTypeSelection::Movie))
///     .add_filter(ReleaseYearRangeFilter::new(2000, 2010));
///
/// let view: Vec<&TitleRecord> = pipeline.apply(catalog.titles());
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Add a filter only when one is given.
    ///
    /// Handy for optional command line arguments:
    /// `.add_optional(args.genre.map(GenreFilter::new))`
    pub fn add_optional<F: Filter + 'static>(self, filter: Option<F>) -> Self {
        match filter {
            Some(filter) => self.add_filter(filter),
            None => self,
        }
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Apply all filters in sequence.
    ///
    /// ## Algorithm
    /// 1. Start with every input title (by reference)
    /// 2. For each filter in order:
    ///    a. Log filter name and input count
    ///    b. Retain the titles the filter keeps
    ///    c. Log output count
    /// 3. Return the surviving references, in input order
    ///
    /// Accepts a slice (`catalog.titles()`) or an existing view
    /// (`combined.for_platform(p)`), so views can be narrowed further.
    pub fn apply<'a, T, I>(&self, titles: I) -> Vec<&'a T>
    where
        T: TitleLike + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let mut current: Vec<&'a T> = titles.into_iter().collect();
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current.retain(|title| filter.keep(*title));
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        current
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{ContentTypeFilter, ContentTypeSelection, ReleaseYearRangeFilter};
    use data_loader::{ContentType, TitleRecord};

    fn titles() -> Vec<TitleRecord> {
        vec![
            TitleRecord {
                title: Some("A".to_string()),
                kind: ContentType::Movie,
                release_year: Some(2001),
                ..Default::default()
            },
            TitleRecord {
                title: Some("B".to_string()),
                kind: ContentType::TvShow,
                release_year: Some(2005),
                ..Default::default()
            },
            TitleRecord {
                title: Some("C".to_string()),
                kind: ContentType::Movie,
                release_year: Some(2015),
                ..Default::default()
            },
        ]
    }

    #[test]
    fn test_empty_pipeline() {
        let titles = titles();
        let pipeline = FilterPipeline::new();
        assert!(pipeline.is_empty());

        let view = pipeline.apply(&titles);
        assert_eq!(view.len(), 3);
    }

    #[test]
    fn test_chained_filters_keep_input_order() {
        let titles = titles();
        let pipeline = FilterPipeline::new()
            .add_filter(ContentTypeFilter::new(ContentTypeSelection::Movie))
            .add_filter(ReleaseYearRangeFilter::new(2000, 2020));
        assert_eq!(pipeline.len(), 2);

        let view = pipeline.apply(&titles);
        let names: Vec<_> = view.iter().filter_map(|t| t.title.as_deref()).collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn test_optional_filter_skipped() {
        let titles = titles();
        let pipeline = FilterPipeline::new().add_optional(None::<ReleaseYearRangeFilter>);
        assert!(pipeline.is_empty());
        assert_eq!(pipeline.apply(&titles).len(), 3);
    }

    #[test]
    fn test_source_catalog_untouched() {
        let titles = titles();
        let pipeline =
            FilterPipeline::new().add_filter(ContentTypeFilter::new(ContentTypeSelection::TvShow));
        let view = pipeline.apply(&titles);
        assert_eq!(view.len(), 1);
        assert_eq!(titles.len(), 3);
    }
}
