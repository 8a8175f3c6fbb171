//! Release-year range filter and the slider bounds that go with it.

use crate::traits::Filter;
use data_loader::TitleLike;

/// Keeps titles released within `[min, max]` (inclusive).
///
/// Titles without a release year cannot be placed in any range and are
/// dropped.
pub struct ReleaseYearRangeFilter {
    min: i32,
    max: i32,
}

impl ReleaseYearRangeFilter {
    /// Bounds are swapped if given in the wrong order.
    pub fn new(min: i32, max: i32) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Build from optional bounds, open ends taking the catalog's own range.
    ///
    /// Returns `None` when neither bound is given (no filtering wanted). If
    /// no title has a year, an open end collapses onto the given bound.
    pub fn from_bounds(
        min: Option<i32>,
        max: Option<i32>,
        catalog_bounds: Option<(i32, i32)>,
    ) -> Option<Self> {
        match (min, max) {
            (None, None) => None,
            (Some(lo), Some(hi)) => Some(Self::new(lo, hi)),
            (lo, hi) => {
                let given = lo.or(hi)?;
                let (first, last) = catalog_bounds.unwrap_or((given, given));
                Some(Self::new(lo.unwrap_or(first), hi.unwrap_or(last)))
            }
        }
    }

    pub fn range(&self) -> (i32, i32) {
        (self.min, self.max)
    }
}

impl Filter for ReleaseYearRangeFilter {
    fn name(&self) -> &str {
        "ReleaseYearRangeFilter"
    }

    fn keep(&self, title: &dyn TitleLike) -> bool {
        title
            .record()
            .release_year
            .is_some_and(|year| year >= self.min && year <= self.max)
    }
}

/// Oldest and newest release year in a view, `None` if no title has one.
pub fn release_year_bounds<I>(titles: I) -> Option<(i32, i32)>
where
    I: IntoIterator,
    I::Item: TitleLike,
{
    titles
        .into_iter()
        .filter_map(|t| t.record().release_year)
        .fold(None, |bounds, year| match bounds {
            None => Some((year, year)),
            Some((lo, hi)) => Some((lo.min(year), hi.max(year))),
        })
}
