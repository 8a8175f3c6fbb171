//! Headline numbers behind the strategic-insight panels.
//!
//! Only the metrics are computed here; wording them is up to the caller.

use crate::counts::top_value;
use crate::lag::{DEFAULT_MAX_LAG, lag_summary};
use crate::metric::{Metric, mean};
use data_loader::{Field, TitleLike};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightMetrics {
    /// Share of movies in the view, 0..=100
    pub movie_share_percent: Metric<f64>,
    pub top_genre: Metric<String>,
    /// Reference year minus the mean release year
    pub average_library_age: Metric<f64>,
    /// Mean release-to-addition lag over non-negative lags
    pub average_lag_years: Metric<f64>,
}

/// Mean original release year of a view.
pub fn mean_release_year<I>(titles: I) -> Metric<f64>
where
    I: IntoIterator,
    I::Item: TitleLike,
{
    mean(titles.into_iter().filter_map(|t| t.record().release_year))
}

/// How old the library is on average, measured from `reference_year`
///
/// Example: release years [2000, 2010] at reference 2020 -> 15.0
pub fn average_library_age<I>(titles: I, reference_year: i32) -> Metric<f64>
where
    I: IntoIterator,
    I::Item: TitleLike,
{
    mean_release_year(titles).map(|mean_year| f64::from(reference_year) - mean_year)
}

/// Compute every insight metric for a view.
pub fn insight_metrics<T: TitleLike>(titles: &[T], reference_year: i32) -> InsightMetrics {
    let movies = titles.iter().filter(|t| t.record().is_movie()).count();
    let movie_share_percent = if titles.is_empty() {
        Metric::NotAvailable
    } else {
        Metric::Value(movies as f64 / titles.len() as f64 * 100.0)
    };

    InsightMetrics {
        movie_share_percent,
        top_genre: top_value(titles, Field::ListedIn),
        average_library_age: average_library_age(titles, reference_year),
        average_lag_years: lag_summary(titles, DEFAULT_MAX_LAG).mean_years,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{ContentType, TitleRecord};

    fn title(kind: ContentType, release_year: Option<i32>, genres: Option<&str>) -> TitleRecord {
        TitleRecord {
            kind,
            release_year,
            listed_in: genres.map(str::to_string),
            date_added: Some("2020-01-01".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_average_library_age() {
        let titles = vec![
            title(ContentType::Movie, Some(2000), None),
            title(ContentType::Movie, Some(2010), None),
            title(ContentType::Movie, None, None),
        ];
        assert_eq!(average_library_age(&titles, 2020), Metric::Value(15.0));
    }

    #[test]
    fn test_insight_metrics() {
        let titles = vec![
            title(ContentType::Movie, Some(2016), Some("Dramas, Comedies")),
            title(ContentType::TvShow, Some(2018), Some("Dramas")),
            title(ContentType::Movie, Some(2017), Some("Comedies, Dramas")),
            title(ContentType::Movie, Some(2021), None),
        ];

        let insights = insight_metrics(&titles, 2023);
        assert_eq!(insights.movie_share_percent, Metric::Value(75.0));
        assert_eq!(insights.top_genre, Metric::Value("Dramas".to_string()));
        assert_eq!(insights.average_library_age, Metric::Value(5.0));
        // 2021 is added "before" release and is excluded: mean of 4, 2, 3
        assert_eq!(insights.average_lag_years, Metric::Value(3.0));
    }

    #[test]
    fn test_insight_metrics_on_empty_view() {
        let none: Vec<TitleRecord> = Vec::new();
        let insights = insight_metrics(&none, 2023);
        assert_eq!(insights.movie_share_percent, Metric::NotAvailable);
        assert_eq!(insights.top_genre, Metric::NotAvailable);
        assert_eq!(insights.average_library_age, Metric::NotAvailable);
        assert_eq!(insights.average_lag_years, Metric::NotAvailable);
    }
}
