//! Release-to-addition lag: how many years a title waited before landing
//! on its platform.

use crate::metric::{Metric, mean};
use chrono::Datelike;
use data_loader::TitleLike;
use serde::Serialize;

/// Upper bound of the lag distribution shown on dashboards.
pub const DEFAULT_MAX_LAG: i32 = 20;

/// `year_added - release_year`, absent when either side is missing.
///
/// May be negative (a title added before its recorded release year); that
/// is a data anomaly, not something to clamp.
pub fn title_lag<T: TitleLike>(title: &T) -> Option<i32> {
    let added = title.added_on()?;
    let released = title.record().release_year?;
    Some(added.year() - released)
}

/// Titles per lag in years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LagCount {
    pub years: i32,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LagSummary {
    /// Mean over non-negative lags only
    pub mean_years: Metric<f64>,
    /// Titles with a non-negative lag
    pub included: usize,
    /// Titles added "before" release, excluded from the mean
    pub negative: usize,
    /// Titles missing a release year or a parseable addition date
    pub missing: usize,
    /// One entry per lag `0..=max_lag`, zeros included
    pub distribution: Vec<LagCount>,
}

/// Summarize lags of a view
///
/// ## Algorithm
/// 1. Compute `title_lag` per title, sorting each into missing / negative /
///    included
/// 2. Mean over the included lags (`N/A` when there are none)
/// 3. Count included lags that fall in `0..=max_lag`; longer lags still
///    count toward the mean but are off the chart
pub fn lag_summary<I>(titles: I, max_lag: i32) -> LagSummary
where
    I: IntoIterator,
    I::Item: TitleLike,
{
    let max_lag = max_lag.max(0);
    let mut lags: Vec<i32> = Vec::new();
    let mut negative = 0usize;
    let mut missing = 0usize;

    for title in titles {
        match title_lag(&title) {
            Some(lag) if lag >= 0 => lags.push(lag),
            Some(_) => negative += 1,
            None => missing += 1,
        }
    }

    let mut distribution: Vec<LagCount> = (0..=max_lag)
        .map(|years| LagCount { years, count: 0 })
        .collect();
    for &lag in &lags {
        if lag <= max_lag {
            distribution[lag as usize].count += 1;
        }
    }

    LagSummary {
        mean_years: mean(lags.iter().copied()),
        included: lags.len(),
        negative,
        missing,
        distribution,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::TitleRecord;

    fn title(release_year: Option<i32>, added: Option<&str>) -> TitleRecord {
        TitleRecord {
            release_year,
            date_added: added.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_title_lag() {
        assert_eq!(title_lag(&title(Some(2010), Some("2015-06-01"))), Some(5));
        assert_eq!(title_lag(&title(Some(2020), Some("2015-06-01"))), Some(-5));
        assert_eq!(title_lag(&title(None, Some("2015-06-01"))), None);
        assert_eq!(title_lag(&title(Some(2010), Some("not a date"))), None);
    }

    #[test]
    fn test_negative_lags_excluded_from_mean() {
        let titles = vec![
            title(Some(2010), Some("2015-06-01")),
            title(Some(2020), Some("2015-06-01")),
            title(Some(2014), Some("June 1, 2015")),
            title(None, None),
        ];

        let summary = lag_summary(&titles, DEFAULT_MAX_LAG);
        assert_eq!(summary.mean_years, Metric::Value(3.0));
        assert_eq!(summary.included, 2);
        assert_eq!(summary.negative, 1);
        assert_eq!(summary.missing, 1);
        assert_eq!(summary.distribution.len(), 21);
        assert_eq!(summary.distribution[1].count, 1);
        assert_eq!(summary.distribution[5].count, 1);
    }

    #[test]
    fn test_long_lags_off_chart_but_in_mean() {
        let titles = vec![title(Some(1950), Some("2020-01-01")), title(Some(2020), Some("2020-01-01"))];
        let summary = lag_summary(&titles, 20);
        assert_eq!(summary.mean_years, Metric::Value(35.0));
        let charted: usize = summary.distribution.iter().map(|l| l.count).sum();
        assert_eq!(charted, 1);
    }

    #[test]
    fn test_empty_view() {
        let none: Vec<TitleRecord> = Vec::new();
        let summary = lag_summary(&none, DEFAULT_MAX_LAG);
        assert_eq!(summary.mean_years, Metric::NotAvailable);
        assert_eq!(summary.included, 0);
    }
}
