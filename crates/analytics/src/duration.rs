//! Duration normalization and distributions.
//!
//! The `duration` column mixes two units: "90 min" for movies and
//! "3 Seasons" for TV shows. They are normalized into a typed `Duration`
//! and kept as two separate series; a minute and a season are never
//! added together.

use crate::metric::{Metric, mean};
use data_loader::{ContentType, TitleLike};
use serde::Serialize;

/// A normalized runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "unit", content = "value", rename_all = "lowercase")]
pub enum Duration {
    Minutes(u32),
    Seasons(u32),
}

/// Normalize a raw duration cell for a title of the given type
///
/// Example: (Movie,   "90 min")    -> Some(Minutes(90))
///          (TV Show, "3 Seasons") -> Some(Seasons(3))
///          (Movie,   "garbage")   -> None
///          (TV Show, "90 min")    -> None
///
/// Unknown or other content types have no unit, so they never normalize.
pub fn normalize_duration(kind: &ContentType, raw: &str) -> Option<Duration> {
    match kind {
        ContentType::Movie => parse_minutes(raw).map(Duration::Minutes),
        ContentType::TvShow => parse_seasons(raw).map(Duration::Seasons),
        ContentType::Other(_) | ContentType::Unknown => None,
    }
}

/// Normalized duration of one title.
pub fn title_duration<T: TitleLike>(title: &T) -> Option<Duration> {
    let record = title.record();
    normalize_duration(&record.kind, record.duration.as_deref()?)
}

fn parse_minutes(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    let lower = trimmed.to_ascii_lowercase();
    let number = match lower.strip_suffix("min") {
        Some(rest) => &trimmed[..rest.len()],
        None => trimmed,
    };
    number.trim().parse().ok()
}

fn parse_seasons(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    let digits_end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    if digits_end == 0 {
        return None;
    }

    let unit = trimmed[digits_end..].trim().to_ascii_lowercase();
    if !matches!(unit.as_str(), "" | "season" | "seasons") {
        return None;
    }
    trimmed[..digits_end].parse().ok()
}

// =============================================================================
// Distributions
// =============================================================================

/// Movie minutes and TV seasons of a view, as two separate series.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DurationDistribution {
    pub movie_minutes: Vec<u32>,
    pub tv_seasons: Vec<u32>,
}

impl DurationDistribution {
    pub fn mean_minutes(&self) -> Metric<f64> {
        mean(self.movie_minutes.iter().copied())
    }

    pub fn mean_seasons(&self) -> Metric<f64> {
        mean(self.tv_seasons.iter().copied())
    }

    pub fn minutes_histogram(&self, bin_width: u32) -> Histogram {
        histogram(&self.movie_minutes, bin_width)
    }

    pub fn seasons_histogram(&self) -> Histogram {
        histogram(&self.tv_seasons, 1)
    }

    /// Number of titles whose duration normalized.
    pub fn len(&self) -> usize {
        self.movie_minutes.len() + self.tv_seasons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Split a view's durations into minutes and seasons. Titles whose
/// duration does not normalize are left out of both.
pub fn duration_distribution<I>(titles: I) -> DurationDistribution
where
    I: IntoIterator,
    I::Item: TitleLike,
{
    let mut dist = DurationDistribution::default();
    for title in titles {
        match title_duration(&title) {
            Some(Duration::Minutes(m)) => dist.movie_minutes.push(m),
            Some(Duration::Seasons(s)) => dist.tv_seasons.push(s),
            None => {}
        }
    }
    dist
}

/// One histogram bar covering `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistogramBin {
    pub start: u32,
    pub end: u32,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    /// Always equals the number of values the histogram was built from.
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}

/// Upper bound on the number of bins one histogram may have.
pub const MAX_HISTOGRAM_BINS: usize = 200;

/// Fixed-width histogram
///
/// ## Algorithm
/// 1. Align the first bin to a multiple of `bin_width` at or below the minimum
/// 2. Emit contiguous bins up to the one containing the maximum (empty bins
///    included, so the bars line up on an axis), at most `MAX_HISTOGRAM_BINS`
/// 3. Count each value into `(v - first) / bin_width`; values past the last
///    regular bin land in the final bin, which then stretches to the maximum
///
/// A zero width is treated as 1.
pub fn histogram(values: &[u32], bin_width: u32) -> Histogram {
    let width = bin_width.max(1);
    let (Some(&min), Some(&max)) = (values.iter().min(), values.iter().max()) else {
        return Histogram::default();
    };

    let first = min - min % width;
    let span = ((max - first) / width) as usize + 1;
    let bin_count = span.min(MAX_HISTOGRAM_BINS);
    let last = bin_count - 1;

    let mut bins: Vec<HistogramBin> = (0..bin_count)
        .map(|i| {
            let start = first + i as u32 * width;
            HistogramBin {
                start,
                end: start.saturating_add(width),
                count: 0,
            }
        })
        .collect();
    if span > bin_count {
        bins[last].end = max.saturating_add(1);
    }

    for &v in values {
        let idx = ((v - first) / width) as usize;
        bins[idx.min(last)].count += 1;
    }

    Histogram { bins }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::TitleRecord;

    fn titled(kind: ContentType, duration: Option<&str>) -> TitleRecord {
        TitleRecord {
            kind,
            duration: duration.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_normalize_movie_minutes() {
        assert_eq!(
            normalize_duration(&ContentType::Movie, "90 min"),
            Some(Duration::Minutes(90))
        );
        assert_eq!(
            normalize_duration(&ContentType::Movie, " 125 MIN "),
            Some(Duration::Minutes(125))
        );
        assert_eq!(
            normalize_duration(&ContentType::Movie, "75"),
            Some(Duration::Minutes(75))
        );
        assert_eq!(normalize_duration(&ContentType::Movie, "garbage"), None);
        assert_eq!(normalize_duration(&ContentType::Movie, "2 Seasons"), None);
    }

    #[test]
    fn test_normalize_tv_seasons() {
        assert_eq!(
            normalize_duration(&ContentType::TvShow, "3 Seasons"),
            Some(Duration::Seasons(3))
        );
        assert_eq!(
            normalize_duration(&ContentType::TvShow, "1 Season"),
            Some(Duration::Seasons(1))
        );
        assert_eq!(
            normalize_duration(&ContentType::TvShow, "2"),
            Some(Duration::Seasons(2))
        );
        assert_eq!(normalize_duration(&ContentType::TvShow, "45 min"), None);
        assert_eq!(normalize_duration(&ContentType::TvShow, "Seasons"), None);
    }

    #[test]
    fn test_normalize_unknown_type() {
        assert_eq!(normalize_duration(&ContentType::Unknown, "90 min"), None);
        assert_eq!(
            normalize_duration(&ContentType::Other("Special".into()), "1 Season"),
            None
        );
    }

    #[test]
    fn test_distribution_keeps_units_apart() {
        let titles = vec![
            titled(ContentType::Movie, Some("90 min")),
            titled(ContentType::Movie, Some("garbage")),
            titled(ContentType::TvShow, Some("3 Seasons")),
            titled(ContentType::Movie, Some("110 min")),
            titled(ContentType::TvShow, None),
        ];

        let dist = duration_distribution(&titles);
        assert_eq!(dist.movie_minutes, vec![90, 110]);
        assert_eq!(dist.tv_seasons, vec![3]);
        assert_eq!(dist.len(), 3);
        assert_eq!(dist.mean_minutes(), Metric::Value(100.0));
        assert_eq!(dist.minutes_histogram(10).total(), 2);
    }

    #[test]
    fn test_histogram_bins() {
        let h = histogram(&[90, 95, 101, 130], 10);
        let starts: Vec<u32> = h.bins.iter().map(|b| b.start).collect();
        assert_eq!(starts, vec![90, 100, 110, 120, 130]);
        let counts: Vec<usize> = h.bins.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![2, 1, 0, 0, 1]);
        assert_eq!(h.total(), 4);
    }

    #[test]
    fn test_histogram_empty_and_zero_width() {
        assert!(histogram(&[], 10).bins.is_empty());
        assert_eq!(histogram(&[1, 1, 2], 0).total(), 3);
    }

    #[test]
    fn test_histogram_outlier_folds_into_last_bin() {
        let titles = vec![
            titled(ContentType::Movie, Some("90 min")),
            titled(ContentType::Movie, Some("50000000 min")),
        ];
        let h = duration_distribution(&titles).minutes_histogram(10);

        assert_eq!(h.bins.len(), MAX_HISTOGRAM_BINS);
        assert_eq!(h.total(), 2);
        assert_eq!(h.bins[0].count, 1);
        let last = h.bins.last().unwrap();
        assert_eq!(last.count, 1);
        assert_eq!(last.end, 50_000_001);
    }

    #[test]
    fn test_histogram_u32_max_stays_bounded() {
        let h = histogram(&[0, u32::MAX], 1);
        assert_eq!(h.bins.len(), MAX_HISTOGRAM_BINS);
        assert_eq!(h.total(), 2);
        assert_eq!(h.bins.last().unwrap().end, u32::MAX);
    }
}
