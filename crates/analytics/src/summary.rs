//! Dashboard summaries: platform KPIs, head-to-head comparison, the
//! per-platform dashboard contract and the market overview.
//!
//! Every platform dashboard is the same set of aggregations. What differs
//! (timeline granularity, which headline KPI is shown) lives in a small
//! `DashboardProfile` table instead of four copies of the same code.

use crate::counts::{
    CategoryCount, YearCount, category_counts, release_year_distribution, top_n_tokens, top_value,
};
use crate::duration::{DurationDistribution, Histogram, duration_distribution};
use crate::lag::{DEFAULT_MAX_LAG, LagSummary, lag_summary};
use crate::metric::Metric;
use crate::timeline::{BucketCounts, Granularity, bucket_counts, latest_addition_year, month_of_year_counts};
use data_loader::{CombinedCatalog, Field, Platform, TitleLike};
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

pub const TOP_GENRES: usize = 10;
pub const TOP_RATINGS: usize = 10;
pub const TOP_COUNTRIES: usize = 15;
pub const TOP_DIRECTORS: usize = 10;
/// Width of one bar of the movie runtime histogram, in minutes.
pub const MINUTES_BIN_WIDTH: u32 = 10;

// =============================================================================
// KPIs
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformKpis {
    pub total_titles: usize,
    pub movies: usize,
    pub tv_shows: usize,
    pub top_genre: Metric<String>,
}

/// Headline counts of a view. An empty view gives zeros and `N/A`.
pub fn platform_kpis<I>(titles: I) -> PlatformKpis
where
    I: IntoIterator,
    I::Item: TitleLike,
{
    let titles: Vec<I::Item> = titles.into_iter().collect();
    PlatformKpis {
        total_titles: titles.len(),
        movies: titles.iter().filter(|t| t.record().is_movie()).count(),
        tv_shows: titles.iter().filter(|t| t.record().is_tv_show()).count(),
        top_genre: top_value(&titles, Field::ListedIn),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformSide {
    pub platform: Platform,
    pub kpis: PlatformKpis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadToHead {
    pub left: PlatformSide,
    pub right: PlatformSide,
}

/// KPIs of two platforms side by side. A platform with no titles in the
/// combined catalog still gets a side, with zero counts.
pub fn compare(combined: &CombinedCatalog, a: Platform, b: Platform) -> HeadToHead {
    let side = |platform: Platform| PlatformSide {
        platform,
        kpis: platform_kpis(combined.for_platform(platform)),
    };
    HeadToHead {
        left: side(a),
        right: side(b),
    }
}

// =============================================================================
// Dashboard profiles
// =============================================================================

/// The one KPI a platform dashboard puts next to the common ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HeadlineKpi {
    TopCountry,
    TopDirector,
    TopGenre,
    LatestAdditionYear,
}

impl HeadlineKpi {
    pub fn label(&self) -> &'static str {
        match self {
            HeadlineKpi::TopCountry => "Top Country",
            HeadlineKpi::TopDirector => "Top Director",
            HeadlineKpi::TopGenre => "Top Genre",
            HeadlineKpi::LatestAdditionYear => "Latest Content Year",
        }
    }
}

/// Per-platform presentation choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardProfile {
    pub platform: Platform,
    /// Addition timeline bucket width; `None` means the dashboard charts
    /// release years instead
    pub timeline: Option<Granularity>,
    pub headline: HeadlineKpi,
}

impl DashboardProfile {
    pub fn for_platform(platform: Platform) -> Self {
        let (timeline, headline) = match platform {
            Platform::Netflix => (Some(Granularity::Quarter), HeadlineKpi::TopCountry),
            Platform::PrimeVideo => (None, HeadlineKpi::TopDirector),
            Platform::DisneyPlus => (Some(Granularity::Year), HeadlineKpi::LatestAdditionYear),
            Platform::Hulu => (Some(Granularity::Month), HeadlineKpi::TopGenre),
        };
        Self {
            platform,
            timeline,
            headline,
        }
    }
}

// =============================================================================
// Dashboard summary
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Headline {
    pub label: &'static str,
    pub value: String,
}

/// Ranking sizes and bin width used when building a dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryOptions {
    pub top_genres: usize,
    pub top_ratings: usize,
    pub top_countries: usize,
    pub top_directors: usize,
    pub minutes_bin_width: u32,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            top_genres: TOP_GENRES,
            top_ratings: TOP_RATINGS,
            top_countries: TOP_COUNTRIES,
            top_directors: TOP_DIRECTORS,
            minutes_bin_width: MINUTES_BIN_WIDTH,
        }
    }
}

impl SummaryOptions {
    /// Same length for every ranking.
    pub fn with_top(n: usize) -> Self {
        Self {
            top_genres: n,
            top_ratings: n,
            top_countries: n,
            top_directors: n,
            ..Self::default()
        }
    }
}

/// Everything one platform dashboard renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub profile: DashboardProfile,
    pub kpis: PlatformKpis,
    pub headline: Headline,
    pub type_distribution: Vec<CategoryCount>,
    pub durations: DurationDistribution,
    /// Movie runtimes in minutes
    pub minutes_histogram: Histogram,
    /// TV show lengths in seasons
    pub seasons_histogram: Histogram,
    pub top_genres: Vec<CategoryCount>,
    pub top_ratings: Vec<CategoryCount>,
    pub timeline: Option<BucketCounts>,
    pub release_years: Vec<YearCount>,
    pub top_countries: Vec<CategoryCount>,
    pub top_directors: Vec<CategoryCount>,
    pub top_country: Metric<String>,
    pub top_director: Metric<String>,
    pub month_of_year: [usize; 12],
    pub lag: LagSummary,
    pub latest_addition_year: Metric<i32>,
}

/// Dashboard with the default ranking sizes.
pub fn summarize_platform<T: TitleLike>(platform: Platform, titles: &[T]) -> DashboardSummary {
    summarize_platform_with(platform, titles, &SummaryOptions::default())
}

/// Build the dashboard contract for one (possibly filtered) platform view
///
/// ## Algorithm
/// 1. Look up the platform's profile
/// 2. Run every aggregation over the view
/// 3. Resolve the headline KPI from the aggregates already computed
pub fn summarize_platform_with<T: TitleLike>(
    platform: Platform,
    titles: &[T],
    options: &SummaryOptions,
) -> DashboardSummary {
    let profile = DashboardProfile::for_platform(platform);
    debug!("Summarizing {} titles for {}", titles.len(), platform);

    let kpis = platform_kpis(titles);
    let top_country = top_value(titles, Field::Country);
    let top_director = top_value(titles, Field::Director);
    let latest = latest_addition_year(titles);
    let durations = duration_distribution(titles);

    let mut top_ratings = category_counts(titles, Field::Rating);
    top_ratings.truncate(options.top_ratings);

    let headline_value = match profile.headline {
        HeadlineKpi::TopCountry => top_country.to_string(),
        HeadlineKpi::TopDirector => top_director.to_string(),
        HeadlineKpi::TopGenre => kpis.top_genre.to_string(),
        HeadlineKpi::LatestAdditionYear => latest.to_string(),
    };

    DashboardSummary {
        profile,
        headline: Headline {
            label: profile.headline.label(),
            value: headline_value,
        },
        type_distribution: category_counts(titles, Field::Type),
        minutes_histogram: durations.minutes_histogram(options.minutes_bin_width),
        seasons_histogram: durations.seasons_histogram(),
        durations,
        top_genres: top_n_tokens(titles, Field::ListedIn, options.top_genres),
        top_ratings,
        timeline: profile.timeline.map(|g| bucket_counts(titles, g)),
        release_years: release_year_distribution(titles),
        top_countries: top_n_tokens(titles, Field::Country, options.top_countries),
        top_directors: top_n_tokens(titles, Field::Director, options.top_directors),
        top_country,
        top_director,
        month_of_year: month_of_year_counts(titles),
        lag: lag_summary(titles, DEFAULT_MAX_LAG),
        latest_addition_year: latest,
        kpis,
    }
}

// =============================================================================
// Market overview
// =============================================================================

/// The combined, cross-platform landing view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketOverview {
    pub total_titles: usize,
    pub platforms_monitored: usize,
    pub top_genre: Metric<String>,
    /// Titles per platform, largest library first
    pub library_size: Vec<CategoryCount>,
    /// KPIs of every loaded platform, in load order
    pub platforms: Vec<PlatformSide>,
}

/// Summarize the combined catalog. Per-platform KPIs are computed in
/// parallel with Rayon; the result keeps load order.
pub fn market_overview(combined: &CombinedCatalog) -> MarketOverview {
    let loaded = combined.platforms();

    let platforms: Vec<PlatformSide> = loaded
        .par_iter()
        .map(|&platform| PlatformSide {
            platform,
            kpis: platform_kpis(combined.for_platform(platform)),
        })
        .collect();

    MarketOverview {
        total_titles: combined.len(),
        platforms_monitored: loaded.len(),
        top_genre: top_value(combined.titles(), Field::ListedIn),
        library_size: category_counts(combined.titles(), Field::Platform),
        platforms,
    }
}
