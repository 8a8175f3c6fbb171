//! Aggregations, filters and dashboard summaries over streaming catalogs.
//!
//! This crate provides:
//! - Pure aggregation functions (counts, top-N, durations, timelines, lag)
//! - Filter trait and implementations for narrowing a catalog view
//! - FilterPipeline for composing filters
//! - Dashboard, comparison and insight summaries built from the above
//!
//! ## Architecture
//! A dashboard request is processed in stages:
//! 1. Filters narrow a catalog into a borrowed view (`Vec<&T>`)
//! 2. Aggregations run over the view; they are generic over `TitleLike`,
//!    so they accept plain records, combined records, or references to either
//! 3. Summaries bundle the aggregates into one serializable contract
//!
//! ## Example Usage
//! ```ignore
//! use analytics::filters::*;
//! use analytics::{FilterPipeline, summarize_platform};
//!
//! let pipeline = FilterPipeline::new()
//!     .add_filter(ContentTypeFilter::new(ContentTypeSelection::Movie))
//!     .add_filter(ReleaseYearRangeFilter::new(2000, 2020));
//!
//! let view = pipeline.apply(catalog.titles());
//! let summary = summarize_platform(catalog.platform(), &view);
//! println!("{} titles, top genre {}", summary.kpis.total_titles, summary.kpis.top_genre);
//! ```

pub mod counts;
pub mod duration;
pub mod filter_pipeline;
pub mod filters;
pub mod insights;
pub mod lag;
pub mod metric;
pub mod summary;
pub mod timeline;
pub mod traits;

// Re-export main types
pub use counts::{
    CategoryCount, YearCount, category_counts, release_year_distribution, token_counts,
    top_n_tokens, top_value,
};
pub use duration::{
    Duration, DurationDistribution, Histogram, HistogramBin, MAX_HISTOGRAM_BINS,
    duration_distribution, histogram, normalize_duration, title_duration,
};
pub use filter_pipeline::FilterPipeline;
pub use insights::{InsightMetrics, average_library_age, insight_metrics, mean_release_year};
pub use lag::{DEFAULT_MAX_LAG, LagCount, LagSummary, lag_summary, title_lag};
pub use metric::{Metric, NOT_AVAILABLE};
pub use summary::{
    DashboardProfile, DashboardSummary, HeadToHead, Headline, HeadlineKpi, MarketOverview,
    PlatformKpis, PlatformSide, SummaryOptions, compare, market_overview, platform_kpis,
    summarize_platform, summarize_platform_with,
};
pub use timeline::{
    Bucket, BucketCount, BucketCounts, Granularity, MONTH_NAMES, bucket_counts,
    latest_addition_year, month_of_year_counts,
};
pub use traits::Filter;
