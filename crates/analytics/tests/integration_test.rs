//! Integration tests for the analytics crate.
//!
//! These tests load real CSV files through the data loader and check that
//! filters, aggregations and summaries work together on the result.

use analytics::filters::*;
use analytics::*;
use data_loader::{
    CatalogCache, ContentType, DatasetConfig, DatasetLoader, Field, Platform, TitleRecord,
};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

const HEADER: &str = "show_id,type,title,director,cast,country,date_added,release_year,rating,duration,listed_in,description\n";

const NETFLIX_ROWS: &str = "\
s1,Movie,Alpha,Jane Doe,,United States,\"September 25, 2021\",2020,PG-13,90 min,\"Dramas, Comedies\",d
s2,TV Show,Beta,,,\"India, United States\",\"March 1, 2021\",2019,TV-MA,3 Seasons,\"TV Dramas, Dramas\",d
s3,Movie,Gamma,Jane Doe,,India,,2010,R,garbage,Comedies,d
s4,Movie,Delta,John Roe,,,2015-06-01,2020,PG-13,110 min,Documentaries,d
";

const HULU_ROWS: &str = "\
h1,Movie,Epsilon,,,Japan,\"January 3, 2020\",2010,TV-14,100 min,Anime,d
h2,TV Show,Zeta,,,Japan,\"January 30, 2020\",2018,TV-14,1 Season,\"Anime, Kids\",d
";

fn write_fixture(dir: &TempDir, platform: Platform, rows: &str) {
    let path = dir.path().join(platform.default_file_name());
    fs::write(path, format!("{}{}", HEADER, rows)).unwrap();
}

fn loader_for(dir: &TempDir) -> DatasetLoader {
    DatasetLoader::new(
        DatasetConfig::with_data_dir(dir.path()),
        Arc::new(CatalogCache::new()),
    )
    .unwrap()
}

fn netflix_fixture() -> (TempDir, DatasetLoader) {
    let dir = TempDir::new().unwrap();
    write_fixture(&dir, Platform::Netflix, NETFLIX_ROWS);
    write_fixture(&dir, Platform::Hulu, HULU_ROWS);
    let loader = loader_for(&dir);
    (dir, loader)
}

#[test]
fn test_category_totals_equal_row_count() {
    let (_dir, loader) = netflix_fixture();
    let catalog = loader.load(Platform::Netflix).unwrap();

    let counts = category_counts(catalog.titles(), Field::Type);
    let total: usize = counts.iter().map(|c| c.count).sum();
    assert_eq!(total, catalog.len());
}

#[test]
fn test_top_n_bounded_sorted_and_idempotent() {
    let (_dir, loader) = netflix_fixture();
    let catalog = loader.load(Platform::Netflix).unwrap();

    let first = top_n_tokens(catalog.titles(), Field::ListedIn, 2);
    let second = top_n_tokens(catalog.titles(), Field::ListedIn, 2);
    assert!(first.len() <= 2);
    assert!(first.windows(2).all(|w| w[0].count >= w[1].count));
    assert_eq!(first, second);
    assert_eq!(first[0], CategoryCount::new("Dramas", 2));
}

#[test]
fn test_unparseable_duration_left_out_of_histograms() {
    let (_dir, loader) = netflix_fixture();
    let catalog = loader.load(Platform::Netflix).unwrap();

    let durations = duration_distribution(catalog.titles());
    assert_eq!(durations.movie_minutes, vec![90, 110]);
    assert_eq!(durations.tv_seasons, vec![3]);
    assert_eq!(durations.minutes_histogram(10).total(), 2);
    assert_eq!(durations.seasons_histogram().total(), 1);
}

#[test]
fn test_lag_examples() {
    let early = TitleRecord {
        release_year: Some(2010),
        date_added: Some("2015-06-01".to_string()),
        ..Default::default()
    };
    let anomaly = TitleRecord {
        release_year: Some(2020),
        date_added: Some("2015-06-01".to_string()),
        ..Default::default()
    };
    assert_eq!(title_lag(&early), Some(5));

    let summary = lag_summary(&[early, anomaly], DEFAULT_MAX_LAG);
    assert_eq!(summary.mean_years, Metric::Value(5.0));
    assert_eq!(summary.negative, 1);
}

#[test]
fn test_combined_view_tags_only_loaded_platforms() {
    let dir = TempDir::new().unwrap();
    write_fixture(&dir, Platform::Hulu, HULU_ROWS);
    let loader = loader_for(&dir);

    let combined = loader.load_all().unwrap();
    assert_eq!(combined.platforms(), vec![Platform::Hulu]);
    assert!(combined.titles().iter().all(|t| t.platform() == Platform::Hulu));

    let overview = market_overview(&combined);
    assert_eq!(overview.platforms_monitored, 1);
    assert_eq!(overview.top_genre, Metric::Value("Anime".to_string()));
}

#[test]
fn test_mode_of_empty_genre_column_is_not_available() {
    let titles = vec![
        TitleRecord {
            kind: ContentType::Movie,
            ..Default::default()
        };
        4
    ];
    let mode = top_value(&titles, Field::ListedIn);
    assert_eq!(mode, Metric::NotAvailable);
    assert_eq!(mode.to_string(), "N/A");
}

#[test]
fn test_bucket_sum_equals_parseable_dates() {
    let (_dir, loader) = netflix_fixture();
    let catalog = loader.load(Platform::Netflix).unwrap();

    for granularity in [Granularity::Year, Granularity::Quarter, Granularity::Month] {
        let buckets = bucket_counts(catalog.titles(), granularity);
        // Gamma has no date_added
        assert_eq!(buckets.total(), 3);
        assert_eq!(buckets.fill_gaps().total(), 3);
    }
}

#[test]
fn test_filtered_dashboard() {
    let (_dir, loader) = netflix_fixture();
    let catalog = loader.load(Platform::Netflix).unwrap();

    let view = FilterPipeline::new()
        .add_filter(ContentTypeFilter::new(ContentTypeSelection::Movie))
        .apply(catalog.titles());
    let summary = summarize_platform(Platform::Netflix, &view);

    assert_eq!(summary.kpis.total_titles, 3);
    assert_eq!(summary.kpis.tv_shows, 0);
    assert_eq!(summary.headline.label, "Top Country");
    assert_eq!(summary.headline.value, "India");
    assert_eq!(summary.top_director, Metric::Value("Jane Doe".to_string()));
    assert_eq!(
        summary.timeline.as_ref().map(|t| t.granularity),
        Some(Granularity::Quarter)
    );
    assert_eq!(summary.latest_addition_year, Metric::Value(2021));
}

#[test]
fn test_combined_view_narrowed_by_platform_and_year() {
    let (_dir, loader) = netflix_fixture();
    let combined = loader.load_all().unwrap();

    let view = FilterPipeline::new()
        .add_filter(PlatformFilter::new(Platform::Hulu))
        .add_filter(ReleaseYearRangeFilter::new(2015, 2020))
        .apply(combined.titles());
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].record.title.as_deref(), Some("Zeta"));

    let hulu = summarize_platform(Platform::Hulu, &combined.for_platform(Platform::Hulu));
    assert_eq!(hulu.month_of_year[0], 2);
    assert_eq!(hulu.timeline.map(|t| t.total()), Some(2));
}

#[test]
fn test_head_to_head() {
    let (_dir, loader) = netflix_fixture();
    let combined = loader.load_all().unwrap();

    let result = compare(&combined, Platform::Netflix, Platform::Hulu);
    assert_eq!(result.left.kpis.total_titles, 4);
    assert_eq!(result.left.kpis.movies, 3);
    assert_eq!(result.right.kpis.tv_shows, 1);
    assert_eq!(result.right.kpis.top_genre, Metric::Value("Anime".to_string()));
}

#[test]
fn test_summary_serializes_with_sentinel() {
    let none: Vec<TitleRecord> = Vec::new();
    let summary = summarize_platform(Platform::DisneyPlus, &none);
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["kpis"]["top_genre"], "N/A");
    assert_eq!(json["latest_addition_year"], "N/A");
    assert_eq!(json["kpis"]["total_titles"], 0);
}
