mod config;
mod output;

use analytics::filters::{
    release_year_bounds, ContentTypeFilter, ContentTypeSelection, GenreFilter,
    ReleaseYearRangeFilter,
};
use analytics::{
    compare, insight_metrics, market_overview, summarize_platform_with, DashboardSummary,
    FilterPipeline, InsightMetrics, SummaryOptions,
};
use anyhow::{Context, Result};
use chrono::Datelike;
use clap::{Parser, Subcommand};
use colored::Colorize;
use config::{load_config, to_toml, AppConfig, DEFAULT_CONFIG_FILE};
use data_loader::{CatalogCache, DataLoadError, DatasetLoader, Platform};
use metadata_client::TmdbClient;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// DataFlix - streaming catalog analytics
#[derive(Parser)]
#[command(name = "dataflix")]
#[command(about = "Catalog analytics for Netflix, Prime Video, Disney+ and Hulu", long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Directory holding the platform CSV files (overrides the config file)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// TMDB API key (overrides the config file)
    #[arg(long, env = "TMDB_API_KEY", hide_env_values = true)]
    tmdb_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cross-platform overview of every catalog found
    Overview {
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Dashboard for one platform
    Platform {
        /// Platform name: netflix, prime, disney, hulu
        platform: String,

        /// Content type: all, movie, tv
        #[arg(long = "type", default_value = "all")]
        content_type: ContentTypeSelection,

        /// Earliest release year to include
        #[arg(long)]
        min_year: Option<i32>,

        /// Latest release year to include
        #[arg(long)]
        max_year: Option<i32>,

        /// Only titles listed under this genre
        #[arg(long)]
        genre: Option<String>,

        /// Rows per ranking [default: 10, 15 for countries]
        #[arg(long)]
        top: Option<usize>,

        /// Show empty periods in the addition timeline
        #[arg(long)]
        fill_gaps: bool,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Head-to-head KPIs of two platforms
    Compare {
        first: String,
        second: String,

        /// Print the comparison as JSON
        #[arg(long)]
        json: bool,
    },

    /// Look a title up on TMDB
    Search {
        /// Title to search for
        query: String,

        /// Number of reviews to show
        #[arg(long, default_value = "2")]
        reviews: usize,
    },

    /// Movies trending on TMDB today
    Trending {
        /// Number of titles to show
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = load_config(&cli.config)?;
    if let Some(dir) = cli.data_dir {
        config.data.data_dir = dir;
    }
    if let Some(key) = cli.tmdb_key {
        config.tmdb.api_key = Some(key);
    }

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Overview { json } => handle_overview(&config, json)?,
        Commands::Platform {
            platform,
            content_type,
            min_year,
            max_year,
            genre,
            top,
            fill_gaps,
            json,
        } => handle_platform(
            &config,
            &platform,
            PlatformArgs {
                content_type,
                min_year,
                max_year,
                genre,
                top,
                fill_gaps,
                json,
            },
        )?,
        Commands::Compare {
            first,
            second,
            json,
        } => handle_compare(&config, &first, &second, json)?,
        Commands::Search { query, reviews } => handle_search(&config, &query, reviews).await?,
        Commands::Trending { limit } => handle_trending(&config, limit).await?,
        Commands::Config => print!("{}", to_toml(&config)?),
    }

    Ok(())
}

fn build_loader(config: &AppConfig) -> Result<DatasetLoader> {
    let cache = Arc::new(CatalogCache::new());
    DatasetLoader::new(config.data.clone(), cache).context("Invalid dataset configuration")
}

fn parse_platform(name: &str) -> Result<Platform> {
    name.parse::<Platform>()
        .with_context(|| format!("Unknown platform '{}'", name))
}

/// Handle the 'overview' command
fn handle_overview(config: &AppConfig, json: bool) -> Result<()> {
    let loader = build_loader(config)?;

    let start = Instant::now();
    let combined = match loader.load_all() {
        Ok(combined) => combined,
        Err(e) if e.is_recoverable() => {
            output::print_no_data(&e);
            return Ok(());
        }
        Err(e) => return Err(e).context("Failed to load catalogs"),
    };
    tracing::info!("Loaded combined catalog in {:?}", start.elapsed());

    for missing in combined.missing() {
        output::print_missing(missing.platform, &missing.path);
    }

    let overview = market_overview(&combined);
    if json {
        println!("{}", serde_json::to_string_pretty(&overview)?);
    } else {
        output::print_overview(&overview);
    }
    Ok(())
}

struct PlatformArgs {
    content_type: ContentTypeSelection,
    min_year: Option<i32>,
    max_year: Option<i32>,
    genre: Option<String>,
    top: Option<usize>,
    fill_gaps: bool,
    json: bool,
}

#[derive(Serialize)]
struct PlatformReport<'a> {
    summary: &'a DashboardSummary,
    insights: &'a InsightMetrics,
}

/// Handle the 'platform' command
fn handle_platform(config: &AppConfig, name: &str, args: PlatformArgs) -> Result<()> {
    let platform = parse_platform(name)?;
    let loader = build_loader(config)?;

    let catalog = match loader.load(platform) {
        Ok(catalog) => catalog,
        Err(DataLoadError::DataNotFound { platform, path }) => {
            output::print_missing(platform, &path);
            return Ok(());
        }
        Err(e) => return Err(e).with_context(|| format!("Failed to load {}", platform)),
    };

    // Build the filter pipeline from the command line
    let year_range = ReleaseYearRangeFilter::from_bounds(
        args.min_year,
        args.max_year,
        release_year_bounds(catalog.titles()),
    );
    let pipeline = FilterPipeline::new()
        .add_filter(ContentTypeFilter::new(args.content_type))
        .add_optional(year_range)
        .add_optional(args.genre.map(GenreFilter::new));

    let view = pipeline.apply(catalog.titles());
    let options = args.top.map(SummaryOptions::with_top).unwrap_or_default();
    let mut summary = summarize_platform_with(platform, &view, &options);
    if args.fill_gaps {
        summary.timeline = summary.timeline.map(|t| t.fill_gaps());
    }
    let insights = insight_metrics(&view, chrono::Local::now().year());

    if args.json {
        let report = PlatformReport {
            summary: &summary,
            insights: &insights,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        output::print_dashboard(&summary, &insights);
    }
    Ok(())
}

/// Handle the 'compare' command
fn handle_compare(config: &AppConfig, first: &str, second: &str, json: bool) -> Result<()> {
    let a = parse_platform(first)?;
    let b = parse_platform(second)?;
    let loader = build_loader(config)?;

    let combined = match loader.load_all() {
        Ok(combined) => combined,
        Err(e @ DataLoadError::NoDataAvailable { .. }) => {
            output::print_no_data(&e);
            return Ok(());
        }
        Err(e) => return Err(e).context("Failed to load catalogs"),
    };

    let result = compare(&combined, a, b);
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        output::print_comparison(&result);
    }
    Ok(())
}

fn build_client(config: &AppConfig) -> Result<Option<TmdbClient>> {
    if !config.tmdb.has_credentials() {
        output::print_no_api_key();
        return Ok(None);
    }
    let client = TmdbClient::new(config.tmdb.clone()).context("Failed to build TMDB client")?;
    Ok(Some(client))
}

/// Handle the 'search' command
async fn handle_search(config: &AppConfig, query: &str, reviews: usize) -> Result<()> {
    let Some(client) = build_client(config)? else {
        return Ok(());
    };

    let Some(details) = client.search_title(query).await else {
        println!("{}", "Title not found in the archives.".red());
        return Ok(());
    };

    let found = client
        .get_reviews(details.id)
        .await
        .unwrap_or_default();
    output::print_title_details(&details, &found[..found.len().min(reviews)]);
    Ok(())
}

/// Handle the 'trending' command
async fn handle_trending(config: &AppConfig, limit: usize) -> Result<()> {
    let Some(client) = build_client(config)? else {
        return Ok(());
    };

    match client.get_trending().await {
        Some(trending) => output::print_trending(&trending[..trending.len().min(limit)]),
        None => println!(
            "{}",
            "Could not reach TMDB. Check the API key or network connection.".yellow()
        ),
    }
    Ok(())
}
