//! Terminal rendering of the analytics contracts.

use analytics::{
    CategoryCount, DashboardSummary, HeadToHead, Histogram, HistogramBin, InsightMetrics,
    MarketOverview, PlatformKpis, MONTH_NAMES,
};
use colored::Colorize;
use data_loader::{DataLoadError, Platform};
use metadata_client::{Review, TitleDetails, TitleSummary};
use std::path::Path;

const BAR_WIDTH: usize = 30;

/// Example: 8807 -> "8,807"
fn thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Horizontal bar scaled against the largest count of the list.
fn bar(count: usize, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let width = (count * BAR_WIDTH).div_ceil(max);
    "█".repeat(width)
}

fn heading(text: &str) {
    println!("\n{}", text.bold().blue());
}

fn print_ranking(title: &str, counts: &[CategoryCount]) {
    heading(title);
    if counts.is_empty() {
        println!("  {}", "no data".dimmed());
        return;
    }
    let max = counts.iter().map(|c| c.count).max().unwrap_or(0);
    let label_width = counts.iter().map(|c| c.label.chars().count()).max().unwrap_or(0);
    for c in counts {
        println!(
            "  {:<width$}  {:>6}  {}",
            c.label,
            thousands(c.count),
            bar(c.count, max).green(),
            width = label_width
        );
    }
}

fn print_kpis(kpis: &PlatformKpis) {
    println!("{}Total Titles: {}", "• ".green(), thousands(kpis.total_titles));
    println!("{}Movies: {}", "• ".green(), thousands(kpis.movies));
    println!("{}TV Shows: {}", "• ".green(), thousands(kpis.tv_shows));
    println!("{}Top Genre: {}", "• ".green(), kpis.top_genre);
}

pub fn print_missing(platform: Platform, path: &Path) {
    println!(
        "{} Dataset for {} not found. Please check the data folder for `{}`.",
        "!".yellow(),
        platform,
        path.display()
    );
}

pub fn print_no_data(err: &DataLoadError) {
    println!("{} {}", "!".yellow(), err.to_string().yellow());
    if let DataLoadError::NoDataAvailable { missing } = err {
        for m in missing {
            println!("  - {}: {}", m.platform, m.path.display());
        }
    }
}

pub fn print_no_api_key() {
    println!(
        "{}",
        "TMDB API key not configured. Set TMDB_API_KEY or [tmdb] api_key in dataflix.toml."
            .yellow()
    );
}

pub fn print_overview(overview: &MarketOverview) {
    heading("Global Streaming Landscape");
    println!(
        "{}Total Titles Analyzed: {}",
        "• ".cyan(),
        thousands(overview.total_titles)
    );
    println!("{}Platforms Monitored: {}", "• ".cyan(), overview.platforms_monitored);
    println!("{}Top Genre Across Platforms: {}", "• ".cyan(), overview.top_genre);

    print_ranking("Library Size by Platform", &overview.library_size);

    for side in &overview.platforms {
        heading(&side.platform.to_string());
        print_kpis(&side.kpis);
    }
}

pub fn print_comparison(result: &HeadToHead) {
    let (left, right) = (&result.left, &result.right);
    heading(&format!("Comparing {} vs. {}", left.platform, right.platform));

    let rows = [
        (
            "Total Titles",
            thousands(left.kpis.total_titles),
            thousands(right.kpis.total_titles),
        ),
        ("Movies", thousands(left.kpis.movies), thousands(right.kpis.movies)),
        (
            "TV Shows",
            thousands(left.kpis.tv_shows),
            thousands(right.kpis.tv_shows),
        ),
        (
            "Top Genre",
            left.kpis.top_genre.to_string(),
            right.kpis.top_genre.to_string(),
        ),
    ];

    println!(
        "  {:<14} {:>24} {:>24}",
        "",
        left.platform.to_string().bold(),
        right.platform.to_string().bold()
    );
    for (label, a, b) in rows {
        println!("  {:<14} {:>24} {:>24}", label, a, b);
    }
}

/// Example: [90, 100) -> "90-99", [3, 4) -> "3"
fn bin_label(bin: &HistogramBin) -> String {
    let last = bin.end.saturating_sub(1).max(bin.start);
    if last == bin.start {
        bin.start.to_string()
    } else {
        format!("{}-{}", bin.start, last)
    }
}

fn print_histogram(title: &str, histogram: &Histogram) {
    heading(title);
    if histogram.bins.is_empty() {
        println!("  {}", "no data".dimmed());
        return;
    }
    let labels: Vec<String> = histogram.bins.iter().map(bin_label).collect();
    let label_width = labels.iter().map(|l| l.len()).max().unwrap_or(0);
    let max = histogram.bins.iter().map(|b| b.count).max().unwrap_or(0);
    for (label, bin) in labels.iter().zip(&histogram.bins) {
        println!(
            "  {:>width$}  {:>6}  {}",
            label,
            thousands(bin.count),
            bar(bin.count, max).green(),
            width = label_width
        );
    }
}

pub fn print_dashboard(summary: &DashboardSummary, insights: &InsightMetrics) {
    heading(&format!("{} Dashboard", summary.profile.platform));
    print_kpis(&summary.kpis);
    println!(
        "{}{}: {}",
        "• ".green(),
        summary.headline.label,
        summary.headline.value
    );

    print_ranking("Content Type", &summary.type_distribution);

    heading("Duration");
    println!(
        "  Movies: {} titles, mean {:.1} min",
        summary.durations.movie_minutes.len(),
        summary.durations.mean_minutes()
    );
    println!(
        "  TV Shows: {} titles, mean {:.1} seasons",
        summary.durations.tv_seasons.len(),
        summary.durations.mean_seasons()
    );
    print_histogram("Movie Duration (minutes)", &summary.minutes_histogram);
    print_histogram("TV Show Length (seasons)", &summary.seasons_histogram);

    print_ranking("Top Genres", &summary.top_genres);
    print_ranking("Top Ratings", &summary.top_ratings);
    print_ranking("Top Countries", &summary.top_countries);
    print_ranking("Top Directors", &summary.top_directors);

    match &summary.timeline {
        Some(timeline) => {
            heading(&format!("Content Added per {}", timeline.granularity));
            let max = timeline.buckets.iter().map(|b| b.count).max().unwrap_or(0);
            for b in &timeline.buckets {
                println!(
                    "  {:<8} {:>6}  {}",
                    b.bucket.label(),
                    thousands(b.count),
                    bar(b.count, max).green()
                );
            }
        }
        None => {
            heading("Titles by Release Year");
            let max = summary.release_years.iter().map(|y| y.count).max().unwrap_or(0);
            for y in &summary.release_years {
                println!(
                    "  {:<8} {:>6}  {}",
                    y.year,
                    thousands(y.count),
                    bar(y.count, max).green()
                );
            }
        }
    }

    heading("Additions by Month");
    let max = summary.month_of_year.iter().copied().max().unwrap_or(0);
    for (name, count) in MONTH_NAMES.iter().zip(summary.month_of_year) {
        println!("  {:<10} {:>6}  {}", name, thousands(count), bar(count, max).green());
    }

    heading("Lag Between Release and Addition");
    println!("  Average Lag (Years): {:.1}", summary.lag.mean_years);
    println!(
        "  {} titles counted, {} added before release, {} without dates",
        summary.lag.included, summary.lag.negative, summary.lag.missing
    );

    heading("Insights");
    println!("{}Movie share: {:.1}%", "• ".cyan(), insights.movie_share_percent);
    println!("{}Most frequent genre: {}", "• ".cyan(), insights.top_genre);
    println!(
        "{}Average library age: {:.1} years",
        "• ".cyan(),
        insights.average_library_age
    );
    println!(
        "{}Average release-to-addition lag: {:.1} years",
        "• ".cyan(),
        insights.average_lag_years
    );
}

pub fn print_title_details(details: &TitleDetails, reviews: &[Review]) {
    heading(&details.title);
    if let Some(rating) = details.vote_average {
        println!("{}Rating: {:.1}/10", "• ".green(), rating);
    }
    if let Some(date) = &details.release_date {
        println!("{}Released: {}", "• ".green(), date);
    }
    if let Some(url) = details.poster_url("w200") {
        println!("{}Poster: {}", "• ".green(), url);
    }
    if let Some(overview) = &details.overview {
        println!("{}Overview: {}", "• ".green(), overview);
    }

    if !reviews.is_empty() {
        heading("Top Reviews");
        for review in reviews {
            println!("  {} {}", "Author:".bold(), review.author);
            println!("  > {}", review.content.trim());
            println!("  ---");
        }
    }
}

pub fn print_trending(trending: &[TitleSummary]) {
    heading("Trending Today");
    for (i, title) in trending.iter().enumerate() {
        let score = title
            .vote_average
            .map(|v| format!("{:.1}", v))
            .unwrap_or_else(|| "-".to_string());
        println!("{}. {} ({})", (i + 1).to_string().green(), title.title, score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thousands() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(8807), "8,807");
        assert_eq!(thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_bin_label() {
        let minutes = HistogramBin {
            start: 90,
            end: 100,
            count: 4,
        };
        let seasons = HistogramBin {
            start: 3,
            end: 4,
            count: 1,
        };
        assert_eq!(bin_label(&minutes), "90-99");
        assert_eq!(bin_label(&seasons), "3");
    }

    #[test]
    fn test_bar_scaling() {
        assert_eq!(bar(0, 0), "");
        assert_eq!(bar(10, 10).chars().count(), BAR_WIDTH);
        assert_eq!(bar(5, 10).chars().count(), BAR_WIDTH / 2);
        assert_eq!(bar(1, 1000).chars().count(), 1);
    }
}
