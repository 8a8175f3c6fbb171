//! Parser for platform catalog CSV files.
//!
//! All four exports share the same header layout:
//! `show_id,type,title,director,cast,country,date_added,release_year,rating,duration,listed_in,description`
//!
//! Cells are quoted when they contain commas ("Dramas, International Movies"),
//! so we let the `csv` crate do the tokenizing. Every column is optional: a
//! file that lacks a column still loads, with that field absent on every row.

use crate::error::{DataLoadError, Result};
use crate::types::{ContentType, TitleRecord};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::warn;

/// One CSV row exactly as found in the file.
///
/// Rust concept: `#[serde(default)]` lets a missing column deserialize to `None`
/// instead of failing the whole row.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTitleRow {
    show_id: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    title: Option<String>,
    director: Option<String>,
    cast: Option<String>,
    country: Option<String>,
    date_added: Option<String>,
    release_year: Option<String>,
    rating: Option<String>,
    duration: Option<String>,
    listed_in: Option<String>,
    description: Option<String>,
}

impl From<RawTitleRow> for TitleRecord {
    fn from(row: RawTitleRow) -> Self {
        TitleRecord {
            show_id: non_blank(row.show_id),
            kind: ContentType::parse(row.kind.as_deref()),
            title: non_blank(row.title),
            director: non_blank(row.director),
            cast: non_blank(row.cast),
            country: non_blank(row.country),
            date_added: non_blank(row.date_added),
            release_year: row.release_year.as_deref().and_then(parse_release_year),
            rating: non_blank(row.rating),
            duration: non_blank(row.duration),
            listed_in: non_blank(row.listed_in),
            description: non_blank(row.description),
        }
    }
}

/// Parse a catalog file from disk
///
/// `file` in errors is the file name only, matching how the files are referred
/// to in configuration.
pub fn parse_titles_file(path: &Path) -> Result<Vec<TitleRecord>> {
    let file = File::open(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    parse_titles(file, &name)
}

/// Parse catalog rows from any reader.
///
/// Rows that cannot be decoded are skipped with a warning; one bad row never
/// blocks the rest of the file.
pub fn parse_titles<R: Read>(reader: R, file: &str) -> Result<Vec<TitleRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    // Make sure the header itself is readable before walking rows
    csv_reader.headers().map_err(|e| DataLoadError::Csv {
        file: file.to_string(),
        source: e,
    })?;

    let mut titles = Vec::new();
    let mut skipped = 0usize;

    for (idx, row) in csv_reader.deserialize::<RawTitleRow>().enumerate() {
        // +2: one for the header, one for 1-based numbering
        let line_no = idx + 2;
        match row {
            Ok(row) => titles.push(TitleRecord::from(row)),
            Err(e) => {
                skipped += 1;
                warn!("Skipping row {} in {}: {}", line_no, file, e);
            }
        }
    }

    if skipped > 0 {
        warn!("{}: skipped {} unreadable rows", file, skipped);
    }

    Ok(titles)
}

/// Parse a release year cell
///
/// Example: "2021"   -> Some(2021)
///          "2021.0" -> Some(2021)
///          "n/a"    -> None
fn parse_release_year(s: &str) -> Option<i32> {
    let trimmed = s.trim();
    if let Ok(year) = trimmed.parse::<i32>() {
        return Some(year);
    }
    // Some exports were round-tripped through a float column
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|y| y.fract() == 0.0 && y.is_finite())
        .map(|y| y as i32)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
