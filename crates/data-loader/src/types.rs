//! Core domain types for streaming-platform catalogs.
//!
//! This module defines the fundamental data structures used throughout the system.
//! Key Rust concepts demonstrated here:
//! - Enums for closed sets (Platform, ContentType, Field)
//! - `FromStr` / `Display` for round-tripping identifiers
//! - A small trait (`TitleLike`) so aggregation works on any view of a catalog
//! - `Cow<str>` to hand out borrowed or computed field values

use crate::error::DataLoadError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::SystemTime;

// =============================================================================
// Platform
// =============================================================================

/// The streaming platforms this toolkit knows about.
///
/// The declaration order is the deterministic load order used everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "Netflix")]
    Netflix,
    #[serde(rename = "Prime Video")]
    PrimeVideo,
    #[serde(rename = "Disney+")]
    DisneyPlus,
    #[serde(rename = "Hulu")]
    Hulu,
}

impl Platform {
    /// Every platform, in load order.
    pub const ALL: [Platform; 4] = [
        Platform::Netflix,
        Platform::PrimeVideo,
        Platform::DisneyPlus,
        Platform::Hulu,
    ];

    /// Canonical display name, also the key used in the file mapping.
    pub fn name(&self) -> &'static str {
        match self {
            Platform::Netflix => "Netflix",
            Platform::PrimeVideo => "Prime Video",
            Platform::DisneyPlus => "Disney+",
            Platform::Hulu => "Hulu",
        }
    }

    /// File name used when the configuration does not override it.
    pub fn default_file_name(&self) -> &'static str {
        match self {
            Platform::Netflix => "netflix_titles.csv",
            Platform::PrimeVideo => "amazon_prime_titles.csv",
            Platform::DisneyPlus => "disney_plus_titles.csv",
            Platform::Hulu => "hulu_titles.csv",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Platform {
    type Err = DataLoadError;

    /// Parse a platform identifier (case-insensitive, a few aliases accepted)
    ///
    /// Example: "Prime Video" -> Ok(Platform::PrimeVideo)
    ///          "disney"      -> Ok(Platform::DisneyPlus)
    ///          "Peacock"     -> Err(DataLoadError::Configuration)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "netflix" => Ok(Platform::Netflix),
            "prime video" | "prime" | "prime-video" | "amazon prime" => Ok(Platform::PrimeVideo),
            "disney+" | "disney" | "disney-plus" | "disney plus" => Ok(Platform::DisneyPlus),
            "hulu" => Ok(Platform::Hulu),
            _ => Err(DataLoadError::Configuration(format!(
                "unknown platform identifier '{}'",
                s
            ))),
        }
    }
}

// =============================================================================
// Title-related Types
// =============================================================================

/// Kind of title. Anything that is neither a movie nor a TV show is kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentType {
    Movie,
    TvShow,
    Other(String),
    #[default]
    Unknown,
}

impl ContentType {
    /// Parse the raw `type` column.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => ContentType::Unknown,
            Some(s) if s.eq_ignore_ascii_case("movie") => ContentType::Movie,
            Some(s) if s.eq_ignore_ascii_case("tv show") => ContentType::TvShow,
            Some(s) => ContentType::Other(s.to_string()),
        }
    }

    /// Label as it appears in the source files.
    pub fn label(&self) -> &str {
        match self {
            ContentType::Movie => "Movie",
            ContentType::TvShow => "TV Show",
            ContentType::Other(s) => s,
            ContentType::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of a platform catalog.
///
/// Rust concept: every column is an `Option<T>` because the source files are
/// not guaranteed to carry every column, and blank cells are common.
/// - `Some(value)` means the cell had content
/// - `None` means the cell (or the whole column) was missing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TitleRecord {
    pub show_id: Option<String>,
    pub kind: ContentType,
    pub title: Option<String>,
    /// Comma-delimited list of names
    pub director: Option<String>,
    pub cast: Option<String>,
    /// Comma-delimited list of country names
    pub country: Option<String>,
    /// Raw text, e.g. "September 25, 2021"
    pub date_added: Option<String>,
    pub release_year: Option<i32>,
    pub rating: Option<String>,
    /// "90 min" for movies, "3 Seasons" for TV shows
    pub duration: Option<String>,
    /// Comma-delimited genre tags
    pub listed_in: Option<String>,
    pub description: Option<String>,
}

impl TitleRecord {
    /// Value of a column as text, `None` when the cell is empty.
    ///
    /// `Field::Platform` is not a column of the record itself; see [`TitleLike::field_value`].
    pub fn field(&self, field: Field) -> Option<Cow<'_, str>> {
        let value = match field {
            Field::Type => match &self.kind {
                ContentType::Unknown => None,
                kind => Some(Cow::Borrowed(kind.label())),
            },
            Field::Director => self.director.as_deref().map(Cow::Borrowed),
            Field::Country => self.country.as_deref().map(Cow::Borrowed),
            Field::ListedIn => self.listed_in.as_deref().map(Cow::Borrowed),
            Field::Rating => self.rating.as_deref().map(Cow::Borrowed),
            Field::ReleaseYear => self.release_year.map(|y| Cow::Owned(y.to_string())),
            Field::Platform => None,
        };
        value.filter(|v| !v.trim().is_empty())
    }

    /// `date_added` parsed into a calendar date.
    pub fn added_on(&self) -> Option<NaiveDate> {
        self.date_added.as_deref().and_then(parse_date_added)
    }

    pub fn is_movie(&self) -> bool {
        self.kind == ContentType::Movie
    }

    pub fn is_tv_show(&self) -> bool {
        self.kind == ContentType::TvShow
    }
}

/// Date formats seen across the four platform exports.
const DATE_FORMATS: [&str; 4] = ["%B %d, %Y", "%b %d, %Y", "%Y-%m-%d", "%m/%d/%Y"];

/// Parse a `date_added` cell.
///
/// Example: "September 25, 2021" -> Some(2021-09-25)
///          " August 4, 2017"    -> Some(2017-08-04)
///          "2015-06-01"         -> Some(2015-06-01)
///          "sometime"           -> None
pub fn parse_date_added(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

/// Split a comma-delimited multi-value cell into trimmed, non-empty tokens.
///
/// Example: "Dramas, International Movies" -> ["Dramas", "International Movies"]
pub fn split_multi_value(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|token| !token.is_empty())
}

// =============================================================================
// Field
// =============================================================================

/// The aggregatable columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Type,
    Director,
    Country,
    ListedIn,
    Rating,
    ReleaseYear,
    Platform,
}

impl Field {
    /// Fields whose cells hold a comma-delimited list.
    pub fn is_multi_value(&self) -> bool {
        matches!(self, Field::Director | Field::Country | Field::ListedIn)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Field::Type => "type",
            Field::Director => "director",
            Field::Country => "country",
            Field::ListedIn => "listed_in",
            Field::Rating => "rating",
            Field::ReleaseYear => "release_year",
            Field::Platform => "platform",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = DataLoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "type" => Ok(Field::Type),
            "director" | "directors" => Ok(Field::Director),
            "country" | "countries" => Ok(Field::Country),
            "listed_in" | "genre" | "genres" => Ok(Field::ListedIn),
            "rating" => Ok(Field::Rating),
            "release_year" | "year" => Ok(Field::ReleaseYear),
            "platform" => Ok(Field::Platform),
            _ => Err(DataLoadError::Configuration(format!("unknown field '{}'", s))),
        }
    }
}

// =============================================================================
// TitleLike - one view over single-platform and combined records
// =============================================================================

/// Anything that exposes a title record.
///
/// Aggregations are written against this trait so the same function runs on a
/// platform catalog, a combined catalog, or a filtered `Vec<&T>` of either.
pub trait TitleLike {
    fn record(&self) -> &TitleRecord;

    /// Source platform, when the view carries one.
    fn platform(&self) -> Option<Platform> {
        None
    }

    /// Date the title was added to its platform.
    fn added_on(&self) -> Option<NaiveDate> {
        self.record().added_on()
    }

    fn field_value(&self, field: Field) -> Option<Cow<'_, str>> {
        match field {
            Field::Platform => self.platform().map(|p| Cow::Borrowed(p.name())),
            other => self.record().field(other),
        }
    }
}

impl TitleLike for TitleRecord {
    fn record(&self) -> &TitleRecord {
        self
    }
}

impl<T: TitleLike + ?Sized> TitleLike for &T {
    fn record(&self) -> &TitleRecord {
        (**self).record()
    }

    fn platform(&self) -> Option<Platform> {
        (**self).platform()
    }

    fn added_on(&self) -> Option<NaiveDate> {
        (**self).added_on()
    }

    fn field_value(&self, field: Field) -> Option<Cow<'_, str>> {
        (**self).field_value(field)
    }
}

// =============================================================================
// Catalogs
// =============================================================================

/// All titles of one platform, as read from its file.
///
/// Immutable once built; shared through `Arc<Catalog>` by the cache.
#[derive(Debug, Clone)]
pub struct Catalog {
    platform: Platform,
    source: PathBuf,
    /// File modification time observed when the catalog was read
    modified: Option<SystemTime>,
    titles: Vec<TitleRecord>,
}

impl Catalog {
    pub fn new(
        platform: Platform,
        source: PathBuf,
        modified: Option<SystemTime>,
        titles: Vec<TitleRecord>,
    ) -> Self {
        Self {
            platform,
            source,
            modified,
            titles,
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }

    /// Get all titles
    ///
    /// Rust concept: `&[T]` is a slice (view into an array/vector)
    pub fn titles(&self) -> &[TitleRecord] {
        &self.titles
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

/// Normalized `date_added` of a combined-catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddedDate {
    Known(NaiveDate),
    /// Missing or unparseable in the source
    Unknown,
}

impl AddedDate {
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw.and_then(parse_date_added) {
            Some(date) => AddedDate::Known(date),
            None => AddedDate::Unknown,
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            AddedDate::Known(date) => Some(*date),
            AddedDate::Unknown => None,
        }
    }
}

/// A title tagged with the platform it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedTitle {
    platform: Platform,
    pub date_added: AddedDate,
    pub record: TitleRecord,
}

impl CombinedTitle {
    /// Tag a record. The platform cannot be changed afterwards.
    pub fn new(platform: Platform, record: TitleRecord) -> Self {
        let date_added = AddedDate::from_raw(record.date_added.as_deref());
        Self {
            platform,
            date_added,
            record,
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }
}

impl TitleLike for CombinedTitle {
    fn record(&self) -> &TitleRecord {
        &self.record
    }

    fn platform(&self) -> Option<Platform> {
        Some(self.platform)
    }

    fn added_on(&self) -> Option<NaiveDate> {
        self.date_added.date()
    }
}

/// A platform file that was expected but absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingDataset {
    pub platform: Platform,
    pub path: PathBuf,
}

/// Union of every platform catalog that could be loaded.
#[derive(Debug, Clone, Default)]
pub struct CombinedCatalog {
    titles: Vec<CombinedTitle>,
    missing: Vec<MissingDataset>,
}

impl CombinedCatalog {
    pub fn new(titles: Vec<CombinedTitle>, missing: Vec<MissingDataset>) -> Self {
        Self { titles, missing }
    }

    pub fn titles(&self) -> &[CombinedTitle] {
        &self.titles
    }

    /// Platform files skipped during the combined load
    pub fn missing(&self) -> &[MissingDataset] {
        &self.missing
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// Distinct platforms present, in load order.
    pub fn platforms(&self) -> Vec<Platform> {
        Platform::ALL
            .into_iter()
            .filter(|p| self.titles.iter().any(|t| t.platform == *p))
            .collect()
    }

    /// Titles belonging to one platform.
    pub fn for_platform(&self, platform: Platform) -> Vec<&CombinedTitle> {
        self.titles
            .iter()
            .filter(|t| t.platform == platform)
            .collect()
    }
}
