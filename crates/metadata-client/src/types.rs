//! Public result types and the private wire format they are decoded from.

use serde::{Deserialize, Serialize};

/// Base URL for TMDB poster images.
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// The best match for a title search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleDetails {
    pub id: u64,
    pub title: String,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub poster_path: Option<String>,
    /// Average user score out of 10
    pub vote_average: Option<f32>,
}

impl TitleDetails {
    /// Example: poster_url("w200") -> "https://image.tmdb.org/t/p/w200/abc.jpg"
    pub fn poster_url(&self, size: &str) -> Option<String> {
        poster_url(self.poster_path.as_deref()?, size)
    }
}

/// One entry of the trending list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleSummary {
    pub id: u64,
    pub title: String,
    pub poster_path: Option<String>,
    pub vote_average: Option<f32>,
}

impl TitleSummary {
    pub fn poster_url(&self, size: &str) -> Option<String> {
        poster_url(self.poster_path.as_deref()?, size)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub author: String,
    pub content: String,
    pub url: Option<String>,
}

fn poster_url(path: &str, size: &str) -> Option<String> {
    let path = path.trim();
    if path.is_empty() {
        return None;
    }
    Some(format!("{}/{}{}", IMAGE_BASE_URL, size, path))
}

// ============================================================================
// TMDB API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct ResultsPage<T> {
    #[serde(default = "Vec::new")]
    pub(crate) results: Vec<T>,
}

/// Movies carry `title`, TV entries `name`; trending and search mix both.
#[derive(Debug, Deserialize)]
pub(crate) struct WireTitle {
    id: u64,
    title: Option<String>,
    name: Option<String>,
    overview: Option<String>,
    release_date: Option<String>,
    first_air_date: Option<String>,
    poster_path: Option<String>,
    vote_average: Option<f32>,
}

impl WireTitle {
    fn display_title(&self) -> String {
        self.title
            .clone()
            .or_else(|| self.name.clone())
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireReview {
    #[serde(default)]
    author: String,
    #[serde(default)]
    content: String,
    url: Option<String>,
}

// ============================================================================
// Conversions
// ============================================================================

impl From<WireTitle> for TitleDetails {
    fn from(w: WireTitle) -> Self {
        Self {
            id: w.id,
            title: w.display_title(),
            overview: w.overview,
            release_date: w.release_date.or(w.first_air_date),
            poster_path: w.poster_path,
            vote_average: w.vote_average,
        }
    }
}

impl From<WireTitle> for TitleSummary {
    fn from(w: WireTitle) -> Self {
        Self {
            id: w.id,
            title: w.display_title(),
            poster_path: w.poster_path,
            vote_average: w.vote_average,
        }
    }
}

impl From<WireReview> for Review {
    fn from(w: WireReview) -> Self {
        Self {
            author: w.author,
            content: w.content,
            url: w.url,
        }
    }
}
