//! Filter by content type (the "All / Movie / TV Show" selector).

use crate::traits::Filter;
use data_loader::{ContentType, TitleLike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What the content-type selector is set to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ContentTypeSelection {
    #[default]
    All,
    Movie,
    TvShow,
}

impl ContentTypeSelection {
    pub fn matches(&self, kind: &ContentType) -> bool {
        match self {
            ContentTypeSelection::All => true,
            ContentTypeSelection::Movie => *kind == ContentType::Movie,
            ContentTypeSelection::TvShow => *kind == ContentType::TvShow,
        }
    }
}

impl fmt::Display for ContentTypeSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ContentTypeSelection::All => "All",
            ContentTypeSelection::Movie => "Movie",
            ContentTypeSelection::TvShow => "TV Show",
        };
        f.write_str(label)
    }
}

impl FromStr for ContentTypeSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(ContentTypeSelection::All),
            "movie" | "movies" => Ok(ContentTypeSelection::Movie),
            "tv" | "tv show" | "tv-show" | "tv shows" | "show" | "shows" => {
                Ok(ContentTypeSelection::TvShow)
            }
            other => Err(format!(
                "unknown content type '{}' (expected all, movie or tv)",
                other
            )),
        }
    }
}

/// Keeps titles of the selected type. `All` keeps everything, including
/// rows whose type is missing or unrecognized.
pub struct ContentTypeFilter {
    selection: ContentTypeSelection,
}

impl ContentTypeFilter {
    pub fn new(selection: ContentTypeSelection) -> Self {
        Self { selection }
    }
}

impl Filter for ContentTypeFilter {
    fn name(&self) -> &str {
        "ContentTypeFilter"
    }

    fn keep(&self, title: &dyn TitleLike) -> bool {
        self.selection.matches(&title.record().kind)
    }
}
