//! Genre filter over the multi-value `listed_in` column.

use crate::traits::Filter;
use data_loader::{Field, TitleLike, split_multi_value};

/// Keeps titles listed under a genre (exact tag, case-insensitive).
pub struct GenreFilter {
    genre: String,
}

impl GenreFilter {
    pub fn new(genre: impl Into<String>) -> Self {
        Self {
            genre: genre.into().trim().to_lowercase(),
        }
    }
}

impl Filter for GenreFilter {
    fn name(&self) -> &str {
        "GenreFilter"
    }

    fn keep(&self, title: &dyn TitleLike) -> bool {
        title
            .field_value(Field::ListedIn)
            .is_some_and(|genres| {
                split_multi_value(&genres).any(|tag| tag.to_lowercase() == self.genre)
            })
    }
}
