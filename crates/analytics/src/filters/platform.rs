//! Filter a combined view down to one platform.

use crate::traits::Filter;
use data_loader::{Platform, TitleLike};

/// Keeps titles tagged with the given platform.
///
/// Untagged records (a single-platform catalog) never match.
pub struct PlatformFilter {
    platform: Platform,
}

impl PlatformFilter {
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }
}

impl Filter for PlatformFilter {
    fn name(&self) -> &str {
        "PlatformFilter"
    }

    fn keep(&self, title: &dyn TitleLike) -> bool {
        title.platform() == Some(self.platform)
    }
}
