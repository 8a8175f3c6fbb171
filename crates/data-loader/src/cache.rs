//! Explicit catalog cache.
//!
//! Built once at start-up and handed to the loader. Entries are immutable
//! `Arc`s, so readers never observe a catalog changing under them; eviction
//! only removes the cache's own reference.

use crate::types::{Catalog, CombinedCatalog, Platform};
use std::collections::HashMap;
use std::fs;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

#[derive(Debug, Default)]
struct CacheState {
    catalogs: HashMap<Platform, Arc<Catalog>>,
    combined: Option<Arc<CombinedCatalog>>,
}

/// Process-lifetime cache of loaded catalogs, keyed by platform.
#[derive(Debug, Default)]
pub struct CatalogCache {
    state: RwLock<CacheState>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock cannot leave a half-written entry:
    // every write is a single insert or remove, so a poisoned lock is still usable.
    fn read(&self) -> RwLockReadGuard<'_, CacheState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, CacheState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Get a cached catalog
    pub fn get(&self, platform: Platform) -> Option<Arc<Catalog>> {
        self.read().catalogs.get(&platform).cloned()
    }

    /// Insert a freshly loaded catalog.
    ///
    /// If another caller populated the entry first, that entry wins and is
    /// returned, so every reader sees the same `Arc`.
    pub fn insert(&self, catalog: Catalog) -> Arc<Catalog> {
        let platform = catalog.platform();
        let mut state = self.write();
        state
            .catalogs
            .entry(platform)
            .or_insert_with(|| Arc::new(catalog))
            .clone()
    }

    pub fn combined(&self) -> Option<Arc<CombinedCatalog>> {
        self.read().combined.clone()
    }

    pub fn set_combined(&self, combined: CombinedCatalog) -> Arc<CombinedCatalog> {
        let mut state = self.write();
        state
            .combined
            .get_or_insert_with(|| Arc::new(combined))
            .clone()
    }

    /// Drop one platform (and the combined view built from it).
    ///
    /// Returns whether the platform was cached.
    pub fn invalidate(&self, platform: Platform) -> bool {
        let mut state = self.write();
        state.combined = None;
        let removed = state.catalogs.remove(&platform).is_some();
        debug!("Invalidated {} (was cached: {})", platform, removed);
        removed
    }

    /// Drop everything.
    pub fn clear(&self) {
        let mut state = self.write();
        state.catalogs.clear();
        state.combined = None;
    }

    /// Evict every catalog whose source file changed (or vanished) since it was read.
    ///
    /// The combined catalog is also dropped when a platform it had to skip
    /// now has a file on disk; that platform is reported too. Returns the
    /// affected platforms in load order.
    pub fn evict_stale(&self) -> Vec<Platform> {
        let (stale, reappeared): (Vec<Platform>, Vec<Platform>) = {
            let state = self.read();
            let stale = state
                .catalogs
                .values()
                .filter(|catalog| {
                    let on_disk = fs::metadata(catalog.source())
                        .and_then(|m| m.modified())
                        .ok();
                    on_disk.is_none() || on_disk != catalog.modified()
                })
                .map(|catalog| catalog.platform())
                .collect();
            let reappeared = state
                .combined
                .iter()
                .flat_map(|combined| combined.missing())
                .filter(|missing| missing.path.exists())
                .map(|missing| missing.platform)
                .collect();
            (stale, reappeared)
        };

        for platform in &stale {
            self.invalidate(*platform);
        }
        if !reappeared.is_empty() {
            debug!("Dropping combined catalog, files appeared for {:?}", reappeared);
            self.write().combined = None;
        }

        let mut evicted: Vec<Platform> = stale.into_iter().chain(reappeared).collect();
        evicted.sort();
        evicted.dedup();
        evicted
    }

    pub fn len(&self) -> usize {
        self.read().catalogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MissingDataset, TitleRecord};
    use std::path::PathBuf;

    fn catalog(platform: Platform, titles: usize) -> Catalog {
        Catalog::new(
            platform,
            PathBuf::from("/nonexistent/file.csv"),
            None,
            vec![TitleRecord::default(); titles],
        )
    }

    #[test]
    fn test_insert_and_get() {
        let cache = CatalogCache::new();
        assert!(cache.get(Platform::Netflix).is_none());

        let inserted = cache.insert(catalog(Platform::Netflix, 3));
        let fetched = cache.get(Platform::Netflix).unwrap();

        assert!(Arc::ptr_eq(&inserted, &fetched));
        assert_eq!(fetched.len(), 3);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_first_insert_wins() {
        let cache = CatalogCache::new();
        let first = cache.insert(catalog(Platform::Hulu, 1));
        let second = cache.insert(catalog(Platform::Hulu, 5));

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn test_invalidate_and_clear() {
        let cache = CatalogCache::new();
        cache.insert(catalog(Platform::Netflix, 1));
        cache.insert(catalog(Platform::Hulu, 1));
        cache.set_combined(CombinedCatalog::default());

        assert!(cache.invalidate(Platform::Netflix));
        assert!(!cache.invalidate(Platform::Netflix));
        assert!(cache.combined().is_none());
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_evict_stale_drops_vanished_files() {
        let cache = CatalogCache::new();
        cache.insert(catalog(Platform::DisneyPlus, 2));

        let evicted = cache.evict_stale();
        assert_eq!(evicted, vec![Platform::DisneyPlus]);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_evict_stale_drops_combined_when_missing_file_appears() {
        let dir = tempfile::TempDir::new().unwrap();
        let hulu = dir.path().join("hulu_titles.csv");

        let cache = CatalogCache::new();
        cache.set_combined(CombinedCatalog::new(
            Vec::new(),
            vec![MissingDataset {
                platform: Platform::Hulu,
                path: hulu.clone(),
            }],
        ));

        assert!(cache.evict_stale().is_empty());
        assert!(cache.combined().is_some());

        fs::write(&hulu, "title\n").unwrap();
        assert_eq!(cache.evict_stale(), vec![Platform::Hulu]);
        assert!(cache.combined().is_none());
    }
}
