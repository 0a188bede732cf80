//! Time-bounded cache of the truck catalog.
//!
//! The engine never reads the catalog itself; the calling service owns a
//! [`CatalogCache`] (or a [`SharedCatalogCache`] across request threads) and
//! hands the resulting [`TruckType`]s to the allocator.

use crate::truck::{TruckCatalogRow, TruckType, DEFAULT_CLEARANCE};
use crate::{Error, Result};
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Default lifetime of a catalog snapshot.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Source of catalog rows, typically a database query.
pub trait CatalogSource {
    /// Fetches every truck type row.
    fn fetch(&self) -> Result<Vec<TruckCatalogRow>>;
}

/// Truck types captured at one point in time.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    /// Usable truck types.
    pub trucks: Vec<TruckType>,
    /// When the rows were fetched.
    pub fetched_at: Instant,
}

/// Catalog snapshot with a time-to-live.
#[derive(Debug, Clone)]
pub struct CatalogCache {
    snapshot: Option<CatalogSnapshot>,
    ttl: Duration,
    clearance: f64,
}

impl Default for CatalogCache {
    fn default() -> Self {
        Self {
            snapshot: None,
            ttl: DEFAULT_TTL,
            clearance: DEFAULT_CLEARANCE,
        }
    }
}

impl CatalogCache {
    /// Creates an empty cache with the default TTL.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the time-to-live.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Sets the clearance applied to fetched rows.
    pub fn with_clearance(mut self, feet: f64) -> Self {
        self.clearance = feet;
        self
    }

    /// Current snapshot, if any.
    pub fn snapshot(&self) -> Option<&CatalogSnapshot> {
        self.snapshot.as_ref()
    }

    /// Whether the cache must be refreshed at `now`.
    pub fn is_stale(&self, now: Instant) -> bool {
        match &self.snapshot {
            Some(snapshot) => now.saturating_duration_since(snapshot.fetched_at) >= self.ttl,
            None => true,
        }
    }

    /// Replaces the snapshot with freshly fetched rows.
    pub fn store(&mut self, rows: &[TruckCatalogRow], now: Instant) -> &[TruckType] {
        let trucks = rows
            .iter()
            .map(|row| TruckType::from_catalog(row, self.clearance))
            .collect();
        let snapshot = self.snapshot.insert(CatalogSnapshot {
            trucks,
            fetched_at: now,
        });
        &snapshot.trucks
    }

    /// Returns the cached trucks, fetching from `source` when stale.
    pub fn get_or_refresh(
        &mut self,
        source: &dyn CatalogSource,
        now: Instant,
    ) -> Result<&[TruckType]> {
        if self.is_stale(now) {
            let rows = source.fetch()?;
            log::debug!("Refreshed truck catalog: {} rows", rows.len());
            return Ok(self.store(&rows, now));
        }
        match &self.snapshot {
            Some(snapshot) => Ok(&snapshot.trucks),
            None => Err(Error::Internal("catalog snapshot missing".into())),
        }
    }
}

/// [`CatalogCache`] shared between threads.
#[derive(Debug, Default)]
pub struct SharedCatalogCache {
    inner: RwLock<CatalogCache>,
}

impl SharedCatalogCache {
    /// Wraps a cache.
    pub fn new(cache: CatalogCache) -> Self {
        Self {
            inner: RwLock::new(cache),
        }
    }

    /// Returns a copy of the cached trucks, refreshing when stale.
    pub fn trucks(&self, source: &dyn CatalogSource, now: Instant) -> Result<Vec<TruckType>> {
        {
            let cache = self
                .inner
                .read()
                .map_err(|_| Error::Internal("catalog cache lock poisoned".into()))?;
            if !cache.is_stale(now) {
                if let Some(snapshot) = cache.snapshot() {
                    return Ok(snapshot.trucks.clone());
                }
            }
        }

        let mut cache = self
            .inner
            .write()
            .map_err(|_| Error::Internal("catalog cache lock poisoned".into()))?;
        cache.get_or_refresh(source, now).map(<[TruckType]>::to_vec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct CountingSource {
        calls: Cell<usize>,
    }

    impl CatalogSource for CountingSource {
        fn fetch(&self) -> Result<Vec<TruckCatalogRow>> {
            self.calls.set(self.calls.get() + 1);
            Ok(vec![TruckCatalogRow {
                id: "T1".into(),
                name: "Tata Ace".into(),
                length: 7.25,
                width: 4.75,
                height: 5.25,
                volume_capacity: 0.0,
                weight_capacity: 750.0,
            }])
        }
    }

    struct FailingSource;

    impl CatalogSource for FailingSource {
        fn fetch(&self) -> Result<Vec<TruckCatalogRow>> {
            Err(Error::CatalogUnavailable("connection refused".into()))
        }
    }

    #[test]
    fn test_staleness_is_pure() {
        let start = Instant::now();
        let mut cache = CatalogCache::new();
        assert!(cache.is_stale(start));

        cache.store(&[], start);
        assert!(!cache.is_stale(start));
        assert!(!cache.is_stale(start + Duration::from_secs(299)));
        assert!(cache.is_stale(start + Duration::from_secs(300)));
    }

    #[test]
    fn test_get_or_refresh_fetches_once_per_ttl() {
        let source = CountingSource {
            calls: Cell::new(0),
        };
        let start = Instant::now();
        let mut cache = CatalogCache::new();

        let trucks = cache.get_or_refresh(&source, start).unwrap();
        assert_eq!(trucks.len(), 1);
        assert_eq!(trucks[0].usable_length(), 7.0);

        cache
            .get_or_refresh(&source, start + Duration::from_secs(10))
            .unwrap();
        assert_eq!(source.calls.get(), 1);

        cache
            .get_or_refresh(&source, start + Duration::from_secs(301))
            .unwrap();
        assert_eq!(source.calls.get(), 2);
    }

    #[test]
    fn test_fetch_error_propagates() {
        let mut cache = CatalogCache::new();
        let err = cache.get_or_refresh(&FailingSource, Instant::now());
        assert!(matches!(err, Err(Error::CatalogUnavailable(_))));
        assert!(cache.snapshot().is_none());
    }

    #[test]
    fn test_shared_cache() {
        let source = CountingSource {
            calls: Cell::new(0),
        };
        let shared = SharedCatalogCache::new(CatalogCache::new().with_clearance(0.0));
        let now = Instant::now();
        let trucks = shared.trucks(&source, now).unwrap();
        assert_eq!(trucks[0].usable_length(), 7.25);
        shared.trucks(&source, now).unwrap();
        assert_eq!(source.calls.get(), 1);
    }
}
