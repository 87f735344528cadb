//! Report-date catalog: which weeks exist, which one a view is anchored on,
//! and the 8-week window behind it.
//!
//! The catalog asks the store for every report date of one reference region
//! (the national aggregate, which is published every week and so carries a
//! superset of the dates any other region has).

use crate::error::Result;
use crate::models::DateWindow;
use crate::store::StatsStore;
use chrono::NaiveDate;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Region whose report dates define the catalog.
pub const REFERENCE_REGION: &str = "전국";

/// Upper bound on catalog size, about 38 years of weekly reports.
pub const DEFAULT_DATE_LIMIT: usize = 2000;

/// Number of weeks in a view window.
pub const WINDOW_WEEKS: usize = 8;

/// Default lifetime of a cached date list.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

struct CachedDates {
    fetched_at: Instant,
    dates: Vec<NaiveDate>,
}

/// Lists available report dates, optionally caching them for a bounded time.
pub struct DateCatalog {
    store: Arc<dyn StatsStore>,
    reference_region: String,
    limit: usize,
    cache_ttl: Duration,
    cache: Mutex<Option<CachedDates>>,
}

impl DateCatalog {
    /// A catalog over `store` with the default reference region and limit and
    /// no caching.
    pub fn new(store: Arc<dyn StatsStore>) -> Self {
        Self {
            store,
            reference_region: REFERENCE_REGION.to_string(),
            limit: DEFAULT_DATE_LIMIT,
            cache_ttl: Duration::ZERO,
            cache: Mutex::new(None),
        }
    }

    pub fn with_reference_region(mut self, name: impl Into<String>) -> Self {
        self.reference_region = name.into();
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Keep a fetched list for `ttl`. `Duration::ZERO` disables caching.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn reference_region(&self) -> &str {
        &self.reference_region
    }

    /// Available dates, newest first and distinct, or the store's error.
    ///
    /// Failed fetches are never cached.
    pub fn try_list_dates(&self) -> Result<Vec<NaiveDate>> {
        if let Some(dates) = self.cached() {
            return Ok(dates);
        }

        let mut dates = self
            .store
            .fetch_report_dates(&self.reference_region, self.limit)?;
        dates.sort_by(|a, b| b.cmp(a));
        dates.dedup();
        dates.truncate(self.limit);
        log::info!(
            "catalog: {} report dates for {}",
            dates.len(),
            self.reference_region
        );

        if !self.cache_ttl.is_zero() {
            if let Ok(mut guard) = self.cache.lock() {
                *guard = Some(CachedDates {
                    fetched_at: Instant::now(),
                    dates: dates.clone(),
                });
            }
        }
        Ok(dates)
    }

    /// Available dates, newest first. Empty when the store is unreachable.
    pub fn list_dates(&self) -> Vec<NaiveDate> {
        match self.try_list_dates() {
            Ok(dates) => dates,
            Err(e) => {
                log::warn!("catalog: listing report dates failed: {}", e);
                Vec::new()
            }
        }
    }

    /// Drop any cached list so the next call hits the store.
    pub fn invalidate(&self) {
        if let Ok(mut guard) = self.cache.lock() {
            *guard = None;
        }
    }

    fn cached(&self) -> Option<Vec<NaiveDate>> {
        if self.cache_ttl.is_zero() {
            return None;
        }
        let guard = self.cache.lock().ok()?;
        let cached = guard.as_ref()?;
        if cached.fetched_at.elapsed() < self.cache_ttl {
            Some(cached.dates.clone())
        } else {
            None
        }
    }
}

/// The anchor a view should use: `requested` when it is a known report date,
/// otherwise the most recent one. `None` only when `available` is empty.
pub fn resolve_anchor(requested: Option<NaiveDate>, available: &[NaiveDate]) -> Option<NaiveDate> {
    match requested {
        Some(date) if available.contains(&date) => Some(date),
        Some(date) => {
            log::info!("catalog: {} is not a report date, using latest", date);
            available.first().copied()
        }
        None => available.first().copied(),
    }
}

/// The anchor and up to seven older report dates, newest first.
///
/// Empty when `anchor` is not in `available`. Fewer than eight dates near the
/// start of history is a normal result.
pub fn window_from(anchor: NaiveDate, available: &[NaiveDate]) -> DateWindow {
    match available.iter().position(|d| *d == anchor) {
        Some(i) => {
            let end = (i + WINDOW_WEEKS).min(available.len());
            DateWindow::new(available[i..end].to_vec())
        }
        None => DateWindow::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StatsError;
    use crate::models::RegionStatRow;
    use crate::scope::RegionScope;
    use crate::store::fixtures::*;
    use crate::store::MemoryStore;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts date fetches so cache behaviour can be observed.
    struct CountingStore {
        inner: MemoryStore,
        calls: AtomicUsize,
    }

    impl StatsStore for CountingStore {
        fn fetch_report_dates(&self, reference_region: &str, limit: usize) -> Result<Vec<NaiveDate>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.fetch_report_dates(reference_region, limit)
        }

        fn fetch_stats(&self, window: &DateWindow, scope: &RegionScope) -> Result<Vec<RegionStatRow>> {
            self.inner.fetch_stats(window, scope)
        }

        fn fetch_view_groups(&self) -> Result<Vec<String>> {
            self.inner.fetch_view_groups()
        }
    }

    fn national_store() -> MemoryStore {
        let national = region("전국", "전국", 0, true, false);
        let rows = weekly_dates()
            .into_iter()
            .map(|date| row(&national, date, 0.01, 0.02))
            .collect();
        MemoryStore::new(rows)
    }

    #[test]
    fn list_dates_is_descending() {
        let catalog = DateCatalog::new(Arc::new(national_store()));
        let dates = catalog.list_dates();
        assert_eq!(dates.len(), 10);
        assert_eq!(dates[0], d(2025, 12, 8));
        assert!(dates.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn list_dates_respects_limit() {
        let catalog = DateCatalog::new(Arc::new(national_store())).with_limit(4);
        assert_eq!(catalog.list_dates().len(), 4);
    }

    #[test]
    fn list_dates_fails_soft() {
        let catalog = DateCatalog::new(Arc::new(MemoryStore::unavailable()));
        assert!(catalog.list_dates().is_empty());
        assert!(matches!(
            catalog.try_list_dates(),
            Err(StatsError::StoreUnavailable(_))
        ));
    }

    #[test]
    fn other_reference_region() {
        let catalog =
            DateCatalog::new(Arc::new(national_store())).with_reference_region("서울");
        assert_eq!(catalog.reference_region(), "서울");
        assert!(catalog.list_dates().is_empty());
    }

    #[test]
    fn cache_serves_repeat_calls() {
        let store = Arc::new(CountingStore {
            inner: national_store(),
            calls: AtomicUsize::new(0),
        });
        let catalog = DateCatalog::new(store.clone()).with_cache_ttl(Duration::from_secs(60));
        let first = catalog.list_dates();
        let second = catalog.list_dates();
        assert_eq!(first, second);
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);

        catalog.invalidate();
        catalog.list_dates();
        assert_eq!(store.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn zero_ttl_always_fetches() {
        let store = Arc::new(CountingStore {
            inner: national_store(),
            calls: AtomicUsize::new(0),
        });
        let catalog = DateCatalog::new(store.clone());
        catalog.list_dates();
        catalog.list_dates();
        assert_eq!(store.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn resolve_anchor_keeps_known_date() {
        let available = weekly_dates();
        assert_eq!(
            resolve_anchor(Some(d(2025, 11, 24)), &available),
            Some(d(2025, 11, 24))
        );
    }

    #[test]
    fn resolve_anchor_falls_back_to_latest() {
        let available = weekly_dates();
        assert_eq!(resolve_anchor(None, &available), Some(d(2025, 12, 8)));
        assert_eq!(
            resolve_anchor(Some(d(2025, 11, 25)), &available),
            Some(d(2025, 12, 8))
        );
    }

    #[test]
    fn resolve_anchor_empty_catalog() {
        assert_eq!(resolve_anchor(None, &[]), None);
        assert_eq!(resolve_anchor(Some(d(2025, 12, 8)), &[]), None);
    }

    #[test]
    fn window_from_is_contiguous_slice() {
        let available = weekly_dates();
        for (i, anchor) in available.iter().enumerate() {
            let window = window_from(*anchor, &available);
            let expected = WINDOW_WEEKS.min(available.len() - i);
            assert_eq!(window.len(), expected);
            assert_eq!(window.dates(), &available[i..i + expected]);
            assert_eq!(window.newest(), Some(*anchor));
        }
    }

    #[test]
    fn window_from_near_start_of_history() {
        let available = weekly_dates();
        let earliest = *available.last().unwrap();
        let window = window_from(earliest, &available);
        assert_eq!(window.dates(), &[earliest]);
    }

    #[test]
    fn window_from_unknown_anchor_is_empty() {
        let available = weekly_dates();
        assert!(window_from(d(2025, 12, 9), &available).is_empty());
        assert!(window_from(d(2025, 12, 8), &[]).is_empty());
    }
}
