//! Composes catalog, store and aggregator into a renderable view.

use crate::aggregator;
use crate::date_catalog::{self, DateCatalog};
use crate::error::{Result, StatsError};
use crate::models::{DateWindow, StatsView};
use crate::nearest_date::{self, QuickJump};
use crate::scope::RegionScope;
use crate::store::StatsStore;
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

/// What the page should show besides the data itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewStatus {
    Ready,
    /// The store answered but had nothing for this view.
    NoData,
    /// The store could not be reached; everything is empty.
    StoreUnavailable,
}

/// Everything one page render needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub scope: RegionScope,
    /// Full catalog, newest first, for the date selector.
    pub dates: Vec<NaiveDate>,
    pub anchor: Option<NaiveDate>,
    pub window: DateWindow,
    pub stats: StatsView,
    pub quick_jumps: Vec<QuickJump>,
    pub status: ViewStatus,
}

impl DashboardView {
    fn empty(scope: RegionScope, status: ViewStatus) -> Self {
        Self {
            scope,
            dates: Vec::new(),
            anchor: None,
            window: DateWindow::default(),
            stats: StatsView::default(),
            quick_jumps: Vec::new(),
            status,
        }
    }
}

/// Entry point shared by the web pages and the CLI.
pub struct Dashboard {
    store: Arc<dyn StatsStore>,
    catalog: DateCatalog,
}

impl Dashboard {
    /// A dashboard with an uncached default catalog over `store`.
    pub fn new(store: Arc<dyn StatsStore>) -> Self {
        let catalog = DateCatalog::new(store.clone());
        Self { store, catalog }
    }

    /// A dashboard with a preconfigured catalog. The catalog should wrap the
    /// same store.
    pub fn with_catalog(store: Arc<dyn StatsStore>, catalog: DateCatalog) -> Self {
        Self { store, catalog }
    }

    pub fn catalog(&self) -> &DateCatalog {
        &self.catalog
    }

    /// Build the view for `scope` anchored on `requested`, or on the latest
    /// report date when `requested` is missing or unknown.
    ///
    /// Never fails: store trouble and empty results are reported through
    /// [`DashboardView::status`].
    pub fn view(&self, requested: Option<NaiveDate>, scope: RegionScope) -> DashboardView {
        let dates = match self.catalog.try_list_dates() {
            Ok(dates) => dates,
            Err(e) => {
                log::warn!("dashboard: {} unavailable: {}", scope, e);
                return DashboardView::empty(scope, ViewStatus::StoreUnavailable);
            }
        };
        let Some(anchor) = date_catalog::resolve_anchor(requested, &dates) else {
            return DashboardView::empty(scope, ViewStatus::NoData);
        };

        let window = date_catalog::window_from(anchor, &dates);
        let quick_jumps = nearest_date::quick_jumps(&dates, anchor);
        let (stats, status) = match self.store.fetch_stats(&window, &scope) {
            Ok(rows) if rows.is_empty() => (StatsView::default(), ViewStatus::NoData),
            Ok(rows) => (aggregator::aggregate(&rows, &window), ViewStatus::Ready),
            Err(e) => {
                log::warn!("dashboard: fetching {} at {} failed: {}", scope, anchor, e);
                (StatsView::default(), ViewStatus::StoreUnavailable)
            }
        };

        DashboardView {
            scope,
            dates,
            anchor: Some(anchor),
            window,
            stats,
            quick_jumps,
            status,
        }
    }

    /// The report date nearest to `months` months before `reference` (or
    /// before the latest report date when `reference` is absent).
    pub fn nearest(&self, reference: Option<NaiveDate>, months: u32) -> Result<NaiveDate> {
        let dates = self.catalog.try_list_dates()?;
        let reference = reference
            .or_else(|| dates.first().copied())
            .ok_or_else(|| StatsError::NoData("no report dates available".to_string()))?;
        nearest_date::nearest(&dates, reference, months)
    }

    /// View-group names for navigation. Empty when the store is unreachable.
    pub fn view_groups(&self) -> Vec<String> {
        self.store.fetch_view_groups().unwrap_or_else(|e| {
            log::warn!("dashboard: listing view groups failed: {}", e);
            Vec::new()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures::*;
    use crate::store::MemoryStore;

    fn sample_dashboard() -> Dashboard {
        let national = region("전국", "전국", 0, true, false);
        let seoul = region("서울", "광역", 2, true, true);
        let gangnam = region("강남구", "서울", 10, false, true);
        let seocho = region("서초구", "서울", 11, false, true);
        let mut rows = Vec::new();
        for (i, date) in weekly_dates().into_iter().enumerate() {
            rows.push(row(&national, date, 0.01, 0.02));
            rows.push(row(&seoul, date, 0.05, 0.03));
            rows.push(row(&gangnam, date, 0.1 + 0.01 * i as f64, 0.04));
            // Seocho stops reporting in the most recent week.
            if i > 0 {
                rows.push(row(&seocho, date, 0.2, -0.1));
            }
        }
        Dashboard::new(Arc::new(MemoryStore::new(rows)))
    }

    #[test]
    fn view_defaults_to_latest_anchor() {
        let view = sample_dashboard().view(None, RegionScope::National);
        assert_eq!(view.status, ViewStatus::Ready);
        assert_eq!(view.anchor, Some(d(2025, 12, 8)));
        assert_eq!(view.window.len(), 8);
        assert_eq!(view.dates.len(), 10);
        assert_eq!(view.stats.region_names(), vec!["전국", "서울"]);
        assert_eq!(view.stats.chart_series[0].sale, 0.04);
        assert_eq!(view.quick_jumps.len(), 8);
    }

    #[test]
    fn view_honours_known_anchor() {
        let view = sample_dashboard().view(Some(d(2025, 11, 3)), RegionScope::Capital);
        assert_eq!(view.anchor, Some(d(2025, 11, 3)));
        assert_eq!(view.window.newest(), Some(d(2025, 11, 3)));
        assert_eq!(view.window.len(), 5);
        assert_eq!(view.stats.region_names(), vec!["서울", "강남구", "서초구"]);
    }

    #[test]
    fn group_view_zero_fills_missing_week() {
        let view = sample_dashboard().view(None, RegionScope::Group("서울".to_string()));
        assert_eq!(view.stats.region_names(), vec!["강남구", "서초구"]);
        let newest = view.stats.table_rows.last().unwrap();
        assert_eq!(newest.date, d(2025, 12, 8));
        assert_eq!(newest.cells[1].sale, 0.0);
        // Seocho: three reported weeks of 0.2 within the recent four.
        assert_eq!(view.stats.chart_series[1].sale, 0.6);
    }

    #[test]
    fn unknown_group_is_no_data() {
        let view = sample_dashboard().view(None, RegionScope::Group("제주".to_string()));
        assert_eq!(view.status, ViewStatus::NoData);
        assert!(view.stats.is_empty());
        assert_eq!(view.dates.len(), 10);
    }

    #[test]
    fn unavailable_store_degrades() {
        let dashboard = Dashboard::new(Arc::new(MemoryStore::unavailable()));
        let view = dashboard.view(None, RegionScope::National);
        assert_eq!(view.status, ViewStatus::StoreUnavailable);
        assert!(view.dates.is_empty());
        assert!(dashboard.view_groups().is_empty());
        assert!(dashboard.nearest(None, 3).is_err());
    }

    #[test]
    fn empty_store_is_no_data() {
        let dashboard = Dashboard::new(Arc::new(MemoryStore::new(Vec::new())));
        let view = dashboard.view(Some(d(2025, 12, 8)), RegionScope::National);
        assert_eq!(view.status, ViewStatus::NoData);
        assert_eq!(view.anchor, None);
        assert!(matches!(dashboard.nearest(None, 1), Err(StatsError::NoData(_))));
    }

    #[test]
    fn nearest_uses_latest_when_reference_missing() {
        let dashboard = sample_dashboard();
        assert_eq!(dashboard.nearest(None, 1).unwrap(), d(2025, 11, 10));
        assert_eq!(
            dashboard.nearest(Some(d(2025, 11, 24)), 1).unwrap(),
            d(2025, 10, 27)
        );
    }

    #[test]
    fn view_groups_for_navigation() {
        assert_eq!(
            sample_dashboard().view_groups(),
            vec!["전국".to_string(), "광역".to_string(), "서울".to_string()]
        );
    }
}
