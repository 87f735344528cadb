//! [`StatsStore`] over the SQLite database.

use crate::Database;
use chrono::NaiveDate;
use reb_stats::dates;
use reb_stats::models::{DateWindow, RegionStatRow};
use reb_stats::scope::RegionScope;
use reb_stats::store::StatsStore;
use reb_stats::{Result, StatsError};

fn unavailable(e: anyhow::Error) -> StatsError {
    StatsError::StoreUnavailable(format!("{:#}", e))
}

impl StatsStore for Database {
    fn fetch_report_dates(&self, reference_region: &str, limit: usize) -> Result<Vec<NaiveDate>> {
        let raw = self
            .query_report_dates(reference_region, limit)
            .map_err(unavailable)?;
        raw.iter()
            .map(|s| {
                dates::parse_date(s).ok_or_else(|| {
                    StatsError::StoreUnavailable(format!("malformed report date {:?}", s))
                })
            })
            .collect()
    }

    fn fetch_stats(&self, window: &DateWindow, scope: &RegionScope) -> Result<Vec<RegionStatRow>> {
        let report_dates: Vec<String> = window.dates().iter().map(dates::format_date).collect();
        self.query_window_stats(&report_dates, scope)
            .map_err(unavailable)
    }

    fn fetch_view_groups(&self) -> Result<Vec<String>> {
        self.query_view_groups().map_err(unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reb_stats::dashboard::{Dashboard, ViewStatus};
    use std::sync::Arc;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn sample_db() -> Database {
        let db = Database::new().unwrap();
        db.load_regions(
            "\
REGION_ID,DISPLAY_NAME,VIEW_GROUP,VIEW_ORDER,NATIONAL,CAPITAL
KR,전국,전국,0,1,0
11,서울,광역,2,1,1
",
        )
        .unwrap();
        db.load_weekly_stats(
            "\
REGION_ID,DATE,SALE_CHANGE,JEONSE_CHANGE
KR,2025-12-01,0.02,0.03
KR,2025-12-08,0.03,0.04
11,2025-12-01,0.10,0.05
11,2025-12-08,0.05,0.06
",
        )
        .unwrap();
        db
    }

    #[test]
    fn fetch_report_dates_parses_dates() {
        let db = sample_db();
        assert_eq!(
            db.fetch_report_dates("전국", 10).unwrap(),
            vec![d(2025, 12, 8), d(2025, 12, 1)]
        );
    }

    #[test]
    fn fetch_stats_respects_window() {
        let db = sample_db();
        let window = DateWindow::new(vec![d(2025, 12, 1)]);
        let rows = db.fetch_stats(&window, &RegionScope::National).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.date == d(2025, 12, 1)));
    }

    #[test]
    fn dashboard_over_database() {
        let dashboard = Dashboard::new(Arc::new(sample_db()));
        let view = dashboard.view(None, RegionScope::Capital);
        assert_eq!(view.status, ViewStatus::Ready);
        assert_eq!(view.stats.region_names(), vec!["서울"]);
        assert_eq!(view.stats.chart_series[0].sale, 0.15);
        assert_eq!(view.stats.table_rows.len(), 2);
    }
}
