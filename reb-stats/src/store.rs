//! The read capability the core needs from a statistics store.
//!
//! Backends live elsewhere (`reb-db` has SQLite and REST implementations);
//! [`MemoryStore`] is the in-process fake used by tests and demos.

use crate::error::{Result, StatsError};
use crate::models::{DateWindow, RegionStatRow};
use crate::scope::RegionScope;
use chrono::NaiveDate;
use std::cmp::Reverse;

/// Read-only access to weekly statistics joined with region metadata.
///
/// Implementations are shared across request handlers, hence `Send + Sync`.
/// Any backend failure must be reported as [`StatsError::StoreUnavailable`].
pub trait StatsStore: Send + Sync {
    /// Distinct report dates of rows whose region display name equals
    /// `reference_region`, newest first, at most `limit` entries.
    fn fetch_report_dates(&self, reference_region: &str, limit: usize) -> Result<Vec<NaiveDate>>;

    /// Rows dated within `window` whose region matches `scope`, sorted by
    /// date descending then view order ascending.
    fn fetch_stats(&self, window: &DateWindow, scope: &RegionScope) -> Result<Vec<RegionStatRow>>;

    /// Distinct view-group names, ordered by their lowest view order.
    fn fetch_view_groups(&self) -> Result<Vec<String>>;
}

/// Sort rows the way every store must return them.
pub fn sort_rows(rows: &mut [RegionStatRow]) {
    rows.sort_by_key(|r| (Reverse(r.date), r.view_order()));
}

/// In-memory store over a fixed set of rows.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    rows: Vec<RegionStatRow>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new(rows: Vec<RegionStatRow>) -> Self {
        Self {
            rows,
            unavailable: false,
        }
    }

    /// A store whose every call fails, for exercising degraded paths.
    pub fn unavailable() -> Self {
        Self {
            rows: Vec::new(),
            unavailable: true,
        }
    }

    pub fn rows(&self) -> &[RegionStatRow] {
        &self.rows
    }

    fn check(&self) -> Result<()> {
        if self.unavailable {
            Err(StatsError::StoreUnavailable(
                "memory store is switched off".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

impl StatsStore for MemoryStore {
    fn fetch_report_dates(&self, reference_region: &str, limit: usize) -> Result<Vec<NaiveDate>> {
        self.check()?;
        let mut dates: Vec<NaiveDate> = self
            .rows
            .iter()
            .filter(|r| r.display_name() == reference_region)
            .map(|r| r.date)
            .collect();
        dates.sort_by(|a, b| b.cmp(a));
        dates.dedup();
        dates.truncate(limit);
        Ok(dates)
    }

    fn fetch_stats(&self, window: &DateWindow, scope: &RegionScope) -> Result<Vec<RegionStatRow>> {
        self.check()?;
        let mut rows: Vec<RegionStatRow> = self
            .rows
            .iter()
            .filter(|r| window.contains(&r.date) && scope.matches(&r.region))
            .cloned()
            .collect();
        sort_rows(&mut rows);
        Ok(rows)
    }

    fn fetch_view_groups(&self) -> Result<Vec<String>> {
        self.check()?;
        let mut groups: Vec<(i32, &str)> = Vec::new();
        for row in &self.rows {
            let name = row.region.view_group_name.as_str();
            match groups.iter_mut().find(|(_, g)| *g == name) {
                Some(entry) => entry.0 = entry.0.min(row.view_order()),
                None => groups.push((row.view_order(), name)),
            }
        }
        groups.sort_by_key(|(order, _)| *order);
        Ok(groups.into_iter().map(|(_, g)| g.to_string()).collect())
    }
}
