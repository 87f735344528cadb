//! Typed query methods for the statistics database.
//!
//! Every query joins `weekly_stats` to `regions` on `region_id`; rows without
//! a region are invisible.

use crate::Database;
use anyhow::Context;
use reb_stats::dates;
use reb_stats::models::{RegionDescriptor, RegionStatRow};
use reb_stats::scope::RegionScope;
use rusqlite::params;

/// Raw joined row before date parsing.
type RawStatRow = (String, String, f64, f64, String, String, i32, bool, bool);

impl Database {
    /// Distinct report dates for the region with display name `display_name`,
    /// newest first, at most `limit` of them (`YYYY-MM-DD`).
    pub fn query_report_dates(&self, display_name: &str, limit: usize) -> anyhow::Result<Vec<String>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT DISTINCT s.date
             FROM weekly_stats s
             INNER JOIN regions r ON s.region_id = r.region_id
             WHERE r.display_name = ?1
             ORDER BY s.date DESC
             LIMIT ?2",
        )?;
        let rows = stmt
            .query_map(params![display_name, limit as i64], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        log::info!(
            "query: query_report_dates returned {} records",
            rows.len()
        );
        Ok(rows)
    }

    /// Joined rows dated in `report_dates` whose region matches `scope`, ordered by
    /// date descending then view order ascending.
    pub fn query_window_stats(
        &self,
        report_dates: &[String],
        scope: &RegionScope,
    ) -> anyhow::Result<Vec<RegionStatRow>> {
        if report_dates.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = (1..=report_dates.len())
            .map(|i| format!("?{}", i))
            .collect::<Vec<_>>()
            .join(", ");
        let mut bindings: Vec<String> = report_dates.to_vec();
        let scope_clause = match scope {
            RegionScope::National => "r.is_national = 1".to_string(),
            RegionScope::Capital => "r.is_capital = 1".to_string(),
            RegionScope::Group(name) => {
                bindings.push(name.clone());
                format!("r.view_group_name = ?{}", bindings.len())
            }
        };
        let sql = format!(
            "SELECT s.region_id, s.date, s.sale_change, s.jeonse_change,
                    r.display_name, r.view_group_name, r.view_order,
                    r.is_national, r.is_capital
             FROM weekly_stats s
             INNER JOIN regions r ON s.region_id = r.region_id
             WHERE s.date IN ({}) AND {}
             ORDER BY s.date DESC, r.view_order ASC",
            placeholders, scope_clause
        );

        let conn = self.conn()?;
        let mut stmt = conn.prepare(&sql)?;
        let raw: Vec<RawStatRow> = stmt
            .query_map(rusqlite::params_from_iter(bindings.iter()), |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                    row.get(6)?,
                    row.get(7)?,
                    row.get(8)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut rows = Vec::with_capacity(raw.len());
        for (region_id, date, sale, jeonse, display_name, group, order, national, capital) in raw {
            let date = dates::parse_date(&date)
                .with_context(|| format!("stored date {:?} for region {}", date, region_id))?;
            rows.push(RegionStatRow {
                region_id,
                date,
                sale_change: sale,
                jeonse_change: jeonse,
                region: RegionDescriptor {
                    display_name,
                    view_group_name: group,
                    view_order: order,
                    national,
                    capital,
                },
            });
        }
        log::info!(
            "query: query_window_stats({}) returned {} records",
            scope,
            rows.len()
        );
        Ok(rows)
    }

    /// Distinct view-group names ordered by their lowest view order.
    pub fn query_view_groups(&self) -> anyhow::Result<Vec<String>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT view_group_name
             FROM regions
             GROUP BY view_group_name
             ORDER BY MIN(view_order), view_group_name",
        )?;
        let rows = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        log::info!("query: query_view_groups returned {} records", rows.len());
        Ok(rows)
    }
}
