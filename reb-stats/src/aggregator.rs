//! Folds a window of raw rows into the chart series and heatmap table.
//!
//! Every page and command builds its views through [`aggregate`], so the
//! chart and table can never disagree about which regions exist or in what
//! order they appear.
//!
//! Duplicate rows for one (region, date) pair are not expected from a
//! well-formed store. When they do occur the first one seen wins, in both the
//! chart sums and the table cells.

use crate::models::{ChangePair, ChartPoint, DateWindow, RegionStatRow, StatsView, TableRow};
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

/// Number of most recent weeks summed into the chart series.
pub const CHART_WEEKS: usize = 4;

/// Running sums for one region.
#[derive(Debug, Clone)]
struct RegionAccumulator {
    name: String,
    view_order: i32,
    sale: f64,
    jeonse: f64,
}

/// Round to 2 decimal places, halves away from zero (0.125 -> 0.13).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// First row seen for each (display name, date) pair, in input order.
fn first_seen(rows: &[RegionStatRow]) -> Vec<&RegionStatRow> {
    let mut seen: HashSet<(&str, NaiveDate)> = HashSet::with_capacity(rows.len());
    rows.iter()
        .filter(|r| seen.insert((r.display_name(), r.date)))
        .collect()
}

/// Sum each region's changes over the most recent [`CHART_WEEKS`] dates of
/// `window`, rounded, ordered by view order.
///
/// Regions with equal view order keep the order they were first seen in.
pub fn chart_series(rows: &[RegionStatRow], window: &DateWindow) -> Vec<ChartPoint> {
    let recent = window.most_recent(CHART_WEEKS);

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<RegionAccumulator> = Vec::new();
    for row in first_seen(rows) {
        if !recent.contains(&row.date) {
            continue;
        }
        let slot = *index.entry(row.display_name()).or_insert_with(|| {
            groups.push(RegionAccumulator {
                name: row.display_name().to_string(),
                view_order: row.view_order(),
                sale: 0.0,
                jeonse: 0.0,
            });
            groups.len() - 1
        });
        groups[slot].sale += row.sale_change;
        groups[slot].jeonse += row.jeonse_change;
    }

    groups.sort_by_key(|g| g.view_order);
    groups
        .into_iter()
        .map(|g| ChartPoint {
            name: g.name,
            sale: round2(g.sale),
            jeonse: round2(g.jeonse),
            view_order: g.view_order,
        })
        .collect()
}

/// Pivot `rows` into one row per window date (oldest first) with a cell per
/// region of `regions`. Missing observations read as (0, 0).
pub fn table_rows(rows: &[RegionStatRow], window: &DateWindow, regions: &[ChartPoint]) -> Vec<TableRow> {
    let lookup: HashMap<(&str, NaiveDate), ChangePair> = first_seen(rows)
        .into_iter()
        .map(|r| {
            (
                (r.display_name(), r.date),
                ChangePair {
                    sale: r.sale_change,
                    jeonse: r.jeonse_change,
                },
            )
        })
        .collect();

    window
        .ascending()
        .into_iter()
        .map(|date| TableRow {
            date,
            cells: regions
                .iter()
                .map(|region| {
                    lookup
                        .get(&(region.name.as_str(), date))
                        .copied()
                        .unwrap_or_default()
                })
                .collect(),
        })
        .collect()
}

/// Build the chart series and the heatmap table for one window.
pub fn aggregate(rows: &[RegionStatRow], window: &DateWindow) -> StatsView {
    let chart_series = chart_series(rows, window);
    let table_rows = table_rows(rows, window, &chart_series);
    log::info!(
        "aggregate: {} rows -> {} regions x {} weeks",
        rows.len(),
        chart_series.len(),
        table_rows.len()
    );
    StatsView {
        chart_series,
        table_rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RegionDescriptor;
    use crate::store::fixtures::*;

    fn window_of(n: usize) -> DateWindow {
        DateWindow::new(weekly_dates().into_iter().take(n).collect())
    }

    fn seoul() -> RegionDescriptor {
        region("서울", "광역", 2, true, true)
    }

    fn busan() -> RegionDescriptor {
        region("부산", "광역", 5, true, false)
    }

    #[test]
    fn sums_only_present_recent_dates() {
        let window = window_of(8);
        let dates = window.dates().to_vec();
        let rows = vec![
            row(&seoul(), dates[0], 0.10, 0.01),
            row(&seoul(), dates[2], 0.05, 0.02),
            // Outside the four most recent weeks.
            row(&seoul(), dates[5], 9.0, 9.0),
        ];
        let chart = chart_series(&rows, &window);
        assert_eq!(chart.len(), 1);
        assert_eq!(chart[0].sale, 0.15);
        assert_eq!(chart[0].jeonse, 0.03);
    }

    #[test]
    fn chart_is_ordered_by_view_order() {
        let window = window_of(4);
        let date = window.dates()[0];
        let rows = vec![
            row(&busan(), date, 0.01, 0.01),
            row(&region("전국", "전국", 0, true, false), date, 0.02, 0.02),
            row(&seoul(), date, 0.03, 0.03),
        ];
        let names: Vec<String> = chart_series(&rows, &window)
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["전국", "서울", "부산"]);
    }

    #[test]
    fn equal_view_order_keeps_first_seen() {
        let window = window_of(1);
        let date = window.dates()[0];
        let rows = vec![
            row(&region("B", "g", 1, true, false), date, 0.0, 0.0),
            row(&region("A", "g", 1, true, false), date, 0.0, 0.0),
        ];
        let names: Vec<String> = chart_series(&rows, &window)
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn duplicate_rows_first_seen_wins() {
        let window = window_of(4);
        let date = window.dates()[0];
        let rows = vec![row(&seoul(), date, 0.10, 0.20), row(&seoul(), date, 5.0, 5.0)];
        let view = aggregate(&rows, &window);
        assert_eq!(view.chart_series[0].sale, 0.10);
        let newest = view.table_rows.last().unwrap();
        assert_eq!(newest.cells[0], ChangePair { sale: 0.10, jeonse: 0.20 });
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(-0.125), -0.13);
        assert_eq!(round2(0.124), 0.12);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn table_is_oldest_first_and_zero_filled() {
        let window = window_of(8);
        let dates = window.dates().to_vec();
        let rows = vec![
            row(&seoul(), dates[0], 0.1, 0.2),
            row(&busan(), dates[0], -0.1, -0.2),
            // Only the old week has Seoul; Busan is absent there.
            row(&seoul(), dates[7], 0.3, 0.4),
        ];
        let view = aggregate(&rows, &window);
        assert_eq!(view.table_rows.len(), 8);
        assert_eq!(view.table_rows[0].date, dates[7]);
        assert_eq!(view.table_rows[7].date, dates[0]);

        let oldest = &view.table_rows[0];
        assert_eq!(oldest.cells[0], ChangePair { sale: 0.3, jeonse: 0.4 });
        assert_eq!(oldest.cells[1], ChangePair::default());

        let middle = &view.table_rows[3];
        assert!(middle.cells.iter().all(|c| *c == ChangePair::default()));
    }

    #[test]
    fn table_values_are_not_rounded() {
        let window = window_of(1);
        let rows = vec![row(&seoul(), window.dates()[0], 0.123456, -0.987654)];
        let view = aggregate(&rows, &window);
        assert_eq!(view.chart_series[0].sale, 0.12);
        assert_eq!(
            view.table_rows[0].cells[0],
            ChangePair { sale: 0.123456, jeonse: -0.987654 }
        );
    }

    #[test]
    fn table_columns_only_for_chart_regions() {
        // A region seen only outside the recent four weeks has no column.
        let window = window_of(8);
        let dates = window.dates().to_vec();
        let rows = vec![
            row(&seoul(), dates[0], 0.1, 0.1),
            row(&busan(), dates[6], 0.2, 0.2),
        ];
        let view = aggregate(&rows, &window);
        assert_eq!(view.region_names(), vec!["서울"]);
        assert!(view.table_rows.iter().all(|r| r.cells.len() == 1));
    }

    #[test]
    fn empty_rows_yield_zero_column_table() {
        let window = window_of(8);
        let view = aggregate(&[], &window);
        assert!(view.chart_series.is_empty());
        assert_eq!(view.table_rows.len(), 8);
        assert!(view.table_rows.iter().all(|r| r.cells.is_empty()));
    }

    #[test]
    fn single_date_window() {
        let window = window_of(1);
        let date = window.dates()[0];
        let rows = vec![row(&seoul(), date, 0.07, 0.01), row(&busan(), date, 0.0, -0.01)];
        let view = aggregate(&rows, &window);
        assert_eq!(view.chart_series.len(), 2);
        assert_eq!(view.table_rows.len(), 1);
        assert_eq!(view.table_rows[0].cells.len(), 2);
    }

    #[test]
    fn aggregation_is_idempotent() {
        let window = window_of(8);
        let mut rows = Vec::new();
        for (i, date) in window.dates().iter().enumerate() {
            for (j, r) in [seoul(), busan(), region("대구", "광역", 6, true, false)]
                .iter()
                .enumerate()
            {
                rows.push(row(r, *date, 0.01 * (i + j) as f64, -0.02 * i as f64));
            }
        }
        let first = serde_json::to_string(&aggregate(&rows, &window)).unwrap();
        let second = serde_json::to_string(&aggregate(&rows, &window)).unwrap();
        assert_eq!(first, second);
    }
}
