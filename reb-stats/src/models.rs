//! Row and view model structs for weekly price-change statistics.
//!
//! View structs derive `Serialize` so the web layer can hand them straight to
//! the JSON API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Region metadata joined onto every statistics row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegionDescriptor {
    /// Human-readable label (e.g. "강남구"). Aggregation groups on this.
    pub display_name: String,
    /// The named grouping the region belongs to (e.g. "서울").
    pub view_group_name: String,
    /// Left-to-right / top-to-bottom position within a rendering.
    pub view_order: i32,
    /// Participates in the nationwide view.
    pub national: bool,
    /// Participates in the capital-area view.
    pub capital: bool,
}

/// One weekly observation for one region.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegionStatRow {
    pub region_id: String,
    pub date: NaiveDate,
    /// Weekly sale price index change, in percent.
    pub sale_change: f64,
    /// Weekly jeonse price index change, in percent.
    pub jeonse_change: f64,
    pub region: RegionDescriptor,
}

impl RegionStatRow {
    pub fn display_name(&self) -> &str {
        &self.region.display_name
    }

    pub fn view_order(&self) -> i32 {
        self.region.view_order
    }
}

/// Up to eight distinct report dates, most recent first.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct DateWindow(Vec<NaiveDate>);

impl DateWindow {
    /// Wrap an already-descending slice of catalog dates.
    pub fn new(dates: Vec<NaiveDate>) -> Self {
        Self(dates)
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        self.0.contains(date)
    }

    /// The most recent `n` dates (all of them if the window is shorter).
    pub fn most_recent(&self, n: usize) -> &[NaiveDate] {
        &self.0[..n.min(self.0.len())]
    }

    /// Oldest first, for left-to-right table columns.
    pub fn ascending(&self) -> Vec<NaiveDate> {
        self.0.iter().rev().copied().collect()
    }

    pub fn newest(&self) -> Option<NaiveDate> {
        self.0.first().copied()
    }

    pub fn oldest(&self) -> Option<NaiveDate> {
        self.0.last().copied()
    }
}

/// Accumulated change for one region over the chart weeks.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartPoint {
    /// Region display name.
    pub name: String,
    /// Summed sale change, rounded to 2 decimal places.
    pub sale: f64,
    /// Summed jeonse change, rounded to 2 decimal places.
    pub jeonse: f64,
    /// Carried for ordering only.
    #[serde(skip)]
    pub view_order: i32,
}

/// A (sale, jeonse) pair for one heatmap cell.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct ChangePair {
    pub sale: f64,
    pub jeonse: f64,
}

/// One week of the heatmap: a cell per region, in chart order.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TableRow {
    pub date: NaiveDate,
    pub cells: Vec<ChangePair>,
}

/// Aggregated output consumed by every rendering context.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatsView {
    pub chart_series: Vec<ChartPoint>,
    pub table_rows: Vec<TableRow>,
}

impl StatsView {
    /// Region names in display order; the table columns follow this.
    pub fn region_names(&self) -> Vec<&str> {
        self.chart_series.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.chart_series.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn window_most_recent_clamps_to_length() {
        let window = DateWindow::new(vec![d(2025, 12, 8), d(2025, 12, 1)]);
        assert_eq!(window.most_recent(4), &[d(2025, 12, 8), d(2025, 12, 1)]);
        assert_eq!(window.most_recent(1), &[d(2025, 12, 8)]);
    }

    #[test]
    fn window_ascending_reverses() {
        let window = DateWindow::new(vec![d(2025, 12, 8), d(2025, 12, 1), d(2025, 11, 24)]);
        assert_eq!(
            window.ascending(),
            vec![d(2025, 11, 24), d(2025, 12, 1), d(2025, 12, 8)]
        );
        assert_eq!(window.newest(), Some(d(2025, 12, 8)));
        assert_eq!(window.oldest(), Some(d(2025, 11, 24)));
    }

    #[test]
    fn chart_point_serializes_without_view_order() {
        let point = ChartPoint {
            name: "강남구".to_string(),
            sale: 0.15,
            jeonse: -0.02,
            view_order: 7,
        };
        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(json["name"], "강남구");
        assert!(json.get("view_order").is_none());
    }

    #[test]
    fn stats_view_uses_camel_case_keys() {
        let json = serde_json::to_value(StatsView::default()).unwrap();
        assert!(json.get("chartSeries").is_some());
        assert!(json.get("tableRows").is_some());
    }
}
