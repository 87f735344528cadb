//! Weekly change heatmap: one row per region, one column per report date.

use dioxus::prelude::*;
use reb_stats::dates::short_label;
use reb_stats::heatmap;
use reb_stats::models::{ChangePair, TableRow};

/// Which half of a [`ChangePair`] a table shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Sale,
    Jeonse,
}

impl Metric {
    pub fn title(&self) -> &'static str {
        match self {
            Metric::Sale => "매매가격지수 주간 변동률 (%)",
            Metric::Jeonse => "전세가격지수 주간 변동률 (%)",
        }
    }

    pub fn pick(&self, pair: &ChangePair) -> f64 {
        match self {
            Metric::Sale => pair.sale,
            Metric::Jeonse => pair.jeonse,
        }
    }
}

/// Cell text for a change value. Zero prints without a sign.
pub fn format_change(value: f64) -> String {
    if value == 0.0 || value.is_nan() {
        "0.00".to_string()
    } else {
        format!("{:+.2}", value)
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct HeatmapTableProps {
    /// Region names in chart order; row i reads cell i of every table row
    pub regions: Vec<String>,
    /// Weeks, oldest first
    pub rows: Vec<TableRow>,
    pub metric: Metric,
}

/// Heatmap for one metric, coloured by the change buckets.
#[component]
pub fn HeatmapTable(props: HeatmapTableProps) -> Element {
    let metric = props.metric;

    rsx! {
        section {
            style: "margin: 12px 0; overflow-x: auto;",
            h3 {
                style: "margin: 0 0 4px 0; font-size: 16px;",
                "{metric.title()}"
            }
            table {
                style: "border-collapse: collapse; font-size: 12px;",
                thead {
                    tr {
                        th { style: "text-align: left; padding: 4px 8px;", "지역" }
                        for row in props.rows.iter() {
                            th {
                                key: "{row.date}",
                                style: "padding: 4px 6px;",
                                "{short_label(&row.date)}"
                            }
                        }
                    }
                }
                tbody {
                    for (i, name) in props.regions.iter().enumerate() {
                        tr {
                            key: "{name}",
                            th {
                                style: "text-align: left; padding: 4px 8px; white-space: nowrap;",
                                "{name}"
                            }
                            for row in props.rows.iter() {
                                {
                                    let value = row.cells.get(i).map(|c| metric.pick(c)).unwrap_or(0.0);
                                    let style = heatmap::bucket(value).css();
                                    rsx! {
                                        td {
                                            key: "{row.date}",
                                            style: "padding: 4px 6px; text-align: right; {style}",
                                            "{format_change(value)}"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
