//! SVG bar chart of the accumulated four-week change per region.

use dioxus::prelude::*;
use reb_stats::models::ChartPoint;

const WIDTH: f64 = 960.0;
const HEIGHT: f64 = 280.0;
const MARGIN_TOP: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 48.0;
const MARGIN_X: f64 = 16.0;
/// Smallest half-range of the value axis, so all-zero series still draw.
const MIN_EXTENT: f64 = 0.05;

pub const SALE_COLOR: &str = "#EF4444";
pub const JEONSE_COLOR: &str = "#3B82F6";

/// Position of one bar in SVG user units.
#[derive(Debug, Clone, PartialEq)]
pub struct BarGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub value: f64,
}

/// Geometry for one region: a sale bar and a jeonse bar side by side.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionBars {
    pub name: String,
    /// Centre of the group, for the label
    pub label_x: f64,
    pub sale: BarGeometry,
    pub jeonse: BarGeometry,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    /// y coordinate of the zero line
    pub baseline: f64,
    pub extent: f64,
    pub regions: Vec<RegionBars>,
}

fn bar(x: f64, width: f64, value: f64, baseline: f64, scale: f64) -> BarGeometry {
    let height = value.abs() * scale;
    let y = if value >= 0.0 { baseline - height } else { baseline };
    BarGeometry { x, y, width, height, value }
}

/// Lay out `series` on a symmetric value axis centred on zero.
pub fn chart_layout(series: &[ChartPoint]) -> ChartLayout {
    let extent = series
        .iter()
        .flat_map(|p| [p.sale.abs(), p.jeonse.abs()])
        .filter(|v| v.is_finite())
        .fold(MIN_EXTENT, f64::max);
    let plot_height = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let baseline = MARGIN_TOP + plot_height / 2.0;
    let scale = (plot_height / 2.0) / extent;

    let slot = if series.is_empty() {
        0.0
    } else {
        (WIDTH - 2.0 * MARGIN_X) / series.len() as f64
    };
    let bar_width = slot * 0.35;

    let regions = series
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let left = MARGIN_X + slot * i as f64;
            let label_x = left + slot / 2.0;
            let sale_value = if point.sale.is_finite() { point.sale } else { 0.0 };
            let jeonse_value = if point.jeonse.is_finite() { point.jeonse } else { 0.0 };
            RegionBars {
                name: point.name.clone(),
                label_x,
                sale: bar(label_x - bar_width, bar_width, sale_value, baseline, scale),
                jeonse: bar(label_x, bar_width, jeonse_value, baseline, scale),
            }
        })
        .collect();

    ChartLayout {
        baseline,
        extent,
        regions,
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct ChangeChartProps {
    pub series: Vec<ChartPoint>,
}

/// Grouped bars of sale and jeonse change per region.
#[component]
pub fn ChangeChart(props: ChangeChartProps) -> Element {
    let layout = chart_layout(&props.series);
    let view_box = format!("0 0 {} {}", WIDTH, HEIGHT);
    let label_y = HEIGHT - MARGIN_BOTTOM + 18.0;
    let right = WIDTH - MARGIN_X;

    rsx! {
        section {
            style: "margin: 12px 0;",
            h3 {
                style: "margin: 0 0 4px 0; font-size: 16px;",
                "최근 4주 누적 변동률 (%)"
            }
            div {
                style: "display: flex; gap: 12px; font-size: 12px;",
                span { style: "color: {SALE_COLOR};", "■ 매매" }
                span { style: "color: {JEONSE_COLOR};", "■ 전세" }
            }
            svg {
                "viewBox": "{view_box}",
                "width": "100%",
                "role": "img",
                line {
                    "x1": "{MARGIN_X}",
                    "x2": "{right}",
                    "y1": "{layout.baseline}",
                    "y2": "{layout.baseline}",
                    "stroke": "#9CA3AF",
                }
                for region in layout.regions.iter() {
                    g {
                        key: "{region.name}",
                        rect {
                            "x": "{region.sale.x:.1}",
                            "y": "{region.sale.y:.1}",
                            "width": "{region.sale.width:.1}",
                            "height": "{region.sale.height:.1}",
                            "fill": SALE_COLOR,
                            title { "{region.name} 매매 {region.sale.value:.2}" }
                        }
                        rect {
                            "x": "{region.jeonse.x:.1}",
                            "y": "{region.jeonse.y:.1}",
                            "width": "{region.jeonse.width:.1}",
                            "height": "{region.jeonse.height:.1}",
                            "fill": JEONSE_COLOR,
                            title { "{region.name} 전세 {region.jeonse.value:.2}" }
                        }
                        text {
                            "x": "{region.label_x:.1}",
                            "y": "{label_y}",
                            "text-anchor": "middle",
                            "font-size": "11",
                            "{region.name}"
                        }
                    }
                }
            }
        }
    }
}
