//! RSX components composing a dashboard page.

mod change_chart;
mod date_navigator;
mod heatmap_table;
mod notice;
mod page_header;
mod scope_nav;

pub use change_chart::{chart_layout, BarGeometry, ChangeChart, ChartLayout};
pub use date_navigator::DateNavigator;
pub use heatmap_table::{format_change, HeatmapTable, Metric};
pub use notice::{notice_message, Notice};
pub use page_header::PageHeader;
pub use scope_nav::ScopeNav;
