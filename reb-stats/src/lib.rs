//! Weekly housing price-change statistics: date catalog, nearest-date
//! resolution and the windowed aggregation pipeline.
//!
//! Every page and command goes through the same pipeline:
//!
//! 1. [`DateCatalog`](date_catalog::DateCatalog) lists the report dates known
//!    for the reference region and picks an anchor plus an 8-week window.
//! 2. A [`StatsStore`](store::StatsStore) returns the raw per-region rows for
//!    that window.
//! 3. [`aggregator::aggregate`] folds the rows into a chart series (last 4
//!    weeks summed) and a pivoted heatmap table (all 8 weeks).
//! 4. [`heatmap::bucket`] picks the cell colours.
//!
//! [`dashboard::Dashboard`] wires these together for the web pages and CLI.

pub mod aggregator;
pub mod dashboard;
pub mod date_catalog;
pub mod dates;
pub mod error;
pub mod heatmap;
pub mod models;
pub mod nearest_date;
pub mod scope;
pub mod store;

pub use error::{Result, StatsError};
