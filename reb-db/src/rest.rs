//! [`StatsStore`] over a hosted PostgREST-compatible endpoint.
//!
//! Statistics live in `real_estate_stats` keyed by `kb_region_id`, with a
//! foreign key into `region_mapping`, which carries the display metadata and
//! the `view_nation` / `view_capital` membership flags. One request returns
//! joined rows:
//!
//! ```text
//! GET {base}/rest/v1/real_estate_stats?select=kb_region_id,date,sale_change,jeonse_change,
//!     region_mapping!inner(display_name,view_group_name,view_order,view_nation,view_capital)
//!     &date=in.(2025-12-08,2025-12-01)&region_mapping.view_nation=eq.1&order=date.desc
//! ```
//!
//! When the mapping table has another name it is aliased back to
//! `region_mapping`, so responses decode the same way.
//!
//! Rows are re-sorted locally, since ordering by an embedded column is not
//! portable across server versions.

use chrono::NaiveDate;
use reb_stats::dates;
use reb_stats::models::{DateWindow, RegionDescriptor, RegionStatRow};
use reb_stats::scope::{encode_path_segment, RegionScope};
use reb_stats::store::{sort_rows, StatsStore};
use reb_stats::{Result, StatsError};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::time::Duration;

/// Default statistics table name.
pub const DEFAULT_STATS_TABLE: &str = "real_estate_stats";
/// Default region metadata table.
pub const DEFAULT_REGIONS_TABLE: &str = "region_mapping";

/// Response key of the embedded region metadata.
const REGION_EMBED: &str = "region_mapping";
const REGION_COLUMNS: &str = "display_name,view_group_name,view_order,view_nation,view_capital";

/// Connection settings for a hosted store.
#[derive(Debug, Clone)]
pub struct RestConfig {
    /// Project base URL, e.g. `https://example.supabase.co`.
    pub base_url: String,
    /// Anonymous read key, sent as both `apikey` and bearer token.
    pub api_key: Option<String>,
    pub stats_table: String,
    pub regions_table: String,
    pub timeout: Duration,
}

impl RestConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            stats_table: DEFAULT_STATS_TABLE.to_string(),
            regions_table: DEFAULT_REGIONS_TABLE.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_stats_table(mut self, table: impl Into<String>) -> Self {
        self.stats_table = table.into();
        self
    }

    pub fn with_regions_table(mut self, table: impl Into<String>) -> Self {
        self.regions_table = table.into();
        self
    }

    fn endpoint(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url.trim_end_matches('/'), table)
    }

    /// Inner-join embed of the mapping table under the `region_mapping` key.
    fn embed(&self, columns: &str) -> String {
        if self.regions_table == REGION_EMBED {
            format!("{}!inner({})", REGION_EMBED, columns)
        } else {
            format!("{}:{}!inner({})", REGION_EMBED, self.regions_table, columns)
        }
    }

    /// URL listing report dates of one region, newest first.
    pub fn dates_url(&self, reference_region: &str, limit: usize) -> String {
        format!(
            "{}?select=date,{}&{}.display_name=eq.{}&order=date.desc&limit={}",
            self.endpoint(&self.stats_table),
            self.embed("display_name"),
            REGION_EMBED,
            encode_path_segment(reference_region),
            limit
        )
    }

    /// URL fetching the joined rows of a window for one scope.
    pub fn stats_url(&self, window: &DateWindow, scope: &RegionScope) -> String {
        let date_list = window
            .dates()
            .iter()
            .map(dates::format_date)
            .collect::<Vec<_>>()
            .join(",");
        let filter = match scope {
            RegionScope::National => format!("{}.view_nation=eq.1", REGION_EMBED),
            RegionScope::Capital => format!("{}.view_capital=eq.1", REGION_EMBED),
            RegionScope::Group(name) => format!(
                "{}.view_group_name=eq.{}",
                REGION_EMBED,
                encode_path_segment(name)
            ),
        };
        format!(
            "{}?select=kb_region_id,date,sale_change,jeonse_change,{}&date=in.({})&{}&order=date.desc",
            self.endpoint(&self.stats_table),
            self.embed(REGION_COLUMNS),
            date_list,
            filter
        )
    }

    /// URL listing every region's group and order.
    pub fn groups_url(&self) -> String {
        format!(
            "{}?select=view_group_name,view_order&order=view_order.asc",
            self.endpoint(&self.regions_table)
        )
    }
}

/// Accept 1/0, true/false, "1"/"Y"/"true", or null (false).
fn deserialize_flag<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<bool, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_f64() == Some(1.0),
        Some(Value::String(s)) => matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "y" | "yes"),
        _ => false,
    })
}

/// Region ids are text in some deployments and integers in others.
fn deserialize_id<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        other => other.to_string(),
    })
}

#[derive(Debug, Deserialize)]
struct RestRegion {
    display_name: String,
    #[serde(default)]
    view_group_name: String,
    #[serde(default)]
    view_order: i32,
    #[serde(default, deserialize_with = "deserialize_flag")]
    view_nation: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    view_capital: bool,
}

#[derive(Debug, Deserialize)]
struct RestStatRow {
    #[serde(deserialize_with = "deserialize_id")]
    kb_region_id: String,
    date: NaiveDate,
    sale_change: Option<f64>,
    jeonse_change: Option<f64>,
    region_mapping: RestRegion,
}

#[derive(Debug, Deserialize)]
struct RestDateRow {
    date: NaiveDate,
}

#[derive(Debug, Deserialize)]
struct RestGroupRow {
    view_group_name: String,
}

/// Decode a stats response. Null changes read as 0.
pub fn decode_stats(body: &str) -> anyhow::Result<Vec<RegionStatRow>> {
    let raw: Vec<RestStatRow> = serde_json::from_str(body)?;
    let mut rows: Vec<RegionStatRow> = raw
        .into_iter()
        .map(|r| RegionStatRow {
            region_id: r.kb_region_id,
            date: r.date,
            sale_change: r.sale_change.unwrap_or(0.0),
            jeonse_change: r.jeonse_change.unwrap_or(0.0),
            region: RegionDescriptor {
                display_name: r.region_mapping.display_name,
                view_group_name: r.region_mapping.view_group_name,
                view_order: r.region_mapping.view_order,
                national: r.region_mapping.view_nation,
                capital: r.region_mapping.view_capital,
            },
        })
        .collect();
    sort_rows(&mut rows);
    Ok(rows)
}

/// Decode a dates response into distinct dates, newest first.
pub fn decode_dates(body: &str, limit: usize) -> anyhow::Result<Vec<NaiveDate>> {
    let raw: Vec<RestDateRow> = serde_json::from_str(body)?;
    let mut dates: Vec<NaiveDate> = raw.into_iter().map(|r| r.date).collect();
    dates.sort_by(|a, b| b.cmp(a));
    dates.dedup();
    dates.truncate(limit);
    Ok(dates)
}

/// Decode a regions response into group names, first appearance first.
pub fn decode_groups(body: &str) -> anyhow::Result<Vec<String>> {
    let raw: Vec<RestGroupRow> = serde_json::from_str(body)?;
    let mut groups: Vec<String> = Vec::new();
    for row in raw {
        if !groups.contains(&row.view_group_name) {
            groups.push(row.view_group_name);
        }
    }
    Ok(groups)
}

/// Blocking HTTP client for a hosted store.
///
/// Create and use it off the async executor (e.g. inside
/// `tokio::task::spawn_blocking`); the blocking client owns its own runtime.
pub struct RestStore {
    client: reqwest::blocking::Client,
    config: RestConfig,
}

impl RestStore {
    pub fn new(config: RestConfig) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()?;
        log::info!("rest: using store at {}", config.base_url);
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &RestConfig {
        &self.config
    }

    fn get(&self, url: &str) -> anyhow::Result<String> {
        let mut request = self.client.get(url).header("Accept", "application/json");
        if let Some(key) = &self.config.api_key {
            request = request.header("apikey", key).bearer_auth(key);
        }
        let response = request.send()?.error_for_status()?;
        Ok(response.text()?)
    }
}

fn unavailable(e: anyhow::Error) -> StatsError {
    StatsError::StoreUnavailable(format!("{:#}", e))
}

impl StatsStore for RestStore {
    fn fetch_report_dates(&self, reference_region: &str, limit: usize) -> Result<Vec<NaiveDate>> {
        let url = self.config.dates_url(reference_region, limit);
        let body = self.get(&url).map_err(unavailable)?;
        let dates = decode_dates(&body, limit).map_err(unavailable)?;
        log::info!("rest: {} report dates for {}", dates.len(), reference_region);
        Ok(dates)
    }

    fn fetch_stats(&self, window: &DateWindow, scope: &RegionScope) -> Result<Vec<RegionStatRow>> {
        if window.is_empty() {
            return Ok(Vec::new());
        }
        let url = self.config.stats_url(window, scope);
        let body = self.get(&url).map_err(unavailable)?;
        let rows = decode_stats(&body).map_err(unavailable)?;
        log::info!("rest: {} rows for {}", rows.len(), scope);
        Ok(rows)
    }

    fn fetch_view_groups(&self) -> Result<Vec<String>> {
        let body = self.get(&self.config.groups_url()).map_err(unavailable)?;
        decode_groups(&body).map_err(unavailable)
    }
}
