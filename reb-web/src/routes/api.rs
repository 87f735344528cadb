//! JSON API over the same pipeline as the pages.

use crate::error::AppError;
use crate::state::AppState;
use axum::extract::{Query, State};
use axum::response::Json;
use chrono::NaiveDate;
use reb_stats::dashboard::DashboardView;
use reb_stats::dates::{format_date, parse_date_lenient};
use reb_stats::scope::RegionScope;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub struct StatsQuery {
    /// `national`, `capital`, a view-group name or `group:<name>`; national
    /// when absent
    pub scope: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NearestQuery {
    /// Reference date; the latest report when absent
    pub date: Option<String>,
    pub months: Option<u32>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct NearestResponse {
    pub reference: Option<String>,
    pub months: u32,
    pub date: String,
}

fn parse_strict(raw: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    match raw {
        None => Ok(None),
        Some(s) => parse_date_lenient(s)
            .map(Some)
            .ok_or_else(|| AppError::bad_request(format!("invalid date: {}", s))),
    }
}

/// GET /api/dates: report dates, newest first.
pub async fn list_dates(State(state): State<Arc<AppState>>) -> Result<Json<Vec<String>>, AppError> {
    let dates = state
        .run(|dashboard| dashboard.catalog().try_list_dates())
        .await??;
    log::info!("api: dates returned {} records", dates.len());
    Ok(Json(dates.iter().map(format_date).collect()))
}

/// GET /api/groups: view-group names in display order.
pub async fn list_groups(State(state): State<Arc<AppState>>) -> Result<Json<Vec<String>>, AppError> {
    let groups = state.run(|dashboard| dashboard.view_groups()).await?;
    Ok(Json(groups))
}

/// GET /api/stats?scope=&date=: the full view for one scope.
///
/// Unparseable dates fall back to the latest report, as on the pages.
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<DashboardView>, AppError> {
    let scope = RegionScope::from_param(query.scope.as_deref().unwrap_or(""));
    let requested = query.date.as_deref().and_then(parse_date_lenient);
    let view = state
        .run(move |dashboard| dashboard.view(requested, scope))
        .await?;
    Ok(Json(view))
}

/// GET /api/nearest?date=&months=: the report date closest to `months`
/// months before `date`.
pub async fn get_nearest(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NearestQuery>,
) -> Result<Json<NearestResponse>, AppError> {
    let months = query
        .months
        .ok_or_else(|| AppError::bad_request("missing query parameter: months"))?;
    let reference = parse_strict(query.date.as_deref())?;
    let date = state
        .run(move |dashboard| dashboard.nearest(reference, months))
        .await??;
    Ok(Json(NearestResponse {
        reference: reference.as_ref().map(format_date),
        months,
        date: format_date(&date),
    }))
}
