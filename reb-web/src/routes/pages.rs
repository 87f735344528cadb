//! Server-rendered dashboard pages.

use crate::error::AppError;
use crate::pages::render_dashboard;
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::response::Html;
use chrono::NaiveDate;
use reb_stats::dates::parse_date_lenient;
use reb_stats::scope::RegionScope;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    /// Anchor date, `YYYY-MM-DD` or `YYYYMMDD`
    pub date: Option<String>,
}

impl PageQuery {
    /// The requested anchor. Unparseable values count as absent.
    fn anchor(&self) -> Option<NaiveDate> {
        let raw = self.date.as_deref()?;
        let parsed = parse_date_lenient(raw);
        if parsed.is_none() {
            log::info!("web: ignoring unparseable date {:?}", raw);
        }
        parsed
    }
}

async fn render_scope(
    state: &Arc<AppState>,
    scope: RegionScope,
    query: PageQuery,
) -> Result<Html<String>, AppError> {
    let requested = query.anchor();
    let html = state
        .run(move |dashboard| {
            let view = dashboard.view(requested, scope);
            let groups = dashboard.view_groups();
            render_dashboard(&view, &groups)
        })
        .await?;
    Ok(Html(html))
}

/// GET /: nationwide view.
pub async fn national_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, AppError> {
    render_scope(&state, RegionScope::National, query).await
}

/// GET /capital: capital-area view.
pub async fn capital_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, AppError> {
    render_scope(&state, RegionScope::Capital, query).await
}

/// GET /group/{name}: one view group. The router has already
/// percent-decoded `name`.
pub async fn group_page(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, AppError> {
    render_scope(&state, RegionScope::Group(name), query).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::*;

    fn query(date: &str) -> Query<PageQuery> {
        Query(PageQuery {
            date: Some(date.to_string()),
        })
    }

    #[tokio::test]
    async fn national_page_defaults_to_latest() {
        let Html(html) = national_page(State(sample_state()), Query(PageQuery::default()))
            .await
            .unwrap();
        assert!(html.contains("기준일 2025-12-08"));
        assert!(html.contains("<svg"));
    }

    #[tokio::test]
    async fn compact_date_selects_anchor() {
        let Html(html) = capital_page(State(sample_state()), query("20251103")).await.unwrap();
        assert!(html.contains("기준일 2025-11-03"));
        assert!(html.contains("강남구"));
    }

    #[tokio::test]
    async fn unknown_or_garbage_dates_fall_back_to_latest() {
        for raw in ["2025-11-04", "yesterday"] {
            let Html(html) = national_page(State(sample_state()), query(raw)).await.unwrap();
            assert!(html.contains("기준일 2025-12-08"), "{}", raw);
        }
    }

    #[tokio::test]
    async fn group_page_renders_districts() {
        let Html(html) = group_page(
            State(sample_state()),
            Path("서울".to_string()),
            Query(PageQuery::default()),
        )
        .await
        .unwrap();
        assert!(html.contains("마포구"));
        assert!(!html.contains("해당 기간의 데이터가 없습니다"));
    }

    #[tokio::test]
    async fn unavailable_store_still_renders_page() {
        let Html(html) = national_page(State(unavailable_state()), Query(PageQuery::default()))
            .await
            .unwrap();
        assert!(html.contains("데이터를 불러올 수 없습니다"));
    }
}
