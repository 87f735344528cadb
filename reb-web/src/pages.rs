//! Full-page rendering of a [`DashboardView`].

use crate::components::{ChangeChart, DateNavigator, HeatmapTable, Metric, Notice, PageHeader, ScopeNav};
use dioxus::prelude::*;
use reb_stats::dashboard::{DashboardView, ViewStatus};
use reb_stats::dates::format_date;

#[derive(Props, Clone, PartialEq)]
pub struct DashboardPageProps {
    pub view: DashboardView,
    pub groups: Vec<String>,
}

/// Root component of every dashboard page: the whole document below the
/// doctype.
#[component]
pub fn DashboardPage(props: DashboardPageProps) -> Element {
    let view = &props.view;
    let subtitle = view
        .anchor
        .map(|a| format!("기준일 {} · 최근 {}주", format_date(&a), view.window.len()))
        .unwrap_or_default();
    let regions: Vec<String> = view.stats.region_names().into_iter().map(String::from).collect();
    let title = view.scope.title();

    rsx! {
        html {
            "lang": "ko",
            head {
                meta { "charset": "utf-8" }
                meta {
                    "name": "viewport",
                    "content": "width=device-width, initial-scale=1",
                }
                title { "주간 아파트 가격 동향 - {title}" }
            }
            body {
                main {
                    style: "font-family: sans-serif; max-width: 1200px; margin: 0 auto; padding: 16px;",
                    PageHeader { title: title.clone(), subtitle }
                    ScopeNav { current: view.scope.clone(), groups: props.groups.clone() }
                    DateNavigator {
                        scope: view.scope.clone(),
                        dates: view.dates.clone(),
                        anchor: view.anchor,
                        quick_jumps: view.quick_jumps.clone(),
                    }
                    Notice { status: view.status, scope: view.scope.clone() }
                    if view.status == ViewStatus::Ready {
                        ChangeChart { series: view.stats.chart_series.clone() }
                        HeatmapTable {
                            regions: regions.clone(),
                            rows: view.stats.table_rows.clone(),
                            metric: Metric::Sale,
                        }
                        HeatmapTable {
                            regions: regions.clone(),
                            rows: view.stats.table_rows.clone(),
                            metric: Metric::Jeonse,
                        }
                    }
                }
            }
        }
    }
}

/// Render `view` as a complete HTML document.
pub fn render_dashboard(view: &DashboardView, groups: &[String]) -> String {
    let mut dom = VirtualDom::new_with_props(
        DashboardPage,
        DashboardPageProps {
            view: view.clone(),
            groups: groups.to_vec(),
        },
    );
    dom.rebuild_in_place();
    format!("<!DOCTYPE html>\n{}", dioxus_ssr::render(&dom))
}
