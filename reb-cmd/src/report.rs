//! Blocking execution of the read-only subcommands, rendered as text.

use crate::store::build_dashboard;
use crate::{Command, StoreOptions};
use anyhow::{anyhow, Context};
use chrono::NaiveDate;
use reb_stats::dashboard::{DashboardView, ViewStatus};
use reb_stats::dates::{format_date, parse_date_lenient, short_label};
use reb_stats::scope::RegionScope;
use std::fmt::Write;

fn parse_arg(raw: Option<&str>) -> anyhow::Result<Option<NaiveDate>> {
    raw.map(|s| parse_date_lenient(s).ok_or_else(|| anyhow!("invalid date: {}", s)))
        .transpose()
}

/// Run a non-serving command and return what it prints.
pub fn execute(options: &StoreOptions, command: Command) -> anyhow::Result<String> {
    match command {
        Command::Dates { limit } => {
            let dashboard = build_dashboard(options, limit)?;
            let dates = dashboard
                .catalog()
                .try_list_dates()
                .context("listing report dates")?;
            Ok(dates.iter().map(|d| format!("{}\n", format_date(d))).collect())
        }
        Command::Nearest { months, date } => {
            let reference = parse_arg(date.as_deref())?;
            let dashboard = build_dashboard(options, None)?;
            let found = dashboard
                .nearest(reference, months)
                .context("resolving nearest report date")?;
            Ok(format!("{}\n", format_date(&found)))
        }
        Command::View { scope, date, json } => {
            let requested = parse_arg(date.as_deref())?;
            let dashboard = build_dashboard(options, None)?;
            let view = dashboard.view(requested, RegionScope::from_param(&scope));
            if json {
                Ok(format!("{}\n", serde_json::to_string_pretty(&view)?))
            } else {
                Ok(format_view(&view))
            }
        }
        Command::Groups => {
            let dashboard = build_dashboard(options, None)?;
            Ok(dashboard
                .view_groups()
                .iter()
                .map(|g| format!("{}\n", g))
                .collect())
        }
        Command::Serve { .. } => Err(anyhow!("serve is not a report command")),
    }
}

fn signed(value: f64) -> String {
    format!("{:+.2}", value)
}

/// Plain-text rendering of a view: the four-week summary, then a weekly
/// table per metric with weeks oldest first.
pub fn format_view(view: &DashboardView) -> String {
    let mut out = String::new();
    let _ = match view.anchor {
        Some(anchor) => writeln!(
            out,
            "{} · {} ({} weeks)",
            view.scope.title(),
            format_date(&anchor),
            view.window.len()
        ),
        None => writeln!(out, "{}", view.scope.title()),
    };

    match view.status {
        ViewStatus::Ready => {}
        ViewStatus::NoData => {
            let _ = writeln!(out, "no data for this period");
            return out;
        }
        ViewStatus::StoreUnavailable => {
            let _ = writeln!(out, "data unavailable");
            return out;
        }
    }

    let width = view
        .stats
        .chart_series
        .iter()
        .map(|p| p.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(6);

    let _ = writeln!(out, "\n{:<width$}  {:>7}  {:>7}", "4-week", "sale", "jeonse", width = width);
    for point in &view.stats.chart_series {
        let _ = writeln!(
            out,
            "{:<width$}  {:>7}  {:>7}",
            point.name,
            signed(point.sale),
            signed(point.jeonse),
            width = width
        );
    }

    for (label, jeonse) in [("sale", false), ("jeonse", true)] {
        let _ = write!(out, "\n{:<width$}", label, width = width);
        for row in &view.stats.table_rows {
            let _ = write!(out, "  {:>6}", short_label(&row.date));
        }
        let _ = writeln!(out);
        for (i, point) in view.stats.chart_series.iter().enumerate() {
            let _ = write!(out, "{:<width$}", point.name, width = width);
            for row in &view.stats.table_rows {
                let value = row
                    .cells
                    .get(i)
                    .map(|c| if jeonse { c.jeonse } else { c.sale })
                    .unwrap_or(0.0);
                let _ = write!(out, "  {:>6}", signed(value));
            }
            let _ = writeln!(out);
        }
    }
    out
}
