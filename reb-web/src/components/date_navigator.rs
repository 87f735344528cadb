//! Report-date selector with quick jumps and previous/next links.

use chrono::NaiveDate;
use dioxus::prelude::*;
use reb_stats::dates::format_date;
use reb_stats::nearest_date::QuickJump;
use reb_stats::scope::RegionScope;

/// Submits the enclosing form when a `data-autosubmit` select changes.
const AUTO_SUBMIT_SCRIPT: &str = r#"document.querySelectorAll('select[data-autosubmit]').forEach(function (el) {
  el.addEventListener('change', function () { el.form.submit(); });
});"#;

#[derive(Props, Clone, PartialEq)]
pub struct DateNavigatorProps {
    pub scope: RegionScope,
    /// Report dates, newest first
    pub dates: Vec<NaiveDate>,
    #[props(!optional)]
    pub anchor: Option<NaiveDate>,
    #[props(default = Vec::new())]
    pub quick_jumps: Vec<QuickJump>,
}

fn href(scope: &RegionScope, date: &NaiveDate) -> String {
    format!("{}?date={}", scope.path(), format_date(date))
}

/// The neighbours of `anchor` in a newest-first catalog: (older, newer).
pub(crate) fn neighbours(
    dates: &[NaiveDate],
    anchor: NaiveDate,
) -> (Option<NaiveDate>, Option<NaiveDate>) {
    match dates.iter().position(|d| *d == anchor) {
        Some(i) => {
            let older = dates.get(i + 1).copied();
            let newer = i.checked_sub(1).and_then(|j| dates.get(j).copied());
            (older, newer)
        }
        None => (None, None),
    }
}

/// Date selection form for the current scope.
#[component]
pub fn DateNavigator(props: DateNavigatorProps) -> Element {
    let Some(anchor) = props.anchor else {
        return rsx! {};
    };
    let (older, newer) = neighbours(&props.dates, anchor);
    let action = props.scope.path();

    rsx! {
        div {
            style: "margin: 8px 0; display: flex; flex-wrap: wrap; gap: 12px; align-items: center;",
            form {
                method: "get",
                action: "{action}",
                label {
                    style: "font-weight: bold;",
                    "기준일: "
                    select {
                        name: "date",
                        "data-autosubmit": "true",
                        for date in props.dates.iter() {
                            option {
                                key: "{date}",
                                value: "{format_date(date)}",
                                selected: *date == anchor,
                                "{format_date(date)}"
                            }
                        }
                    }
                }
                noscript {
                    button { r#type: "submit", "이동" }
                }
            }
            span {
                style: "display: flex; gap: 8px; font-size: 13px;",
                if let Some(date) = older {
                    a { href: href(&props.scope, &date), "◀ 이전 주" }
                }
                if let Some(date) = newer {
                    a { href: href(&props.scope, &date), "다음 주 ▶" }
                }
                if props.dates.first() != Some(&anchor) {
                    a { href: "{action}", "최신" }
                }
            }
            if !props.quick_jumps.is_empty() {
                span {
                    style: "display: flex; gap: 6px; font-size: 13px;",
                    for jump in props.quick_jumps.iter() {
                        a {
                            key: "{jump.months}",
                            href: href(&props.scope, &jump.date),
                            title: "{format_date(&jump.date)}",
                            "{jump.label}"
                        }
                    }
                }
            }
            script { dangerous_inner_html: AUTO_SUBMIT_SCRIPT }
        }
    }
}
