//! Empty-state and store-unavailable notices.

use dioxus::prelude::*;
use reb_stats::dashboard::ViewStatus;
use reb_stats::scope::RegionScope;

#[derive(Props, Clone, PartialEq)]
pub struct NoticeProps {
    pub status: ViewStatus,
    pub scope: RegionScope,
}

/// Text for a non-ready view. Group views name the group, since an empty
/// group usually means the name is missing from the region mapping.
pub fn notice_message(status: ViewStatus, scope: &RegionScope) -> Option<String> {
    match (status, scope) {
        (ViewStatus::Ready, _) => None,
        (ViewStatus::NoData, RegionScope::Group(name)) => Some(format!(
            "{} 그룹의 데이터가 없습니다. region_mapping 테이블에 {} 그룹이 있는지 확인해 주세요.",
            name, name
        )),
        (ViewStatus::NoData, scope) => {
            Some(format!("{}: 해당 기간의 데이터가 없습니다.", scope.title()))
        }
        (ViewStatus::StoreUnavailable, _) => {
            Some("데이터를 불러올 수 없습니다. 잠시 후 다시 시도해 주세요.".to_string())
        }
    }
}

/// Message shown in place of the chart and table. Renders nothing when the
/// view is ready.
#[component]
pub fn Notice(props: NoticeProps) -> Element {
    let Some(message) = notice_message(props.status, &props.scope) else {
        return rsx! {};
    };
    let color = match props.status {
        ViewStatus::StoreUnavailable => "#991B1B",
        _ => "#92400E",
    };

    rsx! {
        div {
            class: "notice",
            style: "padding: 12px; margin: 12px 0; border: 1px solid {color}; color: {color}; border-radius: 4px;",
            "{message}"
        }
    }
}
