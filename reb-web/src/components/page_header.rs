//! Page header with the scope title and the anchor date.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct PageHeaderProps {
    /// Scope title (e.g., "수도권")
    pub title: String,
    /// Anchor date line, empty when there is no data
    #[props(default = String::new())]
    pub subtitle: String,
}

/// Header for a dashboard page.
#[component]
pub fn PageHeader(props: PageHeaderProps) -> Element {
    rsx! {
        header {
            style: "margin-bottom: 12px;",
            h1 {
                style: "margin: 0 0 4px 0; font-size: 22px;",
                "주간 아파트 가격 동향 · {props.title}"
            }
            if !props.subtitle.is_empty() {
                p {
                    style: "margin: 0; font-size: 13px; color: #666;",
                    "{props.subtitle}"
                }
            }
        }
    }
}
