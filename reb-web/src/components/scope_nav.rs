//! Links between the national, capital and view-group pages.

use dioxus::prelude::*;
use reb_stats::scope::RegionScope;

#[derive(Props, Clone, PartialEq)]
pub struct ScopeNavProps {
    pub current: RegionScope,
    /// View-group names, in display order
    pub groups: Vec<String>,
}

fn link_style(active: bool) -> &'static str {
    if active {
        "padding: 4px 10px; border-radius: 4px; background: #1F2937; color: #fff; text-decoration: none;"
    } else {
        "padding: 4px 10px; border-radius: 4px; background: #F3F4F6; color: #111; text-decoration: none;"
    }
}

/// Scope navigation bar. The national and capital scopes come first; a
/// group named like the national scope is folded into it.
#[component]
pub fn ScopeNav(props: ScopeNavProps) -> Element {
    let national = RegionScope::National.title();
    let mut scopes = vec![RegionScope::National, RegionScope::Capital];
    scopes.extend(
        props
            .groups
            .iter()
            .filter(|g| **g != national)
            .cloned()
            .map(RegionScope::Group),
    );

    rsx! {
        nav {
            style: "display: flex; flex-wrap: wrap; gap: 6px; margin: 8px 0;",
            for scope in scopes {
                a {
                    key: "{scope}",
                    href: "{scope.path()}",
                    style: link_style(scope == props.current),
                    "{scope.title()}"
                }
            }
        }
    }
}
