//! Which regions a view covers.

use crate::models::RegionDescriptor;
use serde::Serialize;
use std::fmt;

const GROUP_PREFIX: &str = "group:";

/// Region filter for a single fetch.
///
/// A row matches when its joined region satisfies the filter: an exact
/// view-group name match, or the national / capital membership flag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum RegionScope {
    National,
    Capital,
    Group(String),
}

impl RegionScope {
    /// Parse a `scope` query value: `national`, `capital`, or a group name.
    ///
    /// Empty input means the nationwide view. A `group:` prefix forces a
    /// group, so groups literally named `national` or `capital` stay
    /// reachable as `group:national` / `group:capital`.
    pub fn from_param(value: &str) -> Self {
        let value = value.trim();
        if let Some(group) = value.strip_prefix(GROUP_PREFIX) {
            return RegionScope::Group(group.to_string());
        }
        match value {
            "" | "national" => RegionScope::National,
            "capital" => RegionScope::Capital,
            group => RegionScope::Group(group.to_string()),
        }
    }

    /// Inverse of [`from_param`](Self::from_param). Group names that would
    /// parse as something else keep the `group:` prefix.
    pub fn to_param(&self) -> String {
        match self {
            RegionScope::National => "national".to_string(),
            RegionScope::Capital => "capital".to_string(),
            RegionScope::Group(name) => match name.as_str() {
                "" | "national" | "capital" => format!("{}{}", GROUP_PREFIX, name),
                _ if name.starts_with(GROUP_PREFIX) => format!("{}{}", GROUP_PREFIX, name),
                _ => name.clone(),
            },
        }
    }

    /// Whether a region belongs to this view.
    pub fn matches(&self, region: &RegionDescriptor) -> bool {
        match self {
            RegionScope::National => region.national,
            RegionScope::Capital => region.capital,
            RegionScope::Group(name) => region.view_group_name == *name,
        }
    }

    /// Page title for the scope.
    pub fn title(&self) -> String {
        match self {
            RegionScope::National => "전국".to_string(),
            RegionScope::Capital => "수도권".to_string(),
            RegionScope::Group(name) => name.clone(),
        }
    }

    /// Page path for the scope. Group names are percent-encoded.
    pub fn path(&self) -> String {
        match self {
            RegionScope::National => "/".to_string(),
            RegionScope::Capital => "/capital".to_string(),
            RegionScope::Group(name) => format!("/group/{}", encode_path_segment(name)),
        }
    }
}

impl fmt::Display for RegionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionScope::National => write!(f, "national"),
            RegionScope::Capital => write!(f, "capital"),
            RegionScope::Group(name) => write!(f, "group:{}", name),
        }
    }
}

/// Percent-encode everything outside the RFC 3986 unreserved set.
pub fn encode_path_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
