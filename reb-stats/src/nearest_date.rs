//! Relative time travel: "show me the report closest to N months ago".

use crate::error::{Result, StatsError};
use chrono::{Months, NaiveDate};
use serde::Serialize;

/// Month offsets offered as quick-jump links, with their labels.
pub const QUICK_JUMP_MONTHS: [(u32, &str); 8] = [
    (1, "1M"),
    (3, "3M"),
    (6, "6M"),
    (12, "1Y"),
    (36, "3Y"),
    (60, "5Y"),
    (120, "10Y"),
    (180, "15Y"),
];

/// `reference` minus `months` calendar months.
///
/// The day is clamped to the end of the target month, so 2025-05-31 minus
/// three months is 2025-02-28.
pub fn months_before(reference: NaiveDate, months: u32) -> Result<NaiveDate> {
    reference
        .checked_sub_months(Months::new(months))
        .ok_or_else(|| {
            StatsError::InvalidArgument(format!(
                "{} months before {} is out of range",
                months, reference
            ))
        })
}

/// The entry of `available` closest to `reference` minus `months_back`
/// months.
///
/// Ties go to the first entry encountered; with a newest-first catalog that
/// is the more recent date. An empty catalog is an `InvalidArgument`.
pub fn nearest(available: &[NaiveDate], reference: NaiveDate, months_back: u32) -> Result<NaiveDate> {
    if available.is_empty() {
        return Err(StatsError::InvalidArgument(
            "cannot resolve a date against an empty catalog".to_string(),
        ));
    }
    let target = months_before(reference, months_back)?;

    let mut best = available[0];
    let mut best_distance = (best - target).num_days().abs();
    for candidate in &available[1..] {
        let distance = (*candidate - target).num_days().abs();
        if distance < best_distance {
            best = *candidate;
            best_distance = distance;
        }
    }
    Ok(best)
}

/// A resolved quick-jump target.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct QuickJump {
    pub months: u32,
    pub label: String,
    pub date: NaiveDate,
}

/// Resolve every quick-jump offset against `available`.
///
/// Offsets that fall outside the calendar are skipped; an empty catalog
/// yields no jumps.
pub fn quick_jumps(available: &[NaiveDate], reference: NaiveDate) -> Vec<QuickJump> {
    QUICK_JUMP_MONTHS
        .iter()
        .filter_map(|(months, label)| {
            nearest(available, reference, *months)
                .ok()
                .map(|date| QuickJump {
                    months: *months,
                    label: label.to_string(),
                    date,
                })
        })
        .collect()
}
