//! Heatmap cell colouring for signed weekly changes.
//!
//! Rising prices read warm (red) and falling prices cool (blue). Background
//! intensity grows with the size of the move in four bands; each band
//! includes its lower bound.

use serde::Serialize;

/// Background intensity band by absolute change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    /// `|v| < 0.1`
    Lightest,
    /// `0.1 <= |v| < 0.3`
    Light,
    /// `0.3 <= |v| < 0.5`
    Medium,
    /// `|v| >= 0.5`
    Strongest,
}

impl Intensity {
    pub fn from_magnitude(magnitude: f64) -> Self {
        if magnitude >= 0.5 {
            Intensity::Strongest
        } else if magnitude >= 0.3 {
            Intensity::Medium
        } else if magnitude >= 0.1 {
            Intensity::Light
        } else {
            Intensity::Lightest
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundTier {
    Neutral,
    Warm(Intensity),
    Cool(Intensity),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextTier {
    Muted,
    Positive,
    Negative,
}

/// Visual treatment of one heatmap cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CellStyle {
    pub background: BackgroundTier,
    pub text: TextTier,
}

/// Pick the style for a signed percentage change.
///
/// Total over `f64`: zero of either sign and NaN are neutral.
pub fn bucket(value: f64) -> CellStyle {
    if value == 0.0 || value.is_nan() {
        return CellStyle {
            background: BackgroundTier::Neutral,
            text: TextTier::Muted,
        };
    }
    let intensity = Intensity::from_magnitude(value.abs());
    if value > 0.0 {
        CellStyle {
            background: BackgroundTier::Warm(intensity),
            text: TextTier::Positive,
        }
    } else {
        CellStyle {
            background: BackgroundTier::Cool(intensity),
            text: TextTier::Negative,
        }
    }
}

impl BackgroundTier {
    pub fn css_color(&self) -> &'static str {
        match self {
            BackgroundTier::Neutral => "#F9FAFB",
            BackgroundTier::Warm(Intensity::Lightest) => "#FEF2F2",
            BackgroundTier::Warm(Intensity::Light) => "#FECACA",
            BackgroundTier::Warm(Intensity::Medium) => "#F87171",
            BackgroundTier::Warm(Intensity::Strongest) => "#DC2626",
            BackgroundTier::Cool(Intensity::Lightest) => "#EFF6FF",
            BackgroundTier::Cool(Intensity::Light) => "#BFDBFE",
            BackgroundTier::Cool(Intensity::Medium) => "#60A5FA",
            BackgroundTier::Cool(Intensity::Strongest) => "#2563EB",
        }
    }
}

impl TextTier {
    pub fn css_color(&self) -> &'static str {
        match self {
            TextTier::Muted => "#9CA3AF",
            TextTier::Positive => "#991B1B",
            TextTier::Negative => "#1E3A8A",
        }
    }
}

impl CellStyle {
    /// Inline CSS for a table cell.
    pub fn css(&self) -> String {
        format!(
            "background: {}; color: {};",
            self.background.css_color(),
            self.text.css_color()
        )
    }
}
