//! Presentation rounding
//!
//! Per-model maxima and totals are shown with one decimal digit. Rounding is
//! applied to the value scaled by ten, so the rule is pinned here rather than
//! left to whatever the formatter does.
//!
//! Scaling first means a decimal tie is treated as a tie even when its binary
//! value sits just below it: `0.15` is stored as `0.1499999...`, but `0.15 * 10.0`
//! is exactly `1.5`, so both modes give `0.2`. Rounding the exact binary value
//! instead would give `0.1`.

use serde::{Deserialize, Serialize};

/// How a value is rounded to one decimal digit for display
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Ties go away from zero (0.25 -> 0.3, -0.25 -> -0.3)
    #[default]
    HalfAwayFromZero,
    /// Ties go to the even digit (0.25 -> 0.2, 0.75 -> 0.8)
    HalfEven,
}

impl RoundingMode {
    /// Round `value` to one decimal digit
    #[must_use]
    pub fn round_to_tenth(self, value: f64) -> f64 {
        let scaled = value * 10.0;
        let rounded = match self {
            Self::HalfAwayFromZero => scaled.round(),
            Self::HalfEven => scaled.round_ties_even(),
        };
        rounded / 10.0
    }

    /// Round and format with exactly one decimal digit
    #[must_use]
    pub fn format_tenth(self, value: f64) -> String {
        format!("{:.1}", self.round_to_tenth(value))
    }
}
