//! Temperature unit preference from the settings sheet.

use serde::{Deserialize, Serialize};

/// Display unit system. Reference data is always stored in °C.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Metric => Self::Imperial,
            Self::Imperial => Self::Metric,
        }
    }

    /// Convert a Celsius reading into this unit system, rounded to whole degrees.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn convert(self, celsius: i32) -> i32 {
        match self {
            Self::Metric => celsius,
            Self::Imperial => (f64::from(celsius).mul_add(9.0 / 5.0, 32.0)).round() as i32,
        }
    }
}

/// Degree label, e.g. `12°` (metric) or `54°` (imperial).
#[must_use]
pub fn format_temperature(celsius: i32, units: UnitSystem) -> String {
    format!("{}°", units.convert(celsius))
}
