//! AQI category bands and their display colors.
//!
//! Six ordered bands with inclusive upper bounds at 50, 100, 150, 200 and
//! 300; everything above 300 is Hazardous. Lookup never fails: negative
//! values land in the lowest band.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The six AQI bands, best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AqiCategory {
    Good,
    Moderate,
    UnhealthyForSensitive,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

/// All categories in ascending severity, for legends.
pub const ALL_CATEGORIES: [AqiCategory; 6] = [
    AqiCategory::Good,
    AqiCategory::Moderate,
    AqiCategory::UnhealthyForSensitive,
    AqiCategory::Unhealthy,
    AqiCategory::VeryUnhealthy,
    AqiCategory::Hazardous,
];

/// Inclusive upper bound of each band below Hazardous, scanned in order.
const BAND_UPPER_BOUNDS: [(f64, AqiCategory); 5] = [
    (50.0, AqiCategory::Good),
    (100.0, AqiCategory::Moderate),
    (150.0, AqiCategory::UnhealthyForSensitive),
    (200.0, AqiCategory::Unhealthy),
    (300.0, AqiCategory::VeryUnhealthy),
];

/// Classify a pollution index.
///
/// NaN fails every comparison and therefore falls through to Hazardous.
pub fn category(value: f64) -> AqiCategory {
    for (upper, band) in BAND_UPPER_BOUNDS {
        if value <= upper {
            return band;
        }
    }
    AqiCategory::Hazardous
}

impl AqiCategory {
    /// Human-readable band name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::UnhealthyForSensitive => "Unhealthy for Sensitive Groups",
            Self::Unhealthy => "Unhealthy",
            Self::VeryUnhealthy => "Very Unhealthy",
            Self::Hazardous => "Hazardous",
        }
    }

    /// Hex display color.
    pub fn color(self) -> &'static str {
        match self {
            Self::Good => "#00E400",
            Self::Moderate => "#FFFF00",
            Self::UnhealthyForSensitive => "#FF7E00",
            Self::Unhealthy => "#FF0000",
            Self::VeryUnhealthy => "#99004C",
            Self::Hazardous => "#7E0023",
        }
    }

    /// Health advisory shown next to the legend.
    pub fn description(self) -> &'static str {
        match self {
            Self::Good => {
                "Air quality is satisfactory, and air pollution poses little or no risk."
            }
            Self::Moderate => {
                "Air quality is acceptable. However, there may be a risk for some people, \
                 particularly those who are unusually sensitive to air pollution."
            }
            Self::UnhealthyForSensitive => {
                "Members of sensitive groups may experience health effects. \
                 The general public is less likely to be affected."
            }
            Self::Unhealthy => {
                "Some members of the general public may experience health effects; \
                 members of sensitive groups may experience more serious health effects."
            }
            Self::VeryUnhealthy => {
                "Health alert: The risk of health effects is increased for everyone."
            }
            Self::Hazardous => {
                "Health warning of emergency conditions: everyone is more likely to be affected."
            }
        }
    }

    /// Lowest index value (inclusive) of this band, `None` for Good.
    pub fn lower_bound(self) -> Option<f64> {
        match self {
            Self::Good => None,
            Self::Moderate => Some(50.0),
            Self::UnhealthyForSensitive => Some(100.0),
            Self::Unhealthy => Some(150.0),
            Self::VeryUnhealthy => Some(200.0),
            Self::Hazardous => Some(300.0),
        }
    }

    pub fn info(self) -> CategoryInfo {
        CategoryInfo {
            color: self.color().to_string(),
            label: self.label().to_string(),
        }
    }
}

impl fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Serializable result of a category lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub color: String,
    pub label: String,
}

impl From<AqiCategory> for CategoryInfo {
    fn from(category: AqiCategory) -> Self {
        category.info()
    }
}
