use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct WheelchairOptions {
    pub enabled: bool,
    /// inaccessible streets and stops are forbidden instead of penalized
    pub strict: bool,
    /// steepest grade (rise over run) considered accessible
    pub max_slope: f64,
    pub inaccessible_street_reluctance: f64,
    /// extra reluctance per percentage point of grade above `max_slope`
    pub slope_exceeded_reluctance: f64,
    /// cost of boarding a trip or using a stop without accessibility information
    pub unknown_accessibility_cost: f64,
}

impl Default for WheelchairOptions {
    fn default() -> Self {
        WheelchairOptions {
            enabled: false,
            strict: false,
            max_slope: 0.0833,
            inaccessible_street_reluctance: 25.0,
            slope_exceeded_reluctance: 1.0,
            unknown_accessibility_cost: 600.0,
        }
    }
}
