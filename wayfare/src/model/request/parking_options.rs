use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ParkingOptions {
    pub park_time: i64,
    pub park_cost: f64,
    /// reject facilities whose live data reports no free space
    pub use_availability: bool,
    pub required_tags: HashSet<String>,
    pub banned_tags: HashSet<String>,
}

impl Default for ParkingOptions {
    fn default() -> Self {
        ParkingOptions {
            park_time: 60,
            park_cost: 120.0,
            use_availability: false,
            required_tags: HashSet::new(),
            banned_tags: HashSet::new(),
        }
    }
}
