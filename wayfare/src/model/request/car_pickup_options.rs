use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct CarPickupOptions {
    /// seconds spent getting in or out of the car
    pub pickup_time: i64,
    pub pickup_cost: f64,
}

impl Default for CarPickupOptions {
    fn default() -> Self {
        CarPickupOptions {
            pickup_time: 60,
            pickup_cost: 120.0,
        }
    }
}
