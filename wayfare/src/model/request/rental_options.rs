use crate::model::graph::RentalNetworks;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct RentalOptions {
    /// when non-empty, only these networks may be used
    pub allowed_networks: HashSet<String>,
    pub banned_networks: HashSet<String>,
    pub pickup_time: i64,
    pub pickup_cost: f64,
    pub dropoff_time: i64,
    pub dropoff_cost: f64,
    /// reject places whose live inventory reports no vehicles or spaces
    pub use_availability: bool,
    /// a vehicle rented from a station may be kept at the destination
    pub allow_keeping_at_destination: bool,
    pub keeping_at_destination_cost: f64,
}

impl Default for RentalOptions {
    fn default() -> Self {
        RentalOptions {
            allowed_networks: HashSet::new(),
            banned_networks: HashSet::new(),
            pickup_time: 60,
            pickup_cost: 120.0,
            dropoff_time: 30,
            dropoff_cost: 30.0,
            use_availability: false,
            allow_keeping_at_destination: false,
            keeping_at_destination_cost: 0.0,
        }
    }
}

impl RentalOptions {
    /// whether a place in `networks` may be used at all under these options
    pub fn network_allowed(&self, networks: &RentalNetworks) -> bool {
        match networks {
            RentalNetworks::Any => true,
            RentalNetworks::Named(names) => {
                let allowed = self.allowed_networks.is_empty()
                    || names.iter().any(|n| self.allowed_networks.contains(n));
                let banned = names.iter().any(|n| self.banned_networks.contains(n));
                allowed && !banned
            }
        }
    }
}
