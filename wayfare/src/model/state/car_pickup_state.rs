use serde::{Deserialize, Serialize};

/// leg of a kiss-and-ride or ride-hail trip.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CarPickupState {
    WalkToPickup,
    InCar,
    WalkFromDropOff,
}
