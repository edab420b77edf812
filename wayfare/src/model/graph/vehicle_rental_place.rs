use crate::model::state::TraverseMode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RentalFormFactor {
    Bicycle,
    Scooter,
    Car,
}

impl RentalFormFactor {
    pub fn traverse_mode(&self) -> TraverseMode {
        match self {
            RentalFormFactor::Bicycle => TraverseMode::Bicycle,
            RentalFormFactor::Scooter => TraverseMode::Scooter,
            RentalFormFactor::Car => TraverseMode::Car,
        }
    }
}

/// rental networks a place or a rented vehicle belongs to.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RentalNetworks {
    /// unrestricted, compatible with every network
    Any,
    Named(BTreeSet<String>),
}

impl RentalNetworks {
    pub fn named<I, S>(networks: I) -> RentalNetworks
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RentalNetworks::Named(networks.into_iter().map(Into::into).collect())
    }

    /// a vehicle can be returned to a place if the two share a network or
    /// either side is unrestricted.
    pub fn is_compatible(&self, other: &RentalNetworks) -> bool {
        match (self, other) {
            (RentalNetworks::Any, _) | (_, RentalNetworks::Any) => true,
            (RentalNetworks::Named(a), RentalNetworks::Named(b)) => !a.is_disjoint(b),
        }
    }

    pub fn contains(&self, network: &str) -> bool {
        match self {
            RentalNetworks::Any => true,
            RentalNetworks::Named(n) => n.contains(network),
        }
    }

    pub fn iter_named(&self) -> impl Iterator<Item = &String> {
        match self {
            RentalNetworks::Any => None,
            RentalNetworks::Named(n) => Some(n.iter()),
        }
        .into_iter()
        .flatten()
    }
}

/// a docking station or a single free-floating vehicle.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct VehicleRentalPlace {
    pub id: String,
    pub name: Option<String>,
    pub networks: RentalNetworks,
    pub form_factor: RentalFormFactor,
    /// true for a free-floating vehicle, false for a station
    pub floating: bool,
    pub vehicles_available: u32,
    pub spaces_available: u32,
    pub allows_drop_off: bool,
}

impl VehicleRentalPlace {
    pub fn station(id: &str, networks: RentalNetworks, form_factor: RentalFormFactor) -> VehicleRentalPlace {
        VehicleRentalPlace {
            id: id.to_string(),
            name: None,
            networks,
            form_factor,
            floating: false,
            vehicles_available: 1,
            spaces_available: 1,
            allows_drop_off: true,
        }
    }

    pub fn floating_vehicle(id: &str, networks: RentalNetworks, form_factor: RentalFormFactor) -> VehicleRentalPlace {
        VehicleRentalPlace {
            id: id.to_string(),
            name: None,
            networks,
            form_factor,
            floating: true,
            vehicles_available: 1,
            spaces_available: 0,
            allows_drop_off: false,
        }
    }

    pub fn with_availability(mut self, vehicles: u32, spaces: u32) -> VehicleRentalPlace {
        self.vehicles_available = vehicles;
        self.spaces_available = spaces;
        self
    }
}
