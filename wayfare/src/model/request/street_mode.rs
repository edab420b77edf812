use crate::model::{graph::RentalFormFactor, state::TraverseMode};
use serde::{Deserialize, Serialize};

/// how the traveler gets around on streets, before and after transit.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum StreetMode {
    #[default]
    Walk,
    Bike,
    Car,
    BikeRental,
    ScooterRental,
    CarRental,
    /// ride an own bicycle and park it, then continue walking
    BikeToPark,
    /// drive an own car and park it, then continue walking
    CarToPark,
    /// get driven part of the way (kiss and ride)
    CarPickup,
}

impl StreetMode {
    pub fn rental_form_factor(&self) -> Option<RentalFormFactor> {
        match self {
            StreetMode::BikeRental => Some(RentalFormFactor::Bicycle),
            StreetMode::ScooterRental => Some(RentalFormFactor::Scooter),
            StreetMode::CarRental => Some(RentalFormFactor::Car),
            _ => None,
        }
    }

    /// the vehicle this mode moves with on streets, walking if it has none
    pub fn vehicle_mode(&self) -> TraverseMode {
        match self {
            StreetMode::Walk => TraverseMode::Walk,
            StreetMode::Bike | StreetMode::BikeToPark => TraverseMode::Bicycle,
            StreetMode::Car | StreetMode::CarToPark | StreetMode::CarPickup => TraverseMode::Car,
            StreetMode::BikeRental => TraverseMode::Bicycle,
            StreetMode::ScooterRental => TraverseMode::Scooter,
            StreetMode::CarRental => TraverseMode::Car,
        }
    }

    pub fn is_rental(&self) -> bool {
        self.rental_form_factor().is_some()
    }

    pub fn is_park_and_ride(&self) -> bool {
        matches!(self, StreetMode::BikeToPark | StreetMode::CarToPark)
    }
}

impl std::fmt::Display for StreetMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            StreetMode::Walk => "walk",
            StreetMode::Bike => "bike",
            StreetMode::Car => "car",
            StreetMode::BikeRental => "bike_rental",
            StreetMode::ScooterRental => "scooter_rental",
            StreetMode::CarRental => "car_rental",
            StreetMode::BikeToPark => "bike_to_park",
            StreetMode::CarToPark => "car_to_park",
            StreetMode::CarPickup => "car_pickup",
        };
        write!(f, "{s}")
    }
}
