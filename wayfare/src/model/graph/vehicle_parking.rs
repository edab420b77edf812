use crate::model::state::TraverseMode;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// live space counts, when the operator publishes them
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ParkingAvailability {
    pub bicycle_spaces: u32,
    pub car_spaces: u32,
    pub wheelchair_accessible_car_spaces: u32,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct VehicleParking {
    pub id: String,
    pub name: Option<String>,
    pub bicycle_places: bool,
    pub car_places: bool,
    pub wheelchair_accessible_car_places: bool,
    pub availability: Option<ParkingAvailability>,
    #[serde(default)]
    pub tags: HashSet<String>,
}

impl VehicleParking {
    pub fn new(id: &str, bicycle_places: bool, car_places: bool) -> VehicleParking {
        VehicleParking {
            id: id.to_string(),
            name: None,
            bicycle_places,
            car_places,
            wheelchair_accessible_car_places: false,
            availability: None,
            tags: HashSet::new(),
        }
    }

    /// whether a vehicle of `mode` can be left here.
    ///
    /// # Arguments
    ///
    /// * `mode`             - the vehicle being parked
    /// * `wheelchair`       - the traveler needs a wheelchair-accessible car space
    /// * `use_availability` - reject when live data reports no free space
    pub fn has_spaces(&self, mode: TraverseMode, wheelchair: bool, use_availability: bool) -> bool {
        let (has_places, available) = match mode {
            TraverseMode::Bicycle | TraverseMode::Scooter => (
                self.bicycle_places,
                self.availability.map(|a| a.bicycle_spaces),
            ),
            TraverseMode::Car if wheelchair => (
                self.wheelchair_accessible_car_places,
                self.availability.map(|a| a.wheelchair_accessible_car_spaces),
            ),
            TraverseMode::Car => (self.car_places, self.availability.map(|a| a.car_spaces)),
            _ => (false, None),
        };
        if !has_places {
            return false;
        }
        match (use_availability, available) {
            (true, Some(n)) => n > 0,
            _ => true,
        }
    }

    /// all required tags present and no banned tag present
    pub fn matches_tags(&self, required: &HashSet<String>, banned: &HashSet<String>) -> bool {
        required.is_subset(&self.tags) && self.tags.is_disjoint(banned)
    }
}
