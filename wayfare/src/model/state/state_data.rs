use super::{CarPickupState, TraverseMode, VehicleRentalState};
use crate::model::graph::{RentalFormFactor, RentalNetworks};
use std::sync::Arc;
use wayfare_timetable::{
    pattern::{PatternId, StopId, TripId},
    schedule::TripTimes,
};

/// the trip a traveler is riding, fixed when the vehicle is boarded.
///
/// hop and dwell edges read their times from these trip times instead of
/// resolving the timetable again, so a delay seen at boarding applies to the
/// whole ride.
#[derive(Clone, Debug)]
pub struct TripBinding {
    pub pattern: PatternId,
    pub trip_times: Arc<TripTimes>,
    /// epoch second the trip's schedule times are relative to: the service
    /// day's midnight, shifted by the headway offset for frequency-based trips
    pub time_base: i64,
    /// stop index of the vehicle's current position on the pattern
    pub stop_index: usize,
}

impl TripBinding {
    /// vehicle arrival at `stop` of the pattern, epoch seconds
    pub fn arrival(&self, stop: usize) -> i64 {
        self.time_base + self.trip_times.arrival_time(stop) as i64
    }

    /// vehicle departure from `stop` of the pattern, epoch seconds
    pub fn departure(&self, stop: usize) -> i64 {
        self.time_base + self.trip_times.departure_time(stop) as i64
    }
}

impl PartialEq for TripBinding {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
            && self.trip_times.trip_id() == other.trip_times.trip_id()
            && self.time_base == other.time_base
            && self.stop_index == other.stop_index
    }
}

/// where the previous transit leg (in search order) was left.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitLegEnd {
    pub stop: StopId,
    pub trip: TripId,
    /// vehicle arrival (forward) or departure (arrive-by) at `stop`, epoch seconds
    pub time: i64,
}

/// the part of a state that changes rarely; shared between consecutive
/// states until an edge edits it.
#[derive(Clone, Debug, PartialEq)]
pub struct StateData {
    pub arrive_by: bool,
    pub wheelchair: bool,
    pub current_mode: TraverseMode,
    pub rental_state: VehicleRentalState,
    pub rental_form_factor: Option<RentalFormFactor>,
    /// networks of the place the rented vehicle came from (or, arrive-by, will be returned to)
    pub rental_networks: Option<RentalNetworks>,
    /// a vehicle rented from a station may be kept at the destination
    pub may_keep_rented_vehicle: bool,
    pub vehicle_parked: bool,
    /// the search must park its vehicle somewhere along the path
    pub park_and_ride: bool,
    pub car_pickup_state: Option<CarPickupState>,
    pub entered_no_thru: bool,
    pub trip_binding: Option<TripBinding>,
    pub last_pattern: Option<PatternId>,
    pub last_leg_end: Option<TransitLegEnd>,
    pub back_walking_bike: bool,
}

impl StateData {
    pub fn new(arrive_by: bool, wheelchair: bool, mode: TraverseMode) -> StateData {
        StateData {
            arrive_by,
            wheelchair,
            current_mode: mode,
            rental_state: VehicleRentalState::NotRenting,
            rental_form_factor: None,
            rental_networks: None,
            may_keep_rented_vehicle: false,
            vehicle_parked: false,
            park_and_ride: false,
            car_pickup_state: None,
            entered_no_thru: false,
            trip_binding: None,
            last_pattern: None,
            last_leg_end: None,
            back_walking_bike: false,
        }
    }

    pub fn on_board(&self) -> bool {
        self.trip_binding.is_some()
    }
}
