use super::{CarPickupState, StateData, TraverseMode, VehicleRentalState};
use crate::model::{
    graph::{EdgeId, RentalNetworks, VertexId},
    request::{RoutingRequest, StreetMode},
};
use std::sync::Arc;

pub type StateRef = Arc<TraversalState>;

/// one point on a candidate path.
///
/// states are immutable once built by a [`super::StateEditor`]. each state
/// points at the state it was derived from, so a finished state carries its
/// whole path as a back-chain that never contains cycles.
#[derive(Clone, Debug)]
pub struct TraversalState {
    pub(crate) vertex: VertexId,
    pub(crate) back_edge: Option<EdgeId>,
    pub(crate) back_state: Option<StateRef>,
    pub(crate) back_mode: Option<TraverseMode>,
    pub(crate) time: i64,
    pub(crate) start_time: i64,
    pub(crate) weight: f64,
    pub(crate) walk_distance: f64,
    pub(crate) pre_transit_time: i64,
    pub(crate) num_boardings: u32,
    pub(crate) data: Arc<StateData>,
}

impl TraversalState {
    /// builds the states a search starts from at `vertex` and epoch second `time`.
    ///
    /// modes that change vehicle during the trip may start in more than one
    /// sub-state. an arrive-by search starts from the destination, so its
    /// sub-states are the ones a forward search would end in.
    pub fn initial_states(request: &RoutingRequest, vertex: VertexId, time: i64) -> Vec<StateRef> {
        let arrive_by = request.arrive_by;
        let wheelchair = request.wheelchair.enabled;
        let base = |mode: TraverseMode| {
            let mut data = StateData::new(arrive_by, wheelchair, mode);
            data.may_keep_rented_vehicle = request.rental.allow_keeping_at_destination;
            data
        };

        let data = match request.street_mode {
            StreetMode::Walk => vec![base(TraverseMode::Walk)],
            StreetMode::Bike => vec![base(TraverseMode::Bicycle)],
            StreetMode::Car => vec![base(TraverseMode::Car)],
            StreetMode::BikeRental | StreetMode::ScooterRental | StreetMode::CarRental => {
                let mut walking = base(TraverseMode::Walk);
                if !arrive_by {
                    vec![walking]
                } else {
                    walking.rental_state = VehicleRentalState::HaveRented;
                    let mut states = vec![walking];
                    if let Some(form_factor) = request.street_mode.rental_form_factor() {
                        let renting = |rental_state| {
                            let mut data = base(form_factor.traverse_mode());
                            data.rental_state = rental_state;
                            data.rental_form_factor = Some(form_factor);
                            data.rental_networks = Some(RentalNetworks::Any);
                            data
                        };
                        states.push(renting(VehicleRentalState::RentingFloating));
                        if request.rental.allow_keeping_at_destination {
                            states.push(renting(VehicleRentalState::RentingFromStation));
                        }
                    }
                    states
                }
            }
            StreetMode::BikeToPark | StreetMode::CarToPark => {
                let mut data = if arrive_by {
                    let mut parked = base(TraverseMode::Walk);
                    parked.vehicle_parked = true;
                    parked
                } else {
                    base(request.street_mode.vehicle_mode())
                };
                data.park_and_ride = true;
                vec![data]
            }
            StreetMode::CarPickup => {
                let (walking, in_car) = if arrive_by {
                    (CarPickupState::WalkFromDropOff, CarPickupState::InCar)
                } else {
                    (CarPickupState::WalkToPickup, CarPickupState::InCar)
                };
                let mut walk = base(TraverseMode::Walk);
                walk.car_pickup_state = Some(walking);
                let mut car = base(TraverseMode::Car);
                car.car_pickup_state = Some(in_car);
                vec![walk, car]
            }
        };

        data.into_iter()
            .map(|data| {
                Arc::new(TraversalState {
                    vertex,
                    back_edge: None,
                    back_state: None,
                    back_mode: None,
                    time,
                    start_time: time,
                    weight: 0.0,
                    walk_distance: 0.0,
                    pre_transit_time: 0,
                    num_boardings: 0,
                    data: Arc::new(data),
                })
            })
            .collect()
    }

    pub fn vertex(&self) -> VertexId {
        self.vertex
    }

    pub fn back_edge(&self) -> Option<EdgeId> {
        self.back_edge
    }

    pub fn back_state(&self) -> Option<&StateRef> {
        self.back_state.as_ref()
    }

    pub fn back_mode(&self) -> Option<TraverseMode> {
        self.back_mode
    }

    /// epoch seconds
    pub fn time(&self) -> i64 {
        self.time
    }

    pub fn start_time(&self) -> i64 {
        self.start_time
    }

    /// seconds since the search started, always positive in both directions
    pub fn elapsed_seconds(&self) -> i64 {
        (self.time - self.start_time).abs()
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn walk_distance(&self) -> f64 {
        self.walk_distance
    }

    pub fn pre_transit_time(&self) -> i64 {
        self.pre_transit_time
    }

    pub fn num_boardings(&self) -> u32 {
        self.num_boardings
    }

    pub fn data(&self) -> &StateData {
        &self.data
    }

    pub fn arrive_by(&self) -> bool {
        self.data.arrive_by
    }

    pub fn current_mode(&self) -> TraverseMode {
        self.data.current_mode
    }

    pub fn rental_state(&self) -> VehicleRentalState {
        self.data.rental_state
    }

    pub fn is_renting(&self) -> bool {
        self.data.rental_state.is_renting()
    }

    pub fn vehicle_parked(&self) -> bool {
        self.data.vehicle_parked
    }

    pub fn car_pickup_state(&self) -> Option<CarPickupState> {
        self.data.car_pickup_state
    }

    pub fn entered_no_thru(&self) -> bool {
        self.data.entered_no_thru
    }

    pub fn on_board(&self) -> bool {
        self.data.on_board()
    }

    /// whether a path may end in this state.
    ///
    /// a traveler cannot end a trip on board a vehicle, holding a rented
    /// vehicle that must be returned to a station, or with a vehicle still
    /// to be parked. arrive-by searches check the mirrored conditions at the
    /// origin.
    pub fn is_final(&self) -> bool {
        let data = &self.data;
        if data.on_board() {
            return false;
        }
        if data.arrive_by {
            !data.rental_state.is_renting()
                && !data.vehicle_parked
                && data.car_pickup_state != Some(CarPickupState::WalkFromDropOff)
        } else {
            (data.rental_state != VehicleRentalState::RentingFromStation
                || data.may_keep_rented_vehicle)
                && (!data.park_and_ride || data.vehicle_parked)
                && data.car_pickup_state != Some(CarPickupState::WalkToPickup)
        }
    }

    /// states at the same vertex are interchangeable for dominance only if
    /// their remaining options are the same.
    pub fn is_comparable(&self, other: &TraversalState) -> bool {
        let (a, b) = (&self.data, &other.data);
        self.vertex == other.vertex
            && a.current_mode == b.current_mode
            && a.rental_state == b.rental_state
            && a.vehicle_parked == b.vehicle_parked
            && a.car_pickup_state == b.car_pickup_state
            && a.entered_no_thru == b.entered_no_thru
            && a.trip_binding == b.trip_binding
            && a.back_walking_bike == b.back_walking_bike
    }

    /// walks the back-chain from this state to the initial state.
    pub fn path(&self) -> StatePath<'_> {
        StatePath { next: Some(self) }
    }
}

impl Drop for TraversalState {
    fn drop(&mut self) {
        // unlink the chain iteratively so long paths do not recurse on drop
        let mut next = self.back_state.take();
        while let Some(state) = next {
            next = match Arc::try_unwrap(state) {
                Ok(mut owned) => owned.back_state.take(),
                Err(_) => None,
            };
        }
    }
}

/// iterator over a state and its predecessors, most recent first.
pub struct StatePath<'a> {
    next: Option<&'a TraversalState>,
}

impl<'a> Iterator for StatePath<'a> {
    type Item = &'a TraversalState;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.back_state.as_deref();
        Some(current)
    }
}
