use super::{
    CarPickupState, StateData, StateRef, TransitLegEnd, TraversalState, TraverseMode, TripBinding,
    VehicleRentalState,
};
use crate::model::graph::{EdgeId, RentalFormFactor, RentalNetworks, VertexId};
use std::sync::Arc;
use wayfare_timetable::pattern::PatternId;

/// builds the state reached by traversing one edge from a parent state.
///
/// an editor is bound to exactly one (parent state, edge) pair. mutators
/// accumulate changes on a private child; [`StateEditor::finish`] consumes the
/// editor and returns the immutable child, so an editor can never be finished
/// twice. an edge that produces two outcomes calls [`StateEditor::fork`] and
/// finishes both editors.
///
/// time moves forward in a depart-after search and backward in an arrive-by
/// search. increments are always given as positive durations and applied in
/// the search direction. a negative or NaN increment marks the editor
/// defective and `finish` returns `None`.
#[derive(Clone, Debug)]
pub struct StateEditor {
    child: TraversalState,
    edge: EdgeId,
    defective: bool,
}

impl StateEditor {
    /// starts editing the state reached from `parent` over `edge`, which
    /// arrives at `vertex` in search order.
    pub fn new(parent: &StateRef, edge: EdgeId, vertex: VertexId) -> StateEditor {
        let mut child = TraversalState::clone(&**parent);
        child.vertex = vertex;
        child.back_edge = Some(edge);
        child.back_state = Some(parent.clone());
        child.back_mode = Some(parent.data.current_mode);
        StateEditor {
            child,
            edge,
            defective: false,
        }
    }

    /// a copy of this editor for an alternative outcome of the same edge.
    pub fn fork(&self) -> StateEditor {
        self.clone()
    }

    pub fn finish(self) -> Option<StateRef> {
        if self.defective {
            None
        } else {
            Some(Arc::new(self.child))
        }
    }

    pub fn arrive_by(&self) -> bool {
        self.child.data.arrive_by
    }

    pub fn time(&self) -> i64 {
        self.child.time
    }

    pub fn weight(&self) -> f64 {
        self.child.weight
    }

    pub fn data(&self) -> &StateData {
        &self.child.data
    }

    pub fn increment_weight(&mut self, weight: f64) -> &mut Self {
        if weight.is_nan() || weight < 0.0 {
            self.mark_defective(&format!("weight increment {weight}"));
        } else {
            self.child.weight += weight;
        }
        self
    }

    /// moves time `seconds` in the search direction.
    pub fn increment_time_seconds(&mut self, seconds: i64) -> &mut Self {
        if seconds < 0 {
            self.mark_defective(&format!("time increment {seconds}s"));
        } else if self.arrive_by() {
            self.child.time -= seconds;
        } else {
            self.child.time += seconds;
        }
        self
    }

    /// jumps to an absolute epoch second, which may not lie behind the
    /// current time in the search direction.
    pub fn set_time(&mut self, time: i64) -> &mut Self {
        let backwards = if self.arrive_by() {
            time > self.child.time
        } else {
            time < self.child.time
        };
        if backwards {
            self.mark_defective(&format!("time {time} behind {}", self.child.time));
        } else {
            self.child.time = time;
        }
        self
    }

    pub fn increment_walk_distance(&mut self, meters: f64) -> &mut Self {
        if meters.is_nan() || meters < 0.0 {
            self.mark_defective(&format!("walk distance increment {meters}"));
        } else {
            self.child.walk_distance += meters;
        }
        self
    }

    pub fn increment_pre_transit_time(&mut self, seconds: i64) -> &mut Self {
        if seconds < 0 {
            self.mark_defective(&format!("pre-transit time increment {seconds}s"));
        } else {
            self.child.pre_transit_time += seconds;
        }
        self
    }

    pub fn increment_num_boardings(&mut self) -> &mut Self {
        self.child.num_boardings += 1;
        self
    }

    pub fn set_mode(&mut self, mode: TraverseMode) -> &mut Self {
        if self.child.data.current_mode != mode {
            self.data_mut().current_mode = mode;
        }
        self
    }

    /// the mode recorded for the traversed edge, defaults to the parent's mode.
    pub fn set_back_mode(&mut self, mode: TraverseMode) -> &mut Self {
        self.child.back_mode = Some(mode);
        self
    }

    pub fn set_back_walking_bike(&mut self, walking: bool) -> &mut Self {
        if self.child.data.back_walking_bike != walking {
            self.data_mut().back_walking_bike = walking;
        }
        self
    }

    pub fn set_entered_no_thru(&mut self) -> &mut Self {
        if !self.child.data.entered_no_thru {
            self.data_mut().entered_no_thru = true;
        }
        self
    }

    pub fn set_car_pickup_state(&mut self, state: CarPickupState) -> &mut Self {
        if self.child.data.car_pickup_state != Some(state) {
            self.data_mut().car_pickup_state = Some(state);
        }
        self
    }

    pub fn set_vehicle_parked(&mut self, parked: bool, mode: TraverseMode) -> &mut Self {
        let data = self.data_mut();
        data.vehicle_parked = parked;
        data.current_mode = mode;
        self
    }

    /// starts riding a rented vehicle (or, arrive-by, reaches the place it is returned to).
    pub fn begin_renting(
        &mut self,
        rental_state: VehicleRentalState,
        form_factor: RentalFormFactor,
        networks: RentalNetworks,
    ) -> &mut Self {
        let data = self.data_mut();
        data.rental_state = rental_state;
        data.rental_form_factor = Some(form_factor);
        data.rental_networks = Some(networks);
        data.current_mode = form_factor.traverse_mode();
        self
    }

    /// stops riding a rented vehicle and continues on foot.
    pub fn end_renting(&mut self, rental_state: VehicleRentalState) -> &mut Self {
        let data = self.data_mut();
        data.rental_state = rental_state;
        data.rental_form_factor = None;
        data.rental_networks = None;
        data.current_mode = TraverseMode::Walk;
        self
    }

    pub fn bind_trip(&mut self, binding: TripBinding) -> &mut Self {
        self.data_mut().trip_binding = Some(binding);
        self
    }

    pub fn set_transit_mode(&mut self, mode: TraverseMode) -> &mut Self {
        self.set_mode(mode).set_back_mode(mode)
    }

    /// advances the bound trip to another stop of its pattern.
    pub fn move_along_trip(&mut self, stop_index: usize) -> &mut Self {
        if let Some(binding) = self.data_mut().trip_binding.as_mut() {
            binding.stop_index = stop_index;
        }
        self
    }

    /// leaves the bound trip, remembering where for transfer rules and the
    /// no-reboard check.
    pub fn leave_trip(&mut self, pattern: PatternId, leg_end: TransitLegEnd) -> &mut Self {
        let data = self.data_mut();
        data.trip_binding = None;
        data.last_pattern = Some(pattern);
        data.last_leg_end = Some(leg_end);
        data.current_mode = TraverseMode::Walk;
        self
    }

    /// forgets the previous transit leg so the next one starts fresh.
    pub fn reset_transit_leg(&mut self) -> &mut Self {
        if self.child.data.last_pattern.is_some() || self.child.data.last_leg_end.is_some() {
            let data = self.data_mut();
            data.last_pattern = None;
            data.last_leg_end = None;
        }
        self
    }

    fn data_mut(&mut self) -> &mut StateData {
        Arc::make_mut(&mut self.child.data)
    }

    fn mark_defective(&mut self, reason: &str) {
        log::warn!(
            "edge {} produced an invalid state ({reason}), discarding it",
            self.edge
        );
        self.defective = true;
    }
}
