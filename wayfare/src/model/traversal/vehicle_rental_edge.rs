use super::Edge;
use crate::model::{
    graph::{RentalFormFactor, VehicleRentalPlace},
    request::{RentalOptions, RoutingContext},
    state::{StateData, StateEditor, StateRef, VehicleRentalState},
};

/// picks up or returns a rented vehicle at a station or free-floating vehicle.
///
/// forward: `NotRenting` picks up, a renting state returns the vehicle to a
/// station and becomes `HaveRented`. arrive-by mirrors this: `HaveRented`
/// reaches the station the vehicle was returned to and starts renting, and a
/// renting state reaches the place it was picked up and becomes `NotRenting`.
/// one rental per trip.
pub(super) fn traverse_rental(
    edge: &Edge,
    form_factor: RentalFormFactor,
    s0: &StateRef,
    ctx: &RoutingContext,
) -> Option<StateRef> {
    let request = &ctx.request;
    if request.street_mode.rental_form_factor() != Some(form_factor) || s0.on_board() {
        return None;
    }
    let place = ctx.graph.vertex(edge.from).ok()?.rental_place()?;
    let options = &request.rental;
    if !options.network_allowed(&place.networks) {
        return None;
    }
    let data = s0.data();
    let mut editor = StateEditor::new(s0, edge.id, edge.to);
    match (s0.arrive_by(), data.rental_state) {
        (false, VehicleRentalState::NotRenting) => {
            if !can_pick_up(place, options) {
                return None;
            }
            let rental_state = if place.floating {
                VehicleRentalState::RentingFloating
            } else {
                VehicleRentalState::RentingFromStation
            };
            editor
                .begin_renting(rental_state, form_factor, place.networks.clone())
                .increment_time_seconds(options.pickup_time)
                .increment_weight(options.pickup_cost);
        }
        (false, VehicleRentalState::RentingFromStation | VehicleRentalState::RentingFloating) => {
            if !can_drop_off(place, data, options) {
                return None;
            }
            editor
                .end_renting(VehicleRentalState::HaveRented)
                .increment_time_seconds(options.dropoff_time)
                .increment_weight(options.dropoff_cost);
        }
        (true, VehicleRentalState::HaveRented) => {
            if !can_drop_off(place, data, options) {
                return None;
            }
            editor
                .begin_renting(
                    VehicleRentalState::RentingFromStation,
                    form_factor,
                    place.networks.clone(),
                )
                .increment_time_seconds(options.dropoff_time)
                .increment_weight(options.dropoff_cost);
        }
        (true, VehicleRentalState::RentingFromStation | VehicleRentalState::RentingFloating) => {
            // a vehicle left anywhere must have been a free-floating one
            let floating_only = data.rental_state == VehicleRentalState::RentingFloating;
            if (floating_only && !place.floating)
                || !can_pick_up(place, options)
                || !networks_compatible(place, data)
            {
                return None;
            }
            editor
                .end_renting(VehicleRentalState::NotRenting)
                .increment_time_seconds(options.pickup_time)
                .increment_weight(options.pickup_cost);
        }
        _ => return None,
    }
    editor.finish()
}

/// steps between the street and a rental place.
pub(super) fn traverse_link(edge: &Edge, s0: &StateRef) -> Option<StateRef> {
    if s0.on_board() {
        return None;
    }
    let (_, target) = edge.search_endpoints(s0.arrive_by());
    StateEditor::new(s0, edge.id, target).finish()
}

fn can_pick_up(place: &VehicleRentalPlace, options: &RentalOptions) -> bool {
    !options.use_availability || place.vehicles_available > 0
}

fn can_drop_off(place: &VehicleRentalPlace, data: &StateData, options: &RentalOptions) -> bool {
    !place.floating
        && place.allows_drop_off
        && (!options.use_availability || place.spaces_available > 0)
        && data
            .rental_form_factor
            .map_or(true, |ff| ff == place.form_factor)
        && networks_compatible(place, data)
}

fn networks_compatible(place: &VehicleRentalPlace, data: &StateData) -> bool {
    data.rental_networks
        .as_ref()
        .map_or(true, |networks| networks.is_compatible(&place.networks))
}
