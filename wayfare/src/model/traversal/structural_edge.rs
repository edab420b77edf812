use super::Edge;
use crate::model::{
    request::RoutingContext,
    state::{CarPickupState, StateEditor, StateRef, TraverseMode},
};
use wayfare_timetable::pattern::Accessibility;

/// a connector with a token weight so that free edges never form zero-cost cycles.
pub(super) fn traverse_free(edge: &Edge, s0: &StateRef) -> Option<StateRef> {
    let (_, target) = edge.search_endpoints(s0.arrive_by());
    let mut editor = StateEditor::new(s0, edge.id, target);
    editor.increment_weight(1.0);
    editor.finish()
}

/// splices two legs; transfer rules and the no-reboard check start over.
pub(super) fn traverse_leg_switch(edge: &Edge, s0: &StateRef) -> Option<StateRef> {
    if s0.on_board() {
        return None;
    }
    let (_, target) = edge.search_endpoints(s0.arrive_by());
    let mut editor = StateEditor::new(s0, edge.id, target);
    editor.reset_transit_leg();
    editor.finish()
}

/// enters or leaves a transit stop on foot.
///
/// vehicles (own, rented or a ride) cannot be taken into a station. street
/// travel before the first boarding is capped by the request's pre-transit
/// limit.
pub(super) fn traverse_station_link(
    edge: &Edge,
    s0: &StateRef,
    ctx: &RoutingContext,
) -> Option<StateRef> {
    let data = s0.data();
    if data.on_board()
        || data.current_mode != TraverseMode::Walk
        || data.rental_state.is_renting()
        || data.car_pickup_state == Some(CarPickupState::InCar)
    {
        return None;
    }
    let request = &ctx.request;
    if let Some(limit) = request.max_pre_transit_time {
        if s0.num_boardings() == 0 && s0.pre_transit_time() > limit {
            return None;
        }
    }

    let from = ctx.graph.vertex(edge.from).ok()?;
    let to = ctx.graph.vertex(edge.to).ok()?;
    let (_, accessibility) = from.transit_stop().or_else(|| to.transit_stop())?;
    let wheelchair = &request.wheelchair;
    let mut weight = 0.0;
    if wheelchair.enabled {
        match accessibility {
            Accessibility::Possible => {}
            Accessibility::NotPossible => return None,
            Accessibility::NoInformation if wheelchair.strict => return None,
            Accessibility::NoInformation => weight += wheelchair.unknown_accessibility_cost,
        }
    }

    let (_, target) = edge.search_endpoints(s0.arrive_by());
    let mut editor = StateEditor::new(s0, edge.id, target);
    editor.increment_weight(weight);
    editor.finish()
}
