use super::Edge;
use crate::model::{
    request::RoutingContext,
    state::{StateEditor, StateRef, TraverseMode},
};

/// parks (forward) or, arrive-by, picks up again the traveler's own vehicle.
pub(super) fn traverse(edge: &Edge, s0: &StateRef, ctx: &RoutingContext) -> Option<StateRef> {
    let data = s0.data();
    if !data.park_and_ride || data.on_board() {
        return None;
    }
    let parking = ctx.graph.vertex(edge.from).ok()?.parking()?;
    let request = &ctx.request;
    let options = &request.parking;
    let vehicle = request.street_mode.vehicle_mode();
    if !parking.matches_tags(&options.required_tags, &options.banned_tags)
        || !parking.has_spaces(vehicle, data.wheelchair, options.use_availability)
    {
        return None;
    }

    let (parked, mode) = match (s0.arrive_by(), data.vehicle_parked) {
        (false, false) if data.current_mode == vehicle => (true, TraverseMode::Walk),
        (true, true) if data.current_mode == TraverseMode::Walk => (false, vehicle),
        _ => return None,
    };
    let mut editor = StateEditor::new(s0, edge.id, edge.to);
    editor
        .set_vehicle_parked(parked, mode)
        .increment_time_seconds(options.park_time)
        .increment_weight(options.park_cost);
    editor.finish()
}
