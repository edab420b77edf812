use super::Edge;
use crate::model::{
    request::RoutingContext,
    state::{StateEditor, StateRef},
};
use wayfare_timetable::pattern::PatternId;

/// rides from one stop to the next with the trip bound at boarding.
pub(super) fn traverse(
    edge: &Edge,
    pattern_id: &PatternId,
    hop_index: usize,
    s0: &StateRef,
    ctx: &RoutingContext,
) -> Option<StateRef> {
    let binding = s0.data().trip_binding.as_ref()?;
    let arrive_by = s0.arrive_by();
    let (from_stop, to_stop) = if arrive_by {
        (hop_index + 1, hop_index)
    } else {
        (hop_index, hop_index + 1)
    };
    if &binding.pattern != pattern_id || binding.stop_index != from_stop {
        return None;
    }
    let pattern = ctx.graph.pattern(pattern_id)?;
    let request = &ctx.request;
    if pattern
        .stop_pattern
        .stop(to_stop)
        .is_some_and(|stop| request.banned_stops_hard.contains(stop))
    {
        return None;
    }
    let time = if arrive_by {
        binding.departure(to_stop)
    } else {
        binding.arrival(to_stop)
    };
    let running_time = (time - s0.time()).abs();

    let (_, target) = edge.search_endpoints(arrive_by);
    let mut editor = StateEditor::new(s0, edge.id, target);
    editor
        .set_time(time)
        .increment_weight(running_time as f64 * request.transit_reluctance(pattern.mode()))
        .move_along_trip(to_stop);
    editor.finish()
}
