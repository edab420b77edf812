use super::Edge;
use crate::model::{
    request::RoutingContext,
    state::{StateEditor, StateRef},
};
use wayfare_timetable::pattern::PatternId;

/// stays on board while the bound trip waits at a stop.
pub(super) fn traverse(
    edge: &Edge,
    pattern_id: &PatternId,
    stop_index: usize,
    s0: &StateRef,
    ctx: &RoutingContext,
) -> Option<StateRef> {
    let binding = s0.data().trip_binding.as_ref()?;
    if &binding.pattern != pattern_id || binding.stop_index != stop_index {
        return None;
    }
    let pattern = ctx.graph.pattern(pattern_id)?;
    let arrive_by = s0.arrive_by();
    let time = if arrive_by {
        binding.arrival(stop_index)
    } else {
        binding.departure(stop_index)
    };
    let dwell_time = (time - s0.time()).abs();

    let (_, target) = edge.search_endpoints(arrive_by);
    let mut editor = StateEditor::new(s0, edge.id, target);
    editor
        .set_time(time)
        .increment_weight(dwell_time as f64 * ctx.request.transit_reluctance(pattern.mode()));
    editor.finish()
}
