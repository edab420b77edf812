use super::{PatternId, Route, StopPattern, TransitMode};
use crate::schedule::Timetable;
use std::sync::Arc;

/// a route variant: one fixed stop sequence shared by a set of trips.
///
/// the pattern owns its scheduled (base) timetable. realtime overrides live in
/// a [`crate::realtime::TimetableSnapshot`] keyed by [`PatternId`], so there is
/// no pointer from a timetable back to its pattern. rows of the timetable are
/// addressed by stop index within [`StopPattern`].
#[derive(Debug)]
pub struct TripPattern {
    pub id: PatternId,
    pub route: Route,
    pub stop_pattern: StopPattern,
    scheduled_timetable: Arc<Timetable>,
}

impl TripPattern {
    /// builds a pattern from its scheduled timetable. the timetable is finished
    /// here if the caller has not done so already.
    pub fn new(
        id: &str,
        route: Route,
        stop_pattern: StopPattern,
        mut scheduled: Timetable,
    ) -> TripPattern {
        if !scheduled.is_finished() {
            scheduled.finish();
        }
        TripPattern {
            id: PatternId::new(id),
            route,
            stop_pattern,
            scheduled_timetable: Arc::new(scheduled),
        }
    }

    pub fn scheduled_timetable(&self) -> &Arc<Timetable> {
        &self.scheduled_timetable
    }

    pub fn mode(&self) -> TransitMode {
        self.route.mode
    }

    pub fn n_stops(&self) -> usize {
        self.stop_pattern.size()
    }

    pub fn n_hops(&self) -> usize {
        self.n_stops().saturating_sub(1)
    }
}
