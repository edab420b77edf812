use super::RoutingRequest;
use crate::model::graph::{Graph, TurnRestrictionOverlay};
use std::sync::Arc;
use wayfare_timetable::{
    realtime::{TimetableSnapshot, TimetableSnapshotSource},
    service::ServiceDays,
};

/// everything an edge reads while one search runs.
///
/// the timetable snapshot and turn restriction overlay are captured once when
/// the search starts, so a search sees one consistent schedule and one set of
/// closures even while new ones are being published.
#[derive(Clone, Debug)]
pub struct RoutingContext {
    pub request: Arc<RoutingRequest>,
    pub graph: Arc<Graph>,
    pub snapshot: Arc<TimetableSnapshot>,
    pub service_days: ServiceDays,
    pub turn_overlay: Option<Arc<TurnRestrictionOverlay>>,
}

impl RoutingContext {
    /// # Arguments
    ///
    /// * `request`     - options of this search
    /// * `graph`       - the shared graph
    /// * `source`      - where committed realtime snapshots are published
    /// * `search_time` - epoch seconds the search departs (or, arrive-by, arrives)
    pub fn new(
        request: Arc<RoutingRequest>,
        graph: Arc<Graph>,
        source: &TimetableSnapshotSource,
        search_time: i64,
    ) -> RoutingContext {
        let snapshot = if request.ignore_realtime_updates {
            Arc::new(TimetableSnapshot::empty())
        } else {
            source.snapshot()
        };
        let service_days = ServiceDays::around(graph.service_calendar(), search_time);
        log::debug!(
            "routing context at {search_time} using timetable snapshot version {}",
            snapshot.version()
        );
        RoutingContext {
            request,
            graph,
            snapshot,
            service_days,
            turn_overlay: None,
        }
    }

    pub fn with_turn_overlay(mut self, overlay: Arc<TurnRestrictionOverlay>) -> RoutingContext {
        self.turn_overlay = Some(overlay);
        self
    }
}
