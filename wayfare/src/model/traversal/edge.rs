use super::{
    pattern_dwell, pattern_hop, street_traversal, structural_edge, transit_board_alight,
    vehicle_parking_edge, vehicle_rental_edge, StreetEdge,
};
use crate::model::{
    graph::{EdgeId, RentalFormFactor, Vertex, VertexId, VertexKind},
    request::RoutingContext,
    state::{StateRef, Traversed},
};
use wayfare_timetable::pattern::PatternId;

/// what an edge models; each kind has its own traversal rule.
#[derive(Clone, Debug)]
pub enum EdgeKind {
    Street(StreetEdge),
    /// between a stop and a pattern's departure (boarding) or arrival (alighting) vertex
    TransitBoardAlight {
        pattern: PatternId,
        stop_index: usize,
        boarding: bool,
    },
    /// ride from stop `hop_index` to the next stop of the pattern
    PatternHop {
        pattern: PatternId,
        hop_index: usize,
    },
    /// stay on board while the vehicle waits at stop `stop_index`
    PatternDwell {
        pattern: PatternId,
        stop_index: usize,
    },
    Free,
    /// splices two independent legs, forgetting the previous transit leg
    LegSwitch,
    /// between the street network and a transit stop
    StationLink,
    /// picking up or returning a rented vehicle, a loop on the rental place vertex
    VehicleRental { form_factor: RentalFormFactor },
    /// between the street network and a rental place
    VehicleRentalLink,
    /// parking or unparking an own vehicle, a loop on the parking vertex
    VehicleParking,
}

impl EdgeKind {
    /// zero-cost connector edges, two of which may never follow each other
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            EdgeKind::Free | EdgeKind::LegSwitch | EdgeKind::StationLink
        )
    }

    pub fn is_street(&self) -> bool {
        matches!(self, EdgeKind::Street(_))
    }

    pub fn is_transit(&self) -> bool {
        matches!(
            self,
            EdgeKind::TransitBoardAlight { .. }
                | EdgeKind::PatternHop { .. }
                | EdgeKind::PatternDwell { .. }
        )
    }

    /// checks the vertices an edge of this kind may connect.
    pub(crate) fn validate_endpoints(&self, from: &Vertex, to: &Vertex) -> Result<(), String> {
        let pattern_stop = |v: &Vertex| match &v.kind {
            VertexKind::PatternStop {
                pattern, departure, ..
            } => Some((pattern.clone(), *departure)),
            _ => None,
        };
        let is_stop = |v: &Vertex| v.transit_stop().is_some();
        let ok = match self {
            EdgeKind::Street(_) | EdgeKind::Free | EdgeKind::LegSwitch => {
                pattern_stop(from).is_none() && pattern_stop(to).is_none()
            }
            EdgeKind::TransitBoardAlight {
                pattern, boarding, ..
            } => {
                if *boarding {
                    is_stop(from) && pattern_stop(to) == Some((pattern.clone(), true))
                } else {
                    pattern_stop(from) == Some((pattern.clone(), false)) && is_stop(to)
                }
            }
            EdgeKind::PatternHop { pattern, .. } => {
                pattern_stop(from) == Some((pattern.clone(), true))
                    && pattern_stop(to) == Some((pattern.clone(), false))
            }
            EdgeKind::PatternDwell { pattern, .. } => {
                pattern_stop(from) == Some((pattern.clone(), false))
                    && pattern_stop(to) == Some((pattern.clone(), true))
            }
            EdgeKind::StationLink => {
                is_stop(from) != is_stop(to)
                    && pattern_stop(from).is_none()
                    && pattern_stop(to).is_none()
            }
            EdgeKind::VehicleRental { form_factor } => {
                from.id == to.id
                    && from
                        .rental_place()
                        .is_some_and(|p| p.form_factor == *form_factor)
            }
            EdgeKind::VehicleRentalLink => {
                from.rental_place().is_some() != to.rental_place().is_some()
            }
            EdgeKind::VehicleParking => from.id == to.id && from.parking().is_some(),
        };
        if ok {
            Ok(())
        } else {
            Err(format!("endpoints do not fit a {} edge", self.name()))
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EdgeKind::Street(_) => "street",
            EdgeKind::TransitBoardAlight { boarding: true, .. } => "transit board",
            EdgeKind::TransitBoardAlight { boarding: false, .. } => "transit alight",
            EdgeKind::PatternHop { .. } => "pattern hop",
            EdgeKind::PatternDwell { .. } => "pattern dwell",
            EdgeKind::Free => "free",
            EdgeKind::LegSwitch => "leg switch",
            EdgeKind::StationLink => "station link",
            EdgeKind::VehicleRental { .. } => "vehicle rental",
            EdgeKind::VehicleRentalLink => "vehicle rental link",
            EdgeKind::VehicleParking => "vehicle parking",
        }
    }
}

/// a directed arc of the graph.
#[derive(Clone, Debug)]
pub struct Edge {
    pub id: EdgeId,
    pub from: VertexId,
    pub to: VertexId,
    pub kind: EdgeKind,
}

impl Edge {
    pub fn new(id: EdgeId, from: VertexId, to: VertexId, kind: EdgeKind) -> Edge {
        Edge { id, from, to, kind }
    }

    pub fn street(&self) -> Option<&StreetEdge> {
        match &self.kind {
            EdgeKind::Street(street) => Some(street),
            _ => None,
        }
    }

    /// the vertex a search leaves from and the vertex it reaches, in search order
    pub fn search_endpoints(&self, arrive_by: bool) -> (VertexId, VertexId) {
        if arrive_by {
            (self.to, self.from)
        } else {
            (self.from, self.to)
        }
    }

    /// derives the states reached by traversing this edge from `s0`.
    ///
    /// a forward search traverses from `from` to `to`, an arrive-by search
    /// from `to` to `from`. infeasible traversals return [`Traversed::Pruned`].
    pub fn traverse(&self, s0: &StateRef, ctx: &RoutingContext) -> Traversed {
        let (source, _) = self.search_endpoints(s0.arrive_by());
        if s0.vertex() != source {
            log::debug!(
                "state at {} cannot traverse {} edge {} which starts at {source}",
                s0.vertex(),
                self.kind.name(),
                self.id
            );
            return Traversed::Pruned;
        }
        let back_edge = s0.back_edge().and_then(|id| ctx.graph.edge(id).ok());
        if let Some(back) = back_edge {
            if self.kind.is_structural() && back.kind.is_structural() {
                return Traversed::Pruned;
            }
            if self.is_u_turn_after(back) {
                return Traversed::Pruned;
            }
        }

        match &self.kind {
            EdgeKind::Street(street) => {
                street_traversal::traverse(self, street, back_edge, s0, ctx)
            }
            EdgeKind::TransitBoardAlight {
                pattern,
                stop_index,
                boarding,
            } => transit_board_alight::traverse(self, pattern, *stop_index, *boarding, s0, ctx)
                .into(),
            EdgeKind::PatternHop { pattern, hop_index } => {
                pattern_hop::traverse(self, pattern, *hop_index, s0, ctx).into()
            }
            EdgeKind::PatternDwell {
                pattern,
                stop_index,
            } => pattern_dwell::traverse(self, pattern, *stop_index, s0, ctx).into(),
            EdgeKind::Free => structural_edge::traverse_free(self, s0).into(),
            EdgeKind::LegSwitch => structural_edge::traverse_leg_switch(self, s0).into(),
            EdgeKind::StationLink => structural_edge::traverse_station_link(self, s0, ctx).into(),
            EdgeKind::VehicleRental { form_factor } => {
                vehicle_rental_edge::traverse_rental(self, *form_factor, s0, ctx).into()
            }
            EdgeKind::VehicleRentalLink => {
                vehicle_rental_edge::traverse_link(self, s0).into()
            }
            EdgeKind::VehicleParking => vehicle_parking_edge::traverse(self, s0, ctx).into(),
        }
    }

    /// two street edges in a row that retrace the same geometry
    fn is_u_turn_after(&self, back: &Edge) -> bool {
        match (self.street(), back.street()) {
            (Some(this), Some(prev)) => {
                self.from == back.to && self.to == back.from && this.is_reverse_of(prev)
            }
            _ => false,
        }
    }

    /// seconds this edge takes at least, for search heuristics.
    ///
    /// transit edges use the scheduled timetable's minimum running and dwell
    /// times, streets the fastest speed any mode of the request may use.
    pub fn time_lower_bound(&self, ctx: &RoutingContext) -> f64 {
        match &self.kind {
            EdgeKind::Street(street) => {
                let request = &ctx.request;
                let fastest = [
                    request.walk_speed,
                    request.bike_speed,
                    request.scooter_speed,
                    street.car_speed,
                ]
                .into_iter()
                .fold(0.0, f64::max);
                if fastest > 0.0 {
                    street.length_m / fastest
                } else {
                    0.0
                }
            }
            EdgeKind::PatternHop { pattern, hop_index } => ctx
                .graph
                .pattern(pattern)
                .and_then(|p| p.scheduled_timetable().min_running_time(*hop_index))
                .unwrap_or_default()
                .max(0) as f64,
            EdgeKind::PatternDwell {
                pattern,
                stop_index,
            } => ctx
                .graph
                .pattern(pattern)
                .and_then(|p| p.scheduled_timetable().min_dwell_time(*stop_index))
                .unwrap_or_default()
                .max(0) as f64,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod test {
    use crate::model::{
        request::{RoutingRequest, StreetMode},
        traversal::test_fixtures::{StreetGrid, TransitLine},
    };

    #[test]
    fn test_u_turn_is_pruned() {
        let grid = StreetGrid::new();
        let ctx = grid.context(RoutingRequest::default());
        let s0 = grid.start(&ctx, grid.b);
        let s1 = grid.traverse_one(grid.bc, &s0, &ctx);
        assert!(grid.edge(grid.cb).traverse(&s1, &ctx).is_pruned());
        assert!(!grid.edge(grid.cd).traverse(&s1, &ctx).is_pruned());

        let back = grid.context(RoutingRequest {
            arrive_by: true,
            ..Default::default()
        });
        let s0 = grid.start(&back, grid.c);
        let s1 = grid.traverse_one(grid.bc, &s0, &back);
        assert!(grid.edge(grid.cb).traverse(&s1, &back).is_pruned());
        assert!(!grid.edge(grid.ab).traverse(&s1, &back).is_pruned());
    }

    #[test]
    fn test_state_must_be_at_source_vertex() {
        let grid = StreetGrid::new();
        let ctx = grid.context(RoutingRequest::default());
        let s0 = grid.start(&ctx, grid.a);
        assert!(grid.edge(grid.bc).traverse(&s0, &ctx).is_pruned());
        assert!(grid.edge(grid.dc).traverse(&s0, &ctx).is_pruned());
        // arrive-by leaves over the edge's `to` vertex
        let back = grid.context(RoutingRequest {
            arrive_by: true,
            ..Default::default()
        });
        let s0 = grid.start(&back, grid.a);
        assert!(!grid.edge(grid.ba).traverse(&s0, &back).is_pruned());
    }

    #[test]
    fn test_time_lower_bound() {
        let grid = StreetGrid::new();
        let ctx = grid.context(RoutingRequest {
            street_mode: StreetMode::Car,
            ..Default::default()
        });
        let edge = grid.edge(grid.ab);
        let street = edge.street().expect("street edge");
        let bound = edge.time_lower_bound(&ctx);
        assert!((bound - street.length_m / street.car_speed).abs() < 1e-9);

        let line = TransitLine::new();
        let ctx = line.context(RoutingRequest::default(), line.morning());
        assert_eq!(line.edge(line.hop(0)).time_lower_bound(&ctx), 300.0);
        assert_eq!(line.edge(line.dwell(1)).time_lower_bound(&ctx), 60.0);
        assert_eq!(line.edge(line.board(0)).time_lower_bound(&ctx), 0.0);
    }
}
