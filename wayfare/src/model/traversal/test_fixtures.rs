//! small graphs shared by the traversal unit tests.

use super::{Edge, EdgeKind, StreetEdge};
use crate::model::{
    graph::{
        EdgeId, Graph, PatternEdges, RentalFormFactor, StreetTraversalPermission,
        VehicleParking, VehicleRentalPlace, VertexId, VertexKind,
    },
    request::{RoutingContext, RoutingRequest},
    state::{StateRef, TraversalState},
};
use chrono::NaiveDate;
use geo::{coord, line_string, Coord};
use std::sync::Arc;
use wayfare_timetable::{
    pattern::{Accessibility, Route, StopId, StopPattern, TransitMode, Trip, TripPattern},
    realtime::TimetableSnapshotSource,
    schedule::{Timetable, TripTimes},
    service::ServiceCalendar,
};

/// 2024-01-10 00:00 UTC
pub const MIDNIGHT: i64 = 1_704_844_800;
/// 2024-01-10 08:00 UTC
pub const T0: i64 = MIDNIGHT + 8 * 3600;

fn intersection() -> VertexKind {
    VertexKind::Intersection {
        traffic_light: false,
        free_flowing: false,
    }
}

fn street(from: Coord<f64>, to: Coord<f64>) -> EdgeKind {
    EdgeKind::Street(StreetEdge::new(
        line_string![from, to],
        StreetTraversalPermission::ALL,
    ))
}

fn context(graph: &Graph, request: RoutingRequest, time: i64) -> RoutingContext {
    RoutingContext::new(
        Arc::new(request),
        Arc::new(graph.clone()),
        &TimetableSnapshotSource::new(),
        time,
    )
}

fn traverse_one(graph: &Graph, id: EdgeId, s0: &StateRef, ctx: &RoutingContext) -> StateRef {
    edge(graph, id)
        .traverse(s0, ctx)
        .into_states()
        .pop()
        .unwrap_or_else(|| panic!("test invariant failed: edge {id} was pruned"))
}

fn edge(graph: &Graph, id: EdgeId) -> &Edge {
    graph
        .edge(id)
        .unwrap_or_else(|e| panic!("test invariant failed: {e}"))
}

fn first_start(ctx: &RoutingContext, vertex: VertexId, time: i64) -> StateRef {
    TraversalState::initial_states(&ctx.request, vertex, time)
        .into_iter()
        .next()
        .unwrap_or_else(|| panic!("test invariant failed: no initial state"))
}

/// four intersections in an L: a north to b, then east to c and d. every
/// street is about 111m long and exists in both directions.
pub struct StreetGrid {
    pub graph: Graph,
    pub a: VertexId,
    pub b: VertexId,
    pub c: VertexId,
    pub d: VertexId,
    pub ab: EdgeId,
    pub bc: EdgeId,
    pub cd: EdgeId,
    pub ba: EdgeId,
    pub cb: EdgeId,
    pub dc: EdgeId,
}

impl StreetGrid {
    pub fn new() -> StreetGrid {
        let mut graph = Graph::default();
        let coords = [
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 0.0, y: 0.001 },
            coord! { x: 0.001, y: 0.001 },
            coord! { x: 0.002, y: 0.001 },
        ];
        let ids = ["a", "b", "c", "d"]
            .into_iter()
            .zip(coords)
            .map(|(label, coord)| graph.add_vertex(label, coord, intersection()))
            .collect::<Vec<_>>();
        let mut link = |from: usize, to: usize| {
            graph
                .add_edge(ids[from], ids[to], street(coords[from], coords[to]))
                .unwrap_or_else(|e| panic!("test invariant failed: {e}"))
        };
        let (ab, bc, cd) = (link(0, 1), link(1, 2), link(2, 3));
        let (ba, cb, dc) = (link(1, 0), link(2, 1), link(3, 2));
        StreetGrid {
            graph,
            a: ids[0],
            b: ids[1],
            c: ids[2],
            d: ids[3],
            ab,
            bc,
            cd,
            ba,
            cb,
            dc,
        }
    }

    /// edits a street; its reverse twin is left untouched.
    pub fn set_street<F>(&mut self, id: EdgeId, f: F)
    where
        F: FnOnce(&mut StreetEdge),
    {
        match self.graph.edge_mut(id).map(|e| &mut e.kind) {
            Ok(EdgeKind::Street(street)) => f(street),
            _ => panic!("test invariant failed: {id} is not a street"),
        }
    }

    pub fn context(&self, request: RoutingRequest) -> RoutingContext {
        context(&self.graph, request, T0)
    }

    pub fn start(&self, ctx: &RoutingContext, vertex: VertexId) -> StateRef {
        first_start(ctx, vertex, T0)
    }

    pub fn starts(&self, ctx: &RoutingContext, vertex: VertexId) -> Vec<StateRef> {
        TraversalState::initial_states(&ctx.request, vertex, T0)
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        edge(&self.graph, id)
    }

    pub fn traverse_one(&self, id: EdgeId, s0: &StateRef, ctx: &RoutingContext) -> StateRef {
        traverse_one(&self.graph, id, s0, ctx)
    }
}

/// a three-stop bus line along a street. each stop has a street vertex
/// linked to it in both directions; the first two street vertices are joined
/// by a street. trips `t1` and `t2` depart the first stop at 08:00 and 08:30,
/// take 300s per hop and dwell 60s at the middle stop.
pub struct TransitLine {
    pub graph: Graph,
    pub streets: Vec<VertexId>,
    pub stops: Vec<VertexId>,
    /// street vertex to stop
    pub links: Vec<EdgeId>,
    /// stop to street vertex
    pub links_out: Vec<EdgeId>,
    /// from the second street vertex to the first
    pub street_back: EdgeId,
    pub pattern_edges: PatternEdges,
}

impl TransitLine {
    pub fn new() -> TransitLine {
        TransitLine::build(Accessibility::Possible, [Accessibility::Possible; 2])
    }

    pub fn with_stop_accessibility(accessibility: Accessibility) -> TransitLine {
        TransitLine::build(accessibility, [Accessibility::Possible; 2])
    }

    /// accessibility of trips `t1` and `t2`
    pub fn with_trip_accessibility(t1: Accessibility, t2: Accessibility) -> TransitLine {
        TransitLine::build(Accessibility::Possible, [t1, t2])
    }

    fn build(accessibility: Accessibility, trip_accessibility: [Accessibility; 2]) -> TransitLine {
        let mut calendar = ServiceCalendar::utc();
        if let Some(date) = NaiveDate::from_ymd_opt(2024, 1, 10) {
            calendar.add_service(date, 1);
        }
        let mut graph = Graph::new(
            Arc::new(crate::model::graph::SimpleIntersectionCostModel::default()),
            calendar,
        );
        let mut streets = vec![];
        let mut stops = vec![];
        let mut links = vec![];
        let mut links_out = vec![];
        for i in 0..3 {
            let coord = coord! { x: 0.001 * i as f64, y: 0.0 };
            let street_vertex = graph.add_vertex(&format!("s{i}"), coord, intersection());
            let stop_vertex = graph.add_vertex(
                &format!("stop{i}"),
                coord,
                VertexKind::TransitStop {
                    stop: StopId::new(&format!("stop{i}")),
                    wheelchair_boarding: accessibility,
                },
            );
            let mut add = |from, to| {
                graph
                    .add_edge(from, to, EdgeKind::StationLink)
                    .unwrap_or_else(|e| panic!("test invariant failed: {e}"))
            };
            links.push(add(street_vertex, stop_vertex));
            links_out.push(add(stop_vertex, street_vertex));
            streets.push(street_vertex);
            stops.push(stop_vertex);
        }
        let street_back = graph
            .add_edge(
                streets[1],
                streets[0],
                street(coord! { x: 0.001, y: 0.0 }, coord! { x: 0.0, y: 0.0 }),
            )
            .unwrap_or_else(|e| panic!("test invariant failed: {e}"));

        let pattern_edges = graph
            .add_pattern(Arc::new(line_pattern(trip_accessibility)), &stops)
            .unwrap_or_else(|e| panic!("test invariant failed: {e}"));
        TransitLine {
            graph,
            streets,
            stops,
            links,
            links_out,
            street_back,
            pattern_edges,
        }
    }

    /// 07:50 on the service day
    pub fn morning(&self) -> i64 {
        T0 - 600
    }

    pub fn context(&self, request: RoutingRequest, time: i64) -> RoutingContext {
        context(&self.graph, request, time)
    }

    pub fn start(&self, ctx: &RoutingContext, vertex: VertexId, time: i64) -> StateRef {
        first_start(ctx, vertex, time)
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        edge(&self.graph, id)
    }

    pub fn traverse_one(&self, id: EdgeId, s0: &StateRef, ctx: &RoutingContext) -> StateRef {
        traverse_one(&self.graph, id, s0, ctx)
    }

    pub fn board(&self, stop_index: usize) -> EdgeId {
        self.pattern_edges
            .board(stop_index)
            .unwrap_or_else(|| panic!("test invariant failed: no board edge at {stop_index}"))
    }

    pub fn alight(&self, stop_index: usize) -> EdgeId {
        self.pattern_edges
            .alight(stop_index)
            .unwrap_or_else(|| panic!("test invariant failed: no alight edge at {stop_index}"))
    }

    pub fn hop(&self, hop_index: usize) -> EdgeId {
        self.pattern_edges
            .hop(hop_index)
            .unwrap_or_else(|| panic!("test invariant failed: no hop {hop_index}"))
    }

    pub fn dwell(&self, stop_index: usize) -> EdgeId {
        self.pattern_edges
            .dwell(stop_index)
            .unwrap_or_else(|| panic!("test invariant failed: no dwell at {stop_index}"))
    }

    /// walks from a street vertex onto the stop of the same index.
    pub fn at_stop(&self, ctx: &RoutingContext, stop_index: usize, time: i64) -> StateRef {
        let s0 = self.start(ctx, self.streets[stop_index], time);
        self.traverse_one(self.links[stop_index], &s0, ctx)
    }
}

fn line_pattern(trip_accessibility: [Accessibility; 2]) -> TripPattern {
    let route = Route::new("r1", "agency", TransitMode::Bus);
    let mut timetable = Timetable::new(3);
    let trips = [("t1", 8 * 3600), ("t2", 8 * 3600 + 1800)];
    for ((id, start), accessibility) in trips.into_iter().zip(trip_accessibility) {
        let trip = Arc::new(Trip::new(id, &route.id, 1).with_accessibility(accessibility));
        let arrivals = vec![start, start + 300, start + 660];
        let departures = vec![start, start + 360, start + 660];
        let trip_times = TripTimes::new(trip, arrivals, departures)
            .unwrap_or_else(|e| panic!("test invariant failed: {e}"));
        timetable
            .add_trip_times(trip_times)
            .unwrap_or_else(|e| panic!("test invariant failed: {e}"));
    }
    let stops = (0..3).map(|i| StopId::new(&format!("stop{i}"))).collect();
    TripPattern::new("p1", route, StopPattern::new(stops), timetable)
}

/// two rental places joined through a street: origin place, street vertex
/// `o`, street `o -> d`, street vertex `d`, destination place.
pub struct RentalStreet {
    pub graph: Graph,
    pub origin_place: VertexId,
    pub destination_place: VertexId,
    pub origin_rental: EdgeId,
    pub destination_rental: EdgeId,
    pub origin_link: EdgeId,
    pub street: EdgeId,
    pub destination_link: EdgeId,
}

impl RentalStreet {
    pub fn new(origin: VehicleRentalPlace, destination: VehicleRentalPlace) -> RentalStreet {
        let mut graph = Graph::default();
        let o_coord = coord! { x: 0.0, y: 0.0 };
        let d_coord = coord! { x: 0.001, y: 0.0 };
        let origin_form_factor = origin.form_factor;
        let destination_form_factor = destination.form_factor;
        let origin_place =
            graph.add_vertex("origin", o_coord, VertexKind::RentalPlace(Arc::new(origin)));
        let o = graph.add_vertex("o", o_coord, intersection());
        let d = graph.add_vertex("d", d_coord, intersection());
        let destination_place = graph.add_vertex(
            "destination",
            d_coord,
            VertexKind::RentalPlace(Arc::new(destination)),
        );
        let mut add = |from, to, kind: EdgeKind| {
            graph
                .add_edge(from, to, kind)
                .unwrap_or_else(|e| panic!("test invariant failed: {e}"))
        };
        let rental = |form_factor: RentalFormFactor| EdgeKind::VehicleRental { form_factor };
        let origin_rental = add(origin_place, origin_place, rental(origin_form_factor));
        let destination_rental =
            add(destination_place, destination_place, rental(destination_form_factor));
        let origin_link = add(origin_place, o, EdgeKind::VehicleRentalLink);
        let street = add(o, d, street(o_coord, d_coord));
        let destination_link = add(d, destination_place, EdgeKind::VehicleRentalLink);
        RentalStreet {
            graph,
            origin_place,
            destination_place,
            origin_rental,
            destination_rental,
            origin_link,
            street,
            destination_link,
        }
    }

    pub fn context(&self, request: RoutingRequest) -> RoutingContext {
        context(&self.graph, request, T0)
    }

    pub fn start(&self, ctx: &RoutingContext, vertex: VertexId) -> StateRef {
        first_start(ctx, vertex, T0)
    }

    pub fn starts(&self, ctx: &RoutingContext, vertex: VertexId) -> Vec<StateRef> {
        TraversalState::initial_states(&ctx.request, vertex, T0)
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        edge(&self.graph, id)
    }

    pub fn traverse_one(&self, id: EdgeId, s0: &StateRef, ctx: &RoutingContext) -> StateRef {
        traverse_one(&self.graph, id, s0, ctx)
    }

    /// picks up a vehicle at the origin place.
    pub fn rent_at_origin(&self, ctx: &RoutingContext) -> StateRef {
        let s0 = self.start(ctx, self.origin_place);
        self.traverse_one(self.origin_rental, &s0, ctx)
    }

    /// rides to the destination place and tries to return the vehicle there.
    pub fn return_at_destination(&self, renting: &StateRef, ctx: &RoutingContext) -> Option<StateRef> {
        let s = self.traverse_one(self.origin_link, renting, ctx);
        let s = self.traverse_one(self.street, &s, ctx);
        let s = self.traverse_one(self.destination_link, &s, ctx);
        self.edge(self.destination_rental)
            .traverse(&s, ctx)
            .into_states()
            .pop()
    }

    /// arrive-by: rides from the destination place back to the origin place.
    pub fn ride_back(&self, renting: &StateRef, ctx: &RoutingContext) -> StateRef {
        let s = self.traverse_one(self.destination_link, renting, ctx);
        let s = self.traverse_one(self.street, &s, ctx);
        self.traverse_one(self.origin_link, &s, ctx)
    }
}

/// a lone parking vertex with its parking loop edge.
pub struct ParkingLot {
    pub graph: Graph,
    pub lot: VertexId,
    pub parking: EdgeId,
}

impl ParkingLot {
    pub fn new(parking: VehicleParking) -> ParkingLot {
        let mut graph = Graph::default();
        let lot = graph.add_vertex(
            "lot",
            coord! { x: 0.0, y: 0.0 },
            VertexKind::Parking(Arc::new(parking)),
        );
        let parking = graph
            .add_edge(lot, lot, EdgeKind::VehicleParking)
            .unwrap_or_else(|e| panic!("test invariant failed: {e}"));
        ParkingLot {
            graph,
            lot,
            parking,
        }
    }

    pub fn context(&self, request: RoutingRequest) -> RoutingContext {
        context(&self.graph, request, T0)
    }

    pub fn start(&self, ctx: &RoutingContext) -> StateRef {
        first_start(ctx, self.lot, T0)
    }

    pub fn edge(&self) -> &Edge {
        edge(&self.graph, self.parking)
    }

    pub fn traverse_one(&self, s0: &StateRef, ctx: &RoutingContext) -> StateRef {
        traverse_one(&self.graph, self.parking, s0, ctx)
    }
}
