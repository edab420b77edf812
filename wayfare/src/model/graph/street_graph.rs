use super::{
    EdgeId, GraphError, IntersectionTraversalCostModel, PatternEdges, SimpleIntersectionCostModel,
    Vertex, VertexId, VertexKind,
};
use crate::model::traversal::{Edge, EdgeKind};
use geo::Coord;
use std::{collections::HashMap, sync::Arc};
use wayfare_timetable::{
    pattern::{PatternId, TripPattern},
    schedule::TransferTable,
    service::ServiceCalendar,
};

/// the routable graph: an arena of vertices and edges addressed by index,
/// plus the transit patterns wired into it.
///
/// a graph is built once and then shared read-only between searches.
#[derive(Clone, Debug)]
pub struct Graph {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    outgoing: Vec<Vec<EdgeId>>,
    incoming: Vec<Vec<EdgeId>>,
    patterns: HashMap<PatternId, Arc<TripPattern>>,
    pattern_edges: HashMap<PatternId, PatternEdges>,
    transfer_table: TransferTable,
    service_calendar: ServiceCalendar,
    intersection_cost_model: Arc<dyn IntersectionTraversalCostModel>,
}

impl Default for Graph {
    fn default() -> Self {
        Graph::new(
            Arc::new(SimpleIntersectionCostModel::default()),
            ServiceCalendar::utc(),
        )
    }
}

impl Graph {
    pub fn new(
        intersection_cost_model: Arc<dyn IntersectionTraversalCostModel>,
        service_calendar: ServiceCalendar,
    ) -> Graph {
        Graph {
            vertices: vec![],
            edges: vec![],
            outgoing: vec![],
            incoming: vec![],
            patterns: HashMap::new(),
            pattern_edges: HashMap::new(),
            transfer_table: TransferTable::new(),
            service_calendar,
            intersection_cost_model,
        }
    }

    pub fn add_vertex(&mut self, label: &str, coord: Coord<f64>, kind: VertexKind) -> VertexId {
        let id = VertexId(self.vertices.len());
        self.vertices.push(Vertex {
            id,
            label: label.to_string(),
            coord,
            kind,
        });
        self.outgoing.push(vec![]);
        self.incoming.push(vec![]);
        id
    }

    /// adds a directed edge after checking its endpoints fit its kind.
    pub fn add_edge(
        &mut self,
        from: VertexId,
        to: VertexId,
        kind: EdgeKind,
    ) -> Result<EdgeId, GraphError> {
        let src = self.vertex(from)?;
        let dst = self.vertex(to)?;
        kind.validate_endpoints(src, dst)
            .map_err(|msg| GraphError::InvalidEdge { from, to, msg })?;
        let id = EdgeId(self.edges.len());
        self.edges.push(Edge::new(id, from, to, kind));
        self.outgoing[from.0].push(id);
        self.incoming[to.0].push(id);
        Ok(id)
    }

    /// wires a pattern into the graph between the given transit stop vertices.
    ///
    /// every stop gets a departure vertex (except the last) and an arrival
    /// vertex (except the first). board edges lead from the stop to the
    /// departure vertex, hops from departure to the next arrival, dwells from
    /// arrival to departure at interior stops, and alight edges from the
    /// arrival vertex back to the stop.
    pub fn add_pattern(
        &mut self,
        pattern: Arc<TripPattern>,
        stop_vertices: &[VertexId],
    ) -> Result<PatternEdges, GraphError> {
        let pattern_id = pattern.id.clone();
        if self.patterns.contains_key(&pattern_id) {
            return Err(GraphError::DuplicatePattern(pattern_id));
        }
        let n = pattern.n_stops();
        if n != stop_vertices.len() {
            return Err(GraphError::StopCountMismatch {
                pattern: pattern_id,
                expected: n,
                found: stop_vertices.len(),
            });
        }
        for v in stop_vertices {
            if self.vertex(*v)?.transit_stop().is_none() {
                return Err(GraphError::NotATransitStop(*v));
            }
        }

        let mut departures = Vec::with_capacity(n);
        let mut arrivals = Vec::with_capacity(n);
        for (stop_index, stop_vertex) in stop_vertices.iter().enumerate() {
            let coord = self.vertices[stop_vertex.0].coord;
            let mut pattern_stop = |departure: bool| {
                let label = format!(
                    "{pattern_id}:{stop_index}:{}",
                    if departure { "depart" } else { "arrive" }
                );
                let kind = VertexKind::PatternStop {
                    pattern: pattern_id.clone(),
                    stop_index,
                    departure,
                };
                self.add_vertex(&label, coord, kind)
            };
            departures.push((stop_index + 1 < n).then(|| pattern_stop(true)));
            arrivals.push((stop_index > 0).then(|| pattern_stop(false)));
        }

        let mut edges = PatternEdges::default();
        for (stop_index, stop_vertex) in stop_vertices.iter().enumerate() {
            let board = match departures[stop_index] {
                Some(depart) if pattern.stop_pattern.can_board(stop_index) => {
                    let kind = EdgeKind::TransitBoardAlight {
                        pattern: pattern_id.clone(),
                        stop_index,
                        boarding: true,
                    };
                    Some(self.add_edge(*stop_vertex, depart, kind)?)
                }
                _ => None,
            };
            let alight = match arrivals[stop_index] {
                Some(arrive) if pattern.stop_pattern.can_alight(stop_index) => {
                    let kind = EdgeKind::TransitBoardAlight {
                        pattern: pattern_id.clone(),
                        stop_index,
                        boarding: false,
                    };
                    Some(self.add_edge(arrive, *stop_vertex, kind)?)
                }
                _ => None,
            };
            let dwell = match (arrivals[stop_index], departures[stop_index]) {
                (Some(arrive), Some(depart)) => {
                    let kind = EdgeKind::PatternDwell {
                        pattern: pattern_id.clone(),
                        stop_index,
                    };
                    Some(self.add_edge(arrive, depart, kind)?)
                }
                _ => None,
            };
            edges.board.push(board);
            edges.alight.push(alight);
            edges.dwells.push(dwell);
        }
        for hop_index in 0..n.saturating_sub(1) {
            let (Some(depart), Some(arrive)) = (departures[hop_index], arrivals[hop_index + 1])
            else {
                continue;
            };
            let kind = EdgeKind::PatternHop {
                pattern: pattern_id.clone(),
                hop_index,
            };
            edges.hops.push(self.add_edge(depart, arrive, kind)?);
        }

        log::debug!(
            "wired pattern {pattern_id} with {n} stops into the graph ({} edges)",
            self.edges.len()
        );
        self.patterns.insert(pattern_id.clone(), pattern);
        self.pattern_edges.insert(pattern_id, edges.clone());
        Ok(edges)
    }

    pub fn vertex(&self, id: VertexId) -> Result<&Vertex, GraphError> {
        self.vertices
            .get(id.0)
            .ok_or(GraphError::VertexNotFound(id))
    }

    pub fn edge(&self, id: EdgeId) -> Result<&Edge, GraphError> {
        self.edges.get(id.0).ok_or(GraphError::EdgeNotFound(id))
    }

    /// mutable access for attaching build-time data (restrictions, extensions) to an edge
    pub fn edge_mut(&mut self, id: EdgeId) -> Result<&mut Edge, GraphError> {
        self.edges.get_mut(id.0).ok_or(GraphError::EdgeNotFound(id))
    }

    pub fn outgoing(&self, id: VertexId) -> &[EdgeId] {
        self.outgoing.get(id.0).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn incoming(&self, id: VertexId) -> &[EdgeId] {
        self.incoming.get(id.0).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn pattern(&self, id: &PatternId) -> Option<&Arc<TripPattern>> {
        self.patterns.get(id)
    }

    pub fn pattern_edges(&self, id: &PatternId) -> Option<&PatternEdges> {
        self.pattern_edges.get(id)
    }

    pub fn patterns(&self) -> impl Iterator<Item = &Arc<TripPattern>> {
        self.patterns.values()
    }

    pub fn transfer_table(&self) -> &TransferTable {
        &self.transfer_table
    }

    pub fn set_transfer_table(&mut self, transfer_table: TransferTable) {
        self.transfer_table = transfer_table;
    }

    pub fn service_calendar(&self) -> &ServiceCalendar {
        &self.service_calendar
    }

    pub fn intersection_cost_model(&self) -> &dyn IntersectionTraversalCostModel {
        self.intersection_cost_model.as_ref()
    }

    pub fn n_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn n_edges(&self) -> usize {
        self.edges.len()
    }
}

#[cfg(test)]
mod test {
    use super::Graph;
    use crate::model::graph::{GraphError, VertexKind};
    use geo::coord;
    use std::sync::Arc;
    use wayfare_timetable::{
        pattern::{Accessibility, Route, StopId, StopPattern, TransitMode, TripPattern},
        schedule::Timetable,
    };

    fn stop(graph: &mut Graph, name: &str, x: f64) -> crate::model::graph::VertexId {
        graph.add_vertex(
            name,
            coord! { x: x, y: 0.0 },
            VertexKind::TransitStop {
                stop: StopId::new(name),
                wheelchair_boarding: Accessibility::Possible,
            },
        )
    }

    fn pattern(n: usize) -> Arc<TripPattern> {
        let stops = (0..n).map(|i| StopId::new(&format!("s{i}"))).collect();
        Arc::new(TripPattern::new(
            "p",
            Route::new("r", "agency", TransitMode::Bus),
            StopPattern::new(stops),
            Timetable::new(n),
        ))
    }

    #[test]
    fn test_add_pattern_wires_every_slot() {
        let mut graph = Graph::default();
        let stops = (0..3)
            .map(|i| stop(&mut graph, &format!("s{i}"), i as f64 * 0.01))
            .collect::<Vec<_>>();
        let edges = graph
            .add_pattern(pattern(3), &stops)
            .expect("test invariant failed: pattern should wire");

        assert_eq!(edges.board, vec![edges.board[0], edges.board[1], None]);
        assert!(edges.board(0).is_some() && edges.board(1).is_some());
        assert!(edges.alight(0).is_none());
        assert!(edges.alight(1).is_some() && edges.alight(2).is_some());
        assert_eq!(edges.hops.len(), 2);
        assert_eq!(edges.dwells, vec![None, edges.dwells[1], None]);
        assert!(edges.dwell(1).is_some());
        // 3 stops + 2 departure + 2 arrival vertices
        assert_eq!(graph.n_vertices(), 7);
        // 2 boards, 2 alights, 2 hops, 1 dwell
        assert_eq!(graph.n_edges(), 7);

        let board = graph.edge(edges.board(0).expect("board")).expect("edge");
        assert_eq!(board.from, stops[0]);
        assert!(graph.outgoing(stops[0]).contains(&board.id));
    }

    #[test]
    fn test_add_pattern_rejects_bad_input() {
        let mut graph = Graph::default();
        let a = stop(&mut graph, "s0", 0.0);
        let b = stop(&mut graph, "s1", 0.01);
        let corner = graph.add_vertex(
            "corner",
            coord! { x: 0.0, y: 0.0 },
            VertexKind::Intersection {
                traffic_light: false,
                free_flowing: false,
            },
        );
        assert!(matches!(
            graph.add_pattern(pattern(3), &[a, b]),
            Err(GraphError::StopCountMismatch { expected: 3, found: 2, .. })
        ));
        assert!(matches!(
            graph.add_pattern(pattern(2), &[a, corner]),
            Err(GraphError::NotATransitStop(_))
        ));
        graph
            .add_pattern(pattern(2), &[a, b])
            .expect("test invariant failed: pattern should wire");
        assert!(matches!(
            graph.add_pattern(pattern(2), &[a, b]),
            Err(GraphError::DuplicatePattern(_))
        ));
    }
}
