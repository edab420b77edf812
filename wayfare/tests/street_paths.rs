use geo::{coord, line_string, Coord};
use std::sync::Arc;
use wayfare::model::{
    graph::{EdgeId, Graph, StreetTraversalPermission, VertexId, VertexKind},
    request::{RoutingContext, RoutingRequest, StreetMode},
    state::{StateRef, TraversalState},
    traversal::{EdgeKind, StreetEdge},
};
use wayfare_timetable::realtime::TimetableSnapshotSource;

/// 2024-01-10 08:00 UTC
const T0: i64 = 1_704_873_600;

/// a 3x3 lattice of intersections about 111m apart with two-way streets.
fn lattice() -> (Graph, Vec<VertexId>) {
    let mut graph = Graph::default();
    let coords = (0..9)
        .map(|i| coord! { x: 0.001 * (i % 3) as f64, y: 0.001 * (i / 3) as f64 })
        .collect::<Vec<Coord<f64>>>();
    let vertices = coords
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let kind = VertexKind::Intersection {
                traffic_light: i == 4,
                free_flowing: false,
            };
            graph.add_vertex(&format!("v{i}"), *c, kind)
        })
        .collect::<Vec<_>>();
    for i in 0..9 {
        let neighbors = [(i % 3 < 2).then_some(i + 1), (i < 6).then_some(i + 3)];
        for j in neighbors.into_iter().flatten() {
            for (from, to) in [(i, j), (j, i)] {
                let mut street = StreetEdge::new(
                    line_string![coords[from], coords[to]],
                    StreetTraversalPermission::ALL,
                );
                if (from + to) % 4 == 1 {
                    street.stairs = true;
                }
                graph
                    .add_edge(vertices[from], vertices[to], EdgeKind::Street(street))
                    .expect("test invariant failed: could not add street");
            }
        }
    }
    (graph, vertices)
}

fn context(graph: &Graph, request: RoutingRequest) -> RoutingContext {
    RoutingContext::new(
        Arc::new(request),
        Arc::new(graph.clone()),
        &TimetableSnapshotSource::new(),
        T0,
    )
}

fn walk_path(graph: &Graph, ctx: &RoutingContext, start: VertexId, edges: &[EdgeId]) -> StateRef {
    let mut state = TraversalState::initial_states(&ctx.request, start, T0)
        .pop()
        .expect("test invariant failed: no initial state");
    for id in edges {
        let edge = graph.edge(*id).expect("test invariant failed: missing edge");
        state = edge
            .traverse(&state, ctx)
            .into_states()
            .pop()
            .expect("test invariant failed: path edge was pruned");
    }
    state
}

fn edge_between(graph: &Graph, from: VertexId, to: VertexId) -> EdgeId {
    graph
        .outgoing(from)
        .iter()
        .copied()
        .find(|id| graph.edge(*id).map(|e| e.to == to).unwrap_or(false))
        .expect("test invariant failed: no edge between vertices")
}

#[test]
fn test_turn_costs_match_between_search_directions() {
    let _ = env_logger::builder().is_test(true).try_init();
    let (graph, v) = lattice();
    // an L-shaped path through the signalized center and a right angle turn
    let path = [v[3], v[4], v[7], v[8]];
    let edges = path
        .windows(2)
        .map(|w| edge_between(&graph, w[0], w[1]))
        .collect::<Vec<_>>();
    for mode in [StreetMode::Walk, StreetMode::Bike, StreetMode::Car] {
        let forward = context(
            &graph,
            RoutingRequest {
                street_mode: mode,
                ..Default::default()
            },
        );
        let backward = context(
            &graph,
            RoutingRequest {
                street_mode: mode,
                arrive_by: true,
                ..Default::default()
            },
        );
        let end = walk_path(&graph, &forward, path[0], &edges);
        let reversed = edges.iter().rev().copied().collect::<Vec<_>>();
        let start = walk_path(&graph, &backward, path[3], &reversed);
        assert_eq!(end.vertex(), path[3]);
        assert_eq!(start.vertex(), path[0]);
        assert_eq!(
            end.elapsed_seconds(),
            start.elapsed_seconds(),
            "durations differ for {mode}"
        );
        assert!(
            (end.weight() - start.weight()).abs() < 1e-6,
            "weights differ for {mode}: {} vs {}",
            end.weight(),
            start.weight()
        );
    }
}

/// expands every path of up to five edges and checks each child against its parent.
#[test]
fn test_weight_and_time_never_decrease() {
    let (graph, v) = lattice();
    for mode in [StreetMode::Walk, StreetMode::Bike, StreetMode::Car, StreetMode::CarPickup] {
        for arrive_by in [false, true] {
            let ctx = context(
                &graph,
                RoutingRequest {
                    street_mode: mode,
                    arrive_by,
                    ..Default::default()
                },
            );
            let mut frontier = TraversalState::initial_states(&ctx.request, v[0], T0);
            for _ in 0..5 {
                let mut next = vec![];
                for s0 in frontier.iter() {
                    let edges = if arrive_by {
                        graph.incoming(s0.vertex())
                    } else {
                        graph.outgoing(s0.vertex())
                    };
                    for id in edges {
                        let edge = graph.edge(*id).expect("test invariant failed");
                        for s1 in edge.traverse(s0, &ctx).into_states() {
                            assert!(s1.weight() >= s0.weight());
                            if arrive_by {
                                assert!(s1.time() <= s0.time());
                            } else {
                                assert!(s1.time() >= s0.time());
                            }
                            assert!(s1.walk_distance() >= s0.walk_distance());
                            assert_eq!(s1.back_edge(), Some(*id));
                            next.push(s1);
                        }
                    }
                }
                frontier = next;
            }
            assert!(!frontier.is_empty(), "no paths for {mode}");
        }
    }
}

#[test]
fn test_path_back_chain_reconstructs_edges() {
    let (graph, v) = lattice();
    let ctx = context(&graph, RoutingRequest::default());
    let path = [v[0], v[1], v[2], v[5]];
    let edges = path
        .windows(2)
        .map(|w| edge_between(&graph, w[0], w[1]))
        .collect::<Vec<_>>();
    let end = walk_path(&graph, &ctx, path[0], &edges);
    let mut traversed = end.path().filter_map(|s| s.back_edge()).collect::<Vec<_>>();
    traversed.reverse();
    assert_eq!(traversed, edges);
    assert_eq!(end.path().count(), 4);
}
