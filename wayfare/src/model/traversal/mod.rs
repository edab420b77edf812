//! the edge catalog: one closed set of edge kinds sharing a single
//! traversal contract, [`Edge::traverse`].
mod edge;
mod pattern_dwell;
mod pattern_hop;
mod street_edge;
mod street_traversal;
mod structural_edge;
mod transit_board_alight;
mod vehicle_parking_edge;
mod vehicle_rental_edge;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use edge::{Edge, EdgeKind};
pub use street_edge::{StreetCostExtension, StreetEdge};
