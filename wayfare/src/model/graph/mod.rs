mod elevation;
mod graph_error;
mod ids;
mod intersection_cost_model;
mod pattern_edges;
mod street_graph;
mod street_traversal_permission;
mod turn_restriction;
mod vehicle_parking;
mod vehicle_rental_place;
mod vertex;

pub use elevation::{ElevationExtension, ElevationProfile};
pub use graph_error::GraphError;
pub use ids::{EdgeId, VertexId};
pub use intersection_cost_model::{
    ConstantIntersectionCostModel, DrivingDirection, IntersectionTraversalCostModel,
    SimpleIntersectionCostModel,
};
pub use pattern_edges::PatternEdges;
pub use street_graph::Graph;
pub use street_traversal_permission::StreetTraversalPermission;
pub use turn_restriction::{TurnRestriction, TurnRestrictionKind, TurnRestrictionOverlay};
pub use vehicle_parking::{ParkingAvailability, VehicleParking};
pub use vehicle_rental_place::{RentalFormFactor, RentalNetworks, VehicleRentalPlace};
pub use vertex::{Vertex, VertexKind};
