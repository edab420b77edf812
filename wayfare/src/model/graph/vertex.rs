use super::{StreetTraversalPermission, VehicleParking, VehicleRentalPlace, VertexId};
use geo::Coord;
use std::sync::Arc;
use wayfare_timetable::pattern::{Accessibility, PatternId, StopId};

#[derive(Clone, Debug)]
pub enum VertexKind {
    Intersection {
        traffic_light: bool,
        free_flowing: bool,
    },
    /// a bollard, gate or similar that only some modes may pass
    Barrier {
        permission: StreetTraversalPermission,
    },
    TransitStop {
        stop: StopId,
        wheelchair_boarding: Accessibility,
    },
    /// where a pattern's vehicles depart from (or arrive at) one of its stops
    PatternStop {
        pattern: PatternId,
        stop_index: usize,
        departure: bool,
    },
    RentalPlace(Arc<VehicleRentalPlace>),
    Parking(Arc<VehicleParking>),
}

#[derive(Clone, Debug)]
pub struct Vertex {
    pub id: VertexId,
    pub label: String,
    pub coord: Coord<f64>,
    pub kind: VertexKind,
}

impl Vertex {
    pub fn traffic_light(&self) -> bool {
        matches!(
            self.kind,
            VertexKind::Intersection {
                traffic_light: true,
                ..
            }
        )
    }

    pub fn free_flowing(&self) -> bool {
        matches!(
            self.kind,
            VertexKind::Intersection {
                free_flowing: true,
                ..
            }
        )
    }

    /// modes allowed through this vertex; only barriers restrict
    pub fn permission(&self) -> StreetTraversalPermission {
        match self.kind {
            VertexKind::Barrier { permission } => permission,
            _ => StreetTraversalPermission::ALL,
        }
    }

    pub fn transit_stop(&self) -> Option<(&StopId, Accessibility)> {
        match &self.kind {
            VertexKind::TransitStop {
                stop,
                wheelchair_boarding,
            } => Some((stop, *wheelchair_boarding)),
            _ => None,
        }
    }

    pub fn rental_place(&self) -> Option<&Arc<VehicleRentalPlace>> {
        match &self.kind {
            VertexKind::RentalPlace(place) => Some(place),
            _ => None,
        }
    }

    pub fn parking(&self) -> Option<&Arc<VehicleParking>> {
        match &self.kind {
            VertexKind::Parking(parking) => Some(parking),
            _ => None,
        }
    }
}
