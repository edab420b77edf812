use crate::model::{
    graph::{ElevationExtension, ElevationProfile, StreetTraversalPermission, TurnRestriction},
    request::RoutingRequest,
    state::TraverseMode,
};
use geo::{Bearing, Coord, Haversine, Length as _, LineString, Point};
use serde::{Deserialize, Serialize};
use uom::si::{
    f64::{Length, Velocity},
    length::meter,
    velocity::{kilometer_per_hour, meter_per_second},
};

/// surcharges (tolls, fees) added to the weight of a street per mode.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
#[serde(default)]
pub struct StreetCostExtension {
    pub walk: f64,
    pub bicycle: f64,
    pub car: f64,
}

impl StreetCostExtension {
    pub fn cost(&self, mode: TraverseMode) -> f64 {
        match mode {
            TraverseMode::Walk => self.walk,
            TraverseMode::Bicycle | TraverseMode::Scooter => self.bicycle,
            TraverseMode::Car => self.car,
            TraverseMode::Transit(_) => 0.0,
        }
    }
}

/// static data of one directed street segment.
#[derive(Clone, Debug)]
pub struct StreetEdge {
    pub name: Option<String>,
    pub geometry: LineString<f64>,
    pub length_m: f64,
    pub permission: StreetTraversalPermission,
    /// m/s
    pub car_speed: f64,
    pub wheelchair_accessible: bool,
    pub stairs: bool,
    /// 1.0 is neutral, lower values are safer for cycling
    pub bicycle_safety_factor: f64,
    /// modes for which this street is in a no-thru-traffic area
    pub no_thru_traffic: StreetTraversalPermission,
    /// compass bearing (degrees) of the first segment, heading into the street
    pub in_angle: i32,
    /// compass bearing (degrees) of the last segment, heading out of the street
    pub out_angle: i32,
    pub elevation: Option<ElevationExtension>,
    pub cost_extension: Option<StreetCostExtension>,
    /// restrictions on turning from this street into the next, fixed at build time
    pub turn_restrictions: Vec<TurnRestriction>,
}

impl StreetEdge {
    /// builds a street from its geometry (lon/lat coordinates). length and
    /// bearings are derived from the geometry.
    pub fn new(geometry: LineString<f64>, permission: StreetTraversalPermission) -> StreetEdge {
        let length_m = Haversine.length(&geometry);
        let coords = &geometry.0;
        let in_angle = match coords.as_slice() {
            [a, b, ..] => bearing(*a, *b),
            _ => 0,
        };
        let out_angle = match coords.as_slice() {
            [.., a, b] => bearing(*a, *b),
            _ => 0,
        };
        StreetEdge {
            name: None,
            geometry,
            length_m,
            permission,
            car_speed: Velocity::new::<kilometer_per_hour>(40.0).get::<meter_per_second>(),
            wheelchair_accessible: true,
            stairs: false,
            bicycle_safety_factor: 1.0,
            no_thru_traffic: StreetTraversalPermission::NONE,
            in_angle,
            out_angle,
            elevation: None,
            cost_extension: None,
            turn_restrictions: vec![],
        }
    }

    pub fn with_name(mut self, name: &str) -> StreetEdge {
        self.name = Some(name.to_string());
        self
    }

    /// overrides the length derived from the geometry
    pub fn with_length(mut self, length: Length) -> StreetEdge {
        self.length_m = length.get::<meter>();
        self
    }

    pub fn with_car_speed(mut self, speed: Velocity) -> StreetEdge {
        self.car_speed = speed.get::<meter_per_second>();
        self
    }

    pub fn with_stairs(mut self) -> StreetEdge {
        self.stairs = true;
        self
    }

    pub fn with_wheelchair_accessible(mut self, accessible: bool) -> StreetEdge {
        self.wheelchair_accessible = accessible;
        self
    }

    pub fn with_bicycle_safety_factor(mut self, factor: f64) -> StreetEdge {
        self.bicycle_safety_factor = factor;
        self
    }

    pub fn with_no_thru_traffic(mut self, modes: StreetTraversalPermission) -> StreetEdge {
        self.no_thru_traffic = modes;
        self
    }

    /// attaches slope factors; profiles too short to summarize are ignored.
    pub fn with_elevation(mut self, profile: &ElevationProfile, flattened: bool) -> StreetEdge {
        self.elevation = ElevationExtension::from_profile(profile, flattened);
        self
    }

    pub fn with_cost_extension(mut self, extension: StreetCostExtension) -> StreetEdge {
        self.cost_extension = Some(extension);
        self
    }

    pub fn with_turn_restriction(mut self, restriction: TurnRestriction) -> StreetEdge {
        self.turn_restrictions.push(restriction);
        self
    }

    /// true if `other` runs along exactly the same points in the opposite direction
    pub fn is_reverse_of(&self, other: &StreetEdge) -> bool {
        self.geometry.0.len() == other.geometry.0.len()
            && self.geometry.0.iter().eq(other.geometry.0.iter().rev())
    }

    pub fn max_slope(&self) -> f64 {
        self.elevation.map(|e| e.max_slope).unwrap_or_default()
    }

    /// speed (m/s) of `mode` on this street
    pub fn speed(&self, request: &RoutingRequest, mode: TraverseMode, walking_bike: bool) -> f64 {
        if mode.is_driving() && !walking_bike {
            self.car_speed
        } else {
            request.street_speed(mode, walking_bike)
        }
    }

    pub fn surcharge(&self, mode: TraverseMode) -> f64 {
        self.cost_extension
            .map(|c| c.cost(mode))
            .unwrap_or_default()
    }
}

fn bearing(from: Coord<f64>, to: Coord<f64>) -> i32 {
    let degrees = Haversine.bearing(Point::from(from), Point::from(to));
    (degrees.round() as i32).rem_euclid(360)
}

#[cfg(test)]
mod test {
    use super::StreetEdge;
    use crate::model::graph::StreetTraversalPermission;
    use geo::line_string;
    use uom::si::{f64::Length, length::meter};

    #[test]
    fn test_length_and_bearings_from_geometry() {
        // north, then east
        let edge = StreetEdge::new(
            line_string![(x: 0.0, y: 0.0), (x: 0.0, y: 0.001), (x: 0.001, y: 0.001)],
            StreetTraversalPermission::ALL,
        );
        assert!((edge.length_m - 222.4).abs() < 1.0, "{}", edge.length_m);
        assert_eq!(edge.in_angle, 0);
        assert_eq!(edge.out_angle, 90);

        let edge = edge.with_length(Length::new::<meter>(50.0));
        assert_eq!(edge.length_m, 50.0);
    }

    #[test]
    fn test_reverse_geometry() {
        let ab = StreetEdge::new(
            line_string![(x: 0.0, y: 0.0), (x: 0.0, y: 0.001), (x: 0.001, y: 0.001)],
            StreetTraversalPermission::ALL,
        );
        let ba = StreetEdge::new(
            line_string![(x: 0.001, y: 0.001), (x: 0.0, y: 0.001), (x: 0.0, y: 0.0)],
            StreetTraversalPermission::ALL,
        );
        let other = StreetEdge::new(
            line_string![(x: 0.001, y: 0.001), (x: 0.0, y: 0.0)],
            StreetTraversalPermission::ALL,
        );
        assert!(ab.is_reverse_of(&ba));
        assert!(ba.is_reverse_of(&ab));
        assert!(!ab.is_reverse_of(&other));
        assert!(!ab.is_reverse_of(&ab));
    }
}
