use super::Vertex;
use crate::model::{state::TraverseMode, traversal::StreetEdge};
use serde::{Deserialize, Serialize};

/// seconds lost at an intersection when turning from one street into another.
///
/// `from_speed` and `to_speed` are the traversal speeds (m/s) on the two
/// streets. callers pass them in physical order, independent of the search
/// direction, so a forward and an arrive-by search pay the same cost for
/// the same turn.
pub trait IntersectionTraversalCostModel: Send + Sync + std::fmt::Debug {
    fn traversal_cost(
        &self,
        vertex: &Vertex,
        from: &StreetEdge,
        to: &StreetEdge,
        mode: TraverseMode,
        from_speed: f64,
        to_speed: f64,
    ) -> f64;
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DrivingDirection {
    #[default]
    Right,
    Left,
}

/// the same cost for every turn
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ConstantIntersectionCostModel {
    pub seconds: f64,
}

impl IntersectionTraversalCostModel for ConstantIntersectionCostModel {
    fn traversal_cost(
        &self,
        _vertex: &Vertex,
        _from: &StreetEdge,
        _to: &StreetEdge,
        _mode: TraverseMode,
        _from_speed: f64,
        _to_speed: f64,
    ) -> f64 {
        self.seconds
    }
}

/// turn costs from the turn angle and traffic control at the intersection.
///
/// drivers wait a fixed expected time per turn direction, longer at traffic
/// lights and nothing at free-flowing intersections. other modes pay for the
/// sharpness of the turn at their speed on the street turned into.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SimpleIntersectionCostModel {
    pub driving_direction: DrivingDirection,
    pub min_right_turn_angle: i32,
    pub max_right_turn_angle: i32,
    pub min_left_turn_angle: i32,
    pub max_left_turn_angle: i32,
    pub expected_right_at_light_secs: f64,
    pub expected_straight_at_light_secs: f64,
    pub expected_left_at_light_secs: f64,
    pub expected_right_no_light_secs: f64,
    pub expected_straight_no_light_secs: f64,
    pub expected_left_no_light_secs: f64,
    /// degrees of turning that cost as much as one meter of travel
    pub degrees_per_meter: f64,
}

impl Default for SimpleIntersectionCostModel {
    fn default() -> Self {
        SimpleIntersectionCostModel {
            driving_direction: DrivingDirection::Right,
            min_right_turn_angle: 45,
            max_right_turn_angle: 135,
            min_left_turn_angle: 225,
            max_left_turn_angle: 315,
            expected_right_at_light_secs: 15.0,
            expected_straight_at_light_secs: 15.0,
            expected_left_at_light_secs: 15.0,
            expected_right_no_light_secs: 8.0,
            expected_straight_no_light_secs: 5.0,
            expected_left_no_light_secs: 8.0,
            degrees_per_meter: 20.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TurnDirection {
    Right,
    Straight,
    Left,
}

impl SimpleIntersectionCostModel {
    /// clockwise angle from the heading leaving `from` to the heading entering `to`, in [0, 360)
    pub fn turn_angle(from: &StreetEdge, to: &StreetEdge) -> i32 {
        (to.in_angle - from.out_angle).rem_euclid(360)
    }

    fn turn_direction(&self, angle: i32) -> TurnDirection {
        let clockwise = if (self.min_right_turn_angle..=self.max_right_turn_angle).contains(&angle) {
            Some(true)
        } else if (self.min_left_turn_angle..=self.max_left_turn_angle).contains(&angle) {
            Some(false)
        } else {
            None
        };
        match (clockwise, self.driving_direction) {
            (None, _) => TurnDirection::Straight,
            (Some(true), DrivingDirection::Right) | (Some(false), DrivingDirection::Left) => {
                TurnDirection::Right
            }
            _ => TurnDirection::Left,
        }
    }

    fn driving_cost(&self, vertex: &Vertex, angle: i32) -> f64 {
        if vertex.free_flowing() {
            return 0.0;
        }
        let direction = self.turn_direction(angle);
        match (vertex.traffic_light(), direction) {
            (true, TurnDirection::Right) => self.expected_right_at_light_secs,
            (true, TurnDirection::Straight) => self.expected_straight_at_light_secs,
            (true, TurnDirection::Left) => self.expected_left_at_light_secs,
            (false, TurnDirection::Right) => self.expected_right_no_light_secs,
            (false, TurnDirection::Straight) => self.expected_straight_no_light_secs,
            (false, TurnDirection::Left) => self.expected_left_no_light_secs,
        }
    }

    fn non_driving_cost(&self, angle: i32, to_speed: f64) -> f64 {
        if to_speed <= 0.0 {
            return 0.0;
        }
        let sharpness = if angle > 180 { 360 - angle } else { angle };
        sharpness as f64 / self.degrees_per_meter / to_speed
    }
}

impl IntersectionTraversalCostModel for SimpleIntersectionCostModel {
    fn traversal_cost(
        &self,
        vertex: &Vertex,
        from: &StreetEdge,
        to: &StreetEdge,
        mode: TraverseMode,
        _from_speed: f64,
        to_speed: f64,
    ) -> f64 {
        let angle = SimpleIntersectionCostModel::turn_angle(from, to);
        if mode.is_driving() {
            self.driving_cost(vertex, angle)
        } else {
            self.non_driving_cost(angle, to_speed)
        }
    }
}
