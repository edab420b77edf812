use super::{
    BicycleOptimizeType, CarPickupOptions, ParkingOptions, RentalOptions, RequestError, StreetMode,
    WheelchairOptions,
};
use crate::model::state::TraverseMode;
use config::{Config, Environment, FileFormat};
use serde::{Deserialize, Serialize};
use std::{
    collections::{HashMap, HashSet},
    path::Path,
};
use wayfare_timetable::pattern::{RouteId, StopId, TransitMode, TripId};

/// read-only options of one search.
///
/// every field has a default, so a request may be given as a partial JSON
/// object or configuration file. speeds are meters per second, times are
/// seconds and costs are in weight units (one second of riding at
/// reluctance 1.0).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct RoutingRequest {
    pub arrive_by: bool,
    pub street_mode: StreetMode,
    pub transit: bool,
    /// transit modes that may be boarded, all when empty
    pub allowed_transit_modes: Vec<TransitMode>,

    pub walk_speed: f64,
    pub bike_speed: f64,
    pub scooter_speed: f64,
    pub bike_walking_speed: f64,

    pub walk_reluctance: f64,
    pub bike_reluctance: f64,
    pub car_reluctance: f64,
    pub bike_walking_reluctance: f64,
    pub stairs_reluctance: f64,
    pub turn_reluctance: f64,
    pub wait_reluctance: f64,
    /// applied to waiting before the first boarding instead of `wait_reluctance`
    pub wait_at_beginning_factor: f64,
    pub bicycle_optimize: BicycleOptimizeType,

    pub board_slack: i64,
    pub alight_slack: i64,
    /// minimum time between alighting one vehicle and boarding the next
    pub transfer_slack: i64,
    pub transfer_penalty: f64,
    pub board_cost: f64,
    pub board_cost_by_mode: HashMap<TransitMode, f64>,
    pub transit_reluctance_by_mode: HashMap<TransitMode, f64>,

    pub banned_routes: HashSet<RouteId>,
    pub banned_trips: HashSet<TripId>,
    /// stops where boarding and alighting are forbidden
    pub banned_stops: HashSet<StopId>,
    /// stops a vehicle may not even pass through
    pub banned_stops_hard: HashSet<StopId>,

    pub wheelchair: WheelchairOptions,
    pub rental: RentalOptions,
    pub parking: ParkingOptions,
    pub car_pickup: CarPickupOptions,

    /// limit on street travel before the first boarding
    pub max_pre_transit_time: Option<i64>,
    /// time and cost of getting on or off a bicycle
    pub bike_switch_time: i64,
    pub bike_switch_cost: f64,
    /// route on the scheduled timetables only
    pub ignore_realtime_updates: bool,
}

impl Default for RoutingRequest {
    fn default() -> Self {
        RoutingRequest {
            arrive_by: false,
            street_mode: StreetMode::Walk,
            transit: true,
            allowed_transit_modes: vec![],
            walk_speed: 1.33,
            bike_speed: 5.0,
            scooter_speed: 5.0,
            bike_walking_speed: 1.33,
            walk_reluctance: 2.0,
            bike_reluctance: 1.0,
            car_reluctance: 1.0,
            bike_walking_reluctance: 5.0,
            stairs_reluctance: 2.0,
            turn_reluctance: 1.0,
            wait_reluctance: 1.0,
            wait_at_beginning_factor: 0.4,
            bicycle_optimize: BicycleOptimizeType::default(),
            board_slack: 0,
            alight_slack: 0,
            transfer_slack: 120,
            transfer_penalty: 0.0,
            board_cost: 600.0,
            board_cost_by_mode: HashMap::new(),
            transit_reluctance_by_mode: HashMap::new(),
            banned_routes: HashSet::new(),
            banned_trips: HashSet::new(),
            banned_stops: HashSet::new(),
            banned_stops_hard: HashSet::new(),
            wheelchair: WheelchairOptions::default(),
            rental: RentalOptions::default(),
            parking: ParkingOptions::default(),
            car_pickup: CarPickupOptions::default(),
            max_pre_transit_time: None,
            bike_switch_time: 0,
            bike_switch_cost: 0.0,
            ignore_realtime_updates: false,
        }
    }
}

impl TryFrom<&serde_json::Value> for RoutingRequest {
    type Error = RequestError;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        let request: RoutingRequest = serde_json::from_value(value.clone())?;
        request.validate()?;
        Ok(request)
    }
}

impl RoutingRequest {
    /// reads a request from a TOML or JSON file (by extension, TOML otherwise).
    /// environment variables such as `WAYFARE__WALK_SPEED` or
    /// `WAYFARE__WHEELCHAIR__ENABLED` override values from the file.
    pub fn from_config_file(path: &Path) -> Result<RoutingRequest, RequestError> {
        let filepath = path.to_string_lossy();
        let format = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => FileFormat::Json,
            _ => FileFormat::Toml,
        };
        let config = Config::builder()
            .add_source(config::File::new(&filepath, format))
            .add_source(
                Environment::with_prefix("WAYFARE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| RequestError::ConfigReadError {
                msg: format!("failed reading '{filepath}'"),
                source: e,
            })?;
        let request = config
            .try_deserialize::<RoutingRequest>()
            .map_err(|e| RequestError::ConfigReadError {
                msg: format!("failed decoding routing request from '{filepath}'"),
                source: e,
            })?;
        request.validate()?;
        Ok(request)
    }

    pub fn validate(&self) -> Result<(), RequestError> {
        let positive = [
            ("walk_speed", self.walk_speed),
            ("bike_speed", self.bike_speed),
            ("scooter_speed", self.scooter_speed),
            ("bike_walking_speed", self.bike_walking_speed),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(field, format!("speed must be positive, found {value}")));
            }
        }
        let non_negative = [
            ("walk_reluctance", self.walk_reluctance),
            ("bike_reluctance", self.bike_reluctance),
            ("car_reluctance", self.car_reluctance),
            ("bike_walking_reluctance", self.bike_walking_reluctance),
            ("stairs_reluctance", self.stairs_reluctance),
            ("turn_reluctance", self.turn_reluctance),
            ("wait_reluctance", self.wait_reluctance),
            ("wait_at_beginning_factor", self.wait_at_beginning_factor),
            ("transfer_penalty", self.transfer_penalty),
            ("board_cost", self.board_cost),
            ("bike_switch_cost", self.bike_switch_cost),
            ("wheelchair.inaccessible_street_reluctance", self.wheelchair.inaccessible_street_reluctance),
            ("wheelchair.slope_exceeded_reluctance", self.wheelchair.slope_exceeded_reluctance),
            ("rental.pickup_cost", self.rental.pickup_cost),
            ("rental.dropoff_cost", self.rental.dropoff_cost),
            ("parking.park_cost", self.parking.park_cost),
            ("car_pickup.pickup_cost", self.car_pickup.pickup_cost),
        ];
        let by_mode = self
            .board_cost_by_mode
            .values()
            .chain(self.transit_reluctance_by_mode.values())
            .map(|v| ("board_cost_by_mode / transit_reluctance_by_mode", *v));
        for (field, value) in non_negative.into_iter().chain(by_mode) {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(field, format!("must be non-negative, found {value}")));
            }
        }
        let durations = [
            ("board_slack", self.board_slack),
            ("alight_slack", self.alight_slack),
            ("transfer_slack", self.transfer_slack),
            ("bike_switch_time", self.bike_switch_time),
            ("rental.pickup_time", self.rental.pickup_time),
            ("rental.dropoff_time", self.rental.dropoff_time),
            ("parking.park_time", self.parking.park_time),
            ("car_pickup.pickup_time", self.car_pickup.pickup_time),
        ];
        for (field, value) in durations {
            if value < 0 {
                return Err(invalid(field, format!("duration must be non-negative, found {value}")));
            }
        }
        if let Some(limit) = self.max_pre_transit_time {
            if limit < 0 {
                return Err(invalid("max_pre_transit_time", format!("found {limit}")));
            }
        }
        let max_slope = self.wheelchair.max_slope;
        if !(0.0..1.0).contains(&max_slope) {
            return Err(invalid(
                "wheelchair.max_slope",
                format!("must be in [0, 1), found {max_slope}"),
            ));
        }
        Ok(())
    }

    /// speed on streets in m/s
    pub fn street_speed(&self, mode: TraverseMode, walking_bike: bool) -> f64 {
        if walking_bike {
            return self.bike_walking_speed;
        }
        match mode {
            TraverseMode::Walk => self.walk_speed,
            TraverseMode::Bicycle => self.bike_speed,
            TraverseMode::Scooter => self.scooter_speed,
            // cars use the speed of each street, this is only a fallback
            TraverseMode::Car => 40.0 / 3.6,
            TraverseMode::Transit(_) => 0.0,
        }
    }

    pub fn street_reluctance(&self, mode: TraverseMode, walking_bike: bool) -> f64 {
        if walking_bike {
            return self.bike_walking_reluctance;
        }
        match mode {
            TraverseMode::Walk => self.walk_reluctance,
            TraverseMode::Bicycle | TraverseMode::Scooter => self.bike_reluctance,
            TraverseMode::Car => self.car_reluctance,
            TraverseMode::Transit(m) => self.transit_reluctance(m),
        }
    }

    pub fn board_cost_for(&self, mode: TransitMode) -> f64 {
        self.board_cost_by_mode
            .get(&mode)
            .copied()
            .unwrap_or(self.board_cost)
    }

    pub fn transit_reluctance(&self, mode: TransitMode) -> f64 {
        self.transit_reluctance_by_mode
            .get(&mode)
            .copied()
            .unwrap_or(1.0)
    }

    pub fn transit_mode_allowed(&self, mode: TransitMode) -> bool {
        self.transit
            && (self.allowed_transit_modes.is_empty() || self.allowed_transit_modes.contains(&mode))
    }
}

fn invalid(field: &str, msg: String) -> RequestError {
    RequestError::InvalidParameter {
        field: field.to_string(),
        msg,
    }
}
