use serde::{Deserialize, Serialize};

/// weights of the three cycling cost components, normalized to sum to one.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct TriangleFactors {
    pub time: f64,
    pub slope: f64,
    pub safety: f64,
}

impl TriangleFactors {
    pub fn new(time: f64, slope: f64, safety: f64) -> TriangleFactors {
        let total = time + slope + safety;
        if total <= 0.0 || !total.is_finite() {
            return TriangleFactors::default();
        }
        TriangleFactors {
            time: time / total,
            slope: slope / total,
            safety: safety / total,
        }
    }
}

impl Default for TriangleFactors {
    fn default() -> Self {
        TriangleFactors {
            time: 1.0 / 3.0,
            slope: 1.0 / 3.0,
            safety: 1.0 / 3.0,
        }
    }
}

/// what a cyclist minimizes besides travel time.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BicycleOptimizeType {
    /// shortest time, ignoring safety and effort
    Quick,
    /// prefer streets with a low safety factor
    #[default]
    Safe,
    /// avoid climbing
    Flat,
    /// a weighted mix of time, slope and safety
    Triangle(TriangleFactors),
}

impl BicycleOptimizeType {
    /// effective length of a street for cycling cost.
    ///
    /// # Arguments
    ///
    /// * `length`        - street length in meters
    /// * `safety_factor` - street safety multiplier, 1.0 is neutral
    /// * `work_factor`   - slope work multiplier from elevation, 1.0 when flat
    /// * `speed_factor`  - slope speed multiplier from elevation, 1.0 when flat
    pub fn effective_length(
        &self,
        length: f64,
        safety_factor: f64,
        work_factor: f64,
        speed_factor: f64,
    ) -> f64 {
        match self {
            BicycleOptimizeType::Quick => length * speed_factor,
            BicycleOptimizeType::Safe => length * safety_factor,
            BicycleOptimizeType::Flat => length * speed_factor + length * (work_factor - 1.0).max(0.0) * 10.0,
            BicycleOptimizeType::Triangle(t) => {
                length * (t.time * speed_factor + t.slope * work_factor + t.safety * safety_factor)
            }
        }
    }
}
