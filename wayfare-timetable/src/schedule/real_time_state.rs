use serde::{Deserialize, Serialize};

/// realtime status of a whole trip.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RealTimeState {
    #[default]
    Scheduled,
    Updated,
    Canceled,
    /// trip not present in the static schedule
    Added,
}

/// realtime status of a single stop call.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StopRealTimeState {
    #[default]
    Scheduled,
    Updated,
    Skipped,
}
