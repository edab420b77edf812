use crate::{pattern::TripId, schedule::ClampedInterval};
use chrono::NaiveDate;
use std::fmt::Display;

/// a data-integrity problem that was repaired instead of rejecting the update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateWarning {
    pub trip: TripId,
    pub service_date: NaiveDate,
    pub interval: ClampedInterval,
}

impl Display for UpdateWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.interval {
            ClampedInterval::Dwell {
                stop_index,
                seconds,
            } => write!(
                f,
                "trip {} on {}: negative dwell of {}s at stop index {} clamped to 0s",
                self.trip, self.service_date, seconds, stop_index
            ),
            ClampedInterval::Running { hop_index, seconds } => write!(
                f,
                "trip {} on {}: negative running time of {}s on hop {} clamped to 0s",
                self.trip, self.service_date, seconds, hop_index
            ),
        }
    }
}

/// result of an accepted realtime update.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UpdateSuccess {
    /// true if the trip already had a row in the timetable for that date
    pub replaced: bool,
    pub warnings: Vec<UpdateWarning>,
}

impl UpdateSuccess {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
