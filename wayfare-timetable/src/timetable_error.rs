use crate::pattern::{PatternId, TripId};
use chrono::NaiveDate;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TimetableError {
    #[error("trip {trip} has {found} stop times but the timetable has {expected} stops")]
    StopCountMismatch {
        trip: TripId,
        expected: usize,
        found: usize,
    },
    #[error("trip {0} has {1} arrival times and {2} departure times")]
    ArrivalDepartureMismatch(TripId, usize, usize),
    #[error("stop index {index} is out of range for a pattern with {n_stops} stops")]
    StopIndexOutOfRange { index: usize, n_stops: usize },
    #[error("trip {0} was not found in the scheduled timetable of pattern {1}")]
    TripNotFound(TripId, PatternId),
    #[error("trip {0} already exists on {1} and cannot be added again")]
    TripAlreadyPresent(TripId, NaiveDate),
    #[error("stop time update for trip {trip} at stop index {index} has neither arrival nor departure delay")]
    MissingDelay { trip: TripId, index: usize },
    #[error("stop time updates for trip {0} are not in increasing stop order")]
    UnorderedStopTimeUpdates(TripId),
    #[error("trip {trip} times decrease at stop index {index} after delay propagation")]
    NonIncreasingTimes { trip: TripId, index: usize },
    #[error("added trip {0} has no stop times")]
    MissingStopTimes(TripId),
}
