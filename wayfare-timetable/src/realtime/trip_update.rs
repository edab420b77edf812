use crate::{
    pattern::{RouteId, Trip, TripId},
    schedule::TripTimes,
    TimetableError,
};
use chrono::NaiveDate;
use std::sync::Arc;

/// realtime change to one stop of a trip. delays are seconds relative to the
/// scheduled time; a missing arrival delay falls back to the departure delay
/// and vice versa.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StopTimeUpdate {
    pub stop_index: usize,
    pub arrival_delay: Option<i32>,
    pub departure_delay: Option<i32>,
    pub skipped: bool,
}

impl StopTimeUpdate {
    pub fn delay(stop_index: usize, delay: i32) -> StopTimeUpdate {
        StopTimeUpdate {
            stop_index,
            arrival_delay: Some(delay),
            departure_delay: Some(delay),
            skipped: false,
        }
    }

    pub fn skipped(stop_index: usize) -> StopTimeUpdate {
        StopTimeUpdate {
            stop_index,
            arrival_delay: None,
            departure_delay: None,
            skipped: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScheduleRelationship {
    /// a scheduled trip running with the given stop time updates
    Scheduled,
    /// a scheduled trip that will not run
    Canceled,
    /// a trip absent from the schedule, with absolute times per stop
    Added {
        arrivals: Vec<i32>,
        departures: Vec<i32>,
    },
}

/// realtime message for one trip on one service date.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TripUpdate {
    pub trip_id: TripId,
    pub service_date: NaiveDate,
    pub schedule_relationship: ScheduleRelationship,
    pub stop_time_updates: Vec<StopTimeUpdate>,
}

impl TripUpdate {
    pub fn scheduled(
        trip_id: &str,
        service_date: NaiveDate,
        stop_time_updates: Vec<StopTimeUpdate>,
    ) -> TripUpdate {
        TripUpdate {
            trip_id: TripId::new(trip_id),
            service_date,
            schedule_relationship: ScheduleRelationship::Scheduled,
            stop_time_updates,
        }
    }

    pub fn canceled(trip_id: &str, service_date: NaiveDate) -> TripUpdate {
        TripUpdate {
            trip_id: TripId::new(trip_id),
            service_date,
            schedule_relationship: ScheduleRelationship::Canceled,
            stop_time_updates: vec![],
        }
    }

    pub fn added(
        trip_id: &str,
        service_date: NaiveDate,
        arrivals: Vec<i32>,
        departures: Vec<i32>,
    ) -> TripUpdate {
        TripUpdate {
            trip_id: TripId::new(trip_id),
            service_date,
            schedule_relationship: ScheduleRelationship::Added {
                arrivals,
                departures,
            },
            stop_time_updates: vec![],
        }
    }

    /// applies the stop time updates to a copy of the scheduled times.
    ///
    /// the delay of each updated stop carries forward to every following stop
    /// until the next update. stops before the first update keep their
    /// scheduled times. the result must not go back in time anywhere along
    /// the trip, otherwise the whole update is rejected.
    pub fn propagate_delays(&self, scheduled: &TripTimes) -> Result<TripTimes, TimetableError> {
        let n_stops = scheduled.n_stops();
        let mut updates = self.stop_time_updates.iter().peekable();
        let mut started = false;
        let mut delay = 0;
        let mut patched = scheduled.clone();

        for stop in 0..n_stops {
            let update = updates.next_if(|u| u.stop_index == stop);
            if let Some(u) = update {
                started = true;
                if u.skipped {
                    patched.skip_stop(stop);
                } else {
                    let (arrival, departure) = match (u.arrival_delay, u.departure_delay) {
                        (Some(a), Some(d)) => (a, d),
                        (Some(a), None) => (a, a),
                        (None, Some(d)) => (d, d),
                        (None, None) => {
                            return Err(TimetableError::MissingDelay {
                                trip: self.trip_id.clone(),
                                index: stop,
                            })
                        }
                    };
                    patched.update_arrival_delay(stop, arrival);
                    patched.update_departure_delay(stop, departure);
                    delay = departure;
                    continue;
                }
            }
            if started {
                patched.update_arrival_delay(stop, delay);
                patched.update_departure_delay(stop, delay);
            }
        }

        if let Some(u) = updates.next() {
            // leftovers are either past the last stop or out of order
            return if u.stop_index >= n_stops {
                Err(TimetableError::StopIndexOutOfRange {
                    index: u.stop_index,
                    n_stops,
                })
            } else {
                Err(TimetableError::UnorderedStopTimeUpdates(self.trip_id.clone()))
            };
        }

        patched
            .validate_increasing()
            .map_err(|index| TimetableError::NonIncreasingTimes {
                trip: self.trip_id.clone(),
                index,
            })?;
        Ok(patched)
    }

    /// builds the trip times of an added trip on the given route.
    pub fn build_added(&self, route_id: &RouteId) -> Result<TripTimes, TimetableError> {
        let ScheduleRelationship::Added {
            arrivals,
            departures,
        } = &self.schedule_relationship
        else {
            return Err(TimetableError::MissingStopTimes(self.trip_id.clone()));
        };
        // added trips only exist in the overlay for their own date, any code will do
        let trip = Trip::new(self.trip_id.as_str(), route_id, ADDED_TRIP_SERVICE_CODE);
        let mut trip_times = TripTimes::added(Arc::new(trip), arrivals.clone(), departures.clone())?;
        for u in self.stop_time_updates.iter().filter(|u| u.skipped) {
            if u.stop_index >= trip_times.n_stops() {
                return Err(TimetableError::StopIndexOutOfRange {
                    index: u.stop_index,
                    n_stops: trip_times.n_stops(),
                });
            }
            trip_times.skip_stop(u.stop_index);
        }
        trip_times
            .validate_increasing()
            .map_err(|index| TimetableError::NonIncreasingTimes {
                trip: self.trip_id.clone(),
                index,
            })?;
        Ok(trip_times)
    }
}

/// service code given to trips that only exist in realtime data.
pub const ADDED_TRIP_SERVICE_CODE: u32 = u32::MAX;
