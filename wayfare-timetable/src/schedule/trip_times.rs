use super::{RealTimeState, StopRealTimeState};
use crate::{
    pattern::{Trip, TripId},
    TimetableError,
};
use std::sync::Arc;

/// a negative interval that was raised to zero while normalizing realtime times.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClampedInterval {
    /// departure before arrival at a stop
    Dwell { stop_index: usize, seconds: i32 },
    /// arrival at the next stop before departure from this one
    Running { hop_index: usize, seconds: i32 },
}

/// arrival and departure times of one trip at every stop of its pattern, in
/// seconds since the midnight of the service day.
///
/// scheduled times are shared between every copy of a trip. realtime times
/// are only materialized once the trip is patched.
#[derive(Clone, Debug)]
pub struct TripTimes {
    trip: Arc<Trip>,
    scheduled_arrivals: Arc<[i32]>,
    scheduled_departures: Arc<[i32]>,
    arrivals: Option<Box<[i32]>>,
    departures: Option<Box<[i32]>>,
    stop_states: Option<Box<[StopRealTimeState]>>,
    real_time_state: RealTimeState,
}

impl TripTimes {
    /// builds scheduled trip times.
    ///
    /// # Arguments
    ///
    /// * `trip`       - the trip these times belong to
    /// * `arrivals`   - arrival time at each stop
    /// * `departures` - departure time at each stop
    pub fn new(
        trip: Arc<Trip>,
        arrivals: Vec<i32>,
        departures: Vec<i32>,
    ) -> Result<TripTimes, TimetableError> {
        if arrivals.len() != departures.len() {
            return Err(TimetableError::ArrivalDepartureMismatch(
                trip.id.clone(),
                arrivals.len(),
                departures.len(),
            ));
        }
        if arrivals.is_empty() {
            return Err(TimetableError::MissingStopTimes(trip.id.clone()));
        }
        Ok(TripTimes {
            trip,
            scheduled_arrivals: Arc::from(arrivals),
            scheduled_departures: Arc::from(departures),
            arrivals: None,
            departures: None,
            stop_states: None,
            real_time_state: RealTimeState::Scheduled,
        })
    }

    /// convenience constructor where each stop departs as soon as the vehicle arrives.
    pub fn from_departures(trip: Arc<Trip>, times: Vec<i32>) -> Result<TripTimes, TimetableError> {
        TripTimes::new(trip, times.clone(), times)
    }

    /// builds trip times for a trip that only exists in realtime data.
    pub fn added(
        trip: Arc<Trip>,
        arrivals: Vec<i32>,
        departures: Vec<i32>,
    ) -> Result<TripTimes, TimetableError> {
        let mut tt = TripTimes::new(trip, arrivals, departures)?;
        tt.real_time_state = RealTimeState::Added;
        Ok(tt)
    }

    pub fn trip(&self) -> &Arc<Trip> {
        &self.trip
    }

    pub fn trip_id(&self) -> &TripId {
        &self.trip.id
    }

    pub fn service_code(&self) -> u32 {
        self.trip.service_code
    }

    pub fn n_stops(&self) -> usize {
        self.scheduled_arrivals.len()
    }

    pub fn real_time_state(&self) -> RealTimeState {
        self.real_time_state
    }

    pub fn is_canceled(&self) -> bool {
        self.real_time_state == RealTimeState::Canceled
    }

    pub fn is_scheduled(&self) -> bool {
        self.real_time_state == RealTimeState::Scheduled
    }

    pub fn arrival_time(&self, stop: usize) -> i32 {
        match &self.arrivals {
            Some(a) => a[stop],
            None => self.scheduled_arrivals[stop],
        }
    }

    pub fn departure_time(&self, stop: usize) -> i32 {
        match &self.departures {
            Some(d) => d[stop],
            None => self.scheduled_departures[stop],
        }
    }

    pub fn scheduled_arrival_time(&self, stop: usize) -> i32 {
        self.scheduled_arrivals[stop]
    }

    pub fn scheduled_departure_time(&self, stop: usize) -> i32 {
        self.scheduled_departures[stop]
    }

    pub fn arrival_delay(&self, stop: usize) -> i32 {
        self.arrival_time(stop) - self.scheduled_arrival_time(stop)
    }

    pub fn departure_delay(&self, stop: usize) -> i32 {
        self.departure_time(stop) - self.scheduled_departure_time(stop)
    }

    /// time in motion between departing `hop` and arriving at `hop + 1`.
    pub fn running_time(&self, hop: usize) -> i32 {
        self.arrival_time(hop + 1) - self.departure_time(hop)
    }

    /// time spent standing at `stop`.
    pub fn dwell_time(&self, stop: usize) -> i32 {
        self.departure_time(stop) - self.arrival_time(stop)
    }

    pub fn stop_real_time_state(&self, stop: usize) -> StopRealTimeState {
        self.stop_states
            .as_ref()
            .and_then(|s| s.get(stop).copied())
            .unwrap_or_default()
    }

    pub fn is_skipped(&self, stop: usize) -> bool {
        self.stop_real_time_state(stop) == StopRealTimeState::Skipped
    }

    pub fn cancel(&mut self) {
        self.real_time_state = RealTimeState::Canceled;
    }

    pub fn skip_stop(&mut self, stop: usize) {
        self.set_stop_state(stop, StopRealTimeState::Skipped);
        self.mark_updated();
    }

    pub fn update_arrival_time(&mut self, stop: usize, time: i32) {
        self.materialize()[stop] = time;
        self.set_stop_state(stop, StopRealTimeState::Updated);
        self.mark_updated();
    }

    pub fn update_departure_time(&mut self, stop: usize, time: i32) {
        self.materialize();
        if let Some(d) = self.departures.as_mut() {
            d[stop] = time;
        }
        self.set_stop_state(stop, StopRealTimeState::Updated);
        self.mark_updated();
    }

    pub fn update_arrival_delay(&mut self, stop: usize, delay: i32) {
        let time = self.scheduled_arrival_time(stop) + delay;
        self.update_arrival_time(stop, time);
    }

    pub fn update_departure_delay(&mut self, stop: usize, delay: i32) {
        let time = self.scheduled_departure_time(stop) + delay;
        self.update_departure_time(stop, time);
    }

    /// raises every negative dwell and running time to zero, walking the stops in
    /// order so a clamp at one stop is seen by the next interval.
    ///
    /// # Returns
    ///
    /// * each interval that had to be clamped, with its original (negative) length
    pub fn clamp_negative_intervals(&mut self) -> Vec<ClampedInterval> {
        let mut clamped = vec![];
        for stop in 0..self.n_stops() {
            let dwell = self.dwell_time(stop);
            if dwell < 0 {
                clamped.push(ClampedInterval::Dwell {
                    stop_index: stop,
                    seconds: dwell,
                });
                let arrival = self.arrival_time(stop);
                self.materialize();
                if let Some(d) = self.departures.as_mut() {
                    d[stop] = arrival;
                }
            }
            if stop + 1 < self.n_stops() {
                let running = self.running_time(stop);
                if running < 0 {
                    clamped.push(ClampedInterval::Running {
                        hop_index: stop,
                        seconds: running,
                    });
                    let departure = self.departure_time(stop);
                    self.materialize()[stop + 1] = departure;
                }
            }
        }
        clamped
    }

    /// confirms that times never decrease along the trip.
    ///
    /// # Returns
    ///
    /// * the first stop index where an arrival or departure is earlier than the time before it
    pub fn validate_increasing(&self) -> Result<(), usize> {
        let mut previous = i32::MIN;
        for stop in 0..self.n_stops() {
            let arrival = self.arrival_time(stop);
            let departure = self.departure_time(stop);
            if arrival < previous || departure < arrival {
                return Err(stop);
            }
            previous = departure;
        }
        Ok(())
    }

    /// copies realtime arrays from the scheduled ones on first write and
    /// returns the realtime arrivals.
    fn materialize(&mut self) -> &mut [i32] {
        if self.departures.is_none() {
            self.departures = Some(self.scheduled_departures.iter().copied().collect());
        }
        self.arrivals
            .get_or_insert_with(|| self.scheduled_arrivals.iter().copied().collect())
    }

    fn set_stop_state(&mut self, stop: usize, state: StopRealTimeState) {
        let n = self.n_stops();
        let states = self
            .stop_states
            .get_or_insert_with(|| vec![StopRealTimeState::Scheduled; n].into_boxed_slice());
        if let Some(s) = states.get_mut(stop) {
            *s = state;
        }
    }

    fn mark_updated(&mut self) {
        if self.real_time_state == RealTimeState::Scheduled {
            self.real_time_state = RealTimeState::Updated;
        }
    }
}

#[cfg(test)]
mod test {
    use super::{ClampedInterval, TripTimes};
    use crate::pattern::{RouteId, Trip};
    use crate::schedule::RealTimeState;
    use std::sync::Arc;

    fn mock_trip_times() -> TripTimes {
        let trip = Arc::new(Trip::new("t1", &RouteId::new("r1"), 0));
        TripTimes::new(trip, vec![0, 100, 200, 300], vec![0, 110, 220, 300])
            .expect("test invariant failed: could not build trip times")
    }

    #[test]
    fn test_running_and_dwell() {
        let tt = mock_trip_times();
        assert_eq!(tt.running_time(0), 100);
        assert_eq!(tt.running_time(1), 90);
        assert_eq!(tt.dwell_time(1), 10);
        assert_eq!(tt.dwell_time(2), 20);
        assert!(tt.is_scheduled());
    }

    #[test]
    fn test_delay_keeps_schedule() {
        let mut tt = mock_trip_times();
        tt.update_arrival_delay(2, 60);
        assert_eq!(tt.arrival_time(2), 260);
        assert_eq!(tt.scheduled_arrival_time(2), 200);
        assert_eq!(tt.arrival_delay(2), 60);
        assert_eq!(tt.real_time_state(), RealTimeState::Updated);
        // the unpatched departure now precedes the arrival
        assert_eq!(tt.dwell_time(2), -40);
        assert_eq!(tt.validate_increasing(), Err(2));
    }

    #[test]
    fn test_clamp_negative_dwell() {
        let mut tt = mock_trip_times();
        tt.update_arrival_time(2, 225);
        let clamped = tt.clamp_negative_intervals();
        assert_eq!(
            clamped,
            vec![ClampedInterval::Dwell {
                stop_index: 2,
                seconds: -5
            }]
        );
        assert_eq!(tt.dwell_time(2), 0);
        assert_eq!(tt.departure_time(2), 225);
        assert!(tt.validate_increasing().is_ok());
    }

    #[test]
    fn test_clamp_negative_running_cascades() {
        let mut tt = mock_trip_times();
        tt.update_departure_time(1, 250);
        let clamped = tt.clamp_negative_intervals();
        assert_eq!(
            clamped,
            vec![
                ClampedInterval::Running {
                    hop_index: 1,
                    seconds: -50
                },
                ClampedInterval::Dwell {
                    stop_index: 2,
                    seconds: -30
                }
            ]
        );
        assert_eq!(tt.arrival_time(2), 250);
        assert_eq!(tt.departure_time(2), 250);
        assert!(tt.validate_increasing().is_ok());
    }

    #[test]
    fn test_mismatched_lengths_rejected() {
        let trip = Arc::new(Trip::new("t1", &RouteId::new("r1"), 0));
        let result = TripTimes::new(trip, vec![0, 1], vec![0]);
        assert!(result.is_err());
    }
}
