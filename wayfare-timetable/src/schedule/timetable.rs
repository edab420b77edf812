use super::{FrequencyEntry, TripTimes};
use crate::{pattern::TripId, TimetableError};
use chrono::NaiveDate;
use itertools::Itertools;
use std::sync::Arc;

/// outcome of searching a timetable for a trip at one stop.
#[derive(Clone, Debug)]
pub struct TripSearchResult {
    pub trip_times: Arc<TripTimes>,
    /// departure (forward) or arrival (backward) at the searched stop, seconds since midnight
    pub time: i32,
    /// true when the trip came from a frequency entry
    pub frequency_based: bool,
}

/// every trip of one pattern valid for some set of service dates.
///
/// a timetable is editable until [`Timetable::finish`] indexes it. finishing
/// sorts trips, computes per-hop minimum running times and per-stop minimum
/// dwell times (search lower bounds), and the `[min_time, max_time]` window in
/// which the pattern has any vehicle in service.
#[derive(Clone, Debug)]
pub struct Timetable {
    n_stops: usize,
    service_date: Option<NaiveDate>,
    trip_times: Vec<Arc<TripTimes>>,
    frequency_entries: Vec<FrequencyEntry>,
    min_running_times: Vec<i32>,
    min_dwell_times: Vec<i32>,
    /// per stop, whether the sorted trips also depart (arrive) in order there
    departures_sorted: Vec<bool>,
    arrivals_sorted: Vec<bool>,
    service_codes: Vec<u32>,
    min_time: i32,
    max_time: i32,
    finished: bool,
}

impl Timetable {
    pub fn new(n_stops: usize) -> Timetable {
        Timetable {
            n_stops,
            service_date: None,
            trip_times: vec![],
            frequency_entries: vec![],
            min_running_times: vec![],
            min_dwell_times: vec![],
            departures_sorted: vec![],
            arrivals_sorted: vec![],
            service_codes: vec![],
            min_time: i32::MAX,
            max_time: i32::MIN,
            finished: false,
        }
    }

    /// copy of this timetable bound to one service date, used for realtime overrides.
    pub fn copy_for_service_date(&self, date: NaiveDate) -> Timetable {
        let mut copy = self.clone();
        copy.service_date = Some(date);
        copy
    }

    pub fn n_stops(&self) -> usize {
        self.n_stops
    }

    /// `None` for a scheduled timetable, the date for a realtime override.
    pub fn service_date(&self) -> Option<NaiveDate> {
        self.service_date
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn trip_times(&self) -> &[Arc<TripTimes>] {
        &self.trip_times
    }

    pub fn frequency_entries(&self) -> &[FrequencyEntry] {
        &self.frequency_entries
    }

    pub fn trip_index(&self, trip_id: &TripId) -> Option<usize> {
        self.trip_times.iter().position(|tt| tt.trip_id() == trip_id)
    }

    pub fn trip_times_for(&self, trip_id: &TripId) -> Option<&Arc<TripTimes>> {
        self.trip_times.iter().find(|tt| tt.trip_id() == trip_id)
    }

    pub fn add_trip_times(&mut self, trip_times: TripTimes) -> Result<(), TimetableError> {
        self.check_stop_count(&trip_times)?;
        self.trip_times.push(Arc::new(trip_times));
        self.finished = false;
        Ok(())
    }

    pub fn add_frequency_entry(&mut self, entry: FrequencyEntry) -> Result<(), TimetableError> {
        self.check_stop_count(&entry.trip_times)?;
        self.frequency_entries.push(entry);
        self.finished = false;
        Ok(())
    }

    /// inserts trip times, replacing any row for the same trip.
    ///
    /// # Returns
    ///
    /// * true if an existing row was replaced
    pub fn set_trip_times(&mut self, trip_times: TripTimes) -> Result<bool, TimetableError> {
        self.check_stop_count(&trip_times)?;
        self.finished = false;
        match self.trip_index(trip_times.trip_id()) {
            Some(index) => {
                self.trip_times[index] = Arc::new(trip_times);
                Ok(true)
            }
            None => {
                self.trip_times.push(Arc::new(trip_times));
                Ok(false)
            }
        }
    }

    /// indexes the timetable for search. idempotent.
    pub fn finish(&mut self) {
        self.trip_times
            .sort_by_key(|tt| (tt.departure_time(0), tt.trip_id().clone()));

        let rows = self
            .trip_times
            .iter()
            .chain(self.frequency_entries.iter().map(|f| &f.trip_times))
            .filter(|tt| !tt.is_canceled())
            .collect_vec();

        let n_hops = self.n_stops.saturating_sub(1);
        self.min_running_times = (0..n_hops)
            .map(|hop| {
                let min = rows.iter().map(|tt| tt.running_time(hop)).min();
                non_negative_bound(min, "running", hop)
            })
            .collect();
        self.min_dwell_times = (0..self.n_stops)
            .map(|stop| {
                let min = rows.iter().map(|tt| tt.dwell_time(stop)).min();
                non_negative_bound(min, "dwell", stop)
            })
            .collect();

        let in_order = |time: fn(&TripTimes, usize) -> i32| {
            (0..self.n_stops)
                .map(|stop| {
                    self.trip_times
                        .iter()
                        .map(|tt| time(tt, stop))
                        .tuple_windows()
                        .all(|(a, b)| a <= b)
                })
                .collect_vec()
        };
        let departures_sorted = in_order(TripTimes::departure_time);
        let arrivals_sorted = in_order(TripTimes::arrival_time);
        self.departures_sorted = departures_sorted;
        self.arrivals_sorted = arrivals_sorted;

        let last = self.n_stops.saturating_sub(1);
        let trip_window = self
            .trip_times
            .iter()
            .filter(|tt| !tt.is_canceled())
            .map(|tt| (tt.departure_time(0), tt.arrival_time(last)));
        let frequency_window = self.frequency_entries.iter().map(|f| f.time_window());
        let (min_time, max_time) = trip_window
            .chain(frequency_window)
            .fold((i32::MAX, i32::MIN), |(lo, hi), (start, end)| {
                (lo.min(start), hi.max(end))
            });
        self.min_time = min_time;
        self.max_time = max_time;

        self.service_codes = rows
            .iter()
            .map(|tt| tt.service_code())
            .sorted()
            .dedup()
            .collect();
        self.finished = true;
    }

    pub fn min_running_time(&self, hop: usize) -> Option<i32> {
        self.min_running_times.get(hop).copied()
    }

    pub fn min_dwell_time(&self, stop: usize) -> Option<i32> {
        self.min_dwell_times.get(stop).copied()
    }

    /// earliest first departure and latest final arrival, seconds since midnight.
    /// empty timetables report `(i32::MAX, i32::MIN)`.
    pub fn time_window(&self) -> (i32, i32) {
        (self.min_time, self.max_time)
    }

    /// service codes of all non-canceled trips, sorted.
    pub fn service_codes(&self) -> &[u32] {
        &self.service_codes
    }

    /// cheap rejection before scanning trips: can any vehicle of this pattern
    /// still be boarded at or after `time` (forward) or have been alighted at or
    /// before `time` (backward)? unfinished timetables always answer true.
    pub fn temporally_viable(&self, time: i32, forward: bool) -> bool {
        if !self.finished {
            return true;
        }
        if forward {
            time <= self.max_time
        } else {
            time >= self.min_time
        }
    }

    /// finds the trip with the earliest departure at `stop` at or after `time`.
    ///
    /// canceled trips and skipped stops are never returned. `accept` receives
    /// each candidate and its departure and may reject it.
    pub fn next_trip<F>(&self, stop: usize, time: i32, mut accept: F) -> Option<TripSearchResult>
    where
        F: FnMut(&TripTimes, i32) -> bool,
    {
        if stop >= self.n_stops {
            return None;
        }
        let scheduled = if self.finished && self.departures_sorted.get(stop) == Some(&true) {
            let first = self
                .trip_times
                .partition_point(|tt| tt.departure_time(stop) < time);
            self.trip_times[first..]
                .iter()
                .filter(|tt| callable(tt, stop))
                .map(|tt| (tt, tt.departure_time(stop)))
                .find(|(tt, departure)| accept(tt, *departure))
        } else {
            self.trip_times
                .iter()
                .filter(|tt| callable(tt, stop))
                .map(|tt| (tt, tt.departure_time(stop)))
                .filter(|(tt, departure)| *departure >= time && accept(tt, *departure))
                .min_by_key(|(_, departure)| *departure)
        };
        let frequency = self
            .frequency_entries
            .iter()
            .filter(|f| callable(&f.trip_times, stop))
            .filter_map(|f| {
                f.next_departure_time(stop, time)
                    .map(|d| (&f.trip_times, d))
            })
            .filter(|(tt, departure)| accept(tt, *departure))
            .min_by_key(|(_, departure)| *departure);
        [
            scheduled.map(|(tt, d)| (tt, d, false)),
            frequency.map(|(tt, d)| (tt, d, true)),
        ]
        .into_iter()
        .flatten()
        .min_by_key(|(_, departure, _)| *departure)
        .map(|(tt, time, frequency_based)| TripSearchResult {
            trip_times: tt.clone(),
            time,
            frequency_based,
        })
    }

    /// finds the trip with the latest arrival at `stop` at or before `time`.
    pub fn previous_trip<F>(
        &self,
        stop: usize,
        time: i32,
        mut accept: F,
    ) -> Option<TripSearchResult>
    where
        F: FnMut(&TripTimes, i32) -> bool,
    {
        if stop >= self.n_stops {
            return None;
        }
        let scheduled = if self.finished && self.arrivals_sorted.get(stop) == Some(&true) {
            let end = self
                .trip_times
                .partition_point(|tt| tt.arrival_time(stop) <= time);
            self.trip_times[..end]
                .iter()
                .rev()
                .filter(|tt| callable(tt, stop))
                .map(|tt| (tt, tt.arrival_time(stop)))
                .find(|(tt, arrival)| accept(tt, *arrival))
        } else {
            self.trip_times
                .iter()
                .filter(|tt| callable(tt, stop))
                .map(|tt| (tt, tt.arrival_time(stop)))
                .filter(|(tt, arrival)| *arrival <= time && accept(tt, *arrival))
                .max_by_key(|(_, arrival)| *arrival)
        };
        let frequency = self
            .frequency_entries
            .iter()
            .filter(|f| callable(&f.trip_times, stop))
            .filter_map(|f| {
                f.previous_arrival_time(stop, time)
                    .map(|a| (&f.trip_times, a))
            })
            .filter(|(tt, arrival)| accept(tt, *arrival))
            .max_by_key(|(_, arrival)| *arrival);
        [
            scheduled.map(|(tt, a)| (tt, a, false)),
            frequency.map(|(tt, a)| (tt, a, true)),
        ]
        .into_iter()
        .flatten()
        .max_by_key(|(_, arrival, _)| *arrival)
        .map(|(tt, time, frequency_based)| TripSearchResult {
            trip_times: tt.clone(),
            time,
            frequency_based,
        })
    }

    fn check_stop_count(&self, trip_times: &TripTimes) -> Result<(), TimetableError> {
        if trip_times.n_stops() != self.n_stops {
            Err(TimetableError::StopCountMismatch {
                trip: trip_times.trip_id().clone(),
                expected: self.n_stops,
                found: trip_times.n_stops(),
            })
        } else {
            Ok(())
        }
    }
}

fn callable(tt: &TripTimes, stop: usize) -> bool {
    !tt.is_canceled() && !tt.is_skipped(stop)
}

/// a lower bound can never be negative; bad static data is clamped and logged.
fn non_negative_bound(min: Option<i32>, kind: &str, index: usize) -> i32 {
    match min {
        Some(v) if v < 0 => {
            log::warn!("minimum {kind} time {v}s at index {index} is negative, using 0s");
            0
        }
        Some(v) => v,
        None => 0,
    }
}
