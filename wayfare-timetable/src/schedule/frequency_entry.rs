use super::TripTimes;
use std::sync::Arc;

/// headway-based service: a template trip repeated every `headway_secs`
/// between `start_time` and `end_time` (first-stop departure times).
///
/// with `exact_times` the vehicles depart on the headway grid anchored at
/// `start_time`. without it only the headway is known, so a rider is assumed
/// to wait one full headway.
#[derive(Clone, Debug)]
pub struct FrequencyEntry {
    pub start_time: i32,
    pub end_time: i32,
    pub headway_secs: i32,
    pub exact_times: bool,
    pub trip_times: Arc<TripTimes>,
}

impl FrequencyEntry {
    pub fn new(
        trip_times: Arc<TripTimes>,
        start_time: i32,
        end_time: i32,
        headway_secs: i32,
        exact_times: bool,
    ) -> FrequencyEntry {
        FrequencyEntry {
            start_time,
            end_time,
            headway_secs: headway_secs.max(1),
            exact_times,
            trip_times,
        }
    }

    fn departure_offset(&self, stop: usize) -> i32 {
        self.trip_times.departure_time(stop) - self.trip_times.departure_time(0)
    }

    fn arrival_offset(&self, stop: usize) -> i32 {
        self.trip_times.arrival_time(stop) - self.trip_times.departure_time(0)
    }

    /// first departure at `stop` at or after `time`, if the entry still runs.
    pub fn next_departure_time(&self, stop: usize, time: i32) -> Option<i32> {
        let offset = self.departure_offset(stop);
        let begin = self.start_time + offset;
        let end = self.end_time + offset;
        if time > end {
            return None;
        }
        if self.exact_times {
            let departure = if time <= begin {
                begin
            } else {
                let n = (time - begin + self.headway_secs - 1) / self.headway_secs;
                begin + n * self.headway_secs
            };
            (departure <= end).then_some(departure)
        } else {
            Some(time.max(begin) + self.headway_secs)
        }
    }

    /// last arrival at `stop` at or before `time`, if the entry has started running.
    pub fn previous_arrival_time(&self, stop: usize, time: i32) -> Option<i32> {
        let offset = self.arrival_offset(stop);
        let begin = self.start_time + offset;
        let end = self.end_time + offset;
        if time < begin {
            return None;
        }
        if self.exact_times {
            let latest = time.min(end);
            let n = (latest - begin) / self.headway_secs;
            Some(begin + n * self.headway_secs)
        } else {
            Some(time.min(end) - self.headway_secs)
        }
    }

    /// earliest first-stop departure and latest last-stop arrival covered by this entry.
    pub fn time_window(&self) -> (i32, i32) {
        let last = self.trip_times.n_stops() - 1;
        (self.start_time, self.end_time + self.arrival_offset(last))
    }
}
