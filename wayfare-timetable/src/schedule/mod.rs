mod frequency_entry;
mod real_time_state;
mod timetable;
mod transfer_table;
mod trip_times;

pub use frequency_entry::FrequencyEntry;
pub use real_time_state::{RealTimeState, StopRealTimeState};
pub use timetable::{Timetable, TripSearchResult};
pub use transfer_table::{TransferRule, TransferTable};
pub use trip_times::{ClampedInterval, TripTimes};
