pub mod pattern;
pub mod realtime;
pub mod schedule;
pub mod service;
mod timetable_error;

pub use timetable_error::TimetableError;
