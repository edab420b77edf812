mod service_calendar;
mod service_day;

pub use service_calendar::ServiceCalendar;
pub use service_day::{ServiceDay, ServiceDays};
