use super::ServiceCalendar;
use chrono::{DateTime, Days, NaiveDate, TimeZone};
use std::collections::HashSet;

/// one candidate calendar day for matching scheduled trips to a search time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceDay {
    pub service_date: NaiveDate,
    /// epoch seconds of the service day's midnight
    pub midnight: i64,
    service_codes: HashSet<u32>,
}

impl ServiceDay {
    pub fn new(service_date: NaiveDate, midnight: i64, service_codes: HashSet<u32>) -> ServiceDay {
        ServiceDay {
            service_date,
            midnight,
            service_codes,
        }
    }

    pub fn seconds_since_midnight(&self, time: i64) -> i64 {
        time - self.midnight
    }

    /// absolute epoch seconds of a schedule time on this day
    pub fn time(&self, seconds_since_midnight: i32) -> i64 {
        self.midnight + seconds_since_midnight as i64
    }

    pub fn serves(&self, service_code: u32) -> bool {
        self.service_codes.contains(&service_code)
    }

    pub fn any_service_running(&self, service_codes: &[u32]) -> bool {
        service_codes.iter().any(|c| self.serves(*c))
    }
}

/// the service days considered by one search: yesterday, today and tomorrow
/// relative to the search start, so trips running past midnight are found.
#[derive(Clone, Debug, Default)]
pub struct ServiceDays {
    days: Vec<ServiceDay>,
}

impl ServiceDays {
    pub fn new(days: Vec<ServiceDay>) -> ServiceDays {
        ServiceDays { days }
    }

    /// builds yesterday, today and tomorrow around `time` (epoch seconds).
    pub fn around(calendar: &ServiceCalendar, time: i64) -> ServiceDays {
        let offset = calendar.offset();
        let today = DateTime::from_timestamp(time, 0)
            .map(|utc| utc.with_timezone(&offset).date_naive());
        let Some(today) = today else {
            log::warn!("search time {time} is out of range, no service days available");
            return ServiceDays::default();
        };
        let dates = [
            today.checked_sub_days(Days::new(1)),
            Some(today),
            today.checked_add_days(Days::new(1)),
        ];
        let days = dates
            .into_iter()
            .flatten()
            .filter_map(|date| {
                let midnight = offset
                    .from_local_datetime(&date.and_hms_opt(0, 0, 0)?)
                    .single()?
                    .timestamp();
                Some(ServiceDay::new(
                    date,
                    midnight,
                    calendar.service_codes_on(&date),
                ))
            })
            .collect();
        ServiceDays { days }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ServiceDay> {
        self.days.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
