use chrono::{FixedOffset, NaiveDate, Offset, Utc};
use std::collections::{HashMap, HashSet};

/// which service codes run on which dates, in the feed's local time zone.
#[derive(Clone, Debug)]
pub struct ServiceCalendar {
    offset: FixedOffset,
    codes_by_date: HashMap<NaiveDate, HashSet<u32>>,
}

impl ServiceCalendar {
    pub fn new(offset: FixedOffset) -> ServiceCalendar {
        ServiceCalendar {
            offset,
            codes_by_date: HashMap::new(),
        }
    }

    pub fn utc() -> ServiceCalendar {
        ServiceCalendar::new(Utc.fix())
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn add_service(&mut self, date: NaiveDate, service_code: u32) {
        self.codes_by_date
            .entry(date)
            .or_default()
            .insert(service_code);
    }

    pub fn service_codes_on(&self, date: &NaiveDate) -> HashSet<u32> {
        self.codes_by_date.get(date).cloned().unwrap_or_default()
    }
}
