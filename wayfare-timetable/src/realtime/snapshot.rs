use crate::{
    pattern::{PatternId, TripPattern},
    schedule::Timetable,
};
use chrono::NaiveDate;
use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

pub(crate) type TimetableOverlay = HashMap<PatternId, BTreeMap<NaiveDate, Arc<Timetable>>>;

/// immutable, versioned view of every realtime-updated timetable.
///
/// a snapshot has no mutating methods. timetables it holds are shared with the
/// resolver, which copies a timetable before changing it, so a published
/// snapshot never observes later updates.
#[derive(Clone, Debug, Default)]
pub struct TimetableSnapshot {
    version: u64,
    timetables: TimetableOverlay,
}

impl TimetableSnapshot {
    /// version 0 snapshot with no realtime data; every pattern resolves to its schedule.
    pub fn empty() -> TimetableSnapshot {
        TimetableSnapshot::default()
    }

    pub(crate) fn new(version: u64, timetables: TimetableOverlay) -> TimetableSnapshot {
        TimetableSnapshot {
            version,
            timetables,
        }
    }

    pub(crate) fn timetables(&self) -> &TimetableOverlay {
        &self.timetables
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// the timetable to search for `pattern` on `service_date`: the realtime
    /// override for that date if there is one, otherwise the scheduled timetable.
    pub fn resolve<'a>(&'a self, pattern: &'a TripPattern, service_date: NaiveDate) -> &'a Arc<Timetable> {
        self.realtime_timetable(&pattern.id, service_date)
            .unwrap_or_else(|| pattern.scheduled_timetable())
    }

    pub fn realtime_timetable(
        &self,
        pattern_id: &PatternId,
        service_date: NaiveDate,
    ) -> Option<&Arc<Timetable>> {
        self.timetables.get(pattern_id)?.get(&service_date)
    }

    pub fn has_realtime_data(&self) -> bool {
        !self.timetables.is_empty()
    }

    /// service dates with realtime data for a pattern, in date order.
    pub fn service_dates(&self, pattern_id: &PatternId) -> Vec<NaiveDate> {
        self.timetables
            .get(pattern_id)
            .map(|by_date| by_date.keys().copied().collect())
            .unwrap_or_default()
    }
}
