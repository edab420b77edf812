use super::{
    snapshot::TimetableOverlay, ScheduleRelationship, TimetableSnapshot, TimetableSnapshotSource,
    TripUpdate, UpdateSuccess, UpdateWarning,
};
use crate::{
    pattern::{PatternId, TripPattern},
    schedule::{Timetable, TripTimes},
    TimetableError,
};
use chrono::NaiveDate;
use rayon::prelude::*;
use std::{collections::HashSet, sync::Arc};

/// single writer of realtime timetable data.
///
/// updates land in a working copy of the per-(pattern, date) timetables.
/// timetables already published in a snapshot are shared with it, and the
/// first write to one of them in a cycle copies it (`Arc::make_mut`), so
/// readers holding an older snapshot never see a change. [`Self::commit`]
/// finishes the changed timetables and publishes a new snapshot through the
/// [`TimetableSnapshotSource`] with an atomic swap.
///
/// all writes take `&mut self`, so there is exactly one writer at a time.
#[derive(Debug)]
pub struct TimetableResolver {
    buffer: TimetableOverlay,
    dirty: HashSet<(PatternId, NaiveDate)>,
    /// set when overlays were removed since the last commit
    removed: bool,
    version: u64,
    source: TimetableSnapshotSource,
}

impl Default for TimetableResolver {
    fn default() -> Self {
        TimetableResolver::new()
    }
}

impl TimetableResolver {
    pub fn new() -> TimetableResolver {
        TimetableResolver::with_source(TimetableSnapshotSource::new())
    }

    /// resolver publishing into an existing source, continuing its version numbers.
    pub fn with_source(source: TimetableSnapshotSource) -> TimetableResolver {
        let current = source.snapshot();
        TimetableResolver {
            buffer: current.timetables().clone(),
            dirty: HashSet::new(),
            removed: false,
            version: current.version(),
            source,
        }
    }

    /// a reader handle for search threads.
    pub fn source(&self) -> TimetableSnapshotSource {
        self.source.clone()
    }

    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty() || self.removed
    }

    /// the timetable that would be published for (pattern, date) if committed now.
    pub fn resolve<'a>(&'a self, pattern: &'a TripPattern, service_date: NaiveDate) -> &'a Arc<Timetable> {
        self.buffer
            .get(&pattern.id)
            .and_then(|by_date| by_date.get(&service_date))
            .unwrap_or_else(|| pattern.scheduled_timetable())
    }

    /// inserts or replaces the times of one trip of `pattern` on `service_date`.
    ///
    /// negative dwell or running times are raised to zero. each repair is
    /// logged and returned as a warning; the update is still applied.
    pub fn update(
        &mut self,
        pattern: &TripPattern,
        mut trip_times: TripTimes,
        service_date: NaiveDate,
    ) -> Result<UpdateSuccess, TimetableError> {
        check_stop_count(pattern, &trip_times)?;
        let warnings = trip_times
            .clamp_negative_intervals()
            .into_iter()
            .map(|interval| UpdateWarning {
                trip: trip_times.trip_id().clone(),
                service_date,
                interval,
            })
            .collect::<Vec<_>>();
        for warning in warnings.iter() {
            log::warn!("{warning}");
        }
        let replaced = self.write(pattern, trip_times, service_date)?;
        Ok(UpdateSuccess { replaced, warnings })
    }

    /// applies a realtime trip message. delays are propagated onto the
    /// scheduled times of the trip; a message that leaves the trip going back
    /// in time is rejected as a whole and nothing is written.
    pub fn apply_trip_update(
        &mut self,
        pattern: &TripPattern,
        update: &TripUpdate,
    ) -> Result<UpdateSuccess, TimetableError> {
        match self.write_trip_update(pattern, update) {
            Ok(replaced) => Ok(UpdateSuccess {
                replaced,
                warnings: vec![],
            }),
            Err(e) => {
                log::warn!(
                    "rejected realtime update for trip {} on pattern {}: {e}",
                    update.trip_id,
                    pattern.id
                );
                Err(e)
            }
        }
    }

    /// finishes every changed timetable and publishes a new snapshot.
    ///
    /// # Arguments
    ///
    /// * `force` - publish a new version even when nothing changed
    ///
    /// # Returns
    ///
    /// * the published snapshot, or `None` if there was nothing to publish
    pub fn commit(&mut self, force: bool) -> Option<Arc<TimetableSnapshot>> {
        if !force && !self.is_dirty() {
            return None;
        }
        let n_dirty = self.dirty.len();
        self.buffer.par_iter_mut().for_each(|(_, by_date)| {
            by_date
                .values_mut()
                .filter(|tt| !tt.is_finished())
                .for_each(|tt| Arc::make_mut(tt).finish());
        });
        self.version += 1;
        let snapshot = Arc::new(TimetableSnapshot::new(self.version, self.buffer.clone()));
        self.source.publish(snapshot.clone());
        self.dirty.clear();
        self.removed = false;
        log::debug!(
            "committed timetable snapshot version {} with {} updated timetables",
            self.version,
            n_dirty
        );
        Some(snapshot)
    }

    /// drops realtime data for service dates before `cutoff`.
    ///
    /// # Returns
    ///
    /// * true if anything was removed; the removal is published on the next commit
    pub fn purge_expired_data(&mut self, cutoff: NaiveDate) -> bool {
        let mut n_removed = 0;
        self.buffer.retain(|_, by_date| {
            let before = by_date.len();
            by_date.retain(|date, _| *date >= cutoff);
            n_removed += before - by_date.len();
            !by_date.is_empty()
        });
        self.dirty.retain(|(_, date)| *date >= cutoff);
        if n_removed > 0 {
            log::info!("purged {n_removed} realtime timetables for service dates before {cutoff}");
            self.removed = true;
        }
        n_removed > 0
    }

    /// drops all realtime data; every pattern resolves to its schedule after the next commit.
    pub fn clear(&mut self) {
        if !self.buffer.is_empty() {
            self.removed = true;
        }
        self.buffer.clear();
        self.dirty.clear();
    }

    fn write_trip_update(
        &mut self,
        pattern: &TripPattern,
        update: &TripUpdate,
    ) -> Result<bool, TimetableError> {
        let date = update.service_date;
        match &update.schedule_relationship {
            ScheduleRelationship::Scheduled => {
                let scheduled = scheduled_trip_times(pattern, update)?;
                let patched = update.propagate_delays(scheduled)?;
                self.write(pattern, patched, date)
            }
            ScheduleRelationship::Canceled => {
                let mut canceled = scheduled_trip_times(pattern, update)?.clone();
                canceled.cancel();
                self.write(pattern, canceled, date)
            }
            ScheduleRelationship::Added { .. } => {
                // resending an added trip replaces it, shadowing a scheduled one does not
                if scheduled_trip_times(pattern, update).is_ok() {
                    return Err(TimetableError::TripAlreadyPresent(
                        update.trip_id.clone(),
                        date,
                    ));
                }
                let added = update.build_added(&pattern.route.id)?;
                check_stop_count(pattern, &added)?;
                self.write(pattern, added, date)
            }
        }
    }

    fn write(
        &mut self,
        pattern: &TripPattern,
        trip_times: TripTimes,
        service_date: NaiveDate,
    ) -> Result<bool, TimetableError> {
        let timetable = self
            .buffer
            .entry(pattern.id.clone())
            .or_default()
            .entry(service_date)
            .or_insert_with(|| {
                Arc::new(
                    pattern
                        .scheduled_timetable()
                        .copy_for_service_date(service_date),
                )
            });
        let replaced = Arc::make_mut(timetable).set_trip_times(trip_times)?;
        self.dirty.insert((pattern.id.clone(), service_date));
        Ok(replaced)
    }
}

fn scheduled_trip_times<'a>(
    pattern: &'a TripPattern,
    update: &TripUpdate,
) -> Result<&'a TripTimes, TimetableError> {
    pattern
        .scheduled_timetable()
        .trip_times_for(&update.trip_id)
        .map(|tt| tt.as_ref())
        .ok_or_else(|| TimetableError::TripNotFound(update.trip_id.clone(), pattern.id.clone()))
}

fn check_stop_count(pattern: &TripPattern, trip_times: &TripTimes) -> Result<(), TimetableError> {
    if trip_times.n_stops() != pattern.n_stops() {
        Err(TimetableError::StopCountMismatch {
            trip: trip_times.trip_id().clone(),
            expected: pattern.n_stops(),
            found: trip_times.n_stops(),
        })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::TimetableResolver;
    use crate::pattern::{Route, RouteId, StopId, StopPattern, Trip, TripId, TripPattern};
    use crate::realtime::{StopTimeUpdate, TripUpdate};
    use crate::schedule::{Timetable, TripTimes};
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).expect("test invariant failed")
    }

    fn trip_times(id: &str, times: Vec<i32>) -> TripTimes {
        let trip = Arc::new(Trip::new(id, &RouteId::new("r1"), 0));
        TripTimes::from_departures(trip, times).expect("test invariant failed")
    }

    fn mock_pattern() -> TripPattern {
        let stops = ["a", "b", "c"].iter().map(|s| StopId::new(s)).collect();
        let mut timetable = Timetable::new(3);
        timetable
            .add_trip_times(trip_times("t1", vec![100, 200, 300]))
            .expect("test invariant failed");
        timetable
            .add_trip_times(trip_times("t2", vec![1100, 1200, 1300]))
            .expect("test invariant failed");
        let route = Route::new("r1", "agency", Default::default());
        TripPattern::new("p1", route, StopPattern::new(stops), timetable)
    }

    #[test]
    fn test_no_op_commit() {
        let mut resolver = TimetableResolver::new();
        assert!(!resolver.is_dirty());
        assert!(resolver.commit(false).is_none());
        let forced = resolver.commit(true).expect("forced commit publishes");
        assert_eq!(forced.version(), 1);
    }

    #[test]
    fn test_update_then_commit() {
        let pattern = mock_pattern();
        let mut resolver = TimetableResolver::new();
        let source = resolver.source();
        let before = source.snapshot();

        let result = resolver
            .update(&pattern, trip_times("t1", vec![160, 260, 360]), date(2))
            .expect("update should apply");
        assert!(result.replaced);
        assert!(!result.has_warnings());
        let snapshot = resolver.commit(false).expect("dirty resolver publishes");

        let resolved = snapshot.resolve(&pattern, date(2));
        let t1 = resolved
            .trip_times_for(&TripId::new("t1"))
            .expect("t1 present");
        assert_eq!(t1.departure_time(0), 160);
        assert!(resolved.is_finished());
        // other dates and older snapshots still see the schedule
        assert!(Arc::ptr_eq(
            snapshot.resolve(&pattern, date(3)),
            pattern.scheduled_timetable()
        ));
        assert!(Arc::ptr_eq(
            before.resolve(&pattern, date(2)),
            pattern.scheduled_timetable()
        ));
        assert_eq!(source.version(), 1);
    }

    #[test]
    fn test_published_timetable_is_not_mutated() {
        let pattern = mock_pattern();
        let mut resolver = TimetableResolver::new();
        resolver
            .update(&pattern, trip_times("t1", vec![160, 260, 360]), date(2))
            .expect("update should apply");
        let first = resolver.commit(false).expect("first commit");

        resolver
            .update(&pattern, trip_times("t1", vec![190, 290, 390]), date(2))
            .expect("second update should apply");
        let second = resolver.commit(false).expect("second commit");

        let old = first
            .resolve(&pattern, date(2))
            .trip_times_for(&TripId::new("t1"))
            .expect("t1 present");
        let new = second
            .resolve(&pattern, date(2))
            .trip_times_for(&TripId::new("t1"))
            .expect("t1 present");
        assert_eq!(old.departure_time(0), 160);
        assert_eq!(new.departure_time(0), 190);
        assert_eq!(second.version(), 2);
    }

    #[test]
    fn test_negative_dwell_clamped_with_warning() {
        let pattern = mock_pattern();
        let mut resolver = TimetableResolver::new();
        let trip = Arc::new(Trip::new("t1", &RouteId::new("r1"), 0));
        let tt = TripTimes::new(trip, vec![100, 200, 305], vec![100, 200, 300])
            .expect("test invariant failed");
        let result = resolver
            .update(&pattern, tt, date(2))
            .expect("clamped update is accepted");
        assert_eq!(result.warnings.len(), 1);
        let snapshot = resolver.commit(false).expect("commit");
        let t1 = snapshot
            .resolve(&pattern, date(2))
            .trip_times_for(&TripId::new("t1"))
            .expect("t1 present")
            .clone();
        assert_eq!(t1.dwell_time(2), 0);
    }

    #[test]
    fn test_trip_update_cancel_and_reject() {
        let pattern = mock_pattern();
        let mut resolver = TimetableResolver::new();
        resolver
            .apply_trip_update(&pattern, &TripUpdate::canceled("t2", date(2)))
            .expect("cancel applies");
        let missing = resolver.apply_trip_update(
            &pattern,
            &TripUpdate::scheduled("nope", date(2), vec![StopTimeUpdate::delay(0, 10)]),
        );
        assert!(missing.is_err());
        let snapshot = resolver.commit(false).expect("commit");
        let timetable = snapshot.resolve(&pattern, date(2));
        assert!(timetable
            .next_trip(0, 500, |_, _| true)
            .is_none());
    }

    #[test]
    fn test_added_trip_and_duplicate() {
        let pattern = mock_pattern();
        let mut resolver = TimetableResolver::new();
        resolver
            .apply_trip_update(
                &pattern,
                &TripUpdate::added("x1", date(2), vec![500, 600, 700], vec![500, 600, 700]),
            )
            .expect("added trip applies");
        let duplicate = resolver.apply_trip_update(
            &pattern,
            &TripUpdate::added("t1", date(2), vec![0, 1, 2], vec![0, 1, 2]),
        );
        assert!(duplicate.is_err());
        let snapshot = resolver.commit(false).expect("commit");
        let next = snapshot
            .resolve(&pattern, date(2))
            .next_trip(0, 400, |_, _| true)
            .expect("added trip is searchable");
        assert_eq!(next.trip_times.trip_id(), &TripId::new("x1"));
    }

    #[test]
    fn test_purge_and_clear() {
        let pattern = mock_pattern();
        let mut resolver = TimetableResolver::new();
        for day in [1, 2, 3] {
            resolver
                .update(&pattern, trip_times("t1", vec![160, 260, 360]), date(day))
                .expect("update should apply");
        }
        resolver.commit(false).expect("commit");
        assert!(resolver.purge_expired_data(date(3)));
        let snapshot = resolver.commit(false).expect("purge is published");
        assert_eq!(snapshot.service_dates(&pattern.id), vec![date(3)]);

        resolver.clear();
        let snapshot = resolver.commit(false).expect("clear is published");
        assert!(!snapshot.has_realtime_data());
        assert!(resolver.commit(false).is_none());
    }
}
