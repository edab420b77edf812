use chrono::NaiveDate;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use wayfare_timetable::{
    pattern::{Route, RouteId, StopId, StopPattern, Trip, TripId, TripPattern},
    realtime::{StopTimeUpdate, TimetableResolver, TripUpdate},
    schedule::{Timetable, TripTimes},
};

fn service_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 1).expect("test invariant failed")
}

fn trip_times(id: &str, start: i32) -> TripTimes {
    let trip = Arc::new(Trip::new(id, &RouteId::new("r"), 0));
    TripTimes::from_departures(trip, vec![start, start + 120, start + 240, start + 360])
        .expect("test invariant failed: could not build trip times")
}

fn mock_pattern() -> Arc<TripPattern> {
    let stops = (0..4).map(|i| StopId::new(&format!("s{i}"))).collect();
    let mut timetable = Timetable::new(4);
    for (i, start) in [3600, 4200, 4800].iter().enumerate() {
        timetable
            .add_trip_times(trip_times(&format!("t{i}"), *start))
            .expect("test invariant failed");
    }
    let route = Route::new("r", "agency", Default::default());
    Arc::new(TripPattern::new("p", route, StopPattern::new(stops), timetable))
}

/// each reader holds one snapshot for the length of a "search" and must see the
/// same delay on every row of it, even while the writer keeps committing.
#[test]
fn test_readers_see_consistent_snapshots() {
    let _ = env_logger::builder().is_test(true).try_init();
    let pattern = mock_pattern();
    let mut resolver = TimetableResolver::new();
    let source = resolver.source();
    let done = Arc::new(AtomicBool::new(false));

    let readers = (0..4)
        .map(|_| {
            let source = source.clone();
            let pattern = pattern.clone();
            let done = done.clone();
            std::thread::spawn(move || {
                let mut last_version = 0;
                let mut n_reads = 0;
                while !done.load(Ordering::Acquire) || n_reads == 0 {
                    let snapshot = source.snapshot();
                    assert!(snapshot.version() >= last_version, "versions go backwards");
                    last_version = snapshot.version();
                    let timetable = snapshot.resolve(&pattern, service_date());
                    let delays = timetable
                        .trip_times()
                        .iter()
                        .map(|tt| tt.departure_delay(0))
                        .collect::<Vec<_>>();
                    assert!(
                        delays.windows(2).all(|w| w[0] == w[1]),
                        "mixed delays within snapshot {last_version}: {delays:?}"
                    );
                    n_reads += 1;
                }
                last_version
            })
        })
        .collect::<Vec<_>>();

    for delay in 1..=50 {
        for trip in ["t0", "t1", "t2"] {
            let update = TripUpdate::scheduled(
                trip,
                service_date(),
                vec![StopTimeUpdate::delay(0, delay)],
            );
            resolver
                .apply_trip_update(&pattern, &update)
                .expect("update should apply");
        }
        resolver.commit(false).expect("dirty resolver publishes");
    }
    done.store(true, Ordering::Release);

    for reader in readers {
        let last_version = reader.join().expect("reader thread panicked");
        assert!(last_version <= 50);
    }
    assert_eq!(source.version(), 50);
}

#[test]
fn test_update_commit_cycles_are_independent() {
    let pattern = mock_pattern();
    let mut resolver = TimetableResolver::new();

    resolver
        .update(&pattern, trip_times("t1", 4260), service_date())
        .expect("first update applies");
    let first = resolver.commit(false).expect("first commit");
    assert!(resolver.commit(false).is_none());

    resolver
        .update(&pattern, trip_times("extra", 5000), service_date())
        .expect("second update applies");
    let second = resolver.commit(false).expect("second commit");

    let t1 = TripId::new("t1");
    let extra = TripId::new("extra");
    let first_tt = first.resolve(&pattern, service_date());
    let second_tt = second.resolve(&pattern, service_date());
    assert_eq!(
        first_tt.trip_times_for(&t1).map(|tt| tt.departure_time(0)),
        Some(4260)
    );
    assert!(first_tt.trip_times_for(&extra).is_none());
    assert_eq!(
        second_tt.trip_times_for(&t1).map(|tt| tt.departure_time(0)),
        Some(4260)
    );
    assert!(second_tt.trip_times_for(&extra).is_some());
    assert_eq!(second_tt.trip_times().len(), 4);
}

#[test]
fn test_negative_dwell_reports_zero_after_commit() {
    let _ = env_logger::builder().is_test(true).try_init();
    let pattern = mock_pattern();
    let mut resolver = TimetableResolver::new();
    let trip = Arc::new(Trip::new("t0", &RouteId::new("r"), 0));
    // dwell at stop 2 computes to -5s
    let tt = TripTimes::new(
        trip,
        vec![3600, 3720, 3845, 3960],
        vec![3600, 3720, 3840, 3960],
    )
    .expect("test invariant failed");
    let result = resolver
        .update(&pattern, tt, service_date())
        .expect("negative dwell is clamped, not rejected");
    assert_eq!(result.warnings.len(), 1);

    let snapshot = resolver.commit(false).expect("commit");
    let timetable = snapshot.resolve(&pattern, service_date());
    let t0 = timetable
        .trip_times_for(&TripId::new("t0"))
        .expect("t0 present");
    assert_eq!(t0.dwell_time(2), 0);
    assert_eq!(timetable.min_dwell_time(2), Some(0));
}
