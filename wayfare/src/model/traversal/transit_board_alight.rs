use super::Edge;
use crate::model::{
    request::RoutingContext,
    state::{CarPickupState, StateEditor, StateRef, TransitLegEnd, TraverseMode, TripBinding},
};
use wayfare_timetable::{
    pattern::{Accessibility, PatternId, StopId, TripId, TripPattern},
    realtime::ADDED_TRIP_SERVICE_CODE,
    schedule::{TransferRule, TripSearchResult, TripTimes},
};

/// boards or alights a pattern at one stop.
///
/// a forward search enters the vehicle over a board edge and leaves it over
/// an alight edge. an arrive-by search does the opposite: it enters over the
/// alight edge (finding the latest arrival) and leaves over the board edge.
pub(super) fn traverse(
    edge: &Edge,
    pattern_id: &PatternId,
    stop_index: usize,
    boarding: bool,
    s0: &StateRef,
    ctx: &RoutingContext,
) -> Option<StateRef> {
    let pattern = ctx.graph.pattern(pattern_id)?;
    let stop_vertex = if boarding { edge.from } else { edge.to };
    let (stop, _) = ctx.graph.vertex(stop_vertex).ok()?.transit_stop()?;
    let request = &ctx.request;
    if request.banned_stops.contains(stop) || request.banned_stops_hard.contains(stop) {
        return None;
    }
    let entering = boarding != s0.arrive_by();
    if entering {
        enter(edge, pattern, stop_index, stop, s0, ctx)
    } else {
        leave(edge, pattern, stop_index, stop, s0, ctx)
    }
}

struct Boarding {
    found: TripSearchResult,
    service_day_midnight: i64,
    /// vehicle departure (forward) or arrival (arrive-by), epoch seconds
    vehicle_time: i64,
    wait: i64,
}

fn enter(
    edge: &Edge,
    pattern: &TripPattern,
    stop_index: usize,
    stop: &StopId,
    s0: &StateRef,
    ctx: &RoutingContext,
) -> Option<StateRef> {
    let request = &ctx.request;
    let data = s0.data();
    let has_vehicle = data.current_mode != TraverseMode::Walk
        || data.rental_state.is_renting()
        || data.car_pickup_state == Some(CarPickupState::InCar)
        || (data.park_and_ride && !data.vehicle_parked);
    if data.on_board() || has_vehicle {
        return None;
    }
    if !request.transit_mode_allowed(pattern.mode())
        || request.banned_routes.contains(&pattern.route.id)
        || data.last_pattern.as_ref() == Some(&pattern.id)
    {
        return None;
    }

    let arrive_by = s0.arrive_by();
    let first_boarding = s0.num_boardings() == 0;
    let slack = match (arrive_by, first_boarding) {
        (false, true) => request.board_slack,
        (false, false) => (request.transfer_slack - request.alight_slack).max(0),
        (true, true) => request.alight_slack,
        (true, false) => (request.transfer_slack - request.board_slack).max(0),
    };
    let t = s0.time();
    let leg_end = data.last_leg_end.as_ref();
    let transfers = ctx.graph.transfer_table();
    let transfer_rule = |trip: &TripId| -> Option<TransferRule> {
        let leg = leg_end?;
        if arrive_by {
            transfers.lookup(stop, &leg.stop, Some(trip), &leg.trip)
        } else {
            transfers.lookup(&leg.stop, stop, Some(&leg.trip), trip)
        }
    };
    // the earliest departure (latest arrival, arrive-by) a candidate trip may
    // have, or None when the transfer onto it is forbidden
    let required_time = |trip: &TripId| -> Option<i64> {
        match transfer_rule(trip) {
            Some(TransferRule::Forbidden) => None,
            Some(TransferRule::Guaranteed) => Some(t),
            Some(TransferRule::MinimumTime(min)) => {
                let leg = leg_end?;
                if arrive_by {
                    Some(t.min(leg.time - min as i64))
                } else {
                    Some(t.max(leg.time + min as i64))
                }
            }
            Some(TransferRule::Preferred) | None => {
                Some(if arrive_by { t - slack } else { t + slack })
            }
        }
    };
    let wheelchair = &request.wheelchair;
    let trip_accessible = |tt: &TripTimes| {
        !wheelchair.enabled
            || match tt.trip().wheelchair_accessible {
                Accessibility::Possible => true,
                Accessibility::NotPossible => false,
                Accessibility::NoInformation => !wheelchair.strict,
            }
    };

    let mut best: Option<Boarding> = None;
    for day in ctx.service_days.iter() {
        let timetable = ctx.snapshot.resolve(pattern, day.service_date);
        let Ok(seconds) = i32::try_from(day.seconds_since_midnight(t)) else {
            continue;
        };
        let running = |code: u32| day.serves(code) || code == ADDED_TRIP_SERVICE_CODE;
        let codes = timetable.service_codes();
        if !timetable.temporally_viable(seconds, !arrive_by)
            || !(day.any_service_running(codes) || codes.contains(&ADDED_TRIP_SERVICE_CODE))
        {
            continue;
        }
        let mut accept = |tt: &TripTimes, time: i32| -> bool {
            if !running(tt.service_code())
                || request.banned_trips.contains(tt.trip_id())
                || !trip_accessible(tt)
            {
                return false;
            }
            let Some(required) = required_time(tt.trip_id()) else {
                return false;
            };
            let vehicle_time = day.time(time);
            if arrive_by {
                vehicle_time <= required
            } else {
                vehicle_time >= required
            }
        };
        let found = if arrive_by {
            timetable.previous_trip(stop_index, seconds, &mut accept)
        } else {
            timetable.next_trip(stop_index, seconds, &mut accept)
        };
        let Some(found) = found else {
            continue;
        };
        let vehicle_time = day.time(found.time);
        let wait = (vehicle_time - t).abs();
        if best.as_ref().map_or(true, |b| wait < b.wait) {
            best = Some(Boarding {
                found,
                service_day_midnight: day.midnight,
                vehicle_time,
                wait,
            });
        }
    }
    let boarding = best?;

    let trip_times = &boarding.found.trip_times;
    // a frequency entry repeats its template trip, so the template times are
    // shifted to the vehicle actually boarded
    let time_base = if boarding.found.frequency_based {
        let template_time = if arrive_by {
            trip_times.arrival_time(stop_index)
        } else {
            trip_times.departure_time(stop_index)
        };
        boarding.service_day_midnight + (boarding.found.time - template_time) as i64
    } else {
        boarding.service_day_midnight
    };
    let mode = pattern.mode();
    let wait_reluctance = if first_boarding {
        request.wait_at_beginning_factor
    } else {
        request.wait_reluctance
    };
    let mut weight = boarding.wait as f64 * wait_reluctance + request.board_cost_for(mode);
    if !first_boarding && transfer_rule(trip_times.trip_id()) != Some(TransferRule::Preferred) {
        weight += request.transfer_penalty;
    }
    if wheelchair.enabled && trip_times.trip().wheelchair_accessible == Accessibility::NoInformation
    {
        weight += wheelchair.unknown_accessibility_cost;
    }

    let (_, target) = edge.search_endpoints(arrive_by);
    let mut editor = StateEditor::new(s0, edge.id, target);
    editor
        .set_time(boarding.vehicle_time)
        .increment_weight(weight)
        .increment_num_boardings()
        .bind_trip(TripBinding {
            pattern: pattern.id.clone(),
            trip_times: trip_times.clone(),
            time_base,
            stop_index,
        })
        .set_transit_mode(TraverseMode::Transit(mode));
    editor.finish()
}

fn leave(
    edge: &Edge,
    pattern: &TripPattern,
    stop_index: usize,
    stop: &StopId,
    s0: &StateRef,
    ctx: &RoutingContext,
) -> Option<StateRef> {
    let binding = s0.data().trip_binding.as_ref()?;
    if binding.pattern != pattern.id || binding.stop_index != stop_index {
        return None;
    }
    let trip_times = &binding.trip_times;
    if trip_times.is_skipped(stop_index) {
        return None;
    }
    let request = &ctx.request;
    let arrive_by = s0.arrive_by();
    let slack = if arrive_by {
        request.board_slack
    } else {
        request.alight_slack
    };
    let leg_end = TransitLegEnd {
        stop: stop.clone(),
        trip: trip_times.trip_id().clone(),
        time: s0.time(),
    };
    let (_, target) = edge.search_endpoints(arrive_by);
    let mut editor = StateEditor::new(s0, edge.id, target);
    editor
        .leave_trip(pattern.id.clone(), leg_end)
        .increment_time_seconds(slack)
        .increment_weight(slack as f64 * request.wait_reluctance);
    editor.finish()
}
