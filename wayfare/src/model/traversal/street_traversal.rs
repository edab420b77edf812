use super::{Edge, StreetEdge};
use crate::model::{
    graph::StreetTraversalPermission,
    request::RoutingContext,
    state::{CarPickupState, StateEditor, StateRef, TraverseMode, Traversed},
};

/// traverses a street, forking when a kiss-and-ride traveler may get in or
/// out of the car at the start of this street.
pub(super) fn traverse(
    edge: &Edge,
    street: &StreetEdge,
    back_edge: Option<&Edge>,
    s0: &StateRef,
    ctx: &RoutingContext,
) -> Traversed {
    if s0.on_board() {
        return Traversed::Pruned;
    }
    let (_, target) = edge.search_endpoints(s0.arrive_by());
    let editor = StateEditor::new(s0, edge.id, target);
    let Some(pickup_state) = s0.car_pickup_state() else {
        return traverse_in_mode(edge, street, back_edge, s0, editor, ctx).into();
    };

    let switch = match (s0.arrive_by(), pickup_state) {
        (false, CarPickupState::WalkToPickup) | (true, CarPickupState::WalkFromDropOff) => {
            Some((CarPickupState::InCar, TraverseMode::Car))
        }
        (false, CarPickupState::InCar) => {
            Some((CarPickupState::WalkFromDropOff, TraverseMode::Walk))
        }
        (true, CarPickupState::InCar) => Some((CarPickupState::WalkToPickup, TraverseMode::Walk)),
        _ => None,
    };
    let switched = switch.map(|(next, mode)| {
        let options = &ctx.request.car_pickup;
        let mut fork = editor.fork();
        fork.set_car_pickup_state(next)
            .set_mode(mode)
            .increment_time_seconds(options.pickup_time)
            .increment_weight(options.pickup_cost);
        fork
    });
    let stay = traverse_in_mode(edge, street, back_edge, s0, editor, ctx);
    let switched = switched.and_then(|fork| traverse_in_mode(edge, street, back_edge, s0, fork, ctx));
    Traversed::from_pair(stay, switched)
}

/// moves along the street with the editor's current mode.
fn traverse_in_mode(
    edge: &Edge,
    street: &StreetEdge,
    back_edge: Option<&Edge>,
    s0: &StateRef,
    mut editor: StateEditor,
    ctx: &RoutingContext,
) -> Option<StateRef> {
    let request = &ctx.request;
    let arrive_by = s0.arrive_by();
    let mode = editor.data().current_mode;
    let (_, target) = edge.search_endpoints(arrive_by);
    let barrier = ctx.graph.vertex(target).ok()?.permission();
    let walking_bike = walking_bike(street, barrier, mode)?;
    let effective_mode = if walking_bike { TraverseMode::Walk } else { mode };
    let on_foot = effective_mode == TraverseMode::Walk;

    let mut reluctance = 1.0;
    if on_foot && street.stairs {
        reluctance *= request.stairs_reluctance;
    }
    let wheelchair = &request.wheelchair;
    if wheelchair.enabled && on_foot {
        if street.stairs {
            return None;
        }
        if !street.wheelchair_accessible {
            if wheelchair.strict {
                return None;
            }
            reluctance *= wheelchair.inaccessible_street_reluctance;
        }
        let excess = street.max_slope() - wheelchair.max_slope;
        if excess > 0.0 {
            if wheelchair.strict {
                return None;
            }
            reluctance *= 1.0 + excess * 100.0 * wheelchair.slope_exceeded_reluctance;
        }
    }

    if street.no_thru_traffic.allows(effective_mode) {
        let from_through_street = back_edge
            .and_then(Edge::street)
            .is_some_and(|back| !back.no_thru_traffic.allows(effective_mode));
        if !s0.entered_no_thru() && from_through_street {
            editor.set_entered_no_thru();
        }
    } else if s0.entered_no_thru() {
        return None;
    }

    let length = street.length_m;
    let elevation = street.elevation.filter(|e| !e.flattened);
    let speed = street.speed(request, mode, walking_bike);
    if speed.is_nan() || speed <= 0.0 {
        return None;
    }
    let (seconds, weight) = match effective_mode {
        TraverseMode::Walk => {
            let walk_factor = elevation.map(|e| e.effective_walk_factor).unwrap_or(1.0);
            let seconds = length * walk_factor / speed;
            let weight = seconds * request.street_reluctance(mode, walking_bike) * reluctance;
            (seconds, weight)
        }
        TraverseMode::Bicycle | TraverseMode::Scooter => {
            let (speed_factor, work_factor) = elevation
                .map(|e| (e.slope_speed_factor, e.slope_work_factor))
                .unwrap_or((1.0, 1.0));
            let seconds = length * speed_factor / speed;
            let effective_length = request.bicycle_optimize.effective_length(
                length,
                street.bicycle_safety_factor,
                work_factor,
                speed_factor,
            );
            (seconds, effective_length / speed * request.bike_reluctance)
        }
        TraverseMode::Car => {
            let seconds = length / speed;
            (seconds, seconds * request.car_reluctance)
        }
        TraverseMode::Transit(_) => return None,
    };
    if !seconds.is_finite() {
        return None;
    }

    if let Some(back) = back_edge {
        if let Some(back_street) = back.street() {
            let back_walking_bike = s0.data().back_walking_bike;
            if mode.is_cycling() && walking_bike != back_walking_bike {
                editor
                    .increment_time_seconds(request.bike_switch_time)
                    .increment_weight(request.bike_switch_cost);
            }
            let back_mode = s0.back_mode().unwrap_or(mode);
            let back_effective = if back_walking_bike {
                TraverseMode::Walk
            } else {
                back_mode
            };
            let this_speed = speed;
            let back_speed = back_street.speed(request, back_mode, back_walking_bike);
            // the same physical turn in both search directions: from the
            // earlier street into the later one, with the later street's mode
            let turn = if arrive_by {
                Turn {
                    from: (edge, street),
                    to: (back, back_street),
                    mode: back_effective,
                    from_speed: this_speed,
                    to_speed: back_speed,
                }
            } else {
                Turn {
                    from: (back, back_street),
                    to: (edge, street),
                    mode: effective_mode,
                    from_speed: back_speed,
                    to_speed: this_speed,
                }
            };
            if turn.is_restricted(ctx) {
                return None;
            }
            let vertex = ctx.graph.vertex(s0.vertex()).ok()?;
            let turn_cost = ctx.graph.intersection_cost_model().traversal_cost(
                vertex,
                turn.from.1,
                turn.to.1,
                turn.mode,
                turn.from_speed,
                turn.to_speed,
            );
            editor
                .increment_time_seconds(turn_cost.round() as i64)
                .increment_weight(turn_cost * request.turn_reluctance);
        }
    }

    editor
        .increment_time_seconds(seconds.round() as i64)
        .increment_weight(weight + street.surcharge(effective_mode))
        .set_back_mode(mode)
        .set_back_walking_bike(walking_bike);
    if on_foot {
        editor.increment_walk_distance(length);
    }
    if s0.num_boardings() == 0 {
        let elapsed = (editor.time() - s0.time()).abs();
        editor.increment_pre_transit_time(elapsed);
    }
    editor.finish()
}

/// whether a cyclist must walk the bike here; `None` if the mode cannot pass at all.
fn walking_bike(
    street: &StreetEdge,
    barrier: StreetTraversalPermission,
    mode: TraverseMode,
) -> Option<bool> {
    let allowed = street.permission.intersection(barrier);
    if allowed.allows(mode) && !(mode.is_cycling() && street.stairs) {
        Some(false)
    } else if mode.is_cycling() && allowed.allows(TraverseMode::Walk) {
        Some(true)
    } else {
        None
    }
}

struct Turn<'a> {
    from: (&'a Edge, &'a StreetEdge),
    to: (&'a Edge, &'a StreetEdge),
    mode: TraverseMode,
    from_speed: f64,
    to_speed: f64,
}

impl Turn<'_> {
    /// built-in restrictions of the street turned from, plus temporary ones
    fn is_restricted(&self, ctx: &RoutingContext) -> bool {
        let (from_edge, from_street) = self.from;
        let to = self.to.0.id;
        let overlay = ctx
            .turn_overlay
            .as_ref()
            .map(|o| o.restrictions_from(from_edge.id))
            .unwrap_or_default();
        from_street
            .turn_restrictions
            .iter()
            .filter(|r| r.from == from_edge.id)
            .chain(overlay)
            .any(|r| r.forbids(to, self.mode))
    }
}
