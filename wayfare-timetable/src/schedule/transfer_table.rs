use crate::pattern::{StopId, TripId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// constraint on changing vehicles between two stops.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransferRule {
    /// recommended transfer point, no transfer penalty applies
    Preferred,
    /// the departing vehicle waits for the arriving one, no slack is required
    Guaranteed,
    /// at least this many seconds are needed between alighting and boarding
    MinimumTime(i32),
    /// transfer is not possible
    Forbidden,
}

#[derive(Clone, Debug)]
struct TransferEntry {
    from_trip: Option<TripId>,
    to_trip: Option<TripId>,
    rule: TransferRule,
}

impl TransferEntry {
    fn specificity(&self) -> u8 {
        self.from_trip.is_some() as u8 + self.to_trip.is_some() as u8
    }

    fn matches(&self, from_trip: Option<&TripId>, to_trip: &TripId) -> bool {
        let from_ok = match (&self.from_trip, from_trip) {
            (None, _) => true,
            (Some(a), Some(b)) => a == b,
            (Some(_), None) => false,
        };
        let to_ok = match &self.to_trip {
            None => true,
            Some(t) => t == to_trip,
        };
        from_ok && to_ok
    }
}

/// transfer rules keyed by (alight stop, board stop), optionally narrowed to
/// specific trips. the most specific matching rule wins.
#[derive(Clone, Debug, Default)]
pub struct TransferTable {
    entries: HashMap<(StopId, StopId), Vec<TransferEntry>>,
}

impl TransferTable {
    pub fn new() -> TransferTable {
        TransferTable::default()
    }

    pub fn add_rule(
        &mut self,
        from_stop: &StopId,
        to_stop: &StopId,
        from_trip: Option<&TripId>,
        to_trip: Option<&TripId>,
        rule: TransferRule,
    ) {
        self.entries
            .entry((from_stop.clone(), to_stop.clone()))
            .or_default()
            .push(TransferEntry {
                from_trip: from_trip.cloned(),
                to_trip: to_trip.cloned(),
                rule,
            });
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn lookup(
        &self,
        from_stop: &StopId,
        to_stop: &StopId,
        from_trip: Option<&TripId>,
        to_trip: &TripId,
    ) -> Option<TransferRule> {
        self.entries
            .get(&(from_stop.clone(), to_stop.clone()))?
            .iter()
            .filter(|e| e.matches(from_trip, to_trip))
            .max_by_key(|e| e.specificity())
            .map(|e| e.rule)
    }
}
