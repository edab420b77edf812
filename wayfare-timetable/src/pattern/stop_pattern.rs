use super::StopId;
use serde::{Deserialize, Serialize};

/// pickup or drop off permission at one stop of a pattern.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PickDrop {
    #[default]
    Scheduled,
    None,
    CallAgency,
    CoordinateWithDriver,
    /// set by realtime updates when the vehicle will not serve the stop
    Cancelled,
}

impl PickDrop {
    pub fn is_routable(&self) -> bool {
        !matches!(self, PickDrop::None | PickDrop::Cancelled)
    }
}

/// ordered stops of a pattern with their board and alight permissions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopPattern {
    pub stops: Vec<StopId>,
    pub pickups: Vec<PickDrop>,
    pub dropoffs: Vec<PickDrop>,
}

impl StopPattern {
    /// a pattern where every stop allows boarding and alighting, except that
    /// nobody boards at the last stop or alights at the first.
    pub fn new(stops: Vec<StopId>) -> StopPattern {
        let n = stops.len();
        let pickups = (0..n)
            .map(|i| if i + 1 == n { PickDrop::None } else { PickDrop::Scheduled })
            .collect();
        let dropoffs = (0..n)
            .map(|i| if i == 0 { PickDrop::None } else { PickDrop::Scheduled })
            .collect();
        StopPattern {
            stops,
            pickups,
            dropoffs,
        }
    }

    pub fn size(&self) -> usize {
        self.stops.len()
    }

    pub fn stop(&self, index: usize) -> Option<&StopId> {
        self.stops.get(index)
    }

    pub fn can_board(&self, index: usize) -> bool {
        self.pickups
            .get(index)
            .map(|p| p.is_routable())
            .unwrap_or_default()
    }

    pub fn can_alight(&self, index: usize) -> bool {
        self.dropoffs
            .get(index)
            .map(|p| p.is_routable())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod test {
    use super::{PickDrop, StopPattern};
    use crate::pattern::StopId;

    #[test]
    fn test_default_permissions_at_ends() {
        let pattern = StopPattern::new(vec![
            StopId::new("a"),
            StopId::new("b"),
            StopId::new("c"),
        ]);
        assert!(pattern.can_board(0));
        assert!(!pattern.can_alight(0));
        assert!(pattern.can_board(1) && pattern.can_alight(1));
        assert!(!pattern.can_board(2));
        assert!(pattern.can_alight(2));
        assert!(!pattern.can_board(3), "out of range stop should not board");
    }

    #[test]
    fn test_cancelled_not_routable() {
        assert!(!PickDrop::Cancelled.is_routable());
        assert!(PickDrop::CallAgency.is_routable());
    }
}
