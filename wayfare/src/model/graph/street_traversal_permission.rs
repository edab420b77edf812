use crate::model::state::TraverseMode;
use serde::{Deserialize, Serialize};
use std::ops::BitOr;

/// which street modes may use an edge or pass a barrier.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct StreetTraversalPermission(u8);

impl StreetTraversalPermission {
    pub const NONE: StreetTraversalPermission = StreetTraversalPermission(0);
    pub const PEDESTRIAN: StreetTraversalPermission = StreetTraversalPermission(1);
    pub const BICYCLE: StreetTraversalPermission = StreetTraversalPermission(2);
    pub const CAR: StreetTraversalPermission = StreetTraversalPermission(4);
    pub const PEDESTRIAN_AND_BICYCLE: StreetTraversalPermission = StreetTraversalPermission(3);
    pub const BICYCLE_AND_CAR: StreetTraversalPermission = StreetTraversalPermission(6);
    pub const ALL: StreetTraversalPermission = StreetTraversalPermission(7);

    pub fn allows(&self, mode: TraverseMode) -> bool {
        match mode {
            TraverseMode::Walk => self.contains(Self::PEDESTRIAN),
            TraverseMode::Bicycle | TraverseMode::Scooter => self.contains(Self::BICYCLE),
            TraverseMode::Car => self.contains(Self::CAR),
            TraverseMode::Transit(_) => false,
        }
    }

    pub fn contains(&self, other: StreetTraversalPermission) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn intersection(&self, other: StreetTraversalPermission) -> StreetTraversalPermission {
        StreetTraversalPermission(self.0 & other.0)
    }

    pub fn remove(&self, other: StreetTraversalPermission) -> StreetTraversalPermission {
        StreetTraversalPermission(self.0 & !other.0)
    }

    pub fn is_none(&self) -> bool {
        self.0 == 0
    }
}

impl BitOr for StreetTraversalPermission {
    type Output = StreetTraversalPermission;

    fn bitor(self, rhs: Self) -> Self::Output {
        StreetTraversalPermission(self.0 | rhs.0)
    }
}

#[cfg(test)]
mod test {
    use super::StreetTraversalPermission as P;
    use crate::model::state::TraverseMode;

    #[test]
    fn test_allows() {
        let p = P::PEDESTRIAN | P::BICYCLE;
        assert_eq!(p, P::PEDESTRIAN_AND_BICYCLE);
        assert!(p.allows(TraverseMode::Walk));
        assert!(p.allows(TraverseMode::Scooter));
        assert!(!p.allows(TraverseMode::Car));
        assert!(P::ALL.remove(P::CAR).allows(TraverseMode::Bicycle));
        assert!(!P::ALL.allows(TraverseMode::Transit(Default::default())));
        assert!(P::NONE.is_none());
    }
}
