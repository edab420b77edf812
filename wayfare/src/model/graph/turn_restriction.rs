use super::{EdgeId, StreetTraversalPermission};
use crate::model::state::TraverseMode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TurnRestrictionKind {
    /// the turn from `from` into `to` is forbidden
    No,
    /// from `from`, `to` is the only permitted continuation
    Only,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnRestriction {
    pub from: EdgeId,
    pub to: EdgeId,
    pub kind: TurnRestrictionKind,
    /// modes the restriction applies to
    pub modes: StreetTraversalPermission,
}

impl TurnRestriction {
    pub fn new(from: EdgeId, to: EdgeId, kind: TurnRestrictionKind) -> TurnRestriction {
        TurnRestriction {
            from,
            to,
            kind,
            modes: StreetTraversalPermission::ALL,
        }
    }

    /// true if this restriction forbids turning from its `from` edge into `to` with `mode`.
    pub fn forbids(&self, to: EdgeId, mode: TraverseMode) -> bool {
        if !self.modes.allows(mode) {
            return false;
        }
        match self.kind {
            TurnRestrictionKind::No => self.to == to,
            TurnRestrictionKind::Only => self.to != to,
        }
    }
}

/// temporary restrictions (closures, roadworks) applied on top of the
/// restrictions built into the graph. an overlay is immutable; a change is
/// published as a new overlay with a higher version.
#[derive(Clone, Debug, Default)]
pub struct TurnRestrictionOverlay {
    version: u64,
    by_from_edge: HashMap<EdgeId, Vec<TurnRestriction>>,
}

impl TurnRestrictionOverlay {
    pub fn new(version: u64, restrictions: Vec<TurnRestriction>) -> TurnRestrictionOverlay {
        let mut by_from_edge: HashMap<EdgeId, Vec<TurnRestriction>> = HashMap::new();
        for r in restrictions {
            by_from_edge.entry(r.from).or_default().push(r);
        }
        TurnRestrictionOverlay {
            version,
            by_from_edge,
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// a new overlay with one more restriction and the next version number
    pub fn with_restriction(&self, restriction: TurnRestriction) -> TurnRestrictionOverlay {
        let mut next = self.clone();
        next.version += 1;
        next.by_from_edge
            .entry(restriction.from)
            .or_default()
            .push(restriction);
        next
    }

    pub fn restrictions_from(&self, edge: EdgeId) -> &[TurnRestriction] {
        self.by_from_edge
            .get(&edge)
            .map(|v| v.as_slice())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod test {
    use super::{TurnRestriction, TurnRestrictionKind, TurnRestrictionOverlay};
    use crate::model::{graph::EdgeId, state::TraverseMode};

    #[test]
    fn test_no_and_only() {
        let no = TurnRestriction::new(EdgeId(1), EdgeId(2), TurnRestrictionKind::No);
        assert!(no.forbids(EdgeId(2), TraverseMode::Car));
        assert!(!no.forbids(EdgeId(3), TraverseMode::Car));
        assert!(!no.forbids(EdgeId(2), TraverseMode::Transit(Default::default())));

        let only = TurnRestriction::new(EdgeId(1), EdgeId(2), TurnRestrictionKind::Only);
        assert!(!only.forbids(EdgeId(2), TraverseMode::Car));
        assert!(only.forbids(EdgeId(3), TraverseMode::Walk));
    }

    #[test]
    fn test_overlay_versions() {
        let base = TurnRestrictionOverlay::default();
        let next = base.with_restriction(TurnRestriction::new(
            EdgeId(4),
            EdgeId(5),
            TurnRestrictionKind::No,
        ));
        assert_eq!(next.version(), 1);
        assert_eq!(next.restrictions_from(EdgeId(4)).len(), 1);
        assert!(base.restrictions_from(EdgeId(4)).is_empty());
    }
}
