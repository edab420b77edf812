use super::EdgeId;

/// edge ids created for one pattern, addressed by stop or hop index.
///
/// board slots are `None` where the pattern does not allow boarding (and at
/// the last stop); alight slots likewise. dwell slots exist only at interior
/// stops.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct PatternEdges {
    pub board: Vec<Option<EdgeId>>,
    pub alight: Vec<Option<EdgeId>>,
    pub hops: Vec<EdgeId>,
    pub dwells: Vec<Option<EdgeId>>,
}

impl PatternEdges {
    pub fn board(&self, stop_index: usize) -> Option<EdgeId> {
        self.board.get(stop_index).copied().flatten()
    }

    pub fn alight(&self, stop_index: usize) -> Option<EdgeId> {
        self.alight.get(stop_index).copied().flatten()
    }

    pub fn hop(&self, hop_index: usize) -> Option<EdgeId> {
        self.hops.get(hop_index).copied()
    }

    pub fn dwell(&self, stop_index: usize) -> Option<EdgeId> {
        self.dwells.get(stop_index).copied().flatten()
    }
}
