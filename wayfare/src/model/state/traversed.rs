use super::StateRef;

/// outcome of traversing one edge.
///
/// `Pruned` is the ordinary answer for an infeasible traversal (wrong mode,
/// banned stop, no trip, illegal turn...) and is not an error. `Forked` is
/// only produced by edges that model two mutually exclusive continuations.
#[derive(Clone, Debug, Default)]
pub enum Traversed {
    #[default]
    Pruned,
    Single(StateRef),
    Forked(StateRef, StateRef),
}

impl Traversed {
    /// combines two optional outcomes of the same edge.
    pub fn from_pair(a: Option<StateRef>, b: Option<StateRef>) -> Traversed {
        match (a, b) {
            (Some(a), Some(b)) => Traversed::Forked(a, b),
            (Some(s), None) | (None, Some(s)) => Traversed::Single(s),
            (None, None) => Traversed::Pruned,
        }
    }

    pub fn is_pruned(&self) -> bool {
        matches!(self, Traversed::Pruned)
    }

    pub fn len(&self) -> usize {
        match self {
            Traversed::Pruned => 0,
            Traversed::Single(_) => 1,
            Traversed::Forked(_, _) => 2,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.is_pruned()
    }

    /// the first (or only) resulting state.
    pub fn first(&self) -> Option<&StateRef> {
        match self {
            Traversed::Pruned => None,
            Traversed::Single(s) | Traversed::Forked(s, _) => Some(s),
        }
    }

    pub fn into_states(self) -> Vec<StateRef> {
        match self {
            Traversed::Pruned => vec![],
            Traversed::Single(s) => vec![s],
            Traversed::Forked(a, b) => vec![a, b],
        }
    }
}

impl From<Option<StateRef>> for Traversed {
    fn from(value: Option<StateRef>) -> Self {
        match value {
            Some(s) => Traversed::Single(s),
            None => Traversed::Pruned,
        }
    }
}

impl IntoIterator for Traversed {
    type Item = StateRef;
    type IntoIter = std::vec::IntoIter<StateRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_states().into_iter()
    }
}
