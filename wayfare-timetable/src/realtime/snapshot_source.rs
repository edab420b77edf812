use super::TimetableSnapshot;
use arc_swap::ArcSwap;
use std::sync::Arc;

/// reader handle onto the most recently committed [`TimetableSnapshot`].
///
/// clones share the same publication slot. a search calls [`Self::snapshot`]
/// once when it starts and keeps the returned `Arc` for its whole lifetime,
/// so later commits never change what that search sees. loading is lock-free.
#[derive(Clone, Debug)]
pub struct TimetableSnapshotSource {
    current: Arc<ArcSwap<TimetableSnapshot>>,
}

impl Default for TimetableSnapshotSource {
    fn default() -> Self {
        TimetableSnapshotSource {
            current: Arc::new(ArcSwap::from_pointee(TimetableSnapshot::empty())),
        }
    }
}

impl TimetableSnapshotSource {
    pub fn new() -> TimetableSnapshotSource {
        TimetableSnapshotSource::default()
    }

    pub fn snapshot(&self) -> Arc<TimetableSnapshot> {
        self.current.load_full()
    }

    pub fn version(&self) -> u64 {
        self.current.load().version()
    }

    pub(crate) fn publish(&self, snapshot: Arc<TimetableSnapshot>) {
        self.current.store(snapshot);
    }
}
