use super::{EdgeId, VertexId};
use wayfare_timetable::pattern::PatternId;

#[derive(thiserror::Error, Debug)]
pub enum GraphError {
    #[error("vertex {0} is not in the graph")]
    VertexNotFound(VertexId),
    #[error("edge {0} is not in the graph")]
    EdgeNotFound(EdgeId),
    #[error("vertex {0} is not a transit stop")]
    NotATransitStop(VertexId),
    #[error("pattern {pattern} has {expected} stops but {found} stop vertices were given")]
    StopCountMismatch {
        pattern: PatternId,
        expected: usize,
        found: usize,
    },
    #[error("pattern {0} is already in the graph")]
    DuplicatePattern(PatternId),
    #[error("invalid edge from {from} to {to}: {msg}")]
    InvalidEdge {
        from: VertexId,
        to: VertexId,
        msg: String,
    },
}
