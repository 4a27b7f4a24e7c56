use std::fmt;

use jumpgrid_core::Point;

/// Errors that can occur during a path request.
///
/// "No path" is not an error: searches report it as `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// The start or end point lies outside the grid.
    OutOfBounds { pos: Point },
    /// The start or end point is not walkable.
    Unwalkable { pos: Point },
    /// Path reconstruction followed more parent links than allowed, which
    /// means the parent chain is corrupted.
    PathTooLong { limit: usize },
    /// A cell on the parent chain has no parent but is not the start.
    BrokenParentChain { pos: Point },
    /// `extract_min` was called on an empty open set.
    EmptyHeap,
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { pos } => write!(f, "endpoint {pos} is outside the grid"),
            Self::Unwalkable { pos } => write!(f, "endpoint {pos} is not walkable"),
            Self::PathTooLong { limit } => {
                write!(f, "path reconstruction exceeded {limit} cells (corrupted parent chain)")
            }
            Self::BrokenParentChain { pos } => {
                write!(f, "parent chain ends at {pos} before reaching the start")
            }
            Self::EmptyHeap => write!(f, "extract_min called on an empty open set"),
        }
    }
}

impl std::error::Error for PathError {}
