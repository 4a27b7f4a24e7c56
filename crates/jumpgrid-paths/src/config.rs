/// Default cap on the number of cells path reconstruction will walk.
pub const DEFAULT_MAX_PATH_LEN: usize = 10_000;

/// Tunables for a [`PathFinder`](crate::PathFinder).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Longest path (in cells, both endpoints included) reconstruction will
    /// produce before reporting [`PathError::PathTooLong`](crate::PathError).
    ///
    /// Grids where legitimate paths can exceed the default need a larger
    /// value.
    pub max_path_len: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_path_len: DEFAULT_MAX_PATH_LEN,
        }
    }
}
