//! Shortest paths on 8-way occupancy grids.
//!
//! This crate finds optimal routes between two cells of a
//! [`Grid`](jumpgrid_core::Grid) with one of three interchangeable
//! algorithms:
//!
//! - **Dijkstra** uniform-cost search ([`PathFinder::dijkstra_path`])
//! - **A\*** guided by the octile heuristic ([`PathFinder::astar_path`])
//! - **Jump Point Search** over jump points only ([`PathFinder::jps_path`])
//!
//! All three share one indexed binary heap and one generation-stamped node
//! table owned by [`PathFinder`], so repeated queries incur no allocations
//! after warm-up. Orthogonal steps cost [`ORTHOGONAL_COST`] and diagonal
//! steps [`DIAGONAL_COST`]; for the same query all algorithms return the
//! same total cost.
//!
//! # Stepping
//!
//! [`PathFinder::steps`] returns a [`Search`] iterator that yields one
//! [`Progress`] item per expanded cell, for visualisers and debuggers.
//! A [`SearchObserver`] can also be attached to any query to receive
//! per-cell [`SearchEvent`]s.
//!
//! # Example
//!
//! ```
//! use jumpgrid_core::{Grid, Point};
//! use jumpgrid_paths::{Algorithm, PathFinder};
//!
//! let grid = Grid::new(5, 5);
//! let mut finder = PathFinder::new(&grid);
//! let path = finder
//!     .find_path(&grid, Algorithm::Jps, Point::new(0, 0), Point::new(4, 4))
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(path.cost(), 56);
//! ```

mod astar;
mod config;
mod dijkstra;
mod distance;
mod error;
mod finder;
mod heap;
mod jps;
mod observer;
mod path;
mod search;

pub use config::{DEFAULT_MAX_PATH_LEN, SearchConfig};
pub use distance::{DIAGONAL_COST, ORTHOGONAL_COST, octile, step_cost};
pub use error::PathError;
pub use finder::{NodeState, PathFinder, PathNode, SearchStats, UNREACHABLE};
pub use observer::{EventKind, SearchEvent, SearchObserver};
pub use path::Path;
pub use search::{Algorithm, Progress, Search, Step, UnknownAlgorithm};
