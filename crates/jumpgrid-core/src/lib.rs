//! **jumpgrid-core**: occupancy grid and geometry types for 8-way grid
//! pathfinding.
//!
//! This crate provides the foundational types shared by the *jumpgrid*
//! crates: integer points and ranges, the eight compass directions, a
//! fixed-size walkable/blocked [`Grid`], and a small text map format.

pub mod ascii;
pub mod geom;
pub mod grid;

pub use ascii::{AsciiMap, MapError};
pub use geom::{Direction, Point, Range};
pub use grid::{Cell, Grid};
