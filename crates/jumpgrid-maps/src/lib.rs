//! Test maps and engine comparison for the *jumpgrid* crates.
//!
//! - [`mapgen`]: random obstacle layouts (noise, cellular automata caves,
//!   dividing walls, enclosures).
//! - [`compare`]: runs every algorithm on random start/goal pairs, checks
//!   the costs agree and times each one.

pub mod compare;
pub mod mapgen;

pub use compare::{AlgoTiming, CompareReport, Comparer, Mismatch};
pub use mapgen::{
    CaveConfig, CellularAutomataRule, MapGen, NoiseConfig, cave_grid, noise_grid, random_walkable,
};
