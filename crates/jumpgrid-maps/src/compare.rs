//! Cross-checking the three engines against each other.
//!
//! A [`Comparer`] repeatedly draws a random walkable start and goal on one
//! grid, runs Dijkstra, A* and JPS on the pair, checks that A* and JPS match
//! Dijkstra's cost and accumulates wall-clock time per algorithm.

use std::fmt;
use std::time::{Duration, Instant};

use jumpgrid_core::{Grid, Point};
use jumpgrid_paths::{Algorithm, PathError, PathFinder};
use rand::Rng;

use crate::mapgen::random_walkable;

/// Draws tried before giving up on finding a goal for a start.
const MAX_GOAL_DRAWS: usize = 1_000;

/// Accumulated timing for one algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlgoTiming {
    pub algorithm: Algorithm,
    pub total: Duration,
    pub runs: u32,
    /// Cells expanded over all runs.
    pub expanded: usize,
}

impl AlgoTiming {
    fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            total: Duration::ZERO,
            runs: 0,
            expanded: 0,
        }
    }

    /// Mean time per run.
    pub fn average(&self) -> Duration {
        if self.runs == 0 {
            Duration::ZERO
        } else {
            self.total / self.runs
        }
    }
}

/// An algorithm whose cost disagreed with Dijkstra's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub algorithm: Algorithm,
    pub start: Point,
    pub goal: Point,
    /// Dijkstra's cost; `None` when Dijkstra found no path.
    pub expected: Option<i32>,
    pub got: Option<i32>,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cost = |c: Option<i32>| c.map_or_else(|| "none".to_string(), |c| c.to_string());
        write!(
            f,
            "{} found cost {} but the optimum is {} (start {}, goal {})",
            self.algorithm,
            cost(self.got),
            cost(self.expected),
            self.start,
            self.goal
        )
    }
}

/// Outcome of [`Comparer::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareReport {
    /// Start/goal pairs actually searched.
    pub iterations: u32,
    /// Pairs with no path between them.
    pub unreachable: u32,
    /// Per-algorithm timing, in [`Algorithm::ALL`] order.
    pub timings: Vec<AlgoTiming>,
    pub mismatches: Vec<Mismatch>,
}

impl CompareReport {
    /// Whether every algorithm agreed with Dijkstra on every pair.
    pub fn is_consistent(&self) -> bool {
        self.mismatches.is_empty()
    }

    /// Timing for `algorithm`.
    pub fn timing(&self, algorithm: Algorithm) -> Option<&AlgoTiming> {
        self.timings.iter().find(|t| t.algorithm == algorithm)
    }
}

impl fmt::Display for CompareReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} iterations ({} without a path)",
            self.iterations, self.unreachable
        )?;
        for t in &self.timings {
            writeln!(
                f,
                "  {:<8} avg {:.3?}  total {:.3?}  expanded {}",
                t.algorithm.name(),
                t.average(),
                t.total,
                t.expanded
            )?;
        }
        if self.mismatches.is_empty() {
            write!(f, "all costs agree")
        } else {
            write!(f, "{} mismatches", self.mismatches.len())
        }
    }
}

/// Runs all algorithms on random start/goal pairs of one grid.
pub struct Comparer<'g, R: Rng> {
    grid: &'g Grid,
    finder: PathFinder,
    rng: R,
}

impl<'g, R: Rng> Comparer<'g, R> {
    pub fn new(grid: &'g Grid, rng: R) -> Self {
        Self {
            grid,
            finder: PathFinder::new(grid),
            rng,
        }
    }

    /// A random walkable start and a walkable goal sharing neither row nor
    /// column with it. `None` if the grid has no such pair.
    pub fn pick_endpoints(&mut self) -> Option<(Point, Point)> {
        let start = random_walkable(self.grid, &mut self.rng)?;
        for _ in 0..MAX_GOAL_DRAWS {
            let goal = random_walkable(self.grid, &mut self.rng)?;
            if goal.x != start.x && goal.y != start.y {
                return Some((start, goal));
            }
        }
        None
    }

    /// Search `iterations` random pairs with every algorithm.
    ///
    /// Stops early (with a warning) if the grid yields no usable pair.
    pub fn run(&mut self, iterations: u32) -> Result<CompareReport, PathError> {
        let mut report = CompareReport {
            iterations: 0,
            unreachable: 0,
            timings: Algorithm::ALL.iter().map(|&a| AlgoTiming::new(a)).collect(),
            mismatches: Vec::new(),
        };

        for _ in 0..iterations {
            let Some((start, goal)) = self.pick_endpoints() else {
                log::warn!("no usable start/goal pair on this grid");
                break;
            };
            report.iterations += 1;

            let mut expected = None;
            for (i, &alg) in Algorithm::ALL.iter().enumerate() {
                let began = Instant::now();
                let cost = self
                    .finder
                    .find_path(self.grid, alg, start, goal)?
                    .map(|p| p.cost());
                let t = &mut report.timings[i];
                t.total += began.elapsed();
                t.runs += 1;
                t.expanded += self.finder.stats().expanded;

                if alg == Algorithm::Dijkstra {
                    expected = cost;
                    if cost.is_none() {
                        report.unreachable += 1;
                    }
                } else if cost != expected {
                    let m = Mismatch {
                        algorithm: alg,
                        start,
                        goal,
                        expected,
                        got: cost,
                    };
                    log::error!("{m}");
                    report.mismatches.push(m);
                }
            }
        }

        log::debug!("comparison finished: {} iterations", report.iterations);
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapgen::{CaveConfig, NoiseConfig, cave_grid, noise_grid};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn algorithms_agree_on_noise() {
        let mut rng = StdRng::seed_from_u64(42);
        let grid = noise_grid(40, 30, &NoiseConfig::default(), &mut rng);
        let mut cmp = Comparer::new(&grid, rng);
        let report = cmp.run(50).unwrap();
        assert_eq!(report.iterations, 50);
        assert!(report.is_consistent(), "{:?}", report.mismatches);
        for alg in Algorithm::ALL {
            assert_eq!(report.timing(alg).unwrap().runs, 50);
        }
    }

    #[test]
    fn algorithms_agree_on_caves() {
        let mut rng = StdRng::seed_from_u64(9);
        let grid = cave_grid(48, 32, &CaveConfig::default(), &mut rng);
        let mut cmp = Comparer::new(&grid, rng);
        let report = cmp.run(30).unwrap();
        assert!(report.is_consistent(), "{:?}", report.mismatches);
    }

    #[test]
    fn endpoints_differ_in_both_axes() {
        let grid = Grid::new(6, 6);
        let mut cmp = Comparer::new(&grid, StdRng::seed_from_u64(5));
        for _ in 0..50 {
            let (s, g) = cmp.pick_endpoints().unwrap();
            assert!(s.x != g.x && s.y != g.y);
            assert!(grid.is_walkable(s) && grid.is_walkable(g));
        }
    }

    #[test]
    fn single_column_has_no_pair() {
        let grid = Grid::new(1, 8);
        let mut cmp = Comparer::new(&grid, StdRng::seed_from_u64(5));
        assert_eq!(cmp.pick_endpoints(), None);
        let report = cmp.run(10).unwrap();
        assert_eq!(report.iterations, 0);
        assert!(report.is_consistent());
    }

    #[test]
    fn unreachable_pairs_are_counted_not_mismatched() {
        let mut grid = Grid::new(9, 9);
        for y in 0..9 {
            grid.set_walkable(Point::new(4, y), false);
        }
        let mut cmp = Comparer::new(&grid, StdRng::seed_from_u64(77));
        let report = cmp.run(40).unwrap();
        assert!(report.unreachable > 0);
        assert!(report.is_consistent());
    }

    #[test]
    fn report_display_lists_each_algorithm() {
        let grid = Grid::new(5, 5);
        let mut cmp = Comparer::new(&grid, StdRng::seed_from_u64(1));
        let text = cmp.run(3).unwrap().to_string();
        for alg in Algorithm::ALL {
            assert!(text.contains(alg.name()), "{text}");
        }
        assert!(text.ends_with("all costs agree"));
    }
}
