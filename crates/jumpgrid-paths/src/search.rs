//! Search runs: algorithm selection, the shared outer loop, and stepwise
//! iteration.

use std::fmt;
use std::str::FromStr;

use jumpgrid_core::{Grid, Point};

use crate::distance;
use crate::error::PathError;
use crate::finder::{PathFinder, UNREACHABLE};
use crate::observer::{EventKind, SearchEvent, SearchObserver};
use crate::path::{self, Path};

// ---------------------------------------------------------------------------
// Algorithm
// ---------------------------------------------------------------------------

/// The available search algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    /// Uniform-cost search, no heuristic.
    Dijkstra,
    /// Best-first search guided by the octile heuristic.
    AStar,
    /// A* over jump points only.
    Jps,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Dijkstra, Algorithm::AStar, Algorithm::Jps];

    /// Short display name.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::AStar => "astar",
            Algorithm::Jps => "jps",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown algorithm name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAlgorithm(pub String);

impl fmt::Display for UnknownAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown algorithm \u{201c}{}\u{201d} (expected dijkstra, astar or jps)",
            self.0
        )
    }
}

impl std::error::Error for UnknownAlgorithm {}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dijkstra" => Ok(Algorithm::Dijkstra),
            "astar" | "a*" | "a-star" => Ok(Algorithm::AStar),
            "jps" | "jump-point" => Ok(Algorithm::Jps),
            _ => Err(UnknownAlgorithm(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Step results
// ---------------------------------------------------------------------------

/// What one outer-loop iteration did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// The cell taken from the open set and closed.
    pub current: Point,
    /// Cells inserted into the open set during this iteration.
    pub opened: Vec<Point>,
    /// Already-open cells whose cost was lowered during this iteration.
    pub updated: Vec<Point>,
}

/// Item produced by a [`Search`] iterator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    /// One cell was expanded; the search continues.
    Expanded(Step),
    /// The goal was reached. Last item.
    Found(Path),
    /// The open set ran dry. Last item.
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    /// Not seeded yet.
    Pending,
    Running,
    /// The goal is known to be the next cell to settle.
    GoalReached,
    Finished,
}

pub(crate) enum Advance {
    Expanded(usize),
    Found,
    Exhausted,
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// A single path query, driven one outer-loop iteration at a time.
///
/// Obtained from [`PathFinder::steps`]. Either iterate it to watch the
/// search unfold (each item is one expansion, followed by a final
/// [`Progress::Found`] or [`Progress::NotFound`]), or call
/// [`run`](Search::run) to drive it to completion. Dropping it early simply
/// abandons the query.
pub struct Search<'a> {
    pub(crate) finder: &'a mut PathFinder,
    pub(crate) grid: &'a Grid,
    pub(crate) algorithm: Algorithm,
    pub(crate) start: usize,
    pub(crate) goal: usize,
    observer: Option<&'a mut dyn SearchObserver>,
    status: Status,
    record: bool,
    opened: Vec<Point>,
    updated: Vec<Point>,
}

impl<'a> Search<'a> {
    pub(crate) fn new(
        finder: &'a mut PathFinder,
        grid: &'a Grid,
        algorithm: Algorithm,
        from: Point,
        to: Point,
    ) -> Result<Self, PathError> {
        let start = endpoint(grid, from)?;
        let goal = endpoint(grid, to)?;
        finder.begin_run(grid);
        Ok(Self {
            finder,
            grid,
            algorithm,
            start,
            goal,
            observer: None,
            status: Status::Pending,
            record: false,
            opened: Vec::new(),
            updated: Vec::new(),
        })
    }

    /// Report events to `observer` for the rest of the run.
    pub fn with_observer(mut self, observer: &'a mut dyn SearchObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// The algorithm being run.
    #[inline]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Number of cells waiting in the open set.
    #[inline]
    pub fn open_len(&self) -> usize {
        self.finder.open.len()
    }

    /// Run to completion. `Ok(None)` means no path exists.
    pub fn run(mut self) -> Result<Option<Path>, PathError> {
        self.record = false;
        loop {
            match self.advance()? {
                Advance::Expanded(_) => {}
                Advance::Found => {
                    let path = self.finish()?;
                    log::debug!(
                        "{}: path {} -> {} cost {} ({} cells, {} expanded)",
                        self.algorithm,
                        path.start(),
                        path.goal(),
                        path.cost(),
                        path.len(),
                        self.finder.stats.expanded
                    );
                    return Ok(Some(path));
                }
                Advance::Exhausted => {
                    log::warn!(
                        "{}: no path from {} to {} ({} expanded)",
                        self.algorithm,
                        self.grid.point(self.start),
                        self.grid.point(self.goal),
                        self.finder.stats.expanded
                    );
                    return Ok(None);
                }
            }
        }
    }

    /// One outer-loop iteration.
    pub(crate) fn advance(&mut self) -> Result<Advance, PathError> {
        match self.status {
            Status::Pending => {
                if self.start == self.goal {
                    self.status = Status::GoalReached;
                    return Ok(Advance::Found);
                }
                self.seed();
                self.status = Status::Running;
            }
            Status::GoalReached => {
                // JPS stops with the goal still on top of the open set.
                if self.finder.open.peek() == Some(self.goal) {
                    let gi = self.finder.open.extract_min(&mut self.finder.nodes)?;
                    self.close(gi);
                }
                return Ok(Advance::Found);
            }
            Status::Finished => return Ok(Advance::Exhausted),
            Status::Running => {}
        }

        if self.finder.open.is_empty() {
            self.status = Status::Finished;
            return Ok(Advance::Exhausted);
        }

        let ci = self.finder.open.extract_min(&mut self.finder.nodes)?;
        self.close(ci);

        if ci == self.goal {
            self.status = Status::GoalReached;
            return Ok(Advance::Found);
        }

        match self.algorithm {
            Algorithm::Dijkstra => self.expand_dijkstra(ci),
            Algorithm::AStar => self.expand_astar(ci),
            Algorithm::Jps => {
                self.expand_jps(ci);
                if self.finder.open.peek() == Some(self.goal) {
                    self.status = Status::GoalReached;
                }
            }
        }
        Ok(Advance::Expanded(ci))
    }

    fn close(&mut self, ci: usize) {
        self.finder.nodes[ci].closed = true;
        self.finder.stats.expanded += 1;
        self.emit(EventKind::Closed, ci);
    }

    /// Put the start cell in the open set.
    fn seed(&mut self) {
        let h = match self.algorithm {
            Algorithm::Dijkstra => 0,
            Algorithm::AStar | Algorithm::Jps => {
                distance::octile(self.grid.point(self.start), self.grid.point(self.goal))
            }
        };
        let n = self.finder.touch(self.start);
        n.g = 0;
        n.h = h;
        n.parent = None;
        self.finder.open.insert(&mut self.finder.nodes, self.start);
        self.finder.stats.opened += 1;
        self.emit(EventKind::Opened, self.start);
    }

    /// Build the path once the goal is settled.
    fn finish(&mut self) -> Result<Path, PathError> {
        self.status = Status::Finished;
        if self.start == self.goal {
            return Ok(Path::single(self.grid.point(self.start)));
        }
        path::reconstruct(
            self.grid,
            &self.finder.nodes,
            self.start,
            self.goal,
            self.finder.config.max_path_len,
        )
    }

    /// Offer `candidate` as the cost of reaching `ni` from `ci`.
    ///
    /// Closed cells are left alone. A cell seen for the first time gets its
    /// heuristic from `heuristic`; afterwards the heuristic never changes.
    /// Returns whether the cell's cost improved.
    pub(crate) fn relax(
        &mut self,
        ci: usize,
        ni: usize,
        candidate: i32,
        heuristic: impl FnOnce() -> i32,
    ) -> bool {
        let n = self.finder.touch(ni);
        if n.closed || candidate >= n.g {
            return false;
        }
        if n.g == UNREACHABLE {
            n.h = heuristic();
        }
        n.g = candidate;
        n.parent = Some(ci);

        if self.finder.open.contains(&self.finder.nodes, ni) {
            self.finder.open.decrease_key(&mut self.finder.nodes, ni);
            self.finder.stats.updated += 1;
            self.emit(EventKind::Updated, ni);
        } else {
            self.finder.open.insert(&mut self.finder.nodes, ni);
            self.finder.stats.opened += 1;
            self.emit(EventKind::Opened, ni);
        }
        true
    }

    fn emit(&mut self, kind: EventKind, id: usize) {
        let pos = self.grid.point(id);
        if self.record {
            match kind {
                EventKind::Opened => self.opened.push(pos),
                EventKind::Updated => self.updated.push(pos),
                EventKind::Closed => {}
            }
        }
        if let Some(observer) = self.observer.as_deref_mut() {
            let n = &self.finder.nodes[id];
            observer.on_event(SearchEvent {
                pos,
                kind,
                g: n.g,
                h: n.h,
            });
        }
    }
}

impl Iterator for Search<'_> {
    type Item = Result<Progress, PathError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.status == Status::Finished {
            return None;
        }
        self.record = true;
        self.opened.clear();
        self.updated.clear();

        let item = match self.advance() {
            Ok(Advance::Expanded(ci)) => Ok(Progress::Expanded(Step {
                current: self.grid.point(ci),
                opened: std::mem::take(&mut self.opened),
                updated: std::mem::take(&mut self.updated),
            })),
            Ok(Advance::Found) => self.finish().map(Progress::Found),
            Ok(Advance::Exhausted) => {
                self.status = Status::Finished;
                Ok(Progress::NotFound)
            }
            Err(e) => {
                self.status = Status::Finished;
                Err(e)
            }
        };
        Some(item)
    }
}

impl std::iter::FusedIterator for Search<'_> {}

/// Validate an endpoint and return its cell id.
fn endpoint(grid: &Grid, p: Point) -> Result<usize, PathError> {
    let i = grid.idx(p).ok_or(PathError::OutOfBounds { pos: p })?;
    if !grid.is_walkable_idx(i) {
        return Err(PathError::Unwalkable { pos: p });
    }
    Ok(i)
}

// ---------------------------------------------------------------------------
// PathFinder entry points
// ---------------------------------------------------------------------------

impl PathFinder {
    /// Find a shortest path from `from` to `to` with `algorithm`.
    ///
    /// Returns `Ok(None)` when `to` cannot be reached. Endpoints outside the
    /// grid or on blocked cells are rejected before any search work.
    pub fn find_path(
        &mut self,
        grid: &Grid,
        algorithm: Algorithm,
        from: Point,
        to: Point,
    ) -> Result<Option<Path>, PathError> {
        self.steps(grid, algorithm, from, to)?.run()
    }

    /// Like [`find_path`](Self::find_path), reporting progress to `observer`.
    pub fn find_path_observed(
        &mut self,
        grid: &Grid,
        algorithm: Algorithm,
        from: Point,
        to: Point,
        observer: &mut impl SearchObserver,
    ) -> Result<Option<Path>, PathError> {
        self.steps(grid, algorithm, from, to)?
            .with_observer(observer)
            .run()
    }

    /// Start a stepwise search. See [`Search`].
    pub fn steps<'a>(
        &'a mut self,
        grid: &'a Grid,
        algorithm: Algorithm,
        from: Point,
        to: Point,
    ) -> Result<Search<'a>, PathError> {
        Search::new(self, grid, algorithm, from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algorithm_names_parse_back() {
        for alg in Algorithm::ALL {
            assert_eq!(alg.to_string().parse::<Algorithm>(), Ok(alg));
        }
        assert_eq!("A*".parse::<Algorithm>(), Ok(Algorithm::AStar));
        assert_eq!("JPS".parse::<Algorithm>(), Ok(Algorithm::Jps));
        assert!("bfs".parse::<Algorithm>().is_err());
    }

    #[test]
    fn endpoints_are_validated_first() {
        let mut grid = Grid::new(3, 3);
        grid.set_walkable(Point::new(2, 2), false);
        let mut pf = PathFinder::new(&grid);
        for alg in Algorithm::ALL {
            assert_eq!(
                pf.find_path(&grid, alg, Point::new(-1, 0), Point::new(1, 1)),
                Err(PathError::OutOfBounds {
                    pos: Point::new(-1, 0)
                })
            );
            assert_eq!(
                pf.find_path(&grid, alg, Point::new(0, 0), Point::new(2, 2)),
                Err(PathError::Unwalkable {
                    pos: Point::new(2, 2)
                })
            );
        }
    }

    #[test]
    fn start_equals_goal_skips_the_loop() {
        let grid = Grid::new(4, 4);
        let mut pf = PathFinder::new(&grid);
        let p = Point::new(2, 1);
        for alg in Algorithm::ALL {
            let mut events = 0;
            let path = pf
                .find_path_observed(&grid, alg, p, p, &mut |_: SearchEvent| events += 1)
                .unwrap()
                .unwrap();
            assert_eq!(path.len(), 1);
            assert_eq!(path.cost(), 0);
            assert_eq!(path.start(), p);
            assert_eq!(events, 0);
            assert_eq!(pf.stats().expanded, 0);
        }
    }

    #[test]
    fn steps_end_with_a_terminal_item() {
        let grid = Grid::new(5, 5);
        let mut pf = PathFinder::new(&grid);
        for alg in Algorithm::ALL {
            let items: Vec<_> = pf
                .steps(&grid, alg, Point::new(0, 0), Point::new(4, 4))
                .unwrap()
                .collect::<Result<_, _>>()
                .unwrap();
            let (last, rest) = items.split_last().unwrap();
            match last {
                Progress::Found(path) => assert_eq!(path.cost(), 56),
                other => panic!("{alg}: unexpected final item {other:?}"),
            }
            assert!(!rest.is_empty());
            assert!(rest.iter().all(|p| matches!(p, Progress::Expanded(_))));
            if let Progress::Expanded(first) = &rest[0] {
                assert_eq!(first.current, Point::new(0, 0));
                assert!(!first.opened.is_empty());
            }
        }
    }

    #[test]
    fn open_len_follows_the_frontier() {
        let grid = Grid::new(5, 5);
        let mut pf = PathFinder::new(&grid);
        let mut search = pf
            .steps(&grid, Algorithm::Dijkstra, Point::new(2, 2), Point::new(4, 4))
            .unwrap();
        assert_eq!(search.open_len(), 0);
        match search.next() {
            Some(Ok(Progress::Expanded(step))) => {
                // The seeded start plus its eight neighbours.
                assert_eq!(step.opened.len(), 9);
                assert_eq!(step.opened[0], Point::new(2, 2));
                assert_eq!(search.open_len(), 8);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn steps_report_not_found() {
        let mut grid = Grid::new(3, 3);
        for y in 0..3 {
            grid.set_walkable(Point::new(1, y), false);
        }
        let mut pf = PathFinder::new(&grid);
        let last = pf
            .steps(&grid, Algorithm::AStar, Point::new(0, 0), Point::new(2, 2))
            .unwrap()
            .last()
            .unwrap()
            .unwrap();
        assert_eq!(last, Progress::NotFound);
    }

    #[test]
    fn every_algorithm_closes_the_goal_last() {
        let grid = Grid::new(6, 6);
        let goal = Point::new(5, 3);
        let mut pf = PathFinder::new(&grid);
        for alg in Algorithm::ALL {
            let mut last = None;
            pf.find_path_observed(&grid, alg, Point::new(0, 0), goal, &mut |e: SearchEvent| {
                last = Some(e)
            })
            .unwrap()
            .unwrap();
            let last = last.unwrap();
            assert_eq!((last.pos, last.kind), (goal, EventKind::Closed), "{alg}");
        }
    }

    #[test]
    fn observer_does_not_change_the_result() {
        let mut grid = Grid::new(8, 8);
        for y in 1..8 {
            grid.set_walkable(Point::new(4, y), false);
        }
        let from = Point::new(0, 7);
        let to = Point::new(7, 7);
        let mut pf = PathFinder::new(&grid);
        for alg in Algorithm::ALL {
            let plain = pf.find_path(&grid, alg, from, to).unwrap();
            let plain_stats = pf.stats();
            let mut log = Vec::new();
            let observed = pf
                .find_path_observed(&grid, alg, from, to, &mut |e: SearchEvent| log.push(e))
                .unwrap();
            assert_eq!(plain, observed);
            assert_eq!(plain_stats, pf.stats());
            let closed = log.iter().filter(|e| e.kind == EventKind::Closed).count();
            let opened = log.iter().filter(|e| e.kind == EventKind::Opened).count();
            assert_eq!(closed, pf.stats().expanded);
            assert_eq!(opened, pf.stats().opened);
        }
    }
}
