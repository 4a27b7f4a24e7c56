//! Jump Point Search (JPS) on 8-way grids.
//!
//! JPS is an A* variant for uniform grids. Instead of opening every
//! neighbour it scans along straight and diagonal lines and only adds
//! *jump points* to the open list: the goal, cells with a forced neighbour,
//! and diagonal cells from which a straight scan finds one of those.
//!
//! Scanning is iterative: a diagonal scan runs its horizontal and vertical
//! sub-scans as plain loops, so long open corridors never grow the call
//! stack.

use jumpgrid_core::{Direction, Grid, Point};

use crate::distance;
use crate::error::PathError;
use crate::finder::PathFinder;
use crate::path::Path;
use crate::search::{Algorithm, Search};

impl PathFinder {
    /// Compute a shortest path from `from` to `to` using Jump Point Search.
    ///
    /// The returned path lists jump points only; use
    /// [`Path::expand`] for a step-by-step route.
    pub fn jps_path(
        &mut self,
        grid: &Grid,
        from: Point,
        to: Point,
    ) -> Result<Option<Path>, PathError> {
        self.find_path(grid, Algorithm::Jps, from, to)
    }
}

impl Search<'_> {
    /// Jump from `ci` in every pruned direction and relax the jump points.
    pub(crate) fn expand_jps(&mut self, ci: usize) {
        let grid = self.grid;
        let cp = grid.point(ci);
        let goal = grid.point(self.goal);
        let current_g = self.finder.nodes[ci].g;

        // The travel direction comes from the parent's position; the start
        // has no parent and scans all eight directions.
        let travel = self.finder.nodes[ci]
            .parent
            .and_then(|pi| Direction::between(grid.point(pi), cp));
        let dirs = match travel {
            Some(d) => pruned_dirs(grid, cp, d),
            None => Direction::ALL.to_vec(),
        };

        for dir in dirs {
            let Some(jp) = jump(grid, cp, dir, goal) else {
                continue;
            };
            log::trace!("jump point {jp} from {cp} heading {dir}");
            let Some(ji) = grid.idx(jp) else {
                continue;
            };
            let candidate = current_g + distance::octile(cp, jp);
            self.relax(ci, ji, candidate, || distance::octile(jp, goal));
        }
    }
}

// ---------------------------------------------------------------------------
// JPS internals
// ---------------------------------------------------------------------------

/// Whether a cell reached by moving in `dir` has a forced neighbour.
///
/// Cells outside the grid count as blocked.
pub(crate) fn has_forced_neighbor(grid: &Grid, p: Point, dir: Direction) -> bool {
    let (dx, dy) = dir.delta();
    let open = |x: i32, y: i32| grid.is_walkable(Point::new(p.x + x, p.y + y));
    if dx != 0 && dy != 0 {
        (!open(-dx, 0) && open(-dx, dy)) || (!open(0, -dy) && open(dx, -dy))
    } else if dy == 0 {
        (!open(0, -1) && open(dx, -1)) || (!open(0, 1) && open(dx, 1))
    } else {
        (!open(-1, 0) && open(-1, dy)) || (!open(1, 0) && open(1, dy))
    }
}

/// Natural plus forced neighbour directions for a cell entered moving in `d`.
fn pruned_dirs(grid: &Grid, p: Point, d: Direction) -> Vec<Direction> {
    let mut dirs = Vec::with_capacity(5);
    let (dx, dy) = d.delta();
    let open = |x: i32, y: i32| grid.is_walkable(Point::new(p.x + x, p.y + y));
    let mut push = |x: i32, y: i32| {
        if let Some(dir) = Direction::from_delta(x, y) {
            dirs.push(dir);
        }
    };

    if dx != 0 && dy != 0 {
        // Natural neighbours.
        if open(dx, 0) {
            push(dx, 0);
        }
        if open(0, dy) {
            push(0, dy);
        }
        if open(dx, dy) {
            push(dx, dy);
        }
        // Forced neighbours.
        if !open(-dx, 0) && open(-dx, dy) {
            push(-dx, dy);
        }
        if !open(0, -dy) && open(dx, -dy) {
            push(dx, -dy);
        }
    } else if dy == 0 {
        if open(dx, 0) {
            push(dx, 0);
        }
        if !open(0, -1) && open(dx, -1) {
            push(dx, -1);
        }
        if !open(0, 1) && open(dx, 1) {
            push(dx, 1);
        }
    } else {
        if open(0, dy) {
            push(0, dy);
        }
        if !open(-1, 0) && open(-1, dy) {
            push(-1, dy);
        }
        if !open(1, 0) && open(1, dy) {
            push(1, dy);
        }
    }
    dirs
}

/// Scan from `from` along `dir` for the next jump point.
pub(crate) fn jump(grid: &Grid, from: Point, dir: Direction, goal: Point) -> Option<Point> {
    if !dir.is_diagonal() {
        return jump_straight(grid, from, dir, goal);
    }

    let mut p = from;
    loop {
        p = p.step(dir);
        if !grid.is_walkable(p) {
            return None;
        }
        if p == goal || has_forced_neighbor(grid, p, dir) {
            return Some(p);
        }
        // Horizontal first, then vertical.
        let found_axis = [dir.horizontal(), dir.vertical()]
            .into_iter()
            .flatten()
            .any(|axis| jump_straight(grid, p, axis, goal).is_some());
        if found_axis {
            return Some(p);
        }
    }
}

/// Straight-line scan: stops at the goal, at a cell with a forced neighbour,
/// or fails at the first blocked cell.
fn jump_straight(grid: &Grid, from: Point, dir: Direction, goal: Point) -> Option<Point> {
    let mut p = from;
    loop {
        p = p.step(dir);
        if !grid.is_walkable(p) {
            return None;
        }
        if p == goal || has_forced_neighbor(grid, p, dir) {
            return Some(p);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jumpgrid_core::AsciiMap;

    fn map(s: &str) -> AsciiMap {
        AsciiMap::parse(s).unwrap()
    }

    #[test]
    fn open_grid_single_jump() {
        let grid = Grid::new(5, 5);
        let mut pf = PathFinder::new(&grid);
        let path = pf
            .jps_path(&grid, Point::new(0, 0), Point::new(4, 4))
            .unwrap()
            .unwrap();
        assert_eq!(path.cost(), 56);
        assert_eq!(path.points(), vec![Point::new(0, 0), Point::new(4, 4)]);
        assert_eq!(path.expand().len(), 5);
        // The start, then the goal once it is the best open entry.
        assert_eq!(pf.stats().expanded, 2);
    }

    #[test]
    fn straight_jump_stops_at_forced_neighbor() {
        // Moving east along row 1: the wall above ends after (2,0), so
        // (2,1) has a forced neighbour at (3,0).
        let m = map(
            "
            ###...
            ......
            ......
            ",
        );
        assert!(has_forced_neighbor(&m.grid, Point::new(2, 1), Direction::East));
        assert!(!has_forced_neighbor(&m.grid, Point::new(1, 1), Direction::East));
        assert!(!has_forced_neighbor(&m.grid, Point::new(3, 1), Direction::East));
        assert_eq!(
            jump(&m.grid, Point::new(0, 1), Direction::East, Point::new(5, 2)),
            Some(Point::new(2, 1))
        );
    }

    #[test]
    fn straight_jump_fails_at_wall() {
        let m = map("....#.");
        assert_eq!(
            jump(&m.grid, Point::new(0, 0), Direction::East, Point::new(5, 0)),
            None
        );
    }

    #[test]
    fn straight_jump_stops_at_goal() {
        let grid = Grid::new(8, 3);
        assert_eq!(
            jump(&grid, Point::new(0, 1), Direction::East, Point::new(5, 1)),
            Some(Point::new(5, 1))
        );
    }

    #[test]
    fn diagonal_jump_stops_where_a_straight_scan_hits_goal() {
        let grid = Grid::new(10, 10);
        // Diagonal from (0,0): at (3,3) the eastward scan reaches (8,3).
        assert_eq!(
            jump(&grid, Point::new(0, 0), Direction::SouthEast, Point::new(8, 3)),
            Some(Point::new(3, 3))
        );
    }

    #[test]
    fn diagonal_forced_neighbor_rule() {
        // Entering (1,1) south-east with (0,1) blocked and (0,2) open.
        let m = map(
            "
            ...
            #..
            ...
            ",
        );
        assert!(has_forced_neighbor(&m.grid, Point::new(1, 1), Direction::SouthEast));
        // Heading north-east the same gap is forced too.
        assert!(has_forced_neighbor(&m.grid, Point::new(1, 1), Direction::NorthEast));
        assert!(!has_forced_neighbor(&m.grid, Point::new(1, 1), Direction::SouthWest));
    }

    #[test]
    fn vertical_forced_neighbor_rule() {
        let m = map(
            "
            ...
            .#.
            ...
            ",
        );
        // Moving south through (2,1): (1,1) blocked on the west, (1,2) open.
        assert!(has_forced_neighbor(&m.grid, Point::new(2, 1), Direction::South));
        assert!(!has_forced_neighbor(&m.grid, Point::new(2, 2), Direction::South));
    }

    #[test]
    fn pruning_keeps_natural_and_forced() {
        let grid = Grid::new(5, 5);
        let p = Point::new(2, 2);
        assert_eq!(pruned_dirs(&grid, p, Direction::East), vec![Direction::East]);
        assert_eq!(
            pruned_dirs(&grid, p, Direction::SouthEast),
            vec![Direction::East, Direction::South, Direction::SouthEast]
        );

        let m = map(
            "
            .....
            .....
            .#...
            .....
            .....
            ",
        );
        // Moving east through (1,1) with (1,2) blocked below.
        assert_eq!(
            pruned_dirs(&m.grid, Point::new(1, 1), Direction::East),
            vec![Direction::East, Direction::SouthEast]
        );
    }

    #[test]
    fn long_corridor_does_not_recurse() {
        let grid = Grid::new(20_000, 3);
        let mut pf = PathFinder::new(&grid);
        let path = pf
            .jps_path(&grid, Point::new(0, 1), Point::new(19_999, 1))
            .unwrap()
            .unwrap();
        assert_eq!(path.cost(), 199_990);
    }

    #[test]
    fn goal_behind_wall() {
        let m = map(
            "
            S....#....
            .....#....
            .....#..G.
            .....#....
            ..........
            ",
        );
        let mut pf = PathFinder::new(&m.grid);
        let (s, g) = (m.start.unwrap(), m.goal.unwrap());
        let jps = pf.jps_path(&m.grid, s, g).unwrap().unwrap();
        let dij = pf.dijkstra_path(&m.grid, s, g).unwrap().unwrap();
        assert_eq!(jps.cost(), dij.cost());
        let full = jps.expand();
        assert!(full.is_contiguous());
        assert_eq!(full.cost(), jps.cost());
        for n in &full {
            assert!(m.grid.is_walkable(n.pos));
        }
    }
}
