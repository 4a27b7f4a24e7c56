use jumpgrid_core::{Grid, Point};

use crate::distance;
use crate::error::PathError;
use crate::finder::PathFinder;
use crate::path::Path;
use crate::search::{Algorithm, Search};

impl PathFinder {
    /// Compute the shortest path from `from` to `to` using A*.
    ///
    /// Returns the path (goal first) or `None` if `to` is unreachable.
    pub fn astar_path(
        &mut self,
        grid: &Grid,
        from: Point,
        to: Point,
    ) -> Result<Option<Path>, PathError> {
        self.find_path(grid, Algorithm::AStar, from, to)
    }
}

impl Search<'_> {
    /// Relax every walkable neighbour of `ci`, giving newly discovered cells
    /// their octile distance to the goal as heuristic.
    pub(crate) fn expand_astar(&mut self, ci: usize) {
        let cp = self.grid.point(ci);
        let goal = self.grid.point(self.goal);
        let current_g = self.finder.nodes[ci].g;

        for np in cp.neighbors_8() {
            let Some(ni) = self.grid.idx(np) else {
                continue;
            };
            if !self.grid.is_walkable_idx(ni) {
                continue;
            }
            let candidate = current_g + distance::step_cost(cp, np);
            self.relax(ci, ni, candidate, || distance::octile(np, goal));
        }
    }
}
