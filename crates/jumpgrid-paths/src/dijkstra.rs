use jumpgrid_core::{Grid, Point};

use crate::distance;
use crate::error::PathError;
use crate::finder::PathFinder;
use crate::path::Path;
use crate::search::{Algorithm, Search};

impl PathFinder {
    /// Compute a shortest path from `from` to `to` with Dijkstra's algorithm.
    ///
    /// Uniform-cost search: cells are settled in order of their cost from
    /// the start, with no guidance towards the goal.
    pub fn dijkstra_path(
        &mut self,
        grid: &Grid,
        from: Point,
        to: Point,
    ) -> Result<Option<Path>, PathError> {
        self.find_path(grid, Algorithm::Dijkstra, from, to)
    }
}

impl Search<'_> {
    /// Relax every walkable neighbour of `ci` by one step.
    pub(crate) fn expand_dijkstra(&mut self, ci: usize) {
        let cp = self.grid.point(ci);
        let current_g = self.finder.nodes[ci].g;

        for np in cp.neighbors_8() {
            let Some(ni) = self.grid.idx(np) else {
                continue;
            };
            if !self.grid.is_walkable_idx(ni) {
                continue;
            }
            let candidate = current_g + distance::step_cost(cp, np);
            self.relax(ci, ni, candidate, || 0);
        }
    }
}
