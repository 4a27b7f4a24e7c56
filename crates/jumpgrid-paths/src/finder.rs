use jumpgrid_core::{Grid, Point};

use crate::config::SearchConfig;
use crate::heap::OpenSet;

/// A position with its cost from the start, as stored in a [`Path`](crate::Path).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathNode {
    pub pos: Point,
    pub cost: i32,
}

/// Sentinel g-cost of a cell not yet reached in the current run.
pub const UNREACHABLE: i32 = i32::MAX;

/// Slot value of a node that is not in the open set.
pub(crate) const NO_SLOT: usize = usize::MAX;

// ---------------------------------------------------------------------------
// Per-run node scratch
// ---------------------------------------------------------------------------

/// Search scratch for one cell, valid only while `generation` matches the
/// finder's current run.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Node {
    pub(crate) g: i32,
    pub(crate) h: i32,
    pub(crate) parent: Option<usize>,
    pub(crate) slot: usize,
    pub(crate) closed: bool,
    pub(crate) generation: u32,
}

impl Default for Node {
    fn default() -> Self {
        Self::fresh(0)
    }
}

impl Node {
    #[inline]
    pub(crate) const fn fresh(generation: u32) -> Self {
        Self {
            g: UNREACHABLE,
            h: 0,
            parent: None,
            slot: NO_SLOT,
            closed: false,
            generation,
        }
    }

    /// Estimated total cost `g + h`.
    #[inline]
    pub(crate) fn f(&self) -> i32 {
        self.g.saturating_add(self.h)
    }
}

/// Snapshot of one cell's search state after (or during) a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeState {
    /// Cost from the start.
    pub g: i32,
    /// Heuristic estimate to the goal (0 for Dijkstra).
    pub h: i32,
    /// Predecessor on the best known route.
    pub parent: Option<Point>,
    /// Whether the cell was finalised.
    pub closed: bool,
    /// Whether the cell is still in the open set.
    pub open: bool,
}

impl NodeState {
    /// `g + h`.
    #[inline]
    pub fn f(&self) -> i32 {
        self.g.saturating_add(self.h)
    }
}

/// Counters for the most recent run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Cells popped from the open set and closed.
    pub expanded: usize,
    /// Cells inserted into the open set.
    pub opened: usize,
    /// Decrease-key operations on cells already open.
    pub updated: usize,
}

// ---------------------------------------------------------------------------
// PathFinder
// ---------------------------------------------------------------------------

/// Reusable pathfinding state for grids.
///
/// `PathFinder` owns the per-cell search scratch (cost so far, heuristic,
/// parent, open-set slot) and the open-set heap, so repeated queries
/// allocate nothing after the first. Each query starts a new *generation*:
/// scratch left over from earlier runs is ignored and re-initialised the
/// first time a cell is touched, so results never depend on previous
/// queries.
///
/// One finder runs one search at a time (`&mut self`). Several finders can
/// search the same [`Grid`] concurrently.
#[derive(Debug, Clone)]
pub struct PathFinder {
    pub(crate) nodes: Vec<Node>,
    pub(crate) open: OpenSet,
    pub(crate) generation: u32,
    pub(crate) config: SearchConfig,
    pub(crate) stats: SearchStats,
}

impl PathFinder {
    /// Create a finder with buffers sized for `grid`.
    pub fn new(grid: &Grid) -> Self {
        Self::with_config(grid, SearchConfig::default())
    }

    /// Create a finder with a custom configuration.
    pub fn with_config(grid: &Grid, config: SearchConfig) -> Self {
        Self {
            nodes: vec![Node::default(); grid.len()],
            open: OpenSet::with_capacity(grid.len()),
            generation: 0,
            config,
            stats: SearchStats::default(),
        }
    }

    /// The active configuration.
    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Replace the configuration. Takes effect on the next query.
    pub fn set_config(&mut self, config: SearchConfig) {
        self.config = config;
    }

    /// Counters from the most recent query.
    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Search state of `p` from the most recent query, or `None` if the
    /// query never reached it (or `p` is outside `grid`).
    pub fn node_state(&self, grid: &Grid, p: Point) -> Option<NodeState> {
        let i = grid.idx(p)?;
        let n = self.nodes.get(i)?;
        if n.generation != self.generation || self.generation == 0 || n.g == UNREACHABLE {
            return None;
        }
        Some(NodeState {
            g: n.g,
            h: n.h,
            parent: n.parent.map(|pi| grid.point(pi)),
            closed: n.closed,
            open: self.open.contains(&self.nodes, i),
        })
    }

    // -----------------------------------------------------------------------
    // Run bookkeeping
    // -----------------------------------------------------------------------

    /// Start a new generation, growing the buffers if `grid` is larger than
    /// the one the finder was built for.
    pub(crate) fn begin_run(&mut self, grid: &Grid) {
        let len = grid.len();
        if self.nodes.len() < len {
            self.nodes.clear();
            self.nodes.resize(len, Node::default());
            self.open = OpenSet::with_capacity(len);
            self.generation = 0;
        }

        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Wrapped: stale stamps could collide with the new generation.
            self.nodes.fill(Node::default());
            self.generation = 1;
        }
        self.open.clear();
        self.stats = SearchStats::default();
    }

    /// Node `i`, re-initialised first if it belongs to an earlier run.
    #[inline]
    pub(crate) fn touch(&mut self, i: usize) -> &mut Node {
        let generation = self.generation;
        let n = &mut self.nodes[i];
        if n.generation != generation {
            *n = Node::fresh(generation);
        }
        n
    }
}
