//! Random obstacle layouts for exercising the search engines.
//!
//! Provides:
//! - **Noise fill**: every cell independently blocked with a fixed chance.
//! - **Cellular Automata Cave**: random walls smoothed with cellular
//!   automata rules into connected caverns.
//! - **Dividing walls** and **enclosures**: shapes that guarantee an
//!   unreachable goal.

use jumpgrid_core::{Grid, Point, Range};
use rand::{Rng, RngExt};

/// Independent per-cell noise.
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseConfig {
    /// Chance (0.0–1.0) that a cell is blocked.
    pub wall_pct: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self { wall_pct: 0.25 }
    }
}

/// A rule for one iteration of cellular automata smoothing.
#[derive(Debug, Clone, PartialEq)]
pub struct CellularAutomataRule {
    /// If a cell has >= this many wall neighbours in the 1-ring (8 cells),
    /// it becomes a wall.
    pub w_cutoff1: i32,
    /// If a cell has <= this many wall neighbours in the 2-ring (24 cells),
    /// it becomes a wall too. Fills large open areas with pillars.
    pub w_cutoff2: i32,
    /// Whether cells outside the grid count as walls.
    pub walls_out_of_range: bool,
    /// How many times to apply this rule.
    pub reps: usize,
}

impl Default for CellularAutomataRule {
    fn default() -> Self {
        Self {
            w_cutoff1: 5,
            w_cutoff2: 2,
            walls_out_of_range: true,
            reps: 4,
        }
    }
}

/// Cave generation parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CaveConfig {
    /// Chance (0.0–1.0) that a cell starts as a wall.
    pub wall_init_pct: f64,
    /// Smoothing rules, applied in order.
    pub rules: Vec<CellularAutomataRule>,
}

impl Default for CaveConfig {
    fn default() -> Self {
        Self {
            wall_init_pct: 0.45,
            rules: vec![
                CellularAutomataRule::default(),
                CellularAutomataRule {
                    w_cutoff2: -1,
                    reps: 3,
                    ..CellularAutomataRule::default()
                },
            ],
        }
    }
}

/// Map generator operating on a [`Grid`].
pub struct MapGen<R: Rng> {
    pub rng: R,
    pub grid: Grid,
}

impl<R: Rng> MapGen<R> {
    /// Create a generator over an all-walkable `width` × `height` grid.
    pub fn new(width: i32, height: i32, rng: R) -> Self {
        Self::with_grid(Grid::new(width, height), rng)
    }

    /// Create a generator over an existing grid.
    pub fn with_grid(grid: Grid, rng: R) -> Self {
        Self { rng, grid }
    }

    /// Give up the generator, keeping the grid.
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Block each cell independently with probability `cfg.wall_pct`.
    ///
    /// Returns the number of walkable cells.
    pub fn noise(&mut self, cfg: &NoiseConfig) -> usize {
        fill_noise(&mut self.grid, cfg, &mut self.rng)
    }

    /// Generate a cave using cellular automata. See [`carve_cave`].
    pub fn cellular_automata_cave(&mut self, cfg: &CaveConfig) -> usize {
        carve_cave(&mut self.grid, cfg, &mut self.rng)
    }

    /// Block the full-height column at `x`, splitting the grid in two.
    pub fn dividing_wall(&mut self, x: i32) {
        let h = self.grid.height();
        self.grid.fill_range(Range::new(x, 0, x + 1, h), false);
    }

    /// Block the 8 cells around `p`, leaving `p` itself walkable.
    ///
    /// Cells of the ring outside the grid are skipped; the grid edge walls
    /// them off already.
    pub fn enclose(&mut self, p: Point) {
        for q in p.neighbors_8() {
            self.grid.set_walkable(q, false);
        }
        self.grid.set_walkable(p, true);
    }

    /// A uniformly chosen walkable cell, or `None` if there is none.
    pub fn random_walkable(&mut self) -> Option<Point> {
        random_walkable(&self.grid, &mut self.rng)
    }
}

/// Block each cell of `grid` independently with probability `cfg.wall_pct`.
///
/// Returns the number of walkable cells.
pub fn fill_noise<R: Rng + ?Sized>(grid: &mut Grid, cfg: &NoiseConfig, rng: &mut R) -> usize {
    let pct = cfg.wall_pct.clamp(0.0, 1.0);
    for p in grid.bounds() {
        let blocked = rng.random_bool(pct);
        grid.set_walkable(p, !blocked);
    }
    let open = grid.walkable_count();
    log::debug!("noise fill {}x{}: {open} walkable cells", grid.width(), grid.height());
    open
}

/// Generate a cave in `grid` using cellular automata.
///
/// 1. Initialise each cell randomly: `wall_init_pct` chance of being a
///    wall, walkable otherwise.
/// 2. Apply each rule in `cfg.rules` for its number of repetitions.
///
/// Returns the number of walkable cells in the final grid.
pub fn carve_cave<R: Rng + ?Sized>(grid: &mut Grid, cfg: &CaveConfig, rng: &mut R) -> usize {
    let bounds = grid.bounds();
    let init = cfg.wall_init_pct.clamp(0.0, 1.0);
    for p in bounds {
        let wall = rng.random_bool(init);
        grid.set_walkable(p, !wall);
    }

    // Next generation, indexed like the grid.
    let mut scratch = vec![false; grid.len()];
    for rule in &cfg.rules {
        for _ in 0..rule.reps {
            for (i, p) in bounds.iter().enumerate() {
                let walls1 = count_walls_ring(grid, p, 1, rule.walls_out_of_range);
                let walls2 = count_walls_ring(grid, p, 2, rule.walls_out_of_range);
                scratch[i] = !(walls1 >= rule.w_cutoff1 || walls2 <= rule.w_cutoff2);
            }
            for (i, p) in bounds.iter().enumerate() {
                grid.set_walkable(p, scratch[i]);
            }
        }
    }

    let open = grid.walkable_count();
    log::debug!(
        "cave {}x{}: {open} walkable cells after {} rules",
        grid.width(),
        grid.height(),
        cfg.rules.len()
    );
    open
}

/// Count wall cells within Chebyshev distance `radius` of `center`.
fn count_walls_ring(grid: &Grid, center: Point, radius: i32, walls_out_of_range: bool) -> i32 {
    let mut count = 0;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx == 0 && dy == 0 {
                continue;
            }
            let p = Point::new(center.x + dx, center.y + dy);
            let wall = if grid.contains(p) {
                grid.is_blocked(p)
            } else {
                walls_out_of_range
            };
            if wall {
                count += 1;
            }
        }
    }
    count
}

/// A uniformly chosen walkable cell of `grid`, or `None` if there is none.
pub fn random_walkable<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Option<Point> {
    let open = grid.walkable_count();
    if open == 0 {
        return None;
    }
    let k = rng.random_range(0..open);
    grid.cells().filter(|c| c.walkable).nth(k).map(|c| c.pos)
}

/// A `width` × `height` grid with noise obstacles.
pub fn noise_grid<R: Rng + ?Sized>(width: i32, height: i32, cfg: &NoiseConfig, rng: &mut R) -> Grid {
    let mut grid = Grid::new(width, height);
    fill_noise(&mut grid, cfg, rng);
    grid
}

/// A `width` × `height` cellular automata cave.
pub fn cave_grid<R: Rng + ?Sized>(width: i32, height: i32, cfg: &CaveConfig, rng: &mut R) -> Grid {
    let mut grid = Grid::new(width, height);
    carve_cave(&mut grid, cfg, rng);
    grid
}
