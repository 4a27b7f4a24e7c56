//! The [`Grid`] type: a fixed-size occupancy grid of walkable and blocked cells.

use std::fmt;

use crate::geom::{Point, Range};

/// One grid position: its coordinates and whether it may be traversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub pos: Point,
    pub walkable: bool,
}

/// A width × height occupancy grid.
///
/// The grid owns every cell. Its dimensions are fixed at construction;
/// walkability can be edited while setting a map up, but searches only ever
/// read it. Cells are addressed either by [`Point`] or by their flat
/// row-major index (`y * width + x`), which search code uses as a cell id.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "GridData"))]
pub struct Grid {
    width: i32,
    height: i32,
    walkable: Vec<bool>,
}

/// Unchecked serialized form of a [`Grid`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct GridData {
    width: i32,
    height: i32,
    walkable: Vec<bool>,
}

#[cfg(feature = "serde")]
impl TryFrom<GridData> for Grid {
    type Error = String;

    fn try_from(data: GridData) -> Result<Self, Self::Error> {
        if data.width < 0 || data.height < 0 {
            return Err(format!("negative grid size {}x{}", data.width, data.height));
        }
        let len = data.width as usize * data.height as usize;
        if data.walkable.len() != len {
            return Err(format!(
                "{}x{} grid needs {len} cells, got {}",
                data.width,
                data.height,
                data.walkable.len()
            ));
        }
        Ok(Self {
            width: data.width,
            height: data.height,
            walkable: data.walkable,
        })
    }
}

impl Grid {
    /// Create a new grid where every cell is walkable.
    pub fn new(width: i32, height: i32) -> Self {
        Self::filled(width, height, true)
    }

    /// Create a new grid where every cell has the given walkability.
    pub fn filled(width: i32, height: i32, walkable: bool) -> Self {
        let w = width.max(0);
        let h = height.max(0);
        Self {
            width: w,
            height: h,
            walkable: vec![walkable; (w as usize) * (h as usize)],
        }
    }

    /// Width in cells.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height in cells.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// The bounding range `[(0, 0), (width, height))`.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.walkable.len()
    }

    /// Whether the grid has no cells at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.walkable.is_empty()
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    /// Flat index of `p`, or `None` if `p` is outside the grid.
    #[inline]
    pub fn idx(&self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some((p.y as usize) * (self.width as usize) + (p.x as usize))
    }

    /// Point for a flat index. The index must be `< len()`.
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        let w = self.width as usize;
        Point::new((idx % w) as i32, (idx / w) as i32)
    }

    /// Whether `p` is inside the grid and walkable. Points outside the grid
    /// count as blocked.
    #[inline]
    pub fn is_walkable(&self, p: Point) -> bool {
        match self.idx(p) {
            Some(i) => self.walkable[i],
            None => false,
        }
    }

    /// Negation of [`is_walkable`](Grid::is_walkable).
    #[inline]
    pub fn is_blocked(&self, p: Point) -> bool {
        !self.is_walkable(p)
    }

    /// Walkability by flat index.
    #[inline]
    pub fn is_walkable_idx(&self, idx: usize) -> bool {
        self.walkable.get(idx).copied().unwrap_or(false)
    }

    /// Set the walkability of `p`. Returns `false` (and does nothing) if `p`
    /// is outside the grid.
    pub fn set_walkable(&mut self, p: Point, walkable: bool) -> bool {
        match self.idx(p) {
            Some(i) => {
                self.walkable[i] = walkable;
                true
            }
            None => false,
        }
    }

    /// Mark every cell of `r` (clipped to the grid) as blocked or walkable.
    pub fn fill_range(&mut self, r: Range, walkable: bool) {
        for p in r {
            self.set_walkable(p, walkable);
        }
    }

    /// Row-major iterator over every cell.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.bounds().iter().zip(self.walkable.iter()).map(|(pos, &walkable)| Cell { pos, walkable })
    }

    /// Number of walkable cells.
    pub fn walkable_count(&self) -> usize {
        self.walkable.iter().filter(|&&w| w).count()
    }

    /// The in-bounds cells among the eight surrounding `p`.
    pub fn neighbors(&self, p: Point) -> impl Iterator<Item = Point> + '_ {
        p.neighbors_8().into_iter().filter(move |&n| self.contains(n))
    }

    /// The walkable cells among the eight surrounding `p`.
    pub fn walkable_neighbors(&self, p: Point) -> impl Iterator<Item = Point> + '_ {
        p.neighbors_8().into_iter().filter(move |&n| self.is_walkable(n))
    }
}

impl fmt::Display for Grid {
    /// Renders `#` for blocked and `.` for walkable cells, one row per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                let ch = if self.is_walkable(Point::new(x, y)) { '.' } else { '#' };
                write!(f, "{ch}")?;
            }
            if y + 1 < self.height {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
