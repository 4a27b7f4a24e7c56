//! Text maps.
//!
//! An [`AsciiMap`] parses a block of text into a [`Grid`] plus optional
//! start and goal markers:
//!
//! | char | meaning |
//! |---|---|
//! | `.` | walkable |
//! | `#` | blocked |
//! | `S` | start (walkable) |
//! | `G`, `E` | goal (walkable) |
//!
//! Leading and trailing whitespace is ignored, both around the block and on
//! each line, so maps can be written as indented string literals. Every
//! remaining line must have the same width.

use std::fmt;
use std::str::FromStr;

use crate::geom::Point;
use crate::grid::Grid;

/// A parsed text map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsciiMap {
    pub grid: Grid,
    pub start: Option<Point>,
    pub goal: Option<Point>,
}

impl AsciiMap {
    /// Parse a text map.
    pub fn parse(s: &str) -> Result<Self, MapError> {
        let lines: Vec<&str> = s.trim().lines().map(str::trim).collect();
        let height = lines.len() as i32;
        let width = lines.first().map_or(0, |l| l.chars().count()) as i32;
        if width == 0 {
            return Err(MapError::Empty);
        }

        let mut grid = Grid::new(width, height);
        let mut start = None;
        let mut goal = None;

        for (y, line) in lines.iter().enumerate() {
            let y = y as i32;
            let got = line.chars().count() as i32;
            if got != width {
                return Err(MapError::InconsistentWidth {
                    line: y,
                    expected: width,
                    got,
                });
            }
            for (x, ch) in line.chars().enumerate() {
                let p = Point::new(x as i32, y);
                match ch {
                    '.' => {}
                    '#' => {
                        grid.set_walkable(p, false);
                    }
                    'S' => {
                        if start.replace(p).is_some() {
                            return Err(MapError::DuplicateMarker { ch, pos: p });
                        }
                    }
                    'G' | 'E' => {
                        if goal.replace(p).is_some() {
                            return Err(MapError::DuplicateMarker { ch, pos: p });
                        }
                    }
                    _ => return Err(MapError::InvalidChar { ch, pos: p }),
                }
            }
        }

        Ok(Self { grid, start, goal })
    }

    /// Render the map, letting `overlay` replace the character at any
    /// position. Start and goal markers are drawn unless overlaid.
    pub fn render(&self, overlay: impl Fn(Point) -> Option<char>) -> String {
        render(&self.grid, |p| {
            overlay(p).or_else(|| {
                if Some(p) == self.start {
                    Some('S')
                } else if Some(p) == self.goal {
                    Some('G')
                } else {
                    None
                }
            })
        })
    }
}

impl FromStr for AsciiMap {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Render a grid as text (`#` / `.`), letting `overlay` replace the
/// character at any position.
pub fn render(grid: &Grid, overlay: impl Fn(Point) -> Option<char>) -> String {
    let mut out = String::with_capacity(grid.len() + grid.height() as usize);
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let p = Point::new(x, y);
            let ch = overlay(p).unwrap_or(if grid.is_walkable(p) { '.' } else { '#' });
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

/// Errors that can occur when parsing a text map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// The input contains no cells.
    Empty,
    /// A line's width differs from the first line's.
    InconsistentWidth { line: i32, expected: i32, got: i32 },
    /// A character outside the map alphabet was found.
    InvalidChar { ch: char, pos: Point },
    /// A start or goal marker appears more than once.
    DuplicateMarker { ch: char, pos: Point },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "map: no cells"),
            Self::InconsistentWidth {
                line,
                expected,
                got,
            } => write!(
                f,
                "map: line {line} has width {got}, expected {expected}"
            ),
            Self::InvalidChar { ch, pos } => {
                write!(f, "map contains invalid character \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::DuplicateMarker { ch, pos } => {
                write!(f, "map: duplicate \u{201c}{ch}\u{201d} marker at {pos}")
            }
        }
    }
}

impl std::error::Error for MapError {}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOM: &str = "
        S..#
        .#.#
        ...G
    ";

    #[test]
    fn parse_markers_and_walls() {
        let m = AsciiMap::parse(ROOM).unwrap();
        assert_eq!(m.grid.width(), 4);
        assert_eq!(m.grid.height(), 3);
        assert_eq!(m.start, Some(Point::new(0, 0)));
        assert_eq!(m.goal, Some(Point::new(3, 2)));
        assert!(m.grid.is_walkable(Point::new(0, 0)));
        assert!(m.grid.is_walkable(Point::new(3, 2)));
        assert!(m.grid.is_blocked(Point::new(1, 1)));
        assert_eq!(m.grid.walkable_count(), 9);
    }

    #[test]
    fn e_is_a_goal_alias() {
        let m: AsciiMap = "S.E".parse().unwrap();
        assert_eq!(m.goal, Some(Point::new(2, 0)));
    }

    #[test]
    fn inconsistent_width_is_rejected() {
        let err = AsciiMap::parse("...\n..\n...").unwrap_err();
        assert_eq!(
            err,
            MapError::InconsistentWidth {
                line: 1,
                expected: 3,
                got: 2
            }
        );
    }

    #[test]
    fn invalid_char_is_rejected() {
        let err = AsciiMap::parse("..\n.x").unwrap_err();
        assert_eq!(
            err,
            MapError::InvalidChar {
                ch: 'x',
                pos: Point::new(1, 1)
            }
        );
        assert!(err.to_string().contains("(1, 1)"));
    }

    #[test]
    fn duplicate_start_is_rejected() {
        let err = AsciiMap::parse("S.S").unwrap_err();
        assert!(matches!(err, MapError::DuplicateMarker { ch: 'S', .. }));
    }

    #[test]
    fn empty_is_rejected() {
        assert_eq!(AsciiMap::parse("  \n ").unwrap_err(), MapError::Empty);
    }

    #[test]
    fn render_round_trips() {
        let m = AsciiMap::parse(ROOM).unwrap();
        let text = m.render(|_| None);
        assert_eq!(text, "S..#\n.#.#\n...G\n");
        assert_eq!(AsciiMap::parse(&text).unwrap(), m);
    }

    #[test]
    fn render_overlay_wins() {
        let m = AsciiMap::parse("S.G").unwrap();
        let text = m.render(|p| (p.x == 1).then_some('*'));
        assert_eq!(text, "S*G\n");
    }
}
