use jumpgrid_core::{Direction, Grid, Point};

use crate::distance;
use crate::error::PathError;
use crate::finder::{Node, PathNode};

/// A found path.
///
/// Nodes are stored goal first, start last, each with its cost from the
/// start; the first node's cost is the total path cost. Dijkstra and A*
/// paths step between adjacent cells. JPS paths list only jump points, and
/// consecutive nodes are joined by straight or diagonal lines;
/// [`expand`](Path::expand) turns them into unit steps.
///
/// Paths only come out of a search: with the `serde` feature they are
/// `Serialize` but not `Deserialize`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Path {
    nodes: Vec<PathNode>,
}

impl Path {
    /// Path consisting of the start cell only.
    pub(crate) fn single(p: Point) -> Self {
        Self {
            nodes: vec![PathNode { pos: p, cost: 0 }],
        }
    }

    /// Total cost from start to goal.
    #[inline]
    pub fn cost(&self) -> i32 {
        self.nodes[0].cost
    }

    /// Number of cells, both endpoints included.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a path holds at least its start cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The goal cell.
    #[inline]
    pub fn goal(&self) -> Point {
        self.nodes[0].pos
    }

    /// The start cell.
    #[inline]
    pub fn start(&self) -> Point {
        self.nodes[self.nodes.len() - 1].pos
    }

    /// Nodes in goal → start order.
    #[inline]
    pub fn nodes(&self) -> &[PathNode] {
        &self.nodes
    }

    /// Nodes in start → goal order.
    pub fn iter_forward(&self) -> impl DoubleEndedIterator<Item = &PathNode> {
        self.nodes.iter().rev()
    }

    /// Positions in start → goal order.
    pub fn points(&self) -> Vec<Point> {
        self.iter_forward().map(|n| n.pos).collect()
    }

    /// Consume the path, returning nodes in start → goal order.
    pub fn into_forward(mut self) -> Vec<PathNode> {
        self.nodes.reverse();
        self.nodes
    }

    /// Whether every consecutive pair of cells is adjacent.
    pub fn is_contiguous(&self) -> bool {
        self.nodes.windows(2).all(|w| w[0].pos.is_adjacent(w[1].pos))
    }

    /// The same route with every intermediate cell listed.
    ///
    /// Each segment is walked diagonally first, then straight. For a path
    /// that is already contiguous the result equals `self`.
    pub fn expand(&self) -> Path {
        let mut forward: Vec<PathNode> = Vec::with_capacity(self.nodes.len());
        let mut iter = self.iter_forward();
        let Some(&first) = iter.next() else {
            return self.clone();
        };
        forward.push(first);
        let mut cur = first;
        for &next in iter {
            while let Some(d) = Direction::between(cur.pos, next.pos) {
                let pos = cur.pos.step(d);
                cur = PathNode {
                    pos,
                    cost: cur.cost + distance::step_cost(cur.pos, pos),
                };
                forward.push(cur);
            }
        }
        forward.reverse();
        Path { nodes: forward }
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathNode;
    type IntoIter = std::slice::Iter<'a, PathNode>;

    /// Iterates goal → start.
    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

/// Follow parent links from `goal` back to `start`.
///
/// Fails with [`PathError::PathTooLong`] if the chain has more than `limit`
/// cells (a cycle or runaway chain) and with
/// [`PathError::BrokenParentChain`] if it stops short of `start`.
pub(crate) fn reconstruct(
    grid: &Grid,
    nodes: &[Node],
    start: usize,
    goal: usize,
    limit: usize,
) -> Result<Path, PathError> {
    let mut out = Vec::new();
    let mut ci = goal;
    while ci != start {
        if out.len() + 1 >= limit {
            log::error!(
                "path reconstruction from {} exceeded {limit} cells; parent chain is corrupted",
                grid.point(goal)
            );
            return Err(PathError::PathTooLong { limit });
        }
        out.push(PathNode {
            pos: grid.point(ci),
            cost: nodes[ci].g,
        });
        ci = match nodes[ci].parent {
            Some(p) => p,
            None => {
                let pos = grid.point(ci);
                log::error!("parent chain broken at {pos}");
                return Err(PathError::BrokenParentChain { pos });
            }
        };
    }
    out.push(PathNode {
        pos: grid.point(start),
        cost: 0,
    });
    Ok(Path { nodes: out })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Node table for a `len`-cell straight row where cell `i` has parent
    /// `i - 1` and cost `10 * i`.
    fn chain(len: usize) -> Vec<Node> {
        (0..len)
            .map(|i| Node {
                g: 10 * i as i32,
                parent: i.checked_sub(1),
                ..Node::default()
            })
            .collect()
    }

    #[test]
    fn reconstruct_goal_to_start() {
        let grid = Grid::new(6, 1);
        let nodes = chain(6);
        let path = reconstruct(&grid, &nodes, 0, 5, 100).unwrap();
        assert_eq!(path.len(), 6);
        assert_eq!(path.goal(), Point::new(5, 0));
        assert_eq!(path.start(), Point::new(0, 0));
        assert_eq!(path.cost(), 50);
        assert_eq!(path.nodes()[0].pos, Point::new(5, 0));
        assert!(path.is_contiguous());
        assert_eq!(
            path.points(),
            (0..6).map(|x| Point::new(x, 0)).collect::<Vec<_>>()
        );
    }

    #[test]
    fn reconstruct_start_equals_goal() {
        let grid = Grid::new(1, 1);
        let nodes = chain(1);
        let path = reconstruct(&grid, &nodes, 0, 0, 10).unwrap();
        assert_eq!(path.len(), 1);
        assert_eq!(path.cost(), 0);
    }

    #[test]
    fn reconstruct_detects_cycle() {
        let grid = Grid::new(3, 1);
        let mut nodes = chain(3);
        // 2 -> 1 -> 2 -> ... never reaches 0.
        nodes[1].parent = Some(2);
        let err = reconstruct(&grid, &nodes, 0, 2, 50).unwrap_err();
        assert_eq!(err, PathError::PathTooLong { limit: 50 });
    }

    #[test]
    fn reconstruct_respects_limit_exactly() {
        let grid = Grid::new(6, 1);
        let nodes = chain(6);
        assert!(reconstruct(&grid, &nodes, 0, 5, 6).is_ok());
        assert_eq!(
            reconstruct(&grid, &nodes, 0, 5, 5).unwrap_err(),
            PathError::PathTooLong { limit: 5 }
        );
    }

    #[test]
    fn reconstruct_detects_broken_chain() {
        let grid = Grid::new(4, 1);
        let mut nodes = chain(4);
        nodes[2].parent = None;
        let err = reconstruct(&grid, &nodes, 0, 3, 50).unwrap_err();
        assert_eq!(
            err,
            PathError::BrokenParentChain {
                pos: Point::new(2, 0)
            }
        );
    }

    #[test]
    fn expand_fills_in_jump_segments() {
        // Jump points (0,0) -> (3,3) -> (3,5), goal first.
        let path = Path {
            nodes: vec![
                PathNode {
                    pos: Point::new(3, 5),
                    cost: 62,
                },
                PathNode {
                    pos: Point::new(3, 3),
                    cost: 42,
                },
                PathNode {
                    pos: Point::new(0, 0),
                    cost: 0,
                },
            ],
        };
        assert!(!path.is_contiguous());
        let full = path.expand();
        assert!(full.is_contiguous());
        assert_eq!(full.len(), 6);
        assert_eq!(full.cost(), 62);
        assert_eq!(full.start(), Point::new(0, 0));
        assert_eq!(full.goal(), Point::new(3, 5));
        assert_eq!(full.expand(), full);
    }

    #[test]
    fn expand_non_line_segment_goes_diagonal_first() {
        let path = Path {
            nodes: vec![
                PathNode {
                    pos: Point::new(3, 1),
                    cost: 34,
                },
                PathNode {
                    pos: Point::new(0, 0),
                    cost: 0,
                },
            ],
        };
        let full = path.expand();
        assert_eq!(
            full.points(),
            vec![
                Point::new(0, 0),
                Point::new(1, 1),
                Point::new(2, 1),
                Point::new(3, 1)
            ]
        );
        assert_eq!(full.cost(), 34);
    }

    #[test]
    fn into_forward_reverses() {
        let path = Path::single(Point::new(2, 2));
        let fwd = path.into_forward();
        assert_eq!(fwd, vec![PathNode { pos: Point::new(2, 2), cost: 0 }]);
    }
}
