use jumpgrid_core::Point;

/// Cost of one orthogonal step.
pub const ORTHOGONAL_COST: i32 = 10;

/// Cost of one diagonal step (10·√2, rounded).
pub const DIAGONAL_COST: i32 = 14;

/// Octile distance between two points under the 10/14 cost model.
///
/// This is the exact cost of the cheapest unobstructed 8-way route, and the
/// heuristic used by A* and JPS.
#[inline]
pub fn octile(a: Point, b: Point) -> i32 {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    let (lo, hi) = if dx < dy { (dx, dy) } else { (dy, dx) };
    DIAGONAL_COST * lo + ORTHOGONAL_COST * (hi - lo)
}

/// Cost of a single step between adjacent cells: [`DIAGONAL_COST`] when both
/// coordinates change, [`ORTHOGONAL_COST`] otherwise.
#[inline]
pub fn step_cost(from: Point, to: Point) -> i32 {
    if from.x != to.x && from.y != to.y {
        DIAGONAL_COST
    } else {
        ORTHOGONAL_COST
    }
}
