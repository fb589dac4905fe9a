// =============================================================================
// GEOMETRY.RS: Grid and angle helpers shared by the simulation
//
// - Cell lookup for continuous positions
// - Angle normalisation (view angle, sprite bearing)
// - Neighbour offsets for 8-connected grid traversal
// =============================================================================

use std::f32::consts::{PI, TAU};

use glam::Vec2;

/// A grid cell as `(col, row)`.
pub type Cell = (i32, i32);

/// All 8 directions. Cardinals come first so that breadth-first searches
/// prefer straight steps when several parents are equally close.
pub const ALL_DIRECTIONS: [(i32, i32); 8] = [
    (0, -1),  // N
    (1, 0),   // E
    (0, 1),   // S
    (-1, 0),  // W
    (1, -1),  // NE
    (1, 1),   // SE
    (-1, 1),  // SW
    (-1, -1), // NW
];

/// The cell containing a continuous position.
#[inline]
pub fn cell_of(pos: Vec2) -> Cell {
    (pos.x.floor() as i32, pos.y.floor() as i32)
}

/// Centre point of a cell.
#[inline]
pub fn cell_center(cell: Cell) -> Vec2 {
    Vec2::new(cell.0 as f32 + 0.5, cell.1 as f32 + 0.5)
}

/// Chebyshev ("chessboard") distance: the number of 8-directional steps
/// between two cells on an open grid.
#[inline]
pub fn distance_chebyshev(a: Cell, b: Cell) -> i32 {
    (a.0 - b.0).abs().max((a.1 - b.1).abs())
}

/// Wrap an angle into `[0, τ)`.
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if a >= TAU { 0.0 } else { a }
}

/// Signed difference `a - b` wrapped into `(-π, π]`.
#[inline]
pub fn angle_delta(a: f32, b: f32) -> f32 {
    let d = (a - b).rem_euclid(TAU);
    if d > PI { d - TAU } else { d }
}

/// Unit vector for a heading.
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
