// =============================================================================
// RAYCAST.RS: DDA grid traversal, depth buffer and line-of-sight
// =============================================================================

use glam::Vec2;

use crate::camera::Projection;
use crate::geometry::{Cell, cell_of};
use crate::map::GridMap;

/// Step length substituted for an axis the ray never crosses.
const HUGE: f32 = 1e30;

/// Which family of grid lines a ray crossed when it hit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WallSide {
    /// Crossed a vertical grid line (x-side).
    Vertical,
    /// Crossed a horizontal grid line (y-side). Drawn darker.
    Horizontal,
}

/// Result of one ray for one screen column.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RayHit {
    /// Perpendicular (fisheye-corrected) distance.
    pub depth: f32,
    pub side: WallSide,
    /// Wall texture id, `None` when nothing was hit within `max_depth`.
    pub texture: Option<u8>,
    /// Texture coordinate along the wall face, in `[0, 1)`.
    pub offset: f32,
    /// Projected wall height in pixels.
    pub proj_height: f32,
}

/// A raw, uncorrected DDA hit.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DdaHit {
    pub distance: f32,
    pub side: WallSide,
    pub cell: Cell,
    pub point: Vec2,
}

/// Per-axis DDA stepping state.
struct Dda {
    cell: Cell,
    step: (i32, i32),
    side_dist: Vec2,
    delta_dist: Vec2,
}

impl Dda {
    fn new(origin: Vec2, dir: Vec2) -> Self {
        let cell = cell_of(origin);
        let delta_dist = Vec2::new(
            if dir.x == 0.0 { HUGE } else { (1.0 / dir.x).abs() },
            if dir.y == 0.0 { HUGE } else { (1.0 / dir.y).abs() },
        );
        let (sx, side_x) = if dir.x < 0.0 {
            (-1, (origin.x - cell.0 as f32) * delta_dist.x)
        } else {
            (1, (cell.0 as f32 + 1.0 - origin.x) * delta_dist.x)
        };
        let (sy, side_y) = if dir.y < 0.0 {
            (-1, (origin.y - cell.1 as f32) * delta_dist.y)
        } else {
            (1, (cell.1 as f32 + 1.0 - origin.y) * delta_dist.y)
        };
        Self { cell, step: (sx, sy), side_dist: Vec2::new(side_x, side_y), delta_dist }
    }

    /// Distance along the ray to the next grid line.
    #[inline]
    fn next_distance(&self) -> f32 {
        self.side_dist.x.min(self.side_dist.y)
    }

    /// Enter the next cell; returns the distance travelled and the side crossed.
    #[inline]
    fn advance(&mut self) -> (f32, WallSide) {
        if self.side_dist.x < self.side_dist.y {
            let d = self.side_dist.x;
            self.side_dist.x += self.delta_dist.x;
            self.cell.0 += self.step.0;
            (d, WallSide::Vertical)
        } else {
            let d = self.side_dist.y;
            self.side_dist.y += self.delta_dist.y;
            self.cell.1 += self.step.1;
            (d, WallSide::Horizontal)
        }
    }
}

/// March a ray from `origin` along `angle` until it enters a wall cell.
///
/// The origin cell itself is never tested. Returns `None` when the ray
/// travels further than `max_depth` without a hit.
pub fn cast_ray(map: &GridMap, origin: Vec2, angle: f32, max_depth: f32) -> Option<DdaHit> {
    let dir = Vec2::new(angle.cos(), angle.sin());
    let mut dda = Dda::new(origin, dir);
    loop {
        let (distance, side) = dda.advance();
        if distance > max_depth {
            return None;
        }
        if map.is_wall(dda.cell) {
            return Some(DdaHit { distance, side, cell: dda.cell, point: origin + dir * distance });
        }
    }
}

/// `true` when a wall cell lies on the segment `from → to`.
///
/// The cell containing `from` is not tested. Zero-length segments are never
/// blocked.
pub fn segment_blocked(map: &GridMap, from: Vec2, to: Vec2) -> bool {
    let span = to - from;
    let len = span.length();
    if len < 1e-6 {
        return false;
    }
    let mut dda = Dda::new(from, span / len);
    while dda.next_distance() <= len {
        dda.advance();
        if map.is_wall(dda.cell) {
            return true;
        }
    }
    false
}

#[inline]
pub fn has_line_of_sight(map: &GridMap, from: Vec2, to: Vec2) -> bool {
    !segment_blocked(map, from, to)
}

/// Texture coordinate along the face that was hit. Mirrored per viewing side
/// so every face reads left to right.
fn texture_offset(hit: &DdaHit, angle: f32) -> f32 {
    let (frac, flip) = match hit.side {
        WallSide::Vertical => (hit.point.y.rem_euclid(1.0), angle.cos() <= 0.0),
        WallSide::Horizontal => (hit.point.x.rem_euclid(1.0), angle.sin() > 0.0),
    };
    let offset = if flip { 1.0 - frac } else { frac };
    offset.clamp(0.0, 1.0 - f32::EPSILON)
}

// ── RayCaster ─────────────────────────────────────────────────────────────────

/// Owns the per-frame depth buffer.
pub struct RayCaster {
    projection: Projection,
    hits: Vec<RayHit>,
}

impl RayCaster {
    pub fn new(projection: Projection) -> Self {
        let miss = Self::miss(&projection);
        Self { projection, hits: vec![miss; projection.num_rays] }
    }

    fn miss(p: &Projection) -> RayHit {
        RayHit {
            depth: p.max_depth,
            side: WallSide::Vertical,
            texture: None,
            offset: 0.0,
            proj_height: 0.0,
        }
    }

    pub fn projection(&self) -> &Projection { &self.projection }

    /// Recompute every column for a viewer at `pos` looking along `view_angle`.
    pub fn update(&mut self, map: &GridMap, pos: Vec2, view_angle: f32) {
        let p = self.projection;
        for (i, slot) in self.hits.iter_mut().enumerate() {
            let angle = p.ray_angle(view_angle, i);
            *slot = match cast_ray(map, pos, angle, p.max_depth) {
                Some(hit) => {
                    let depth = hit.distance * (view_angle - angle).cos();
                    RayHit {
                        depth,
                        side: hit.side,
                        texture: map.wall_at(hit.cell),
                        offset: texture_offset(&hit, angle),
                        proj_height: p.projected_height(depth),
                    }
                }
                None => Self::miss(&p),
            };
        }
    }

    /// The depth buffer, one entry per ray, left to right.
    pub fn hits(&self) -> &[RayHit] { &self.hits }

    /// Wall depth covering screen column `x`.
    pub fn depth_at_screen_x(&self, x: f32) -> f32 {
        self.hits[self.projection.ray_at(x)].depth
    }
}
