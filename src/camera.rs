use glam::Vec2;

use crate::config::Settings;
use crate::geometry::angle_delta;

/// Screen and field-of-view constants derived once from [`Settings`].
///
/// Shared by the ray caster, sprite projection and hit-scan so that all three
/// agree on where a given view-relative angle lands on screen.
///
/// ```text
/// screen_x = (half_num_rays + delta / delta_angle) * scale
/// ```
/// where `delta` is the signed angle between the view direction and the
/// object. Ray `i` is cast through the centre of its column, so ray angles and
/// `screen_x` use the same mapping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub width: f32,
    pub height: f32,
    pub half_width: f32,
    pub half_height: f32,
    pub num_rays: usize,
    pub half_num_rays: f32,
    pub fov: f32,
    pub half_fov: f32,
    /// Angle between neighbouring rays.
    pub delta_angle: f32,
    /// Distance from the eye to the projection plane, in pixels.
    pub screen_dist: f32,
    /// Screen pixels per ray.
    pub scale: f32,
    pub max_depth: f32,
}

impl Projection {
    pub fn new(settings: &Settings) -> Self {
        let width = settings.width as f32;
        let height = settings.height as f32;
        let num_rays = settings.num_rays().max(1);
        let half_fov = settings.fov * 0.5;
        Self {
            width,
            height,
            half_width: width * 0.5,
            half_height: height * 0.5,
            num_rays,
            half_num_rays: num_rays as f32 * 0.5,
            fov: settings.fov,
            half_fov,
            delta_angle: settings.fov / num_rays as f32,
            screen_dist: (width * 0.5) / half_fov.tan(),
            scale: width / num_rays as f32,
            max_depth: settings.max_depth,
        }
    }

    /// Absolute angle of ray `index` for a view looking along `view_angle`.
    #[inline]
    pub fn ray_angle(&self, view_angle: f32, index: usize) -> f32 {
        view_angle - self.half_fov + (index as f32 + 0.5) * self.delta_angle
    }

    /// Horizontal screen position of a view-relative angle.
    #[inline]
    pub fn screen_x(&self, delta: f32) -> f32 {
        (self.half_num_rays + delta / self.delta_angle) * self.scale
    }

    /// Ray index covering screen column `x`, clamped to the valid range.
    #[inline]
    pub fn ray_at(&self, x: f32) -> usize {
        let i = (x / self.scale).floor();
        if i <= 0.0 { 0 } else { (i as usize).min(self.num_rays - 1) }
    }

    /// Projected height in pixels of a unit-height object at `depth`.
    #[inline]
    pub fn projected_height(&self, depth: f32) -> f32 {
        self.screen_dist / (depth + 1e-4)
    }

    /// Place a billboard at `pos` on screen for a viewer at `eye` looking
    /// along `view_angle`.
    ///
    /// Returns `None` when the object is nearer than [`NEAR_CULL`] (measured
    /// perpendicular to the view) or lies entirely off-screen.
    pub fn project(&self, eye: Vec2, view_angle: f32, pos: Vec2, shape: BillboardShape) -> Option<SpriteProjection> {
        let to = pos - eye;
        let delta = angle_delta(to.y.atan2(to.x), view_angle);
        let norm_dist = to.length() * delta.cos();
        if norm_dist <= NEAR_CULL {
            return None;
        }
        let screen_x = self.screen_x(delta);
        let height = self.screen_dist / norm_dist * shape.scale;
        let width = height * shape.aspect;
        if screen_x + width * 0.5 < 0.0 || screen_x - width * 0.5 > self.width {
            return None;
        }
        let top = self.half_height - height * 0.5 + height * shape.height_shift;
        Some(SpriteProjection { screen_x, norm_dist, width, height, top })
    }
}

/// Sprites nearer than this are not drawn or targeted.
pub const NEAR_CULL: f32 = 0.5;

/// Size parameters of a billboard.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BillboardShape {
    pub scale: f32,
    /// Image width over height.
    pub aspect: f32,
    /// Downward shift as a fraction of projected height.
    pub height_shift: f32,
}

/// Where a billboard lands on screen.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpriteProjection {
    /// Horizontal centre, in pixels.
    pub screen_x: f32,
    /// Distance measured along the view direction.
    pub norm_dist: f32,
    pub width: f32,
    pub height: f32,
    /// Top edge, in pixels.
    pub top: f32,
}

impl SpriteProjection {
    pub fn left(&self) -> f32 { self.screen_x - self.width * 0.5 }
    pub fn right(&self) -> f32 { self.screen_x + self.width * 0.5 }

    /// `true` when the billboard covers screen column `x`.
    pub fn spans(&self, x: f32) -> bool {
        self.left() < x && x < self.right()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centre_ray_points_along_view() {
        let p = Projection::new(&Settings::default());
        let centre = p.screen_x(0.0);
        assert!((centre - p.half_width).abs() < 1e-3);
        // Screen centre sits between the two middle rays.
        let left = p.ray_angle(1.0, p.num_rays / 2 - 1);
        let right = p.ray_angle(1.0, p.num_rays / 2);
        assert!(((left + right) * 0.5 - 1.0).abs() < 1e-5);
    }

    #[test]
    fn ray_at_clamps() {
        let p = Projection::new(&Settings::default());
        assert_eq!(p.ray_at(-10.0), 0);
        assert_eq!(p.ray_at(p.width + 50.0), p.num_rays - 1);
        assert_eq!(p.ray_at(5.0), 2);
    }
}
