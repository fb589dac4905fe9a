use crate::camera::Projection;
use crate::raycast::{RayHit, WallSide};

use super::frame::{FrameBuffer, Rgba, shade};
use super::texture::Texture;

/// Brightness of walls hit on a horizontal grid line.
const HORIZONTAL_SHADE: f32 = 0.7;

/// Sky across the upper half, scrolled by `offset` pixels and wrapped; flat
/// floor colour across the lower half.
pub fn draw_background(frame: &mut FrameBuffer, sky: &Texture, offset: f32, floor: Rgba) {
    let w = frame.width();
    let half = frame.height() / 2;
    for y in 0..frame.height() {
        if y >= half {
            for x in 0..w {
                frame.put(x as i32, y as i32, floor);
            }
            continue;
        }
        let v = y as f32 / half.max(1) as f32;
        for x in 0..w {
            let u = ((x as f32 + offset).rem_euclid(w as f32)) / w as f32;
            frame.put(x as i32, y as i32, sky.sample(u, v));
        }
    }
}

/// One textured column per ray. `wall_texture` maps a texture id to its
/// image; misses leave the background visible.
pub fn draw_walls<'a>(
    frame: &mut FrameBuffer,
    projection: &Projection,
    hits: &[RayHit],
    wall_texture: impl Fn(u8) -> Option<&'a Texture>,
) {
    let height = frame.height() as i32;
    for (i, hit) in hits.iter().enumerate() {
        let Some(texture) = hit.texture.and_then(&wall_texture) else { continue };

        let x0 = (i as f32 * projection.scale) as i32;
        let x1 = ((i + 1) as f32 * projection.scale) as i32;
        let top = projection.half_height - hit.proj_height * 0.5;
        let y0 = top.max(0.0) as i32;
        let y1 = ((top + hit.proj_height).ceil() as i32).min(height);

        for y in y0..y1 {
            let v = (y as f32 + 0.5 - top) / hit.proj_height;
            let mut color = texture.sample(hit.offset, v);
            if hit.side == WallSide::Horizontal {
                color = shade(color, HORIZONTAL_SHADE);
            }
            for x in x0..x1 {
                frame.put(x, y, color);
            }
        }
    }
}
