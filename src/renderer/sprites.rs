// =============================================================================
// SPRITES.RS: Billboard collection, depth sort and occluded drawing
// =============================================================================

use std::borrow::Cow;

use crate::camera::SpriteProjection;
use crate::session::Session;

use super::frame::FrameBuffer;
use super::texture::{Texture, TextureStore, npc_key};

/// A projected billboard waiting to be drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct SpriteDraw {
    pub proj: SpriteProjection,
    pub key: Cow<'static, str>,
    pub frame: usize,
}

/// Project every decoration and NPC visible from the player's viewpoint.
/// Decorations come first, then NPCs, each in spawn order.
pub fn collect(session: &Session) -> Vec<SpriteDraw> {
    let p = session.projection();
    let player = session.player();
    let eye = player.pos;
    let angle = player.angle;

    let decorations = session.objects().sprites().iter().filter_map(|s| {
        let proj = p.project(eye, angle, s.pos, s.shape())?;
        Some(SpriteDraw { proj, key: Cow::Borrowed(s.texture_key()), frame: s.frame() })
    });
    let npcs = session.objects().npcs().iter().filter_map(|n| {
        let proj = p.project(eye, angle, n.pos, n.shape())?;
        let (anim, frame) = n.animation();
        Some(SpriteDraw { proj, key: Cow::Owned(npc_key(n.kind, anim)), frame })
    });
    decorations.chain(npcs).collect()
}

/// Farthest first. The sort is stable, so equal distances keep their
/// insertion order.
pub fn sort_back_to_front(draws: &mut [SpriteDraw]) {
    draws.sort_by(|a, b| b.proj.norm_dist.total_cmp(&a.proj.norm_dist));
}

/// A sprite column is drawn only where it is nearer than the wall.
#[inline]
pub fn column_visible(sprite_dist: f32, wall_depth: f32) -> bool {
    sprite_dist < wall_depth
}

/// Draw one billboard, skipping columns occluded by walls. `wall_depth`
/// returns the depth buffer value covering a screen column.
pub fn draw_sprite(frame: &mut FrameBuffer, proj: &SpriteProjection, texture: &Texture, wall_depth: impl Fn(f32) -> f32) {
    let fw = frame.width() as i32;
    let fh = frame.height() as i32;
    let x0 = proj.left().floor().max(0.0) as i32;
    let x1 = (proj.right().ceil() as i32).min(fw);
    let y0 = proj.top.floor().max(0.0) as i32;
    let y1 = ((proj.top + proj.height).ceil() as i32).min(fh);

    for x in x0..x1 {
        let cx = x as f32 + 0.5;
        if !column_visible(proj.norm_dist, wall_depth(cx)) {
            continue;
        }
        let u = (cx - proj.left()) / proj.width;
        for y in y0..y1 {
            let v = (y as f32 + 0.5 - proj.top) / proj.height;
            let color = texture.sample(u, v);
            if color[3] >= 128 {
                frame.put(x, y, color);
            }
        }
    }
}

/// Collect, sort and draw every billboard.
pub fn draw_all(frame: &mut FrameBuffer, session: &Session, store: &TextureStore) {
    let mut draws = collect(session);
    sort_back_to_front(&mut draws);
    let caster = session.raycaster();
    for draw in &draws {
        if let Some(texture) = store.frame(&draw.key, draw.frame) {
            draw_sprite(frame, &draw.proj, texture, |x| caster.depth_at_screen_x(x));
        }
    }
}
