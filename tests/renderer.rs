use std::borrow::Cow;

use glam::Vec2;

use jcaster::camera::{BillboardShape, NEAR_CULL, Projection, SpriteProjection};
use jcaster::config::Settings;
use jcaster::level::Level;
use jcaster::map::GridMap;
use jcaster::npc::NpcKind;
use jcaster::renderer::Compositor;
use jcaster::renderer::frame::FrameBuffer;
use jcaster::renderer::overlay::health_glyphs;
use jcaster::renderer::procedural;
use jcaster::renderer::sprites::{SpriteDraw, column_visible, draw_sprite, sort_back_to_front};
use jcaster::renderer::texture::{Texture, TextureStore};
use jcaster::renderer::utils::letterbox_viewport;
use jcaster::session::Session;

const UNIT: BillboardShape = BillboardShape { scale: 1.0, aspect: 1.0, height_shift: 0.0 };
const RED: [u8; 4] = [200, 0, 0, 255];

fn proj_at(screen_x: f32, norm_dist: f32) -> SpriteProjection {
    SpriteProjection { screen_x, norm_dist, width: 10.0, height: 10.0, top: 0.0 }
}

// ── Projection ───────────────────────────────────────────────────────────────

#[test]
fn object_straight_ahead_lands_at_screen_centre() {
    let p = Projection::new(&Settings::default());
    let sp = p.project(Vec2::new(1.0, 1.0), 0.0, Vec2::new(4.0, 1.0), UNIT).unwrap();
    assert!((sp.screen_x - p.half_width).abs() < 1e-2);
    assert!((sp.norm_dist - 3.0).abs() < 1e-4);
    assert!((sp.top + sp.height * 0.5 - p.half_height).abs() < 1e-2);
}

#[test]
fn near_and_behind_objects_are_culled() {
    let p = Projection::new(&Settings::default());
    let eye = Vec2::new(5.0, 5.0);
    assert!(p.project(eye, 0.0, eye + Vec2::new(NEAR_CULL * 0.8, 0.0), UNIT).is_none());
    assert!(p.project(eye, 0.0, eye - Vec2::new(3.0, 0.0), UNIT).is_none());
    assert!(p.project(eye, 0.0, eye + Vec2::new(NEAR_CULL * 2.0, 0.0), UNIT).is_some());
}

#[test]
fn object_far_outside_fov_is_culled() {
    let p = Projection::new(&Settings::default());
    let eye = Vec2::new(5.0, 5.0);
    // 60° to the side with a 60° field of view.
    let pos = eye + Vec2::new(1.0, 3.0_f32.sqrt()) * 4.0;
    assert!(p.project(eye, 0.0, pos, UNIT).is_none());
}

// ── Depth sort and occlusion ─────────────────────────────────────────────────

#[test]
fn sort_is_far_to_near_and_stable() {
    let mut draws: Vec<SpriteDraw> = [("a", 2.0), ("b", 5.0), ("c", 2.0), ("d", 8.0)]
        .into_iter()
        .map(|(key, d)| SpriteDraw { proj: proj_at(0.0, d), key: Cow::Borrowed(key), frame: 0 })
        .collect();
    sort_back_to_front(&mut draws);
    let order: Vec<&str> = draws.iter().map(|d| d.key.as_ref()).collect();
    assert_eq!(order, ["d", "b", "a", "c"]);
}

#[test]
fn sprite_is_hidden_only_behind_nearer_walls() {
    assert!(column_visible(2.0, 3.0));
    assert!(!column_visible(3.0, 3.0));
    assert!(!column_visible(4.0, 3.0));
}

#[test]
fn wall_columns_clip_the_sprite() {
    let mut frame = FrameBuffer::new(20, 10);
    // Columns left of x = 10 have a wall at depth 2, in front of the sprite.
    draw_sprite(&mut frame, &proj_at(10.0, 3.0), &Texture::solid(RED), |x| if x < 10.0 { 2.0 } else { 5.0 });
    for y in 0..10 {
        for x in 5..10 {
            assert_eq!(frame.get(x, y), [0, 0, 0, 0], "({x}, {y}) should be occluded");
        }
        for x in 10..15 {
            assert_eq!(frame.get(x, y), RED, "({x}, {y}) should be drawn");
        }
    }
    assert_eq!(frame.get(15, 5), [0, 0, 0, 0]);
}

#[test]
fn transparent_texels_are_skipped() {
    let mut frame = FrameBuffer::new(20, 10);
    draw_sprite(&mut frame, &proj_at(10.0, 1.0), &Texture::solid([255, 255, 255, 10]), |_| 100.0);
    assert!(frame.as_bytes().iter().all(|&b| b == 0));
}

// ── Overlay ──────────────────────────────────────────────────────────────────

#[test]
fn health_readout_glyphs() {
    assert_eq!(health_glyphs(100), vec![1, 0, 0, 10]);
    assert_eq!(health_glyphs(7), vec![7, 10]);
    assert_eq!(health_glyphs(-12), vec![0, 10]);
}

#[test]
fn letterbox_pillarboxes_wide_windows() {
    let vp = letterbox_viewport((2000, 720), (1280, 720));
    assert_eq!((vp.width, vp.height), (1280.0, 720.0));
    assert_eq!(vp.x, 360.0);
    assert_eq!(vp.y, 0.0);
}

// ── Textures ─────────────────────────────────────────────────────────────────

#[test]
fn procedural_store_has_every_required_key() {
    assert!(procedural::texture_store().validate().is_ok());
}

#[test]
fn empty_store_fails_validation() {
    assert!(TextureStore::new().validate().is_err());
}

#[test]
fn sequences_wrap_by_frame_index() {
    let mut store = TextureStore::new();
    store.insert_sequence("anim", vec![Texture::solid(RED), Texture::solid([0, 200, 0, 255])]);
    assert_eq!(store.frame_count("anim"), 2);
    assert_eq!(store.frame("anim", 2), store.frame("anim", 0));
    assert_ne!(store.frame("anim", 1), store.frame("anim", 0));
    assert!(store.frame("missing", 0).is_none());
}

// ── Full frame ───────────────────────────────────────────────────────────────

#[test]
fn compositor_draws_a_full_frame() {
    let settings = Settings { width: 64, height: 48, enemies: 0, ..Settings::default() };
    let level = Level {
        map: GridMap::bordered(10, 10),
        player_start: Some(Vec2::new(2.5, 5.5)),
        npcs: vec![(NpcKind::Soldier, Vec2::new(6.5, 5.5))],
        sprites: Vec::new(),
    };
    let session = Session::new(&settings, &level, 5).unwrap();
    let floor = [30, 30, 30];
    let mut compositor = Compositor::new(64, 48, procedural::texture_store(), floor);

    let frame = compositor.draw(&session);
    assert_eq!(frame.as_bytes().len(), 64 * 48 * 4);
    let first = frame.get(0, 0);
    assert!((0..48).any(|y| (0..64).any(|x| frame.get(x, y) != first)), "frame is uniform");
    assert!((0..64).any(|x| frame.get(x, 47) == [30, 30, 30, 255]), "no floor on the bottom row");
}
