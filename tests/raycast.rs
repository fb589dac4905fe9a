use glam::Vec2;

use jcaster::camera::Projection;
use jcaster::config::Settings;
use jcaster::map::GridMap;
use jcaster::raycast::{RayCaster, WallSide, cast_ray, has_line_of_sight, segment_blocked};

fn enclosed_cell() -> GridMap {
    GridMap::from_rows(&["111", "1.1", "111"]).unwrap()
}

/// Exact distance from `p` to the boundary of cell (1, 1) along `angle`.
fn exit_distance(p: Vec2, angle: f32) -> f32 {
    let (s, c) = angle.sin_cos();
    let tx = if c > 1e-6 { (2.0 - p.x) / c } else if c < -1e-6 { (p.x - 1.0) / -c } else { f32::INFINITY };
    let ty = if s > 1e-6 { (2.0 - p.y) / s } else if s < -1e-6 { (p.y - 1.0) / -s } else { f32::INFINITY };
    tx.min(ty)
}

// ── Single enclosed cell ─────────────────────────────────────────────────────

#[test]
fn enclosed_cell_hits_its_own_boundary() {
    let map = enclosed_cell();
    let origin = Vec2::new(1.3, 1.6);
    for i in 0..360 {
        let angle = (i as f32).to_radians() + 0.001;
        let hit = cast_ray(&map, origin, angle, 20.0).expect("every ray hits a wall");
        let expected = exit_distance(origin, angle);
        assert!(hit.distance > 0.0, "angle {angle}: distance must be positive");
        assert!(
            (hit.distance - expected).abs() < 1e-3,
            "angle {angle}: got {}, expected {expected}",
            hit.distance
        );
    }
}

#[test]
fn enclosed_cell_depth_buffer_is_positive_and_bounded() {
    let map = enclosed_cell();
    let mut caster = RayCaster::new(Projection::new(&Settings::default()));
    caster.update(&map, Vec2::new(1.5, 1.5), 0.8);
    for hit in caster.hits() {
        assert!(hit.depth > 0.0);
        assert!(hit.depth <= std::f32::consts::SQRT_2 * 0.5 + 1e-3, "depth {}", hit.depth);
        assert!(hit.texture.is_some());
    }
}

// ── Fisheye correction ───────────────────────────────────────────────────────

#[test]
fn flat_wall_has_uniform_corrected_depth() {
    // East wall at x = 11; rows are tall enough for the FOV edges to reach it.
    let map = GridMap::bordered(12, 30);
    let mut caster = RayCaster::new(Projection::new(&Settings::default()));
    caster.update(&map, Vec2::new(2.5, 15.5), 0.0);

    let hits = caster.hits();
    let centre = hits[hits.len() / 2].depth;
    assert!((centre - 8.5).abs() < 1e-3, "centre depth {centre}");
    for edge in [hits[0].depth, hits[hits.len() - 1].depth] {
        assert!((edge - centre).abs() < 1e-3, "edge {edge} vs centre {centre}");
    }
    assert!(hits.iter().all(|h| h.side == WallSide::Vertical));
}

#[test]
fn miss_beyond_max_depth_uses_max_depth() {
    let map = GridMap::bordered(40, 5);
    let mut settings = Settings::default();
    settings.max_depth = 5.0;
    let mut caster = RayCaster::new(Projection::new(&settings));
    caster.update(&map, Vec2::new(1.5, 2.5), 0.0);
    let mid = caster.hits()[caster.hits().len() / 2];
    assert_eq!(mid.texture, None);
    assert_eq!(mid.depth, 5.0);
}

#[test]
fn axis_parallel_rays_terminate() {
    let map = GridMap::bordered(6, 6);
    let origin = Vec2::new(2.5, 2.5);
    for angle in [0.0, std::f32::consts::FRAC_PI_2, std::f32::consts::PI, 3.0 * std::f32::consts::FRAC_PI_2] {
        let hit = cast_ray(&map, origin, angle, 20.0).unwrap();
        assert!((hit.distance - 2.5).abs() < 1e-3 || (hit.distance - 1.5).abs() < 1e-3);
    }
}

#[test]
fn texture_offset_stays_in_unit_range() {
    let map = GridMap::bordered(9, 9);
    let mut caster = RayCaster::new(Projection::new(&Settings::default()));
    caster.update(&map, Vec2::new(3.2, 4.7), 2.1);
    for hit in caster.hits() {
        assert!((0.0..=1.0).contains(&hit.offset), "offset {}", hit.offset);
    }
}

// ── Line of sight ────────────────────────────────────────────────────────────

#[test]
fn interior_wall_blocks_line_of_sight() {
    let map = GridMap::from_rows(&["11111", "1.1.1", "11111"]).unwrap();
    let a = Vec2::new(1.5, 1.5);
    let b = Vec2::new(3.5, 1.5);
    assert!(!has_line_of_sight(&map, a, b));
    assert!(segment_blocked(&map, a, b));
}

#[test]
fn open_room_has_line_of_sight() {
    let map = GridMap::bordered(10, 10);
    assert!(has_line_of_sight(&map, Vec2::new(1.5, 1.5), Vec2::new(8.5, 7.5)));
}

#[test]
fn zero_length_segment_is_clear() {
    let map = GridMap::bordered(4, 4);
    let p = Vec2::new(1.5, 1.5);
    assert!(!segment_blocked(&map, p, p));
    assert!(has_line_of_sight(&map, p, p));
}

// ── Degenerate origins ───────────────────────────────────────────────────────

#[test]
fn ray_starting_inside_a_wall_terminates() {
    let map = GridMap::bordered(6, 6);
    // The origin cell is never tested, so the ray crosses the room.
    let hit = cast_ray(&map, Vec2::new(0.5, 2.5), 0.0, 20.0).expect("east wall");
    assert!((hit.distance - 4.5).abs() < 1e-3, "got {}", hit.distance);
    // Looking outward, the boundary beyond the map stops it.
    let hit = cast_ray(&map, Vec2::new(0.5, 2.5), std::f32::consts::PI, 20.0).expect("boundary");
    assert!((hit.distance - 0.5).abs() < 1e-3, "got {}", hit.distance);
}

#[test]
fn ray_starting_outside_the_map_terminates() {
    let map = GridMap::bordered(6, 6);
    let origin = Vec2::new(-3.5, -7.25);
    for i in 0..16 {
        let angle = i as f32 * std::f32::consts::TAU / 16.0 + 0.01;
        if let Some(hit) = cast_ray(&map, origin, angle, 20.0) {
            assert!(hit.distance > 0.0 && hit.distance.is_finite(), "angle {angle}: {}", hit.distance);
        }
    }
}

#[test]
fn depth_buffer_from_inside_a_wall_is_positive() {
    let settings = Settings::default();
    let mut caster = RayCaster::new(Projection::new(&settings));
    for origin in [Vec2::new(0.5, 2.5), Vec2::new(-2.5, 3.5), Vec2::new(40.3, 40.6)] {
        caster.update(&GridMap::bordered(6, 6), origin, 1.3);
        for hit in caster.hits() {
            assert!(hit.depth > 0.0, "{origin:?}: depth {}", hit.depth);
            assert!(hit.depth <= settings.max_depth + 1e-3, "{origin:?}: depth {}", hit.depth);
        }
    }
}
