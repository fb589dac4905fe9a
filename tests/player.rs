use std::f32::consts::{FRAC_1_SQRT_2, FRAC_PI_2};

use glam::Vec2;

use jcaster::config::Settings;
use jcaster::map::GridMap;
use jcaster::player::{MoveInput, Player, movement_vector};

fn player_at(x: f32, y: f32, angle: f32) -> Player {
    let mut settings = Settings::default();
    settings.player_angle = angle;
    Player::new(&settings, Vec2::new(x, y))
}

// ── Movement vector ──────────────────────────────────────────────────────────

#[test]
fn strafe_is_perpendicular_to_view() {
    let fwd = movement_vector(0.0, MoveInput { forward: true, ..Default::default() });
    let left = movement_vector(0.0, MoveInput { strafe_left: true, ..Default::default() });
    let right = movement_vector(0.0, MoveInput { strafe_right: true, ..Default::default() });
    assert!((fwd - Vec2::X).length() < 1e-6);
    assert!(fwd.dot(left).abs() < 1e-6);
    assert!((left + right).length() < 1e-6);
    // Screen y grows downward, so "left" of +x is -y.
    assert!((left - Vec2::new(0.0, -1.0)).length() < 1e-6);
}

#[test]
fn two_keys_are_scaled_by_inverse_sqrt_two() {
    let v = movement_vector(0.0, MoveInput { forward: true, strafe_right: true, ..Default::default() });
    assert!((v.x - FRAC_1_SQRT_2).abs() < 1e-6);
    assert!((v.y - FRAC_1_SQRT_2).abs() < 1e-6);
    assert!((v.length() - 1.0).abs() < 1e-5);
}

#[test]
fn no_keys_no_motion() {
    assert_eq!(movement_vector(1.2, MoveInput::default()), Vec2::ZERO);
}

// ── Collision ────────────────────────────────────────────────────────────────

#[test]
fn diagonal_into_wall_keeps_sliding() {
    let map = GridMap::bordered(6, 6);
    // Facing north (−y) against the top wall, strafing right (+x).
    let mut p = player_at(2.5, 1.3, -FRAC_PI_2);
    let input = MoveInput { forward: true, strafe_right: true, ..Default::default() };
    let start = p.pos;
    for _ in 0..10 {
        p.move_by(&map, input, 1.0 / 60.0);
    }
    assert!(p.pos.x > start.x + 0.1, "slid along x: {:?}", p.pos);
    assert!(p.pos.y >= 1.0 + 0.24 - 1e-4, "stayed off the wall: {:?}", p.pos);
}

#[test]
fn movement_scales_with_dt() {
    let map = GridMap::bordered(20, 20);
    let input = MoveInput { forward: true, ..Default::default() };
    let mut a = player_at(5.5, 5.5, 0.0);
    let mut b = player_at(5.5, 5.5, 0.0);
    a.move_by(&map, input, 0.1);
    b.move_by(&map, input, 0.05);
    b.move_by(&map, input, 0.05);
    assert!((a.pos - b.pos).length() < 1e-5);
    assert!((a.pos.x - 5.9).abs() < 1e-5);
}

// ── Look ─────────────────────────────────────────────────────────────────────

#[test]
fn look_wraps_angle() {
    let mut p = player_at(2.5, 2.5, 0.1);
    p.look(-40.0, 1.0);
    assert!((0.0..std::f32::consts::TAU).contains(&p.angle));
    assert_eq!(p.rel(), -40.0);
}

// ── Health ───────────────────────────────────────────────────────────────────

#[test]
fn health_recovers_one_point_per_delay() {
    let mut p = player_at(2.5, 2.5, 0.0);
    p.take_damage(30);
    assert_eq!(p.health, 70);
    p.recover_health(0.69);
    assert_eq!(p.health, 70);
    p.recover_health(0.02);
    assert_eq!(p.health, 71);
    p.recover_health(1.4);
    assert_eq!(p.health, 73);
}

#[test]
fn health_never_recovers_past_max() {
    let mut p = player_at(2.5, 2.5, 0.0);
    p.take_damage(1);
    p.recover_health(10.0);
    assert_eq!(p.health, p.max_health);
}

#[test]
fn kill_bonus_is_capped() {
    let mut p = player_at(2.5, 2.5, 0.0);
    p.take_damage(50);
    p.gain_health_on_kill();
    assert_eq!(p.health, 60);
    p.health = p.max_health - 3;
    p.gain_health_on_kill();
    assert_eq!(p.health, p.max_health);
}

#[test]
fn zero_health_is_dead() {
    let mut p = player_at(2.5, 2.5, 0.0);
    p.take_damage(99);
    assert!(!p.is_dead());
    p.take_damage(1);
    assert!(p.is_dead());
}

#[test]
fn overkill_stops_at_zero() {
    let mut p = player_at(2.5, 2.5, 0.0);
    p.take_damage(p.health + 25);
    assert_eq!(p.health, 0);
    assert!(p.is_dead());
    p.recover_health(5.0);
    assert_eq!(p.health, 0, "the dead do not regenerate");
}
