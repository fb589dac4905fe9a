use std::f32::consts::FRAC_1_SQRT_2;

use glam::Vec2;

use crate::config::Settings;
use crate::geometry::{Cell, cell_of, normalize_angle};
use crate::map::GridMap;
use crate::sprite::AnimationClock;

/// Movement keys held during one step.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveInput {
    pub forward: bool,
    pub back: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
}

impl MoveInput {
    fn held(&self) -> usize {
        [self.forward, self.back, self.strafe_left, self.strafe_right]
            .iter()
            .filter(|&&b| b)
            .count()
    }
}

/// Direction of travel for `input` with the view along `angle`, before
/// scaling by speed. With two or more keys held the vector is scaled by
/// `1/√2`.
pub fn movement_vector(angle: f32, input: MoveInput) -> Vec2 {
    let (sin_a, cos_a) = angle.sin_cos();
    let mut v = Vec2::ZERO;
    if input.forward {
        v += Vec2::new(cos_a, sin_a);
    }
    if input.back {
        v -= Vec2::new(cos_a, sin_a);
    }
    if input.strafe_left {
        v += Vec2::new(sin_a, -cos_a);
    }
    if input.strafe_right {
        v += Vec2::new(-sin_a, cos_a);
    }
    if input.held() >= 2 {
        v *= FRAC_1_SQRT_2;
    }
    v
}

#[derive(Clone, Debug)]
pub struct Player {
    pub pos: Vec2,
    /// View angle in `[0, τ)`.
    pub angle: f32,
    pub health: i32,
    pub max_health: i32,
    speed: f32,
    radius: f32,
    kill_bonus: i32,
    sensitivity: f32,
    max_rel: f32,
    recovery: AnimationClock,
    /// Last clamped horizontal mouse delta, used to scroll the sky.
    rel: f32,
}

impl Player {
    pub fn new(settings: &Settings, start: Vec2) -> Self {
        Self {
            pos: start,
            angle: normalize_angle(settings.player_angle),
            health: settings.player_max_health,
            max_health: settings.player_max_health,
            speed: settings.player_speed,
            radius: settings.player_radius,
            kill_bonus: settings.kill_health_bonus,
            sensitivity: settings.mouse_sensitivity,
            max_rel: settings.mouse_max_rel,
            recovery: AnimationClock::new(settings.health_recovery_delay),
            rel: 0.0,
        }
    }

    pub fn cell(&self) -> Cell { cell_of(self.pos) }
    pub fn rel(&self) -> f32 { self.rel }
    pub fn is_dead(&self) -> bool { self.health < 1 }

    /// Move with per-axis wall sliding.
    pub fn move_by(&mut self, map: &GridMap, input: MoveInput, dt: f32) {
        let delta = movement_vector(self.angle, input) * self.speed * dt;
        self.pos = map.slide(self.pos, delta, self.radius);
    }

    /// Turn by a horizontal mouse delta (pixels), clamped to `±mouse_max_rel`.
    pub fn look(&mut self, mouse_dx: f32, dt: f32) {
        self.rel = mouse_dx.clamp(-self.max_rel, self.max_rel);
        self.angle = normalize_angle(self.angle + self.rel * self.sensitivity * dt);
    }

    /// Health never drops below zero.
    pub fn take_damage(&mut self, amount: i32) {
        self.health = (self.health - amount).max(0);
    }

    /// +1 health per elapsed recovery delay while `0 < health < max`.
    pub fn recover_health(&mut self, dt: f32) {
        let ticks = self.recovery.tick(dt) as i32;
        if ticks > 0 && self.health > 0 && self.health < self.max_health {
            self.health = (self.health + ticks).min(self.max_health);
        }
    }

    pub fn gain_health_on_kill(&mut self) {
        self.health = (self.health + self.kill_bonus).min(self.max_health);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_key_is_unit_length() {
        let v = movement_vector(0.7, MoveInput { forward: true, ..Default::default() });
        assert!((v.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn forward_and_back_cancel() {
        let v = movement_vector(0.3, MoveInput { forward: true, back: true, ..Default::default() });
        assert!(v.length() < 1e-5);
    }

    #[test]
    fn look_clamps_mouse_delta() {
        let mut p = Player::new(&Settings::default(), Vec2::new(1.5, 1.5));
        p.look(1000.0, 1.0);
        assert_eq!(p.rel(), 40.0);
    }
}
