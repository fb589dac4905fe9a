use std::f32::consts::PI;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ── WindowMode ────────────────────────────────────────────────────────────────

/// Controls how the OS window is presented.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowMode {
    /// Standard decorated window at the configured resolution.
    Windowed,
    /// Exclusive hardware fullscreen closest to the configured resolution.
    Fullscreen,
    /// Borderless window sized to match the monitor's native resolution.
    Borderless,
}

// ── Settings ──────────────────────────────────────────────────────────────────

/// Immutable settings bundle read once at start-up.
///
/// Every field has a default, so a settings file only needs to name the
/// values it changes. Durations are in seconds, speeds in grid cells per
/// second, angles in radians.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub title: String,
    /// Internal render resolution (the frame buffer size).
    pub width: u32,
    pub height: u32,
    pub window_mode: WindowMode,
    /// Screen pixels per cast ray. `width / ray_scale` rays are cast.
    pub ray_scale: u32,
    pub fov: f32,
    /// Rays travelling further than this report a miss.
    pub max_depth: f32,
    /// Fixed simulation steps per second.
    pub target_ups: u32,

    /// Used when the level layout has no `P` marker.
    pub player_start: [f32; 2],
    pub player_angle: f32,
    pub player_speed: f32,
    pub player_max_health: i32,
    /// Look-ahead distance used for wall collision.
    pub player_radius: f32,
    pub health_recovery_delay: f32,
    pub kill_health_bonus: i32,
    pub mouse_sensitivity: f32,
    /// Per-frame mouse delta clamp in pixels.
    pub mouse_max_rel: f32,

    /// Seconds between path table recomputes.
    pub path_interval: f32,
    /// Global animation tick driving death animations.
    pub anim_tick: f32,
    pub damage_flash: f32,
    /// How long the game-over / win screen stays up before a new session.
    pub overlay_duration: f32,

    /// Randomly spawned NPCs in addition to those placed by the level.
    pub enemies: usize,
    /// Cells with `x < spawn_exclusion && y < spawn_exclusion` never receive
    /// random spawns.
    pub spawn_exclusion: i32,
    /// Fixed RNG seed; a time-based seed is used when absent.
    pub seed: Option<u64>,

    pub floor_color: [u8; 3],
    /// Directory scanned for textures and sounds. Procedural textures are
    /// generated when this is `None` or missing.
    pub resources: Option<PathBuf>,
    /// Level layout file; the built-in level is used when `None`.
    pub level: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: "jcaster".into(),
            width: 1280,
            height: 720,
            window_mode: WindowMode::Windowed,
            ray_scale: 2,
            fov: PI / 3.0,
            max_depth: 20.0,
            target_ups: 60,
            player_start: [1.5, 5.0],
            player_angle: 0.0,
            player_speed: 4.0,
            player_max_health: 100,
            player_radius: 0.24,
            health_recovery_delay: 0.7,
            kill_health_bonus: 10,
            mouse_sensitivity: 0.3,
            mouse_max_rel: 40.0,
            path_interval: 0.2,
            anim_tick: 0.04,
            damage_flash: 0.12,
            overlay_duration: 1.5,
            enemies: 20,
            spawn_exclusion: 10,
            seed: None,
            floor_color: [30, 30, 30],
            resources: Some(PathBuf::from("resources")),
            level: None,
        }
    }
}

impl Settings {
    /// Parse settings JSON and validate the result.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read and validate a settings file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Number of rays cast per frame.
    pub fn num_rays(&self) -> usize {
        (self.width / self.ray_scale.max(1)) as usize
    }

    /// Aspect ratio of the render resolution. Returns `0.0` for a zero height.
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            return 0.0;
        }
        self.width as f32 / self.height as f32
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::Invalid { field, reason: reason.into() }
        }

        if self.width == 0 || self.height == 0 {
            return Err(invalid("width", "render resolution must be non-zero"));
        }
        if self.ray_scale == 0 || self.ray_scale > self.width {
            return Err(invalid("ray_scale", format!("must be in 1..={}", self.width)));
        }
        if !(self.fov > 0.0 && self.fov < PI) {
            return Err(invalid("fov", "must be between 0 and π"));
        }
        if !(self.max_depth > 0.0) {
            return Err(invalid("max_depth", "must be positive"));
        }
        if self.target_ups == 0 {
            return Err(invalid("target_ups", "must be positive"));
        }
        if self.player_max_health <= 0 {
            return Err(invalid("player_max_health", "must be positive"));
        }
        if !(self.player_radius >= 0.0 && self.player_radius < 0.5) {
            return Err(invalid("player_radius", "must be in [0, 0.5)"));
        }
        for (field, value) in [
            ("path_interval", self.path_interval),
            ("anim_tick", self.anim_tick),
            ("health_recovery_delay", self.health_recovery_delay),
        ] {
            if !(value > 0.0) {
                return Err(invalid(field, "must be positive"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn num_rays_is_half_width_by_default() {
        assert_eq!(Settings::default().num_rays(), 640);
    }

    #[test]
    fn aspect_ratio_zero_height_returns_zero() {
        let s = Settings { height: 0, ..Settings::default() };
        assert_eq!(s.aspect_ratio(), 0.0);
    }
}
