use glam::Vec2;

use crate::camera::BillboardShape;

// ── AnimationClock ────────────────────────────────────────────────────────────

/// Accumulates frame time and reports how many fixed intervals have elapsed.
///
/// Remainders carry over between ticks, so a clock driven with uneven `dt`
/// still fires at the configured average rate.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AnimationClock {
    interval: f32,
    elapsed: f32,
}

impl AnimationClock {
    pub fn new(interval: f32) -> Self {
        Self { interval: interval.max(f32::EPSILON), elapsed: 0.0 }
    }

    pub fn interval(&self) -> f32 { self.interval }

    /// Advance by `dt` seconds; returns the number of intervals completed.
    pub fn tick(&mut self, dt: f32) -> u32 {
        self.elapsed += dt.max(0.0);
        if self.elapsed < self.interval {
            return 0;
        }
        let n = (self.elapsed / self.interval).floor();
        self.elapsed -= n * self.interval;
        n as u32
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

// ── Decorations ───────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    GreenLight,
    RedLight,
    Candelabra,
}

impl SpriteKind {
    pub fn from_marker(ch: char) -> Option<Self> {
        match ch {
            'g' => Some(Self::GreenLight),
            'r' => Some(Self::RedLight),
            'l' => Some(Self::Candelabra),
            _ => None,
        }
    }

    /// Texture key. Animated kinds name a frame sequence.
    pub fn texture_key(self) -> &'static str {
        match self {
            Self::GreenLight => "sprites/animated_sprites/green_light",
            Self::RedLight => "sprites/animated_sprites/red_light",
            Self::Candelabra => "sprites/static_sprites/candlebra",
        }
    }

    /// `(scale, height_shift)`.
    fn dimensions(self) -> (f32, f32) {
        match self {
            Self::GreenLight | Self::RedLight => (0.8, 0.16),
            Self::Candelabra => (0.7, 0.27),
        }
    }

    fn frame_interval(self) -> Option<f32> {
        match self {
            Self::GreenLight | Self::RedLight => Some(0.12),
            Self::Candelabra => None,
        }
    }
}

/// A decorative world object. Never removed during a session.
#[derive(Clone, Debug, PartialEq)]
pub struct SpriteObject {
    pub kind: SpriteKind,
    pub pos: Vec2,
    pub scale: f32,
    /// Vertical offset as a fraction of projected height; positive moves
    /// the image down.
    pub height_shift: f32,
    clock: Option<AnimationClock>,
    frame: usize,
}

impl SpriteObject {
    pub fn new(kind: SpriteKind, pos: Vec2) -> Self {
        let (scale, height_shift) = kind.dimensions();
        Self {
            kind,
            pos,
            scale,
            height_shift,
            clock: kind.frame_interval().map(AnimationClock::new),
            frame: 0,
        }
    }

    pub fn texture_key(&self) -> &'static str { self.kind.texture_key() }

    pub fn is_animated(&self) -> bool { self.clock.is_some() }

    pub fn shape(&self) -> BillboardShape {
        BillboardShape { scale: self.scale, aspect: 1.0, height_shift: self.height_shift }
    }

    /// Current frame counter. Wrapped against the sequence length at draw time.
    pub fn frame(&self) -> usize { self.frame }

    pub fn update(&mut self, dt: f32) {
        if let Some(clock) = self.clock.as_mut() {
            self.frame = self.frame.wrapping_add(clock.tick(dt) as usize);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_carries_remainder() {
        let mut clock = AnimationClock::new(0.1);
        assert_eq!(clock.tick(0.06), 0);
        assert_eq!(clock.tick(0.06), 1);
        assert_eq!(clock.tick(0.25), 2);
    }

    #[test]
    fn static_sprite_never_advances() {
        let mut s = SpriteObject::new(SpriteKind::Candelabra, Vec2::new(1.5, 1.5));
        s.update(10.0);
        assert_eq!(s.frame(), 0);
        assert!(!s.is_animated());
    }
}
