use crate::sprite::AnimationClock;

pub const SHOTGUN_DAMAGE: i32 = 50;
const SHOTGUN_FRAMES: usize = 6;
const SHOTGUN_FRAME_TIME: f32 = 0.09;

/// The player's shotgun.
///
/// Firing starts a reload animation; the weapon cannot fire again until the
/// animation has cycled through every frame and returned to frame 0.
#[derive(Clone, Debug)]
pub struct Weapon {
    pub damage: i32,
    frames: usize,
    frame: usize,
    reloading: bool,
    clock: AnimationClock,
}

impl Default for Weapon {
    fn default() -> Self {
        Self::shotgun()
    }
}

impl Weapon {
    pub fn shotgun() -> Self {
        Self {
            damage: SHOTGUN_DAMAGE,
            frames: SHOTGUN_FRAMES,
            frame: 0,
            reloading: false,
            clock: AnimationClock::new(SHOTGUN_FRAME_TIME),
        }
    }

    pub const TEXTURE_KEY: &'static str = "sprites/weapon/shotgun";

    pub fn is_reloading(&self) -> bool { self.reloading }
    pub fn frame(&self) -> usize { self.frame }

    /// Try to fire. Returns `false` while reloading.
    pub fn fire(&mut self) -> bool {
        if self.reloading {
            return false;
        }
        self.reloading = true;
        self.frame = 0;
        self.clock.reset();
        true
    }

    pub fn update(&mut self, dt: f32) {
        if !self.reloading {
            return;
        }
        for _ in 0..self.clock.tick(dt) {
            self.frame += 1;
            if self.frame >= self.frames {
                self.frame = 0;
                self.reloading = false;
                break;
            }
        }
    }
}
