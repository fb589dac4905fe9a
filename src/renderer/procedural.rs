//! Built-in texture set used when no resource directory is available.
//!
//! Every key in [`required_keys`](super::texture::required_keys) is produced,
//! so a session can always start from a bare binary.

use crate::npc::{NpcAnim, NpcKind};
use crate::sprite::SpriteKind;
use crate::weapon::Weapon;

use super::frame::{Rgba, shade};
use super::texture::{self, Texture, TextureStore, npc_key};

const CLEAR: Rgba = [0, 0, 0, 0];

/// 3×5 glyphs, one byte per row, low three bits used (bit 2 = left column).
fn glyph(ch: char) -> [u8; 5] {
    match ch {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b010, 0b010, 0b010],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        '%' => [0b101, 0b001, 0b010, 0b100, 0b101],
        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'E' => [0b111, 0b100, 0b110, 0b100, 0b111],
        'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'N' => [0b110, 0b101, 0b101, 0b101, 0b101],
        'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'W' => [0b101, 0b101, 0b111, 0b111, 0b101],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        _ => [0; 5],
    }
}

/// Canvas helper for building textures pixel by pixel.
struct Canvas {
    w: u32,
    h: u32,
    px: Vec<Rgba>,
}

impl Canvas {
    fn new(w: u32, h: u32, fill: Rgba) -> Self {
        Self { w, h, px: vec![fill; (w * h) as usize] }
    }

    fn set(&mut self, x: i32, y: i32, c: Rgba) {
        if x >= 0 && y >= 0 && (x as u32) < self.w && (y as u32) < self.h {
            self.px[(y as u32 * self.w + x as u32) as usize] = c;
        }
    }

    fn rect(&mut self, x: i32, y: i32, w: i32, h: i32, c: Rgba) {
        for py in y..y + h {
            for px in x..x + w {
                self.set(px, py, c);
            }
        }
    }

    fn ellipse(&mut self, cx: f32, cy: f32, rx: f32, ry: f32, c: Rgba) {
        for y in 0..self.h as i32 {
            for x in 0..self.w as i32 {
                let dx = (x as f32 + 0.5 - cx) / rx;
                let dy = (y as f32 + 0.5 - cy) / ry;
                if dx * dx + dy * dy <= 1.0 {
                    self.set(x, y, c);
                }
            }
        }
    }

    fn text(&mut self, x: i32, y: i32, s: &str, scale: i32, c: Rgba) {
        for (i, ch) in s.chars().enumerate() {
            let ox = x + i as i32 * 4 * scale;
            for (row, bits) in glyph(ch).iter().enumerate() {
                for col in 0..3 {
                    if bits & (0b100 >> col) != 0 {
                        self.rect(ox + col * scale, y + row as i32 * scale, scale, scale, c);
                    }
                }
            }
        }
    }

    fn finish(self) -> Texture {
        Texture::from_pixels(self.w, self.h, self.px)
    }
}

fn wall(base: Rgba) -> Texture {
    let mut c = Canvas::new(64, 64, shade(base, 0.55));
    for row in 0..8_i32 {
        let offset = if row % 2 == 0 { 0 } else { 8 };
        for col in -1..4_i32 {
            let x = col * 16 + offset;
            let tone = 0.8 + 0.05 * ((row * 7 + col * 3).rem_euclid(5)) as f32;
            c.rect(x + 1, row * 8 + 1, 14, 6, shade(base, tone));
        }
    }
    c.finish()
}

fn sky() -> Texture {
    let (w, h) = (256, 128);
    let mut c = Canvas::new(w, h, CLEAR);
    for y in 0..h {
        let t = y as f32 / h as f32;
        let color = [(20.0 + 60.0 * t) as u8, (10.0 + 20.0 * t) as u8, (40.0 + 30.0 * t) as u8, 255];
        for x in 0..w {
            c.set(x as i32, y as i32, color);
        }
    }
    for i in 0..60u32 {
        let x = (i.wrapping_mul(2_654_435_761) >> 8) % w;
        let y = (i.wrapping_mul(40_503) >> 4) % (h / 2);
        c.set(x as i32, y as i32, [230, 230, 200, 255]);
    }
    c.finish()
}

fn light(glow: Rgba, frame: u32) -> Texture {
    let mut c = Canvas::new(32, 64, CLEAR);
    c.rect(14, 20, 4, 44, [90, 90, 90, 255]);
    c.rect(10, 60, 12, 4, [60, 60, 60, 255]);
    let pulse = 0.75 + 0.25 * ((frame % 4) as f32 / 3.0);
    c.ellipse(16.0, 14.0, 9.0, 9.0, shade(glow, pulse));
    c.ellipse(16.0, 14.0, 4.0, 4.0, [255, 255, 220, 255]);
    c.finish()
}

fn candelabra() -> Texture {
    let gold = [200, 160, 60, 255];
    let mut c = Canvas::new(32, 64, CLEAR);
    c.rect(15, 18, 2, 42, gold);
    c.rect(6, 28, 20, 2, gold);
    c.rect(8, 60, 16, 4, shade(gold, 0.7));
    for x in [6, 15, 24] {
        c.rect(x, 18, 2, 10, gold);
        c.ellipse(x as f32 + 1.0, 15.0, 2.0, 3.0, [255, 200, 80, 255]);
    }
    c.finish()
}

fn npc_colors(kind: NpcKind) -> (Rgba, Rgba) {
    match kind {
        NpcKind::Soldier => ([90, 110, 60, 255], [210, 170, 130, 255]),
        NpcKind::CacoDemon => ([180, 40, 40, 255], [80, 200, 80, 255]),
        NpcKind::CyberDemon => ([120, 80, 60, 255], [200, 60, 40, 255]),
    }
}

fn npc_frame(kind: NpcKind, anim: NpcAnim, frame: u32, frames: u32) -> Texture {
    let (body, accent) = npc_colors(kind);
    let mut c = Canvas::new(64, 64, CLEAR);
    let body = if anim == NpcAnim::Pain { body.map(|v| v.saturating_add(60)) } else { body };

    if anim == NpcAnim::Death {
        // Sink and flatten toward the floor.
        let t = (frame + 1) as f32 / frames as f32;
        let ry = 26.0 * (1.0 - 0.8 * t);
        c.ellipse(32.0, 64.0 - ry, 22.0 + 6.0 * t, ry, shade(body, 1.0 - 0.4 * t));
        c.ellipse(32.0, 64.0 - ry * 0.8, 14.0, ry * 0.3, [120, 0, 0, 255]);
        return c.finish();
    }

    match kind {
        NpcKind::CacoDemon => {
            c.ellipse(32.0, 32.0, 26.0, 26.0, body);
            c.ellipse(32.0, 26.0, 8.0, 8.0, [240, 240, 240, 255]);
            c.ellipse(32.0, 26.0, 4.0, 4.0, accent);
            c.rect(20, 44, 24, 4, [60, 0, 0, 255]);
        }
        _ => {
            let stride = if anim == NpcAnim::Walk { (frame % 4) as i32 * 2 - 3 } else { 0 };
            c.rect(24 + stride, 46, 6, 18, shade(body, 0.7));
            c.rect(34 - stride, 46, 6, 18, shade(body, 0.7));
            c.rect(20, 22, 24, 26, body);
            c.ellipse(32.0, 14.0, 8.0, 9.0, accent);
            c.rect(40, 30, 16, 5, [50, 50, 50, 255]);
        }
    }
    if anim == NpcAnim::Attack && frame % 2 == 1 {
        c.ellipse(56.0, 32.0, 6.0, 6.0, [255, 220, 80, 255]);
    }
    c.finish()
}

fn npc_frame_count(kind: NpcKind, anim: NpcAnim) -> u32 {
    match anim {
        NpcAnim::Idle | NpcAnim::Pain => 1,
        NpcAnim::Walk => 4,
        NpcAnim::Attack => 2,
        NpcAnim::Death => kind.stats().death_frames,
    }
}

fn shotgun(frame: u32) -> Texture {
    let mut c = Canvas::new(96, 64, CLEAR);
    let recoil = match frame { 1 => 6, 2 => 10, 3 => 6, 4 => 3, _ => 0 };
    c.rect(38, 8 + recoil, 20, 56, [70, 70, 75, 255]);
    c.rect(42, 8 + recoil, 5, 40, [30, 30, 30, 255]);
    c.rect(49, 8 + recoil, 5, 40, [30, 30, 30, 255]);
    c.rect(30, 40 + recoil, 36, 24, [110, 70, 40, 255]);
    if frame == 1 {
        c.ellipse(48.0, 6.0, 16.0, 8.0, [255, 210, 90, 255]);
    }
    c.finish()
}

fn banner(text: &str, fg: Rgba) -> Texture {
    let w = text.chars().count() as u32 * 4 + 6;
    let mut c = Canvas::new(w, 20, [0, 0, 0, 255]);
    c.text(4, 8, text, 1, fg);
    c.finish()
}

/// Build the complete built-in texture set.
pub fn texture_store() -> TextureStore {
    let mut store = TextureStore::new();

    store.insert(texture::SKY, sky());
    let walls = [
        [150, 150, 150, 255],
        [140, 70, 50, 255],
        [70, 100, 140, 255],
        [90, 130, 70, 255],
        [150, 130, 80, 255],
        [110, 60, 120, 255],
        [60, 120, 120, 255],
        [160, 100, 40, 255],
        [90, 90, 110, 255],
    ];
    store.insert_sequence(texture::WALLS, walls.iter().map(|&c| wall(c)).collect());

    let digits = "0123456789%"
        .chars()
        .map(|ch| {
            let mut c = Canvas::new(4, 6, CLEAR);
            c.text(0, 0, &ch.to_string(), 1, [220, 30, 30, 255]);
            c.finish()
        })
        .collect();
    store.insert_sequence(texture::DIGITS, digits);

    store.insert(texture::GAME_OVER, banner("GAME OVER", [200, 20, 20, 255]));
    store.insert(texture::WIN, banner("YOU WIN", [220, 200, 40, 255]));
    store.insert(texture::BLOOD, Texture::solid([160, 0, 0, 90]));

    store.insert_sequence(Weapon::TEXTURE_KEY, (0..6).map(shotgun).collect());

    store.insert_sequence(
        SpriteKind::GreenLight.texture_key(),
        (0..4).map(|f| light([60, 220, 80, 255], f)).collect(),
    );
    store.insert_sequence(
        SpriteKind::RedLight.texture_key(),
        (0..4).map(|f| light([230, 50, 40, 255], f)).collect(),
    );
    store.insert(SpriteKind::Candelabra.texture_key(), candelabra());

    for kind in NpcKind::ALL {
        for anim in NpcAnim::ALL {
            let n = npc_frame_count(kind, anim);
            store.insert_sequence(npc_key(kind, anim), (0..n).map(|f| npc_frame(kind, anim, f, n)).collect());
        }
    }

    store
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn procedural_set_is_complete() {
        assert!(texture_store().validate().is_ok());
    }

    #[test]
    fn death_sequence_matches_stats() {
        let store = texture_store();
        for kind in NpcKind::ALL {
            assert_eq!(
                store.frame_count(&npc_key(kind, NpcAnim::Death)),
                kind.stats().death_frames as usize
            );
        }
    }
}
