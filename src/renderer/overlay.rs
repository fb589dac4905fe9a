use crate::session::{Session, SessionStatus};
use crate::weapon::Weapon;

use super::frame::FrameBuffer;
use super::texture::{self, Texture, TextureStore};

/// Index of the percent glyph in the digit sequence.
const PERCENT: usize = 10;

/// Stretch `texture` into the rectangle at `(x, y)` sized `w × h`. Pixels
/// with alpha below 128 are skipped.
pub fn blit(frame: &mut FrameBuffer, texture: &Texture, x: i32, y: i32, w: i32, h: i32) {
    if w <= 0 || h <= 0 {
        return;
    }
    for py in 0..h {
        let v = (py as f32 + 0.5) / h as f32;
        for px in 0..w {
            let color = texture.sample((px as f32 + 0.5) / w as f32, v);
            if color[3] >= 128 {
                frame.put(x + px, y + py, color);
            }
        }
    }
}

/// Glyph indices for a health readout: the decimal digits then `%`.
/// Negative values clamp to zero.
pub fn health_glyphs(health: i32) -> Vec<usize> {
    let mut glyphs: Vec<usize> = health
        .max(0)
        .to_string()
        .bytes()
        .map(|b| (b - b'0') as usize)
        .collect();
    glyphs.push(PERCENT);
    glyphs
}

fn draw_weapon(frame: &mut FrameBuffer, store: &TextureStore, weapon: &Weapon) {
    let Some(tex) = store.frame(Weapon::TEXTURE_KEY, weapon.frame()) else { return };
    let h = (frame.height() as f32 * 0.45) as i32;
    let w = (h as f32 * tex.width as f32 / tex.height as f32) as i32;
    let x = frame.width() as i32 / 2 - w / 2;
    let y = frame.height() as i32 - h;
    blit(frame, tex, x, y, w, h);
}

fn draw_health(frame: &mut FrameBuffer, store: &TextureStore, health: i32) {
    let size = (frame.height() / 12).max(6) as i32;
    for (i, glyph) in health_glyphs(health).into_iter().enumerate() {
        if let Some(tex) = store.frame(texture::DIGITS, glyph) {
            blit(frame, tex, i as i32 * size, 0, size, size);
        }
    }
}

/// Weapon, health, damage flash and end-of-game banners, in that order.
pub fn draw(frame: &mut FrameBuffer, session: &Session, store: &TextureStore) {
    draw_weapon(frame, store, session.weapon());
    draw_health(frame, store, session.player().health);

    if session.is_flashing() {
        if let Some(blood) = store.get(texture::BLOOD) {
            frame.tint(blood.pixel(0, 0));
        }
    }

    let banner = match session.status() {
        SessionStatus::Playing => None,
        SessionStatus::GameOver => store.get(texture::GAME_OVER),
        SessionStatus::Won => store.get(texture::WIN),
    };
    if let Some(tex) = banner {
        let (w, h) = (frame.width() as i32, frame.height() as i32);
        frame.fill_rect(0, 0, w, h, [0, 0, 0, 255]);
        blit(frame, tex, 0, 0, w, h);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_glyphs_end_with_percent() {
        assert_eq!(health_glyphs(100), vec![1, 0, 0, PERCENT]);
        assert_eq!(health_glyphs(-5), vec![0, PERCENT]);
    }
}
