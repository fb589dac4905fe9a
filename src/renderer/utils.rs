// ── Letterboxing ──────────────────────────────────────────────────────────────
//
// The frame buffer has a fixed logical resolution; the window can be any size.
// The frame is scaled uniformly to the largest size that fits and centred,
// leaving black bars on the unused axis.

/// Destination rectangle of the frame in window (physical) pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Physical pixels per frame pixel.
    pub scale: f32,
}

impl Viewport {
    pub const EMPTY: Viewport = Viewport { x: 0.0, y: 0.0, width: 0.0, height: 0.0, scale: 0.0 };

    /// Too small to draw into.
    pub fn is_empty(&self) -> bool {
        self.width < 1.0 || self.height < 1.0
    }
}

/// Fit a `logical` frame inside a `physical` window, both `(width, height)`.
///
/// ```text
/// scale = min(pw / lw, ph / lh)
/// ```
/// Offsets are floored to whole pixels so nearest-neighbour sampling stays
/// aligned. A zero logical dimension gives [`Viewport::EMPTY`].
pub fn letterbox_viewport(physical: (u32, u32), logical: (u32, u32)) -> Viewport {
    let (lw, lh) = (logical.0 as f32, logical.1 as f32);
    if lw == 0.0 || lh == 0.0 {
        return Viewport::EMPTY;
    }
    let (pw, ph) = (physical.0 as f32, physical.1 as f32);
    let scale = (pw / lw).min(ph / lh);
    let (width, height) = (lw * scale, lh * scale);
    Viewport {
        x: ((pw - width) * 0.5).floor(),
        y: ((ph - height) * 0.5).floor(),
        width,
        height,
        scale,
    }
}
