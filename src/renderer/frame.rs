/// An RGBA colour, 8 bits per channel.
pub type Rgba = [u8; 4];

/// CPU-side RGBA8 image the compositor draws into, uploaded once per frame.
#[derive(Clone, Debug)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, pixels: vec![[0; 4]; (width * height) as usize] }
    }

    pub fn width(&self) -> u32 { self.width }
    pub fn height(&self) -> u32 { self.height }

    /// Raw RGBA bytes, row-major, top row first.
    pub fn as_bytes(&self) -> &[u8] { bytemuck::cast_slice(&self.pixels) }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Rgba {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Write one pixel. Out-of-range coordinates are ignored.
    #[inline]
    pub fn put(&mut self, x: i32, y: i32, color: Rgba) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }
        self.pixels[(y as u32 * self.width + x as u32) as usize] = color;
    }

    pub fn fill(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    /// Fill a rectangle clipped to the frame.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgba) {
        let (x0, x1) = (x.max(0), (x + w).min(self.width as i32));
        let (y0, y1) = (y.max(0), (y + h).min(self.height as i32));
        for py in y0..y1 {
            for px in x0..x1 {
                self.put(px, py, color);
            }
        }
    }

    /// Blend `color` over the whole frame using its alpha channel.
    pub fn tint(&mut self, color: Rgba) {
        let a = color[3] as u32;
        if a == 0 {
            return;
        }
        for px in &mut self.pixels {
            for c in 0..3 {
                px[c] = ((px[c] as u32 * (255 - a) + color[c] as u32 * a) / 255) as u8;
            }
        }
    }
}

/// Scale the RGB channels of `color` by `factor` (`0..=1`).
#[inline]
pub fn shade(color: Rgba, factor: f32) -> Rgba {
    let f = |c: u8| (c as f32 * factor) as u8;
    [f(color[0]), f(color[1]), f(color[2]), color[3]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tint_blends_by_alpha() {
        let mut fb = FrameBuffer::new(2, 1);
        fb.fill([0, 0, 0, 255]);
        fb.tint([255, 0, 0, 255]);
        assert_eq!(fb.get(1, 0), [255, 0, 0, 255]);
        assert_eq!(fb.as_bytes().len(), 8);
    }
}
