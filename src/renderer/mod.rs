//! Software compositor and wgpu presenter.
//!
//! Each frame is drawn on the CPU into a [`FrameBuffer`] in a fixed order
//! (background, walls, billboards, overlay) and then uploaded and blitted to
//! the window by [`Presenter`].

pub mod frame;
pub mod overlay;
pub mod present;
pub mod procedural;
pub mod sprites;
pub mod texture;
pub mod utils;
pub mod walls;

use frame::{FrameBuffer, Rgba};
use texture::TextureStore;

use crate::session::Session;

pub use present::Presenter;

/// Owns the frame buffer and every texture the compositor samples.
pub struct Compositor {
    frame: FrameBuffer,
    textures: TextureStore,
    floor: Rgba,
}

impl Compositor {
    pub fn new(width: u32, height: u32, textures: TextureStore, floor: [u8; 3]) -> Self {
        Self {
            frame: FrameBuffer::new(width, height),
            textures,
            floor: [floor[0], floor[1], floor[2], 255],
        }
    }

    pub fn frame(&self) -> &FrameBuffer { &self.frame }

    /// Compose one frame of `session`.
    pub fn draw(&mut self, session: &Session) -> &FrameBuffer {
        render_session(&mut self.frame, session, &self.textures, self.floor);
        &self.frame
    }
}

/// Draw the full scene of `session` into `frame`.
pub fn render_session(frame: &mut FrameBuffer, session: &Session, store: &TextureStore, floor: Rgba) {
    match store.get(texture::SKY) {
        Some(sky) => walls::draw_background(frame, sky, session.sky_offset(), floor),
        None => frame.fill(floor),
    }
    walls::draw_walls(frame, session.projection(), session.raycaster().hits(), |id| {
        store.frame(texture::WALLS, usize::from(id.saturating_sub(1)))
    });
    sprites::draw_all(frame, session, store);
    overlay::draw(frame, session, store);
}
