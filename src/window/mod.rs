use winit::dpi::PhysicalSize;
use winit::window::{CursorGrabMode, Fullscreen, Window};

use crate::config::{Settings, WindowMode};

/// Apply the window mode and size from `settings`.
///
/// `Fullscreen` picks the monitor video mode closest in pixel area to the
/// configured resolution, falling back to borderless when the monitor is
/// unknown or lists no modes.
pub fn apply_window_settings(window: &Window, settings: &Settings) {
    match settings.window_mode {
        WindowMode::Windowed => {
            window.set_fullscreen(None);
            window.set_decorations(true);
            window.set_resizable(false);
            // The final size arrives through `WindowEvent::Resized`.
            let _ = window.request_inner_size(PhysicalSize::new(settings.width, settings.height));
        }

        WindowMode::Fullscreen => {
            let fullscreen = match window.current_monitor() {
                Some(monitor) => {
                    let target = settings.width as u64 * settings.height as u64;
                    let best = monitor.video_modes().min_by_key(|vm| {
                        let s = vm.size();
                        (s.width as u64 * s.height as u64).abs_diff(target)
                    });
                    match best {
                        Some(vm) => Fullscreen::Exclusive(vm),
                        None => Fullscreen::Borderless(Some(monitor)),
                    }
                }
                None => Fullscreen::Borderless(None),
            };
            window.set_fullscreen(Some(fullscreen));
        }

        WindowMode::Borderless => {
            window.set_fullscreen(Some(Fullscreen::Borderless(None)));
        }
    }
}

/// Hide the cursor and keep it inside the window for mouse-look. Platforms
/// without confinement get a locked cursor instead; if neither is supported
/// the cursor stays free and relative motion still drives the view.
pub fn capture_cursor(window: &Window) {
    let grabbed = window
        .set_cursor_grab(CursorGrabMode::Confined)
        .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked));
    if let Err(e) = grabbed {
        tracing::warn!(error = %e, "cursor grab unavailable");
    }
    window.set_cursor_visible(false);
}
