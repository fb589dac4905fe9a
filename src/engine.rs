use std::path::Path;
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use winit::application::ApplicationHandler;
use winit::event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use crate::audio::{AudioContext, Sound};
use crate::config::Settings;
use crate::error::EngineError;
use crate::input::{Action, ActionMap, FrameInput, InputState};
use crate::level::Level;
use crate::renderer::texture::TextureStore;
use crate::renderer::{Compositor, Presenter, procedural};
use crate::session::{Session, SessionStatus};
use crate::window::{apply_window_settings, capture_cursor};

/// Seconds over which the theme fades in.
const THEME_FADE_IN: f32 = 1.5;

// ── EngineBuilder ───────────────────────────────────────────────────────────

/// Collects start-up inputs, validates them, then runs the event loop.
///
/// Everything that can fail for configuration reasons (settings, level,
/// textures) is checked before a window is opened.
pub struct EngineBuilder {
    settings: Settings,
    level: Option<Level>,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self { settings: Settings::default(), level: None }
    }
}

impl EngineBuilder {
    pub fn with_settings(mut self, settings: Settings) -> Self { self.settings = settings; self }
    pub fn with_level(mut self, level: Level) -> Self { self.level = Some(level); self }

    pub fn run(self) -> Result<(), EngineError> {
        let settings = self.settings;
        settings.validate()?;

        let level = match self.level {
            Some(level) => level,
            None => match &settings.level {
                Some(path) => Level::load(path)?,
                None => Level::default_level(),
            },
        };

        let seed = settings.seed.unwrap_or_else(time_seed);
        // Fail fast on a bad level before any window exists.
        let session = Session::new(&settings, &level, seed)?;

        let textures = load_textures(settings.resources.as_deref())?;

        let sound_dir = settings.resources.as_ref().map(|r| r.join("sound")).filter(|d| d.is_dir());
        let audio = match sound_dir {
            Some(dir) => {
                let mut audio = AudioContext::new();
                audio.load_dir(&dir);
                audio
            }
            None => AudioContext::disabled(),
        };
        tracing::info!(available = audio.is_available(), "audio ready");

        let event_loop = EventLoop::new()?;
        let fixed_dt = 1.0 / settings.target_ups.max(1) as f32;
        let mut app = App {
            settings,
            level,
            seed,
            restarts: 0,
            session,
            textures: Some(textures),
            audio,
            input: InputState::new(),
            actions: ActionMap::default_bindings(),
            gfx: None,
            last_instant: None,
            accumulator: 0.0,
            fixed_dt,
            error: None,
        };
        event_loop.run_app(&mut app)?;
        match app.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Load textures from `<root>`; use the built-in set when no directory is
/// configured or it does not exist. A loaded directory must contain every
/// required key.
fn load_textures(root: Option<&Path>) -> Result<TextureStore, EngineError> {
    let Some(root) = root.filter(|r| r.is_dir()) else {
        if let Some(root) = root {
            tracing::warn!(root = %root.display(), "resource directory not found; using built-in textures");
        }
        return Ok(procedural::texture_store());
    };
    let store = TextureStore::load_dir(root)?;
    store.validate()?;
    Ok(store)
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

// ── App (winit ApplicationHandler) ──────────────────────────────────────────

struct Gfx {
    presenter: Presenter,
    compositor: Compositor,
}

struct App {
    settings: Settings,
    level: Level,
    seed: u64,
    restarts: u64,
    session: Session,
    /// Moved into the compositor once the window exists.
    textures: Option<TextureStore>,
    audio: AudioContext,
    input: InputState,
    actions: ActionMap<Action>,
    gfx: Option<Gfx>,
    last_instant: Option<Instant>,
    accumulator: f32,
    fixed_dt: f32,
    error: Option<EngineError>,
}

impl App {
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: EngineError) {
        tracing::error!(%error, "engine stopped");
        self.error = Some(error);
        event_loop.exit();
    }

    fn create_gfx(&mut self, event_loop: &ActiveEventLoop) -> Result<Gfx, EngineError> {
        let window = Arc::new(
            event_loop.create_window(
                Window::default_attributes()
                    .with_title(&self.settings.title)
                    .with_inner_size(winit::dpi::PhysicalSize::new(self.settings.width, self.settings.height))
                    .with_resizable(false),
            )?,
        );
        apply_window_settings(&window, &self.settings);
        capture_cursor(&window);

        let presenter = pollster::block_on(Presenter::new(
            window,
            self.settings.width,
            self.settings.height,
        ))?;
        let textures = self.textures.take().unwrap_or_else(procedural::texture_store);
        let compositor = Compositor::new(self.settings.width, self.settings.height, textures, self.settings.floor_color);
        Ok(Gfx { presenter, compositor })
    }

    /// Replace a finished session once its overlay has been shown long enough.
    fn restart_if_due(&mut self) -> Result<(), EngineError> {
        if self.session.status() == SessionStatus::Playing
            || self.session.ended_for() < self.settings.overlay_duration
        {
            return Ok(());
        }
        self.restarts += 1;
        let seed = self.seed.wrapping_add(self.restarts);
        self.session = Session::new(&self.settings, &self.level, seed)?;
        self.input.reset();
        self.audio.play_music(Sound::Theme, THEME_FADE_IN);
        Ok(())
    }

    /// Run every fixed step the accumulated time allows. Fire and mouse
    /// motion are delivered to the first step only.
    fn step(&mut self, elapsed: f32) -> Result<bool, EngineError> {
        self.accumulator += elapsed;
        let mut frame_input = FrameInput::collect(&self.actions, &self.input);
        let mut consumed = false;

        while self.accumulator >= self.fixed_dt {
            for event in self.session.update(&frame_input, self.fixed_dt) {
                if let Some(sound) = event.sound() {
                    self.audio.play(sound);
                }
            }
            self.restart_if_due()?;
            frame_input.fire = false;
            frame_input.mouse_dx = 0.0;
            consumed = true;
            self.accumulator -= self.fixed_dt;
        }
        Ok(consumed)
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gfx.is_some() {
            return;
        }
        match self.create_gfx(event_loop) {
            Ok(gfx) => {
                self.gfx = Some(gfx);
                self.audio.play_music(Sound::Theme, THEME_FADE_IN);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gfx) = self.gfx.as_ref() {
            gfx.presenter.window.request_redraw();
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _id: DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.input.add_mouse_motion(delta.0);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if self.gfx.is_none() {
            return;
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                if let Some(gfx) = self.gfx.as_mut() {
                    gfx.presenter.resize(size);
                }
            }

            WindowEvent::MouseInput { button, state, .. } => match state {
                ElementState::Pressed => self.input.mouse_down(button),
                ElementState::Released => self.input.mouse_up(button),
            },

            WindowEvent::KeyboardInput {
                event: KeyEvent { physical_key: PhysicalKey::Code(code), state, .. },
                ..
            } => match state {
                ElementState::Pressed => self.input.key_down(code),
                ElementState::Released => self.input.key_up(code),
            },

            WindowEvent::RedrawRequested => {
                if self.actions.is_pressed(Action::Quit, &self.input) {
                    event_loop.exit();
                    return;
                }

                let now = Instant::now();
                let elapsed = match self.last_instant {
                    Some(prev) => now.duration_since(prev).as_secs_f32().min(0.25),
                    None => self.fixed_dt,
                };
                self.last_instant = Some(now);

                match self.step(elapsed) {
                    // Input is only cleared once a step has seen it.
                    Ok(true) => self.input.clear_frame_state(),
                    Ok(false) => {}
                    Err(e) => {
                        self.fail(event_loop, e);
                        return;
                    }
                }

                let Some(gfx) = self.gfx.as_mut() else { return };
                let frame = gfx.compositor.draw(&self.session);
                match gfx.presenter.present(frame) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = gfx.presenter.window.inner_size();
                        gfx.presenter.resize(size);
                    }
                    Err(e) => tracing::warn!("render error: {e}"),
                }
            }

            _ => {}
        }
    }
}
