use std::collections::{HashMap, HashSet};
use std::hash::Hash;

pub use winit::event::MouseButton;
pub use winit::keyboard::KeyCode;

use crate::player::MoveInput;

/// A physical key or button an [`Action`] can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Key(KeyCode),
    Mouse(MouseButton),
}

/// Keyboard and mouse state gathered between simulation steps.
#[derive(Debug, Default)]
pub struct InputState {
    pub keys_held: HashSet<KeyCode>,
    pub keys_pressed: HashSet<KeyCode>,

    pub mouse_held: HashSet<MouseButton>,
    pub mouse_pressed: HashSet<MouseButton>,
    /// Raw horizontal motion accumulated since the last simulation step.
    pub mouse_dx: f32,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: KeyCode) {
        if self.keys_held.insert(key) {
            self.keys_pressed.insert(key);
        }
    }

    pub fn key_up(&mut self, key: KeyCode) {
        self.keys_held.remove(&key);
    }

    pub fn mouse_down(&mut self, button: MouseButton) {
        if self.mouse_held.insert(button) {
            self.mouse_pressed.insert(button);
        }
    }

    pub fn mouse_up(&mut self, button: MouseButton) {
        self.mouse_held.remove(&button);
    }

    pub fn add_mouse_motion(&mut self, dx: f64) {
        self.mouse_dx += dx as f32;
    }

    /// Drop edge-triggered state once a simulation step has seen it.
    pub fn clear_frame_state(&mut self) {
        self.keys_pressed.clear();
        self.mouse_pressed.clear();
        self.mouse_dx = 0.0;
    }

    /// Forget everything, e.g. when the window loses focus.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_key_held(&self, key: KeyCode) -> bool { self.keys_held.contains(&key) }
    pub fn is_key_pressed(&self, key: KeyCode) -> bool { self.keys_pressed.contains(&key) }

    pub fn is_mouse_held(&self, button: MouseButton) -> bool { self.mouse_held.contains(&button) }
    pub fn is_mouse_pressed(&self, button: MouseButton) -> bool { self.mouse_pressed.contains(&button) }
}

/// Maps logical actions to one or more physical inputs.
#[derive(Debug, Clone)]
pub struct ActionMap<A: Hash + Eq + Copy> {
    bindings: HashMap<A, Vec<InputSource>>,
}

impl<A: Hash + Eq + Copy> ActionMap<A> {
    pub fn new() -> Self {
        Self { bindings: HashMap::new() }
    }

    pub fn bind(&mut self, action: A, source: InputSource) {
        self.bindings.entry(action).or_default().push(source);
    }

    /// Returns true if the action was triggered this step (pressed).
    pub fn is_pressed(&self, action: A, input: &InputState) -> bool {
        self.bindings.get(&action).is_some_and(|sources| {
            sources.iter().any(|s| match s {
                InputSource::Key(k) => input.is_key_pressed(*k),
                InputSource::Mouse(b) => input.is_mouse_pressed(*b),
            })
        })
    }

    /// Returns true if the action is currently being held.
    pub fn is_held(&self, action: A, input: &InputState) -> bool {
        self.bindings.get(&action).is_some_and(|sources| {
            sources.iter().any(|s| match s {
                InputSource::Key(k) => input.is_key_held(*k),
                InputSource::Mouse(b) => input.is_mouse_held(*b),
            })
        })
    }
}

impl<A: Hash + Eq + Copy> Default for ActionMap<A> {
    fn default() -> Self { Self::new() }
}

// ── Game actions ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Forward,
    Back,
    StrafeLeft,
    StrafeRight,
    Fire,
    Quit,
}

impl ActionMap<Action> {
    /// WASD movement, left click to fire, Escape to quit.
    pub fn default_bindings() -> Self {
        let mut map = Self::new();
        map.bind(Action::Forward, InputSource::Key(KeyCode::KeyW));
        map.bind(Action::Back, InputSource::Key(KeyCode::KeyS));
        map.bind(Action::StrafeLeft, InputSource::Key(KeyCode::KeyA));
        map.bind(Action::StrafeRight, InputSource::Key(KeyCode::KeyD));
        map.bind(Action::Fire, InputSource::Mouse(MouseButton::Left));
        map.bind(Action::Quit, InputSource::Key(KeyCode::Escape));
        map
    }
}

/// Input consumed by one simulation step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    pub movement: MoveInput,
    /// Fire was pressed this step.
    pub fire: bool,
    /// Raw horizontal mouse motion in pixels.
    pub mouse_dx: f32,
}

impl FrameInput {
    pub fn collect(actions: &ActionMap<Action>, input: &InputState) -> Self {
        Self {
            movement: MoveInput {
                forward: actions.is_held(Action::Forward, input),
                back: actions.is_held(Action::Back, input),
                strafe_left: actions.is_held(Action::StrafeLeft, input),
                strafe_right: actions.is_held(Action::StrafeRight, input),
            },
            fire: actions.is_pressed(Action::Fire, input),
            mouse_dx: input.mouse_dx,
        }
    }
}
