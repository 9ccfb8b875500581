use std::collections::{HashMap, HashSet};
use std::hash::Hash;
pub use winit::keyboard::KeyCode;

/// Raw keyboard state for a single frame.
#[derive(Debug, Default)]
pub struct InputState {
    pub keys_held: HashSet<KeyCode>,
    pub keys_pressed: HashSet<KeyCode>,
    pub keys_released: HashSet<KeyCode>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: KeyCode) {
        // Auto-repeat delivers another press while the key is held.
        if self.keys_held.insert(key) {
            self.keys_pressed.insert(key);
        }
    }

    pub fn release(&mut self, key: KeyCode) {
        self.keys_held.remove(&key);
        self.keys_released.insert(key);
    }

    /// Forget every key, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.keys_released.extend(self.keys_held.drain());
    }

    pub fn clear_frame_state(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
    }

    pub fn is_key_held(&self, key: KeyCode) -> bool { self.keys_held.contains(&key) }
    pub fn is_key_pressed(&self, key: KeyCode) -> bool { self.keys_pressed.contains(&key) }
    pub fn is_key_released(&self, key: KeyCode) -> bool { self.keys_released.contains(&key) }
}

/// Maps logical actions (defined by the game) to one or more keys.
#[derive(Debug, Clone)]
pub struct ActionMap<A: Hash + Eq + Copy> {
    bindings: HashMap<A, Vec<KeyCode>>,
}

impl<A: Hash + Eq + Copy> ActionMap<A> {
    pub fn new() -> Self {
        Self { bindings: HashMap::new() }
    }

    pub fn bind(&mut self, action: A, key: KeyCode) {
        self.bindings.entry(action).or_default().push(key);
    }

    /// Returns true if the action was triggered this frame (pressed).
    pub fn is_pressed(&self, action: A, input: &InputState) -> bool {
        self.bindings
            .get(&action)
            .is_some_and(|keys| keys.iter().any(|k| input.is_key_pressed(*k)))
    }

    /// Returns true if the action is currently being held.
    pub fn is_held(&self, action: A, input: &InputState) -> bool {
        self.bindings
            .get(&action)
            .is_some_and(|keys| keys.iter().any(|k| input.is_key_held(*k)))
    }
}

impl<A: Hash + Eq + Copy> Default for ActionMap<A> {
    fn default() -> Self { Self::new() }
}

// ── Game actions ──────────────────────────────────────────────────────────────

/// Everything the keyboard can ask the game to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    Pause,
    ToggleDebug,
    DialogNext,
    Interact,
    Quit,
}

impl Action {
    /// One-shot actions, handled on the frame their key goes down, in this
    /// order.
    pub const TRIGGERS: [Action; 5] = [
        Action::Pause,
        Action::ToggleDebug,
        Action::DialogNext,
        Action::Interact,
        Action::Quit,
    ];
}

/// Arrows and WASD move, Escape pauses, H toggles the debug overlay, Space
/// advances dialog, E interacts and the backquote key quits.
pub fn default_bindings() -> ActionMap<Action> {
    let mut map = ActionMap::new();
    map.bind(Action::MoveLeft, KeyCode::ArrowLeft);
    map.bind(Action::MoveLeft, KeyCode::KeyA);
    map.bind(Action::MoveRight, KeyCode::ArrowRight);
    map.bind(Action::MoveRight, KeyCode::KeyD);
    map.bind(Action::MoveUp, KeyCode::ArrowUp);
    map.bind(Action::MoveUp, KeyCode::KeyW);
    map.bind(Action::MoveDown, KeyCode::ArrowDown);
    map.bind(Action::MoveDown, KeyCode::KeyS);
    map.bind(Action::Pause, KeyCode::Escape);
    map.bind(Action::ToggleDebug, KeyCode::KeyH);
    map.bind(Action::DialogNext, KeyCode::Space);
    map.bind(Action::Interact, KeyCode::KeyE);
    map.bind(Action::Quit, KeyCode::Backquote);
    map
}

/// Which movement directions are held this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Movement {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl Movement {
    pub fn from_input(map: &ActionMap<Action>, input: &InputState) -> Self {
        Self {
            left: map.is_held(Action::MoveLeft, input),
            right: map.is_held(Action::MoveRight, input),
            up: map.is_held(Action::MoveUp, input),
            down: map.is_held(Action::MoveDown, input),
        }
    }
}
