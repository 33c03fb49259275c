use std::collections::HashSet;

/// Browser key codes for the arrow keys.
pub mod keys {
    pub const LEFT: u32 = 37;
    pub const UP: u32 = 38;
    pub const RIGHT: u32 = 39;
    pub const DOWN: u32 = 40;
}

/// Input event types the engine understands.
/// Generic: no game-specific semantics.
#[derive(Debug, Clone, Copy)]
pub enum InputEvent {
    /// A key was pressed.
    KeyDown { key_code: u32 },
    /// A key was released.
    KeyUp { key_code: u32 },
}

/// Held state of the four arrow keys, polled once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CursorKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// A queue of input events plus the set of keys currently held.
/// JS writes events into the queue; Rust reads and drains them each frame.
/// Held state survives draining and only changes on `KeyDown`/`KeyUp`.
pub struct InputQueue {
    events: Vec<InputEvent>,
    held: HashSet<u32>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
            held: HashSet::new(),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown { key_code } => {
                self.held.insert(key_code);
            }
            InputEvent::KeyUp { key_code } => {
                self.held.remove(&key_code);
            }
        }
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Whether `key_code` is down. Keys never seen read as not held.
    pub fn is_held(&self, key_code: u32) -> bool {
        self.held.contains(&key_code)
    }

    pub fn cursor_keys(&self) -> CursorKeys {
        CursorKeys {
            left: self.is_held(keys::LEFT),
            right: self.is_held(keys::RIGHT),
            up: self.is_held(keys::UP),
            down: self.is_held(keys::DOWN),
        }
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
