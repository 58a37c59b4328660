//! Key-state side table
//!
//! The host's event listener writes key transitions here at any time; the
//! session samples the table once at the top of each tick.

use serde::{Deserialize, Serialize};

use crate::sim::TickInput;

/// Keys the simulation reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Fire,
}

impl Key {
    /// Map a DOM-style key name to a game key
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" | "a" | "A" => Some(Key::Left),
            "ArrowRight" | "d" | "D" => Some(Key::Right),
            "ArrowUp" | "w" | "W" => Some(Key::Up),
            "ArrowDown" | "s" | "S" => Some(Key::Down),
            " " | "Space" => Some(Key::Fire),
            _ => None,
        }
    }
}

/// Current boolean state of every key
#[derive(Debug, Clone)]
pub struct KeyState {
    held: TickInput,
    attached: bool,
}

impl Default for KeyState {
    fn default() -> Self {
        Self {
            held: TickInput::default(),
            attached: true,
        }
    }
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key transition from the listener
    pub fn set(&mut self, key: Key, pressed: bool) {
        if !self.attached {
            return;
        }
        let slot = match key {
            Key::Left => &mut self.held.left,
            Key::Right => &mut self.held.right,
            Key::Up => &mut self.held.up,
            Key::Down => &mut self.held.down,
            Key::Fire => &mut self.held.fire,
        };
        *slot = pressed;
    }

    pub fn press(&mut self, key: Key) {
        self.set(key, true);
    }

    pub fn release(&mut self, key: Key) {
        self.set(key, false);
    }

    /// Release everything (e.g. on focus loss)
    pub fn release_all(&mut self) {
        self.held = TickInput::default();
    }

    /// Snapshot for one tick
    pub fn sample(&self) -> TickInput {
        self.held
    }

    /// Stop listening; the table reads as all-released from now on
    pub fn detach(&mut self) {
        self.release_all();
        self.attached = false;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }
}
