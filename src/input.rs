//! Keyboard input handling
//!
//! Key events only ever write the [`KeyState`] table; the simulation reads it
//! at the top of each tick. Control keys additionally map to a [`Command`]
//! that the game loop applies to its run state.

use std::collections::HashMap;

/// Loop-level commands triggered from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Pause if running, resume if paused
    TogglePause,
    /// Stop and restore the initial layout
    Reset,
    /// Start if stopped, otherwise resume
    StartOrResume,
}

/// Map a pressed key to its control command, if any
pub fn command_for_key(key: &str) -> Option<Command> {
    match key {
        "Escape" | "Esc" | "p" | "P" => Some(Command::TogglePause),
        "r" | "R" => Some(Command::Reset),
        "Enter" | " " => Some(Command::StartOrResume),
        _ => None,
    }
}

/// Up/down key identifiers for one paddle
#[derive(Debug, Clone, Copy)]
pub struct PaddleKeys {
    pub up: &'static [&'static str],
    pub down: &'static [&'static str],
}

/// Player 1 (left paddle): W / S
pub const LEFT_PADDLE_KEYS: PaddleKeys = PaddleKeys {
    up: &["w", "W"],
    down: &["s", "S"],
};

/// Player 2 (right paddle): arrow keys
pub const RIGHT_PADDLE_KEYS: PaddleKeys = PaddleKeys {
    up: &["ArrowUp"],
    down: &["ArrowDown"],
};

/// Which vertical directions are requested for a paddle this tick.
///
/// Both may be set at once; the movements then cancel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaddleIntent {
    pub up: bool,
    pub down: bool,
}

/// Table of currently held keys
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    held: HashMap<String, bool>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Returns true if the key was not already held
    /// (i.e. this is not an auto-repeat).
    pub fn press(&mut self, key: &str) -> bool {
        let was_held = self.is_held(key);
        self.held.insert(key.to_owned(), true);
        !was_held
    }

    pub fn release(&mut self, key: &str) {
        self.held.insert(key.to_owned(), false);
    }

    /// Unknown keys read as not held
    pub fn is_held(&self, key: &str) -> bool {
        self.held.get(key).copied().unwrap_or(false)
    }

    fn any_held(&self, keys: &[&str]) -> bool {
        keys.iter().any(|k| self.is_held(k))
    }

    /// Resolve the movement intent for one paddle
    pub fn intent(&self, keys: &PaddleKeys) -> PaddleIntent {
        PaddleIntent {
            up: self.any_held(keys.up),
            down: self.any_held(keys.down),
        }
    }

    /// Release everything (e.g. after the window loses focus)
    pub fn clear(&mut self) {
        self.held.clear();
    }
}
