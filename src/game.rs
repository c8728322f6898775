//! Frame-driven game loop
//!
//! Owns the simulation state, the key table and the frame clock. The host
//! calls [`Game::frame`] from its "next frame" callback and keeps scheduling
//! while it returns [`FrameOutcome::Continue`].

use crate::input::{Command, KeyState, LEFT_PADDLE_KEYS, RIGHT_PADDLE_KEYS, command_for_key};
use crate::renderer::{Surface, draw_game};
use crate::settings::{Settings, SettingsError};
use crate::sim::{GameEvent, GameState, RunState, Score, TickInput, tick};
use crate::timing::FixedTimestep;

/// What the host should do after a frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Request another frame
    Continue,
    /// Stop scheduling
    Stop,
}

/// Undrained events kept at most; older ones are dropped first
pub const MAX_PENDING_EVENTS: usize = 256;

/// A game instance
pub struct Game {
    settings: Settings,
    state: GameState,
    run_state: RunState,
    keys: KeyState,
    clock: FixedTimestep,
    /// Events not yet drained by the presentation layer
    events: Vec<GameEvent>,
}

impl Game {
    /// Build a stopped game; rejects settings that do not describe a
    /// playable field
    pub fn new(settings: Settings, seed: u64) -> Result<Self, SettingsError> {
        settings.validate()?;
        let clock = FixedTimestep::new(settings.tick_interval());
        let state = GameState::new(&settings, seed);
        Ok(Self {
            settings,
            state,
            run_state: RunState::Stopped,
            keys: KeyState::new(),
            clock,
            events: Vec::new(),
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable state access for scripted setups
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn score(&self) -> Score {
        self.state.score
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    /// Take all events produced since the last drain (at most
    /// [`MAX_PENDING_EVENTS`], newest last)
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Start the game. Returns true if the host must schedule the first
    /// frame; false if the game was already running or paused.
    pub fn start(&mut self) -> bool {
        if self.run_state != RunState::Stopped {
            return false;
        }
        log::info!("Starting game");
        self.run_state = RunState::Running;
        self.clock.reset_clock();
        true
    }

    pub fn pause(&mut self) {
        if self.run_state == RunState::Running {
            log::info!("Pausing game");
            self.run_state = RunState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.run_state == RunState::Paused {
            log::info!("Resuming game");
            self.run_state = RunState::Running;
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.run_state {
            RunState::Running => self.pause(),
            RunState::Paused => self.resume(),
            RunState::Stopped => {}
        }
    }

    /// Stop the loop and restore the opening layout with zeroed scores.
    /// The host cancels any pending frame; the surface, if given, shows the
    /// fresh layout.
    pub fn reset(&mut self, surface: Option<&mut dyn Surface>) {
        log::info!("Resetting game");
        self.run_state = RunState::Stopped;
        self.clock.reset_clock();
        self.state.reset(&self.settings);
        self.push_events([GameEvent::ScoreReset]);
        if let Some(surface) = surface {
            self.render(surface);
        }
    }

    /// Record a key press and apply its control command, if any.
    /// Returns the command applied; auto-repeats apply nothing.
    pub fn key_down(&mut self, key: &str) -> Option<Command> {
        if !self.keys.press(key) {
            return None;
        }
        let command = command_for_key(key)?;
        match command {
            Command::TogglePause => self.toggle_pause(),
            Command::Reset => self.reset(None),
            Command::StartOrResume => {
                if self.run_state == RunState::Stopped {
                    self.start();
                } else {
                    self.resume();
                }
            }
        }
        Some(command)
    }

    pub fn key_up(&mut self, key: &str) {
        self.keys.release(key);
    }

    /// Forget all held keys (window lost focus)
    pub fn release_all_keys(&mut self) {
        self.keys.clear();
    }

    /// Run one frame: advance as many fixed ticks as are due, then render.
    /// Events queue up until [`Game::drain_events`]; past
    /// [`MAX_PENDING_EVENTS`] the oldest are discarded.
    pub fn frame(&mut self, now_ms: f64, surface: &mut dyn Surface) -> FrameOutcome {
        if self.run_state == RunState::Stopped {
            return FrameOutcome::Stop;
        }

        let ticks = self.clock.advance(now_ms);
        for _ in 0..ticks {
            self.step();
        }

        self.render(surface);
        FrameOutcome::Continue
    }

    /// Run a single fixed tick, ignoring the frame clock. No-op if stopped.
    pub fn step(&mut self) {
        if self.run_state == RunState::Stopped {
            return;
        }
        let input = TickInput {
            left: self.keys.intent(&LEFT_PADDLE_KEYS),
            right: self.keys.intent(&RIGHT_PADDLE_KEYS),
            paused: self.run_state == RunState::Paused,
        };
        let events = tick(&mut self.state, &input, &self.settings);
        self.push_events(events);
    }

    fn push_events(&mut self, events: impl IntoIterator<Item = GameEvent>) {
        self.events.extend(events);
        if self.events.len() > MAX_PENDING_EVENTS {
            let excess = self.events.len() - MAX_PENDING_EVENTS;
            self.events.drain(..excess);
        }
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        draw_game(&self.state, &self.settings, surface);
    }
}
