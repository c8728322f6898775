//! Canvas Pong - A classic two-paddle arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, scoring)
//! - `game`: The frame-driven loop (start/pause/reset, fixed timestep)
//! - `input`: Key-state table and control bindings
//! - `timing`: Fixed timestep accumulator
//! - `renderer`: Drawing surface abstraction and WebGPU backend
//! - `settings`: Data-driven playfield and tuning configuration

pub mod game;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod timing;

pub use game::{FrameOutcome, Game};
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Default simulation rate (one tick per 60 Hz display frame)
    pub const TICK_RATE_HZ: f32 = 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 15.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    /// Pixels per tick
    pub const PADDLE_SPEED: f32 = 8.0;
    /// Gap between a paddle and its side wall
    pub const PADDLE_MARGIN: f32 = 20.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    /// Pixels per tick
    pub const BALL_SPEED_X: f32 = 8.0;
    pub const BALL_SPEED_Y: f32 = 5.0;

    /// Vertical speed range produced by a paddle hit: (offset - 0.5) * factor
    pub const DEFLECTION_FACTOR: f32 = 10.0;
}
