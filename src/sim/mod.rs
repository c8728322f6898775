//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{bounce_off_paddle, bounce_off_walls, deflect, goal_scored, hit_offset};
pub use state::{Ball, GameEvent, GameState, Paddle, RunState, Score, Side};
pub use tick::{TickInput, tick};
