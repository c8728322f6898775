//! Game state and core simulation types

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Whether the loop is advancing the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunState {
    /// Not scheduled; frames are ignored
    #[default]
    Stopped,
    /// Active gameplay
    Running,
    /// Paddles respond to input, the ball is frozen
    Paused,
}

/// Left (player 1) or right (player 2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// Things that happened during a tick, for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A player scored; `score` is the new tally
    Scored { side: Side, score: Score },
    /// Ball bounced off the top or bottom wall
    WallBounce,
    /// Ball bounced off a paddle at the given fractional offset (0 = top)
    PaddleHit { side: Side, hit_offset: f32 },
    /// Scores were zeroed by a full reset
    ScoreReset,
}

/// Both players' points
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub player1: u32,
    pub player2: u32,
}

impl Score {
    /// Award a point to the given side
    pub fn award(&mut self, side: Side) {
        match side {
            Side::Left => self.player1 = self.player1.saturating_add(1),
            Side::Right => self.player2 = self.player2.saturating_add(1),
        }
    }
}

/// The ball
#[derive(Debug, Clone)]
pub struct Ball {
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    pub radius: f32,
    pub color: [f32; 4],
}

impl Ball {
    pub fn new(settings: &Settings) -> Self {
        Self {
            pos: Vec2::new(settings.width / 2.0, settings.height / 2.0),
            vel: Vec2::new(settings.ball_speed_x, settings.ball_speed_y),
            radius: settings.ball_radius,
            color: settings.foreground,
        }
    }

    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }

    pub fn left(&self) -> f32 {
        self.pos.x - self.radius
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.radius
    }

    /// Recenter with base speed and a random sign on each axis
    pub fn serve(&mut self, settings: &Settings, rng: &mut Pcg32) {
        self.pos = Vec2::new(settings.width / 2.0, settings.height / 2.0);
        self.vel = Vec2::new(
            settings.ball_speed_x * random_sign(rng),
            settings.ball_speed_y * random_sign(rng),
        );
    }
}

fn random_sign(rng: &mut Pcg32) -> f32 {
    if rng.random_bool(0.5) { 1.0 } else { -1.0 }
}

/// A player's paddle (top-left anchored rectangle)
#[derive(Debug, Clone)]
pub struct Paddle {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Pixels per tick
    pub speed: f32,
    pub color: [f32; 4],
}

impl Paddle {
    pub fn new(side: Side, settings: &Settings) -> Self {
        let x = match side {
            Side::Left => settings.paddle_margin,
            Side::Right => settings.right_paddle_x(),
        };
        Self {
            pos: Vec2::new(x, settings.paddle_center_y()),
            width: settings.paddle_width,
            height: settings.paddle_height,
            speed: settings.paddle_speed,
            color: settings.foreground,
        }
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.height
    }

    /// Whether a y coordinate lies within the paddle's vertical span
    pub fn spans(&self, y: f32) -> bool {
        y >= self.top() && y <= self.bottom()
    }

    /// Apply up/down movement; both directions may apply and cancel out
    pub fn steer(&mut self, up: bool, down: bool, field_height: f32) {
        if up {
            self.pos.y -= self.speed;
        }
        if down {
            self.pos.y += self.speed;
        }
        self.pos.y = self.pos.y.clamp(0.0, field_height - self.height);
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub ball: Ball,
    pub left: Paddle,
    pub right: Paddle,
    pub score: Score,
    /// Simulation tick counter
    pub time_ticks: u64,
    rng: Pcg32,
}

impl GameState {
    /// Create the opening layout; the first serve always goes down-right
    pub fn new(settings: &Settings, seed: u64) -> Self {
        Self {
            ball: Ball::new(settings),
            left: Paddle::new(Side::Left, settings),
            right: Paddle::new(Side::Right, settings),
            score: Score::default(),
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Recenter the ball with a fresh random direction
    pub fn serve(&mut self, settings: &Settings) {
        self.ball.serve(settings, &mut self.rng);
    }

    /// Full reset: zero scores, recenter paddles, serve a random ball
    pub fn reset(&mut self, settings: &Settings) {
        self.serve(settings);
        self.left = Paddle::new(Side::Left, settings);
        self.right = Paddle::new(Side::Right, settings);
        self.score = Score::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_layout() {
        let settings = Settings::default();
        let state = GameState::new(&settings, 1);
        assert_eq!(state.ball.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.ball.vel, Vec2::new(8.0, 5.0));
        assert_eq!(state.left.pos, Vec2::new(20.0, 250.0));
        assert_eq!(state.right.pos, Vec2::new(765.0, 250.0));
        assert_eq!(state.score, Score::default());
    }

    #[test]
    fn test_serve_randomizes_each_axis() {
        let settings = Settings::default();
        let mut state = GameState::new(&settings, 7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            state.ball.pos = Vec2::ZERO;
            state.serve(&settings);
            assert_eq!(state.ball.pos, Vec2::new(400.0, 300.0));
            assert_eq!(state.ball.vel.x.abs(), 8.0);
            assert_eq!(state.ball.vel.y.abs(), 5.0);
            seen.insert((state.ball.vel.x > 0.0, state.ball.vel.y > 0.0));
        }
        // All four diagonal directions show up
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_same_seed_same_serves() {
        let settings = Settings::default();
        let mut a = GameState::new(&settings, 99);
        let mut b = GameState::new(&settings, 99);
        for _ in 0..16 {
            a.serve(&settings);
            b.serve(&settings);
            assert_eq!(a.ball.vel, b.ball.vel);
        }
    }

    #[test]
    fn test_steer_cancels_and_clamps() {
        let settings = Settings::default();
        let mut paddle = Paddle::new(Side::Left, &settings);
        paddle.steer(true, true, settings.height);
        assert_eq!(paddle.pos.y, 250.0);

        paddle.pos.y = 3.0;
        paddle.steer(true, false, settings.height);
        assert_eq!(paddle.pos.y, 0.0);

        paddle.pos.y = 497.0;
        paddle.steer(false, true, settings.height);
        assert_eq!(paddle.pos.y, 500.0);
    }

    #[test]
    fn test_score_award() {
        let mut score = Score::default();
        score.award(Side::Left);
        score.award(Side::Right);
        score.award(Side::Right);
        assert_eq!(score, Score { player1: 1, player2: 2 });

        score.player1 = u32::MAX;
        score.award(Side::Left);
        assert_eq!(score.player1, u32::MAX);
    }
}
