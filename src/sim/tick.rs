//! Fixed timestep simulation tick
//!
//! Advances the game state by exactly one step. Speeds are expressed in
//! pixels per tick, so a tick has no dt parameter.

use super::collision::{bounce_off_paddle, bounce_off_walls, goal_scored};
use super::state::{GameEvent, GameState, Side};
use crate::input::PaddleIntent;
use crate::settings::Settings;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub left: PaddleIntent,
    pub right: PaddleIntent,
    /// Paddles still move, the ball is frozen
    pub paused: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, settings: &Settings) -> Vec<GameEvent> {
    let mut events = Vec::new();
    state.time_ticks += 1;

    update_paddles(state, input, settings);

    if !input.paused {
        update_ball(state, settings, &mut events);
    }

    events
}

fn update_paddles(state: &mut GameState, input: &TickInput, settings: &Settings) {
    state.left.steer(input.left.up, input.left.down, settings.height);
    state.right.steer(input.right.up, input.right.down, settings.height);
}

fn update_ball(state: &mut GameState, settings: &Settings, events: &mut Vec<GameEvent>) {
    let ball = &mut state.ball;
    ball.pos += ball.vel;

    if bounce_off_walls(ball, settings.height) {
        events.push(GameEvent::WallBounce);
    }

    for (side, paddle) in [(Side::Left, &state.left), (Side::Right, &state.right)] {
        if let Some(hit_offset) =
            bounce_off_paddle(ball, paddle, side, settings.deflection_factor)
        {
            events.push(GameEvent::PaddleHit { side, hit_offset });
        }
    }

    if let Some(side) = goal_scored(ball, settings.width) {
        state.score.award(side);
        log::debug!(
            "{:?} scores: {} - {}",
            side,
            state.score.player1,
            state.score.player2
        );
        events.push(GameEvent::Scored {
            side,
            score: state.score,
        });
        state.serve(settings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Score;
    use glam::Vec2;
    use proptest::prelude::*;

    fn hold(up: bool, down: bool) -> PaddleIntent {
        PaddleIntent { up, down }
    }

    #[test]
    fn test_ball_moves_by_velocity() {
        let settings = Settings::default();
        let mut state = GameState::new(&settings, 1);
        let events = tick(&mut state, &TickInput::default(), &settings);
        assert!(events.is_empty());
        assert_eq!(state.ball.pos, Vec2::new(408.0, 305.0));
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_paused_tick_moves_paddles_only() {
        let settings = Settings::default();
        let mut state = GameState::new(&settings, 1);
        let input = TickInput {
            left: hold(true, false),
            right: hold(false, true),
            paused: true,
        };
        tick(&mut state, &input, &settings);
        assert_eq!(state.ball.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.left.pos.y, 242.0);
        assert_eq!(state.right.pos.y, 258.0);
    }

    #[test]
    fn test_holding_up_clamps_at_top() {
        let settings = Settings::default();
        let mut state = GameState::new(&settings, 1);
        let input = TickInput {
            left: hold(true, false),
            paused: true,
            ..Default::default()
        };
        // 250 / 8 = 31.25 ticks to reach the top; hold for 40
        for _ in 0..40 {
            tick(&mut state, &input, &settings);
        }
        assert_eq!(state.left.pos.y, 0.0);
    }

    #[test]
    fn test_right_player_scores_when_ball_exits_left() {
        let settings = Settings::default();
        let mut state = GameState::new(&settings, 3);
        state.ball.pos = Vec2::new(5.0, 100.0);
        state.ball.vel = Vec2::new(-8.0, 0.0);

        let events = tick(&mut state, &TickInput::default(), &settings);

        assert_eq!(state.score, Score { player1: 0, player2: 1 });
        assert_eq!(state.ball.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.ball.vel.x.abs(), 8.0);
        assert!(events.contains(&GameEvent::Scored {
            side: Side::Right,
            score: Score { player1: 0, player2: 1 },
        }));
    }

    #[test]
    fn test_left_player_scores_past_right_edge() {
        // Ball at (795, 300) moving right in an 800x600 field
        let settings = Settings::default();
        let mut state = GameState::new(&settings, 3);
        state.ball.pos = Vec2::new(795.0, 300.0);
        state.ball.vel = Vec2::new(8.0, 0.0);

        tick(&mut state, &TickInput::default(), &settings);

        assert_eq!(state.score, Score { player1: 1, player2: 0 });
        assert_eq!(state.ball.pos.x, 400.0);
    }

    #[test]
    fn test_paddle_hit_emits_event() {
        let settings = Settings::default();
        let mut state = GameState::new(&settings, 3);
        // Reaches x = 40 this tick, center of the left paddle
        state.ball.pos = Vec2::new(48.0, 300.0);
        state.ball.vel = Vec2::new(-8.0, 0.0);

        let events = tick(&mut state, &TickInput::default(), &settings);

        assert_eq!(
            events,
            vec![GameEvent::PaddleHit {
                side: Side::Left,
                hit_offset: 0.5
            }]
        );
        assert_eq!(state.ball.vel, Vec2::new(8.0, 0.0));
    }

    #[test]
    fn test_same_seed_same_rally() {
        let settings = Settings::default();
        let mut a = GameState::new(&settings, 2024);
        let mut b = GameState::new(&settings, 2024);
        let input = TickInput {
            right: hold(true, false),
            ..Default::default()
        };
        for _ in 0..2_000 {
            tick(&mut a, &input, &settings);
            tick(&mut b, &input, &settings);
        }
        assert_eq!(a.ball.pos, b.ball.pos);
        assert_eq!(a.ball.vel, b.ball.vel);
        assert_eq!(a.score, b.score);
    }

    proptest! {
        #[test]
        fn prop_paddles_stay_in_bounds(
            intents in prop::collection::vec(
                (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()),
                1..300,
            )
        ) {
            let settings = Settings::default();
            let mut state = GameState::new(&settings, 11);
            for (lu, ld, ru, rd) in intents {
                let input = TickInput {
                    left: hold(lu, ld),
                    right: hold(ru, rd),
                    paused: false,
                };
                tick(&mut state, &input, &settings);
                for paddle in [&state.left, &state.right] {
                    prop_assert!(paddle.pos.y >= 0.0);
                    prop_assert!(paddle.pos.y <= settings.height - paddle.height);
                }
            }
        }

        #[test]
        fn prop_one_flip_per_wall_crossing(vy in 1.0f32..12.0, start in 20.0f32..200.0) {
            // Straight up into the top wall, away from paddles and goals
            let settings = Settings::default();
            let mut state = GameState::new(&settings, 5);
            state.ball.pos = Vec2::new(400.0, start);
            state.ball.vel = Vec2::new(0.0, -vy);

            let mut bounces = 0;
            for _ in 0..400 {
                let events = tick(&mut state, &TickInput::default(), &settings);
                bounces += events.iter().filter(|e| **e == GameEvent::WallBounce).count();
                if state.ball.vel.y > 0.0 && state.ball.top() > 0.0 {
                    break;
                }
            }
            prop_assert_eq!(bounces, 1);
            prop_assert!(state.ball.vel.y > 0.0);
        }
    }
}
