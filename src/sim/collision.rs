//! Collision detection and response
//!
//! Axis-aligned checks between the ball, the horizontal walls, the two
//! paddles, and the goal lines. There is no position correction: a ball may
//! overlap a wall or paddle for up to one tick of travel.

use super::state::{Ball, Paddle, Side};

/// Flip vertical velocity if the ball has reached a horizontal wall while
/// still moving into it. Returns true on a bounce.
pub fn bounce_off_walls(ball: &mut Ball, field_height: f32) -> bool {
    let into_top = ball.top() <= 0.0 && ball.vel.y < 0.0;
    let into_bottom = ball.bottom() >= field_height && ball.vel.y > 0.0;
    if into_top || into_bottom {
        ball.vel.y = -ball.vel.y;
        true
    } else {
        false
    }
}

/// Fractional position of `y` along the paddle, 0 at the top edge and 1 at
/// the bottom edge
pub fn hit_offset(paddle: &Paddle, y: f32) -> f32 {
    (y - paddle.top()) / paddle.height
}

/// Vertical speed after a paddle hit: -factor/2 at the top edge, 0 at the
/// center, +factor/2 at the bottom edge
pub fn deflect(hit_offset: f32, factor: f32) -> f32 {
    (hit_offset - 0.5) * factor
}

/// Whether the ball is touching `paddle` on `side` while moving toward it
pub fn touches_paddle(ball: &Ball, paddle: &Paddle, side: Side) -> bool {
    if !paddle.spans(ball.pos.y) {
        return false;
    }
    match side {
        Side::Left => ball.left() <= paddle.right() && ball.vel.x < 0.0,
        Side::Right => ball.right() >= paddle.left() && ball.vel.x > 0.0,
    }
}

/// Bounce the ball off a paddle. Returns the hit offset when it connects.
pub fn bounce_off_paddle(
    ball: &mut Ball,
    paddle: &Paddle,
    side: Side,
    deflection_factor: f32,
) -> Option<f32> {
    if !touches_paddle(ball, paddle, side) {
        return None;
    }
    let offset = hit_offset(paddle, ball.pos.y);
    ball.vel.x = -ball.vel.x;
    ball.vel.y = deflect(offset, deflection_factor);
    Some(offset)
}

/// Which side scores if the ball center has left the playfield
pub fn goal_scored(ball: &Ball, field_width: f32) -> Option<Side> {
    if ball.pos.x < 0.0 {
        Some(Side::Right)
    } else if ball.pos.x > field_width {
        Some(Side::Left)
    } else {
        None
    }
}
