//! Ball motion, paddle collisions, scoring and the AI paddle

use super::collision::{PaddleRect, deflection, hits_left_paddle, hits_right_paddle, wall_bounce};
use super::state::{GameEvent, GameState, Side};
use crate::consts::*;

/// What happened to the ball during one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BallStep {
    /// Paddle the ball bounced off, if any
    pub paddle: Option<Side>,
    /// Side that won a point, if any
    pub scored: Option<Side>,
}

/// Advance the ball one frame: move, walls, paddles, scoring
pub fn step_ball(state: &mut GameState) -> BallStep {
    let arena = state.arena;
    let radius = arena.ball_radius;
    let left = PaddleRect::new(
        arena.left_paddle_x(),
        state.play.left_paddle_y,
        arena.paddle_width,
        arena.paddle_height,
    );
    let right = PaddleRect::new(
        arena.right_paddle_x(),
        state.play.right_paddle_y,
        arena.paddle_width,
        arena.paddle_height,
    );

    let mut step = BallStep::default();
    let ball = &mut state.play.ball;
    ball.pos += ball.vel;

    let bounced = wall_bounce(&mut ball.pos, &mut ball.vel, radius, arena.height);

    if hits_left_paddle(ball.pos, radius, &left) {
        ball.pos.x = left.x + left.width + radius;
        ball.vel.x = ball.vel.x.abs();
        ball.vel.y = deflection(ball.pos.y, &left);
        step.paddle = Some(Side::Left);
    }
    if hits_right_paddle(ball.pos, radius, &right) {
        ball.pos.x = right.x - radius;
        ball.vel.x = -ball.vel.x.abs();
        ball.vel.y = deflection(ball.pos.y, &right);
        step.paddle = Some(Side::Right);
    }

    if ball.pos.x - radius < 0.0 {
        step.scored = Some(Side::Right);
    } else if ball.pos.x + radius > arena.width {
        step.scored = Some(Side::Left);
    }

    if bounced {
        state.push_event(GameEvent::WallBounce);
    }
    if let Some(side) = step.paddle {
        state.push_event(GameEvent::PaddleHit(side));
    }
    if let Some(scorer) = step.scored {
        award_point(state, scorer);
    }

    step
}

/// Give `scorer` a point and serve from the centre toward the scorer's side
fn award_point(state: &mut GameState, scorer: Side) {
    let mut score = state.play.score;
    match scorer {
        Side::Left => score.left += 1,
        Side::Right => score.right += 1,
    }
    log::debug!("Point to {:?}: {} - {}", scorer, score.left, score.right);

    let arena = state.arena;
    state
        .play
        .respawn_ball(&arena, &mut state.rng, Some(scorer));
    state.push_event(GameEvent::PointScored(scorer));
    state.set_score(score);
}

/// Reactive AI for the right paddle: chase the ball outside a dead zone
pub fn update_ai(state: &mut GameState) {
    let arena = state.arena;
    let ball_y = state.play.ball.pos.y;
    let paddle_y = &mut state.play.right_paddle_y;
    let center = *paddle_y + arena.paddle_height / 2.0;
    let speed = PADDLE_SPEED * AI_SPEED_FACTOR;

    if center < ball_y - AI_DEAD_ZONE {
        *paddle_y += speed;
    } else if center > ball_y + AI_DEAD_ZONE {
        *paddle_y -= speed;
    }
    *paddle_y = arena.clamp_paddle_y(*paddle_y);
}
