//! The plain table: net, paddles, ball

use glam::Vec2;

use super::draw::{Color, DrawCmd, Frame, Sprite};
use crate::settings::ArenaConfig;
use crate::sim::{GameState, WaveSkill};

pub const LEFT_PADDLE: Color = Color::Hex("#00ff99");
pub const RIGHT_PADDLE: Color = Color::Hex("#ff0055");
/// Halo behind the ball while the wave drives it
pub const WAVE_BALL: Color = Color::Hex("#1aeaff");

/// Net dash length and spacing
const NET_DASH: f32 = 18.0;
const NET_SPACING: f32 = 30.0;

/// Black table background
pub fn background(frame: &mut Frame, arena: &ArenaConfig) {
    frame.rect(
        Vec2::ZERO,
        Vec2::new(arena.width, arena.height),
        Color::BLACK,
        1.0,
    );
}

/// Dashed centre line
pub fn net(frame: &mut Frame, arena: &ArenaConfig) {
    let x = arena.width / 2.0;
    let mut y = 0.0;
    while y < arena.height {
        frame.push(DrawCmd::Polyline {
            points: vec![Vec2::new(x, y), Vec2::new(x, y + NET_DASH)],
            color: Color::WHITE,
            width: 2.0,
            alpha: 1.0,
        });
        y += NET_SPACING;
    }
}

pub fn paddles(frame: &mut Frame, state: &GameState) {
    let arena = &state.arena;
    let size = Vec2::new(arena.paddle_width, arena.paddle_height);
    frame.rect(
        Vec2::new(arena.left_paddle_x(), state.play.left_paddle_y),
        size,
        LEFT_PADDLE,
        1.0,
    );
    frame.rect(
        Vec2::new(arena.right_paddle_x(), state.play.right_paddle_y),
        size,
        RIGHT_PADDLE,
        1.0,
    );
}

pub fn ball(frame: &mut Frame, state: &GameState) {
    frame.circle(state.play.ball.pos, state.arena.ball_radius, Color::WHITE, 1.0);
}

/// Ball riding the wave: bobbing, enlarged, with the rider sprite on top
pub fn wave_ball(frame: &mut Frame, state: &GameState, wave: &WaveSkill) {
    let radius = state.arena.ball_radius;
    let bob = wave.phase.sin() * 6.0;
    let center = state.play.ball.pos + Vec2::new(0.0, bob);

    frame.circle(center, radius + 10.0, WAVE_BALL, 1.0);

    let half = radius + 13.0;
    frame.push(DrawCmd::Sprite {
        sprite: Sprite::Wave,
        origin: Vec2::ZERO,
        rotation: 0.0,
        offset: center - Vec2::splat(half),
        size: Vec2::splat(half * 2.0),
        alpha: 0.6,
    });
}

/// Net, paddles and the regular ball
pub fn pieces(frame: &mut Frame, state: &GameState) {
    net(frame, &state.arena);
    paddles(frame, state);
    ball(frame, state);
}
