//! Collision checks for the ball against walls and paddles
//!
//! Everything is axis aligned: the ball is treated by its bounding box and
//! paddles are plain rectangles.

use glam::Vec2;

use crate::consts::PADDLE_DEFLECTION;

/// An axis-aligned paddle rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaddleRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PaddleRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Y of the paddle centre
    #[inline]
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Ball's vertical extent overlaps the paddle
    #[inline]
    fn spans(&self, ball_y: f32, radius: f32) -> bool {
        ball_y + radius > self.y && ball_y - radius < self.y + self.height
    }
}

/// Reflect off the top/bottom wall.
///
/// Clamps the ball back inside and flips vertical velocity. Returns true on
/// contact.
pub fn wall_bounce(pos: &mut Vec2, vel: &mut Vec2, radius: f32, height: f32) -> bool {
    let mut hit = false;
    if pos.y - radius < 0.0 {
        pos.y = radius;
        vel.y = -vel.y;
        hit = true;
    }
    if pos.y + radius > height {
        pos.y = height - radius;
        vel.y = -vel.y;
        hit = true;
    }
    hit
}

/// Ball touches the left paddle's front face.
///
/// The ball must still be in front of the paddle's back edge, so a ball that
/// already slipped past is not pulled back.
pub fn hits_left_paddle(pos: Vec2, radius: f32, paddle: &PaddleRect) -> bool {
    pos.x - radius < paddle.x + paddle.width
        && paddle.spans(pos.y, radius)
        && pos.x - radius > paddle.x
}

/// Ball touches the right paddle's front face (mirror of the left check)
pub fn hits_right_paddle(pos: Vec2, radius: f32, paddle: &PaddleRect) -> bool {
    pos.x + radius > paddle.x
        && paddle.spans(pos.y, radius)
        && pos.x + radius < paddle.x + paddle.width * 2.0
}

/// Vertical speed after a paddle hit.
///
/// Linear in the contact offset: 0 at the paddle centre, ±2.5 at the edges.
#[inline]
pub fn deflection(ball_y: f32, paddle: &PaddleRect) -> f32 {
    let offset = (ball_y - paddle.center_y()) / (paddle.height / 2.0);
    offset * PADDLE_DEFLECTION
}
