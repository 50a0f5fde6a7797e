//! Per-frame simulation step
//!
//! Core game loop that advances the match by exactly one display frame.

use super::physics::{step_ball, update_ai};
use super::skill::{self, BallControl, SkillKind};
use super::state::GameState;

/// Input gathered since the previous frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Latest pointer Y inside the canvas
    pub pointer_y: Option<f32>,
    /// Skill requested by the host
    pub skill: Option<SkillKind>,
}

impl FrameInput {
    /// Hand the queued input to a frame, leaving nothing queued.
    ///
    /// A pointer position applies once; it is not replayed on later frames.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &FrameInput) {
    if let Some(y) = input.pointer_y {
        state.move_player_to(y);
    }
    if let Some(kind) = input.skill {
        state.activate_skill(kind);
    }

    state.time_frames += 1;

    match skill::advance(state) {
        BallControl::Physics => {
            update_ai(state);
            step_ball(state);
        }
        BallControl::Wave => skill::drive_wave(state),
        BallControl::Frozen => {}
    }
}
