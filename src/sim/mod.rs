//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per display frame
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod physics;
pub mod skill;
pub mod state;
pub mod tick;

pub use collision::{PaddleRect, deflection, hits_left_paddle, hits_right_paddle, wall_bounce};
pub use physics::{BallStep, step_ball, update_ai};
pub use skill::{BallControl, SkillKind, SkillState, WaveSkill};
pub use state::{Ball, GameEvent, GameState, MatchState, Score, Side};
pub use tick::{FrameInput, tick};
