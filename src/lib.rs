//! Skill Pong - classic two-paddle Pong with timed skill overlays
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, AI, skill state machine)
//! - `renderer`: Display-list renderer and the 2D canvas backend
//! - `settings`: Arena geometry and visual preferences
//! - `error`: Crate error type

pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::PongError;
pub use settings::{ArenaConfig, QualityPreset, Settings};

/// Game tuning constants
pub mod consts {
    /// Nominal paddle speed (units per frame)
    pub const PADDLE_SPEED: f32 = 6.0;
    /// AI paddle moves at this fraction of the nominal speed
    pub const AI_SPEED_FACTOR: f32 = 0.7;
    /// AI holds still while the ball is within this distance of its centre
    pub const AI_DEAD_ZONE: f32 = 20.0;

    /// Baseline serve speed, horizontal component
    pub const BASE_BALL_SPEED_X: f32 = 1.2;
    /// Baseline serve speed, vertical component (scaled by U(-1, 1))
    pub const BASE_BALL_SPEED_Y: f32 = 0.8;

    /// Vertical speed at the very edge of a paddle
    pub const PADDLE_DEFLECTION: f32 = 2.5;
}
