//! Error type shared by configuration and the host entry points

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PongError {
    /// A configuration value is out of range
    #[error("invalid config: `{field}` {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },

    /// `activateSkill` was called with a name that maps to no skill
    #[error("unknown skill `{0}`")]
    UnknownSkill(String),

    /// Settings JSON could not be parsed
    #[error("malformed settings: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PongError>;
