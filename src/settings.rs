//! Game settings and arena geometry
//!
//! Read once at startup from the canvas `data-settings` attribute (web) or the
//! `PONG_SETTINGS` environment variable (native). Never written back.

use serde::{Deserialize, Serialize};

use crate::error::{PongError, Result};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    Medium,
    /// Full effect density
    #[default]
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Explosion sparks per bombard frame
    pub fn explosion_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 12,
            QualityPreset::Medium => 24,
            QualityPreset::High => 36,
        }
    }

    /// Water sparkles per wave frame
    pub fn sparkle_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 10,
            QualityPreset::Medium => 18,
            QualityPreset::High => 25,
        }
    }

    /// Drifting clouds behind the bomber
    pub fn cloud_count(&self) -> usize {
        match self {
            QualityPreset::Low => 6,
            QualityPreset::Medium => 10,
            QualityPreset::High => 15,
        }
    }
}

/// Table geometry. All values are canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub width: f32,
    pub height: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub ball_radius: f32,
    /// Gap between a paddle and its side wall
    pub paddle_inset: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 640.0,
            paddle_width: 12.0,
            paddle_height: 80.0,
            ball_radius: 11.0,
            paddle_inset: 20.0,
        }
    }
}

impl ArenaConfig {
    /// Build a validated table of the given size with default paddle and ball
    pub fn new(width: f32, height: f32) -> Result<Self> {
        let config = Self {
            width,
            height,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject geometry the simulation cannot run on
    pub fn validate(&self) -> Result<()> {
        fn positive(field: &'static str, value: f32) -> Result<()> {
            if !value.is_finite() || value <= 0.0 {
                return Err(PongError::InvalidConfig {
                    field,
                    reason: "must be a positive number",
                });
            }
            Ok(())
        }

        positive("width", self.width)?;
        positive("height", self.height)?;
        positive("paddle_width", self.paddle_width)?;
        positive("paddle_height", self.paddle_height)?;
        positive("ball_radius", self.ball_radius)?;

        if !self.paddle_inset.is_finite() || self.paddle_inset < 0.0 {
            return Err(PongError::InvalidConfig {
                field: "paddle_inset",
                reason: "must not be negative",
            });
        }
        if self.paddle_height > self.height {
            return Err(PongError::InvalidConfig {
                field: "paddle_height",
                reason: "must fit inside the table height",
            });
        }
        if self.ball_radius * 2.0 >= self.height {
            return Err(PongError::InvalidConfig {
                field: "ball_radius",
                reason: "ball must fit between the walls",
            });
        }
        if 2.0 * (self.paddle_inset + self.paddle_width) >= self.width {
            return Err(PongError::InvalidConfig {
                field: "paddle_inset",
                reason: "paddles overlap the centre line",
            });
        }
        Ok(())
    }

    /// X of the left paddle's left edge
    #[inline]
    pub fn left_paddle_x(&self) -> f32 {
        self.paddle_inset
    }

    /// X of the right paddle's left edge
    #[inline]
    pub fn right_paddle_x(&self) -> f32 {
        self.width - self.paddle_width - self.paddle_inset
    }

    /// Largest legal paddle Y
    #[inline]
    pub fn max_paddle_y(&self) -> f32 {
        self.height - self.paddle_height
    }

    /// Paddle Y with the paddle vertically centred
    #[inline]
    pub fn centered_paddle_y(&self) -> f32 {
        (self.height - self.paddle_height) / 2.0
    }

    /// Clamp a paddle Y into the table
    #[inline]
    pub fn clamp_paddle_y(&self, y: f32) -> f32 {
        y.clamp(0.0, self.max_paddle_y())
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Table geometry
    pub arena: ArenaConfig,
    /// Overlay particle density
    pub quality: QualityPreset,
    /// Reduced motion (no bombard flash, no glitch jitter)
    pub reduced_motion: bool,
    /// Fixed simulation seed (clock-seeded when absent)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena: ArenaConfig::default(),
            quality: QualityPreset::High,
            reduced_motion: false,
            seed: None,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset (applies preset defaults)
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Parse and validate settings JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.arena.validate()?;
        Ok(settings)
    }

    /// Parse settings, falling back to defaults on any error
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring settings ({e}), using defaults");
                Self::default()
            }
        }
    }

    /// Whether per-frame flashes and glitch offsets are drawn
    pub fn effective_jitter(&self) -> bool {
        !self.reduced_motion
    }

    /// Attribute on the canvas element holding settings JSON
    #[cfg(target_arch = "wasm32")]
    const SETTINGS_ATTRIBUTE: &'static str = "data-settings";

    /// Load settings from the canvas `data-settings` attribute (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load(canvas: &web_sys::Element) -> Self {
        match canvas.get_attribute(Self::SETTINGS_ATTRIBUTE) {
            Some(json) => {
                let settings = Self::from_json_or_default(&json);
                log::info!("Loaded settings from canvas attribute");
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Environment variable holding settings JSON for native runs
    #[cfg(not(target_arch = "wasm32"))]
    const SETTINGS_ENV: &'static str = "PONG_SETTINGS";

    /// Load settings from `PONG_SETTINGS` (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        match std::env::var(Self::SETTINGS_ENV) {
            Ok(json) => Self::from_json_or_default(&json),
            Err(_) => Self::default(),
        }
    }
}
