//! Game settings and tuning
//!
//! Read from LocalStorage on the web; native builds always use defaults.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::renderer::vertex::colors;

/// Why a settings record was rejected
#[derive(Debug)]
pub enum SettingsError {
    /// JSON did not parse into a settings record
    Parse(serde_json::Error),
    /// A dimension, speed, or rate that must be positive and finite was not
    NonPositive(&'static str),
    /// A tuning value that must be finite was NaN or infinite
    NonFinite(&'static str),
    /// Negative margin, or the two paddles meet in the middle
    NoRoomForPaddles { margin: f32, paddle_width: f32, width: f32 },
    /// The paddles do not fit inside the playfield
    PaddleTooTall { paddle_height: f32, height: f32 },
    /// The ball does not fit between the walls
    BallTooLarge { radius: f32 },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Parse(e) => write!(f, "invalid settings JSON: {}", e),
            SettingsError::NonPositive(field) => {
                write!(f, "{} must be a positive finite number", field)
            }
            SettingsError::NonFinite(field) => write!(f, "{} must be finite", field),
            SettingsError::NoRoomForPaddles {
                margin,
                paddle_width,
                width,
            } => write!(
                f,
                "paddles {} wide with margin {} do not fit playfield width {}",
                paddle_width, margin, width
            ),
            SettingsError::PaddleTooTall {
                paddle_height,
                height,
            } => write!(
                f,
                "paddle height {} does not fit playfield height {}",
                paddle_height, height
            ),
            SettingsError::BallTooLarge { radius } => {
                write!(f, "ball radius {} does not fit the playfield", radius)
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

/// Playfield geometry, kinematics and palette
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    pub width: f32,
    pub height: f32,

    // === Paddles ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Pixels per tick
    pub paddle_speed: f32,
    /// Gap between each paddle and its side wall
    pub paddle_margin: f32,

    // === Ball ===
    pub ball_radius: f32,
    /// Base horizontal speed magnitude after a reset (pixels per tick)
    pub ball_speed_x: f32,
    /// Base vertical speed magnitude after a reset (pixels per tick)
    pub ball_speed_y: f32,
    /// Paddle hit deflection: vy = (hit_offset - 0.5) * factor
    pub deflection_factor: f32,

    // === Pacing ===
    /// Simulation ticks per second
    pub tick_rate_hz: f32,

    // === Palette ===
    pub background: [f32; 4],
    pub foreground: [f32; 4],
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_speed: PADDLE_SPEED,
            paddle_margin: PADDLE_MARGIN,

            ball_radius: BALL_RADIUS,
            ball_speed_x: BALL_SPEED_X,
            ball_speed_y: BALL_SPEED_Y,
            deflection_factor: DEFLECTION_FACTOR,

            tick_rate_hz: TICK_RATE_HZ,

            background: colors::BACKGROUND,
            foreground: colors::FOREGROUND,
        }
    }
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "canvas_pong_settings";

    /// Seconds per simulation tick
    pub fn tick_interval(&self) -> f32 {
        1.0 / self.tick_rate_hz
    }

    /// Top edge of a vertically centered paddle
    pub fn paddle_center_y(&self) -> f32 {
        self.height / 2.0 - self.paddle_height / 2.0
    }

    /// Left edge of the right-hand paddle
    pub fn right_paddle_x(&self) -> f32 {
        self.width - self.paddle_margin - self.paddle_width
    }

    /// Check that the configuration describes a playable field
    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_speed", self.paddle_speed),
            ("ball_radius", self.ball_radius),
            ("ball_speed_x", self.ball_speed_x),
            ("ball_speed_y", self.ball_speed_y),
            ("tick_rate_hz", self.tick_rate_hz),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SettingsError::NonPositive(field));
            }
        }

        if !self.deflection_factor.is_finite() {
            return Err(SettingsError::NonFinite("deflection_factor"));
        }

        // Also rejects NaN
        let fits = self.paddle_margin >= 0.0
            && 2.0 * (self.paddle_margin + self.paddle_width) < self.width;
        if !fits {
            return Err(SettingsError::NoRoomForPaddles {
                margin: self.paddle_margin,
                paddle_width: self.paddle_width,
                width: self.width,
            });
        }

        if self.paddle_height > self.height {
            return Err(SettingsError::PaddleTooTall {
                paddle_height: self.paddle_height,
                height: self.height,
            });
        }

        if self.ball_radius * 2.0 >= self.height.min(self.width) {
            return Err(SettingsError::BallTooLarge {
                radius: self.ball_radius,
            });
        }

        Ok(())
    }

    /// Parse and validate a JSON settings record (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
