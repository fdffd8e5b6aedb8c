//! Game tuning and configuration
//!
//! Loaded from an optional JSON file; any field left out keeps its default.
//! Validated once when a session is constructed.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Configuration errors (all fatal at session construction)
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f64 },
    #[error("mobile speed range is empty ({min}..={max})")]
    SpeedRange { min: i32, max: i32 },
    #[error("direction change frequency is a percentage, got {0}")]
    DirChangeFreq(u32),
    #[error("apex width {apex} must be below win size {win}")]
    ApexThreshold { apex: i32, win: i32 },
    #[error("start buffer must be at least 1.0 (got {0})")]
    StartBuffer(f64),
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Game tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Loop ===
    pub fps: u32,
    pub win_width: i32,
    pub win_height: i32,

    // === Camera ===
    pub camera_slack: i32,

    // === Player ===
    pub move_rate: i32,
    pub bounce_rate: i32,
    pub bounce_height: i32,
    pub start_size: i32,
    pub win_size: i32,
    pub max_health: u32,
    /// Seconds of invulnerability after a hit
    pub invuln_time: f64,
    pub start_buffer: f64,
    pub apex_width: i32,
    pub player_aspect_ratio: f64,

    // === Messages ===
    /// Seconds the game-over text stays up (also the apex fade length)
    pub msg_display_time: f64,

    // === World population ===
    pub num_decorations: usize,
    pub initial_decorations: usize,
    pub num_mobiles: usize,
    pub mobile_min_speed: i32,
    pub mobile_max_speed: i32,
    /// Percent chance per tick of a random redirect
    pub dir_change_freq: u32,
    pub mobile_aspect_ratio: f64,
    pub decoration_width: i32,
    pub decoration_height: i32,
    pub decoration_variants: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fps: FPS,
            win_width: WIN_WIDTH,
            win_height: WIN_HEIGHT,

            camera_slack: CAMERA_SLACK,

            move_rate: MOVE_RATE,
            bounce_rate: BOUNCE_RATE,
            bounce_height: BOUNCE_HEIGHT,
            start_size: START_SIZE,
            win_size: WIN_SIZE,
            max_health: MAX_HEALTH,
            invuln_time: INVULN_TIME,
            start_buffer: START_BUFFER,
            apex_width: APEX_WIDTH,
            player_aspect_ratio: PLAYER_ASPECT_RATIO,

            msg_display_time: MSG_DISPLAY_TIME,

            num_decorations: NUM_DECORATIONS,
            initial_decorations: INITIAL_DECORATIONS,
            num_mobiles: NUM_MOBILES,
            mobile_min_speed: MOBILE_MIN_SPEED,
            mobile_max_speed: MOBILE_MAX_SPEED,
            dir_change_freq: DIR_CHANGE_FREQ,
            mobile_aspect_ratio: MOBILE_ASPECT_RATIO,
            decoration_width: DECORATION_WIDTH,
            decoration_height: DECORATION_HEIGHT,
            decoration_variants: DECORATION_VARIANTS,
        }
    }
}

impl GameConfig {
    /// Load a config from a JSON file, falling back to defaults per field
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        let config: Self = serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: display.clone(),
            source,
        })?;
        log::info!("Loaded config from {}", display);
        Ok(config)
    }

    /// Check every size, rate and ratio before a session is built
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive: [(&'static str, f64); 16] = [
            ("fps", self.fps as f64),
            ("win_width", self.win_width as f64),
            ("win_height", self.win_height as f64),
            ("move_rate", self.move_rate as f64),
            ("bounce_rate", self.bounce_rate as f64),
            ("start_size", self.start_size as f64),
            ("win_size", self.win_size as f64),
            ("max_health", self.max_health as f64),
            ("msg_display_time", self.msg_display_time),
            ("player_aspect_ratio", self.player_aspect_ratio),
            ("mobile_aspect_ratio", self.mobile_aspect_ratio),
            ("mobile_min_speed", self.mobile_min_speed as f64),
            ("decoration_width", self.decoration_width as f64),
            ("decoration_height", self.decoration_height as f64),
            ("decoration_variants", self.decoration_variants as f64),
            ("apex_width", self.apex_width as f64),
        ];
        for (field, value) in positive {
            // NaN fails this too
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if self.camera_slack < 0 {
            return Err(ConfigError::NonPositive {
                field: "camera_slack",
                value: self.camera_slack as f64,
            });
        }
        if self.invuln_time < 0.0 || self.invuln_time.is_nan() {
            return Err(ConfigError::NonPositive {
                field: "invuln_time",
                value: self.invuln_time,
            });
        }
        if self.mobile_max_speed < self.mobile_min_speed {
            return Err(ConfigError::SpeedRange {
                min: self.mobile_min_speed,
                max: self.mobile_max_speed,
            });
        }
        if self.dir_change_freq > 100 {
            return Err(ConfigError::DirChangeFreq(self.dir_change_freq));
        }
        if self.apex_width >= self.win_size {
            return Err(ConfigError::ApexThreshold {
                apex: self.apex_width,
                win: self.win_size,
            });
        }
        if !(self.start_buffer >= 1.0) {
            return Err(ConfigError::StartBuffer(self.start_buffer));
        }

        // Heights are derived from widths and truncated
        let derived = [
            ("player_height", self.start_size, self.player_aspect_ratio),
            ("mobile_height", MIN_MOBILE_WIDTH, self.mobile_aspect_ratio),
        ];
        for (field, width, ratio) in derived {
            let height = (width as f64 * ratio) as i32;
            if height < 1 {
                return Err(ConfigError::NonPositive {
                    field,
                    value: height as f64,
                });
            }
        }
        Ok(())
    }
}
