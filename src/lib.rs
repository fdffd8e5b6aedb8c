//! Orca Chowdown - A top-down eat-to-grow arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (pool, camera, player, collisions, session phases)
//! - `renderer`: Draw-surface seam and frame composition
//! - `platform`: Input events and monotonic clock abstraction
//! - `config`: Data-driven game tuning
//! - `app`: Outer session loop tying input, simulation and rendering together
//! - `autopilot`: Demo steering policy for headless runs

pub mod app;
pub mod autopilot;
pub mod config;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::{ConfigError, GameConfig};

/// Default tuning constants (mirrored by `GameConfig::default`)
pub mod consts {
    /// Frames per second the loop targets
    pub const FPS: u32 = 30;

    /// Window dimensions, in pixels
    pub const WIN_WIDTH: i32 = 640;
    pub const WIN_HEIGHT: i32 = 480;

    /// How far from the center the player moves before the camera follows
    pub const CAMERA_SLACK: i32 = 90;
    /// How fast the player moves (pixels per tick)
    pub const MOVE_RATE: i32 = 9;
    /// How fast the player bounces (large is slower)
    pub const BOUNCE_RATE: i32 = 6;
    /// How high the player bounces
    pub const BOUNCE_HEIGHT: i32 = 30;
    /// Starting player width
    pub const START_SIZE: i32 = 25;
    /// Width the player must exceed to win
    pub const WIN_SIZE: i32 = 300;
    /// Invulnerability after a hit, in seconds
    pub const INVULN_TIME: f64 = 2.0;
    /// How long messages like "game over" stay on screen, in seconds
    pub const MSG_DISPLAY_TIME: f64 = 6.0;
    pub const MAX_HEALTH: u32 = 3;

    /// Population targets for the active area
    pub const NUM_DECORATIONS: usize = 80;
    pub const NUM_MOBILES: usize = 30;
    /// Decorations scattered on screen when a session starts
    pub const INITIAL_DECORATIONS: usize = 10;

    /// Mobile speed range (pixels per tick, per axis)
    pub const MOBILE_MIN_SPEED: i32 = 3;
    pub const MOBILE_MAX_SPEED: i32 = 5;
    /// Percent chance per tick that a mobile changes direction
    pub const DIR_CHANGE_FREQ: u32 = 2;

    /// Eat-size tolerance before apex mode
    pub const START_BUFFER: f64 = 2.5;
    /// Width at which the player becomes an apex predator
    pub const APEX_WIDTH: i32 = 150;

    /// Sprite aspect ratios (height / width)
    pub const PLAYER_ASPECT_RATIO: f64 = 250.0 / 425.0;
    pub const MOBILE_ASPECT_RATIO: f64 = 340.0 / 200.0;
    /// Narrowest mobile a normal spawn can roll
    pub const MIN_MOBILE_WIDTH: i32 = 5;

    /// Decoration sprite size and number of variants
    pub const DECORATION_WIDTH: i32 = 80;
    pub const DECORATION_HEIGHT: i32 = 80;
    pub const DECORATION_VARIANTS: usize = 4;
}

/// Left/right orientation of a sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum Facing {
    #[default]
    Left,
    Right,
}

/// Sinusoidal vertical offset for a bounce phase.
///
/// Larger `bounce_rate` means a slower bounce, larger `bounce_height` a
/// higher one. Truncates toward zero.
#[inline]
pub fn bounce_amount(phase: i32, bounce_rate: i32, bounce_height: i32) -> i32 {
    let angle = std::f64::consts::PI / bounce_rate as f64 * phase as f64;
    (angle.sin() * bounce_height as f64) as i32
}
