//! Session state and core simulation types
//!
//! A `Session` owns everything one playthrough touches: the tuning, the
//! seeded RNG, the player, the world pool and the camera. Nothing carries
//! over between sessions.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::player::PlayerState;
use super::pool::WorldPool;
use crate::config::{ConfigError, GameConfig};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Active gameplay
    Playing,
    /// Player ran out of health; the message stays up until it times out
    GameOver { since: f64 },
    /// Player grew past the win size; waits for a restart command
    Won,
}

impl SessionPhase {
    pub fn is_playing(&self) -> bool {
        matches!(self, SessionPhase::Playing)
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self, SessionPhase::GameOver { .. })
    }
}

/// A timed on-screen message that fades out linearly
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    pub started_at: f64,
    pub duration: f64,
}

impl Announcement {
    pub fn new(started_at: f64, duration: f64) -> Self {
        Self {
            started_at,
            duration,
        }
    }

    /// Opacity from 255 down to 0, or `None` once the fade is over
    pub fn alpha(&self, now: f64) -> Option<u8> {
        let elapsed = now - self.started_at;
        if elapsed > self.duration {
            return None;
        }
        let alpha = 255.0 * (1.0 - elapsed / self.duration);
        Some(alpha.clamp(0.0, 255.0) as u8)
    }

    pub fn is_expired(&self, now: f64) -> bool {
        self.alpha(now).is_none()
    }
}

pub const APEX_MESSAGE: &str = "You are an Apex Predator!";
pub const WIN_MESSAGE: &str = "You have achieved Final Fin!";
pub const RESTART_HINT: &str = "(Press \"r\" to restart.)";

/// One of these is picked when a session starts
pub const GAME_OVER_MESSAGES: &[&str] = &[
    "Game Over - You've sunken into the Abyss.",
    "Game Over - The squids vanished... and took your dignity with them.",
    "Game Over - Inked, outflanked, and outwitted.",
    "Game Over - You dove too deep. The squids were waiting.",
    "Game Over - Tentacles tighten. The deep claims another.",
    "Game Over - One orca vs a thousand arms? Bad odds.",
    "Game Over - The squids inked a masterpiece... and you were the canvas.",
    "Game Over - Their minds were alien. Their strategy, flawless.",
    "Game Over - Drenched in ink and regret.",
    "Game Over - You were the apex predator... until you weren't.",
    "Game Over - The squids coordinated. You hesitated.",
];

/// Complete state of one playthrough
#[derive(Debug, Clone)]
pub struct Session {
    pub config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: SessionPhase,
    pub player: PlayerState,
    pub pool: WorldPool,
    pub camera: Camera,
    /// Fading "apex predator" banner, if one is showing
    pub apex_announcement: Option<Announcement>,
    pub game_over_message: &'static str,
    pub started_at: f64,
}

impl Session {
    /// Validate the config and build a fresh session
    pub fn new(config: GameConfig, seed: u64, now: f64) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = Pcg32::seed_from_u64(seed);
        let game_over_message = GAME_OVER_MESSAGES[rng.random_range(0..GAME_OVER_MESSAGES.len())];
        let pool = WorldPool::new(&config, &mut rng);
        let player = PlayerState::new(&config);

        log::info!("Session started with seed {}", seed);

        Ok(Self {
            config,
            seed,
            rng,
            time_ticks: 0,
            phase: SessionPhase::Playing,
            player,
            pool,
            camera: Camera::default(),
            apex_announcement: None,
            game_over_message,
            started_at: now,
        })
    }

    /// Viewport size as a vector
    pub fn viewport(&self) -> glam::IVec2 {
        glam::IVec2::new(self.config.win_width, self.config.win_height)
    }
}
