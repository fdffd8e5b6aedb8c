//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Time enters only as a monotonic timestamp for display timers
//! - No rendering or platform dependencies

pub mod camera;
pub mod geometry;
pub mod player;
pub mod pool;
pub mod spawn;
pub mod state;
pub mod tick;

pub use camera::Camera;
pub use geometry::Rect;
pub use player::{CollisionOutcome, MoveIntent, PlayerState};
pub use pool::{DecorationEntity, MobileEntity, WorldPool, active_area};
pub use spawn::{random_off_camera_pos, random_velocity};
pub use state::{
    APEX_MESSAGE, Announcement, GAME_OVER_MESSAGES, RESTART_HINT, Session, SessionPhase,
    WIN_MESSAGE,
};
pub use tick::{SessionEnd, StepOutcome, TickInput, tick};
