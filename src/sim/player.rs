//! The player orca
//!
//! Owns movement, the idle/walk bounce, health and invulnerability, growth by
//! eating, and the one-way promotion to apex predator.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::pool::MobileEntity;
use crate::config::GameConfig;
use crate::{Facing, bounce_amount};

/// Movement keys currently held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MoveIntent {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl MoveIntent {
    pub fn any(&self) -> bool {
        self.left || self.right || self.up || self.down
    }
}

/// What happened when the player touched a mobile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionOutcome {
    /// The mobile was eaten and should leave the pool
    Ate {
        grew_by: i32,
        became_apex: bool,
        reached_win: bool,
    },
    /// The player was hurt
    Damaged { health: u32, died: bool },
    /// Too big to eat, but the player is invulnerable
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// World position of the top-left corner
    pub position: IVec2,
    /// Pixels per tick, set from input
    pub velocity: IVec2,
    pub width: i32,
    pub height: i32,
    /// Sprite height / width, fixed for the session
    pub aspect_ratio: f64,
    pub facing: Facing,
    pub bounce_phase: i32,
    pub bounce_rate: i32,
    pub bounce_height: i32,
    pub health: u32,
    pub max_health: u32,
    /// Eat-size tolerance multiplier (drops to 1.0 at apex)
    pub buffer: f64,
    pub apex_threshold: i32,
    pub is_apex: bool,
    pub apex_entered_at: Option<f64>,
    pub invulnerable_until: Option<f64>,
    /// Whether any movement key was held this tick
    moving: bool,
}

impl PlayerState {
    /// A fresh player centered in the starting viewport
    pub fn new(config: &GameConfig) -> Self {
        let width = config.start_size;
        Self {
            position: IVec2::new(config.win_width / 2, config.win_height / 2),
            velocity: IVec2::ZERO,
            width,
            height: (width as f64 * config.player_aspect_ratio) as i32,
            aspect_ratio: config.player_aspect_ratio,
            facing: Facing::Left,
            bounce_phase: 0,
            bounce_rate: config.bounce_rate,
            bounce_height: config.bounce_height,
            health: config.max_health,
            max_health: config.max_health,
            buffer: config.start_buffer,
            apex_threshold: config.apex_width,
            is_apex: false,
            apex_entered_at: None,
            invulnerable_until: None,
            moving: false,
        }
    }

    pub fn area(&self) -> i64 {
        self.width as i64 * self.height as i64
    }

    pub fn center(&self) -> IVec2 {
        self.position + IVec2::new(self.width / 2, self.height / 2)
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.position, self.width, self.height)
    }

    /// Footprint lifted by the current bounce, as drawn
    pub fn hit_rect(&self) -> Rect {
        let lift = bounce_amount(self.bounce_phase, self.bounce_rate, self.bounce_height);
        self.rect().translated(IVec2::new(0, -lift))
    }

    pub fn is_invulnerable(&self, now: f64) -> bool {
        self.invulnerable_until.is_some_and(|until| now <= until)
    }

    /// Set velocity and facing from the held movement keys
    pub fn apply_input(&mut self, intent: MoveIntent, move_rate: i32) {
        let axis = |neg: bool, pos: bool| (pos as i32 - neg as i32) * move_rate;
        self.velocity = IVec2::new(
            axis(intent.left, intent.right),
            axis(intent.up, intent.down),
        );
        self.moving = intent.any();

        let facing = match (intent.left, intent.right) {
            (true, false) => Some(Facing::Left),
            (false, true) => Some(Facing::Right),
            _ => None,
        };
        match facing {
            Some(facing) if facing != self.facing => {
                log::debug!("Player turned {:?}", facing);
                self.facing = facing;
            }
            _ => {}
        }
    }

    /// Move and advance the bounce. Bouncing continues until the cycle
    /// completes even after the keys are released.
    pub fn tick(&mut self, now: f64) {
        self.position += self.velocity;

        if self.moving || self.bounce_phase != 0 {
            self.bounce_phase += 1;
        }
        if self.bounce_phase > self.bounce_rate {
            self.bounce_phase = 0;
        }

        self.expire_invulnerability(now);
    }

    /// Clear an invulnerability window that has run out
    pub fn expire_invulnerability(&mut self, now: f64) {
        if self.invulnerable_until.is_some_and(|until| now > until) {
            self.invulnerable_until = None;
        }
    }

    /// Whether a mobile is small enough to eat
    pub fn can_eat(&self, mobile: &MobileEntity) -> bool {
        mobile.area() as f64 <= self.area() as f64 * self.buffer
    }

    /// Eat the mobile or get hurt by it
    pub fn resolve_collision(
        &mut self,
        mobile: &MobileEntity,
        now: f64,
        config: &GameConfig,
    ) -> CollisionOutcome {
        if self.can_eat(mobile) {
            let grew_by = (mobile.area() as f64).powf(0.2).floor() as i32 + 1;
            self.width += grew_by;
            self.height = (self.width as f64 * self.aspect_ratio) as i32;

            let became_apex = !self.is_apex && self.width >= self.apex_threshold;
            if became_apex {
                self.is_apex = true;
                self.buffer = 1.0;
                self.apex_entered_at = Some(now);
                log::info!("Buffer reduced to 1.0 - apex predator at width {}", self.width);
            }

            CollisionOutcome::Ate {
                grew_by,
                became_apex,
                reached_win: self.width > config.win_size,
            }
        } else if !self.is_invulnerable(now) {
            self.health = self.health.saturating_sub(1);
            self.invulnerable_until = Some(now + config.invuln_time);
            log::debug!("Player hit by mobile {} ({} health left)", mobile.id, self.health);
            CollisionOutcome::Damaged {
                health: self.health,
                died: self.health == 0,
            }
        } else {
            CollisionOutcome::Ignored
        }
    }
}
