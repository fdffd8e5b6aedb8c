//! World object pool
//!
//! Decorations and mobiles live only inside the active area around the
//! camera. Each tick the pool culls whatever drifted out and tops the
//! population back up with fresh entities spawned just off screen.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::spawn::{percent_chance, random_off_camera_pos, random_velocity};
use crate::config::GameConfig;
use crate::consts::MIN_MOBILE_WIDTH;
use crate::{Facing, bounce_amount};

/// A wandering, bouncing creature the player can eat or be hurt by
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MobileEntity {
    pub id: u32,
    pub position: IVec2,
    /// Pixels per tick
    pub velocity: IVec2,
    pub width: i32,
    pub height: i32,
    /// Always within `0..=bounce_rate`
    pub bounce_phase: i32,
    pub bounce_rate: i32,
    pub bounce_height: i32,
    pub facing: Facing,
}

impl MobileEntity {
    pub fn area(&self) -> i64 {
        self.width as i64 * self.height as i64
    }

    /// Footprint without bounce, used for active-area culling
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.position, self.width, self.height)
    }

    /// Where the sprite is actually drawn (lifted by the bounce)
    pub fn hit_rect(&self) -> Rect {
        let lift = bounce_amount(self.bounce_phase, self.bounce_rate, self.bounce_height);
        self.rect().translated(IVec2::new(0, -lift))
    }

    /// Move, bounce, and occasionally pick a new heading
    fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R, config: &GameConfig) {
        self.position += self.velocity;
        self.bounce_phase += 1;
        if self.bounce_phase > self.bounce_rate {
            self.bounce_phase = 0;
        }

        if percent_chance(rng, config.dir_change_freq) {
            self.velocity = IVec2::new(
                random_velocity(rng, config.mobile_min_speed, config.mobile_max_speed),
                random_velocity(rng, config.mobile_min_speed, config.mobile_max_speed),
            );
            self.facing = if self.velocity.x > 0 { Facing::Right } else { Facing::Left };
        }
    }
}

/// Static background scenery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecorationEntity {
    pub position: IVec2,
    pub width: i32,
    pub height: i32,
    /// Which decoration sprite to draw
    pub variant: usize,
}

impl DecorationEntity {
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.position, self.width, self.height)
    }
}

/// Rectangle around the camera in which entities are kept alive
/// (the viewport grown by one viewport on every side)
pub fn active_area(camera: IVec2, viewport: IVec2) -> Rect {
    Rect::new(
        camera.x - viewport.x,
        camera.y - viewport.y,
        viewport.x * 3,
        viewport.y * 3,
    )
}

/// All non-player entities of a session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldPool {
    pub decorations: Vec<DecorationEntity>,
    pub mobiles: Vec<MobileEntity>,
    next_id: u32,
}

impl WorldPool {
    /// Fresh pool with a few decorations already scattered on screen
    pub fn new<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Self {
        let mut pool = Self {
            decorations: Vec::with_capacity(config.num_decorations),
            mobiles: Vec::with_capacity(config.num_mobiles),
            next_id: 1,
        };
        for _ in 0..config.initial_decorations {
            let position = IVec2::new(
                rng.random_range(0..=config.win_width),
                rng.random_range(0..=config.win_height),
            );
            let variant = rng.random_range(0..config.decoration_variants);
            pool.decorations.push(DecorationEntity {
                position,
                width: config.decoration_width,
                height: config.decoration_height,
                variant,
            });
        }
        pool
    }

    /// Advance every mobile by one tick
    pub fn advance_mobiles<R: Rng + ?Sized>(&mut self, rng: &mut R, config: &GameConfig) {
        for mobile in &mut self.mobiles {
            mobile.advance(rng, config);
        }
    }

    /// Drop everything outside the active area. Returns how many were removed.
    pub fn cull(&mut self, camera: IVec2, viewport: IVec2) -> usize {
        let area = active_area(camera, viewport);
        let before = self.decorations.len() + self.mobiles.len();
        self.decorations.retain(|d| area.intersects(&d.rect()));
        self.mobiles.retain(|m| area.intersects(&m.rect()));
        before - self.decorations.len() - self.mobiles.len()
    }

    /// Spawn off-screen entities until both populations reach their targets.
    /// Returns how many were created.
    pub fn top_up<R: Rng + ?Sized>(
        &mut self,
        camera: IVec2,
        apex: bool,
        rng: &mut R,
        config: &GameConfig,
    ) -> usize {
        let mut spawned = 0;
        while self.decorations.len() < config.num_decorations {
            let decoration = self.spawn_decoration(camera, rng, config);
            self.decorations.push(decoration);
            spawned += 1;
        }
        while self.mobiles.len() < config.num_mobiles {
            let mobile = self.spawn_mobile(camera, apex, rng, config);
            self.mobiles.push(mobile);
            spawned += 1;
        }
        spawned
    }

    fn spawn_decoration<R: Rng + ?Sized>(
        &self,
        camera: IVec2,
        rng: &mut R,
        config: &GameConfig,
    ) -> DecorationEntity {
        let variant = rng.random_range(0..config.decoration_variants);
        let (width, height) = (config.decoration_width, config.decoration_height);
        let position = random_off_camera_pos(rng, camera, viewport(config), width, height);
        DecorationEntity {
            position,
            width,
            height,
            variant,
        }
    }

    /// Create a mobile just off screen. Apex sessions get bigger, chunkier prey.
    pub fn spawn_mobile<R: Rng + ?Sized>(
        &mut self,
        camera: IVec2,
        apex: bool,
        rng: &mut R,
        config: &GameConfig,
    ) -> MobileEntity {
        let (general_size, multiplier) = if apex {
            (rng.random_range(15..=40), rng.random_range(2..=4))
        } else {
            (rng.random_range(MIN_MOBILE_WIDTH..=25), rng.random_range(1..=3))
        };
        let width = (general_size + rng.random_range(0..=10)) * multiplier;
        let height = (width as f64 * config.mobile_aspect_ratio) as i32;
        let position = random_off_camera_pos(rng, camera, viewport(config), width, height);
        let velocity = IVec2::new(
            random_velocity(rng, config.mobile_min_speed, config.mobile_max_speed),
            random_velocity(rng, config.mobile_min_speed, config.mobile_max_speed),
        );
        let facing = if velocity.x < 0 { Facing::Left } else { Facing::Right };

        let id = self.next_id;
        self.next_id += 1;

        MobileEntity {
            id,
            position,
            velocity,
            width,
            height,
            bounce_phase: 0,
            bounce_rate: rng.random_range(10..=18),
            bounce_height: rng.random_range(10..=50),
            facing,
        }
    }
}

fn viewport(config: &GameConfig) -> IVec2 {
    IVec2::new(config.win_width, config.win_height)
}
