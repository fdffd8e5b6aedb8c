//! Idle/demo mode - AI plays the game
//!
//! Used by the headless runner. Flees the nearest dangerous mobile when one
//! gets close, otherwise hunts the nearest meal, and dismisses the win
//! screen after a short victory lap.

use glam::IVec2;

use crate::sim::{MobileEntity, MoveIntent, Session, SessionPhase, TickInput};

/// How close (center to center) a threat must be before the autopilot runs
pub const DANGER_RADIUS: i32 = 160;
/// Ticks to keep swimming around after winning before restarting
pub const VICTORY_LAP_TICKS: u64 = 90;

/// Tracks the autopilot's own timing across ticks
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    won_at_tick: Option<u64>,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose this tick's input
    pub fn steer(&mut self, session: &Session) -> TickInput {
        let restart = match session.phase {
            SessionPhase::Won => {
                let won_at = *self.won_at_tick.get_or_insert(session.time_ticks);
                session.time_ticks.saturating_sub(won_at) >= VICTORY_LAP_TICKS
            }
            _ => {
                self.won_at_tick = None;
                false
            }
        };

        TickInput {
            movement: choose_movement(session),
            restart,
        }
    }
}

/// Direction to press this tick
pub fn choose_movement(session: &Session) -> MoveIntent {
    let player = &session.player;
    let center = player.center();
    let distance = |m: &MobileEntity| (m.rect().center() - center).abs().element_sum();

    let threat = session
        .pool
        .mobiles
        .iter()
        .filter(|m| !player.can_eat(m))
        .min_by_key(|m| distance(m))
        .filter(|m| distance(m) < DANGER_RADIUS);

    if let Some(threat) = threat {
        return toward(center - threat.rect().center());
    }

    session
        .pool
        .mobiles
        .iter()
        .filter(|m| player.can_eat(m))
        .min_by_key(|m| distance(m))
        .map(|m| toward(m.rect().center() - center))
        .unwrap_or_default()
}

/// Keys that move along `delta`, with a small dead zone per axis
fn toward(delta: IVec2) -> MoveIntent {
    const DEAD_ZONE: i32 = 4;
    MoveIntent {
        left: delta.x < -DEAD_ZONE,
        right: delta.x > DEAD_ZONE,
        up: delta.y < -DEAD_ZONE,
        down: delta.y > DEAD_ZONE,
    }
}
