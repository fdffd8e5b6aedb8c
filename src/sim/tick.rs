//! Fixed timestep simulation tick
//!
//! Advances a session by exactly one frame. Behavior is tied to the tick
//! rate, not wall-clock delta; `now` is only used for the display timers.

use super::player::{CollisionOutcome, MoveIntent};
use super::state::{Announcement, Session, SessionPhase};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Movement keys currently held
    pub movement: MoveIntent,
    /// Restart command (only honored while Won)
    pub restart: bool,
}

/// Why a session finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The game-over message timed out
    GameOver,
    /// The player dismissed the win screen
    Restart,
}

/// Result of advancing one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    Ended(SessionEnd),
}

/// Advance the session by one fixed timestep
pub fn tick(session: &mut Session, input: &TickInput, now: f64) -> StepOutcome {
    session.time_ticks += 1;
    let viewport = session.viewport();

    session.player.expire_invulnerability(now);

    let Session {
        config,
        rng,
        pool,
        camera,
        player,
        ..
    } = session;

    pool.advance_mobiles(rng, config);
    pool.cull(camera.offset, viewport);
    pool.top_up(camera.offset, player.is_apex, rng, config);

    camera.follow(player.center(), viewport, config.camera_slack);

    match session.phase {
        SessionPhase::Playing | SessionPhase::Won => {
            session.player.apply_input(input.movement, session.config.move_rate);
            session.player.tick(now);
            resolve_collisions(session, now);
        }
        SessionPhase::GameOver { .. } => {}
    }

    let outcome = match session.phase {
        SessionPhase::GameOver { since } if now - since > session.config.msg_display_time => {
            log::info!("Game over screen finished after {} ticks", session.time_ticks);
            StepOutcome::Ended(SessionEnd::GameOver)
        }
        SessionPhase::Won if input.restart => {
            log::info!("Restart requested from win screen");
            StepOutcome::Ended(SessionEnd::Restart)
        }
        _ => StepOutcome::Continue,
    };

    if session
        .apex_announcement
        .is_some_and(|banner| banner.is_expired(now))
    {
        session.apex_announcement = None;
    }

    outcome
}

/// Check the player against every overlapping mobile.
///
/// Mobiles are visited newest first. The player's box is fixed for the pass,
/// but each meal grows the player before the next comparison. Eaten mobiles
/// are compacted out of the pool afterwards.
fn resolve_collisions(session: &mut Session, now: f64) {
    let player_rect = session.player.hit_rect();
    let won = session.phase == SessionPhase::Won;
    let mut eaten = vec![false; session.pool.mobiles.len()];

    for (index, mobile) in session.pool.mobiles.iter().enumerate().rev() {
        if !player_rect.intersects(&mobile.hit_rect()) {
            continue;
        }
        // Once won, the player can no longer be hurt
        if won && !session.player.can_eat(mobile) {
            continue;
        }

        match session
            .player
            .resolve_collision(mobile, now, &session.config)
        {
            CollisionOutcome::Ate {
                grew_by,
                became_apex,
                reached_win,
            } => {
                log::debug!("Ate mobile {}, grew by {}", mobile.id, grew_by);
                eaten[index] = true;
                if became_apex {
                    session.apex_announcement =
                        Some(Announcement::new(now, session.config.msg_display_time));
                }
                if reached_win && session.phase.is_playing() {
                    log::info!("Player won at width {}", session.player.width);
                    session.phase = SessionPhase::Won;
                }
            }
            CollisionOutcome::Damaged { died: true, .. } => {
                if session.phase.is_playing() {
                    log::info!("Game over after {} ticks", session.time_ticks);
                    session.phase = SessionPhase::GameOver { since: now };
                }
            }
            CollisionOutcome::Damaged { .. } | CollisionOutcome::Ignored => {}
        }
    }

    if eaten.iter().any(|&e| e) {
        let mut flags = eaten.into_iter();
        session
            .pool
            .mobiles
            .retain(|_| !flags.next().unwrap_or(false));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Facing;
    use crate::config::GameConfig;
    use crate::sim::pool::MobileEntity;
    use glam::IVec2;

    fn session() -> Session {
        Session::new(GameConfig::default(), 12345, 0.0).unwrap()
    }

    /// A stationary, non-bouncing mobile parked on top of the player
    fn parked_mobile(session: &Session, id: u32, width: i32, height: i32) -> MobileEntity {
        MobileEntity {
            id,
            position: session.player.position,
            velocity: IVec2::ZERO,
            width,
            height,
            bounce_phase: 0,
            bounce_rate: 10,
            bounce_height: 0,
            facing: Facing::Left,
        }
    }

    fn quiet_config() -> GameConfig {
        GameConfig {
            dir_change_freq: 0,
            ..Default::default()
        }
    }

    /// Fill the pool, then drop anything that happens to touch the player
    fn settle(session: &mut Session) {
        tick(session, &TickInput::default(), 0.0);
        let player = session.player.hit_rect();
        session
            .pool
            .mobiles
            .retain(|m| !m.hit_rect().intersects(&player));
    }

    #[test]
    fn test_first_tick_fills_pool() {
        let mut session = session();
        assert_eq!(tick(&mut session, &TickInput::default(), 0.0), StepOutcome::Continue);
        assert_eq!(session.pool.mobiles.len(), session.config.num_mobiles);
        assert_eq!(session.pool.decorations.len(), session.config.num_decorations);
        assert_eq!(session.time_ticks, 1);
    }

    #[test]
    fn test_eating_removes_mobile_and_grows_player() {
        let mut session = Session::new(quiet_config(), 5, 0.0).unwrap();
        settle(&mut session);
        let prey = parked_mobile(&session, 9001, 20, 34);
        session.pool.mobiles.push(prey);

        tick(&mut session, &TickInput::default(), 0.1);
        assert!(session.pool.mobiles.iter().all(|m| m.id != 9001));
        assert_eq!(session.player.width, 25 + 4);
        assert_eq!(session.player.health, 3);

        // Pool is topped back up on the next tick
        tick(&mut session, &TickInput::default(), 0.2);
        assert_eq!(session.pool.mobiles.len(), session.config.num_mobiles);
    }

    #[test]
    fn test_meals_resolve_newest_first_with_growing_player() {
        let mut session = Session::new(quiet_config(), 5, 0.0).unwrap();
        settle(&mut session);
        // 25x14 alone could not eat the 20x50 (1000 > 350 * 2.5), but the
        // newer 20x34 is eaten first and the grown player then can
        let big = parked_mobile(&session, 9101, 20, 50);
        let small = parked_mobile(&session, 9102, 20, 34);
        session.pool.mobiles.push(big);
        session.pool.mobiles.push(small);

        tick(&mut session, &TickInput::default(), 0.1);
        assert_eq!(session.player.health, 3);
        assert_eq!(session.player.invulnerable_until, None);
        assert_eq!(session.player.width, 33);
        assert!(
            session
                .pool
                .mobiles
                .iter()
                .all(|m| m.id != 9101 && m.id != 9102)
        );
    }

    #[test]
    fn test_damage_opens_invulnerability_window() {
        let mut session = Session::new(quiet_config(), 6, 0.0).unwrap();
        settle(&mut session);
        let predator = parked_mobile(&session, 9002, 40, 68);
        session.pool.mobiles.push(predator);

        tick(&mut session, &TickInput::default(), 1.0);
        assert_eq!(session.player.health, 2);
        assert_eq!(session.player.invulnerable_until, Some(3.0));
        assert!(session.pool.mobiles.iter().any(|m| m.id == 9002));

        // Still overlapping but protected
        tick(&mut session, &TickInput::default(), 2.0);
        assert_eq!(session.player.health, 2);

        // Window expired: hurt again
        tick(&mut session, &TickInput::default(), 3.5);
        assert_eq!(session.player.health, 1);
    }

    #[test]
    fn test_game_over_times_out() {
        let mut session = Session::new(quiet_config(), 7, 0.0).unwrap();
        settle(&mut session);
        session.player.health = 1;
        let predator = parked_mobile(&session, 9003, 40, 68);
        session.pool.mobiles.push(predator);

        tick(&mut session, &TickInput::default(), 10.0);
        assert_eq!(session.phase, SessionPhase::GameOver { since: 10.0 });
        assert_eq!(session.player.health, 0);

        // Player is frozen while the message shows
        let pos = session.player.position;
        let held = TickInput {
            movement: MoveIntent {
                left: true,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(tick(&mut session, &held, 15.0), StepOutcome::Continue);
        assert_eq!(session.player.position, pos);
        assert_eq!(session.player.health, 0);

        assert_eq!(
            tick(&mut session, &TickInput::default(), 16.5),
            StepOutcome::Ended(SessionEnd::GameOver)
        );
    }

    #[test]
    fn test_win_waits_for_restart() {
        let mut session = Session::new(quiet_config(), 8, 0.0).unwrap();
        settle(&mut session);
        session.player.width = 299;
        session.player.height = (299.0 * session.config.player_aspect_ratio) as i32;
        session.player.is_apex = true;
        session.player.buffer = 1.0;
        let prey = parked_mobile(&session, 9004, 10, 17);
        session.pool.mobiles.push(prey);

        assert_eq!(tick(&mut session, &TickInput::default(), 1.0), StepOutcome::Continue);
        assert_eq!(session.phase, SessionPhase::Won);

        for i in 0..30 {
            let now = 1.0 + i as f64;
            assert_eq!(tick(&mut session, &TickInput::default(), now), StepOutcome::Continue);
            assert_eq!(session.phase, SessionPhase::Won);
        }

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        assert_eq!(
            tick(&mut session, &restart, 40.0),
            StepOutcome::Ended(SessionEnd::Restart)
        );
    }

    #[test]
    fn test_restart_ignored_while_playing() {
        let mut session = session();
        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        assert_eq!(tick(&mut session, &restart, 0.0), StepOutcome::Continue);
        assert!(session.phase.is_playing());
    }

    #[test]
    fn test_won_player_cannot_be_hurt() {
        let mut session = Session::new(quiet_config(), 9, 0.0).unwrap();
        settle(&mut session);
        session.phase = SessionPhase::Won;
        let predator = parked_mobile(&session, 9005, 40, 68);
        session.pool.mobiles.push(predator);

        tick(&mut session, &TickInput::default(), 1.0);
        assert_eq!(session.player.health, 3);
        assert_eq!(session.phase, SessionPhase::Won);
    }

    #[test]
    fn test_apex_announcement_starts_and_expires() {
        let mut session = Session::new(quiet_config(), 10, 0.0).unwrap();
        settle(&mut session);
        session.player.width = 148;
        session.player.height = (148.0 * session.config.player_aspect_ratio) as i32;
        let prey = parked_mobile(&session, 9006, 10, 17);
        session.pool.mobiles.push(prey);

        tick(&mut session, &TickInput::default(), 2.0);
        assert!(session.player.is_apex);
        assert_eq!(session.apex_announcement, Some(Announcement::new(2.0, 6.0)));

        tick(&mut session, &TickInput::default(), 5.0);
        assert!(session.apex_announcement.is_some());
        tick(&mut session, &TickInput::default(), 8.5);
        assert!(session.apex_announcement.is_none());
        assert!(session.player.is_apex);
    }

    #[test]
    fn test_camera_follows_player() {
        let config = GameConfig {
            num_mobiles: 0,
            ..quiet_config()
        };
        let mut session = Session::new(config, 11, 0.0).unwrap();
        let right = TickInput {
            movement: MoveIntent {
                right: true,
                ..Default::default()
            },
            ..Default::default()
        };
        for _ in 0..40 {
            tick(&mut session, &right, 0.0);
        }
        let screen = session.camera.world_to_screen(session.player.center());
        assert!(session.camera.offset.x > 0);
        assert!((screen.x - 320).abs() <= session.config.camera_slack + session.config.move_rate);
    }

    #[test]
    fn test_determinism() {
        let mut a = Session::new(GameConfig::default(), 99999, 0.0).unwrap();
        let mut b = Session::new(GameConfig::default(), 99999, 0.0).unwrap();
        let inputs = [
            TickInput {
                movement: MoveIntent {
                    up: true,
                    ..Default::default()
                },
                ..Default::default()
            },
            TickInput::default(),
            TickInput {
                movement: MoveIntent {
                    left: true,
                    down: true,
                    ..Default::default()
                },
                ..Default::default()
            },
        ];
        for step in 0..90 {
            let input = &inputs[step % inputs.len()];
            let now = step as f64 / 30.0;
            tick(&mut a, input, now);
            tick(&mut b, input, now);
        }
        assert_eq!(a.pool.mobiles, b.pool.mobiles);
        assert_eq!(a.player, b.player);
        assert_eq!(a.camera, b.camera);
    }
}
