//! Session controller
//!
//! Runs sessions back to back until a quit signal arrives: each session is
//! built fresh, then ticked once per frame (input, simulate, render) until
//! its phase machine says it is over.

use crate::config::{ConfigError, GameConfig};
use crate::platform::{Clock, FrameLimiter, InputSource, InputState};
use crate::renderer::{DrawSurface, draw_frame};
use crate::sim::{Session, SessionEnd, StepOutcome, TickInput, tick};

/// Optional per-tick input override (the demo autopilot plugs in here)
pub type Pilot<'a> = Box<dyn FnMut(&Session) -> TickInput + 'a>;

/// Why the runner stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunExit {
    /// Quit event from the input source
    Quit,
    /// The tick or session budget ran out
    BudgetExhausted,
}

/// Totals for a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub exit: RunExit,
    pub sessions: u64,
    pub ticks: u64,
    pub wins: u64,
    pub game_overs: u64,
}

/// Owns the collaborators and drives the outer session loop
pub struct Runner<'a, S: DrawSurface, I: InputSource, C: Clock> {
    pub config: GameConfig,
    pub surface: S,
    pub input: I,
    pub clock: C,
    seed: u64,
    pilot: Option<Pilot<'a>>,
    max_ticks: Option<u64>,
    max_sessions: Option<u64>,
}

impl<'a, S: DrawSurface, I: InputSource, C: Clock> Runner<'a, S, I, C> {
    pub fn new(config: GameConfig, surface: S, input: I, clock: C, seed: u64) -> Self {
        Self {
            config,
            surface,
            input,
            clock,
            seed,
            pilot: None,
            max_ticks: None,
            max_sessions: None,
        }
    }

    /// Let something other than the keyboard decide each tick's input
    pub fn with_pilot(mut self, pilot: Pilot<'a>) -> Self {
        self.pilot = Some(pilot);
        self
    }

    /// Stop after this many ticks in total
    pub fn with_max_ticks(mut self, ticks: Option<u64>) -> Self {
        self.max_ticks = ticks;
        self
    }

    /// Stop after this many sessions have finished
    pub fn with_max_sessions(mut self, sessions: Option<u64>) -> Self {
        self.max_sessions = sessions;
        self
    }

    /// Run until quit (or a budget runs out). A bad config fails the first
    /// session and is returned as an error.
    pub fn run(&mut self) -> Result<RunSummary, ConfigError> {
        let mut summary = RunSummary {
            exit: RunExit::Quit,
            sessions: 0,
            ticks: 0,
            wins: 0,
            game_overs: 0,
        };
        let mut keys = InputState::new();
        let mut limiter = FrameLimiter::new(self.config.fps);

        loop {
            let seed = self.seed.wrapping_add(summary.sessions);
            let mut session = Session::new(self.config.clone(), seed, self.clock.now())?;
            keys.reset();

            let end = loop {
                keys.drain(&mut self.input);
                if keys.quit_requested() {
                    log::info!("Quit requested after {} ticks", summary.ticks);
                    summary.exit = RunExit::Quit;
                    return Ok(summary);
                }
                if self.max_ticks.is_some_and(|max| summary.ticks >= max) {
                    summary.exit = RunExit::BudgetExhausted;
                    return Ok(summary);
                }

                let mut input = keys.take_tick_input();
                if let Some(pilot) = self.pilot.as_mut() {
                    input = pilot(&session);
                }

                let now = self.clock.now();
                let outcome = tick(&mut session, &input, now);
                summary.ticks += 1;

                draw_frame(&session, &mut self.surface, now);
                limiter.wait(&mut self.clock);

                if let StepOutcome::Ended(end) = outcome {
                    break end;
                }
            };

            summary.sessions += 1;
            match end {
                SessionEnd::Restart => summary.wins += 1,
                SessionEnd::GameOver => summary.game_overs += 1,
            }
            log::info!(
                "Session {} (seed {}) ended ({:?}) at width {} after {:.1}s",
                summary.sessions,
                session.seed,
                end,
                session.player.width,
                self.clock.now() - session.started_at
            );

            if self.max_sessions.is_some_and(|max| summary.sessions >= max) {
                summary.exit = RunExit::BudgetExhausted;
                return Ok(summary);
            }
        }
    }
}
