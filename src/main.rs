//! Orca Chowdown entry point
//!
//! Native builds run headless: the autopilot plays, frames are summarized in
//! the log instead of drawn to a window.

use std::io::BufRead;
use std::path::PathBuf;
use std::sync::mpsc;

use anyhow::Context;
use clap::Parser;
use glam::IVec2;

use orca_chowdown::GameConfig;
use orca_chowdown::app::{Pilot, RunSummary, Runner};
use orca_chowdown::autopilot::Autopilot;
use orca_chowdown::platform::{Clock, InputEvent, InputSource, Key, ManualClock, SystemClock};
use orca_chowdown::renderer::{Color, DrawSurface, RectStyle, Sprite};
use orca_chowdown::sim::{Rect, Session};

#[derive(Parser, Debug)]
#[command(
    name = "orca-chowdown",
    about = "Headless Orca Chowdown runner",
    after_help = "Type `esc` or `quit` on stdin to stop cleanly."
)]
struct Cli {
    /// RNG seed for the first session (later sessions add their index)
    #[arg(long)]
    seed: Option<u64>,
    /// Stop after this many ticks
    #[arg(long)]
    max_ticks: Option<u64>,
    /// Stop after this many finished sessions
    #[arg(long)]
    sessions: Option<u64>,
    /// JSON tuning overrides
    #[arg(long)]
    config: Option<PathBuf>,
    /// Advance a simulated clock instead of sleeping between frames
    #[arg(long)]
    fast: bool,
}

/// Draw surface that only counts what it is asked to draw
#[derive(Debug, Default)]
struct LogSurface {
    frame: u64,
    sprites: usize,
    texts: Vec<String>,
}

impl DrawSurface for LogSurface {
    fn fill(&mut self, _color: Color) {
        self.sprites = 0;
        self.texts.clear();
    }

    fn draw_rect(&mut self, _rect: Rect, _color: Color, _style: RectStyle) {}

    fn draw_sprite(&mut self, _sprite: Sprite, _rect: Rect) {
        self.sprites += 1;
    }

    fn draw_text(&mut self, text: &str, _rect: Rect, alpha: u8) {
        if alpha > 0 {
            self.texts.push(text.to_string());
        }
    }

    /// Rough metrics for a 32px sans font
    fn text_size(&self, text: &str) -> IVec2 {
        IVec2::new(text.chars().count() as i32 * 16, 32)
    }

    fn present(&mut self) {
        self.frame += 1;
        log::trace!("frame {}: {} sprites", self.frame, self.sprites);
        if !self.texts.is_empty() && self.frame % 30 == 0 {
            log::debug!("frame {}: {}", self.frame, self.texts.join(" | "));
        }
    }
}

/// Key names typed on stdin, one per line. `esc` or `quit` stops the run.
struct StdinInput {
    lines: mpsc::Receiver<String>,
}

impl StdinInput {
    fn spawn() -> Self {
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            for line in std::io::stdin().lock().lines().map_while(Result::ok) {
                if tx.send(line).is_err() {
                    break;
                }
            }
        });
        Self { lines: rx }
    }
}

impl InputSource for StdinInput {
    fn poll(&mut self) -> Vec<InputEvent> {
        self.lines.try_iter().flat_map(|line| line_events(&line)).collect()
    }
}

/// A typed line is a full key press
fn line_events(line: &str) -> Vec<InputEvent> {
    match line.trim() {
        "" => Vec::new(),
        "quit" => vec![InputEvent::Quit],
        name => {
            let key = Key::from_name(name);
            vec![InputEvent::KeyDown(key), InputEvent::KeyUp(key)]
        }
    }
}

fn run<C: Clock>(cli: &Cli, config: GameConfig, clock: C, seed: u64) -> anyhow::Result<RunSummary> {
    let mut autopilot = Autopilot::new();
    let pilot: Pilot = Box::new(move |session: &Session| autopilot.steer(session));
    let mut runner = Runner::new(config, LogSurface::default(), StdinInput::spawn(), clock, seed)
        .with_pilot(pilot)
        .with_max_ticks(cli.max_ticks)
        .with_max_sessions(cli.sessions);
    runner.run().context("invalid game configuration")
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let seed = cli.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });

    log::info!("Orca Chowdown (headless) starting with seed {}", seed);

    let summary = if cli.fast {
        run(&cli, config, ManualClock::new(), seed)?
    } else {
        run(&cli, config, SystemClock::new(), seed)?
    };

    log::info!(
        "Stopped ({:?}): {} ticks, {} sessions, {} wins, {} game overs",
        summary.exit,
        summary.ticks,
        summary.sessions,
        summary.wins,
        summary.game_overs
    );
    Ok(())
}
