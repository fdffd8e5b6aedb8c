//! Keyboard input
//!
//! The windowing layer delivers discrete key events; `InputState` folds them
//! into the held-key snapshot the simulation reads once per tick.

use crate::sim::{MoveIntent, TickInput};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Escape,
    /// Restart from the win screen
    Restart,
    Other,
}

impl Key {
    /// Map a key name (arrow keys or WASD) to a game key
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "up" | "w" => Key::Up,
            "down" | "s" => Key::Down,
            "left" | "a" => Key::Left,
            "right" | "d" => Key::Right,
            "escape" | "esc" => Key::Escape,
            "r" => Key::Restart,
            _ => Key::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// Window closed
    Quit,
}

/// Anything that can hand over the events queued since the last poll.
/// Must not block.
pub trait InputSource {
    fn poll(&mut self) -> Vec<InputEvent>;
}

/// Held movement keys plus one-shot commands
#[derive(Debug, Clone, Default)]
pub struct InputState {
    movement: MoveIntent,
    restart: bool,
    quit: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one event into the state. Pressing a direction releases its
    /// opposite.
    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::Quit => self.quit = true,
            InputEvent::KeyDown(key) => match key {
                Key::Up => {
                    self.movement.down = false;
                    self.movement.up = true;
                }
                Key::Down => {
                    self.movement.up = false;
                    self.movement.down = true;
                }
                Key::Left => {
                    self.movement.right = false;
                    self.movement.left = true;
                }
                Key::Right => {
                    self.movement.left = false;
                    self.movement.right = true;
                }
                Key::Restart => self.restart = true,
                Key::Escape | Key::Other => {}
            },
            InputEvent::KeyUp(key) => match key {
                Key::Up => self.movement.up = false,
                Key::Down => self.movement.down = false,
                Key::Left => self.movement.left = false,
                Key::Right => self.movement.right = false,
                Key::Escape => self.quit = true,
                Key::Restart | Key::Other => {}
            },
        }
    }

    /// Drain every pending event from a source
    pub fn drain<S: InputSource + ?Sized>(&mut self, source: &mut S) {
        for event in source.poll() {
            self.handle(event);
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    pub fn movement(&self) -> MoveIntent {
        self.movement
    }

    /// Snapshot for this tick. The restart command is consumed.
    pub fn take_tick_input(&mut self) -> TickInput {
        TickInput {
            movement: self.movement,
            restart: std::mem::take(&mut self.restart),
        }
    }

    /// Forget held keys (new session)
    pub fn reset(&mut self) {
        let quit = self.quit;
        *self = Self {
            quit,
            ..Self::default()
        };
    }
}
