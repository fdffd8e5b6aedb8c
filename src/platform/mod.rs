//! Platform abstraction layer
//!
//! Handles the collaborators the simulation never touches directly:
//! - Input events (key down/up, quit)
//! - Monotonic time and frame pacing

pub mod input;
pub mod time;

pub use input::{InputEvent, InputSource, InputState, Key};
pub use time::{Clock, FrameLimiter, ManualClock, SystemClock};
