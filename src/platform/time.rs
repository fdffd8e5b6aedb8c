//! Monotonic time and frame pacing

use std::time::{Duration, Instant};

/// Monotonic clock in seconds
pub trait Clock {
    fn now(&self) -> f64;
    fn sleep(&mut self, secs: f64);
}

/// Wall clock backed by `Instant`
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }

    fn sleep(&mut self, secs: f64) {
        if secs > 0.0 {
            std::thread::sleep(Duration::from_secs_f64(secs));
        }
    }
}

/// Clock that only moves when told to; sleeping advances it instantly
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: f64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, secs: f64) {
        self.now += secs;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now
    }

    fn sleep(&mut self, secs: f64) {
        if secs > 0.0 {
            self.now += secs;
        }
    }
}

/// Sleep-based frame limiter, like a game clock's `tick(fps)`
#[derive(Debug, Clone)]
pub struct FrameLimiter {
    frame_secs: f64,
    last: Option<f64>,
}

impl FrameLimiter {
    pub fn new(fps: u32) -> Self {
        Self {
            frame_secs: 1.0 / fps.max(1) as f64,
            last: None,
        }
    }

    /// Sleep until a full frame has passed since the previous call.
    /// Returns the seconds elapsed between the two calls.
    pub fn wait<C: Clock + ?Sized>(&mut self, clock: &mut C) -> f64 {
        let now = clock.now();
        let Some(last) = self.last else {
            self.last = Some(now);
            return 0.0;
        };
        let elapsed = now - last;
        if elapsed < self.frame_secs {
            clock.sleep(self.frame_secs - elapsed);
        }
        let after = clock.now();
        self.last = Some(after);
        after - last
    }
}
