//! Frame pacing

use std::thread;
use std::time::{Duration, Instant};

/// Paces the loop and reports time
pub trait Clock {
    /// Block until the next tick boundary at `target_fps`.
    /// Returns milliseconds elapsed since the previous tick.
    fn tick(&mut self, target_fps: u32) -> u64;

    /// Milliseconds since the clock was created
    fn now(&self) -> u64;
}

/// Wall clock that sleeps off the rest of each frame
#[derive(Debug)]
pub struct SystemClock {
    start: Instant,
    last_tick: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_tick: now,
        }
    }
}

impl Clock for SystemClock {
    fn tick(&mut self, target_fps: u32) -> u64 {
        let frame = Duration::from_secs_f64(1.0 / target_fps.max(1) as f64);
        let deadline = self.last_tick + frame;
        let now = Instant::now();
        if deadline > now {
            thread::sleep(deadline - now);
        }

        let now = Instant::now();
        let elapsed = now.duration_since(self.last_tick);
        self.last_tick = now;
        elapsed.as_millis() as u64
    }

    fn now(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Simulated clock: every tick advances exactly one frame, no sleeping.
/// Used for headless runs and tests.
#[derive(Debug, Clone, Default)]
pub struct SteppedClock {
    /// Elapsed time in microseconds, so 60 fps does not drift
    now_us: u64,
}

impl SteppedClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Jump forward without ticking
    pub fn advance(&mut self, ms: u64) {
        self.now_us += ms * 1000;
    }
}

impl Clock for SteppedClock {
    fn tick(&mut self, target_fps: u32) -> u64 {
        let before = self.now();
        self.now_us += 1_000_000 / target_fps.max(1) as u64;
        self.now() - before
    }

    fn now(&self) -> u64 {
        self.now_us / 1000
    }
}
