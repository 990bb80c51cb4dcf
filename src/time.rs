//! Frame clock for driving a [`Universe`](crate::Universe).
//!
//! The simulation takes `now` in seconds on every step. `FrameClock` produces
//! that value, either from the wall clock or, with a fixed delta, from a
//! purely simulated timeline (headless runs, tests and benchmarks).
//!
//! ```ignore
//! let mut clock = FrameClock::new().with_fixed_delta(1.0 / 60.0);
//! loop {
//!     let now = clock.tick();
//!     universe.step(now);
//! }
//! ```

use std::time::{Duration, Instant};

/// Monotonic per-frame timing.
#[derive(Debug)]
pub struct FrameClock {
    last_tick: Instant,
    /// Simulated seconds since start, after scaling and pauses.
    elapsed: f64,
    delta: f32,
    frame: u64,
    fps: f32,
    fps_frames: u64,
    fps_window: Duration,
    fps_window_start: Instant,
    paused: bool,
    /// Advance by this much per tick instead of reading the wall clock.
    fixed_delta: Option<f32>,
    time_scale: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_tick: now,
            elapsed: 0.0,
            delta: 0.0,
            frame: 0,
            fps: 0.0,
            fps_frames: 0,
            fps_window: Duration::from_millis(500),
            fps_window_start: now,
            paused: false,
            fixed_delta: None,
            time_scale: 1.0,
        }
    }

    /// Step by exactly `delta` seconds per tick, ignoring the wall clock.
    pub fn with_fixed_delta(mut self, delta: f32) -> Self {
        self.set_fixed_delta(Some(delta));
        self
    }

    pub fn with_time_scale(mut self, scale: f32) -> Self {
        self.set_time_scale(scale);
        self
    }

    /// Start a new frame and return the simulation time in seconds.
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();
        let raw = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;

        self.delta = if self.paused {
            0.0
        } else {
            self.fixed_delta.unwrap_or(raw) * self.time_scale
        };
        self.elapsed += self.delta as f64;
        self.frame += 1;

        self.fps_frames += 1;
        let window = now.duration_since(self.fps_window_start);
        if window >= self.fps_window {
            self.fps = self.fps_frames as f32 / window.as_secs_f32();
            self.fps_frames = 0;
            self.fps_window_start = now;
        }

        self.elapsed
    }

    /// Simulation seconds at the last tick.
    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Length of the last frame in simulation seconds.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Ticks since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Wall-clock ticks per second, refreshed twice a second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Freeze simulation time. Ticks still count frames.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// `None` returns to wall-clock timing.
    pub fn set_fixed_delta(&mut self, delta: Option<f32>) {
        self.fixed_delta = delta.filter(|d| *d >= 0.0);
    }

    /// Negative scales clamp to 0.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_clock_new() {
        let clock = FrameClock::new();
        assert_eq!(clock.frame(), 0);
        assert_eq!(clock.elapsed(), 0.0);
        assert!(!clock.is_paused());
    }

    #[test]
    fn test_fixed_delta_is_deterministic() {
        let mut clock = FrameClock::new().with_fixed_delta(0.25);
        thread::sleep(Duration::from_millis(20));
        for _ in 0..4 {
            clock.tick();
        }
        assert_eq!(clock.elapsed(), 1.0);
        assert_eq!(clock.delta(), 0.25);
        assert_eq!(clock.frame(), 4);
    }

    #[test]
    fn test_wall_clock_advances() {
        let mut clock = FrameClock::new();
        thread::sleep(Duration::from_millis(10));
        let now = clock.tick();
        assert!(now > 0.0);
        assert!(clock.delta() > 0.0);
    }

    #[test]
    fn test_pause_freezes_time() {
        let mut clock = FrameClock::new().with_fixed_delta(0.1);
        clock.tick();
        clock.pause();
        let frozen = clock.tick();
        assert_eq!(clock.delta(), 0.0);
        assert_eq!(frozen, clock.elapsed());
        assert_eq!(clock.frame(), 2);

        clock.toggle_pause();
        let resumed = clock.tick();
        assert!(resumed > frozen);
    }

    #[test]
    fn test_time_scale() {
        let mut clock = FrameClock::new().with_fixed_delta(0.5).with_time_scale(2.0);
        assert_eq!(clock.tick(), 1.0);

        clock.set_time_scale(-1.0);
        assert_eq!(clock.time_scale(), 0.0);
        assert_eq!(clock.tick(), 1.0);
    }
}
