//! Frame clock for driving scene animation.
//!
//! The clock produces the `(elapsed, delta)` pair handed to every
//! [`Animated::advance`](crate::scene::Animated::advance) call. Elapsed time is
//! kept in `f64` so that long-running pages keep sub-millisecond precision.
//!
//! Two ways to drive it:
//!
//! ```ignore
//! use folio_fx::time::Time;
//!
//! // Real time, once per redraw:
//! let mut time = Time::new();
//! let (elapsed, delta) = time.update();
//!
//! // Simulated time, e.g. in tests:
//! let mut time = Time::new();
//! time.tick(1.0 / 60.0);
//! ```

use std::time::{Duration, Instant};

/// Frame timing for the render loop.
///
/// Tracks elapsed time, delta time, frame count and a periodically refreshed
/// FPS estimate. Supports pausing, a time scale and a fixed delta.
#[derive(Debug)]
pub struct Time {
    /// Instant of the last real-time update.
    last_frame: Instant,
    /// Scaled elapsed time in seconds.
    elapsed_secs: f64,
    /// Scaled time since the previous frame in seconds.
    delta_secs: f32,
    frame_count: u64,
    fps: f32,
    fps_frame_count: u64,
    fps_window: f32,
    fps_update_interval: f32,
    paused: bool,
    /// Fixed delta for deterministic stepping (optional).
    fixed_delta: Option<f32>,
    time_scale: f32,
}

impl Time {
    /// Create a clock starting at zero.
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_window: 0.0,
            fps_update_interval: 0.5,
            paused: false,
            fixed_delta: None,
            time_scale: 1.0,
        }
    }

    /// Advance by the wall-clock time since the previous update.
    ///
    /// Returns `(elapsed, delta)`.
    pub fn update(&mut self) -> (f64, f32) {
        let now = Instant::now();
        let raw_delta = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.step(raw_delta)
    }

    /// Advance by an explicit raw delta, ignoring the wall clock.
    ///
    /// Pause, time scale and fixed delta still apply. Returns `(elapsed, delta)`.
    pub fn tick(&mut self, raw_delta: f32) -> (f64, f32) {
        self.last_frame = Instant::now();
        self.step(raw_delta)
    }

    fn step(&mut self, raw_delta: f32) -> (f64, f32) {
        if self.paused {
            self.delta_secs = 0.0;
            return (self.elapsed_secs, self.delta_secs);
        }

        let raw_delta = raw_delta.max(0.0);
        self.delta_secs = self.fixed_delta.unwrap_or(raw_delta) * self.time_scale;
        self.elapsed_secs += self.delta_secs as f64;
        self.frame_count += 1;

        self.fps_window += raw_delta;
        if self.fps_window >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / self.fps_window;
            self.fps_frame_count = self.frame_count;
            self.fps_window = 0.0;
        }

        (self.elapsed_secs, self.delta_secs)
    }

    /// Total elapsed time in seconds.
    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.elapsed_secs
    }

    /// Time since last frame in seconds.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Frames advanced so far.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Frames per second, refreshed every half second.
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

    /// Stop time. While paused `delta()` is 0 and `elapsed()` holds.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume after [`pause`](Self::pause). The paused interval is skipped.
    pub fn resume(&mut self) {
        if self.paused {
            self.last_frame = Instant::now();
            self.paused = false;
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Use a fixed delta instead of measured frame time. `None` restores
    /// measured timing.
    pub fn set_fixed_delta(&mut self, delta: Option<f32>) {
        self.fixed_delta = delta;
    }

    /// Set the time scale multiplier. Negative values clamp to 0.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    /// Reset to the initial state.
    pub fn reset(&mut self) {
        *self = Self {
            fixed_delta: self.fixed_delta,
            time_scale: self.time_scale,
            ..Self::new()
        };
    }

    /// Elapsed time as a Duration.
    #[inline]
    pub fn elapsed_duration(&self) -> Duration {
        Duration::from_secs_f64(self.elapsed_secs)
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_time_new() {
        let time = Time::new();
        assert_eq!(time.frame(), 0);
        assert_eq!(time.elapsed(), 0.0);
        assert!(!time.is_paused());
        assert_eq!(time.time_scale(), 1.0);
    }

    #[test]
    fn test_time_update() {
        let mut time = Time::new();
        thread::sleep(Duration::from_millis(10));
        let (elapsed, delta) = time.update();

        assert!(elapsed > 0.0);
        assert!(delta > 0.0);
        assert_eq!(time.frame(), 1);
    }

    #[test]
    fn test_tick_accumulates() {
        let mut time = Time::new();
        for _ in 0..60 {
            time.tick(1.0 / 60.0);
        }
        assert!((time.elapsed() - 1.0).abs() < 1e-4);
        assert_eq!(time.frame(), 60);
    }

    #[test]
    fn test_time_pause() {
        let mut time = Time::new();
        time.tick(0.1);

        time.pause();
        assert!(time.is_paused());

        let elapsed_before = time.elapsed();
        time.tick(0.5);

        assert_eq!(time.elapsed(), elapsed_before);
        assert_eq!(time.delta(), 0.0);

        time.resume();
        time.tick(0.1);
        assert!((time.elapsed() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_time_scale() {
        let mut time = Time::new();
        time.set_time_scale(2.0);
        time.tick(0.25);
        assert!((time.elapsed() - 0.5).abs() < 1e-6);

        // Negative scale should clamp to 0
        time.set_time_scale(-1.0);
        assert_eq!(time.time_scale(), 0.0);
    }

    #[test]
    fn test_fixed_delta() {
        let mut time = Time::new();
        time.set_fixed_delta(Some(1.0 / 60.0));

        thread::sleep(Duration::from_millis(20));
        time.update();

        let expected = 1.0 / 60.0;
        assert!((time.delta() - expected).abs() < 0.0001);
    }

    #[test]
    fn test_negative_delta_is_ignored() {
        let mut time = Time::new();
        time.tick(-1.0);
        assert_eq!(time.elapsed(), 0.0);
    }
}
