//! Frame clock for the render loop.
//!
//! Tracks elapsed time, per-frame delta, frame count and a periodically
//! refreshed FPS figure. Elapsed time drives the rainbow sweep; FPS is shown
//! in the window title.
//!
//! ```
//! use pinchfield::time::FrameClock;
//!
//! let mut clock = FrameClock::new();
//! clock.update();
//! assert_eq!(clock.frame(), 1);
//! ```

use std::time::{Duration, Instant};

/// Timing information for the display loop.
#[derive(Debug)]
pub struct FrameClock {
    /// When the clock was created.
    start: Instant,
    /// When the last frame occurred.
    last_frame: Instant,
    /// Seconds since start, as of the last update.
    elapsed_secs: f64,
    /// Seconds between the last two updates.
    delta_secs: f32,
    /// Updates since start.
    frame_count: u64,
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_update_interval: Duration,
}

impl FrameClock {
    /// Create a clock starting now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
        }
    }

    /// Advance to a new frame. Call once per redraw.
    pub fn update(&mut self) {
        self.update_at(Instant::now());
    }

    /// Advance to a new frame observed at `now`.
    pub fn update_at(&mut self, now: Instant) {
        self.delta_secs = now.saturating_duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.elapsed_secs = now.saturating_duration_since(self.start).as_secs_f64();
        self.frame_count += 1;

        let fps_elapsed = now.saturating_duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }
    }

    /// Seconds since the clock started, at the last update.
    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.elapsed_secs
    }

    /// Seconds between the last two updates.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Updates since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Frames per second, refreshed twice a second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// The instant the clock was created.
    #[inline]
    pub fn start_instant(&self) -> Instant {
        self.start
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

    #[test]
    fn test_clock_new() {
        let clock = FrameClock::new();
        assert_eq!(clock.frame(), 0);
        assert_eq!(clock.elapsed(), 0.0);
        assert_eq!(clock.fps(), 0.0);
    }

    #[test]
    fn test_update_at_tracks_delta_and_elapsed() {
        let mut clock = FrameClock::new();
        let start = clock.start_instant();

        clock.update_at(start + Duration::from_millis(100));
        clock.update_at(start + Duration::from_millis(150));

        assert_eq!(clock.frame(), 2);
        assert!((clock.delta() - 0.05).abs() < 1e-4);
        assert!((clock.elapsed() - 0.15).abs() < 1e-9);
    }

    #[test]
    fn test_fps_refreshes_after_interval() {
        let mut clock = FrameClock::new();
        let start = clock.start_instant();
        for i in 1..=30 {
            clock.update_at(start + Duration::from_millis(i * 1000 / 60));
        }
        // 30 frames over exactly 500 ms
        assert!((clock.fps() - 60.0).abs() < 0.5);
    }
}
