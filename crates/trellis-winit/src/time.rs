use std::time::{Duration, Instant};

use trellis_core::profiling::profile_function;

/// Frame timing information for one iteration of the run loop.
#[derive(Debug, Clone)]
pub struct FrameTime {
    /// Time elapsed since the last frame
    pub delta: Duration,
    /// Total time elapsed since the loop started
    pub elapsed: Duration,
    /// Number of frames started so far, this one included
    pub frame_count: u64,
}

impl FrameTime {
    pub fn new() -> Self {
        Self {
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    #[inline]
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    #[inline]
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

impl Default for FrameTime {
    fn default() -> Self {
        Self::new()
    }
}

/// Tracks wall-clock time across frames.
pub struct TimeTracker {
    start_time: Instant,
    last_frame_time: Instant,
    frame_count: u64,
}

impl TimeTracker {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_frame_time: now,
            frame_count: 0,
        }
    }

    pub fn tick(&mut self) -> FrameTime {
        profile_function!();
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame_time);
        let elapsed = now.duration_since(self.start_time);

        self.last_frame_time = now;
        self.frame_count += 1;

        FrameTime {
            delta,
            elapsed,
            frame_count: self.frame_count,
        }
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for TimeTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Sleeps out the remainder of a frame budget.
///
/// Used when the surface is not vsync-limited; with no target the pacer
/// never sleeps.
#[derive(Debug)]
pub struct FramePacer {
    frame_budget: Option<Duration>,
    frame_start: Instant,
}

impl FramePacer {
    pub fn new(target_fps: Option<f32>) -> Self {
        let frame_budget = target_fps
            .filter(|fps| fps.is_finite() && *fps > 0.0)
            .map(|fps| Duration::from_secs_f32(1.0 / fps));
        Self {
            frame_budget,
            frame_start: Instant::now(),
        }
    }

    pub fn frame_budget(&self) -> Option<Duration> {
        self.frame_budget
    }

    pub fn begin(&mut self) {
        self.frame_start = Instant::now();
    }

    /// Time left in the current frame's budget.
    pub fn remaining(&self) -> Duration {
        match self.frame_budget {
            Some(budget) => budget.saturating_sub(self.frame_start.elapsed()),
            None => Duration::ZERO,
        }
    }

    pub fn wait(&mut self) {
        profile_function!();
        let remaining = self.remaining();
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_counts_frames() {
        let mut tracker = TimeTracker::new();
        let first = tracker.tick();
        let second = tracker.tick();
        assert_eq!(first.frame_count, 1);
        assert_eq!(second.frame_count, 2);
        assert!(second.elapsed >= first.elapsed);
    }

    #[test]
    fn test_pacer_without_target_never_waits() {
        let pacer = FramePacer::new(None);
        assert_eq!(pacer.frame_budget(), None);
        assert_eq!(pacer.remaining(), Duration::ZERO);
    }

    #[test]
    fn test_pacer_rejects_nonsense_targets() {
        assert_eq!(FramePacer::new(Some(0.0)).frame_budget(), None);
        assert_eq!(FramePacer::new(Some(f32::NAN)).frame_budget(), None);
    }

    #[test]
    fn test_pacer_budget_shrinks() {
        let mut pacer = FramePacer::new(Some(10.0));
        pacer.begin();
        let budget = pacer.frame_budget().unwrap();
        assert!(pacer.remaining() <= budget);
    }
}
