use web_time::{Duration, Instant};

/// Longest step handed to the integrators. Frames delayed past this (tab
/// switch, debugger pause) are treated as this long.
pub const MAX_FRAME_STEP: Duration = Duration::from_millis(100);

/// Per-frame delta-time source with a smoothed FPS readout.
pub struct FrameClock {
    /// Last frame timestamp
    last_frame: Instant,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl FrameClock {
    /// Start a clock whose first frame is measured from now.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Start a clock whose first frame is measured from `start`.
    #[must_use]
    pub fn starting_at(start: Instant) -> Self {
        Self {
            last_frame: start,
            smoothed_fps: 60.0, // Start with reasonable default
            smoothing: 0.05,
        }
    }

    /// Advance the clock to `now` and return the clamped step in seconds.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;

        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }

        elapsed.min(MAX_FRAME_STEP).as_secs_f32()
    }

    /// Advance the clock to the current instant.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
