use instant::{Duration, Instant};

/// Counts frames and reports the frame rate roughly once per second.
#[derive(Debug)]
pub struct FrameStats {
    last_time: Instant,
    frames: u32,
    elapsed: Duration,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self {
            last_time: Instant::now(),
            frames: 0,
            elapsed: Duration::ZERO,
        }
    }
}

impl FrameStats {
    pub const WINDOW: Duration = Duration::from_secs(1);

    /// Marks the end of a frame using the wall clock.
    pub fn tick(&mut self) -> Option<f64> {
        let dt = self.last_time.elapsed();
        self.last_time = Instant::now();
        self.record(dt)
    }

    /// Adds one frame that took `dt`. Returns frames per second once a full
    /// window has passed and starts a new window.
    pub fn record(&mut self, dt: Duration) -> Option<f64> {
        self.frames += 1;
        self.elapsed += dt;
        if self.elapsed < Self::WINDOW {
            return None;
        }
        let fps = self.frames as f64 / self.elapsed.as_secs_f64();
        self.frames = 0;
        self.elapsed = Duration::ZERO;
        Some(fps)
    }
}
