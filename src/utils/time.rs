use std::time::Instant;

/// Frame clock for the cooperative update loop.
///
/// All animation state (camera tweens, wheel spin) advances by elapsed
/// seconds, not by callback count, so frame-rate variation does not change
/// animation duration.
#[derive(Debug)]
pub struct Timer {
    last_update: Instant,
    delta_seconds: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Creates a clock starting from now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_update: Instant::now(),
            delta_seconds: 0.0,
            frame_count: 0,
        }
    }

    /// Advances the clock; call once per frame. Returns the elapsed
    /// seconds since the previous tick.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        self.delta_seconds = (now - self.last_update).as_secs_f32();
        self.last_update = now;
        self.frame_count += 1;
        self.delta_seconds
    }

    /// Elapsed seconds measured by the most recent tick.
    #[must_use]
    pub fn dt_seconds(&self) -> f32 {
        self.delta_seconds
    }

    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
