use std::time::Instant;

/// One sample of the frame clock.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the previous sample (or since the start, for the first).
    pub delta: f32,

    /// Seconds since the clock started.
    pub elapsed: f32,

    /// Monotonic timestamp taken at the sample.
    pub now: Instant,

    /// Samples taken before this one.
    pub frame_index: u64,
}

/// Monotonic clock feeding the per-frame time uniforms.
///
/// Unlike a simulation clock, deltas are reported as measured: shaders
/// animating on `elapsed` need the real wall time after a stall.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
    frame_index: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Clock whose start (and first previous sample) is `start`.
    pub fn starting_at(start: Instant) -> Self {
        Self { start, last: start, frame_index: 0 }
    }

    /// Restarts both the elapsed and the delta baseline.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn start(&self) -> Instant {
        self.start
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Samples the clock at `now`.
    ///
    /// A `now` earlier than the previous sample yields a zero delta.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let delta = now.saturating_duration_since(self.last);
        let elapsed = now.saturating_duration_since(self.start);
        self.last = self.last.max(now);

        let ft = FrameTime {
            delta: delta.as_secs_f32(),
            elapsed: elapsed.as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
