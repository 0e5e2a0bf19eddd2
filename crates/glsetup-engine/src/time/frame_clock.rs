use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the previous tick, clamped.
    pub dt: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Zero-based index of this frame.
    pub frame_index: u64,
}

/// Per-loop frame clock.
///
/// Tick once per presented frame. Delta time is clamped so a stall (debugger,
/// minimized window, blocking swap) does not show up as a huge frame.
#[derive(Debug, Clone)]
pub struct FrameClock {
    started: Instant,
    last: Instant,
    frames: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        let now = Instant::now();
        Self {
            started: now,
            last: now,
            frames: 0,
            dt_min,
            dt_max,
        }
    }

    /// Resets the delta baseline, e.g. once the first frame is about to render.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Advances the clock by one frame.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);

        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            now,
            frame_index: self.frames,
        };

        self.frames = self.frames.wrapping_add(1);
        ft
    }

    /// Number of ticks so far.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Wall time since the clock was created.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Mean frames per second over the clock's lifetime; `0.0` before any tick.
    pub fn average_fps(&self) -> f64 {
        let secs = self.elapsed().as_secs_f64();
        if self.frames == 0 || secs <= 0.0 {
            0.0
        } else {
            self.frames as f64 / secs
        }
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
    fn tick_counts_frames_from_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick().frame_index, 0);
        assert_eq!(clock.tick().frame_index, 1);
        assert_eq!(clock.frames(), 2);
    }

    #[test]
    fn dt_is_raised_to_the_minimum() {
        let mut clock =
            FrameClock::with_clamps(Duration::from_secs(1), Duration::from_secs(2));
        let ft = clock.tick();
        assert_eq!(ft.dt, 1.0);
    }

    #[test]
    fn dt_never_exceeds_the_maximum() {
        let mut clock = FrameClock::with_clamps(Duration::ZERO, Duration::from_nanos(1));
        std::thread::sleep(Duration::from_millis(2));
        let ft = clock.tick();
        assert!(ft.dt <= Duration::from_nanos(1).as_secs_f32());
    }

    #[test]
    fn average_fps_is_zero_before_first_frame() {
        assert_eq!(FrameClock::new().average_fps(), 0.0);
    }

    #[test]
    fn average_fps_is_positive_after_frames() {
        let mut clock = FrameClock::new();
        std::thread::sleep(Duration::from_millis(1));
        clock.tick();
        assert!(clock.average_fps() > 0.0);
    }
}
