/// Scene clock: elapsed time, last host timestamp and the delta for the current tick.
///
/// Advanced exactly once per tick, before any body or the camera reads it.
#[derive(Debug, Clone)]
pub struct SceneClock {
    /// Total simulated seconds since construction.
    elapsed: f64,
    /// Host timestamp (seconds) of the previous `advance_to` call.
    last_timestamp: Option<f64>,
    /// Delta applied on the current tick, in seconds.
    delta: f32,
    /// Largest delta a single tick may apply. `None` applies deltas as given.
    max_delta: Option<f32>,
    /// Number of ticks so far.
    frames: u64,
}

impl SceneClock {
    pub fn new(max_delta: Option<f32>) -> Self {
        Self {
            elapsed: 0.0,
            last_timestamp: None,
            delta: 0.0,
            max_delta,
            frames: 0,
        }
    }

    /// Advance by a host-measured frame delta. Returns the delta actually applied.
    pub fn advance(&mut self, frame_dt: f32) -> f32 {
        let dt = if frame_dt.is_finite() { frame_dt.max(0.0) } else { 0.0 };
        let applied = match self.max_delta {
            Some(max) => dt.min(max),
            None => dt,
        };
        if applied < dt {
            log::debug!("clock: frame delta {dt:.3}s clamped to {applied:.3}s");
        }
        self.delta = applied;
        self.elapsed += applied as f64;
        self.frames += 1;
        applied
    }

    /// Advance to a monotonic host timestamp in seconds. The first call only
    /// records the timestamp and applies a zero delta.
    pub fn advance_to(&mut self, timestamp: f64) -> f32 {
        let dt = match self.last_timestamp {
            Some(last) => (timestamp - last) as f32,
            None => 0.0,
        };
        self.last_timestamp = Some(timestamp);
        self.advance(dt)
    }

    /// Delta time of the current tick, in seconds.
    pub fn delta(&self) -> f32 {
        self.delta
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn last_timestamp(&self) -> Option<f64> {
        self.last_timestamp
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn max_delta(&self) -> Option<f32> {
        self.max_delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_accumulates() {
        let mut clock = SceneClock::new(Some(0.25));
        clock.advance(0.016);
        clock.advance(0.016);
        assert!((clock.elapsed() - 0.032).abs() < 1e-6);
        assert_eq!(clock.frame_count(), 2);
        assert!((clock.delta() - 0.016).abs() < 1e-7);
    }

    #[test]
    fn caps_large_deltas() {
        let mut clock = SceneClock::new(Some(0.25));
        let applied = clock.advance(5.0);
        assert_eq!(applied, 0.25);
        assert_eq!(clock.delta(), 0.25);
    }

    #[test]
    fn uncapped_clock_applies_full_delta() {
        let mut clock = SceneClock::new(None);
        assert_eq!(clock.advance(1.0), 1.0);
        assert_eq!(clock.advance(5.0), 5.0);
        assert_eq!(clock.elapsed(), 6.0);
        assert_eq!(clock.max_delta(), None);
    }

    #[test]
    fn negative_and_nan_become_zero() {
        let mut clock = SceneClock::new(Some(0.25));
        assert_eq!(clock.advance(-1.0), 0.0);
        assert_eq!(clock.advance(f32::NAN), 0.0);
        assert_eq!(clock.elapsed(), 0.0);
    }

    #[test]
    fn timestamps_derive_delta() {
        let mut clock = SceneClock::new(None);
        assert_eq!(clock.advance_to(10.0), 0.0);
        let dt = clock.advance_to(10.5);
        assert!((dt - 0.5).abs() < 1e-6, "dt was {}", dt);
        assert_eq!(clock.last_timestamp(), Some(10.5));
    }
}
