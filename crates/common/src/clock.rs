//! Render-rate measurement.
//!
//! The render loop calls [`FpsCounter::tick`] once per displayed frame.
//! The counter accumulates calls and recomputes the rate once at least
//! one second has elapsed, then resets both the call count and the
//! timer. Until the first full second has passed there is no rate to
//! report and [`FpsCounter::label`] shows a calculating placeholder.

use std::time::Instant;

/// Counts render calls and derives a frames-per-second figure.
#[derive(Debug)]
pub struct FpsCounter {
    window_start: Instant,
    frames: u32,
    current: Option<f64>,
}

impl FpsCounter {
    /// Create a counter anchored to now.
    pub fn new() -> Self {
        Self::new_at(Instant::now())
    }

    /// Create a counter anchored to a specific instant (for tests).
    pub fn new_at(now: Instant) -> Self {
        Self {
            window_start: now,
            frames: 0,
            current: None,
        }
    }

    /// Record one rendered frame.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// Record one rendered frame at a specific instant.
    ///
    /// Recomputes the rate and resets the measurement window once at
    /// least one second has elapsed since the window started.
    pub fn tick_at(&mut self, now: Instant) {
        self.frames += 1;

        let elapsed = now.saturating_duration_since(self.window_start).as_secs_f64();
        if elapsed >= 1.0 {
            self.current = Some(self.frames as f64 / elapsed);
            self.window_start = now;
            self.frames = 0;
        }
    }

    /// The most recent measurement, if a full second has elapsed.
    pub fn current(&self) -> Option<f64> {
        self.current
    }

    /// Display label for the overlay.
    pub fn label(&self) -> String {
        match self.current {
            Some(fps) => format!("FPS: {fps:.1}"),
            None => "FPS: Calculating...".to_string(),
        }
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_calculating_before_first_second() {
        let t0 = Instant::now();
        let mut counter = FpsCounter::new_at(t0);

        for i in 1..=30u64 {
            counter.tick_at(t0 + Duration::from_millis(i * 10));
        }

        assert_eq!(counter.current(), None);
        assert_eq!(counter.label(), "FPS: Calculating...");
    }

    #[test]
    fn test_rate_after_one_second() {
        let t0 = Instant::now();
        let mut counter = FpsCounter::new_at(t0);

        // 50 ticks at 20ms; the last lands exactly on the 1s boundary
        for i in 1..=50u64 {
            counter.tick_at(t0 + Duration::from_millis(i * 20));
        }

        let fps = counter.current().expect("rate should be available");
        assert!((fps - 50.0).abs() < 1e-9);
        assert_eq!(counter.label(), "FPS: 50.0");
    }

    #[test]
    fn test_window_resets_after_measurement() {
        let t0 = Instant::now();
        let mut counter = FpsCounter::new_at(t0);

        counter.tick_at(t0 + Duration::from_secs(1));
        assert!(counter.current().is_some());

        // New window: a single tick shortly after must not recompute
        counter.tick_at(t0 + Duration::from_millis(1100));
        let fps = counter.current().unwrap();
        assert!((fps - 1.0).abs() < 1e-9);

        // Second window closes with 2 ticks over 1 second
        counter.tick_at(t0 + Duration::from_secs(2));
        let fps = counter.current().unwrap();
        assert!((fps - 2.0).abs() < 1e-9);
    }
}
