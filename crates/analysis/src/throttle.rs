//! Analysis-rate throttling.

use chromacast_common::error::{ChromaError, ChromaResult};

/// Fires once every N calls.
///
/// Purely call-count based — no wall clock involved — so the analysis
/// cadence is deterministic for a given sequence of loop iterations.
#[derive(Debug)]
pub struct FrameThrottle {
    interval: u32,
    count: u32,
}

impl FrameThrottle {
    /// Create a throttle firing on every `interval`-th tick.
    pub fn new(interval: u32) -> ChromaResult<Self> {
        if interval == 0 {
            return Err(ChromaError::config(
                "Throttle interval must be at least 1",
            ));
        }
        Ok(Self { interval, count: 0 })
    }

    /// Count one iteration. Returns true on the N-th, 2N-th, ... call
    /// and resets the counter each time it fires.
    pub fn tick(&mut self) -> bool {
        self.count += 1;
        if self.count >= self.interval {
            self.count = 0;
            return true;
        }
        false
    }

    /// The configured interval.
    pub fn interval(&self) -> u32 {
        self.interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_interval_rejected() {
        assert!(FrameThrottle::new(0).is_err());
    }

    #[test]
    fn test_interval_one_always_fires() {
        let mut throttle = FrameThrottle::new(1).unwrap();
        for _ in 0..10 {
            assert!(throttle.tick());
        }
    }

    #[test]
    fn test_fires_on_every_nth_call() {
        let mut throttle = FrameThrottle::new(3).unwrap();
        let fired: Vec<bool> = (0..9).map(|_| throttle.tick()).collect();
        assert_eq!(
            fired,
            vec![false, false, true, false, false, true, false, false, true]
        );
    }

    proptest! {
        #[test]
        fn prop_fires_exactly_at_multiples(interval in 1u32..200, rounds in 1u32..5) {
            let mut throttle = FrameThrottle::new(interval).unwrap();
            for call in 1..=interval * rounds {
                let fired = throttle.tick();
                prop_assert_eq!(fired, call % interval == 0);
            }
        }
    }
}
