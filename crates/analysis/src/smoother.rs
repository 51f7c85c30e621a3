//! Exponential smoothing of extracted colors.

use chromacast_common::error::{ChromaError, ChromaResult};

use crate::extractor::ColorSample;

/// K running color averages, one per result slot.
///
/// Persists for the pipeline's lifetime and is mutated in place tick
/// by tick. Slot `i` has no guaranteed correspondence to a particular
/// visual color across ticks — the extractor's random initialization
/// can swap slots, and the smoother blends whatever arrives at each
/// index regardless.
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothedColorSet {
    channels: Vec<[f32; 3]>,
}

impl SmoothedColorSet {
    /// Number of color slots (always K).
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Raw running averages.
    pub fn channels(&self) -> &[[f32; 3]] {
        &self.channels
    }

    /// Averages as displayable RGB8, truncating like the original
    /// uint8 cast.
    pub fn colors(&self) -> Vec<[u8; 3]> {
        self.channels
            .iter()
            .map(|c| [c[0] as u8, c[1] as u8, c[2] as u8])
            .collect()
    }
}

/// Maintains K exponential moving averages across extractor outputs.
pub struct ColorSmoother {
    alpha: f32,
    colors: usize,
    averages: Option<Vec<[f32; 3]>>,
}

impl ColorSmoother {
    /// Create a smoother for `colors` slots with blend factor `alpha`
    /// in (0, 1].
    pub fn new(colors: usize, alpha: f32) -> ChromaResult<Self> {
        if colors == 0 {
            return Err(ChromaError::config("Color count must be at least 1"));
        }
        if !(alpha > 0.0 && alpha <= 1.0) {
            return Err(ChromaError::config(format!(
                "Smoothing alpha {alpha} is outside (0, 1]"
            )));
        }
        Ok(Self {
            alpha,
            colors,
            averages: None,
        })
    }

    /// Fold one sample into the running averages and return a snapshot.
    ///
    /// The first sample seeds the averages exactly; afterwards each
    /// slot blends componentwise:
    /// `avg[i] = alpha * sample[i] + (1 - alpha) * avg[i]`.
    pub fn update(&mut self, sample: &ColorSample) -> ChromaResult<SmoothedColorSet> {
        if sample.len() != self.colors {
            return Err(ChromaError::config(format!(
                "Sample has {} colors, smoother expects {}",
                sample.len(),
                self.colors
            )));
        }

        let channels = match &mut self.averages {
            None => {
                let seeded: Vec<[f32; 3]> = sample
                    .entries()
                    .iter()
                    .map(|e| [e.color[0] as f32, e.color[1] as f32, e.color[2] as f32])
                    .collect();
                self.averages = Some(seeded.clone());
                seeded
            }
            Some(averages) => {
                for (avg, entry) in averages.iter_mut().zip(sample.entries()) {
                    for ch in 0..3 {
                        avg[ch] = self.alpha * entry.color[ch] as f32
                            + (1.0 - self.alpha) * avg[ch];
                    }
                }
                averages.clone()
            }
        };

        Ok(SmoothedColorSet { channels })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::ColorExtractor;
    use chromacast_capture::Frame;

    fn sample_of(colors: &[[u8; 3]]) -> ColorSample {
        // Build real samples through the extractor to stay honest
        // about the types; solid frames make the output exact.
        assert_eq!(colors.len(), 1);
        let frame = Frame::solid(100, 100, colors[0]);
        ColorExtractor::new(1).unwrap().extract(&frame).unwrap()
    }

    #[test]
    fn test_invalid_alpha_rejected() {
        assert!(ColorSmoother::new(3, 0.0).is_err());
        assert!(ColorSmoother::new(3, -0.1).is_err());
        assert!(ColorSmoother::new(3, 1.01).is_err());
        assert!(ColorSmoother::new(3, 1.0).is_ok());
    }

    #[test]
    fn test_zero_colors_rejected() {
        assert!(ColorSmoother::new(0, 0.3).is_err());
    }

    #[test]
    fn test_first_sample_seeds_exactly() {
        for alpha in [0.01, 0.3, 1.0] {
            let mut smoother = ColorSmoother::new(1, alpha).unwrap();
            let smoothed = smoother.update(&sample_of(&[[200, 40, 90]])).unwrap();
            assert_eq!(smoothed.colors(), vec![[200, 40, 90]]);
        }
    }

    #[test]
    fn test_constant_input_converges_monotonically() {
        let mut smoother = ColorSmoother::new(1, 0.3).unwrap();
        smoother.update(&sample_of(&[[0, 0, 0]])).unwrap();

        let target = sample_of(&[[255, 255, 255]]);
        let mut last_distance = f32::INFINITY;
        for _ in 0..20 {
            let smoothed = smoother.update(&target).unwrap();
            let avg = smoothed.channels()[0];
            let distance = (255.0 - avg[0]).abs();
            assert!(distance <= last_distance);
            last_distance = distance;
        }
    }

    #[test]
    fn test_alpha_one_tracks_immediately() {
        let mut smoother = ColorSmoother::new(1, 1.0).unwrap();
        smoother.update(&sample_of(&[[0, 0, 0]])).unwrap();
        let smoothed = smoother.update(&sample_of(&[[255, 10, 10]])).unwrap();
        assert_eq!(smoothed.colors(), vec![[255, 10, 10]]);
    }

    #[test]
    fn test_sample_length_mismatch_rejected() {
        let mut smoother = ColorSmoother::new(2, 0.3).unwrap();
        let err = smoother.update(&sample_of(&[[1, 2, 3]])).unwrap_err();
        assert!(err.to_string().contains("Configuration error"));
    }
}
