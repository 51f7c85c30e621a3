//! Dominant-color extraction via k-means clustering.
//!
//! Frames are downsampled to a fixed grid before clustering so the
//! cost per analysis tick is independent of the capture resolution.
//! Cluster initialization is random, which means result index `i`
//! carries no identity across successive calls — consumers must
//! tolerate dominant colors swapping slots between ticks.

use chromacast_capture::Frame;
use chromacast_common::error::{ChromaError, ChromaResult};
use image::imageops::{self, FilterType};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Downsample target; clustering always runs over this many pixels.
pub const SAMPLE_WIDTH: u32 = 100;
pub const SAMPLE_HEIGHT: u32 = 100;

/// Iteration cap and centroid-movement epsilon for Lloyd's algorithm.
/// Together they guarantee bounded-time termination; non-convergence
/// is never an error, the best effort so far is returned.
const MAX_ITERATIONS: usize = 10;
const CONVERGENCE_EPSILON: f32 = 1.0;

/// One dominant color and the number of sampled pixels assigned to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightedColor {
    pub color: [u8; 3],
    pub weight: u32,
}

/// Dominant colors for one frame, ranked by weight descending.
///
/// Produced fresh on each analysis tick; entries have no identity
/// across ticks.
#[derive(Debug, Clone)]
pub struct ColorSample {
    entries: Vec<WeightedColor>,
}

impl ColorSample {
    pub fn entries(&self) -> &[WeightedColor] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Clusters a frame's pixels and returns the K most populous colors.
pub struct ColorExtractor {
    colors: usize,
    rng_seed: Option<u64>,
}

impl ColorExtractor {
    /// Create an extractor for `colors` clusters.
    pub fn new(colors: usize) -> ChromaResult<Self> {
        let sampled = (SAMPLE_WIDTH * SAMPLE_HEIGHT) as usize;
        if colors == 0 {
            return Err(ChromaError::config("Color count must be at least 1"));
        }
        if colors > sampled {
            return Err(ChromaError::config(format!(
                "Color count {colors} exceeds sampled pixel count {sampled}"
            )));
        }
        Ok(Self {
            colors,
            rng_seed: None,
        })
    }

    /// Fix the random seed for cluster initialization (tests).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Extract the K dominant colors from a frame.
    pub fn extract(&self, frame: &Frame) -> ChromaResult<ColorSample> {
        let small = imageops::resize(
            frame.image(),
            SAMPLE_WIDTH,
            SAMPLE_HEIGHT,
            FilterType::Nearest,
        );
        let pixels: Vec<[f32; 3]> = small
            .pixels()
            .map(|p| [p.0[0] as f32, p.0[1] as f32, p.0[2] as f32])
            .collect();

        let mut rng = match self.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let (centroids, counts) = kmeans(&pixels, self.colors, &mut rng);

        let mut order: Vec<usize> = (0..self.colors).collect();
        order.sort_by(|&a, &b| counts[b].cmp(&counts[a]).then(a.cmp(&b)));

        let entries = order
            .into_iter()
            .map(|ci| WeightedColor {
                color: [
                    centroids[ci][0].clamp(0.0, 255.0) as u8,
                    centroids[ci][1].clamp(0.0, 255.0) as u8,
                    centroids[ci][2].clamp(0.0, 255.0) as u8,
                ],
                weight: counts[ci],
            })
            .collect();

        Ok(ColorSample { entries })
    }
}

/// Lloyd's k-means over RGB points.
///
/// Initial centroids are k distinct random pixels. Clusters that end
/// an iteration empty are reseeded to a random pixel, which keeps the
/// convergence check from stopping on a degenerate split.
fn kmeans(
    pixels: &[[f32; 3]],
    k: usize,
    rng: &mut impl rand::Rng,
) -> (Vec<[f32; 3]>, Vec<u32>) {
    let seeds = rand::seq::index::sample(rng, pixels.len(), k);
    let mut centroids: Vec<[f32; 3]> = seeds.iter().map(|i| pixels[i]).collect();

    for _ in 0..MAX_ITERATIONS {
        let mut sums = vec![[0.0f32; 3]; k];
        let mut counts = vec![0u32; k];

        for px in pixels {
            let ci = nearest_centroid(px, &centroids);
            for ch in 0..3 {
                sums[ci][ch] += px[ch];
            }
            counts[ci] += 1;
        }

        let mut max_shift_sq = 0.0f32;
        let mut reseeded = false;
        for ci in 0..k {
            if counts[ci] == 0 {
                centroids[ci] = pixels[rng.gen_range(0..pixels.len())];
                reseeded = true;
                continue;
            }
            let next = [
                sums[ci][0] / counts[ci] as f32,
                sums[ci][1] / counts[ci] as f32,
                sums[ci][2] / counts[ci] as f32,
            ];
            max_shift_sq = max_shift_sq.max(distance_sq(&next, &centroids[ci]));
            centroids[ci] = next;
        }

        if !reseeded && max_shift_sq <= CONVERGENCE_EPSILON * CONVERGENCE_EPSILON {
            break;
        }
    }

    // Final assignment pass: weights must reflect the centroids that
    // are actually returned.
    let mut counts = vec![0u32; k];
    for px in pixels {
        counts[nearest_centroid(px, &centroids)] += 1;
    }

    (centroids, counts)
}

/// Index of the closest centroid; ties resolve to the lowest index.
fn nearest_centroid(px: &[f32; 3], centroids: &[[f32; 3]]) -> usize {
    let mut best = 0;
    let mut best_d = f32::INFINITY;
    for (ci, c) in centroids.iter().enumerate() {
        let d = distance_sq(px, c);
        if d < best_d {
            best_d = d;
            best = ci;
        }
    }
    best
}

fn distance_sq(a: &[f32; 3], b: &[f32; 3]) -> f32 {
    let dr = a[0] - b[0];
    let dg = a[1] - b[1];
    let db = a[2] - b[2];
    dr * dr + dg * dg + db * db
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    const SAMPLED: u32 = SAMPLE_WIDTH * SAMPLE_HEIGHT;

    fn half_and_half(width: u32, height: u32, a: [u8; 3], b: [u8; 3]) -> Frame {
        let mut img = RgbImage::from_pixel(width, height, Rgb(a));
        for y in 0..height {
            for x in width / 2..width {
                img.put_pixel(x, y, Rgb(b));
            }
        }
        Frame::new(img)
    }

    #[test]
    fn test_zero_colors_rejected() {
        assert!(ColorExtractor::new(0).is_err());
    }

    #[test]
    fn test_colors_beyond_sampled_pixels_rejected() {
        assert!(ColorExtractor::new(SAMPLED as usize + 1).is_err());
        assert!(ColorExtractor::new(SAMPLED as usize).is_ok());
    }

    #[test]
    fn test_solid_frame_single_cluster() {
        let extractor = ColorExtractor::new(1).unwrap().with_seed(0);

        for color in [[255, 0, 0], [0, 255, 0], [0, 0, 255]] {
            let frame = Frame::solid(100, 100, color);
            let sample = extractor.extract(&frame).unwrap();

            assert_eq!(sample.len(), 1);
            assert_eq!(sample.entries()[0].color, color);
            assert_eq!(sample.entries()[0].weight, SAMPLED);
        }
    }

    #[test]
    fn test_two_tone_frame_splits_into_two_clusters() {
        let extractor = ColorExtractor::new(2).unwrap().with_seed(7);
        let frame = half_and_half(120, 80, [255, 0, 0], [0, 0, 255]);
        let sample = extractor.extract(&frame).unwrap();

        assert_eq!(sample.len(), 2);
        let total: u32 = sample.entries().iter().map(|e| e.weight).sum();
        assert_eq!(total, SAMPLED);
        assert!(sample.entries().iter().all(|e| e.weight > 0));
        assert!(sample.entries()[0].weight >= sample.entries()[1].weight);

        let mut colors: Vec<[u8; 3]> = sample.entries().iter().map(|e| e.color).collect();
        colors.sort();
        assert_eq!(colors, vec![[0, 0, 255], [255, 0, 0]]);
    }

    #[test]
    fn test_dominant_color_ranked_first() {
        // 3/4 red, 1/4 blue: red must come out on top.
        let mut img = RgbImage::from_pixel(100, 100, Rgb([255, 0, 0]));
        for y in 0..100 {
            for x in 75..100 {
                img.put_pixel(x, y, Rgb([0, 0, 255]));
            }
        }
        let extractor = ColorExtractor::new(2).unwrap().with_seed(3);
        let sample = extractor.extract(&Frame::new(img)).unwrap();

        assert_eq!(sample.entries()[0].color, [255, 0, 0]);
        assert!(sample.entries()[0].weight > sample.entries()[1].weight);
    }

    #[test]
    fn test_weight_sum_bounded_by_sampled_pixels() {
        let extractor = ColorExtractor::new(5).unwrap().with_seed(11);
        let frame = half_and_half(400, 300, [10, 200, 30], [240, 12, 99]);
        let sample = extractor.extract(&frame).unwrap();

        assert_eq!(sample.len(), 5);
        let total: u32 = sample.entries().iter().map(|e| e.weight).sum();
        assert!(total <= SAMPLED);
        for pair in sample.entries().windows(2) {
            assert!(pair[0].weight >= pair[1].weight);
        }
    }
}
