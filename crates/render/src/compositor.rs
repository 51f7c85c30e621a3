//! Output composition: frame above a strip of smoothed color blocks.

use image::{imageops, Rgb, RgbImage};

use crate::font;

/// Height of the color strip under the frame, in rows.
pub const STRIP_HEIGHT: u32 = 100;

/// Overlay placement and style for the FPS label.
const LABEL_X: u32 = 30;
const LABEL_Y: u32 = 30;
const LABEL_SCALE: u32 = 2;
const LABEL_COLOR: [u8; 3] = [0, 255, 0];

/// Widths for K color blocks spanning `frame_width` exactly.
///
/// The first K-1 blocks get `floor(frame_width / K)`; the last block
/// absorbs the remainder, so the widths always sum to `frame_width`
/// with no rounding gap or overlap.
pub fn block_widths(frame_width: u32, colors: usize) -> Vec<u32> {
    let k = colors as u32;
    if k == 0 {
        return Vec::new();
    }
    let base = frame_width / k;
    let mut widths = vec![base; colors];
    widths[colors - 1] = frame_width - base * (k - 1);
    widths
}

/// Compose the visualization: the captured frame with the FPS label
/// drawn over it, stacked above one block per smoothed color.
pub fn compose(frame: &RgbImage, colors: &[[u8; 3]], fps_label: &str) -> RgbImage {
    let width = frame.width();
    let height = frame.height();

    let mut out = RgbImage::new(width, height + STRIP_HEIGHT);
    imageops::replace(&mut out, frame, 0, 0);
    font::draw_text(&mut out, LABEL_X, LABEL_Y, fps_label, LABEL_COLOR, LABEL_SCALE);

    let mut x = 0u32;
    for (color, block_width) in colors.iter().zip(block_widths(width, colors.len())) {
        for dy in 0..STRIP_HEIGHT {
            for dx in 0..block_width {
                out.put_pixel(x + dx, height + dy, Rgb(*color));
            }
        }
        x += block_width;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_block_widths_sum_to_frame_width() {
        for (width, k) in [(400, 3), (401, 3), (100, 7), (5, 5), (1920, 1)] {
            let widths = block_widths(width, k);
            assert_eq!(widths.len(), k);
            assert_eq!(widths.iter().sum::<u32>(), width);
        }
    }

    #[test]
    fn test_last_block_absorbs_remainder() {
        let widths = block_widths(100, 3);
        assert_eq!(widths, vec![33, 33, 34]);
    }

    #[test]
    fn test_compose_dimensions() {
        let frame = RgbImage::from_pixel(120, 80, Rgb([9, 9, 9]));
        let out = compose(&frame, &[[255, 0, 0], [0, 255, 0]], "FPS: 30.0");
        assert_eq!(out.width(), 120);
        assert_eq!(out.height(), 80 + STRIP_HEIGHT);
    }

    #[test]
    fn test_strip_pixels_match_colors() {
        let frame = RgbImage::from_pixel(90, 10, Rgb([0, 0, 0]));
        let colors = [[255, 0, 0], [0, 255, 0], [0, 0, 255]];
        let out = compose(&frame, &colors, "");

        let strip_y = 10 + STRIP_HEIGHT / 2;
        assert_eq!(out.get_pixel(0, strip_y).0, [255, 0, 0]);
        assert_eq!(out.get_pixel(30, strip_y).0, [0, 255, 0]);
        assert_eq!(out.get_pixel(89, strip_y).0, [0, 0, 255]);
    }

    #[test]
    fn test_frame_pixels_preserved_outside_label() {
        let frame = RgbImage::from_pixel(64, 64, Rgb([12, 34, 56]));
        let out = compose(&frame, &[[1, 2, 3]], "FPS: 1.0");
        // Bottom-left of the frame region is well away from the label.
        assert_eq!(out.get_pixel(0, 63).0, [12, 34, 56]);
    }

    proptest! {
        #[test]
        fn prop_block_widths_partition_frame(width in 1u32..4000, k in 1usize..64) {
            let widths = block_widths(width, k);
            prop_assert_eq!(widths.len(), k);
            prop_assert_eq!(widths.iter().sum::<u32>(), width);
            // All blocks but the last share the floor width.
            let base = width / k as u32;
            for w in &widths[..k - 1] {
                prop_assert_eq!(*w, base);
            }
        }
    }
}
