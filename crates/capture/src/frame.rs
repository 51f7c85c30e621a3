//! Captured frame data.

use image::RgbImage;
use serde::{Deserialize, Serialize};

/// The rectangle of the screen to capture, in monitor-local pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureRegion {
    /// Offset from the top edge of the monitor.
    pub top: u32,

    /// Offset from the left edge of the monitor.
    pub left: u32,

    /// Region width in pixels.
    pub width: u32,

    /// Region height in pixels.
    pub height: u32,
}

impl Default for CaptureRegion {
    fn default() -> Self {
        Self {
            top: 100,
            left: 0,
            width: 400,
            height: 300,
        }
    }
}

/// One captured frame: an RGB8 buffer fixed at the capture region's
/// dimensions. Immutable once captured; the producer loop replaces it
/// wholesale with the next capture.
#[derive(Debug, Clone)]
pub struct Frame {
    image: RgbImage,
}

impl Frame {
    /// Wrap an RGB image as a frame.
    pub fn new(image: RgbImage) -> Self {
        Self { image }
    }

    /// Build a solid-color frame (test patterns, warm-up fills).
    pub fn solid(width: u32, height: u32, color: [u8; 3]) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, image::Rgb(color)),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// The underlying pixel buffer.
    pub fn image(&self) -> &RgbImage {
        &self.image
    }
}
