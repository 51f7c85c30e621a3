//! Screen capture backends.

use chromacast_common::error::{ChromaError, ChromaResult};
use image::DynamicImage;
use xcap::Monitor;

use crate::frame::{CaptureRegion, Frame};

/// Source of captured frames.
///
/// The producer loop calls [`capture`](ScreenCapturer::capture) in an
/// unbounded loop. A capture error is fatal to the whole pipeline:
/// the screen is assumed always-available once capture has started,
/// so there is no retry path.
pub trait ScreenCapturer: Send {
    /// Grab the configured region as a fresh frame.
    fn capture(&mut self) -> ChromaResult<Frame>;
}

/// Captures a region of the primary monitor via xcap.
pub struct MonitorCapturer {
    monitor: Monitor,
    region: CaptureRegion,
}

impl MonitorCapturer {
    /// Open the primary monitor (falling back to the first one found)
    /// and validate that `region` fits inside it.
    pub fn new(region: CaptureRegion) -> ChromaResult<Self> {
        if region.width == 0 || region.height == 0 {
            return Err(ChromaError::config(format!(
                "Invalid capture region {}x{} at ({},{})",
                region.width, region.height, region.left, region.top
            )));
        }

        let mut monitors = Monitor::all()
            .map_err(|e| ChromaError::capture(format!("Failed to enumerate monitors: {e}")))?;

        let monitor = match monitors.iter().position(|m| m.is_primary()) {
            Some(idx) => monitors.swap_remove(idx),
            None => monitors
                .into_iter()
                .next()
                .ok_or_else(|| ChromaError::capture("No monitors found"))?,
        };

        let right = region.left.saturating_add(region.width);
        let bottom = region.top.saturating_add(region.height);
        if right > monitor.width() || bottom > monitor.height() {
            return Err(ChromaError::config(format!(
                "Capture region {}x{} at ({},{}) exceeds monitor '{}' ({}x{})",
                region.width,
                region.height,
                region.left,
                region.top,
                monitor.name(),
                monitor.width(),
                monitor.height()
            )));
        }

        tracing::info!(
            monitor = %monitor.name(),
            width = region.width,
            height = region.height,
            left = region.left,
            top = region.top,
            "Opened capture monitor"
        );

        Ok(Self { monitor, region })
    }

    /// The region this capturer was opened with.
    pub fn region(&self) -> CaptureRegion {
        self.region
    }
}

impl ScreenCapturer for MonitorCapturer {
    fn capture(&mut self) -> ChromaResult<Frame> {
        let rgba = self
            .monitor
            .capture_image()
            .map_err(|e| ChromaError::capture(format!("Screen capture failed: {e}")))?;

        let cropped = image::imageops::crop_imm(
            &rgba,
            self.region.left,
            self.region.top,
            self.region.width,
            self.region.height,
        )
        .to_image();

        let rgb = DynamicImage::ImageRgba8(cropped).to_rgb8();
        Ok(Frame::new(rgb))
    }
}

/// List monitors visible to the capture backend.
///
/// Returns `(name, width, height, is_primary)` per monitor. Used by
/// the CLI capability check.
pub fn list_monitors() -> ChromaResult<Vec<(String, u32, u32, bool)>> {
    let monitors = Monitor::all()
        .map_err(|e| ChromaError::capture(format!("Failed to enumerate monitors: {e}")))?;

    Ok(monitors
        .iter()
        .map(|m| (m.name().to_string(), m.width(), m.height(), m.is_primary()))
        .collect())
}
