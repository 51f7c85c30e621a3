//! Display surfaces for composed frames.

use chromacast_common::error::{ChromaError, ChromaResult};
use image::RgbImage;
use minifb::{Key, Window, WindowOptions};

/// Where composed frames go, and where the stop request comes from.
///
/// `stop_requested` must be non-blocking: the render loop polls it
/// once per iteration and fans the stop signal out to the other loops.
pub trait FrameSink {
    /// Display one composed frame.
    fn show(&mut self, image: &RgbImage) -> ChromaResult<()>;

    /// Whether the user asked to stop (window closed, Escape, Q).
    fn stop_requested(&mut self) -> bool;
}

/// minifb window sink.
///
/// The window is created lazily on the first frame, sized to it, and
/// paces `show` to roughly 40 updates per second — the render loop's
/// only blocking point.
pub struct WindowSink {
    title: String,
    window: Option<Window>,
    buffer: Vec<u32>,
}

impl WindowSink {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            window: None,
            buffer: Vec::new(),
        }
    }
}

impl FrameSink for WindowSink {
    fn show(&mut self, image: &RgbImage) -> ChromaResult<()> {
        let width = image.width() as usize;
        let height = image.height() as usize;

        if self.window.is_none() {
            let mut window = Window::new(
                &self.title,
                width,
                height,
                WindowOptions::default(),
            )
            .map_err(|e| ChromaError::render(format!("Failed to open window: {e}")))?;
            window.set_target_fps(40);
            tracing::info!(width, height, "Opened display window");
            self.window = Some(window);
        }

        self.buffer.clear();
        self.buffer.extend(image.pixels().map(|p| {
            let [r, g, b] = p.0;
            ((r as u32) << 16) | ((g as u32) << 8) | b as u32
        }));

        if let Some(window) = &mut self.window {
            window
                .update_with_buffer(&self.buffer, width, height)
                .map_err(|e| ChromaError::render(format!("Failed to present frame: {e}")))?;
        }

        Ok(())
    }

    fn stop_requested(&mut self) -> bool {
        match &self.window {
            None => false,
            Some(window) => {
                !window.is_open()
                    || window.is_key_down(Key::Escape)
                    || window.is_key_down(Key::Q)
            }
        }
    }
}
