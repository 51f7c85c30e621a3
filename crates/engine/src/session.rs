//! Pipeline construction and the three loops.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use chromacast_analysis::{ColorExtractor, ColorSmoother, FrameThrottle};
use chromacast_capture::{CaptureRegion, ScreenCapturer};
use chromacast_common::clock::FpsCounter;
use chromacast_common::error::{ChromaError, ChromaResult};
use chromacast_render::{compose, FrameSink};

use crate::shared::SharedFrameState;

/// How long the render loop waits between polls while the pipeline
/// has nothing to show yet.
const RENDER_POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Configuration for a color pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Screen region to capture.
    pub region: CaptureRegion,

    /// Number of dominant color clusters (K).
    pub colors: usize,

    /// Analysis runs once per this many analysis-loop iterations (N).
    pub analysis_interval: u32,

    /// EMA blend factor in (0, 1].
    pub smoothing_alpha: f32,

    /// Optional pause between captures. The default is `None`, which
    /// matches the unthrottled capture loop of the original behavior;
    /// set it to cap capture CPU usage in long-running setups.
    pub capture_delay: Option<Duration>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            region: CaptureRegion::default(),
            colors: 3,
            analysis_interval: 30,
            smoothing_alpha: 0.3,
            capture_delay: None,
        }
    }
}

impl PipelineConfig {
    /// Validate every parameter before any loop starts.
    pub fn validate(&self) -> ChromaResult<()> {
        if self.region.width == 0 || self.region.height == 0 {
            return Err(ChromaError::config(format!(
                "Capture region must be non-empty, got {}x{}",
                self.region.width, self.region.height
            )));
        }
        FrameThrottle::new(self.analysis_interval)?;
        ColorExtractor::new(self.colors)?;
        ColorSmoother::new(self.colors, self.smoothing_alpha)?;
        Ok(())
    }
}

/// The capture → analyze → smooth → render pipeline.
///
/// [`run`](ColorPipeline::run) drives the render loop on the calling
/// thread and spawns the capture and analysis loops; the three share
/// only the [`SharedFrameState`] cell and a stop flag. The renderer
/// owns the stop signal: a stop request from the sink (or a fatal
/// error in any loop) makes every loop exit within one iteration.
pub struct ColorPipeline {
    config: PipelineConfig,
    shared: Arc<SharedFrameState>,
    stop: Arc<AtomicBool>,
}

impl ColorPipeline {
    /// Create a pipeline, rejecting invalid configuration up front.
    pub fn new(config: PipelineConfig) -> ChromaResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            shared: Arc::new(SharedFrameState::new()),
            stop: Arc::new(AtomicBool::new(false)),
        })
    }

    /// The shared state cell (readable while and after the run).
    pub fn shared(&self) -> Arc<SharedFrameState> {
        self.shared.clone()
    }

    /// Run until the sink requests a stop or a fatal error occurs.
    ///
    /// Fatal errors name the loop they came from; extractor and
    /// smoother errors on individual ticks are logged and skipped.
    pub fn run(
        self,
        capturer: Box<dyn ScreenCapturer>,
        sink: &mut dyn FrameSink,
    ) -> ChromaResult<()> {
        tracing::info!(
            colors = self.config.colors,
            interval = self.config.analysis_interval,
            alpha = self.config.smoothing_alpha,
            width = self.config.region.width,
            height = self.config.region.height,
            "Starting color pipeline"
        );

        let throttle = FrameThrottle::new(self.config.analysis_interval)?;
        let extractor = ColorExtractor::new(self.config.colors)?;
        let smoother = ColorSmoother::new(self.config.colors, self.config.smoothing_alpha)?;

        let capture_handle = {
            let shared = self.shared.clone();
            let stop = self.stop.clone();
            let delay = self.config.capture_delay;
            thread::Builder::new()
                .name("chromacast-capture".into())
                .spawn(move || capture_loop(capturer, &shared, &stop, delay))?
        };

        let analysis_handle = {
            let shared = self.shared.clone();
            let stop = self.stop.clone();
            thread::Builder::new()
                .name("chromacast-analysis".into())
                .spawn(move || analysis_loop(throttle, extractor, smoother, &shared, &stop))?
        };

        let render_result = render_loop(&self.shared, &self.stop, sink);

        // The render loop has exited; make sure the others do too.
        self.stop.store(true, Ordering::SeqCst);

        let capture_result = capture_handle
            .join()
            .map_err(|_| ChromaError::capture("Capture loop panicked"))?;
        analysis_handle
            .join()
            .map_err(|_| ChromaError::analysis("Analysis loop panicked"))?;

        capture_result?;
        render_result?;

        tracing::info!("Color pipeline stopped");
        Ok(())
    }
}

/// Capture loop: grab frames as fast as allowed and publish each one.
///
/// Frames are never queued; if analysis is slower than capture the
/// intervening frames are silently dropped. A capture failure is
/// fatal and stops the whole pipeline.
fn capture_loop(
    mut capturer: Box<dyn ScreenCapturer>,
    shared: &SharedFrameState,
    stop: &AtomicBool,
    delay: Option<Duration>,
) -> ChromaResult<()> {
    let mut frames = 0u64;
    while !stop.load(Ordering::SeqCst) {
        match capturer.capture() {
            Ok(frame) => {
                shared.publish_frame(frame);
                frames += 1;
            }
            Err(e) => {
                tracing::error!(error = %e, "Capture failed; stopping pipeline");
                stop.store(true, Ordering::SeqCst);
                return Err(ChromaError::capture(format!("Capture loop failed: {e}")));
            }
        }
        if let Some(delay) = delay {
            thread::sleep(delay);
        }
    }
    tracing::debug!(frames, "Capture loop exited");
    Ok(())
}

/// Analysis loop: on every N-th iteration, extract and smooth the
/// dominant colors of the latest frame.
///
/// A missing frame is transient (capture simply hasn't produced one
/// yet) and skips the tick. Extraction or smoothing errors skip the
/// tick too — they are never fatal to the loop.
fn analysis_loop(
    mut throttle: FrameThrottle,
    extractor: ColorExtractor,
    mut smoother: ColorSmoother,
    shared: &SharedFrameState,
    stop: &AtomicBool,
) {
    let mut ticks = 0u64;
    while !stop.load(Ordering::SeqCst) {
        if !throttle.tick() {
            continue;
        }
        let Some(frame) = shared.latest_frame() else {
            continue;
        };
        match extractor
            .extract(&frame)
            .and_then(|sample| smoother.update(&sample))
        {
            Ok(colors) => {
                shared.publish_colors(colors);
                ticks += 1;
            }
            Err(e) => tracing::warn!(error = %e, "Analysis tick skipped"),
        }
    }
    tracing::debug!(ticks, "Analysis loop exited");
}

/// Render loop: compose and show the latest frame and colors, poll
/// the sink for a stop request, and fan the stop signal out.
fn render_loop(
    shared: &SharedFrameState,
    stop: &AtomicBool,
    sink: &mut dyn FrameSink,
) -> ChromaResult<()> {
    let mut fps = FpsCounter::new();
    while !stop.load(Ordering::SeqCst) {
        match (shared.latest_frame(), shared.latest_colors()) {
            (Some(frame), Some(colors)) => {
                fps.tick();
                let out = compose(frame.image(), &colors.colors(), &fps.label());
                if let Err(e) = sink.show(&out) {
                    stop.store(true, Ordering::SeqCst);
                    return Err(ChromaError::render(format!("Render loop failed: {e}")));
                }
            }
            _ => thread::sleep(RENDER_POLL_INTERVAL),
        }

        if sink.stop_requested() {
            tracing::info!("Stop requested; shutting down pipeline");
            stop.store(true, Ordering::SeqCst);
        }
    }
    Ok(())
}
