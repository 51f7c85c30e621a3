//! Start the live color pipeline.

use std::time::Duration;

use chromacast_capture::{CaptureRegion, MonitorCapturer};
use chromacast_engine::{ColorPipeline, PipelineConfig};
use chromacast_render::WindowSink;

#[allow(clippy::too_many_arguments)]
pub fn run(
    top: u32,
    left: u32,
    width: u32,
    height: u32,
    colors: usize,
    interval: u32,
    alpha: f32,
    capture_delay_ms: Option<u64>,
) -> anyhow::Result<()> {
    let region = CaptureRegion {
        top,
        left,
        width,
        height,
    };
    let config = PipelineConfig {
        region,
        colors,
        analysis_interval: interval,
        smoothing_alpha: alpha,
        capture_delay: capture_delay_ms.map(Duration::from_millis),
    };

    println!("Starting color pipeline");
    println!("  Region: {width}x{height} at ({left},{top})");
    println!("  Colors: {colors}");
    println!("  Analysis interval: every {interval} ticks");
    println!("  Smoothing alpha: {alpha}");
    println!();

    let pipeline = ColorPipeline::new(config)?;
    let capturer = MonitorCapturer::new(region)?;
    let mut sink = WindowSink::new("Chromacast");

    println!("Close the window or press Escape/Q to stop...");
    println!();

    pipeline.run(Box::new(capturer), &mut sink)?;

    println!("Pipeline stopped.");
    Ok(())
}
