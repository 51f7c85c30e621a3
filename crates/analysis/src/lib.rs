//! Chromacast Analysis
//!
//! Turns captured frames into smoothed dominant colors:
//! - **ColorExtractor:** k-means clustering over a downsampled frame
//! - **ColorSmoother:** per-slot exponential moving averages
//! - **FrameThrottle:** bounds how often the expensive extraction runs
//!
//! This crate is pure computation — no I/O, no platform dependencies.
//! All inputs are data; all outputs are data.

pub mod extractor;
pub mod smoother;
pub mod throttle;

pub use extractor::{ColorExtractor, ColorSample, WeightedColor};
pub use smoother::{ColorSmoother, SmoothedColorSet};
pub use throttle::FrameThrottle;
