//! Chromacast Capture
//!
//! Grabs the configured screen region as RGB frames. The engine talks
//! to capture through the [`ScreenCapturer`] trait so tests can feed
//! synthetic frames; [`MonitorCapturer`] is the real xcap-backed
//! implementation.

pub mod capturer;
pub mod frame;

pub use capturer::*;
pub use frame::*;
