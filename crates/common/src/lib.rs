//! Chromacast Common Utilities
//!
//! Shared infrastructure for all Chromacast crates:
//! - Error types and result aliases
//! - FPS measurement for the render loop
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
