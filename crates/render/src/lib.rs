//! Chromacast Render
//!
//! Composes the visualization shown to the user — the live frame
//! stacked above a strip of K smoothed color blocks with an FPS
//! overlay — and pushes it to a display surface.
//!
//! ```text
//! ┌───────────────────────────┐
//! │      captured frame       │
//! │        FPS: 24.0          │
//! ├────────┬─────────┬────────┤
//! │ color0 │ color1  │ color2 │   ← STRIP_HEIGHT rows
//! └────────┴─────────┴────────┘
//! ```
//!
//! The engine talks to the display through the [`FrameSink`] trait;
//! [`WindowSink`] is the minifb-backed implementation and doubles as
//! the stop-signal source (window closed, Escape, or Q).

pub mod compositor;
pub mod font;
pub mod sink;

pub use compositor::{block_widths, compose, STRIP_HEIGHT};
pub use sink::{FrameSink, WindowSink};
