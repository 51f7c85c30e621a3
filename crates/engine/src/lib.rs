//! Chromacast Engine
//!
//! Runs the capture → analyze → smooth → render pipeline as three
//! independent loops over one shared single-slot state cell.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────┐            ┌──────────────────────────┐
//! │  capture loop  │── frame ──▶│                          │
//! │  (thread)      │            │    SharedFrameState      │
//! └────────────────┘            │  latest frame / colors   │
//! ┌────────────────┐            │  (last-writer-wins)      │
//! │ analysis loop  │◀─ frame ───│                          │
//! │  (thread)      │── colors ─▶│                          │
//! └────────────────┘            └────────────┬─────────────┘
//! ┌────────────────┐                         │
//! │  render loop   │◀── frame + colors ──────┘
//! │ (caller thread)│── stop signal ──▶ all loops
//! └────────────────┘
//! ```
//!
//! No loop blocks another: frames the analysis loop misses are simply
//! overwritten, and a reader may see smoothed colors computed from an
//! older frame than the one currently visible.

pub mod session;
pub mod shared;

pub use session::{ColorPipeline, PipelineConfig};
pub use shared::SharedFrameState;
