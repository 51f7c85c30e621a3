//! Single-slot state shared by the three pipeline loops.

use std::sync::{Arc, Mutex, MutexGuard};

use chromacast_analysis::SmoothedColorSet;
use chromacast_capture::Frame;

/// Holds the most recent frame and the most recent smoothed colors.
///
/// Each field is an independent overwrite slot: publishing replaces
/// whatever is there (last-writer-wins, no queue), and reading clones
/// out the latest value. The two fields are guarded separately, so a
/// reader may observe colors computed from an older frame than the
/// one currently stored — an accepted eventual-consistency property,
/// not a bug.
#[derive(Debug, Default)]
pub struct SharedFrameState {
    frame: Mutex<Option<Arc<Frame>>>,
    colors: Mutex<Option<SmoothedColorSet>>,
}

impl SharedFrameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored frame with a newer capture.
    pub fn publish_frame(&self, frame: Frame) {
        *lock(&self.frame) = Some(Arc::new(frame));
    }

    /// The most recent frame, if any capture has completed yet.
    pub fn latest_frame(&self) -> Option<Arc<Frame>> {
        lock(&self.frame).clone()
    }

    /// Replace the stored smoothed colors.
    pub fn publish_colors(&self, colors: SmoothedColorSet) {
        *lock(&self.colors) = Some(colors);
    }

    /// The most recent smoothed colors, if any analysis tick has run.
    pub fn latest_colors(&self) -> Option<SmoothedColorSet> {
        lock(&self.colors).clone()
    }
}

/// Slot writes are single assignments, so a poisoned lock still holds
/// a consistent value; recover it rather than propagate the panic.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chromacast_analysis::{ColorExtractor, ColorSmoother};

    #[test]
    fn test_slots_start_empty() {
        let shared = SharedFrameState::new();
        assert!(shared.latest_frame().is_none());
        assert!(shared.latest_colors().is_none());
    }

    #[test]
    fn test_frame_slot_is_last_writer_wins() {
        let shared = SharedFrameState::new();
        shared.publish_frame(Frame::solid(4, 4, [1, 1, 1]));
        shared.publish_frame(Frame::solid(4, 4, [2, 2, 2]));

        let frame = shared.latest_frame().unwrap();
        assert_eq!(frame.image().get_pixel(0, 0).0, [2, 2, 2]);
    }

    #[test]
    fn test_fields_are_independent() {
        let shared = SharedFrameState::new();
        shared.publish_frame(Frame::solid(4, 4, [5, 5, 5]));
        assert!(shared.latest_colors().is_none());

        let sample = ColorExtractor::new(1)
            .unwrap()
            .extract(&Frame::solid(100, 100, [9, 9, 9]))
            .unwrap();
        let colors = ColorSmoother::new(1, 0.5).unwrap().update(&sample).unwrap();
        shared.publish_colors(colors);

        assert!(shared.latest_frame().is_some());
        assert_eq!(shared.latest_colors().unwrap().colors(), vec![[9, 9, 9]]);
    }
}
