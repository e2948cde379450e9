//! Progress reporting for the batch loop.
//!
//! The batch routine never touches the terminal. It hands [`FrameProgress`]
//! snapshots to a [`ProgressReporter`], which the CLI implements with an
//! in-place progress bar and tests implement with a recorder.

/// Number of cells between the brackets of a rendered bar.
pub const BAR_WIDTH: usize = 50;

/// Progress snapshot emitted after a frame has been processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameProgress {
    pub prefix: String,
    /// Frame index just processed
    pub index: u32,
    pub start: u32,
    pub end: u32,
}

impl FrameProgress {
    /// Frames advanced past the start of the range (`index - start`).
    #[must_use]
    pub fn done(&self) -> u32 {
        self.index.saturating_sub(self.start)
    }

    /// Span of the range (`end - start`).
    #[must_use]
    pub fn total(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Completed fraction in `0.0..=1.0`; a single-frame range is complete.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        match self.total() {
            0 => 1.0,
            total => f64::from(self.done()) / f64::from(total),
        }
    }

    /// Filled cells of the bar: one per frame advanced, never more than [`BAR_WIDTH`].
    #[must_use]
    pub fn filled_segments(&self) -> usize {
        (self.done() as usize).min(BAR_WIDTH)
    }

    /// Plain-text rendering, e.g. `[##########      ...] 10/24`.
    #[must_use]
    pub fn bar_line(&self) -> String {
        let filled = self.filled_segments();
        format!(
            "[{}{}] {}/{}",
            "#".repeat(filled),
            " ".repeat(BAR_WIDTH - filled),
            self.done(),
            self.total()
        )
    }
}

/// Receives progress notifications from the batch loop.
///
/// All methods default to doing nothing.
pub trait ProgressReporter {
    /// A prefix is about to be processed; `frames` is the number of frames in the range.
    fn on_prefix_start(&mut self, _prefix: &str, _frames: u64) {}

    /// A frame has been processed (successfully or not).
    fn on_frame(&mut self, _progress: &FrameProgress) {}

    /// All frames of a prefix have been processed; encoding follows.
    fn on_prefix_done(&mut self, _prefix: &str) {}
}

/// Reporter that discards all progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(index: u32, start: u32, end: u32) -> FrameProgress {
        FrameProgress {
            prefix: "test.".to_string(),
            index,
            start,
            end,
        }
    }

    #[test]
    fn filled_segments_track_frames_done() {
        assert_eq!(at(0, 0, 24).filled_segments(), 0);
        assert_eq!(at(10, 0, 24).filled_segments(), 10);
        assert_eq!(at(24, 0, 24).filled_segments(), 24);
        assert_eq!(at(107, 100, 124).filled_segments(), 7);
    }

    #[test]
    fn bar_never_overflows_for_long_ranges() {
        for index in [0, 49, 50, 51, 500, 999] {
            let progress = at(index, 0, 999);
            assert!(progress.filled_segments() <= BAR_WIDTH);
            let line = progress.bar_line();
            let inner = &line[1..=BAR_WIDTH];
            assert_eq!(inner.chars().count(), BAR_WIDTH);
            assert_eq!(line.as_bytes()[BAR_WIDTH + 1], b']');
        }
    }

    #[test]
    fn bar_line_shows_counter() {
        let line = at(3, 0, 24).bar_line();
        assert!(line.starts_with("[###   "));
        assert!(line.ends_with("] 3/24"));
    }

    #[test]
    fn fraction_handles_single_frame_range() {
        assert_eq!(at(5, 5, 5).fraction(), 1.0);
        assert_eq!(at(12, 0, 24).fraction(), 0.5);
    }
}
