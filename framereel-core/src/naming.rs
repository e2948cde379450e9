//! Frame numbering and filename construction.
//!
//! Source frames are named `<prefix><timestamp>.<suffix>` and trimmed frames
//! `<prefix>noborder.<timestamp>.<suffix>`, where the timestamp is the frame
//! index zero-padded to four digits.

/// Marker inserted into the names of trimmed frames.
pub const NOBORDER_MARKER: &str = "noborder";

/// Minimum width of the zero-padded frame timestamp.
pub const TIMESTAMP_WIDTH: usize = 4;

/// An inclusive range of frame indices.
///
/// A range whose end lies before its start is empty rather than invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRange {
    pub start: u32,
    pub end: u32,
}

impl FrameRange {
    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Frame indices in ascending order.
    pub fn iter(&self) -> std::ops::RangeInclusive<u32> {
        self.start..=self.end
    }

    /// Number of frames in the range.
    #[must_use]
    pub fn len(&self) -> u64 {
        if self.end < self.start {
            0
        } else {
            u64::from(self.end - self.start) + 1
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

/// Formats a frame index as a zero-padded timestamp (`7` -> `"0007"`).
///
/// Indices of 10000 and above are wider than four digits; the name simply
/// grows instead of wrapping.
#[must_use]
pub fn frame_timestamp(index: u32) -> String {
    format!("{index:0width$}", width = TIMESTAMP_WIDTH)
}

/// Name of the source image for `index`.
#[must_use]
pub fn source_filename(prefix: &str, index: u32, suffix: &str) -> String {
    format!("{prefix}{}.{suffix}", frame_timestamp(index))
}

/// Name of the trimmed image for `index`.
#[must_use]
pub fn noborder_filename(prefix: &str, index: u32, suffix: &str) -> String {
    format!("{prefix}{NOBORDER_MARKER}.{}.{suffix}", frame_timestamp(index))
}

/// True if `name` carries the noborder marker, i.e. it is a generated file.
#[must_use]
pub fn is_noborder_file(name: &str) -> bool {
    name.contains(NOBORDER_MARKER)
}

/// The encoder input pattern that would pick up exactly the frames produced
/// for `prefix`.
#[must_use]
pub fn expected_encoder_pattern(prefix: &str, suffix: &str) -> String {
    format!("{prefix}{NOBORDER_MARKER}.%0{TIMESTAMP_WIDTH}d.{suffix}")
}

/// Whether the configured encoder pattern matches the trimmed frames of `prefix`.
///
/// The encoder pattern is configured independently of the prefixes and the
/// two are allowed to disagree. Callers only warn on a mismatch.
#[must_use]
pub fn encoder_pattern_matches_prefix(pattern: &str, prefix: &str, suffix: &str) -> bool {
    pattern == expected_encoder_pattern(prefix, suffix)
}
