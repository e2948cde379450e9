//! Configuration structures and constants for the framereel-core library.
//!
//! This module replaces the inline constants of a one-off conversion script
//! with an explicit [`BatchConfig`] that is passed into the batch routine.
//! The defaults reproduce the original fixed behaviour exactly.

mod builder;

use std::path::PathBuf;

use crate::error::{CoreError, CoreResult};
use crate::naming::FrameRange;

pub use builder::BatchConfigBuilder;

// Default constants

/// Working directory holding the source frames, relative to the invocation directory.
pub const DEFAULT_WORK_DIR: &str = "../fig";

/// Default frame filename prefix.
pub const DEFAULT_PREFIX: &str = "test.";

/// Default image file suffix (without the dot).
pub const DEFAULT_SUFFIX: &str = "png";

/// First frame index processed (inclusive).
pub const DEFAULT_START_FRAME: u32 = 0;

/// Last frame index processed (inclusive).
pub const DEFAULT_END_FRAME: u32 = 24;

/// printf-style input pattern handed to the video encoder.
///
/// This is deliberately independent of the prefix list; see
/// [`crate::naming::encoder_pattern_matches_prefix`].
pub const DEFAULT_ENCODER_INPUT_PATTERN: &str = "frame.noborder.%04d.png";

/// Output video file name, written into the working directory.
pub const DEFAULT_OUTPUT_VIDEO: &str = "output.mp4";

/// Output frame rate of the assembled video.
pub const DEFAULT_FRAME_RATE: u32 = 15;

/// Pixel format forced on the encoder output (4:2:0 chroma subsampling).
pub const DEFAULT_PIXEL_FORMAT: &str = "yuv420p";

/// Border color and flatten background used by the trim step.
pub const DEFAULT_FILL_COLOR: &str = "white";

/// Image transform tool executable.
pub const DEFAULT_IMAGE_TOOL: &str = "convert";

/// Video encoder executable.
pub const DEFAULT_VIDEO_TOOL: &str = "ffmpeg";

/// What the batch loop does when an external tool reports failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Record the failure and keep going.
    Continue,
    /// Stop the batch and return the failure as an error.
    Abort,
}

/// Main configuration structure for a batch run.
///
/// Created by the consumer (usually the CLI) and passed to
/// [`crate::processing::run_batch`].
///
/// # Examples
///
/// ```rust
/// use framereel_core::config::{BatchConfigBuilder, FailurePolicy};
///
/// let config = BatchConfigBuilder::new()
///     .work_dir("frames")
///     .prefixes(vec!["run1.".to_string()])
///     .frame_range(0, 99)
///     .trim_failure(FailurePolicy::Abort)
///     .build();
///
/// assert_eq!(config.frame_range.len(), 100);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct BatchConfig {
    // ---- Paths ----
    /// Directory holding source frames; all outputs are written here too
    pub work_dir: PathBuf,

    // ---- Frame selection ----
    /// Filename families to process, in order
    pub prefixes: Vec<String>,

    /// Image file suffix without the leading dot
    pub suffix: String,

    /// Inclusive frame index range
    pub frame_range: FrameRange,

    // ---- Encoder settings ----
    /// printf-style numbered input pattern for the encoder
    pub encoder_input_pattern: String,

    /// Output video file name
    pub output_video: String,

    /// Output frame rate
    pub frame_rate: u32,

    /// Output pixel format, applied through a `format=` filter
    pub pixel_format: String,

    // ---- Trim settings ----
    /// Border color used when trimming
    pub border_color: String,

    /// Background that transparency is flattened onto
    pub background: String,

    // ---- External tools ----
    /// Image transform executable
    pub image_tool: String,

    /// Video encoder executable
    pub video_tool: String,

    // ---- Failure handling ----
    /// Policy for a failing trim invocation
    pub trim_failure: FailurePolicy,

    /// Policy for a failing encoder invocation
    pub encode_failure: FailurePolicy,
}

impl Default for BatchConfig {
    fn default() -> Self {
        BatchConfigBuilder::new().build()
    }
}

impl BatchConfig {
    /// Checks the configuration for values that cannot produce a meaningful run.
    ///
    /// An inverted frame range is accepted: it simply selects no frames.
    pub fn validate(&self) -> CoreResult<()> {
        if self.prefixes.is_empty() {
            return Err(CoreError::Config(
                "at least one frame prefix is required".to_string(),
            ));
        }
        if self.suffix.is_empty() || self.suffix.starts_with('.') {
            return Err(CoreError::Config(format!(
                "invalid file suffix '{}' (expected e.g. 'png')",
                self.suffix
            )));
        }
        if self.frame_rate == 0 {
            return Err(CoreError::Config(
                "frame rate must be greater than zero".to_string(),
            ));
        }
        if !has_frame_placeholder(&self.encoder_input_pattern) {
            return Err(CoreError::Config(format!(
                "encoder input pattern '{}' has no %d/%0Nd frame placeholder",
                self.encoder_input_pattern
            )));
        }
        if self.output_video.is_empty() {
            return Err(CoreError::Config(
                "output video name must not be empty".to_string(),
            ));
        }
        if self.image_tool.is_empty() || self.video_tool.is_empty() {
            return Err(CoreError::Config(
                "external tool names must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// True if `pattern` contains a `%d` or `%0Nd` placeholder.
fn has_frame_placeholder(pattern: &str) -> bool {
    let mut rest = pattern;
    while let Some(pos) = rest.find('%') {
        let tail = &rest[pos + 1..];
        let digits = tail.chars().take_while(char::is_ascii_digit).count();
        if tail[digits..].starts_with('d') {
            return true;
        }
        rest = tail;
    }
    false
}
