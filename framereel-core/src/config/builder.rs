// ============================================================================
// framereel-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for BatchConfig
//
// Fluent construction of BatchConfig instances. Every field starts at the
// default constant from the parent module, so a bare `build()` reproduces the
// original fixed behaviour.

use std::path::PathBuf;

use super::{
    BatchConfig, DEFAULT_ENCODER_INPUT_PATTERN, DEFAULT_END_FRAME, DEFAULT_FILL_COLOR,
    DEFAULT_FRAME_RATE, DEFAULT_IMAGE_TOOL, DEFAULT_OUTPUT_VIDEO, DEFAULT_PIXEL_FORMAT,
    DEFAULT_PREFIX, DEFAULT_START_FRAME, DEFAULT_SUFFIX, DEFAULT_VIDEO_TOOL, DEFAULT_WORK_DIR,
    FailurePolicy,
};
use crate::naming::FrameRange;

/// Builder for creating [`BatchConfig`] instances.
///
/// ```rust
/// use framereel_core::config::BatchConfigBuilder;
///
/// let config = BatchConfigBuilder::new()
///     .work_dir("/tmp/frames")
///     .add_prefix("left.")
///     .add_prefix("right.")
///     .frame_rate(30)
///     .build();
/// assert_eq!(config.prefixes, vec!["left.", "right."]);
/// ```
#[derive(Debug, Clone)]
pub struct BatchConfigBuilder {
    work_dir: PathBuf,
    prefixes: Option<Vec<String>>,
    suffix: String,
    frame_range: FrameRange,
    encoder_input_pattern: String,
    output_video: String,
    frame_rate: u32,
    pixel_format: String,
    border_color: String,
    background: String,
    image_tool: String,
    video_tool: String,
    trim_failure: FailurePolicy,
    encode_failure: FailurePolicy,
}

impl Default for BatchConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            work_dir: PathBuf::from(DEFAULT_WORK_DIR),
            prefixes: None,
            suffix: DEFAULT_SUFFIX.to_string(),
            frame_range: FrameRange::new(DEFAULT_START_FRAME, DEFAULT_END_FRAME),
            encoder_input_pattern: DEFAULT_ENCODER_INPUT_PATTERN.to_string(),
            output_video: DEFAULT_OUTPUT_VIDEO.to_string(),
            frame_rate: DEFAULT_FRAME_RATE,
            pixel_format: DEFAULT_PIXEL_FORMAT.to_string(),
            border_color: DEFAULT_FILL_COLOR.to_string(),
            background: DEFAULT_FILL_COLOR.to_string(),
            image_tool: DEFAULT_IMAGE_TOOL.to_string(),
            video_tool: DEFAULT_VIDEO_TOOL.to_string(),
            trim_failure: FailurePolicy::Continue,
            encode_failure: FailurePolicy::Abort,
        }
    }

    #[must_use]
    pub fn work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = dir.into();
        self
    }

    /// Replaces the whole prefix list.
    #[must_use]
    pub fn prefixes(mut self, prefixes: Vec<String>) -> Self {
        self.prefixes = Some(prefixes);
        self
    }

    /// Appends a prefix. The first call discards the default prefix.
    #[must_use]
    pub fn add_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefixes.get_or_insert_with(Vec::new).push(prefix.into());
        self
    }

    #[must_use]
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    #[must_use]
    pub fn frame_range(mut self, start: u32, end: u32) -> Self {
        self.frame_range = FrameRange::new(start, end);
        self
    }

    #[must_use]
    pub fn encoder_input_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.encoder_input_pattern = pattern.into();
        self
    }

    #[must_use]
    pub fn output_video(mut self, name: impl Into<String>) -> Self {
        self.output_video = name.into();
        self
    }

    #[must_use]
    pub fn frame_rate(mut self, fps: u32) -> Self {
        self.frame_rate = fps;
        self
    }

    #[must_use]
    pub fn pixel_format(mut self, pix_fmt: impl Into<String>) -> Self {
        self.pixel_format = pix_fmt.into();
        self
    }

    /// Sets both the trim border color and the flatten background.
    #[must_use]
    pub fn fill_color(mut self, color: impl Into<String>) -> Self {
        let color = color.into();
        self.border_color = color.clone();
        self.background = color;
        self
    }

    #[must_use]
    pub fn image_tool(mut self, program: impl Into<String>) -> Self {
        self.image_tool = program.into();
        self
    }

    #[must_use]
    pub fn video_tool(mut self, program: impl Into<String>) -> Self {
        self.video_tool = program.into();
        self
    }

    #[must_use]
    pub fn trim_failure(mut self, policy: FailurePolicy) -> Self {
        self.trim_failure = policy;
        self
    }

    #[must_use]
    pub fn encode_failure(mut self, policy: FailurePolicy) -> Self {
        self.encode_failure = policy;
        self
    }

    /// Builds the configuration. Call [`BatchConfig::validate`] before running it.
    #[must_use]
    pub fn build(self) -> BatchConfig {
        BatchConfig {
            work_dir: self.work_dir,
            prefixes: self
                .prefixes
                .unwrap_or_else(|| vec![DEFAULT_PREFIX.to_string()]),
            suffix: self.suffix,
            frame_range: self.frame_range,
            encoder_input_pattern: self.encoder_input_pattern,
            output_video: self.output_video,
            frame_rate: self.frame_rate,
            pixel_format: self.pixel_format,
            border_color: self.border_color,
            background: self.background,
            image_tool: self.image_tool,
            video_tool: self.video_tool,
            trim_failure: self.trim_failure,
            encode_failure: self.encode_failure,
        }
    }
}
