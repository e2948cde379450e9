// framereel-cli/src/cli.rs
//
// Defines the command-line argument structure using clap.
//
// Every flag is optional and defaults to the core library's constants, so
// running `framereel` with no arguments reproduces the fixed behaviour of the
// original conversion script.

use clap::Parser;
use framereel_core::config::{
    BatchConfig, BatchConfigBuilder, DEFAULT_ENCODER_INPUT_PATTERN, DEFAULT_END_FRAME,
    DEFAULT_FILL_COLOR, DEFAULT_FRAME_RATE, DEFAULT_IMAGE_TOOL, DEFAULT_OUTPUT_VIDEO,
    DEFAULT_PIXEL_FORMAT, DEFAULT_PREFIX, DEFAULT_START_FRAME, DEFAULT_SUFFIX,
    DEFAULT_VIDEO_TOOL, DEFAULT_WORK_DIR, FailurePolicy,
};
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "framereel: trim numbered image frames and assemble them into a video",
    long_about = "Trims and flattens every frame <prefix><NNNN>.<suffix> in the working directory \
                  with ImageMagick, writing <prefix>noborder.<NNNN>.<suffix>, then assembles a \
                  numbered sequence into an MP4 with ffmpeg.\n\n\
                  WARNING: every file whose name contains 'noborder' in the working directory is \
                  deleted before processing starts."
)]
pub struct Cli {
    /// Directory holding the source frames; outputs are written here too
    #[arg(short = 'd', long = "work-dir", value_name = "DIR", default_value = DEFAULT_WORK_DIR)]
    pub work_dir: PathBuf,

    /// Frame filename prefix; repeat to process several frame families in order
    #[arg(short = 'p', long = "prefix", value_name = "PREFIX", default_value = DEFAULT_PREFIX)]
    pub prefixes: Vec<String>,

    /// Image file suffix, without the dot
    #[arg(long, value_name = "EXT", default_value = DEFAULT_SUFFIX)]
    pub suffix: String,

    /// First frame index (inclusive)
    #[arg(long, value_name = "INDEX", default_value_t = DEFAULT_START_FRAME)]
    pub start: u32,

    /// Last frame index (inclusive); below --start selects no frames
    #[arg(long, value_name = "INDEX", default_value_t = DEFAULT_END_FRAME)]
    pub end: u32,

    /// printf-style numbered input pattern passed to the encoder
    #[arg(long, value_name = "PATTERN", default_value = DEFAULT_ENCODER_INPUT_PATTERN)]
    pub pattern: String,

    /// Output video file name (written into the working directory, overwritten if present)
    #[arg(short = 'o', long, value_name = "FILE", default_value = DEFAULT_OUTPUT_VIDEO)]
    pub output: String,

    /// Output frame rate
    #[arg(long, value_name = "FPS", default_value_t = DEFAULT_FRAME_RATE,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub frame_rate: u32,

    /// Output pixel format
    #[arg(long = "pix-fmt", value_name = "FORMAT", default_value = DEFAULT_PIXEL_FORMAT)]
    pub pixel_format: String,

    /// Border color and background used when trimming and flattening
    #[arg(long, value_name = "COLOR", default_value = DEFAULT_FILL_COLOR)]
    pub fill_color: String,

    /// ImageMagick executable used for trimming
    #[arg(long, value_name = "PROGRAM", env = "FRAMEREEL_IMAGE_TOOL", default_value = DEFAULT_IMAGE_TOOL)]
    pub image_tool: String,

    /// ffmpeg executable used for encoding
    #[arg(long, value_name = "PROGRAM", env = "FRAMEREEL_VIDEO_TOOL", default_value = DEFAULT_VIDEO_TOOL)]
    pub video_tool: String,

    /// Stop at the first frame that fails to trim (default: keep going)
    #[arg(long, default_value_t = false)]
    pub abort_on_trim_failure: bool,

    /// Keep going with the next prefix when encoding fails (default: stop)
    #[arg(long, default_value_t = false)]
    pub continue_on_encode_failure: bool,

    /// Do not check that the external tools can be started before running
    #[arg(long, default_value_t = false)]
    pub skip_dependency_check: bool,

    /// Print the run report as JSON on stdout
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Also write a log file into this directory
    #[arg(short, long, value_name = "LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Cli {
    /// Translates the parsed arguments into a core batch configuration.
    pub fn to_config(&self) -> BatchConfig {
        BatchConfigBuilder::new()
            .work_dir(self.work_dir.clone())
            .prefixes(self.prefixes.clone())
            .suffix(self.suffix.clone())
            .frame_range(self.start, self.end)
            .encoder_input_pattern(self.pattern.clone())
            .output_video(self.output.clone())
            .frame_rate(self.frame_rate)
            .pixel_format(self.pixel_format.clone())
            .fill_color(self.fill_color.clone())
            .image_tool(self.image_tool.clone())
            .video_tool(self.video_tool.clone())
            .trim_failure(if self.abort_on_trim_failure {
                FailurePolicy::Abort
            } else {
                FailurePolicy::Continue
            })
            .encode_failure(if self.continue_on_encode_failure {
                FailurePolicy::Continue
            } else {
                FailurePolicy::Abort
            })
            .build()
    }
}
