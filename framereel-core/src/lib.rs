//! Core library for trimming numbered image frames and assembling them into a video.
//!
//! Each frame `<prefix><NNNN>.<suffix>` in the working directory is trimmed
//! and flattened by ImageMagick into `<prefix>noborder.<NNNN>.<suffix>`; once
//! a prefix is done, ffmpeg assembles a numbered sequence into an MP4.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use framereel_core::config::BatchConfigBuilder;
//! use framereel_core::external::{MagickTool, SidecarSpawner};
//! use framereel_core::progress::NoProgress;
//! use framereel_core::run_batch;
//!
//! let config = BatchConfigBuilder::new()
//!     .work_dir("/path/to/fig")
//!     .frame_range(0, 24)
//!     .build();
//! config.validate().unwrap();
//!
//! let report = run_batch(&config, &MagickTool, &SidecarSpawner, &mut NoProgress).unwrap();
//! println!("{} frame(s) failed", report.total_failed_frames());
//! ```

pub mod config;
pub mod error;
pub mod external;
pub mod file_logging;
pub mod naming;
pub mod processing;
pub mod progress;
pub mod reporting;
pub mod utils;
pub mod workspace;

// Re-exports for public API
pub use config::{BatchConfig, BatchConfigBuilder, FailurePolicy};
pub use error::{CoreError, CoreResult};
pub use naming::FrameRange;
pub use processing::run_batch;
pub use progress::{FrameProgress, NoProgress, ProgressReporter};
pub use reporting::{BatchReport, EncodeOutcome, PrefixReport};
pub use utils::format_duration;
