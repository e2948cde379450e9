//! Command implementations for the CLI.

/// The batch conversion run: trim every frame, then assemble the video.
pub mod convert;
