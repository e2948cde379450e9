//! Batch processing orchestration.
//!
//! This module hosts the frame batch converter: the loop that trims every
//! frame of every prefix and assembles the results into a video.

/// Main batch orchestration logic
pub mod batch;

pub use batch::run_batch;
