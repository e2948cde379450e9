//! Run report produced by the batch routine.
//!
//! The report records what happened to every prefix so the CLI can print a
//! summary, emit JSON and pick the process exit code.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// Result of the encode step for one prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EncodeOutcome {
    Succeeded,
    /// `code` is `None` when the encoder could not be started or was killed.
    Failed { code: Option<i32> },
}

impl EncodeOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, EncodeOutcome::Succeeded)
    }

    /// Exit code equivalent of this outcome.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            EncodeOutcome::Succeeded => 0,
            EncodeOutcome::Failed { code: Some(c) } if *c != 0 => *c,
            EncodeOutcome::Failed { .. } => 1,
        }
    }
}

/// Outcome of processing one prefix.
#[derive(Debug, Clone, Serialize)]
pub struct PrefixReport {
    pub prefix: String,
    /// Number of trim invocations made
    pub frames_attempted: u64,
    /// Frame indices whose trim failed or could not be started
    pub failed_frames: Vec<u32>,
    pub encode: EncodeOutcome,
    pub output_video: PathBuf,
}

impl PrefixReport {
    #[must_use]
    pub fn frames_trimmed(&self) -> u64 {
        self.frames_attempted - self.failed_frames.len() as u64
    }
}

/// Outcome of a complete batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub work_dir: PathBuf,
    /// Local start time, RFC 3339
    pub started_at: String,
    /// Stale files removed during setup
    pub cleaned_files: Vec<PathBuf>,
    pub prefixes: Vec<PrefixReport>,
    pub elapsed: Duration,
}

impl BatchReport {
    /// True if no trim failed and every encode succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.prefixes
            .iter()
            .all(|p| p.failed_frames.is_empty() && p.encode.is_success())
    }

    /// Exit code of the run: that of the last encoder invocation, 0 if none ran.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        self.prefixes
            .last()
            .map_or(0, |p| p.encode.exit_code())
    }

    #[must_use]
    pub fn total_failed_frames(&self) -> usize {
        self.prefixes.iter().map(|p| p.failed_frames.len()).sum()
    }
}
