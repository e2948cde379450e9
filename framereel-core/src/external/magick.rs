//! Per-frame trim and flatten through ImageMagick.
//!
//! The tool's own stdout/stderr are inherited so its diagnostics reach the
//! terminal unchanged. A non-zero exit status is returned, not turned into an
//! error; the batch loop decides what a failed frame means.

use crate::error::{CoreResult, command_start_error, command_wait_error};

use std::path::PathBuf;
use std::process::{Command, ExitStatus};

/// One trim invocation: `<input> -trim +repage -bordercolor C -background C -flatten <output>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrimJob {
    /// Executable to run (e.g. `convert` or `magick`)
    pub program: String,
    /// Directory the tool runs in; input and output are relative to it
    pub work_dir: PathBuf,
    pub input: String,
    pub output: String,
    pub border_color: String,
    pub background: String,
}

impl TrimJob {
    /// Command-line arguments, in the order ImageMagick applies them.
    #[must_use]
    pub fn args(&self) -> Vec<String> {
        vec![
            self.input.clone(),
            "-trim".to_string(),
            "+repage".to_string(),
            "-bordercolor".to_string(),
            self.border_color.clone(),
            "-background".to_string(),
            self.background.clone(),
            "-flatten".to_string(),
            self.output.clone(),
        ]
    }
}

/// Something that can run a [`TrimJob`] to completion.
pub trait ImageTool {
    /// Runs the job, blocking until the tool exits.
    ///
    /// `Err` means the tool could not be run at all; a tool that ran and
    /// failed yields `Ok` with an unsuccessful status.
    fn trim(&self, job: &TrimJob) -> CoreResult<ExitStatus>;
}

/// [`ImageTool`] backed by a real ImageMagick process.
#[derive(Debug, Clone, Default)]
pub struct MagickTool;

impl ImageTool for MagickTool {
    fn trim(&self, job: &TrimJob) -> CoreResult<ExitStatus> {
        let mut cmd = Command::new(&job.program);
        cmd.args(job.args()).current_dir(&job.work_dir);
        log::debug!("Running trim command: {:?}", cmd);

        let mut child = cmd
            .spawn()
            .map_err(|e| command_start_error(job.program.as_str(), e))?;
        child
            .wait()
            .map_err(|e| command_wait_error(job.program.as_str(), e))
    }
}
