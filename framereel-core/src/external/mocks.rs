// framereel-core/src/external/mocks.rs

// --- Mocking Infrastructure (for testing) ---

// Compiled for unit tests and when the "test-mocks" feature is enabled.

use super::ffmpeg_executor::{FfmpegProcess, FfmpegSpawner};
use super::magick::{ImageTool, TrimJob};
use crate::error::{CoreError, CoreResult};
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::FfmpegEvent;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::os::unix::process::ExitStatusExt; // For ExitStatus::from_raw
use std::process::ExitStatus;
use std::rc::Rc;

/// Builds an `ExitStatus` whose `code()` is `code`.
pub fn exit_status(code: i32) -> ExitStatus {
    ExitStatus::from_raw(code << 8)
}

/// Mock implementation of ImageTool.
///
/// Every job is recorded. Inputs registered with `fail_input` return the
/// scripted exit code, inputs registered with `unavailable_input` fail to
/// start, everything else succeeds.
#[derive(Clone, Default)]
pub struct MockImageTool {
    jobs: Rc<RefCell<Vec<TrimJob>>>,
    failures: Rc<RefCell<HashMap<String, i32>>>,
    unavailable: Rc<RefCell<HashSet<String>>>,
    create_outputs: bool,
}

impl MockImageTool {
    pub fn new() -> Self {
        Default::default()
    }

    /// Like `new`, but successful jobs write an empty output file.
    pub fn creating_outputs() -> Self {
        Self {
            create_outputs: true,
            ..Default::default()
        }
    }

    pub fn fail_input(&self, input: &str, exit_code: i32) {
        self.failures
            .borrow_mut()
            .insert(input.to_string(), exit_code);
    }

    pub fn unavailable_input(&self, input: &str) {
        self.unavailable.borrow_mut().insert(input.to_string());
    }

    pub fn received_jobs(&self) -> Vec<TrimJob> {
        self.jobs.borrow().clone()
    }
}

impl ImageTool for MockImageTool {
    fn trim(&self, job: &TrimJob) -> CoreResult<ExitStatus> {
        self.jobs.borrow_mut().push(job.clone());

        if self.unavailable.borrow().contains(&job.input) {
            log::warn!("MockImageTool simulating start failure for {}", job.input);
            return Err(CoreError::CommandStart(
                job.program.clone(),
                std::io::Error::new(std::io::ErrorKind::NotFound, "mock start failure"),
            ));
        }
        if let Some(code) = self.failures.borrow().get(&job.input) {
            log::warn!("MockImageTool simulating exit {} for {}", code, job.input);
            return Ok(exit_status(*code));
        }
        if self.create_outputs {
            let path = job.work_dir.join(&job.output);
            if let Err(e) = std::fs::write(&path, b"trimmed") {
                log::error!("MockImageTool failed to create {}: {}", path.display(), e);
            }
        }
        Ok(exit_status(0))
    }
}

/// Mock implementation of FfmpegProcess.
#[derive(Clone)]
pub struct MockFfmpegProcess {
    /// Events to emit when handle_events is called.
    pub events_to_emit: Vec<FfmpegEvent>,
    /// Exit status to return when wait is called.
    pub exit_status: ExitStatus,
}

impl FfmpegProcess for MockFfmpegProcess {
    fn handle_events<F>(&mut self, mut handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>,
    {
        for event in self.events_to_emit.drain(..) {
            handler(event)?;
        }
        Ok(())
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        Ok(self.exit_status)
    }
}

/// Mock implementation of FfmpegSpawner.
///
/// Exit codes queued with `push_exit_code` are consumed one per spawn;
/// once the queue is empty every spawn exits 0.
#[derive(Clone, Default)]
pub struct MockFfmpegSpawner {
    exit_codes: Rc<RefCell<Vec<i32>>>,
    events: Rc<RefCell<Vec<FfmpegEvent>>>,
    received_calls: Rc<RefCell<Vec<Vec<String>>>>,
    create_dummy_output: bool,
}

impl MockFfmpegSpawner {
    pub fn new() -> Self {
        Default::default()
    }

    /// Like `new`, but successful runs create an empty file at the output path.
    pub fn creating_output() -> Self {
        Self {
            create_dummy_output: true,
            ..Default::default()
        }
    }

    pub fn push_exit_code(&self, code: i32) {
        self.exit_codes.borrow_mut().push(code);
    }

    /// Events replayed by every spawned process.
    pub fn set_events(&self, events: Vec<FfmpegEvent>) {
        *self.events.borrow_mut() = events;
    }

    pub fn get_received_calls(&self) -> Vec<Vec<String>> {
        self.received_calls.borrow().clone()
    }
}

impl FfmpegSpawner for MockFfmpegSpawner {
    type Process = MockFfmpegProcess;

    fn spawn(&self, cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        let args: Vec<String> = cmd
            .get_args()
            .map(|s| s.to_string_lossy().into_owned())
            .collect();
        self.received_calls.borrow_mut().push(args.clone());

        let code = {
            let mut codes = self.exit_codes.borrow_mut();
            if codes.is_empty() { 0 } else { codes.remove(0) }
        };

        if code == 0 && self.create_dummy_output {
            if let Some(output_path) = args.last() {
                match std::fs::File::create(output_path) {
                    Ok(_) => log::info!("MockFfmpegSpawner created dummy output file: {}", output_path),
                    Err(e) => log::error!(
                        "MockFfmpegSpawner failed to create dummy output file {}: {}",
                        output_path,
                        e
                    ),
                }
            }
        }

        Ok(MockFfmpegProcess {
            events_to_emit: self.events.borrow().clone(),
            exit_status: exit_status(code),
        })
    }
}
