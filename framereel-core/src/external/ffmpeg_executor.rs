// ============================================================================
// framereel-core/src/external/ffmpeg_executor.rs
// ============================================================================
//
// FFMPEG EXECUTOR: FFmpeg Process Management and Abstraction
//
// This module provides abstractions for spawning and interacting with FFmpeg
// processes, plus construction of the single command framereel needs: turning
// a numbered PNG sequence into an MP4.
//
// KEY COMPONENTS:
// - FfmpegProcess: Trait representing an active FFmpeg process
// - FfmpegSpawner: Trait for creating new FFmpeg processes
// - SidecarSpawner: Concrete implementation using ffmpeg-sidecar
// - build_encode_command / run_encode: the frame assembly step
//
// AI-ASSISTANT-INFO: FFmpeg process management and execution abstraction

use crate::config::BatchConfig;
use crate::error::{CoreError, CoreResult, command_start_error, command_wait_error};
use ffmpeg_sidecar::child::FfmpegChild as SidecarChild;
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::{FfmpegEvent, LogLevel};
use std::path::Path;
use std::process::ExitStatus;

// --- FFmpeg Execution Abstraction ---

/// Trait representing an active ffmpeg process instance.
pub trait FfmpegProcess {
    /// Processes events from the running command using a provided handler closure.
    fn handle_events<F>(&mut self, handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>;

    /// Waits for the command to complete and returns its exit status.
    fn wait(&mut self) -> CoreResult<ExitStatus>;
}

/// Trait representing something that can spawn an FfmpegProcess.
pub trait FfmpegSpawner {
    type Process: FfmpegProcess;
    /// Spawns the ffmpeg command, consuming the command object.
    fn spawn(&self, cmd: FfmpegCommand) -> CoreResult<Self::Process>;
}

// --- Concrete Implementation using ffmpeg-sidecar ---

/// Wrapper around `ffmpeg_sidecar::child::FfmpegChild` implementing `FfmpegProcess`.
pub struct SidecarProcess(SidecarChild);

impl FfmpegProcess for SidecarProcess {
    fn handle_events<F>(&mut self, mut handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>,
    {
        let iterator = self.0.iter().map_err(|e| {
            log::error!("Failed to get ffmpeg event iterator: {}", e);
            CoreError::OperationFailed(format!("reading ffmpeg output: {e}"))
        })?;
        for event in iterator {
            handler(event)?;
        }
        Ok(())
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        self.0
            .wait()
            .map_err(|e| command_wait_error("ffmpeg (sidecar)", e))
    }
}

/// Concrete implementation of `FfmpegSpawner` using `ffmpeg-sidecar`.
#[derive(Debug, Clone, Default)]
pub struct SidecarSpawner;

impl FfmpegSpawner for SidecarSpawner {
    type Process = SidecarProcess;

    fn spawn(&self, mut cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        cmd.spawn()
            .map(SidecarProcess)
            .map_err(|e| command_start_error("ffmpeg (sidecar)", e))
    }
}

// --- Frame Assembly ---

/// Builds the command that assembles the numbered frame sequence into a video.
///
/// Equivalent to
/// `ffmpeg -y -i <work_dir>/<pattern> -r <rate> -vf format=<pix_fmt> <work_dir>/<output>`.
/// `-y` makes an existing output file be overwritten without prompting.
pub fn build_encode_command(config: &BatchConfig, work_dir: &Path) -> FfmpegCommand {
    let input = work_dir.join(&config.encoder_input_pattern);
    let output = work_dir.join(&config.output_video);

    let mut cmd = FfmpegCommand::new_with_path(&config.video_tool);
    cmd.overwrite();
    cmd.input(input.to_string_lossy().as_ref());
    cmd.arg("-r");
    cmd.arg(config.frame_rate.to_string());
    cmd.arg("-vf");
    cmd.arg(format!("format={}", config.pixel_format));
    cmd.output(output.to_string_lossy().as_ref());
    cmd
}

/// Runs the encode step and returns ffmpeg's exit status.
///
/// ffmpeg's diagnostics are forwarded to the logger while the process runs.
/// A non-zero exit is returned as a status, not as an error.
pub fn run_encode<S: FfmpegSpawner>(
    spawner: &S,
    config: &BatchConfig,
    work_dir: &Path,
) -> CoreResult<ExitStatus> {
    let cmd = build_encode_command(config, work_dir);
    log::debug!("Running encode command: {:?}", cmd);

    let mut process = spawner.spawn(cmd)?;
    process.handle_events(|event| {
        match event {
            FfmpegEvent::Log(LogLevel::Error | LogLevel::Fatal, line) => {
                log::error!("ffmpeg: {}", line);
            }
            FfmpegEvent::Log(LogLevel::Warning, line) => log::warn!("ffmpeg: {}", line),
            FfmpegEvent::Log(_, line) => log::debug!("ffmpeg: {}", line),
            FfmpegEvent::Error(message) => log::error!("ffmpeg: {}", message),
            FfmpegEvent::Progress(progress) => {
                log::trace!("ffmpeg progress: frame={} fps={}", progress.frame, progress.fps);
            }
            _ => {}
        }
        Ok(())
    })?;

    process.wait()
}
