//! Implementation of the conversion run.
//!
//! Checks the external tools, builds the core configuration from the CLI
//! arguments, runs the batch with real tools and prints a summary.

use crate::cli::Cli;
use crate::error::CliResult;
use crate::progress::TerminalProgress;

use framereel_core::external::{MagickTool, SidecarSpawner, check_dependency};
use framereel_core::{BatchConfig, BatchReport, CoreError, format_duration, run_batch};

use log::{info, warn};

/// Fails early if either external tool cannot be started.
fn check_tools(config: &BatchConfig) -> CliResult<()> {
    check_dependency(&config.image_tool)?;
    check_dependency(&config.video_tool)?;
    Ok(())
}

/// Logs a per-prefix summary of the run.
pub fn log_summary(report: &BatchReport) {
    info!("========================================");
    info!("Run Summary:");
    info!("========================================");
    if !report.cleaned_files.is_empty() {
        info!("Removed stale files: {}", report.cleaned_files.len());
    }
    for prefix in &report.prefixes {
        info!("{}", prefix.prefix);
        info!("  Frames trimmed: {}/{}", prefix.frames_trimmed(), prefix.frames_attempted);
        if !prefix.failed_frames.is_empty() {
            warn!("  Failed frames:  {:?}", prefix.failed_frames);
        }
        if prefix.encode.is_success() {
            info!("  Video:          {}", prefix.output_video.display());
        } else {
            warn!("  Video:          encoding failed (exit {})", prefix.encode.exit_code());
        }
    }
    info!("Total time: {}", format_duration(report.elapsed.as_secs_f64()));
    info!("========================================");
}

/// Runs the batch described by `cli` and returns the process exit code.
pub fn run_convert(cli: &Cli) -> CliResult<i32> {
    info!("framereel run started: {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));

    let config = cli.to_config();
    config.validate()?;

    if cli.skip_dependency_check {
        info!("Skipping external tool check");
    } else {
        check_tools(&config)?;
    }

    let mut progress = TerminalProgress::new();
    let report = run_batch(&config, &MagickTool, &SidecarSpawner, &mut progress)?;

    log_summary(&report);
    if cli.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| CoreError::OperationFailed(format!("serializing run report: {e}")))?;
        println!("{json}");
    }

    Ok(report.exit_code())
}
