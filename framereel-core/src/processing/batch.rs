// ============================================================================
// framereel-core/src/processing/batch.rs
// ============================================================================
//
// FRAME BATCH CONVERTER: Main orchestration loop
//
// WORKFLOW:
// 1. Validate the configuration and resolve the working directory
// 2. Remove stale noborder files (destructive)
// 3. For each prefix, in order:
//    a. Trim every frame of the range, reporting progress after each one
//    b. Assemble the numbered sequence into a video once
// 4. Return a BatchReport
//
// Tool failures are applied against the configured FailurePolicy: Continue
// records them in the report, Abort ends the run with CoreError::ToolFailed.
//
// AI-ASSISTANT-INFO: Main batch orchestration module

// ---- Internal crate imports ----
use crate::config::{BatchConfig, FailurePolicy};
use crate::error::{CoreResult, tool_failed_error};
use crate::external::{FfmpegSpawner, ImageTool, TrimJob, run_encode};
use crate::naming::{encoder_pattern_matches_prefix, noborder_filename, source_filename};
use crate::progress::{FrameProgress, ProgressReporter};
use crate::reporting::{BatchReport, EncodeOutcome, PrefixReport};
use crate::utils::format_duration;
use crate::workspace::{clean_noborder_files, resolve_work_dir};

// ---- External crate imports ----
use log::{debug, error, info, warn};

// ---- Standard library imports ----
use std::path::Path;
use std::time::Instant;

/// Runs the whole batch: cleanup, per-frame trims and one encode per prefix.
///
/// Generic over the external tool seams so tests can inject mocks:
/// - `I`: [`ImageTool`] used for the per-frame trim
/// - `S`: [`FfmpegSpawner`] used for the encode step
/// - `P`: [`ProgressReporter`] receiving per-frame progress
///
/// An empty (inverted) frame range trims nothing but still runs the encoder.
///
/// # Examples
///
/// ```rust,no_run
/// use framereel_core::config::BatchConfig;
/// use framereel_core::external::{MagickTool, SidecarSpawner};
/// use framereel_core::progress::NoProgress;
/// use framereel_core::run_batch;
///
/// let config = BatchConfig::default();
/// let report = run_batch(&config, &MagickTool, &SidecarSpawner, &mut NoProgress)?;
/// std::process::exit(report.exit_code());
/// # Ok::<(), framereel_core::CoreError>(())
/// ```
pub fn run_batch<I, S, P>(
    config: &BatchConfig,
    image_tool: &I,
    spawner: &S,
    reporter: &mut P,
) -> CoreResult<BatchReport>
where
    I: ImageTool,
    S: FfmpegSpawner,
    P: ProgressReporter + ?Sized,
{
    let run_start = Instant::now();
    let started_at = chrono::Local::now().to_rfc3339();

    config.validate()?;
    let work_dir = resolve_work_dir(&config.work_dir)?;
    info!("Working directory: {}", work_dir.display());

    let cleaned_files = clean_noborder_files(&work_dir)?;

    let mut prefixes = Vec::with_capacity(config.prefixes.len());
    for prefix in &config.prefixes {
        let failed_frames = trim_frames(config, &work_dir, prefix, image_tool, reporter)?;

        if !encoder_pattern_matches_prefix(&config.encoder_input_pattern, prefix, &config.suffix) {
            warn!(
                "Encoder input pattern '{}' does not match the frames written for prefix '{}'; \
                 the video is assembled from whatever files the pattern selects",
                config.encoder_input_pattern, prefix
            );
        }

        let encode = encode_video(config, &work_dir, spawner)?;
        prefixes.push(PrefixReport {
            prefix: prefix.clone(),
            frames_attempted: config.frame_range.len(),
            failed_frames,
            encode,
            output_video: work_dir.join(&config.output_video),
        });
    }

    let elapsed = run_start.elapsed();
    info!("Batch finished in {}", format_duration(elapsed.as_secs_f64()));

    Ok(BatchReport {
        work_dir,
        started_at,
        cleaned_files,
        prefixes,
        elapsed,
    })
}

/// Trims every frame of the range for one prefix. Returns the failed indices.
fn trim_frames<I, P>(
    config: &BatchConfig,
    work_dir: &Path,
    prefix: &str,
    image_tool: &I,
    reporter: &mut P,
) -> CoreResult<Vec<u32>>
where
    I: ImageTool,
    P: ProgressReporter + ?Sized,
{
    let range = config.frame_range;
    info!("Processing prefix '{}' ({} frames)", prefix, range.len());
    reporter.on_prefix_start(prefix, range.len());

    let mut failed = Vec::new();
    for index in range.iter() {
        let job = TrimJob {
            program: config.image_tool.clone(),
            work_dir: work_dir.to_path_buf(),
            input: source_filename(prefix, index, &config.suffix),
            output: noborder_filename(prefix, index, &config.suffix),
            border_color: config.border_color.clone(),
            background: config.background.clone(),
        };
        debug!("Trimming {} -> {}", job.input, job.output);

        match image_tool.trim(&job) {
            Ok(status) if status.success() => {}
            Ok(status) => {
                error!("{} failed on {}: {}", config.image_tool, job.input, status);
                if config.trim_failure == FailurePolicy::Abort {
                    return Err(tool_failed_error(
                        config.image_tool.as_str(),
                        status,
                        format!("trimming {}", job.input),
                    ));
                }
                failed.push(index);
            }
            Err(e) => {
                error!("Could not run {} on {}: {}", config.image_tool, job.input, e);
                if config.trim_failure == FailurePolicy::Abort {
                    return Err(e);
                }
                failed.push(index);
            }
        }

        reporter.on_frame(&FrameProgress {
            prefix: prefix.to_string(),
            index,
            start: range.start,
            end: range.end,
        });
    }

    reporter.on_prefix_done(prefix);
    if !failed.is_empty() {
        warn!("{} of {} frame(s) failed to trim for prefix '{}'", failed.len(), range.len(), prefix);
    }
    Ok(failed)
}

/// Runs the encoder once and applies the encode failure policy.
fn encode_video<S: FfmpegSpawner>(
    config: &BatchConfig,
    work_dir: &Path,
    spawner: &S,
) -> CoreResult<EncodeOutcome> {
    info!("Encoding {} at {} fps", config.output_video, config.frame_rate);

    match run_encode(spawner, config, work_dir) {
        Ok(status) if status.success() => {
            info!("Wrote {}", work_dir.join(&config.output_video).display());
            Ok(EncodeOutcome::Succeeded)
        }
        Ok(status) => {
            error!("{} failed: {}", config.video_tool, status);
            if config.encode_failure == FailurePolicy::Abort {
                return Err(tool_failed_error(
                    config.video_tool.as_str(),
                    status,
                    format!("encoding {}", config.output_video),
                ));
            }
            Ok(EncodeOutcome::Failed { code: status.code() })
        }
        Err(e) => {
            error!("Could not run {}: {}", config.video_tool, e);
            if config.encode_failure == FailurePolicy::Abort {
                return Err(e);
            }
            Ok(EncodeOutcome::Failed { code: None })
        }
    }
}
