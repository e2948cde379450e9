// framereel-core/tests/batch_tests.rs

use framereel_core::config::{BatchConfigBuilder, FailurePolicy};
use framereel_core::error::CoreError;
use framereel_core::external::mocks::{MockFfmpegSpawner, MockImageTool};
use framereel_core::progress::{FrameProgress, NoProgress, ProgressReporter};
use framereel_core::reporting::EncodeOutcome;
use framereel_core::run_batch;
use ffmpeg_sidecar::event::{FfmpegEvent, FfmpegProgress, LogLevel};
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use tempfile::tempdir;

/// Records every progress callback for later inspection.
#[derive(Default)]
struct RecordingProgress {
    started: Vec<(String, u64)>,
    frames: Vec<FrameProgress>,
    finished: Vec<String>,
}

impl ProgressReporter for RecordingProgress {
    fn on_prefix_start(&mut self, prefix: &str, frames: u64) {
        self.started.push((prefix.to_string(), frames));
    }

    fn on_frame(&mut self, progress: &FrameProgress) {
        self.frames.push(progress.clone());
    }

    fn on_prefix_done(&mut self, prefix: &str) {
        self.finished.push(prefix.to_string());
    }
}

/// Keeps the ffmpeg lines forwarded to the `log` facade.
struct CaptureLogger;

static FFMPEG_RECORDS: Mutex<Vec<(log::Level, String)>> = Mutex::new(Vec::new());
static CAPTURE_LOGGER: CaptureLogger = CaptureLogger;

impl log::Log for CaptureLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        let message = record.args().to_string();
        if message.starts_with("ffmpeg") {
            FFMPEG_RECORDS.lock().unwrap().push((record.level(), message));
        }
    }

    fn flush(&self) {}
}

fn touch(dir: &Path, name: &str) {
    fs::write(dir.join(name), b"dummy content").expect("Failed to create dummy file");
}

#[test]
fn test_default_range_trims_25_frames_in_order() -> Result<(), Box<dyn std::error::Error>> {
    let work_dir = tempdir()?;
    let config = BatchConfigBuilder::new()
        .work_dir(work_dir.path())
        .frame_range(0, 24)
        .build();

    let image_tool = MockImageTool::new();
    let spawner = MockFfmpegSpawner::new();
    let mut progress = RecordingProgress::default();

    let report = run_batch(&config, &image_tool, &spawner, &mut progress)?;

    let jobs = image_tool.received_jobs();
    assert_eq!(jobs.len(), 25);
    for (i, job) in jobs.iter().enumerate() {
        assert_eq!(job.input, format!("test.{i:04}.png"));
        assert_eq!(job.output, format!("test.noborder.{i:04}.png"));
        assert_eq!(job.program, "convert");
        assert_eq!(job.border_color, "white");
        assert_eq!(job.background, "white");
        assert_eq!(job.work_dir, report.work_dir);
    }

    assert_eq!(progress.started, vec![("test.".to_string(), 25)]);
    assert_eq!(progress.finished, vec!["test.".to_string()]);
    let filled: Vec<usize> = progress.frames.iter().map(FrameProgress::filled_segments).collect();
    assert_eq!(filled, (0..=24).collect::<Vec<usize>>());

    assert_eq!(spawner.get_received_calls().len(), 1);
    assert!(report.is_success());
    assert_eq!(report.exit_code(), 0);
    assert_eq!(report.prefixes[0].frames_attempted, 25);
    Ok(())
}

#[test]
fn test_inverted_range_skips_trim_but_still_encodes() -> Result<(), Box<dyn std::error::Error>> {
    let work_dir = tempdir()?;
    let config = BatchConfigBuilder::new()
        .work_dir(work_dir.path())
        .frame_range(10, 5)
        .build();

    let image_tool = MockImageTool::new();
    let spawner = MockFfmpegSpawner::new();
    let mut progress = RecordingProgress::default();

    let report = run_batch(&config, &image_tool, &spawner, &mut progress)?;

    assert!(image_tool.received_jobs().is_empty());
    assert!(progress.frames.is_empty());
    assert_eq!(spawner.get_received_calls().len(), 1);
    assert_eq!(report.prefixes[0].frames_attempted, 0);
    Ok(())
}

#[test]
fn test_prefixes_processed_in_order_with_one_encode_each() -> Result<(), Box<dyn std::error::Error>> {
    let work_dir = tempdir()?;
    let config = BatchConfigBuilder::new()
        .work_dir(work_dir.path())
        .add_prefix("b.")
        .add_prefix("a.")
        .frame_range(1, 2)
        .build();

    let image_tool = MockImageTool::new();
    let spawner = MockFfmpegSpawner::new();

    let report = run_batch(&config, &image_tool, &spawner, &mut NoProgress)?;

    let inputs: Vec<String> = image_tool
        .received_jobs()
        .into_iter()
        .map(|job| job.input)
        .collect();
    assert_eq!(inputs, vec!["b.0001.png", "b.0002.png", "a.0001.png", "a.0002.png"]);
    assert_eq!(spawner.get_received_calls().len(), 2);
    let names: Vec<&str> = report.prefixes.iter().map(|p| p.prefix.as_str()).collect();
    assert_eq!(names, vec!["b.", "a."]);
    Ok(())
}

#[test]
fn test_stale_noborder_files_removed_before_trimming() -> Result<(), Box<dyn std::error::Error>> {
    let work_dir = tempdir()?;
    touch(work_dir.path(), "test.noborder.0099.png");
    touch(work_dir.path(), "old.noborder.0001.png");
    touch(work_dir.path(), "test.0000.png");

    let config = BatchConfigBuilder::new()
        .work_dir(work_dir.path())
        .frame_range(0, 0)
        .build();

    let report = run_batch(&config, &MockImageTool::new(), &MockFfmpegSpawner::new(), &mut NoProgress)?;

    assert_eq!(report.cleaned_files.len(), 2);
    assert!(!work_dir.path().join("test.noborder.0099.png").exists());
    assert!(!work_dir.path().join("old.noborder.0001.png").exists());
    assert!(work_dir.path().join("test.0000.png").exists());
    Ok(())
}

#[test]
fn test_trim_failures_continue_by_default() -> Result<(), Box<dyn std::error::Error>> {
    let work_dir = tempdir()?;
    let config = BatchConfigBuilder::new()
        .work_dir(work_dir.path())
        .frame_range(0, 4)
        .build();

    let image_tool = MockImageTool::new();
    image_tool.fail_input("test.0001.png", 1);
    image_tool.unavailable_input("test.0003.png");
    let spawner = MockFfmpegSpawner::new();

    let report = run_batch(&config, &image_tool, &spawner, &mut NoProgress)?;

    assert_eq!(image_tool.received_jobs().len(), 5);
    assert_eq!(report.prefixes[0].failed_frames, vec![1, 3]);
    assert_eq!(report.prefixes[0].frames_trimmed(), 3);
    assert_eq!(spawner.get_received_calls().len(), 1);
    assert_eq!(report.exit_code(), 0);
    assert!(!report.is_success());
    Ok(())
}

#[test]
fn test_trim_failure_aborts_when_configured() -> Result<(), Box<dyn std::error::Error>> {
    let work_dir = tempdir()?;
    let config = BatchConfigBuilder::new()
        .work_dir(work_dir.path())
        .frame_range(0, 4)
        .trim_failure(FailurePolicy::Abort)
        .build();

    let image_tool = MockImageTool::new();
    image_tool.fail_input("test.0002.png", 1);
    let spawner = MockFfmpegSpawner::new();

    let result = run_batch(&config, &image_tool, &spawner, &mut NoProgress);

    match result {
        Err(CoreError::ToolFailed { tool, code, .. }) => {
            assert_eq!(tool, "convert");
            assert_eq!(code, Some(1));
        }
        other => panic!("expected ToolFailed, got {other:?}"),
    }
    assert_eq!(image_tool.received_jobs().len(), 3);
    assert!(spawner.get_received_calls().is_empty());
    Ok(())
}

#[test]
fn test_encoder_failure_aborts_with_its_exit_code() -> Result<(), Box<dyn std::error::Error>> {
    let work_dir = tempdir()?;
    let config = BatchConfigBuilder::new()
        .work_dir(work_dir.path())
        .add_prefix("a.")
        .add_prefix("b.")
        .frame_range(0, 1)
        .build();

    let image_tool = MockImageTool::new();
    let spawner = MockFfmpegSpawner::new();
    spawner.push_exit_code(254);

    let err = run_batch(&config, &image_tool, &spawner, &mut NoProgress)
        .expect_err("encoder failure should abort");

    assert_eq!(err.exit_code(), 254);
    // The second prefix is never reached.
    assert_eq!(image_tool.received_jobs().len(), 2);
    assert_eq!(spawner.get_received_calls().len(), 1);
    Ok(())
}

#[test]
fn test_encoder_failure_recorded_when_continuing() -> Result<(), Box<dyn std::error::Error>> {
    let work_dir = tempdir()?;
    let config = BatchConfigBuilder::new()
        .work_dir(work_dir.path())
        .add_prefix("a.")
        .add_prefix("b.")
        .frame_range(0, 0)
        .encode_failure(FailurePolicy::Continue)
        .build();

    let spawner = MockFfmpegSpawner::new();
    spawner.push_exit_code(0);
    spawner.push_exit_code(3);

    let report = run_batch(&config, &MockImageTool::new(), &spawner, &mut NoProgress)?;

    assert_eq!(report.prefixes[0].encode, EncodeOutcome::Succeeded);
    assert_eq!(report.prefixes[1].encode, EncodeOutcome::Failed { code: Some(3) });
    assert_eq!(report.exit_code(), 3);
    Ok(())
}

#[test]
fn test_encode_command_targets_work_dir() -> Result<(), Box<dyn std::error::Error>> {
    let work_dir = tempdir()?;
    let config = BatchConfigBuilder::new()
        .work_dir(work_dir.path())
        .frame_range(0, 0)
        .encoder_input_pattern("test.noborder.%04d.png")
        .output_video("clip.mp4")
        .build();

    let spawner = MockFfmpegSpawner::creating_output();
    let report = run_batch(&config, &MockImageTool::new(), &spawner, &mut NoProgress)?;

    let calls = spawner.get_received_calls();
    let args = &calls[0];
    let expected_input = report.work_dir.join("test.noborder.%04d.png");
    assert!(args.contains(&expected_input.to_string_lossy().into_owned()));
    assert!(args.contains(&"format=yuv420p".to_string()));
    assert!(report.work_dir.join("clip.mp4").exists());
    assert_eq!(report.prefixes[0].output_video, report.work_dir.join("clip.mp4"));
    Ok(())
}

#[test]
fn test_missing_work_dir_is_an_error() {
    let config = BatchConfigBuilder::new()
        .work_dir("/surely/this/does/not/exist/fig")
        .build();

    let result = run_batch(&config, &MockImageTool::new(), &MockFfmpegSpawner::new(), &mut NoProgress);

    assert!(matches!(result, Err(CoreError::WorkDirNotFound(_))));
}

#[test]
fn test_invalid_config_rejected_before_cleanup() -> Result<(), Box<dyn std::error::Error>> {
    let work_dir = tempdir()?;
    touch(work_dir.path(), "test.noborder.0000.png");
    let config = BatchConfigBuilder::new()
        .work_dir(work_dir.path())
        .frame_rate(0)
        .build();

    let result = run_batch(&config, &MockImageTool::new(), &MockFfmpegSpawner::new(), &mut NoProgress);

    assert!(matches!(result, Err(CoreError::Config(_))));
    assert!(work_dir.path().join("test.noborder.0000.png").exists());
    Ok(())
}

#[test]
fn test_rerun_overwrites_outputs() -> Result<(), Box<dyn std::error::Error>> {
    let work_dir = tempdir()?;
    let config = BatchConfigBuilder::new()
        .work_dir(work_dir.path())
        .frame_range(0, 2)
        .build();

    let image_tool = MockImageTool::creating_outputs();
    let spawner = MockFfmpegSpawner::creating_output();

    let first = run_batch(&config, &image_tool, &spawner, &mut NoProgress)?;
    assert!(first.cleaned_files.is_empty());
    assert!(work_dir.path().join("test.noborder.0002.png").exists());

    let second = run_batch(&config, &image_tool, &spawner, &mut NoProgress)?;
    assert_eq!(second.cleaned_files.len(), 3);
    assert!(work_dir.path().join("test.noborder.0002.png").exists());
    assert!(work_dir.path().join("output.mp4").exists());
    Ok(())
}

#[test]
fn test_encoder_output_forwarded_to_log() -> Result<(), Box<dyn std::error::Error>> {
    let _ = log::set_logger(&CAPTURE_LOGGER);
    log::set_max_level(log::LevelFilter::Trace);

    let work_dir = tempdir()?;
    let config = BatchConfigBuilder::new()
        .work_dir(work_dir.path())
        .frame_range(0, 0)
        .encode_failure(FailurePolicy::Continue)
        .build();

    let spawner = MockFfmpegSpawner::new();
    spawner.set_events(vec![
        FfmpegEvent::Log(LogLevel::Error, "Could not find frame.noborder.0000.png".to_string()),
        FfmpegEvent::Progress(FfmpegProgress { frame: 12, fps: 15.0, size_kb: 256, time: "00:00:00.800".to_string(), bitrate_kbps: 2621.4, speed: 1.0, q: 0.0, raw_log_message: String::new() }),
        FfmpegEvent::Error("Simulated ffmpeg error line".to_string()),
    ]);
    spawner.push_exit_code(1);

    let report = run_batch(&config, &MockImageTool::new(), &spawner, &mut NoProgress)?;

    // Events never change the outcome; the scripted exit status does.
    assert_eq!(report.prefixes[0].encode, EncodeOutcome::Failed { code: Some(1) });
    assert_eq!(report.exit_code(), 1);

    let records = FFMPEG_RECORDS.lock().unwrap().clone();
    assert!(records.contains(&(
        log::Level::Error,
        "ffmpeg: Could not find frame.noborder.0000.png".to_string()
    )));
    assert!(records.contains(&(
        log::Level::Error,
        "ffmpeg: Simulated ffmpeg error line".to_string()
    )));
    assert!(records.iter().any(|(level, line)| {
        *level == log::Level::Trace && line.starts_with("ffmpeg progress: frame=12")
    }));
    Ok(())
}
