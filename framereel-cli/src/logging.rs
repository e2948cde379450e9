// ============================================================================
// framereel-cli/src/logging.rs
// ============================================================================
//
// LOGGING UTILITIES: Console and file logger initialization
//
// The application logs through the standard `log` facade:
// - Console only (default): env_logger with a timestamped, colored format.
//   RUST_LOG overrides the level chosen by --verbose.
// - With --log-dir: log4rs via framereel-core, writing to the console and to
//   a timestamped file in the given directory.
//
// Both console writers hide the active progress bar while a record is printed.

use crate::progress::suspend_bar;
use log::LevelFilter;
use log4rs::append::Append;
use log4rs::encode::Encode;
use log4rs::encode::pattern::PatternEncoder;
use log4rs::encode::writer::simple::SimpleWriter;
use owo_colors::{AnsiColors, OwoColorize};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Returns the current local timestamp formatted as "YYYYMMDD_HHMMSS".
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Path of the log file for a run started now.
pub fn log_file_path(log_dir: &Path) -> PathBuf {
    log_dir.join(format!("framereel_run_{}.log", get_timestamp()))
}

/// Check if color should be used (respects NO_COLOR environment variable)
fn should_use_color() -> bool {
    std::env::var("NO_COLOR").is_err()
}

/// Stderr sink that writes each record with the progress bar suspended.
struct BarAwareStderr;

impl Write for BarAwareStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        suspend_bar(|| io::stderr().write_all(buf)).map(|()| buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

/// log4rs console appender that keeps the progress bar intact.
#[derive(Debug)]
pub struct BarAwareConsole {
    encoder: PatternEncoder,
}

impl BarAwareConsole {
    pub fn new() -> Self {
        Self {
            encoder: PatternEncoder::new(framereel_core::file_logging::CONSOLE_PATTERN),
        }
    }

    /// Formats `record` the way it will appear on the console.
    fn render(&self, record: &log::Record) -> anyhow::Result<Vec<u8>> {
        let mut writer = SimpleWriter(Vec::new());
        self.encoder.encode(&mut writer, record)?;
        Ok(writer.0)
    }
}

impl Default for BarAwareConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Append for BarAwareConsole {
    fn append(&self, record: &log::Record) -> anyhow::Result<()> {
        let line = self.render(record)?;
        suspend_bar(|| io::stderr().write_all(&line))?;
        Ok(())
    }

    fn flush(&self) {}
}

/// Level used when RUST_LOG is not set.
pub fn default_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Initializes console logging with env_logger.
pub fn init_console(level: LevelFilter) {
    let use_color = should_use_color();
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Pipe(Box::new(BarAwareStderr)))
        .format(move |buf, record| {
            let level_str = match record.level() {
                log::Level::Error => "ERROR",
                log::Level::Warn => "WARN ",
                log::Level::Info => "INFO ",
                log::Level::Debug => "DEBUG",
                log::Level::Trace => "TRACE",
            };
            let timestamp = buf.timestamp();

            if use_color {
                let color = match record.level() {
                    log::Level::Error => AnsiColors::BrightRed,
                    log::Level::Warn => AnsiColors::Yellow,
                    log::Level::Info => AnsiColors::Green,
                    log::Level::Debug => AnsiColors::Blue,
                    log::Level::Trace => AnsiColors::Magenta,
                };
                writeln!(buf, "{} {} {}", timestamp, level_str.color(color), record.args())
            } else {
                writeln!(buf, "{} {} {}", timestamp, level_str, record.args())
            }
        })
        .init();

    log::debug!("Logger initialized with level: {}", level);
}

/// Initializes logging for the run: console only, or console plus file when
/// a log directory is given. Returns the log file path, if any.
pub fn init(verbose: bool, log_dir: Option<&Path>) -> anyhow::Result<Option<PathBuf>> {
    let level = default_level(verbose);
    match log_dir {
        Some(dir) => {
            let path = log_file_path(dir);
            framereel_core::file_logging::setup_logging(
                &path,
                level,
                Box::new(BarAwareConsole::new()),
            )?;
            Ok(Some(path))
        }
        None => {
            init_console(level);
            Ok(None)
        }
    }
}
