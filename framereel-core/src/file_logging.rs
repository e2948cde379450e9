//! File-backed logging configuration.
//!
//! Used when a run should leave a log file behind. Records go both to the
//! console and to the file; the console keeps a compact format while the file
//! carries full timestamps.

use anyhow::Result;
use log::LevelFilter;
use log4rs::{
    append::{
        Append,
        console::{ConsoleAppender, Target},
        file::FileAppender,
    },
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
};
use std::path::Path;

/// Pattern used for console records.
pub const CONSOLE_PATTERN: &str = "{h({l:<5})} {m}{n}";

/// Pattern used for file records.
pub const FILE_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} [{l}] {m}{n}";

/// The default console appender: stderr with [`CONSOLE_PATTERN`].
pub fn stderr_appender() -> Box<dyn Append> {
    Box::new(
        ConsoleAppender::builder()
            .target(Target::Stderr)
            .encoder(Box::new(PatternEncoder::new(CONSOLE_PATTERN)))
            .build(),
    )
}

/// Installs a global logger writing to `console` and to `log_file`.
///
/// Callers that draw on the terminal pass their own console appender so
/// records do not tear their output; everyone else passes
/// [`stderr_appender`]. Creates the parent directory of `log_file` if
/// needed. Fails if a global logger has already been installed.
pub fn setup_logging(
    log_file: &Path,
    log_level: LevelFilter,
    console: Box<dyn Append>,
) -> Result<()> {
    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(FILE_PATTERN)))
        .build(log_file)?;

    let config = Config::builder()
        .appender(Appender::builder().build("console", console))
        .appender(Appender::builder().build("file", Box::new(file_appender)))
        .build(
            Root::builder()
                .appender("console")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;

    Ok(())
}
