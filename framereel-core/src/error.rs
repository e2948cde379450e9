// ============================================================================
// framereel-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Error types for the framereel core library
//
// This module defines the error taxonomy used throughout framereel-core.
// External tool failures are surfaced as explicit values so the batch loop
// can decide whether to continue or abort.
//
// AI-ASSISTANT-INFO: Core error types and constructor helpers

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Errors produced by the framereel core library.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Working directory not found: {}", .0.display())]
    WorkDirNotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Required external tool '{0}' was not found on PATH")]
    DependencyNotFound(String),

    #[error("Failed to start '{0}': {1}")]
    CommandStart(String, #[source] io::Error),

    #[error("Failed waiting for '{0}': {1}")]
    CommandWait(String, #[source] io::Error),

    #[error("{tool} failed ({}): {context}", describe_code(.code))]
    ToolFailed {
        tool: String,
        code: Option<i32>,
        context: String,
    },

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

/// Result type for framereel-core operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exit code {c}"),
        None => "terminated by signal".to_string(),
    }
}

impl CoreError {
    /// Process exit code a binary should use when terminating with this error.
    ///
    /// A failed external tool propagates its own exit code, so a failing
    /// encoder still determines the exit status of the whole run.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            CoreError::ToolFailed { code: Some(c), .. } if *c != 0 => *c,
            _ => 1,
        }
    }
}

pub fn command_start_error(cmd: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandStart(cmd.into(), err)
}

pub fn command_wait_error(cmd: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandWait(cmd.into(), err)
}

pub fn tool_failed_error(
    tool: impl Into<String>,
    status: ExitStatus,
    context: impl Into<String>,
) -> CoreError {
    CoreError::ToolFailed {
        tool: tool.into(),
        code: status.code(),
        context: context.into(),
    }
}
