// ============================================================================
// framereel-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with the image transformer and video encoder
//
// This module encapsulates every call out to an external program. Both tools
// sit behind traits so the batch loop can be driven by mocks in tests.
//
// KEY COMPONENTS:
// - ImageTool / MagickTool: per-frame trim and flatten via ImageMagick
// - FfmpegSpawner / SidecarSpawner: video assembly via ffmpeg-sidecar
// - Dependency checking
//
// AI-ASSISTANT-INFO: External tool interactions and abstractions

use crate::error::{CoreError, CoreResult};

use std::io;
use std::process::{Command, Stdio};

// ============================================================================
// SUBMODULES
// ============================================================================

/// ffmpeg process abstraction and encode command construction
pub mod ffmpeg_executor;

/// ImageMagick trim invocation
pub mod magick;

#[cfg(any(test, feature = "test-mocks"))]
pub mod mocks;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use ffmpeg_executor::{
    FfmpegProcess, FfmpegSpawner, SidecarProcess, SidecarSpawner, build_encode_command,
    run_encode,
};
pub use magick::{ImageTool, MagickTool, TrimJob};

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Checks that an external command can be started.
///
/// Runs `<cmd_name> -version` with output discarded. Only a failure to start
/// the program counts; its exit status is ignored since not every tool
/// understands `-version`.
pub fn check_dependency(cmd_name: &str) -> CoreResult<()> {
    let result = Command::new(cmd_name)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency: {}", cmd_name);
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Dependency '{}' not found.", cmd_name);
            Err(CoreError::DependencyNotFound(cmd_name.to_string()))
        }
        Err(e) => {
            log::error!("Failed to start dependency check command '{}': {}", cmd_name, e);
            Err(CoreError::CommandStart(cmd_name.to_string(), e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_dependency_is_reported() {
        let result = check_dependency("framereel-definitely-not-a-real-tool");
        assert!(matches!(result, Err(CoreError::DependencyNotFound(name)) if name == "framereel-definitely-not-a-real-tool"));
    }
}
