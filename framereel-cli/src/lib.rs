// framereel-cli/src/lib.rs
//
// Library portion of the framereel CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod progress;

// Re-export items needed by the binary or integration tests
pub use cli::Cli;
pub use commands::convert::run_convert;
