// ============================================================================
// framereel-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING: Result alias and error display for the binary

use framereel_core::{CoreError, CoreResult};
use owo_colors::OwoColorize;

/// Type alias for CLI results using CoreError.
pub type CliResult<T> = CoreResult<T>;

/// Prints `Error: <message>` to stderr, in bold red unless NO_COLOR is set.
pub fn print_error(err: &CoreError) {
    if std::env::var("NO_COLOR").is_ok() {
        eprintln!("Error: {err}");
    } else {
        eprintln!("{} {}", "Error:".red().bold(), err);
    }
}
