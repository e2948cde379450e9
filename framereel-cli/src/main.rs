// framereel-cli/src/main.rs
//
// Entry point of the `framereel` binary.
//
// Responsibilities:
// - Parsing command-line arguments.
// - Setting up console (and optional file) logging.
// - Running the batch through framereel-core.
// - Mapping the outcome to the process exit code: the encoder's exit code
//   when it decides the run, 1 for any other error.

use clap::Parser;
use framereel_cli::error::print_error;
use framereel_cli::{Cli, logging, run_convert};
use std::process;

fn main() {
    let cli = Cli::parse();

    match logging::init(cli.verbose, cli.log_dir.as_deref()) {
        Ok(Some(path)) => log::info!("Logging to {}", path.display()),
        Ok(None) => {}
        Err(e) => {
            eprintln!("Error: failed to initialize logging: {e}");
            process::exit(1);
        }
    }

    match run_convert(&cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            print_error(&e);
            process::exit(e.exit_code());
        }
    }
}
