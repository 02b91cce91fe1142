use jjp_core::logging;

mod cli;

use crate::cli::CliCommand;

fn main() {
    // File logging is best effort; fall back to stderr so the CLI still runs.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    // Parse CLI and dispatch. One diagnostic, non-zero exit on any failure.
    if let Err(err) = CliCommand::run_from_args() {
        eprintln!("jjp error: {:#}", err);
        std::process::exit(1);
    }
}
