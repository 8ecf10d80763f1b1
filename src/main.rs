//! Binary entrypoint for the `repo-context` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // A missing .env file is not an error.
    dotenvy::dotenv().ok();

    // Recording is handled in commands::dispatch via REPO_CONTEXT_RECORD=<dir>.
    match repo_context::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
