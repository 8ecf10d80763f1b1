//! Command dispatch and handlers.

pub mod generate;

use std::env;
use std::io;
use std::path::PathBuf;

use crate::cassette::session::RecordingSession;
use crate::cli::Cli;
use crate::config::ContextConfig;
use crate::context::ServiceContext;
use crate::error::ContextError;
use crate::snapshot::resolve_root;

/// Environment variable naming a directory to record port interactions into.
pub const RECORD_ENV: &str = "REPO_CONTEXT_RECORD";

/// Run the parsed command against live adapters.
///
/// When `REPO_CONTEXT_RECORD` is set to a directory path, all port
/// interactions are recorded to per-port cassette files in that directory.
///
/// # Errors
///
/// Returns an error if report generation or the recording session fails.
pub fn dispatch(cli: &Cli, config: &ContextConfig) -> Result<(), ContextError> {
    let session = match env::var(RECORD_ENV) {
        Ok(dir) => Some(RecordingSession::new(&PathBuf::from(dir), &resolve_root(&cli.path))?),
        Err(_) => None,
    };
    let ctx = session.as_ref().map_or_else(ServiceContext::live, ServiceContext::recording);

    let result = generate::run(&ctx, cli, config, &mut io::stdout().lock());

    // Finish recording after the command completes, even on error.
    if let Some(session) = session {
        // Drop the context first to release the recorder references.
        drop(ctx);
        finish_recording(session)?;
    }

    result
}

/// Finish a recording session and print the output directory.
fn finish_recording(session: RecordingSession) -> Result<(), ContextError> {
    let output_dir = session.finish()?;
    eprintln!("Recording saved to: {}", output_dir.display());
    Ok(())
}
