//! Live adapters for real external interactions.

pub mod clock;
pub mod filesystem;
pub mod git;
pub mod issues;

use std::path::Path;
use std::process::Command;

use crate::ports::PortError;

/// Runs `program` with `args` inside `root` and returns its stdout.
///
/// A spawn failure or non-zero exit status is reported as an error carrying
/// the command line and its stderr.
pub(crate) fn run_in(root: &Path, program: &str, args: &[String]) -> Result<String, PortError> {
    let output = Command::new(program).args(args).current_dir(root).output()?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("{program} {} failed: {}", args.join(" "), stderr.trim()).into());
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_program_is_an_error() {
        let result = run_in(Path::new("."), "repo-context-no-such-binary", &[]);
        assert!(result.is_err());
    }
}
