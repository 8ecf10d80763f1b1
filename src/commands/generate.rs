//! Snapshot generation and report output.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::cli::Cli;
use crate::config::ContextConfig;
use crate::context::ServiceContext;
use crate::error::ContextError;
use crate::render;
use crate::snapshot::{build_repo_context, resolve_root, RepoContext};

/// Report written next to the repository when no output flag is given.
pub const DEFAULT_JSON_REPORT: &str = "REPO.json";
/// Markdown companion of [`DEFAULT_JSON_REPORT`].
pub const DEFAULT_MD_REPORT: &str = "REPO.md";

/// Report format selected by an `--out` file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReportFormat {
    Json,
    Markdown,
}

impl ReportFormat {
    fn for_path(path: &Path) -> Result<Self, ContextError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("md") => Ok(Self::Markdown),
            _ => Err(ContextError::UnsupportedOutput(path.to_path_buf())),
        }
    }

    fn render(self, context: &RepoContext) -> Result<String, ContextError> {
        match self {
            Self::Json => render::to_json(context),
            Self::Markdown => Ok(render::to_markdown(context)),
        }
    }
}

fn write_report(ctx: &ServiceContext, path: &Path, contents: &str) -> Result<(), ContextError> {
    ctx.fs.write(path, contents).map_err(|e| ContextError::Write {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    info!(path = %path.display(), bytes = contents.len(), "report written");
    Ok(())
}

/// Builds the snapshot for `cli.path` and emits the requested reports.
///
/// # Errors
///
/// Returns an error if `--out` has an unsupported extension, a report
/// cannot be written, or serialization fails.
pub fn run<W: Write>(
    ctx: &ServiceContext,
    cli: &Cli,
    config: &ContextConfig,
    stdout: &mut W,
) -> Result<(), ContextError> {
    let root = resolve_root(&cli.path);
    let out = cli
        .out
        .as_deref()
        .map(|out| -> Result<(PathBuf, ReportFormat), ContextError> {
            let out = resolve_root(out);
            let format = ReportFormat::for_path(&out)?;
            Ok((out, format))
        })
        .transpose()?;

    let context = build_repo_context(ctx, &root, config);

    if let Some((path, format)) = out {
        write_report(ctx, &path, &format.render(&context)?)?;
        writeln!(stdout, "{}", path.display())?;
        return Ok(());
    }

    if cli.prints_to_stdout() {
        let mut sections = Vec::new();
        if cli.json {
            sections.push(render::to_json(&context)?);
        }
        if cli.md {
            sections.push(render::to_markdown(&context));
        }
        if cli.compact {
            sections.push(render::to_compact(&context));
        }
        stdout.write_all(sections.join("\n").as_bytes())?;
        return Ok(());
    }

    let json_path = root.join(DEFAULT_JSON_REPORT);
    let md_path = root.join(DEFAULT_MD_REPORT);
    write_report(ctx, &json_path, &render::to_json(&context)?)?;
    write_report(ctx, &md_path, &render::to_markdown(&context))?;
    writeln!(stdout, "Generated {} and {}", json_path.display(), md_path.display())?;
    Ok(())
}
