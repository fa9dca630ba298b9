use crate::error::{ExitStatus, LoxError};
use crate::lexer;
use crate::reporter::{ConsoleReporter, ReportStyle, Reporter};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// What a single [`run`] call produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    pub tokens: usize,
    pub had_error: bool,
}

/// The one code path shared by file and interactive mode.
///
/// Lexes `source`, then writes every token to `out`, one per line, in source
/// order. Source errors go to `reporter`; only a failing `out` is an `Err`.
pub fn run(source: &str, reporter: &mut dyn Reporter, out: &mut dyn Write) -> io::Result<RunOutcome> {
    reporter.begin(source);

    let tokens = lexer::produce(source, reporter);
    for token in &tokens {
        writeln!(out, "{}", token)?;
    }
    out.flush()?;

    Ok(RunOutcome {
        tokens: tokens.len(),
        had_error: reporter.had_error(),
    })
}

/// Executes a script once and maps the result to an exit status.
pub fn run_file(path: &Path, style: ReportStyle) -> Result<ExitStatus, LoxError> {
    let mut reporter = ConsoleReporter::stderr(style, &path.display().to_string());
    let stdout = io::stdout();
    run_file_with(path, &mut reporter, &mut stdout.lock())
}

pub fn run_file_with(
    path: &Path,
    reporter: &mut dyn Reporter,
    out: &mut dyn Write,
) -> Result<ExitStatus, LoxError> {
    tracing::debug!(path = %path.display(), "running script");

    let bytes = fs::read(path).map_err(|source| LoxError::ReadScript {
        path: path.to_path_buf(),
        source,
    })?;
    let source = String::from_utf8_lossy(&bytes);

    let outcome = run(&source, reporter, out)?;
    tracing::debug!(tokens = outcome.tokens, had_error = outcome.had_error, "script finished");

    if outcome.had_error {
        Ok(ExitStatus::DataErr)
    } else {
        Ok(ExitStatus::Success)
    }
}
