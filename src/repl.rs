use crate::error::LoxError;
use crate::reporter::{ConsoleReporter, ReportStyle, Reporter};
use crate::runner;
use std::io::{self, BufRead, Write};

const PROMPT: &str = "> ";

/// Interactive session on stdin/stdout. Returns once input is exhausted;
/// errors on individual lines never end the session.
pub fn start(style: ReportStyle) -> Result<(), LoxError> {
    let mut reporter = ConsoleReporter::stderr(style, "<repl>");
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_prompt(stdin.lock(), &mut stdout.lock(), &mut reporter)
}

pub fn run_prompt<R: BufRead>(
    mut input: R,
    out: &mut dyn Write,
    reporter: &mut dyn Reporter,
) -> Result<(), LoxError> {
    let mut buffer = Vec::new();
    let mut count = 0usize;

    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        buffer.clear();
        if input.read_until(b'\n', &mut buffer)? == 0 {
            tracing::debug!(lines = count, "input closed, leaving prompt");
            return Ok(());
        }
        count += 1;

        // Decoded the same way as script files: bad bytes become U+FFFD.
        let line = String::from_utf8_lossy(&buffer);
        let source = line
            .strip_suffix('\n')
            .map(|rest| rest.strip_suffix('\r').unwrap_or(rest))
            .unwrap_or(&*line);

        let outcome = runner::run(source, reporter, out)?;
        if outcome.had_error {
            tracing::debug!(line = count, "line had errors, resetting");
        }

        // A mistake on one line must not poison the rest of the session.
        reporter.reset();
    }
}
