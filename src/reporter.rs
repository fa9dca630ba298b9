use crate::error::Diagnostic;
use std::io::{self, Write};

/// Sink for source-level problems.
///
/// Phases that detect errors hand them to a `Reporter` instead of printing
/// them, and keep going. Whoever drives the phases decides what a reported
/// error means (exit status, reset between REPL lines, ...).
pub trait Reporter {
    /// Presents one diagnostic and marks the session as failed.
    fn emit(&mut self, diagnostic: Diagnostic);

    fn error_count(&self) -> usize;

    fn reset(&mut self);

    /// Called with the text a run is about to process.
    fn begin(&mut self, _source: &str) {}

    fn had_error(&self) -> bool {
        self.error_count() > 0
    }

    fn report(&mut self, line: usize, context: &str, message: &str) {
        self.emit(Diagnostic::new(line, context, message));
    }

    fn error(&mut self, line: usize, message: &str) {
        self.report(line, "", message);
    }
}

/// How a [`ConsoleReporter`] presents diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportStyle {
    /// `[line N] Error: message`
    #[default]
    Plain,
    /// Annotated source snippet.
    Pretty { color: bool },
}

/// Writes diagnostics to a diagnostic channel, stderr unless told otherwise.
pub struct ConsoleReporter<W: Write = io::Stderr> {
    out: W,
    style: ReportStyle,
    origin: String,
    source: String,
    errors: usize,
}

impl ConsoleReporter {
    pub fn stderr(style: ReportStyle, origin: &str) -> Self {
        Self::with_writer(io::stderr(), style, origin)
    }
}

impl<W: Write> ConsoleReporter<W> {
    /// `origin` names the input in pretty output, e.g. a path or `<repl>`.
    pub fn with_writer(out: W, style: ReportStyle, origin: &str) -> Self {
        Self {
            out,
            style,
            origin: origin.to_string(),
            source: String::new(),
            errors: 0,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        tracing::debug!(
            line = diagnostic.line,
            text = %diagnostic.message,
            "source error reported"
        );

        let text = match self.style {
            ReportStyle::Plain => format!("{}\n", diagnostic),
            ReportStyle::Pretty { color } => diagnostic.render(&self.source, &self.origin, color),
        };

        // Reporting must not fail; a closed diagnostic channel only loses text.
        if let Err(err) = self
            .out
            .write_all(text.as_bytes())
            .and_then(|()| self.out.flush())
        {
            tracing::warn!(error = %err, "could not write diagnostic");
        }

        self.errors += 1;
    }

    fn error_count(&self) -> usize {
        self.errors
    }

    fn reset(&mut self) {
        self.errors = 0;
    }

    fn begin(&mut self, source: &str) {
        if matches!(self.style, ReportStyle::Pretty { .. }) {
            self.source = source.to_string();
        }
    }
}

/// Keeps diagnostics in memory.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    diagnostics: Vec<Diagnostic>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Plain textual form of every diagnostic, in report order.
    pub fn lines(&self) -> Vec<String> {
        self.diagnostics.iter().map(ToString::to_string).collect()
    }
}

impl Reporter for CollectingReporter {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    fn error_count(&self) -> usize {
        self.diagnostics.len()
    }

    fn reset(&mut self) {
        self.diagnostics.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Span;

    #[test]
    fn fresh_reporter_has_no_error() {
        let reporter = ConsoleReporter::with_writer(Vec::new(), ReportStyle::Plain, "<test>");
        assert!(!reporter.had_error());
        assert_eq!(reporter.error_count(), 0);
    }

    #[test]
    fn report_writes_plain_line_and_sets_flag() {
        let mut reporter = ConsoleReporter::with_writer(Vec::new(), ReportStyle::Plain, "<test>");
        reporter.report(7, "", "Unexpected character.");

        assert!(reporter.had_error());
        let written = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(written, "[line 7] Error: Unexpected character.\n");
    }

    #[test]
    fn error_is_report_without_context() {
        let mut reporter = CollectingReporter::new();
        reporter.error(2, "Unterminated string.");
        assert_eq!(reporter.lines(), vec!["[line 2] Error: Unterminated string."]);
    }

    #[test]
    fn reset_clears_flag_only() {
        let mut reporter = ConsoleReporter::with_writer(Vec::new(), ReportStyle::Plain, "<test>");
        reporter.error(1, "first");
        reporter.error(1, "second");
        assert_eq!(reporter.error_count(), 2);

        reporter.reset();
        assert!(!reporter.had_error());

        let written = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(written.lines().count(), 2);
    }

    #[test]
    fn pretty_style_renders_snippet_of_current_source() {
        let style = ReportStyle::Pretty { color: false };
        let mut reporter = ConsoleReporter::with_writer(Vec::new(), style, "script.lox");
        reporter.begin("print 1;\nvar # = 2;");
        reporter.emit(Diagnostic::new(2, "", "Unexpected character.").with_span(Span::single(13)));

        let written = String::from_utf8(reporter.into_inner()).unwrap();
        assert!(written.contains("Unexpected character."));
        assert!(written.contains("script.lox"));
        assert!(written.contains("var # = 2;"));
    }

    #[test]
    fn pretty_report_without_span_keeps_line_and_file() {
        let style = ReportStyle::Pretty { color: false };
        let mut reporter = ConsoleReporter::with_writer(Vec::new(), style, "x.lox");
        reporter.begin("print 1;\nprint ;");
        reporter.report(2, "", "Expect expression.");

        let written = String::from_utf8(reporter.into_inner()).unwrap();
        assert!(written.contains("x.lox"));
        assert!(written.contains("reported on line 2"));
    }

    #[test]
    fn pretty_report_outside_source_uses_plain_line() {
        let style = ReportStyle::Pretty { color: false };
        let mut reporter = ConsoleReporter::with_writer(Vec::new(), style, "x.lox");
        reporter.begin("a");
        reporter.report(5, "", "later phase error");
        reporter.begin("");
        reporter.report(1, "", "empty input");

        let written = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(
            written,
            "[line 5] Error: later phase error\n[line 1] Error: empty input\n"
        );
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failure_still_counts_the_error() {
        let mut reporter = ConsoleReporter::with_writer(BrokenPipe, ReportStyle::Plain, "<test>");
        reporter.error(1, "lost");
        assert!(reporter.had_error());
    }
}
