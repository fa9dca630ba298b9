use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

/// Character offsets into the source text, end exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn single(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos + 1,
        }
    }

    /// Span covering the given 1-based line, without its line terminator.
    /// `None` when the source has no such line.
    pub fn of_line(source: &str, line: usize) -> Option<Self> {
        let mut start = 0;
        for (number, text) in source.split('\n').enumerate() {
            let len = text.chars().count();
            if number + 1 == line {
                return Some(Self::new(start, start + len));
            }
            start += len + 1;
        }
        None
    }

    /// Clamps into a source of `len` characters so a snippet can point at
    /// it. Empty spans grow by one character where there is one to take.
    fn fit(self, len: usize) -> Option<Self> {
        if self.start >= len {
            return None;
        }
        let end = self.end.min(len).max(self.start + 1);
        Some(Self::new(self.start, end))
    }
}

/// A problem found in source text by one of the front-end phases.
///
/// The plain textual form is `[line N] Error<context>: <message>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub line: usize,
    /// Location detail such as ` at 'x'`. Always empty for now.
    pub context: String,
    pub message: String,
    pub span: Option<Span>,
}

impl Diagnostic {
    pub fn new(line: usize, context: &str, message: &str) -> Self {
        Self {
            line,
            context: context.to_string(),
            message: message.to_string(),
            span: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Renders an annotated snippet of `source` pointing at the problem.
    /// Falls back to the plain line when the problem can't be located in
    /// `source`.
    pub fn render(&self, source: &str, filename: &str, color: bool) -> String {
        let span = self
            .span
            .or_else(|| Span::of_line(source, self.line))
            .and_then(|span| span.fit(source.chars().count()));
        let Some(span) = span else {
            return format!("{}\n", self);
        };

        // ariadne already prints the `Error:` tag in front of the title.
        let title = match self.context.trim() {
            "" => self.message.clone(),
            context => format!("{}: {}", context, self.message),
        };

        let mut buffer = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_config(Config::default().with_color(color))
            .with_message(title)
            .with_label(
                Label::new((filename, span.start..span.end))
                    .with_message(&self.message)
                    .with_color(Color::Red),
            )
            .with_note(format!("reported on line {}", self.line))
            .finish()
            .write((filename, Source::from(source)), &mut buffer);

        match written {
            Ok(()) => String::from_utf8_lossy(&buffer).into_owned(),
            // Fall back to the plain form if the snippet can't be rendered.
            Err(_) => format!("{}\n", self),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "[line {}] Error{}: {}",
            self.line, self.context, self.message
        )
    }
}

/// Process exit statuses, following sysexits.h.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success = 0,
    Usage = 64,
    DataErr = 65,
    NoInput = 66,
    IoErr = 74,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}

/// Operational failures that stop the driver. Problems in the source text
/// itself are [`Diagnostic`]s and never show up here.
#[derive(Debug, Error)]
pub enum LoxError {
    #[error("cannot read '{}': {source}", .path.display())]
    ReadScript {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{0}")]
    Io(#[from] io::Error),
}

impl LoxError {
    pub fn exit_status(&self) -> ExitStatus {
        match self {
            LoxError::ReadScript { .. } => ExitStatus::NoInput,
            LoxError::Io(_) => ExitStatus::IoErr,
        }
    }
}
