use crate::error::{ExitStatus, LoxError};
use crate::repl;
use crate::reporter::ReportStyle;
use crate::runner;
use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use std::ffi::OsString;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

pub const USAGE: &str = "Usage: lox [script]";

#[derive(Debug, Parser)]
#[command(
    name = "lox",
    version,
    about = "Scan a Lox script, or start an interactive prompt"
)]
pub struct Cli {
    /// The script file to execute; omit it for the interactive prompt
    #[arg(value_name = "script")]
    pub scripts: Vec<PathBuf>,

    /// How source errors are shown
    #[arg(long, value_enum, env = "LOX_DIAGNOSTICS", default_value_t = Format::Plain)]
    pub format: Format,

    /// When to colour pretty diagnostics
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Plain,
    Pretty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Prompt,
    Script(PathBuf),
    /// More than one script was given.
    Usage,
}

impl Cli {
    pub fn invocation(&self) -> Invocation {
        match self.scripts.as_slice() {
            [] => Invocation::Prompt,
            [path] => Invocation::Script(path.clone()),
            _ => Invocation::Usage,
        }
    }

    pub fn report_style(&self) -> ReportStyle {
        match self.format {
            Format::Plain => ReportStyle::Plain,
            Format::Pretty => ReportStyle::Pretty {
                color: match self.color {
                    ColorChoice::Always => true,
                    ColorChoice::Never => false,
                    ColorChoice::Auto => io::stderr().is_terminal(),
                },
            },
        }
    }
}

/// Parses `args` (program name first) and runs the selected mode.
pub fn main_with_args<I, T>(args: I) -> ExitStatus
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => dispatch(&cli),
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            if let Err(write_err) = err.print() {
                tracing::warn!(error = %write_err, "could not print help");
            }
            ExitStatus::Success
        }
        Err(err) => {
            tracing::debug!(kind = ?err.kind(), "could not parse arguments");
            eprint!("{}", err.render());
            usage()
        }
    }
}

pub fn dispatch(cli: &Cli) -> ExitStatus {
    let style = cli.report_style();

    let result: Result<ExitStatus, LoxError> = match cli.invocation() {
        Invocation::Usage => return usage(),
        Invocation::Script(path) => runner::run_file(&path, style),
        Invocation::Prompt => repl::start(style).map(|()| ExitStatus::Success),
    };

    result.unwrap_or_else(|err| {
        tracing::debug!(error = ?err, "driver failed");
        eprintln!("lox: {}", err);
        err.exit_status()
    })
}

fn usage() -> ExitStatus {
    usage_to(&mut io::stdout())
}

fn usage_to(out: &mut dyn Write) -> ExitStatus {
    if let Err(err) = writeln!(out, "{}", USAGE) {
        tracing::warn!(error = %err, "could not print usage");
    }
    ExitStatus::Usage
}
