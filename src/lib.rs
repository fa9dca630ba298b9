// Lox front-end driver
//
// Runs a script file or an interactive prompt through the lexer and prints
// the resulting tokens. Source errors are funnelled through a `Reporter`
// so every later phase can share the same reporting protocol.

// Public modules
pub mod cli;
pub mod error;
pub mod lexer;
pub mod logging;
pub mod repl;
pub mod reporter;
pub mod runner;

// Re-export commonly used items
pub use error::{Diagnostic, ExitStatus, LoxError, Span};
pub use lexer::{Lexer, Literal, Token, TokenKind};
pub use reporter::{CollectingReporter, ConsoleReporter, ReportStyle, Reporter};

// Re-export main functions
pub use repl::start as start_repl;
pub use runner::{run, run_file, RunOutcome};
