//! Diagnostic logging for the driver itself.
//!
//! Events go to stderr and are off unless `LOX_LOG` asks for them, e.g.
//! `LOX_LOG=lox=debug` or `LOX_LOG=lox::lexer=trace`.

use std::io;
use tracing_subscriber::{fmt, EnvFilter};

pub const ENV_VAR: &str = "LOX_LOG";

/// Installs the global subscriber. Calling it twice is harmless.
pub fn init() {
    let filter = EnvFilter::try_from_env(ENV_VAR).unwrap_or_else(|_| EnvFilter::new("off"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .without_time()
        .compact()
        .try_init();
}
