//! Tracing subscriber setup for the `risp` binary.
//!
//! Logs go to stderr so they never mix with command output on stdout.
//!
//! Filter priority, highest first:
//!
//! 1. `RISP_LOG` (e.g. `risp_client=debug,warn`)
//! 2. `RUST_LOG`
//! 3. `--verbose` → debug, `--quiet` → error
//! 4. `warn`

use tracing::Level;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "RISP_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl Verbosity {
    /// `--verbose` wins if both flags are given.
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if verbose {
            Self::Verbose
        } else if quiet {
            Self::Quiet
        } else {
            Self::Normal
        }
    }

    pub fn default_level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::DEBUG,
        }
    }
}

/// Installs the global subscriber. Call once, before loading config.
pub fn init(verbosity: Verbosity) {
    let filter = build_env_filter(verbosity, std::env::var(LOG_ENV).ok());
    let use_ansi = std::io::IsTerminal::is_terminal(&std::io::stderr());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(use_ansi)
        .with_target(true);

    // try_init: a second call (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer.without_time().compact())
        .try_init();
}

fn build_env_filter(verbosity: Verbosity, risp_log: Option<String>) -> EnvFilter {
    if let Some(filter) = risp_log.and_then(|d| EnvFilter::try_new(d).ok()) {
        return filter;
    }

    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    let level = verbosity.default_level();
    if verbosity == Verbosity::Verbose {
        EnvFilter::new(format!("warn,risp_client={level},risp_client_core={level}"))
    } else {
        EnvFilter::new(level.as_str().to_lowercase())
    }
}
