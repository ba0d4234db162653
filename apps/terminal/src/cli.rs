//! # Command Line Interface
//!
//! Argument parsing for the terminal binary.

use clap::{Parser, ValueEnum};
use std::fmt;

/// Which wiring the process boots with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RunMode {
    /// In-memory stores, seeded demo catalog, interactive command reader.
    #[default]
    Dev,

    /// Real persistence wiring. Not implemented; exits with a
    /// configuration error.
    Prod,
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Dev => write!(f, "dev"),
            RunMode::Prod => write!(f, "prod"),
        }
    }
}

/// Mercury POS terminal: drives a simulated store of checkout lanes.
#[derive(Debug, Parser)]
#[command(name = "mercury-terminal", version, about)]
pub struct Cli {
    /// Run mode.
    #[arg(long, value_enum, default_value_t = RunMode::Dev)]
    pub mode: RunMode,

    /// Store name stamped onto every lane identity.
    #[arg(long, default_value = "Main Street")]
    pub store: String,

    /// Number of checkout lanes to register and boot.
    #[arg(long, default_value_t = 2)]
    pub lanes: u32,

    /// Ship journal lines to a TCP collector (`host:port`) instead of
    /// stdout.
    #[arg(long)]
    pub journal: Option<String>,

    /// Milliseconds between ticks of the store composite.
    #[arg(long, default_value_t = 250)]
    pub tick_ms: u64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["mercury-terminal"]);
        assert_eq!(cli.mode, RunMode::Dev);
        assert_eq!(cli.store, "Main Street");
        assert_eq!(cli.lanes, 2);
        assert_eq!(cli.tick_ms, 250);
        assert!(cli.journal.is_none());
    }

    #[test]
    fn test_full_invocation() {
        let cli = Cli::parse_from([
            "mercury-terminal",
            "--mode",
            "dev",
            "--store",
            "Harbor Road",
            "--lanes",
            "4",
            "--journal",
            "127.0.0.1:9000",
            "--tick-ms",
            "100",
        ]);
        assert_eq!(cli.store, "Harbor Road");
        assert_eq!(cli.lanes, 4);
        assert_eq!(cli.journal.as_deref(), Some("127.0.0.1:9000"));
        assert_eq!(cli.tick_ms, 100);
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        let result = Cli::try_parse_from(["mercury-terminal", "--mode", "staging"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_mode_displays_lowercase() {
        assert_eq!(RunMode::Dev.to_string(), "dev");
        assert_eq!(RunMode::Prod.to_string(), "prod");
    }
}
