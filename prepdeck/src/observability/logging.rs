//! Logging setup for `prepdeck` runs.
//!
//! `tracing` events go to stderr, either as text or as one JSON object per
//! line (`--log-format json`). `PREPDECK_LOG_LEVEL` takes an `EnvFilter`
//! directive and wins over `-v`.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

use crate::cli::args::{Cli, ColorChoice, LogFormat};

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_LEVEL_ENV: &str = "PREPDECK_LOG_LEVEL";

/// Logging options resolved from the command line and the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogSettings {
    /// Line format.
    pub format: LogFormat,
    /// Number of `-v` flags.
    pub verbosity: u8,
    /// ANSI colors in text output.
    pub ansi: bool,
}

impl LogSettings {
    /// Settings for a parsed invocation, checking stderr and `NO_COLOR`.
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.log_format,
            verbosity: cli.verbose,
            ansi: use_ansi(
                cli.color,
                std::io::stderr().is_terminal(),
                std::env::var_os("NO_COLOR").is_some(),
            ),
        }
    }

    /// Level for the verbosity count: warn, info, debug, then trace.
    #[must_use]
    pub const fn level(&self) -> &'static str {
        match self.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Event filter: `PREPDECK_LOG_LEVEL` if it parses, else [`Self::level`].
    #[must_use]
    pub fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_env(LOG_LEVEL_ENV).unwrap_or_else(|_| EnvFilter::new(self.level()))
    }

    /// Install the global subscriber. Later calls are ignored.
    pub fn init(&self) {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(self.filter())
            .with_target(self.verbosity >= 2)
            .with_writer(std::io::stderr);

        let installed = match self.format {
            LogFormat::Human => builder.with_ansi(self.ansi).try_init(),
            LogFormat::Json => builder.json().with_ansi(false).try_init(),
        };
        if installed.is_ok() {
            tracing::debug!(format = ?self.format, level = self.level(), "logging initialized");
        }
    }
}

/// `--color auto` colors only a terminal, and `NO_COLOR` turns it off.
const fn use_ansi(color: ColorChoice, is_terminal: bool, no_color: bool) -> bool {
    match color {
        ColorChoice::Auto => is_terminal && !no_color,
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    }
}
