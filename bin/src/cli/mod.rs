//! CLI interpreter for the host

mod build_info;
mod run;
mod sample;

use build_info::BUILD_INFO;
use clap::{Parser, Subcommand};

use crate::logger::{self, LogLevel};

/// quadrand
///
/// Runs macroquad WebAssembly modules with the secure random buffer bridge linked into
/// their `env` imports.
#[derive(Parser)]
#[clap(version = BUILD_INFO)]
pub struct Cli {
    /// Logging level
    #[clap(long, value_enum, default_value = "info", global = true)]
    log_level: LogLevel,

    /// quadrand cli subcommand
    #[clap(subcommand)]
    command: Commands,
}

/// quadrand cli commands
#[derive(Subcommand)]
enum Commands {
    /// Run a WebAssembly module
    Run(run::Run),
    /// Print a fresh secure random buffer as hex
    Sample(sample::Sample),
}

impl Cli {
    /// Execute cli commands of the host
    ///
    /// # Errors
    /// - Logger initialization and command errors.
    pub fn exec(self) -> anyhow::Result<()> {
        logger::init(self.log_level)?;
        tracing::debug!(build_info = BUILD_INFO, "Starting");
        match self.command {
            Commands::Run(cmd) => cmd.exec(),
            Commands::Sample(cmd) => cmd.exec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn sample_accepts_negative_length() {
        let cli = Cli::try_parse_from(["quadrand", "sample", "--length", "-1"]).expect("parse");
        assert!(matches!(cli.command, Commands::Sample(_)));
    }

    #[test]
    fn run_requires_module() {
        assert!(Cli::try_parse_from(["quadrand", "run"]).is_err());
        assert!(Cli::try_parse_from(["quadrand", "run", "game.wasm", "--entry", "start"]).is_ok());
    }
}
