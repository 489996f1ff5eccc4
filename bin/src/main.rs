//! quadrand host.

use clap::Parser;
use quadrand::cli::Cli;

fn main() -> anyhow::Result<()> {
    Cli::parse().exec()
}
