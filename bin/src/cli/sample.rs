//! Sample cli command

use clap::Args;

use super::run::load_config;
use crate::random::{get_random_buffer, OsSource};

/// Sample cli command
#[derive(Args)]
pub(crate) struct Sample {
    /// Number of bytes
    #[clap(long, short, default_value_t = 32, allow_negative_numbers = true)]
    length: i64,

    /// Largest buffer that may be requested
    #[clap(long)]
    max_buffer_len: Option<usize>,
}

impl Sample {
    /// Print a secure random buffer of `length` bytes as hex
    pub(crate) fn exec(self) -> anyhow::Result<()> {
        let config = load_config(None, self.max_buffer_len)?;
        let buffer = get_random_buffer(&mut OsSource, self.length, config.max_buffer_len())?;
        println!("{}", hex::encode(buffer.as_bytes()));
        Ok(())
    }
}
