//! Randomness sources.

use rand::{rngs::OsRng, TryRngCore};

use crate::errors::Error;

/// A cryptographically secure source of random bytes.
pub trait SecureSource: Send {
    /// Fill the whole `buf` with secure random bytes.
    ///
    /// # Errors
    /// - `Error::RandomnessUnavailable`
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), Error>;
}

/// Operating system CSPRNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsSource;

impl SecureSource for OsSource {
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), Error> {
        OsRng
            .try_fill_bytes(buf)
            .map_err(|err| Error::RandomnessUnavailable(err.to_string()))
    }
}

/// Source which always fails, simulates an exhausted or missing platform generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableSource;

impl SecureSource for UnavailableSource {
    fn fill(&mut self, _buf: &mut [u8]) -> Result<(), Error> {
        Err(Error::RandomnessUnavailable(
            "secure source is disabled".to_string(),
        ))
    }
}
