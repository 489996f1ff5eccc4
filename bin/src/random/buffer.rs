//! Random buffer allocation.

use super::SecureSource;
use crate::errors::Error;

/// Default upper bound of a single random buffer, 16 MiB.
pub const DEFAULT_MAX_BUFFER_LEN: usize = 16 * 1024 * 1024;

/// A freshly generated sequence of secure random bytes, owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomBuffer(Vec<u8>);

impl RandomBuffer {
    /// Buffer length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` for a zero length buffer.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Buffer bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume the buffer returning its bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

/// Produce a buffer of exactly `length` bytes filled from `source`.
///
/// `length == 0` returns an empty buffer and does not touch the source.
///
/// # Errors
/// - `Error::InvalidLength`: `length` is negative, greater than `max_len`, or the
///   allocation fails.
/// - `Error::RandomnessUnavailable`: the source could not produce bytes. No buffer is
///   returned in that case.
pub fn get_random_buffer(
    source: &mut dyn SecureSource, length: i64, max_len: usize,
) -> Result<RandomBuffer, Error> {
    let len = usize::try_from(length).map_err(|_| Error::InvalidLength(length))?;
    if len > max_len {
        return Err(Error::InvalidLength(length));
    }
    if len == 0 {
        return Ok(RandomBuffer(Vec::new()));
    }

    let mut bytes = Vec::new();
    bytes
        .try_reserve_exact(len)
        .map_err(|_| Error::InvalidLength(length))?;
    bytes.resize(len, 0);
    source.fill(&mut bytes)?;

    Ok(RandomBuffer(bytes))
}
