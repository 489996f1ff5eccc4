//! Secure random buffers.
//!
//! [`get_random_buffer`] is the whole operation exposed to guest modules: validate the
//! requested length, allocate, and fill every byte from a [`SecureSource`]. It never
//! falls back to a weaker generator.

mod buffer;
mod source;

pub use buffer::{get_random_buffer, RandomBuffer, DEFAULT_MAX_BUFFER_LEN};
pub use source::{OsSource, SecureSource, UnavailableSource};
