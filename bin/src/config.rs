//! Bridge configuration JSON.

use std::{fs::File, io::Read, path::Path};

use serde::Deserialize;

use crate::random::DEFAULT_MAX_BUFFER_LEN;

/// Import namespace used by the engine's WebAssembly loader.
pub const DEFAULT_NAMESPACE: &str = "env";

/// Largest cap accepted for `max_buffer_len`, buffer lengths cross the boundary as `i32`.
const MAX_BUFFER_LEN_LIMIT: usize = 0x7FFF_FFFF;

/// Random buffer bridge configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BridgeConfig {
    /// Largest buffer a single call may request.
    max_buffer_len: usize,
    /// Import namespace the plugin functions are defined in.
    namespace: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            max_buffer_len: DEFAULT_MAX_BUFFER_LEN,
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

impl BridgeConfig {
    /// Create `BridgeConfig` from reader.
    ///
    /// # Errors
    /// - JSON deserialization errors.
    /// - Invalid `max_buffer_len` or empty `namespace`.
    pub fn from_reader(reader: impl Read) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Create `BridgeConfig` from a JSON file.
    ///
    /// # Errors
    /// - File open errors.
    /// - Same as [`BridgeConfig::from_reader`].
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Override the buffer length cap.
    ///
    /// # Errors
    /// - `max_buffer_len` exceeds `i32::MAX`.
    pub fn with_max_buffer_len(mut self, max_buffer_len: usize) -> anyhow::Result<Self> {
        self.max_buffer_len = max_buffer_len;
        self.validate()?;
        Ok(self)
    }

    /// Largest buffer a single call may request.
    #[must_use]
    pub fn max_buffer_len(&self) -> usize {
        self.max_buffer_len
    }

    /// Import namespace.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Check field values.
    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.max_buffer_len <= MAX_BUFFER_LEN_LIMIT,
            "`max_buffer_len` must not exceed {MAX_BUFFER_LEN_LIMIT}, got {}",
            self.max_buffer_len
        );
        anyhow::ensure!(!self.namespace.is_empty(), "`namespace` must not be empty");
        Ok(())
    }
}
