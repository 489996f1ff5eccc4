//! Errors module.

use std::fmt::Display;

/// Errors raised by the random buffer bridge and its plugin registry.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The secure randomness source cannot produce bytes.
    #[error("Secure randomness source is unavailable: {0}")]
    RandomnessUnavailable(String),

    /// Requested length is negative, above the configured cap, or cannot be allocated.
    #[error("Invalid random buffer length: {0}")]
    InvalidLength(i64),

    /// Handle is not present in the object table.
    #[error("Unknown object handle: {0}")]
    UnknownHandle(u32),

    /// Object table ran out of handle values.
    #[error("Object handles exhausted")]
    HandlesExhausted,

    /// Guest module does not export its linear memory as `memory`.
    #[error("Module does not export a `memory`")]
    MissingMemory,

    /// Copy into the guest linear memory is out of bounds.
    #[error("Out of bounds memory access, offset: {offset}, len: {len}")]
    MemoryAccess {
        /// Start offset in the linear memory.
        offset: u32,
        /// Number of bytes to copy.
        len: usize,
    },

    /// Host function is already defined in the function table.
    #[error("Import is already defined: {0}")]
    DuplicateImport(String),

    /// Plugin with the same name is already added to the loader.
    #[error("Plugin is already added: {0}")]
    DuplicatePlugin(String),

    /// Plugin declared an import it did not register.
    #[error("Plugin `{plugin}` did not register its import `{import}`")]
    MissingRegistration {
        /// Plugin name.
        plugin: String,
        /// Declared import.
        import: String,
    },

    /// Module imports a function which is not defined in the function table.
    #[error("Unresolved import: {0}")]
    UnresolvedImport(String),
}

/// Errors struct which holds a collection of errors
#[derive(thiserror::Error, Debug)]
pub struct Errors(Vec<anyhow::Error>);

impl Display for Errors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Errors:")?;
        for err in &self.0 {
            writeln!(f, "- {err}")?;
        }
        Ok(())
    }
}

impl Errors {
    /// Create a new empty `Errors`
    pub(crate) fn new() -> Self {
        Self(Vec::new())
    }

    /// Add an error to the `Errors`
    pub(crate) fn add_err(&mut self, err: anyhow::Error) {
        self.0.push(err);
    }

    /// Iterate over the collected errors.
    pub fn iter(&self) -> impl Iterator<Item = &anyhow::Error> {
        self.0.iter()
    }

    /// Return errors if `Errors` is not empty or return `Ok(val)`
    pub(crate) fn return_result<T>(self, val: T) -> anyhow::Result<T> {
        if self.0.is_empty() {
            Ok(val)
        } else {
            Err(self.into())
        }
    }
}
