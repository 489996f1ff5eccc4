//! WASM host context implementation.

use rusty_ulid::Ulid;

use crate::{
    config::BridgeConfig,
    errors::Error,
    plugin::js_objects::ObjectTable,
    random::{get_random_buffer, RandomBuffer, SecureSource},
};

/// A WASM host context structure, which is intended to be passed to the `wasmtime::Store`
/// during the WASM state initialization process.
pub struct Context {
    /// Guest module name
    module_name: String,

    /// module ULID id
    module_id: Ulid,

    /// Host objects handed to the guest by handle
    objects: ObjectTable,

    /// Secure randomness source
    source: Box<dyn SecureSource>,

    /// Largest random buffer a single call may request
    max_buffer_len: usize,
}

impl Context {
    /// Creates a new instance of the `Context`.
    pub fn new(
        module_name: String, source: Box<dyn SecureSource>, config: &BridgeConfig,
    ) -> Self {
        Self {
            module_name,
            module_id: Ulid::generate(),
            objects: ObjectTable::default(),
            source,
            max_buffer_len: config.max_buffer_len(),
        }
    }

    /// Get the module name
    #[must_use]
    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    /// Get the module id
    #[must_use]
    pub fn module_id(&self) -> &Ulid {
        &self.module_id
    }

    /// Host objects table
    #[must_use]
    pub fn objects(&self) -> &ObjectTable {
        &self.objects
    }

    /// Mutable host objects table
    pub(crate) fn objects_mut(&mut self) -> &mut ObjectTable {
        &mut self.objects
    }

    /// Generate a random buffer with the context source and length cap.
    ///
    /// # Errors
    /// Same as [`get_random_buffer`].
    pub fn random_buffer(&mut self, length: i64) -> Result<RandomBuffer, Error> {
        get_random_buffer(self.source.as_mut(), length, self.max_buffer_len)
    }
}
