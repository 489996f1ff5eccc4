//! Host object table.
//!
//! Host functions hand byte buffers to the guest as opaque `u32` handles. The guest
//! resolves a handle into its own linear memory with the three imports below, which
//! are the calls the engine's js-utils layer makes on a returned object:
//!
//! - `js_buf_length(handle: i32) -> i32` - number of bytes held by `handle`.
//! - `js_unsafe_get_buf(handle: i32, ptr: i32)` - copy the bytes to `[ptr, ptr + len)`.
//! - `js_free_object(handle: i32)` - drop the host object.

use std::collections::HashMap;

use wasmtime::{Caller, Extern};

use super::{Imports, Plugin};
use crate::{errors::Error, wasm::context::Context};

/// `js_buf_length` import name
pub const BUF_LENGTH_IMPORT: &str = "js_buf_length";
/// `js_unsafe_get_buf` import name
pub const GET_BUF_IMPORT: &str = "js_unsafe_get_buf";
/// `js_free_object` import name
pub const FREE_OBJECT_IMPORT: &str = "js_free_object";

/// Byte buffers owned by the host and addressed by handle.
/// Handles start at 1 and are never reused.
#[derive(Debug)]
pub struct ObjectTable {
    /// Next handle to issue
    next: u32,
    /// Live objects
    objects: HashMap<u32, Vec<u8>>,
}

impl Default for ObjectTable {
    fn default() -> Self {
        Self {
            next: 1,
            objects: HashMap::new(),
        }
    }
}

impl ObjectTable {
    /// Store `bytes` and return its handle.
    ///
    /// # Errors
    /// - `Error::HandlesExhausted`
    pub fn insert(&mut self, bytes: Vec<u8>) -> Result<u32, Error> {
        let handle = self.next;
        self.next = handle.checked_add(1).ok_or(Error::HandlesExhausted)?;
        self.objects.insert(handle, bytes);
        Ok(handle)
    }

    /// Bytes held by `handle`.
    ///
    /// # Errors
    /// - `Error::UnknownHandle`
    pub fn get(&self, handle: u32) -> Result<&[u8], Error> {
        self.objects
            .get(&handle)
            .map(Vec::as_slice)
            .ok_or(Error::UnknownHandle(handle))
    }

    /// Drop the object held by `handle`.
    ///
    /// # Errors
    /// - `Error::UnknownHandle`
    pub fn remove(&mut self, handle: u32) -> Result<Vec<u8>, Error> {
        self.objects
            .remove(&handle)
            .ok_or(Error::UnknownHandle(handle))
    }

    /// Number of live objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` when no object is alive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// Plugin defining the object access imports.
pub struct JsObjectsPlugin {
    /// Import namespace
    namespace: String,
}

impl JsObjectsPlugin {
    /// Plugin name
    pub const NAME: &'static str = "js_objects";

    /// Create a plugin defining its imports in `namespace`.
    #[must_use]
    pub fn new(namespace: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
        }
    }
}

impl Plugin for JsObjectsPlugin {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn imports(&self) -> &[&'static str] {
        &[BUF_LENGTH_IMPORT, GET_BUF_IMPORT, FREE_OBJECT_IMPORT]
    }

    fn register(&self, imports: &mut Imports) -> anyhow::Result<()> {
        imports.func_wrap(
            &self.namespace,
            BUF_LENGTH_IMPORT,
            |caller: Caller<'_, Context>, handle: u32| -> wasmtime::Result<u32> {
                let len = caller.data().objects().get(handle)?.len();
                Ok(u32::try_from(len)?)
            },
        )?;

        imports.func_wrap(
            &self.namespace,
            GET_BUF_IMPORT,
            |mut caller: Caller<'_, Context>, handle: u32, ptr: u32| -> wasmtime::Result<()> {
                let memory = caller
                    .get_export("memory")
                    .and_then(Extern::into_memory)
                    .ok_or(Error::MissingMemory)?;
                let (data, ctx) = memory.data_and_store_mut(&mut caller);
                let bytes = ctx.objects().get(handle)?;

                let start = usize::try_from(ptr)?;
                let dst = start
                    .checked_add(bytes.len())
                    .and_then(|end| data.get_mut(start..end))
                    .ok_or(Error::MemoryAccess {
                        offset: ptr,
                        len: bytes.len(),
                    })?;
                dst.copy_from_slice(bytes);
                Ok(())
            },
        )?;

        imports.func_wrap(
            &self.namespace,
            FREE_OBJECT_IMPORT,
            |mut caller: Caller<'_, Context>, handle: u32| -> wasmtime::Result<()> {
                caller.data_mut().objects_mut().remove(handle)?;
                Ok(())
            },
        )?;

        Ok(())
    }
}
