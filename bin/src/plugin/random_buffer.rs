//! Random buffer bridge plugin.

use wasmtime::Caller;

use super::{Imports, Plugin};
use crate::wasm::context::Context;

/// Import name the engine resolves for secure random bytes.
pub const RANDOM_BUFFER_IMPORT: &str = "macroquad_js_get_random_buffer";

/// Defines `macroquad_js_get_random_buffer(length: i32) -> i32`.
///
/// Each call fills a fresh buffer of `length` bytes from the context's secure source
/// and returns a handle to it (see [`super::js_objects`]). Errors trap the guest,
/// nothing is stored on failure.
pub struct RandomBufferBridge {
    /// Import namespace
    namespace: String,
}

impl RandomBufferBridge {
    /// Plugin name
    pub const NAME: &'static str = "random_buffer";

    /// Create a plugin defining its import in `namespace`.
    #[must_use]
    pub fn new(namespace: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
        }
    }
}

impl Plugin for RandomBufferBridge {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn imports(&self) -> &[&'static str] {
        &[RANDOM_BUFFER_IMPORT]
    }

    fn register(&self, imports: &mut Imports) -> anyhow::Result<()> {
        imports.func_wrap(
            &self.namespace,
            RANDOM_BUFFER_IMPORT,
            |mut caller: Caller<'_, Context>, length: i32| -> wasmtime::Result<u32> {
                let ctx = caller.data_mut();
                let buffer = ctx.random_buffer(i64::from(length))?;
                Ok(ctx.objects_mut().insert(buffer.into_bytes())?)
            },
        )
    }
}
