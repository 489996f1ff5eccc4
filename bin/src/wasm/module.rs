//! WASM module implementation.
//! Wrapper over the `wasmtime::Module` struct with some specific validation and
//! configuration setup.

use wasmtime::{
    Instance as WasmModuleInstance, Module as WasmModule, Store as WasmStore, WasmParams,
    WasmResults,
};

use super::{context::Context, engine::Engine};
use crate::{
    errors::Error,
    plugin::{check_imports, Imports},
};

/// WASM module struct
pub struct Module {
    /// `wasmtime::Instance` module instance
    instance: WasmModuleInstance,
    /// `wasmtime::Store`
    store: WasmStore<Context>,
}

impl Module {
    /// Compile, verify imports and instantiate a WASM module.
    /// `module_bytes` may hold either the binary or the text format.
    ///
    /// # Errors
    /// - `Errors` with every `Error::UnresolvedImport` of the module.
    /// - WASM compilation or instantiation error.
    pub fn new(
        engine: &Engine, ctx: Context, module_bytes: &[u8], imports: &Imports,
    ) -> anyhow::Result<Self> {
        let module = WasmModule::new(engine, module_bytes)?;
        check_imports(imports, &module)?;

        tracing::info!(
            module = ctx.module_name(),
            id = %ctx.module_id(),
            "Instantiating module"
        );
        let mut store = WasmStore::new(engine, ctx);
        let instance = imports.linker().instantiate(&mut store, &module)?;

        Ok(Self { instance, store })
    }

    /// Call WASM module's function
    ///
    /// # Errors
    /// - WASM call error, host function errors are kept as the root cause and can be
    ///   downcast to `Error`.
    pub fn call_func<Args, Ret>(&mut self, name: &str, args: Args) -> anyhow::Result<Ret>
    where
        Args: WasmParams,
        Ret: WasmResults,
    {
        let func = self
            .instance
            .get_typed_func::<Args, Ret>(&mut self.store, name)?;
        func.call(&mut self.store, args)
    }

    /// Copy `len` bytes of the module's exported linear memory starting at `offset`.
    ///
    /// # Errors
    /// - `Error::MissingMemory`
    /// - `Error::MemoryAccess`
    pub fn read_memory(&mut self, offset: u32, len: usize) -> anyhow::Result<Vec<u8>> {
        let memory = self
            .instance
            .get_memory(&mut self.store, "memory")
            .ok_or(Error::MissingMemory)?;
        let mut buf = vec![0u8; len];
        memory
            .read(&self.store, usize::try_from(offset)?, &mut buf)
            .map_err(|_| Error::MemoryAccess { offset, len })?;
        Ok(buf)
    }

    /// Host context of the module.
    #[must_use]
    pub fn context(&self) -> &Context {
        self.store.data()
    }
}
