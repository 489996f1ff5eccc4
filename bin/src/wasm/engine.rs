//! WASM engine implementation
//! Wrapper over the `wasmtime::Engine` struct with some specific configuration setup.

use std::ops::Deref;

use anyhow::anyhow;
use wasmtime::{Config as WasmConfig, Engine as WasmEngine};

/// WASM Engine struct
#[derive(Clone)]
pub struct Engine(WasmEngine);

impl Deref for Engine {
    type Target = WasmEngine;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Engine {
    /// Creates a new instance of the `Engine`.
    ///
    /// Reference types are enabled, rustc emits them for `wasm32-unknown-unknown`.
    ///
    /// # Errors
    ///  - `wasmtime::Engine` configuration errors
    pub fn new() -> anyhow::Result<Self> {
        let mut config = WasmConfig::new();
        config.consume_fuel(false);
        config.wasm_reference_types(true);

        let engine = WasmEngine::new(&config).map_err(|e| {
            anyhow!(
                "Incorrect `wasmtime::Engine` configuration: {}",
                e.to_string()
            )
        })?;

        Ok(Self(engine))
    }
}
