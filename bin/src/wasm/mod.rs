//! WASM related structures and functions.
//! All implementation based on [wasmtime](https://crates.io/crates/wasmtime) crate dependecy.

pub mod context;
pub mod engine;
pub mod module;
