//! quadrand, a secure random buffer bridge for macroquad WebAssembly modules.
//!
//! WebAssembly has no access to platform randomness. The host defines
//! `env.macroquad_js_get_random_buffer`, which fills a buffer from the operating system
//! CSPRNG and hands it to the guest as an object handle the guest copies into its
//! linear memory.

pub mod cli;
pub mod config;
pub mod errors;
pub mod logger;
pub mod plugin;
pub mod random;
pub mod wasm;
