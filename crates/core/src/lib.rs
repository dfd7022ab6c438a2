// Library crate: the headless storefront runtime. Everything here is pure
// state and testable natively; browser wiring lives in shopfront-wasm.

pub mod app;
pub mod config;
pub mod harness;
pub mod host;
pub mod scroll;
pub mod state;
