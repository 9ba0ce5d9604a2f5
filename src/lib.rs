pub mod config;
pub mod form;
pub mod logging;
pub mod units;

#[cfg(target_arch = "wasm32")]
pub mod wasm;
