//! Library half of the `jad` CLI: command implementations and small helpers,
//! kept out of `main.rs` so tests can call them directly.

pub mod commands;

pub use commands::util::*;
