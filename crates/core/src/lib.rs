//! jad-core
//!
//! Core library for matching functions between two decompiled binaries.
//!
//! For every function of the first binary the engine reports the most similar
//! function of the second binary, scored 0-100 on the text of their first
//! brace-delimited blocks. This crate holds the data model, the matching engine,
//! decompiler backends, function discovery, configuration, and report rendering so
//! the CLI stays a thin wrapper.

pub mod analysis;
pub mod config;
pub mod model;
pub mod report;
pub mod services;
pub mod util;

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
