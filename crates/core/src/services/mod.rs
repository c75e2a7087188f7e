//! Services around the matching engine: decompiler backends, function discovery,
//! and the diff runner that ties them together.

pub mod backends;
pub mod collect;
pub mod decompile;
pub mod diff;
