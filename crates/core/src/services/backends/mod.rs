pub mod directory;
#[cfg(feature = "ghidra-backend")]
pub mod ghidra;

pub use directory::DirectoryBackend;
#[cfg(feature = "ghidra-backend")]
pub use ghidra::GhidraBackend;
