use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Request to decompile one binary into a directory of per-function files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecompileRequest {
    pub binary_path: PathBuf,
    /// Scratch directory the backend may write function files into.
    pub output_dir: PathBuf,
    /// Optional explicit tool path (e.g., a configured analyzeHeadless).
    pub tool_path: Option<PathBuf>,
}

/// Where a backend left the decompiled function files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecompileOutput {
    pub functions_dir: PathBuf,
    pub tool_version: Option<String>,
    pub tool_path: Option<String>,
}

#[derive(Debug, Error)]
pub enum DecompileError {
    #[error("Binary not found at {0}")]
    MissingBinary(PathBuf),
    #[error("Decompiler backend not found: {0}")]
    MissingBackend(String),
    #[error("Decompiler backend error: {0}")]
    Backend(String),
    #[error("I/O error while decompiling: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait implemented by decompiler backends (e.g., Ghidra headless).
pub trait DecompilerBackend: Send + Sync {
    fn decompile(&self, request: &DecompileRequest) -> Result<DecompileOutput, DecompileError>;
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
}

/// Registry for decompiler backends; callers select by name.
#[derive(Default)]
pub struct DecompilerRegistry {
    backends: HashMap<String, Box<dyn DecompilerBackend>>,
}

impl DecompilerRegistry {
    pub fn new() -> Self {
        Self { backends: HashMap::new() }
    }

    pub fn register<B: DecompilerBackend + 'static>(&mut self, backend: B) -> &mut Self {
        self.backends.insert(backend.name().to_string(), Box::new(backend));
        self
    }

    pub fn get(&self, name: &str) -> Option<&dyn DecompilerBackend> {
        self.backends.get(name).map(|b| &**b)
    }

    /// Look up a backend, failing with the list of known names.
    pub fn require(&self, name: &str) -> Result<&dyn DecompilerBackend, DecompileError> {
        self.get(name).ok_or_else(|| {
            DecompileError::MissingBackend(format!(
                "'{}' (available: {})",
                name,
                self.names().join(", ")
            ))
        })
    }

    /// Return a sorted list of registered backend names for error messages/help.
    pub fn names(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.backends.keys().cloned().collect();
        keys.sort();
        keys
    }
}

/// Registry populated with every backend compiled into this build.
pub fn default_decompiler_registry() -> DecompilerRegistry {
    let mut registry = DecompilerRegistry::new();
    registry.register(crate::services::backends::DirectoryBackend);
    #[cfg(feature = "ghidra-backend")]
    {
        registry.register(crate::services::backends::GhidraBackend);
    }
    registry
}
