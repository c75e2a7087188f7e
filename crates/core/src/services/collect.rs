use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{DecompiledFunction, DecompiledName, FunctionNameError};

/// Per-entry failure while turning a decompiled file into a function.
#[derive(Debug, Error)]
pub enum EntryError {
    #[error("{path}: {source}")]
    MalformedFunctionName {
        path: PathBuf,
        #[source]
        source: FunctionNameError,
    },
    #[error("Unreadable function text at {path}: {source}")]
    UnreadableInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl EntryError {
    pub fn path(&self) -> &Path {
        match self {
            EntryError::MalformedFunctionName { path, .. } => path,
            EntryError::UnreadableInput { path, .. } => path,
        }
    }
}

#[derive(Debug, Error)]
pub enum CollectError {
    #[error("Failed to read decompiled functions directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Entry(#[from] EntryError),
}

/// What to do with an entry that cannot become a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryPolicy {
    /// Log and record the entry, keep going.
    #[default]
    Skip,
    /// Fail the whole collection on the first bad entry.
    Abort,
}

/// Entry left out of a collection, kept for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedEntry {
    pub path: String,
    pub reason: String,
}

impl From<&EntryError> for RejectedEntry {
    fn from(err: &EntryError) -> Self {
        Self { path: err.path().display().to_string(), reason: err.to_string() }
    }
}

/// Functions of one binary in discovery order, plus the entries that were skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCollection {
    pub functions: Vec<DecompiledFunction>,
    pub rejected: Vec<RejectedEntry>,
}

/// List the regular files of `dir` sorted by file name, which defines discovery order.
pub fn discover_entries(dir: &Path) -> Result<Vec<PathBuf>, CollectError> {
    let read_err = |source| CollectError::ReadDir { path: dir.to_path_buf(), source };
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        if path.is_file() {
            entries.push(path);
        }
    }
    entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(entries)
}

/// Build a function from one decompiled file.
pub fn load_function(path: &Path) -> Result<DecompiledFunction, EntryError> {
    let file_name = path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
    let name = DecompiledName::parse(&file_name).map_err(|source| {
        EntryError::MalformedFunctionName { path: path.to_path_buf(), source }
    })?;
    let raw_text = fs::read_to_string(path)
        .map_err(|source| EntryError::UnreadableInput { path: path.to_path_buf(), source })?;
    Ok(DecompiledFunction::from_name(name, raw_text))
}

/// Load every function file in `dir`, applying `policy` to bad entries.
pub fn collect_functions(
    dir: &Path,
    policy: EntryPolicy,
) -> Result<FunctionCollection, CollectError> {
    let mut collection = FunctionCollection::default();
    for path in discover_entries(dir)? {
        match load_function(&path) {
            Ok(function) => collection.functions.push(function),
            Err(err) => match policy {
                EntryPolicy::Abort => return Err(err.into()),
                EntryPolicy::Skip => {
                    warn!("Skipping {}", err);
                    collection.rejected.push(RejectedEntry::from(&err));
                }
            },
        }
    }
    info!(
        "Collected {} functions from {} ({} skipped)",
        collection.functions.len(),
        dir.display(),
        collection.rejected.len()
    );
    Ok(collection)
}
