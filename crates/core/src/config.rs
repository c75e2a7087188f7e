use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::analysis::DuplicatePolicy;
use crate::services::collect::EntryPolicy;
use crate::services::diff::DiffOptions;

/// Backend used when neither the CLI nor the config names one.
pub const DEFAULT_BACKEND: &str = "ghidra";

/// Serializable configuration for diff runs.
///
/// Loaded from a YAML or JSON file; every field is optional and CLI flags take
/// precedence over what is set here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    /// Decompiler backend name (see `jad backends`).
    pub backend: String,
    /// Path to Ghidra's analyzeHeadless; falls back to the environment when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ghidra_headless: Option<String>,
    /// Matching worker threads; unset or 0 uses one per CPU.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,
    pub on_bad_entry: EntryPolicy,
    pub duplicates: DuplicatePolicy,
    /// Open HTML reports in the default browser after writing them.
    pub open_browser: bool,
    /// Show a progress bar while matching.
    pub progress: bool,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            backend: DEFAULT_BACKEND.to_string(),
            ghidra_headless: None,
            workers: None,
            on_bad_entry: EntryPolicy::Skip,
            duplicates: DuplicatePolicy::LastWins,
            open_browser: true,
            progress: true,
        }
    }
}

impl DiffConfig {
    /// Options for the diff runner derived from this config.
    pub fn diff_options(&self) -> DiffOptions {
        DiffOptions {
            tool_path: self.ghidra_headless.as_ref().map(PathBuf::from),
            workers: self.workers.filter(|&n| n > 0),
            on_bad_entry: self.on_bad_entry,
            duplicates: self.duplicates,
        }
    }
}

/// Load a config file, choosing the format from its extension (yaml/yml/json).
pub fn load_diff_config(path: &Path) -> Result<DiffConfig> {
    let body = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config at {}", path.display()))?;
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    match ext {
        "yaml" | "yml" => serde_yaml::from_str(&body)
            .with_context(|| format!("Failed to parse YAML config {}", path.display())),
        "json" => serde_json::from_str(&body)
            .with_context(|| format!("Failed to parse JSON config {}", path.display())),
        other => Err(anyhow!(
            "Unsupported config format '{}' for {} (expected yaml, yml or json)",
            other,
            path.display()
        )),
    }
}
