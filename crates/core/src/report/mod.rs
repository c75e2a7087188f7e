//! Renderings of a finished diff: JSON mapping, HTML page, console listing.
//!
//! Renderers only format; writing files and opening browsers is left to the caller.

pub mod console;
pub mod html;
pub mod json;

use serde::{Deserialize, Serialize};

use crate::model::MatchMap;
use crate::services::collect::RejectedEntry;

pub use console::render_console;
pub use html::{escape_html, render_html};
pub use json::render_json;

/// Description of one input binary in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinarySummary {
    pub path: String,
    pub name: String,
    /// Only set when the input was a file rather than a pre-decompiled directory.
    pub sha256: Option<String>,
    pub function_count: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rejected: Vec<RejectedEntry>,
}

/// Result of one diff run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffReport {
    pub generated_at: String,
    pub backend: String,
    pub backend_version: Option<String>,
    pub binary_one: BinarySummary,
    pub binary_two: BinarySummary,
    pub matches: MatchMap,
}

impl DiffReport {
    /// Number of source functions that found any candidate.
    pub fn matched_count(&self) -> usize {
        self.matches.values().filter(|record| !record.is_unmatched()).count()
    }

    /// Mean confidence over all source functions, 0 when there are none.
    pub fn mean_confidence(&self) -> f64 {
        if self.matches.is_empty() {
            return 0.0;
        }
        let total: u64 = self.matches.values().map(|record| u64::from(record.confidence)).sum();
        total as f64 / self.matches.len() as f64
    }
}
