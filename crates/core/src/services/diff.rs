use std::path::{Path, PathBuf};

use chrono::Utc;
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analysis::{aggregate_parallel, check_duplicates, DuplicatePolicy, MatchError};
use crate::model::DecompiledFunction;
use crate::report::{BinarySummary, DiffReport};
use crate::services::collect::{collect_functions, CollectError, EntryPolicy, FunctionCollection};
use crate::services::decompile::{
    DecompileError, DecompileOutput, DecompileRequest, DecompilerBackend,
};
use crate::util::{display_name, sha256_file};

/// Knobs for one diff run; usually built from [`crate::config::DiffConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffOptions {
    pub tool_path: Option<PathBuf>,
    pub workers: Option<usize>,
    pub on_bad_entry: EntryPolicy,
    pub duplicates: DuplicatePolicy,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            tool_path: None,
            workers: None,
            on_bad_entry: EntryPolicy::Skip,
            duplicates: DuplicatePolicy::LastWins,
        }
    }
}

/// Request to match the functions of `binary_one` against those of `binary_two`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffRequest {
    pub binary_one: PathBuf,
    pub binary_two: PathBuf,
    pub options: DiffOptions,
}

#[derive(Debug, Error)]
pub enum DiffError {
    #[error(transparent)]
    Decompile(#[from] DecompileError),
    #[error(transparent)]
    Collect(#[from] CollectError),
    #[error(transparent)]
    Match(#[from] MatchError),
    #[error("I/O error during diff: {0}")]
    Io(#[from] std::io::Error),
}

/// Progress notifications emitted while a diff runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffProgress {
    /// Matching is about to start for `total` functions of binary one.
    MatchingStarted { total: usize },
    /// One function of binary one has its match.
    FunctionMatched,
}

/// Everything a report renderer may need from a finished run.
#[derive(Debug, Clone)]
pub struct DiffOutcome {
    pub report: DiffReport,
    pub functions_one: Vec<DecompiledFunction>,
    pub functions_two: Vec<DecompiledFunction>,
}

/// Coordinator that decompiles both binaries with one backend and matches them.
pub struct DiffRunner<'a> {
    pub backend: &'a dyn DecompilerBackend,
}

impl<'a> DiffRunner<'a> {
    pub fn new(backend: &'a dyn DecompilerBackend) -> Self {
        Self { backend }
    }

    pub fn run(&self, request: &DiffRequest) -> Result<DiffOutcome, DiffError> {
        self.run_with_progress(request, |_| {})
    }

    pub fn run_with_progress<F>(
        &self,
        request: &DiffRequest,
        on_progress: F,
    ) -> Result<DiffOutcome, DiffError>
    where
        F: Fn(DiffProgress) + Sync,
    {
        let options = &request.options;
        let (output_one, collection_one) = self.prepare(&request.binary_one, options)?;
        let (_output_two, collection_two) = self.prepare(&request.binary_two, options)?;

        check_duplicates(&collection_one.functions, options.duplicates)?;

        on_progress(DiffProgress::MatchingStarted { total: collection_one.functions.len() });
        info!(
            "Matching {} functions against {} candidates",
            collection_one.functions.len(),
            collection_two.functions.len()
        );
        let matches = aggregate_parallel(
            &collection_one.functions,
            &collection_two.functions,
            options.workers,
            || on_progress(DiffProgress::FunctionMatched),
        )?;

        let report = DiffReport {
            generated_at: Utc::now().to_rfc3339(),
            backend: self.backend.name().to_string(),
            backend_version: output_one.tool_version,
            binary_one: summarize(&request.binary_one, &collection_one)?,
            binary_two: summarize(&request.binary_two, &collection_two)?,
            matches,
        };

        Ok(DiffOutcome {
            report,
            functions_one: collection_one.functions,
            functions_two: collection_two.functions,
        })
    }

    /// Decompile one binary into a scratch dir and load its functions.
    fn prepare(
        &self,
        binary: &Path,
        options: &DiffOptions,
    ) -> Result<(DecompileOutput, FunctionCollection), DiffError> {
        let scratch = tempfile::tempdir()?;
        let request = DecompileRequest {
            binary_path: binary.to_path_buf(),
            output_dir: scratch.path().to_path_buf(),
            tool_path: options.tool_path.clone(),
        };
        info!("Decompiling {} with backend '{}'", binary.display(), self.backend.name());
        let output = self.backend.decompile(&request)?;
        let collection = collect_functions(&output.functions_dir, options.on_bad_entry)?;
        Ok((output, collection))
    }
}

fn summarize(path: &Path, collection: &FunctionCollection) -> Result<BinarySummary, DiffError> {
    let sha256 = if path.is_file() { Some(sha256_file(path)?) } else { None };
    Ok(BinarySummary {
        path: path.display().to_string(),
        name: display_name(path),
        sha256,
        function_count: collection.functions.len(),
        rejected: collection.rejected.clone(),
    })
}
