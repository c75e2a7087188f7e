//! Core data model for decompiled functions and match results.
//!
//! Functions are created fresh for every diff run from the decompiler's
//! per-function output files and dropped once the match mapping exists.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analysis::canonicalize;

/// Separator between the segments of a decompiled function's file name.
pub const NAME_DELIMITER: &str = "__";

/// File extensions stripped from a decompiled file name before splitting it.
pub const SOURCE_EXTENSIONS: &[&str] = &["c", "cpp", "cc", "h", "txt"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FunctionNameError {
    #[error("Malformed function name '{0}': expected <binary>__<function>[__<tag>...]")]
    MalformedFunctionName(String),
}

/// Identity segments decoded from a decompiled function's file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecompiledName {
    pub binary_name: String,
    pub function_name: String,
    pub version_tag: Vec<String>,
}

impl DecompiledName {
    /// Split `<binary>__<function>[__<tag>...][.ext]` into its segments.
    ///
    /// One trailing source extension (see [`SOURCE_EXTENSIONS`]) is removed first, so
    /// `libc.so.6__printf__00101000.c` yields binary `libc.so.6`, function `printf`
    /// and version tag `["00101000"]`.
    pub fn parse(file_name: &str) -> Result<Self, FunctionNameError> {
        let stem = strip_source_extension(file_name);
        let mut segments = stem.split(NAME_DELIMITER);

        let binary_name = segments.next().unwrap_or_default();
        let function_name = match segments.next() {
            Some(name) => name,
            None => return Err(FunctionNameError::MalformedFunctionName(file_name.to_string())),
        };
        if binary_name.is_empty() || function_name.is_empty() {
            return Err(FunctionNameError::MalformedFunctionName(file_name.to_string()));
        }

        Ok(Self {
            binary_name: binary_name.to_string(),
            function_name: function_name.to_string(),
            version_tag: segments.map(str::to_string).collect(),
        })
    }
}

fn strip_source_extension(file_name: &str) -> &str {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if SOURCE_EXTENSIONS.contains(&ext) => stem,
        _ => file_name,
    }
}

/// One function extracted from one binary by the decompiler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecompiledFunction {
    pub binary_name: String,
    pub function_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub version_tag: Vec<String>,
    pub raw_text: String,
}

impl DecompiledFunction {
    pub fn new(
        binary_name: impl Into<String>,
        function_name: impl Into<String>,
        raw_text: impl Into<String>,
    ) -> Self {
        Self {
            binary_name: binary_name.into(),
            function_name: function_name.into(),
            version_tag: Vec::new(),
            raw_text: raw_text.into(),
        }
    }

    pub fn from_name(name: DecompiledName, raw_text: impl Into<String>) -> Self {
        Self {
            binary_name: name.binary_name,
            function_name: name.function_name,
            version_tag: name.version_tag,
            raw_text: raw_text.into(),
        }
    }

    /// The comparable body of this function's text.
    pub fn canonical_body(&self) -> &str {
        canonicalize(&self.raw_text)
    }
}

/// Best match found in binary B for one function of binary A.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    #[serde(skip)]
    pub source_function_name: String,
    /// Empty when binary B had no candidates.
    pub matched_function_name: String,
    pub confidence: u8,
    /// Position of the selected function in binary B's discovery order. Names may
    /// repeat in B, so this is what identifies the function that was compared.
    #[serde(skip)]
    pub matched_index: Option<usize>,
}

impl MatchRecord {
    pub fn new(source: impl Into<String>, matched: impl Into<String>, confidence: u8) -> Self {
        Self {
            source_function_name: source.into(),
            matched_function_name: matched.into(),
            confidence,
            matched_index: None,
        }
    }

    pub fn with_matched_index(mut self, index: usize) -> Self {
        self.matched_index = Some(index);
        self
    }

    pub fn is_unmatched(&self) -> bool {
        self.matched_function_name.is_empty()
    }
}

/// Function name in binary A mapped to its match record.
pub type MatchMap = BTreeMap<String, MatchRecord>;
