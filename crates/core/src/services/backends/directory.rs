use crate::services::decompile::{
    DecompileError, DecompileOutput, DecompileRequest, DecompilerBackend,
};

/// Backend for binaries that were already decompiled: the "binary" path is the
/// directory of per-function files and is read in place.
pub struct DirectoryBackend;

impl DecompilerBackend for DirectoryBackend {
    fn decompile(&self, request: &DecompileRequest) -> Result<DecompileOutput, DecompileError> {
        if !request.binary_path.is_dir() {
            return Err(DecompileError::MissingBinary(request.binary_path.clone()));
        }
        Ok(DecompileOutput {
            functions_dir: request.binary_path.clone(),
            tool_version: Some("directory".into()),
            tool_path: None,
        })
    }

    fn name(&self) -> &'static str {
        "directory"
    }

    fn description(&self) -> &'static str {
        "Reads an existing directory of <binary>__<function>[__<tag>].c files"
    }
}
