use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::{info, warn};

use crate::services::decompile::{
    DecompileError, DecompileOutput, DecompileRequest, DecompilerBackend,
};

const SCRIPT_NAME: &str = "jad_decompile.py";

/// Ghidra post-script writing one `<binary>__<function>__<entry>.c` file per function
/// into the directory passed as its first argument. Names are sanitized so they never
/// contain the `__` delimiter or end with an underscore.
const DECOMPILE_SCRIPT: &str = r#"# Decompile every function of the current program.
# @category jad
import os
import re

from ghidra.app.decompiler import DecompInterface
from ghidra.util.task import ConsoleTaskMonitor


def clean(text):
    text = re.sub(r'[^A-Za-z0-9_.$@~-]', '_', text)
    while '__' in text:
        text = text.replace('__', '_')
    text = text.rstrip('_')
    return text or 'unnamed'


out_dir = getScriptArgs()[0]
binary = clean(currentProgram.getName())
monitor = ConsoleTaskMonitor()
decompiler = DecompInterface()
decompiler.openProgram(currentProgram)

for function in currentProgram.getFunctionManager().getFunctions(True):
    result = decompiler.decompileFunction(function, 60, monitor)
    if not result.decompileCompleted():
        continue
    file_name = '%s__%s__%s.c' % (binary, clean(function.getName()), clean(str(function.getEntryPoint())))
    handle = open(os.path.join(out_dir, file_name), 'w')
    try:
        handle.write(result.getDecompiledFunction().getC())
    finally:
        handle.close()
"#;

/// Resolve the analyzeHeadless executable path.
///
/// Precedence:
/// - An explicit tool path from the request (CLI flag or config).
/// - `GHIDRA_ANALYZE_HEADLESS` pointing directly to the executable.
/// - `GHIDRA_INSTALL_DIR`, appended with platform-specific analyzeHeadless name.
pub fn resolve_headless_path(explicit: Option<&Path>) -> Result<PathBuf, String> {
    if let Some(path) = explicit {
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        return Err(format!("analyzeHeadless not found at {}", path.display()));
    }

    if let Ok(p) = env::var("GHIDRA_ANALYZE_HEADLESS") {
        let path = PathBuf::from(p);
        if path.is_file() {
            return Ok(path);
        }
    }

    if let Ok(dir) = env::var("GHIDRA_INSTALL_DIR") {
        let mut p = PathBuf::from(dir);
        if cfg!(windows) {
            p = p.join("analyzeHeadless.bat");
        } else {
            p = p.join("analyzeHeadless");
        }
        if p.is_file() {
            return Ok(p);
        }
    }

    Err("Set GHIDRA_ANALYZE_HEADLESS (path to analyzeHeadless) or GHIDRA_INSTALL_DIR".to_string())
}

fn ghidra_version(headless: &Path) -> Result<String, String> {
    let output = Command::new(headless)
        .arg("-version")
        .output()
        .map_err(|e| format!("failed to spawn analyzeHeadless: {e}"))?;
    if !output.status.success() {
        return Err(format!("analyzeHeadless exited with {}", output.status));
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    let first = stdout.lines().next().unwrap_or("").trim();
    if first.is_empty() {
        Err("analyzeHeadless returned empty version string".to_string())
    } else {
        Ok(first.to_string())
    }
}

/// Ghidra headless backend: imports the binary into a throwaway project and runs a
/// post-script that writes every decompiled function to the request's output dir.
pub struct GhidraBackend;

impl DecompilerBackend for GhidraBackend {
    fn decompile(&self, request: &DecompileRequest) -> Result<DecompileOutput, DecompileError> {
        if !request.binary_path.is_file() {
            return Err(DecompileError::MissingBinary(request.binary_path.clone()));
        }

        let headless =
            resolve_headless_path(request.tool_path.as_deref()).map_err(DecompileError::Backend)?;
        let version = ghidra_version(&headless).map_err(DecompileError::Backend)?;

        let workspace = tempfile::tempdir()?;
        let script_dir = workspace.path().join("scripts");
        let project_dir = workspace.path().join("project");
        fs::create_dir_all(&script_dir)?;
        fs::create_dir_all(&project_dir)?;
        fs::create_dir_all(&request.output_dir)?;
        fs::write(script_dir.join(SCRIPT_NAME), DECOMPILE_SCRIPT)?;

        info!("Decompiling {} with {}", request.binary_path.display(), version);
        let output = Command::new(&headless)
            .arg(&project_dir)
            .arg("jad")
            .arg("-import")
            .arg(&request.binary_path)
            .arg("-scriptPath")
            .arg(&script_dir)
            .arg("-postScript")
            .arg(SCRIPT_NAME)
            .arg(&request.output_dir)
            .arg("-deleteProject")
            .output()
            .map_err(|e| DecompileError::Backend(format!("failed to spawn analyzeHeadless: {e}")))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DecompileError::Backend(format!(
                "analyzeHeadless exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        if fs::read_dir(&request.output_dir)?.next().is_none() {
            warn!("Ghidra produced no functions for {}", request.binary_path.display());
        }

        Ok(DecompileOutput {
            functions_dir: request.output_dir.clone(),
            tool_version: Some(version),
            tool_path: Some(headless.to_string_lossy().to_string()),
        })
    }

    fn name(&self) -> &'static str {
        "ghidra"
    }

    fn description(&self) -> &'static str {
        "Ghidra headless decompiler (requires GHIDRA_ANALYZE_HEADLESS or GHIDRA_INSTALL_DIR)"
    }
}
