use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{anyhow, Context, Result};
use log::LevelFilter;

/// Canonicalize a path if possible, falling back to the given string
/// relative to the current working directory.
pub fn canonicalize_or_current(path: &str) -> Result<PathBuf> {
    let path = Path::new(path);
    if path == Path::new(".") {
        Ok(env::current_dir().context("Failed to get current directory")?)
    } else {
        // Try to canonicalize; if it fails (e.g., path does not exist yet),
        // join it with the current dir to get an absolute path.
        match path.canonicalize() {
            Ok(p) => Ok(p),
            Err(_) => {
                let cwd = env::current_dir().context("Failed to get current directory")?;
                Ok(cwd.join(path))
            }
        }
    }
}

/// Map `-v` occurrences to a log level: warn, info, then debug and beyond.
pub fn verbosity_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the env_logger backend. `RUST_LOG` overrides the verbosity flags.
pub fn init_logging(verbose: u8) {
    // A logger may already be installed when the command functions are driven
    // in-process, as the tests do.
    if let Err(e) = env_logger::Builder::new()
        .filter(None, verbosity_level(verbose))
        .parse_default_env()
        .format_timestamp(None)
        .try_init()
    {
        log::debug!("keeping the existing logger: {e}");
    }
}

/// Open `path` with the platform's default handler (a browser for HTML files).
pub fn open_in_browser(path: &Path) -> Result<()> {
    let mut command = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]);
        c
    } else if cfg!(target_os = "macos") {
        Command::new("open")
    } else {
        Command::new("xdg-open")
    };
    let status = command
        .arg(path)
        .status()
        .with_context(|| format!("Failed to launch a browser for {}", path.display()))?;
    if !status.success() {
        return Err(anyhow!("Browser launcher exited with {}", status));
    }
    Ok(())
}
