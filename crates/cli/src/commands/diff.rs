use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use log::warn;

use jad_core::analysis::DuplicatePolicy;
use jad_core::config::{load_diff_config, DiffConfig};
use jad_core::report::{render_console, render_html, render_json};
use jad_core::services::collect::EntryPolicy;
use jad_core::services::decompile::default_decompiler_registry;
use jad_core::services::diff::{DiffOutcome, DiffProgress, DiffRequest, DiffRunner};

use crate::commands::util::{canonicalize_or_current, open_in_browser};

/// Arguments of `jad diff`.
#[derive(Args, Debug, Clone, Default)]
pub struct DiffArgs {
    /// Path to the base binary (i.e. binary 1).
    #[arg(long, visible_alias = "b1")]
    pub binary_one: String,

    /// Path to the secondary binary (i.e. binary 2).
    #[arg(long, visible_alias = "b2")]
    pub binary_two: String,

    /// Write the match mapping as JSON to this file.
    #[arg(long, conflicts_with = "html_output")]
    pub json_output: Option<String>,

    /// Write an HTML report to this file and open it in a browser.
    #[arg(long)]
    pub html_output: Option<String>,

    /// Decompiler backend (see `jad backends`). Defaults to the config value or `ghidra`.
    #[arg(long)]
    pub backend: Option<String>,

    /// Explicit decompiler tool path (e.g., analyzeHeadless).
    #[arg(long)]
    pub tool_path: Option<String>,

    /// YAML or JSON config file.
    #[arg(long)]
    pub config: Option<String>,

    /// Number of matching worker threads (0 = one per CPU).
    #[arg(long)]
    pub jobs: Option<usize>,

    /// Do not open the HTML report after writing it.
    #[arg(long, default_value_t = false)]
    pub no_open: bool,

    /// Hide the progress bar.
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,

    /// Fail on the first decompiled file that cannot be read or named.
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    /// Fail when binary one has several functions with the same name.
    #[arg(long, default_value_t = false)]
    pub reject_duplicates: bool,
}

/// Load the config named by `args` (or defaults) and apply CLI overrides.
pub fn resolve_diff_config(args: &DiffArgs) -> Result<DiffConfig> {
    let mut config = match &args.config {
        Some(path) => load_diff_config(Path::new(path))?,
        None => DiffConfig::default(),
    };
    if let Some(backend) = &args.backend {
        config.backend = backend.clone();
    }
    if let Some(tool_path) = &args.tool_path {
        config.ghidra_headless = Some(tool_path.clone());
    }
    if let Some(jobs) = args.jobs {
        config.workers = Some(jobs);
    }
    if args.strict {
        config.on_bad_entry = EntryPolicy::Abort;
    }
    if args.reject_duplicates {
        config.duplicates = DuplicatePolicy::Reject;
    }
    if args.no_open {
        config.open_browser = false;
    }
    if args.no_progress {
        config.progress = false;
    }
    Ok(config)
}

/// Decompile both binaries, match their functions, and emit the chosen report.
pub fn diff_command(args: &DiffArgs) -> Result<()> {
    let config = resolve_diff_config(args)?;
    let outcome = run_diff(args, &config)?;

    if let Some(out) = &args.json_output {
        let json = render_json(&outcome.report.matches)
            .context("Failed to serialize matches to JSON")?;
        write_report(out, &json)?;
        println!("Json file dumped at '{}'", out);
    } else if let Some(out) = &args.html_output {
        let html =
            render_html(&outcome.report, &outcome.functions_one, &outcome.functions_two);
        let path = write_report(out, &html)?;
        println!("HTML file created at '{}'", out);
        if config.open_browser {
            if let Err(e) = open_in_browser(&path) {
                warn!("Could not open {}: {:#}", path.display(), e);
            }
        }
    } else {
        print!("{}", render_console(&outcome.report));
    }

    Ok(())
}

/// Run the diff described by `args` under an already-resolved config.
pub fn run_diff(args: &DiffArgs, config: &DiffConfig) -> Result<DiffOutcome> {
    let registry = default_decompiler_registry();
    let backend = registry.require(&config.backend)?;

    let request = DiffRequest {
        binary_one: canonicalize_or_current(&args.binary_one)?,
        binary_two: canonicalize_or_current(&args.binary_two)?,
        options: config.diff_options(),
    };

    let bar = if config.progress { ProgressBar::new(0) } else { ProgressBar::hidden() };
    let style = ProgressStyle::with_template(
        "{msg} {pos:>7}/{len:7} [{bar:40.cyan/blue}] [{elapsed_precise}]",
    )?
    .progress_chars("#>-");
    bar.set_style(style);
    bar.set_message(format!("Matching functions of '{}'", args.binary_one));

    let outcome = DiffRunner::new(backend)
        .run_with_progress(&request, |event| match event {
            DiffProgress::MatchingStarted { total } => bar.set_length(total as u64),
            DiffProgress::FunctionMatched => bar.inc(1),
        })
        .with_context(|| {
            format!("Failed to diff {} against {}", args.binary_one, args.binary_two)
        })?;
    bar.finish_and_clear();

    for summary in [&outcome.report.binary_one, &outcome.report.binary_two] {
        if !summary.rejected.is_empty() {
            warn!("{}: skipped {} decompiled files", summary.name, summary.rejected.len());
        }
    }

    Ok(outcome)
}

fn write_report(out: &str, body: &str) -> Result<PathBuf> {
    let path = PathBuf::from(out);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&path, body).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}
