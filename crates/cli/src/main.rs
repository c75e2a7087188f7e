use anyhow::Result;
use clap::{Parser, Subcommand};
use jad::commands::{diff_command, list_backends_command, DiffArgs};
use jad::init_logging;

/// Just Another Differ: match functions between two decompiled binaries.
///
/// This CLI is a thin wrapper around `jad-core` (exposed in code as `jad_core`).
/// All substantive logic lives in the library so it can be tested thoroughly
/// and reused from other frontends.
#[derive(Parser, Debug)]
#[command(
    name = "jad",
    version,
    about = "Match functions between two decompiled binaries",
    long_about = None
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides this.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decompile two binaries and report, for each function of the first, the most
    /// similar function of the second with a 0-100 confidence.
    ///
    /// Without --json-output or --html-output the mapping is printed to stdout.
    Diff(DiffArgs),

    /// List the decompiler backends compiled into this binary.
    Backends {
        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Diff(args) => diff_command(&args)?,
        Command::Backends { json } => list_backends_command(json)?,
    }

    Ok(())
}
