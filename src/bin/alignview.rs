//! Command-line interface for the `alignview` crate.
//!
//! Subcommands are implemented in separate files (modules) under `src/bin/alignview/`:
//! - `align_cmd.rs`
//! - `search_cmd.rs`
//! - `detect_cmd.rs`
//!
use clap::{ArgAction, Parser, Subcommand};
use anyhow::Result;

#[derive(Debug, Parser)]
#[command(name="alignview", version=env!("CARGO_PKG_VERSION"), about="Affine-gap pairwise alignment and motif search", disable_help_subcommand=true)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action=ArgAction::Count, global=true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Align two sequences (global or local, optionally circular).
    Align(align_cmd::AlignCmd),
    /// Find a motif (exact or regex) in every record of a FASTA file.
    Search(search_cmd::SearchCmd),
    /// Report whether each record looks like DNA or protein.
    Detect(detect_cmd::DetectCmd),
}

#[path = "alignview/align_cmd.rs"] mod align_cmd;
#[path = "alignview/search_cmd.rs"] mod search_cmd;
#[path = "alignview/detect_cmd.rs"] mod detect_cmd;

fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);
    match cli.command {
        Command::Align(cmd) => align_cmd::run(cmd),
        Command::Search(cmd) => search_cmd::run(cmd),
        Command::Detect(cmd) => detect_cmd::run(cmd),
    }
}
