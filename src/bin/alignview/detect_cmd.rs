//! CLI subcommand for `alignview detect`.
use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Args;
use alignview::*;

/// Options for the `detect` subcommand.
#[derive(Debug, Args)]
pub struct DetectCmd {
    /// FASTA file (or a bare pasted sequence). Reads stdin when omitted.
    #[arg(long, value_name="FILE")]
    pub sequence: Option<PathBuf>,
}

pub fn run(cmd: DetectCmd) -> Result<()> {
    let mut s = String::new();
    match &cmd.sequence {
        Some(p) => { File::open(p).with_context(|| format!("open FASTA: {}", p.display()))?.read_to_string(&mut s)?; }
        None => { io::stdin().read_to_string(&mut s)?; }
    }
    let recs = parse_fasta(&s);
    if recs.is_empty() { anyhow::bail!("no sequences found"); }

    let mut w = csv::WriterBuilder::new().delimiter(b'\t').from_writer(io::stdout().lock());
    w.write_record(["id","length","type"])?;
    for r in &recs {
        w.write_record([&r.id, &r.len().to_string(), &detect_sequence_type(&r.sequence).to_string()])?;
    }
    w.flush()?;
    Ok(())
}
