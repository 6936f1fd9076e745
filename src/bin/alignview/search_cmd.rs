//! CLI subcommand for `alignview search`.
use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Args;
use alignview::*;

/// Options for the `search` subcommand.
#[derive(Debug, Args)]
pub struct SearchCmd {
    /// FASTA file to search (every record).
    #[arg(long, value_name="FILE")]
    pub sequence: PathBuf,
    /// Pattern to look for (case-insensitive).
    #[arg(long)]
    pub pattern: String,
    /// Interpret the pattern as a regular expression.
    #[arg(long)]
    pub regex: bool,
    /// Output TSV file (stdout when omitted).
    #[arg(long)]
    pub outfile: Option<PathBuf>,
}

pub fn run(cmd: SearchCmd) -> Result<()> {
    let mut s = String::new();
    File::open(&cmd.sequence).with_context(|| format!("open FASTA: {}", cmd.sequence.display()))?.read_to_string(&mut s)?;
    let recs = parse_fasta(&s);
    if recs.is_empty() { anyhow::bail!("no sequences in {}", cmd.sequence.display()); }

    let mut builder = csv::WriterBuilder::new();
    builder.delimiter(b'\t');
    let mut w = match &cmd.outfile {
        Some(path) => builder.from_writer(Box::new(File::create(path).with_context(|| format!("create {}", path.display()))?) as Box<dyn io::Write>),
        None => builder.from_writer(Box::new(io::stdout().lock()) as Box<dyn io::Write>),
    };
    w.write_record(["id","start","end","text"])?;
    let mut total = 0usize;
    for r in &recs {
        let hits = search_sequence(&r.sequence, &cmd.pattern, cmd.regex);
        total += hits.len();
        for h in &hits {
            w.write_record([&r.id, &h.start.to_string(), &h.end.to_string(), &h.text])?;
        }
    }
    w.flush()?;
    log::info!("{} matches in {} records", total, recs.len());
    Ok(())
}
