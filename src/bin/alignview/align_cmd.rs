//! CLI subcommand for `alignview align`.
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use alignview::*;

/// Options for the `align` subcommand.
#[derive(Debug, Args)]
pub struct AlignCmd {
    /// Reference FASTA file (first record used).
    #[arg(long, value_name="FILE")]
    pub reference: PathBuf,
    /// Query FASTA file (first record used).
    #[arg(long, value_name="FILE")]
    pub query: PathBuf,
    /// Treat the query as a circular molecule and search all rotations.
    #[arg(long)]
    pub circular: bool,
    /// Alignment algorithm.
    #[arg(long, value_enum, default_value_t=Algorithm::Global)]
    pub algorithm: Algorithm,
    /// Local mode: print only the aligned region, without the unaligned flanks.
    #[arg(long)]
    pub region_only: bool,
    /// Match score.
    #[arg(long, default_value_t=2.0)]
    pub match_score: f32,
    /// Mismatch score (negative).
    #[arg(long, default_value_t=-1.0, allow_negative_numbers=true)]
    pub mismatch: f32,
    /// Gap open penalty.
    #[arg(long, default_value_t=10.0)]
    pub gapopen: f32,
    /// Gap extension penalty.
    #[arg(long, default_value_t=0.5)]
    pub gapextend: f32,
    /// Scale applied to all scores before the integer DP; every score times
    /// the scale must be a whole number.
    #[arg(long, default_value_t=2.0)]
    pub scale: f32,
    /// Output format.
    #[arg(long, value_enum, default_value_t=OutputFormat::Text)]
    pub format: OutputFormat,
    /// Output file (stdout when omitted).
    #[arg(long)]
    pub outfile: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Algorithm { Global, Local }

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat { Text, Json }

fn read_first(path: &Path) -> Result<Sequence> {
    let mut s = String::new();
    File::open(path).with_context(|| format!("open FASTA: {}", path.display()))?.read_to_string(&mut s)?;
    parse_fasta(&s).into_iter().next().ok_or_else(|| anyhow::anyhow!("no sequences in {}", path.display()))
}

pub fn run(cmd: AlignCmd) -> Result<()> {
    let a = read_first(&cmd.reference)?;
    let b = read_first(&cmd.query)?;
    log::info!("reference {} ({} residues), query {} ({} residues)", a.id, a.len(), b.id, b.len());

    let mode = match cmd.algorithm {
        Algorithm::Global => AlignMode::Global,
        Algorithm::Local => AlignMode::Local,
    };
    let params = AlignParams {
        mode,
        scoring: Scoring {
            match_score: cmd.match_score,
            mismatch: cmd.mismatch,
            gap_open: cmd.gapopen,
            gap_extend: cmd.gapextend,
            scale: cmd.scale,
        },
        region_only: cmd.region_only,
    };
    let aln = align_sequences_with(&a.sequence, &b.sequence, cmd.circular, &params)
        .with_context(|| format!("aligning {} against {}", b.id, a.id))?;

    let mut out: Box<dyn Write> = match &cmd.outfile {
        Some(path) => Box::new(File::create(path).with_context(|| format!("create {}", path.display()))?),
        None => Box::new(io::stdout().lock()),
    };
    match cmd.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &aln)?;
            writeln!(out)?;
        }
        OutputFormat::Text => write_report(&mut out, &a, &b, &aln, mode, cmd.circular)?,
    }
    out.flush()?;
    Ok(())
}

fn write_report(f: &mut dyn Write, a: &Sequence, b: &Sequence, aln: &AlignmentResult, mode: AlignMode, circular: bool) -> Result<()> {
    writeln!(f, "# alignview {} alignment{}", mode, if circular { " (circular query)" } else { "" })?;
    writeln!(f, "# Reference: {} (len {})", a.id, a.len())?;
    writeln!(f, "# Query:     {} (len {})", b.id, b.len())?;
    writeln!(f, "Score: {:.1}", aln.score)?;
    writeln!(f, "Length: {}", aln.length)?;
    writeln!(f, "Identity: {:.1}%   Similarity: {:.1}%   Gaps: {}", aln.identity, aln.similarity, aln.gap_columns())?;
    writeln!(f, "CIGAR: {}", aln.cigar())?;
    writeln!(f)?;
    // Blocked alignment printing (60 cols)
    let r: Vec<char> = aln.reference.chars().collect();
    let q: Vec<char> = aln.query.chars().collect();
    let mid: Vec<char> = aln.midline().chars().collect();
    let mut i = 0usize;
    while i < r.len() {
        let end = (i+60).min(r.len());
        writeln!(f, "R {}", r[i..end].iter().collect::<String>())?;
        writeln!(f, "  {}", mid[i..end].iter().collect::<String>())?;
        writeln!(f, "Q {}", q[i..end].iter().collect::<String>())?;
        writeln!(f)?;
        i = end;
    }
    Ok(())
}
