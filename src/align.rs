//! Affine-gap pairwise alignment (Gotoh), global or local.
//!
//! Both modes run the same three-state dynamic programme over a
//! `(len(ref)+1) x (len(query)+1)` grid:
//!
//! - `mat`: the column pairs `ref[i-1]` with `query[j-1]` (match or mismatch),
//! - `gap_q`: the column pairs `ref[i-1]` with `-` (gap in the query),
//! - `gap_r`: the column pairs `-` with `query[j-1]` (gap in the reference).
//!
//! Each state keeps its own traceback pointer so that a gap run is charged one
//! opening penalty and `len - 1` extensions, exactly. Local mode additionally
//! lets `mat` restart from zero and reports the best cell anywhere in the grid.
//! The unaligned prefix and suffix of both inputs are then emitted as gap
//! columns around the local region, so the index maps always cover both
//! inputs; [`AlignParams::region_only`] drops them.
//!
//! Fractional penalties (the default extension is 0.5) are handled by
//! multiplying every score by `scale` and running the DP in `i32`.
//! Reported scores are divided back. A scheme that is not integral after
//! scaling is rejected rather than rounded.
//!
//! ### Example
//! ```rust
//! use alignview::{align, AlignParams, AlignMode};
//! let params = AlignParams { mode: AlignMode::Local, ..Default::default() };
//! let aln = align("XXXACGTXXX", "ACGT", &params).unwrap();
//! assert_eq!(aln.reference, "XXXACGTXXX");
//! assert_eq!(aln.query, "---ACGT---");
//! assert_eq!(aln.aligned_pairs(), 4);
//! assert_eq!(aln.identity, 100.0);
//! ```
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::{equals_case_insensitive, percent_1dp, AlignviewError, GAP};
use crate::similarity::are_similar;

/// Global (end-to-end) or local (best sub-region) alignment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignMode {
    /// Needleman–Wunsch style; leading and trailing gaps are scored.
    #[default]
    Global,
    /// Smith–Waterman style; scores may restart at zero.
    Local,
}

impl FromStr for AlignMode {
    type Err = AlignviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "global" => Ok(AlignMode::Global),
            "local" => Ok(AlignMode::Local),
            other => Err(AlignviewError::invalid(format!("unknown algorithm '{other}' (expected global or local)"))),
        }
    }
}

impl fmt::Display for AlignMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlignMode::Global => f.write_str("global"),
            AlignMode::Local => f.write_str("local"),
        }
    }
}

/// Substitution and affine gap scores.
#[derive(Clone, Debug, PartialEq)]
pub struct Scoring {
    /// Score for identical residues.
    pub match_score: f32,
    /// Score for differing residues (usually negative).
    pub mismatch: f32,
    /// Penalty for the first position of a gap run (subtracted; default 10.0).
    pub gap_open: f32,
    /// Penalty for every further position of the same run (subtracted; default 0.5).
    pub gap_extend: f32,
    /// Scale factor applied before the integer DP (e.g. 2.0 so 0.5→1). Every
    /// score times `scale` must be a whole number.
    pub scale: f32,
}

impl Default for Scoring {
    fn default() -> Self {
        Self {
            match_score: 2.0,
            mismatch: -1.0,
            gap_open: 10.0,
            gap_extend: 0.5,
            scale: 2.0,
        }
    }
}

/// Integer scores used inside the DP.
#[derive(Clone, Copy, Debug)]
struct ScaledScoring {
    match_score: i32,
    mismatch: i32,
    go: i32,
    ge: i32,
    scale: f64,
}

impl Scoring {
    fn scaled(&self) -> Result<ScaledScoring, AlignviewError> {
        let values = [self.match_score, self.mismatch, self.gap_open, self.gap_extend, self.scale];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(AlignviewError::invalid("scoring parameters must be finite"));
        }
        if self.scale < 1.0 {
            return Err(AlignviewError::invalid(format!("scale must be >= 1 (got {})", self.scale)));
        }
        let s = self.scale as f64;
        let to_int = |name: &str, v: f32| -> Result<i32, AlignviewError> {
            let x = v as f64 * s;
            if (x - x.round()).abs() > 1e-4 {
                return Err(AlignviewError::invalid(format!(
                    "{name} {v} is not a whole number at scale {s}; raise the scale")));
            }
            if x.abs() > MAX_SCALED_SCORE as f64 {
                return Err(AlignviewError::invalid(format!("{name} {v} is too large at scale {s}")));
            }
            Ok(x.round() as i32)
        };
        Ok(ScaledScoring {
            match_score: to_int("match score", self.match_score)?,
            mismatch: to_int("mismatch score", self.mismatch)?,
            go: to_int("gap open penalty", self.gap_open)?,
            ge: to_int("gap extend penalty", self.gap_extend)?,
            scale: s,
        })
    }
}

/// Largest magnitude of a single scaled score.
const MAX_SCALED_SCORE: i32 = 1 << 20;

/// Headroom of the `i32` grid; cells start at `NEG_INF` and a path adds at
/// most `len(ref) + len(query)` scores.
const NEG_INF: i32 = i32::MIN / 4;

/// Parameters for [`align`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AlignParams {
    /// Global or local alignment.
    pub mode: AlignMode,
    /// Scoring scheme.
    pub scoring: Scoring,
    /// Local mode only: report just the aligned region and leave out the
    /// unaligned prefix/suffix gap columns. The index maps then cover a
    /// consecutive run of each input instead of all of it.
    pub region_only: bool,
}

impl AlignParams {
    /// Default scoring with the given mode.
    pub fn with_mode(mode: AlignMode) -> Self {
        Self { mode, ..Default::default() }
    }
}

/// One pairwise alignment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AlignmentResult {
    /// Aligned reference, `-` for gaps.
    pub reference: String,
    /// Aligned query, `-` for gaps.
    pub query: String,
    /// Per column: 0-based reference position, `None` where the reference is gapped.
    pub ref_indices: Vec<Option<usize>>,
    /// Per column: 0-based query position, `None` where the query is gapped.
    pub query_indices: Vec<Option<usize>>,
    /// Alignment score in scoring-scheme units.
    pub score: f64,
    /// Percent identical residues over columns with no gap (one decimal).
    pub identity: f64,
    /// Percent identical or similar residues over columns with no gap (one decimal).
    pub similarity: f64,
    /// Number of columns, gap columns included.
    pub length: usize,
}

impl AlignmentResult {
    /// Columns where neither side is a gap.
    pub fn aligned_pairs(&self) -> usize {
        self.ref_indices.iter().zip(&self.query_indices).filter(|(r, q)| r.is_some() && q.is_some()).count()
    }

    /// Columns where one side is a gap.
    pub fn gap_columns(&self) -> usize {
        self.length - self.aligned_pairs()
    }

    /// CIGAR-like run-length string, reference as target (e.g. `10M1I5M2D`).
    /// `I` is a query residue against a reference gap, `D` the reverse.
    pub fn cigar(&self) -> String {
        let mut ops: Vec<(char, usize)> = Vec::new();
        for (r, q) in self.ref_indices.iter().zip(&self.query_indices) {
            let op = match (r, q) {
                (Some(_), Some(_)) => 'M',
                (None, Some(_)) => 'I',
                _ => 'D',
            };
            push_cigar(&mut ops, op, 1);
        }
        ops.into_iter().map(|(op, len)| format!("{len}{op}")).collect()
    }

    /// Marker line for reports: `|` identical, `:` similar, `.` different, space for gaps.
    pub fn midline(&self) -> String {
        self.reference.chars().zip(self.query.chars()).map(|(x, y)| {
            if x == GAP || y == GAP { ' ' }
            else if equals_case_insensitive(x, y) { '|' }
            else if are_similar(x, y) { ':' }
            else { '.' }
        }).collect()
    }
}

fn push_cigar(ops: &mut Vec<(char, usize)>, op: char, k: usize) {
    if let Some(last) = ops.last_mut() {
        if last.0 == op { last.1 += k; return; }
    }
    ops.push((op, k));
}

// DP states / traceback pointers.
const MATCH: u8 = 0;
const GAP_QUERY: u8 = 1;
const GAP_REF: u8 = 2;
const START: u8 = 3;

/// Pick the best `(score, state)`; earlier candidates win ties.
fn best_of(cands: &[(i32, u8)]) -> (i32, u8) {
    let mut best = cands[0];
    for &c in &cands[1..] {
        if c.0 > best.0 { best = c; }
    }
    best
}

/// One aligned column as (reference position, query position).
type Column = (Option<usize>, Option<usize>);

/// Align `reference` against `query`.
///
/// Returns [`AlignviewError::InvalidInput`] if either sequence is empty or the
/// scoring parameters are unusable.
pub fn align(reference: &str, query: &str, params: &AlignParams) -> Result<AlignmentResult, AlignviewError> {
    if reference.is_empty() {
        return Err(AlignviewError::invalid("empty reference sequence"));
    }
    if query.is_empty() {
        return Err(AlignviewError::invalid("empty query sequence"));
    }
    let sc = params.scoring.scaled()?;
    let a: Vec<char> = reference.chars().collect();
    let b: Vec<char> = query.chars().collect();
    let n = a.len();
    let m = b.len();
    let widest = [sc.match_score, sc.mismatch, sc.go, sc.ge].iter().map(|v| v.unsigned_abs() as u64).max().unwrap_or(0);
    if (n + m + 1) as u64 * widest >= NEG_INF.unsigned_abs() as u64 {
        return Err(AlignviewError::invalid("scores too large for sequences of this length"));
    }
    let local = params.mode == AlignMode::Local;
    log::debug!("{} alignment, {} x {} residues", params.mode, n, m);

    let score_pair = |x: char, y: char| -> i32 {
        if equals_case_insensitive(x, y) { sc.match_score } else { sc.mismatch }
    };

    let neg_inf = NEG_INF;
    let mut mat = vec![vec![neg_inf; m+1]; n+1];
    let mut gap_q = vec![vec![neg_inf; m+1]; n+1];
    let mut gap_r = vec![vec![neg_inf; m+1]; n+1];
    // Predecessor state of each cell, one grid per state.
    let mut tb_m = vec![vec![START; m+1]; n+1];
    let mut tb_q = vec![vec![START; m+1]; n+1];
    let mut tb_r = vec![vec![START; m+1]; n+1];

    if !local {
        mat[0][0] = 0;
        for j in 1..=m {
            gap_r[0][j] = -sc.go - (j as i32 - 1) * sc.ge;
            tb_r[0][j] = if j == 1 { MATCH } else { GAP_REF };
        }
        for i in 1..=n {
            gap_q[i][0] = -sc.go - (i as i32 - 1) * sc.ge;
            tb_q[i][0] = if i == 1 { MATCH } else { GAP_QUERY };
        }
    }

    // Local maximum; first cell in row-major order wins ties.
    let mut best = 0i32;
    let mut best_cell = (0usize, 0usize);

    for i in 1..=n {
        for j in 1..=m {
            let (v, from) = best_of(&[
                (gap_q[i-1][j] - sc.ge, GAP_QUERY),
                (mat[i-1][j] - sc.go, MATCH),
                (gap_r[i-1][j] - sc.go, GAP_REF),
            ]);
            gap_q[i][j] = v;
            tb_q[i][j] = from;

            let (v, from) = best_of(&[
                (gap_r[i][j-1] - sc.ge, GAP_REF),
                (mat[i][j-1] - sc.go, MATCH),
                (gap_q[i][j-1] - sc.go, GAP_QUERY),
            ]);
            gap_r[i][j] = v;
            tb_r[i][j] = from;

            let (prev, from) = if local {
                best_of(&[(0, START), (mat[i-1][j-1], MATCH), (gap_q[i-1][j-1], GAP_QUERY), (gap_r[i-1][j-1], GAP_REF)])
            } else {
                best_of(&[(mat[i-1][j-1], MATCH), (gap_q[i-1][j-1], GAP_QUERY), (gap_r[i-1][j-1], GAP_REF)])
            };
            mat[i][j] = prev + score_pair(a[i-1], b[j-1]);
            tb_m[i][j] = from;

            if local && mat[i][j] > best {
                best = mat[i][j];
                best_cell = (i, j);
            }
        }
    }

    let (raw_score, mut columns) = if local {
        if best <= 0 {
            log::debug!("no positive-scoring local alignment");
            (0, Vec::new())
        } else {
            let (i, j) = best_cell;
            (best, traceback(i, j, MATCH, &tb_m, &tb_q, &tb_r))
        }
    } else {
        let (score, state) = best_of(&[(mat[n][m], MATCH), (gap_q[n][m], GAP_QUERY), (gap_r[n][m], GAP_REF)]);
        (score, traceback(n, m, state, &tb_m, &tb_q, &tb_r))
    };

    if local && !params.region_only {
        columns = with_flanks(columns, n, m);
    }

    let score = raw_score as f64 / sc.scale;
    log::trace!("alignment score {} over {} columns", score, columns.len());
    Ok(build_result(&a, &b, &columns, score))
}

/// Walk the pointer grids back from `(i, j)` in `state` and return the
/// columns in forward order. Stops at the origin (global) or at a local start.
fn traceback(
    mut i: usize,
    mut j: usize,
    mut state: u8,
    tb_m: &[Vec<u8>],
    tb_q: &[Vec<u8>],
    tb_r: &[Vec<u8>],
) -> Vec<Column> {
    let mut cols: Vec<Column> = Vec::with_capacity(i + j);
    while i > 0 || j > 0 {
        let prev = match state {
            MATCH if i > 0 && j > 0 => {
                cols.push((Some(i-1), Some(j-1)));
                let p = tb_m[i][j];
                i -= 1; j -= 1;
                p
            }
            GAP_QUERY if i > 0 => {
                cols.push((Some(i-1), None));
                let p = tb_q[i][j];
                i -= 1;
                p
            }
            GAP_REF if j > 0 => {
                cols.push((None, Some(j-1)));
                let p = tb_r[i][j];
                j -= 1;
                p
            }
            _ => break,
        };
        if prev == START { break; }
        state = prev;
    }
    cols.reverse();
    cols
}

/// Surround a local region with its unaligned residues as gap columns:
/// reference prefix, query prefix, region, reference suffix, query suffix.
fn with_flanks(region: Vec<Column>, n: usize, m: usize) -> Vec<Column> {
    let first_r = region.iter().find_map(|c| c.0).unwrap_or(n);
    let first_q = region.iter().find_map(|c| c.1).unwrap_or(m);
    let end_r = region.iter().rev().find_map(|c| c.0).map_or(first_r, |p| p + 1);
    let end_q = region.iter().rev().find_map(|c| c.1).map_or(first_q, |p| p + 1);

    let mut out: Vec<Column> = Vec::with_capacity(region.len() + n + m);
    out.extend((0..first_r).map(|p| (Some(p), None)));
    out.extend((0..first_q).map(|p| (None, Some(p))));
    out.extend(region);
    out.extend((end_r..n).map(|p| (Some(p), None)));
    out.extend((end_q..m).map(|p| (None, Some(p))));
    out
}

/// Render columns into aligned strings and compute identity/similarity.
fn build_result(a: &[char], b: &[char], columns: &[Column], score: f64) -> AlignmentResult {
    let mut reference = String::with_capacity(columns.len());
    let mut query = String::with_capacity(columns.len());
    let mut ref_indices = Vec::with_capacity(columns.len());
    let mut query_indices = Vec::with_capacity(columns.len());
    let (mut pairs, mut ident, mut similar) = (0usize, 0usize, 0usize);

    for &(r, q) in columns {
        let x = r.map_or(GAP, |p| a[p]);
        let y = q.map_or(GAP, |p| b[p]);
        if r.is_some() && q.is_some() {
            pairs += 1;
            if equals_case_insensitive(x, y) {
                ident += 1;
                similar += 1;
            } else if are_similar(x, y) {
                similar += 1;
            }
        }
        reference.push(x);
        query.push(y);
        ref_indices.push(r);
        query_indices.push(q);
    }

    AlignmentResult {
        reference,
        query,
        ref_indices,
        query_indices,
        score,
        identity: percent_1dp(ident, pairs),
        similarity: percent_1dp(similar, pairs),
        length: columns.len(),
    }
}
