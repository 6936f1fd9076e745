//! # alignview
//!
//! Pairwise sequence alignment for DNA, RNA and protein sequences.
//!
//! The crate computes an optimal alignment of two sequences under an
//! **affine gap** scoring scheme (Gotoh's three-state recurrence), in either
//! global (Needleman–Wunsch) or local (Smith–Waterman) mode, and reports the
//! aligned strings, per-column index maps back into the inputs, and identity /
//! similarity percentages. Circular molecules are handled by trying every
//! rotation of the query. A small motif search (exact or regex) and a
//! permissive FASTA reader complete the toolkit.
//!
//! ## Scoring
//! Defaults: match `+2`, mismatch `-1`, gap open `-10`, gap extend `-0.5`.
//! A gap run of length `L` costs `10 + 0.5·(L-1)`.
//!
//! ## Similarity
//! Non-identical residues count as *similar* when they share one of eight
//! physicochemical groups (`GAVLI`, `FYW`, `CM`, `ST`, `KRH`, `DE`, `NQ`, `P`).
//!
//! ### Example
//! ```
//! use alignview::{align_sequences, search_sequence, AlignMode};
//! let aln = align_sequences("MKVLAAGIVG", "MKILAAGVVG", false, AlignMode::Global).unwrap();
//! assert_eq!(aln.length, 10);
//! assert_eq!(aln.identity, 80.0);
//! assert_eq!(aln.similarity, 100.0);
//!
//! let hits = search_sequence("ACGTACGT", "cgt", false);
//! assert_eq!(hits.len(), 2);
//! ```
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

pub mod common;
pub mod similarity;
pub mod sequence;
pub mod align;
pub mod circular;
pub mod search;

pub use common::AlignviewError;
pub use similarity::{are_similar, SIMILARITY_GROUPS};
pub use sequence::{parse_fasta, detect_sequence_type, Feature, Sequence, SequenceSource, SequenceType};
pub use align::{align, AlignMode, AlignParams, AlignmentResult, Scoring};
pub use circular::{align_circular, align_sequences, align_sequences_with, rotate};
pub use search::{search, search_sequence, SearchMatch};
