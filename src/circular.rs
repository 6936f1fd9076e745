//! Rotation search for circular molecules, and the top-level alignment entry
//! point used by callers.
//!
//! A circular query has no natural start, so every cyclic rotation
//! `query[i..] + query[..i]` is aligned against the reference and the
//! rotation with the strictly greatest score is kept (rotation 0 seeds the
//! search; on equal scores the earliest rotation stays). The reported
//! `query_indices` refer to the winning *rotated* string.
//!
//! ---
//! ## Details
//! - **Complexity:** `len(query)` full alignments, each `O(len(ref)·len(query))`.
//!   [`align_sequences`] only takes this path when `len(query) < 2·len(ref)`;
//!   longer queries get a single linear alignment.
//! - **Scoring:** identical to [`align`](crate::align::align) for every rotation.
//!
//! ### Example
//! ```rust
//! use alignview::{align_sequences, AlignMode};
//! let aln = align_sequences("ATGC", "GCAT", true, AlignMode::Global).unwrap();
//! assert_eq!(aln.score, 8.0);
//! assert_eq!(aln.query, "ATGC");
//! ```
use crate::align::{align, AlignMode, AlignParams, AlignmentResult};
use crate::common::AlignviewError;

/// Cyclic rotation of `seq` starting at character `offset`.
pub fn rotate(seq: &str, offset: usize) -> String {
    let chars: Vec<char> = seq.chars().collect();
    if chars.is_empty() {
        return String::new();
    }
    let k = offset % chars.len();
    chars[k..].iter().chain(chars[..k].iter()).collect()
}

/// Align `reference` against every rotation of `query` and keep the best.
pub fn align_circular(reference: &str, query: &str, params: &AlignParams) -> Result<AlignmentResult, AlignviewError> {
    if query.is_empty() {
        return Err(AlignviewError::invalid("empty query sequence"));
    }
    let n_rot = query.chars().count();
    log::debug!("circular search over {} rotations", n_rot);

    let mut best = align(reference, query, params)?;
    let mut best_offset = 0usize;
    for offset in 1..n_rot {
        let rotated = rotate(query, offset);
        let aln = align(reference, &rotated, params)?;
        if aln.score > best.score {
            best = aln;
            best_offset = offset;
        }
    }
    log::debug!("best rotation offset {} (score {})", best_offset, best.score);
    Ok(best)
}

/// Align two raw sequences with default scoring.
///
/// When `is_circular` is set and `len(query) < 2·len(reference)`, every
/// rotation of the query is tried ([`align_circular`]); otherwise a single
/// alignment is computed.
pub fn align_sequences(reference: &str, query: &str, is_circular: bool, algorithm: AlignMode) -> Result<AlignmentResult, AlignviewError> {
    align_sequences_with(reference, query, is_circular, &AlignParams::with_mode(algorithm))
}

/// [`align_sequences`] with explicit parameters.
pub fn align_sequences_with(reference: &str, query: &str, is_circular: bool, params: &AlignParams) -> Result<AlignmentResult, AlignviewError> {
    let ref_len = reference.chars().count();
    let query_len = query.chars().count();
    if is_circular && query_len < ref_len * 2 {
        return align_circular(reference, query, params);
    }
    if is_circular {
        log::debug!("query of {} residues is too long for rotation search; aligning linearly", query_len);
    }
    align(reference, query, params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotations() {
        assert_eq!(rotate("GCAT", 0), "GCAT");
        assert_eq!(rotate("GCAT", 2), "ATGC");
        assert_eq!(rotate("GCAT", 5), "CATG");
        assert_eq!(rotate("", 3), "");
    }

    #[test]
    fn rotated_query_aligns_perfectly() {
        let aln = align_sequences("ATGC", "GCAT", true, AlignMode::Global).unwrap();
        assert_eq!(aln.score, 8.0);
        assert_eq!(aln.identity, 100.0);
        assert_eq!(aln.reference, "ATGC");
        assert_eq!(aln.query, "ATGC");
        // indices are into the rotated query, not the original
        assert_eq!(aln.query_indices, vec![Some(0), Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn linear_alignment_when_not_circular() {
        let aln = align_sequences("ATGC", "GCAT", false, AlignMode::Global).unwrap();
        assert!(aln.score < 8.0);
    }

    #[test]
    fn long_query_skips_rotation_search() {
        // query length 8 == 2 * ref length: no rotation search
        let linear = align_sequences("ATGC", "GCATTTTT", false, AlignMode::Global).unwrap();
        let circ = align_sequences("ATGC", "GCATTTTT", true, AlignMode::Global).unwrap();
        assert_eq!(linear, circ);
    }

    #[test]
    fn ties_keep_the_first_rotation() {
        // AAC, ACA and CAA all score -7 against AAAA
        let params = AlignParams::default();
        for offset in 0..3 {
            assert_eq!(align("AAAA", &rotate("AAC", offset), &params).unwrap().score, -7.0);
        }
        let aln = align_circular("AAAA", "AAC", &params).unwrap();
        assert_eq!(aln.score, -7.0);
        assert_eq!(aln.query, "-AAC");
        assert_eq!(aln, align("AAAA", "AAC", &params).unwrap());
    }

    #[test]
    fn local_circular() {
        let aln = align_sequences("GGGGACGTGGGG", "GTAC", true, AlignMode::Local).unwrap();
        assert_eq!(aln.reference, "GGGGACGTGGGG");
        assert_eq!(aln.query, "----ACGT----");
        assert_eq!(aln.aligned_pairs(), 4);
        assert_eq!(aln.score, 8.0);
    }
}
