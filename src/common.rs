//! Shared plumbing: the crate error type and small helpers used by the
//! aligner, the statistics pass and the CLI.

/// Errors that can be returned by the algorithms in this crate.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AlignviewError {
    /// Empty or malformed input handed to an entry point (empty sequence,
    /// unknown algorithm name, unusable scoring parameters).
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl AlignviewError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        AlignviewError::InvalidInput(msg.into())
    }
}

/// Gap symbol used in aligned strings.
pub const GAP: char = '-';

/// Case‑insensitive equality used when computing identity % in alignments.
pub fn equals_case_insensitive(a: char, b: char) -> bool {
    a.to_ascii_uppercase() == b.to_ascii_uppercase()
}

/// Percentage of `part` over `whole`, rounded to one decimal place.
/// Returns 0 when `whole` is 0.
pub fn percent_1dp(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let pct = part as f64 * 100.0 / whole as f64;
    (pct * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_rounds_to_one_decimal() {
        assert_eq!(percent_1dp(1, 3), 33.3);
        assert_eq!(percent_1dp(2, 3), 66.7);
        assert_eq!(percent_1dp(4, 4), 100.0);
    }

    #[test]
    fn percent_of_nothing_is_zero() {
        assert_eq!(percent_1dp(0, 0), 0.0);
    }

    #[test]
    fn case_insensitive_compare() {
        assert!(equals_case_insensitive('a', 'A'));
        assert!(!equals_case_insensitive('a', 'C'));
    }
}
