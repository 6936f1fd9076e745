//! Motif search over a single sequence.
//!
//! Two flavours, both case-insensitive:
//! - **exact**: every occurrence of the pattern, *overlapping* ones included
//!   (scanning resumes one position after each hit);
//! - **regex**: leftmost-first, non-overlapping matches of a regular
//!   expression. A pattern that does not compile yields no matches.
//!
//! Coordinates are 0-based character offsets with an **inclusive** end, and
//! `text` is taken from the sequence, so it keeps the sequence's casing.
//!
//! ### Example
//! ```rust
//! use alignview::search_sequence;
//! let hits = search_sequence("AAAA", "aa", false);
//! assert_eq!(hits.iter().map(|m| m.start).collect::<Vec<_>>(), vec![0, 1, 2]);
//! let hits = search_sequence("AAAA", "AA", true);
//! assert_eq!(hits.iter().map(|m| m.start).collect::<Vec<_>>(), vec![0, 2]);
//! ```
use regex::RegexBuilder;
use serde::{Deserialize, Serialize};

/// One pattern occurrence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchMatch {
    /// 0-based start.
    pub start: usize,
    /// 0-based inclusive end.
    pub end: usize,
    /// The matched substring, as written in the sequence.
    pub text: String,
}

/// Find `pattern` in `sequence`, exactly or as a regular expression.
///
/// Empty `sequence` or `pattern` gives an empty result.
pub fn search(sequence: &str, pattern: &str, use_regex: bool) -> Vec<SearchMatch> {
    if sequence.is_empty() || pattern.is_empty() {
        return Vec::new();
    }
    if use_regex { regex_search(sequence, pattern) } else { exact_search(sequence, pattern) }
}

/// Alias of [`search`] under the name used by the request layer.
pub fn search_sequence(sequence: &str, pattern: &str, use_regex: bool) -> Vec<SearchMatch> {
    search(sequence, pattern, use_regex)
}

fn exact_search(sequence: &str, pattern: &str) -> Vec<SearchMatch> {
    let seq: Vec<char> = sequence.chars().collect();
    let pat: Vec<char> = pattern.chars().map(|c| c.to_ascii_uppercase()).collect();
    let k = pat.len();
    let mut out = Vec::new();
    if seq.len() < k {
        return out;
    }
    for start in 0..=seq.len() - k {
        let hit = seq[start..start+k].iter().zip(&pat).all(|(x, p)| x.to_ascii_uppercase() == *p);
        if hit {
            out.push(SearchMatch { start, end: start + k - 1, text: seq[start..start+k].iter().collect() });
        }
    }
    out
}

fn regex_search(sequence: &str, pattern: &str) -> Vec<SearchMatch> {
    let re = match RegexBuilder::new(pattern).case_insensitive(true).build() {
        Ok(re) => re,
        Err(e) => {
            log::debug!("ignoring invalid search pattern '{}': {}", pattern, e);
            return Vec::new();
        }
    };
    let ascii = sequence.is_ascii();
    // byte offset -> char offset, only needed for non-ASCII input
    let char_pos = |byte: usize| if ascii { byte } else { sequence[..byte].chars().count() };

    re.find_iter(sequence)
        .filter(|m| !m.as_str().is_empty())
        .map(|m| {
            let start = char_pos(m.start());
            let len = m.as_str().chars().count();
            SearchMatch { start, end: start + len - 1, text: m.as_str().to_string() }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn starts(v: &[SearchMatch]) -> Vec<usize> {
        v.iter().map(|m| m.start).collect()
    }

    #[test]
    fn exact_matches_overlap() {
        let hits = search("AAAA", "AA", false);
        assert_eq!(starts(&hits), vec![0, 1, 2]);
        assert!(hits.iter().all(|m| m.end == m.start + 1));
    }

    #[test]
    fn regex_matches_do_not_overlap() {
        let hits = search("AAAA", "AA", true);
        assert_eq!(starts(&hits), vec![0, 2]);
        assert_eq!(hits[1].end, 3);
    }

    #[test]
    fn empty_inputs() {
        assert!(search("", "AA", false).is_empty());
        assert!(search("ACGT", "", false).is_empty());
        assert!(search("", "A", true).is_empty());
        assert!(search("ACGT", "", true).is_empty());
    }

    #[test]
    fn exact_keeps_sequence_case() {
        let hits = search("ttGAattga", "tga", false);
        assert_eq!(starts(&hits), vec![1, 6]);
        assert_eq!(hits[0].text, "tGA");
        assert_eq!(hits[0].end, 3);
        assert_eq!(hits[1].text, "tga");
    }

    #[test]
    fn pattern_longer_than_sequence() {
        assert!(search("AC", "ACGT", false).is_empty());
    }

    #[test]
    fn regex_is_case_insensitive() {
        let hits = search("MKVLAAGmkv", "mk[vl]", true);
        assert_eq!(starts(&hits), vec![0, 7]);
        assert_eq!(hits[1].text, "mkv");
        assert_eq!(hits[1].end, 9);
    }

    #[test]
    fn invalid_regex_is_silent() {
        assert!(search("ACGT", "AC(", true).is_empty());
        assert!(search("ACGT", "[", true).is_empty());
    }

    #[test]
    fn zero_width_regex_matches_are_skipped() {
        let hits = search("ACGT", "X*", true);
        assert!(hits.is_empty());
    }

    #[test]
    fn regex_offsets_are_characters() {
        let hits = search("ÅACGT", "CG", true);
        assert_eq!(hits[0].start, 2);
        assert_eq!(hits[0].end, 3);
    }
}
