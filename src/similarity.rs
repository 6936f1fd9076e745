//! Physicochemical residue classes used to score alignment *similarity*.
//!
//! The 20 standard amino acids are split into 8 disjoint groups. Two residues
//! are similar when they are the same letter (ignoring case) or fall into the
//! same group. Any other symbol (ambiguity codes, `*`, `-`, digits) is only
//! similar to itself.
//!
//! ### Example
//! ```rust
//! use alignview::are_similar;
//! assert!(are_similar('D', 'e'));
//! assert!(!are_similar('D', 'K'));
//! ```

/// The residue groups, in a fixed order.
pub const SIMILARITY_GROUPS: [&str; 8] = [
    "GAVLI", // small hydrophobic
    "FYW",   // aromatic
    "CM",    // sulfur-containing
    "ST",    // hydroxyl
    "KRH",   // positive charge
    "DE",    // negative charge
    "NQ",    // amide
    "P",     // proline
];

const NO_GROUP: u8 = u8::MAX;

/// ASCII letter -> group index, built at compile time.
static GROUP_OF: [u8; 128] = build_group_table();

const fn build_group_table() -> [u8; 128] {
    let mut table = [NO_GROUP; 128];
    let mut g = 0;
    while g < SIMILARITY_GROUPS.len() {
        let letters = SIMILARITY_GROUPS[g].as_bytes();
        let mut k = 0;
        while k < letters.len() {
            let upper = letters[k];
            table[upper as usize] = g as u8;
            table[upper.to_ascii_lowercase() as usize] = g as u8;
            k += 1;
        }
        g += 1;
    }
    table
}

/// Group index of `c`, if it is one of the 20 standard residues.
pub fn residue_group(c: char) -> Option<usize> {
    if !c.is_ascii() {
        return None;
    }
    match GROUP_OF[c as usize] {
        NO_GROUP => None,
        g => Some(g as usize),
    }
}

/// Are `a` and `b` identical or in the same physicochemical group?
pub fn are_similar(a: char, b: char) -> bool {
    if a.to_ascii_uppercase() == b.to_ascii_uppercase() {
        return true;
    }
    match (residue_group(a), residue_group(b)) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charge_groups() {
        assert!(are_similar('D', 'E'));
        assert!(!are_similar('D', 'K'));
        assert!(are_similar('K', 'h'));
    }

    #[test]
    fn self_match_is_case_insensitive() {
        assert!(are_similar('A', 'A'));
        assert!(are_similar('x', 'X'));
        assert!(are_similar('-', '-'));
    }

    #[test]
    fn unknown_symbols_only_match_themselves() {
        assert!(!are_similar('X', 'A'));
        assert!(!are_similar('B', 'D'));
        assert!(!are_similar('-', 'A'));
        assert!(!are_similar('é', 'E'));
    }

    #[test]
    fn groups_partition_the_twenty_residues() {
        let mut seen = String::new();
        for g in SIMILARITY_GROUPS {
            seen.push_str(g);
        }
        let mut letters: Vec<char> = seen.chars().collect();
        letters.sort_unstable();
        letters.dedup();
        assert_eq!(letters.len(), 20);
        assert_eq!(seen.len(), 20);
        for c in letters {
            assert!(residue_group(c).is_some());
        }
    }

    #[test]
    fn proline_is_alone() {
        for other in "GAVLIFYWCMSTKRHDENQ".chars() {
            assert!(!are_similar('P', other));
        }
    }
}
