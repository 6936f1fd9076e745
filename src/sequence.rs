//! Sequence records, permissive FASTA parsing and molecule type detection.
//!
//! ## FASTA
//! Lines starting with `>` open a record; the first whitespace-separated token
//! of the header is the `id` and the whole header text the `name`. All other
//! lines are appended (whitespace removed, casing kept). Text without any
//! header is accepted as a single pasted sequence if it is purely alphabetic.
//!
//! ## Examples
//! ```rust
//! use alignview::{parse_fasta, detect_sequence_type, SequenceType};
//! let recs = parse_fasta(">sp|P69905| Hemoglobin\nMVLSPADKTN\nVKAAWGKVGA\n");
//! assert_eq!(recs[0].id, "sp|P69905|");
//! assert_eq!(recs[0].sequence, "MVLSPADKTNVKAAWGKVGA");
//! assert_eq!(detect_sequence_type(&recs[0].sequence), SequenceType::Protein);
//! ```
use serde::{Deserialize, Serialize};

/// Where a sequence record came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SequenceSource {
    /// Parsed from FASTA text.
    Fasta,
    /// Raw residues pasted without a header.
    Paste,
    /// Supplied by a caller without provenance.
    #[default]
    Unknown,
}

/// An annotated span on a sequence, 0-based and inclusive.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    /// Annotation category, e.g. `Domain` or `Binding site`.
    #[serde(rename = "type")]
    pub kind: String,
    pub start: usize,
    pub end: usize,
    #[serde(default)]
    pub description: String,
    /// Display colour as `#rrggbb`.
    #[serde(default = "Feature::default_color")]
    pub color: String,
}

impl Feature {
    fn default_color() -> String {
        "#95a5a6".to_string()
    }

    /// Feature of `kind` covering `start..=end`, with the neutral colour.
    pub fn new(kind: impl Into<String>, start: usize, end: usize) -> Self {
        Self { kind: kind.into(), start, end, description: String::new(), color: Self::default_color() }
    }

    /// Number of residues covered.
    pub fn len(&self) -> usize {
        if self.is_empty() { 0 } else { self.end - self.start + 1 }
    }

    /// Whether the span is inverted (`end < start`).
    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

/// A named sequence. Only `sequence` is used by the aligner.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    /// Identifier (first token of the FASTA header).
    pub id: String,
    /// Free-text description (full FASTA header).
    #[serde(default)]
    pub name: String,
    /// Residues, casing as given.
    pub sequence: String,
    /// Source organism, empty when unknown.
    #[serde(default)]
    pub organism: String,
    /// Annotated spans; FASTA input carries none.
    #[serde(default)]
    pub features: Vec<Feature>,
    /// How the record was obtained.
    #[serde(default)]
    pub source: SequenceSource,
}

impl Sequence {
    /// Number of residues.
    pub fn len(&self) -> usize {
        self.sequence.chars().count()
    }

    /// Whether there are no residues.
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// Nucleotide or amino-acid sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SequenceType {
    Dna,
    Protein,
}

impl std::fmt::Display for SequenceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self { SequenceType::Dna => "dna", SequenceType::Protein => "protein" })
    }
}

/// Parse FASTA text (or a bare pasted sequence) into records.
pub fn parse_fasta(text: &str) -> Vec<Sequence> {
    let mut out: Vec<Sequence> = vec![];
    let mut current: Option<Sequence> = None;
    for line in text.lines() {
        if let Some(rest) = line.strip_prefix('>') {
            if let Some(rec) = current.take() { push_record(&mut out, rec); }
            let header = rest.trim();
            current = Some(Sequence {
                id: header.split_whitespace().next().unwrap_or("").to_string(),
                name: header.to_string(),
                source: SequenceSource::Fasta,
                ..Default::default()
            });
        } else if let Some(rec) = current.as_mut() {
            rec.sequence.extend(line.chars().filter(|c| !c.is_whitespace()));
        }
    }
    if let Some(rec) = current.take() { push_record(&mut out, rec); }

    if out.is_empty() && !text.trim().is_empty() {
        let clean: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        if clean.chars().all(char::is_alphabetic) {
            out.push(Sequence {
                id: "pasted".to_string(),
                name: "Pasted sequence".to_string(),
                sequence: clean,
                source: SequenceSource::Paste,
                ..Default::default()
            });
        }
    }
    out
}

fn push_record(out: &mut Vec<Sequence>, rec: Sequence) {
    if !rec.id.is_empty() {
        out.push(rec);
    }
}

/// DNA when more than 90% of the symbols are `A`, `T`, `G`, `C`, `U` or `N`
/// (any case); protein otherwise, including for an empty sequence.
pub fn detect_sequence_type(sequence: &str) -> SequenceType {
    let total = sequence.chars().count();
    if total == 0 {
        return SequenceType::Protein;
    }
    let nucleotides = sequence.chars()
        .filter(|c| matches!(c.to_ascii_uppercase(), 'A'|'T'|'G'|'C'|'U'|'N'))
        .count();
    if nucleotides as f64 / total as f64 > 0.9 { SequenceType::Dna } else { SequenceType::Protein }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_record_fasta() {
        let recs = parse_fasta(">a first one\nAC GT\nac\n>b\n\nTTTT\n");
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].id, "a");
        assert_eq!(recs[0].name, "a first one");
        assert_eq!(recs[0].sequence, "ACGTac");
        assert_eq!(recs[0].len(), 6);
        assert_eq!(recs[0].source, SequenceSource::Fasta);
        assert_eq!(recs[1].sequence, "TTTT");
    }

    #[test]
    fn pasted_sequence() {
        let recs = parse_fasta("  ACGT\nACGT \n");
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].id, "pasted");
        assert_eq!(recs[0].sequence, "ACGTACGT");
        assert_eq!(recs[0].source, SequenceSource::Paste);
    }

    #[test]
    fn junk_is_not_a_sequence() {
        assert!(parse_fasta("AC1GT").is_empty());
        assert!(parse_fasta("   \n").is_empty());
        assert!(parse_fasta("").is_empty());
    }

    #[test]
    fn header_without_id_is_dropped() {
        let recs = parse_fasta(">\nACGT\n>x\nGG\n");
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].id, "x");
    }

    #[test]
    fn records_carry_features() {
        let recs = parse_fasta(">p\nMKVL\n");
        assert!(recs[0].features.is_empty());

        let json = r#"{"id":"P1","sequence":"MKVLAAG","features":[{"type":"Domain","start":1,"end":4}]}"#;
        let rec: Sequence = serde_json::from_str(json).unwrap();
        assert_eq!(rec.features, vec![Feature::new("Domain", 1, 4)]);
        assert_eq!(rec.features[0].len(), 4);
        assert_eq!(rec.features[0].color, "#95a5a6");
        assert_eq!(rec.source, SequenceSource::Unknown);
        assert!(serde_json::to_string(&rec).unwrap().contains(r#""type":"Domain""#));
    }

    #[test]
    fn type_detection() {
        assert_eq!(detect_sequence_type("ACGTACGTAC"), SequenceType::Dna);
        assert_eq!(detect_sequence_type("acgun"), SequenceType::Dna);
        assert_eq!(detect_sequence_type("MKVLAAGIVG"), SequenceType::Protein);
        // exactly 90% is not enough
        assert_eq!(detect_sequence_type("ACGTACGTAE"), SequenceType::Protein);
        assert_eq!(detect_sequence_type(""), SequenceType::Protein);
        assert_eq!(SequenceType::Dna.to_string(), "dna");
    }
}
