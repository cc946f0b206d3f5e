//! Chain discovery and single-chain extraction from mmCIF text.

use crate::cif::{AtomSiteScanner, ScannedLine};
use crate::residues::one_letter_code;
use std::collections::{BTreeSet, HashSet};

const STRAND_ID_TAG: &str = "_entity_poly.pdbx_strand_id";

/// One chain cut out of a structure document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedChain {
    /// Chain identifier as found in the atom records
    pub chain_id: String,
    /// The document with every other chain's atom records removed
    pub mmcif: String,
    /// One-letter residue sequence, one character per residue number
    pub sequence: String,
}

/// Collect the distinct chain identifiers used by atom records.
///
/// Rows too short to hold the chain column are skipped. A document without
/// an atom-site block gives an empty set.
pub fn get_chain_ids(cif: &str) -> BTreeSet<String> {
    let mut scanner = AtomSiteScanner::new();

    cif.lines()
        .filter_map(|line| match scanner.feed(line) {
            ScannedLine::Record(record) => record.chain_id().map(|c| c.to_string()),
            _ => None,
        })
        .collect()
}

/// Filter a document down to the atom records of `chain_id` and derive the
/// chain's sequence.
///
/// All lines other than atom records are kept verbatim, except a key-value
/// `_entity_poly.pdbx_strand_id` line, which is rewritten to name only this
/// chain. Residues are numbered by their sequence-number column; the first
/// atom seen for each number contributes one character, in file order.
pub fn extract_chain(cif: &str, chain_id: &str) -> ExtractedChain {
    let mut scanner = AtomSiteScanner::new();
    let mut lines: Vec<String> = Vec::new();
    let mut sequence = String::new();
    let mut seen_residues: HashSet<&str> = HashSet::new();

    for line in cif.lines() {
        match scanner.feed(line) {
            ScannedLine::Record(record) => {
                if record.chain_id() != Some(chain_id) {
                    continue;
                }
                lines.push(line.to_string());

                if let (Some(resn), Some(resi)) = (record.residue_name(), record.residue_seq()) {
                    if seen_residues.insert(resi) {
                        sequence.push(one_letter_code(resn));
                    }
                }
            }
            ScannedLine::Outside if is_strand_id_assignment(line) => {
                lines.push(format!("{STRAND_ID_TAG} {chain_id}"));
            }
            _ => lines.push(line.to_string()),
        }
    }

    ExtractedChain {
        chain_id: chain_id.to_string(),
        mmcif: lines.join("\n"),
        sequence,
    }
}

/// A `_entity_poly.pdbx_strand_id` line carrying its value inline. The bare
/// tag inside a `loop_` header is left alone so the loop stays aligned.
fn is_strand_id_assignment(line: &str) -> bool {
    let mut tokens = line.split_whitespace();
    tokens.next() == Some(STRAND_ID_TAG) && tokens.next().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixture, synthetic_cif};

    #[test]
    fn test_chain_ids_from_fixture() {
        let cif = fixture("two_chains.cif");
        let chains = get_chain_ids(&cif);
        // Author chain names, not the label ones
        assert_eq!(chains, BTreeSet::from(["H".to_string(), "L".to_string()]));
    }

    #[test]
    fn test_chain_ids_without_atom_site() {
        let chains = get_chain_ids("data_EMPTY\n_entry.id EMPTY\n#\n");
        assert!(chains.is_empty());
    }

    #[test]
    fn test_chain_ids_skip_short_rows() {
        let cif = "data_X
loop_
_atom_site.group_PDB
_atom_site.id
_atom_site.auth_asym_id
ATOM 1 A
ATOM 2
HETATM 3 B
ATOM 4 A
";
        assert_eq!(
            get_chain_ids(cif),
            BTreeSet::from(["A".to_string(), "B".to_string()])
        );
    }

    #[test]
    fn test_extract_fixture_chain() {
        let cif = fixture("two_chains.cif");

        let heavy = extract_chain(&cif, "H");
        // Water bound to chain H shows up as an unknown residue
        assert_eq!(heavy.sequence, "MQIX");
        assert_eq!(heavy.chain_id, "H");

        let light = extract_chain(&cif, "L");
        assert_eq!(light.sequence, "SGM");
        assert!(light.mmcif.contains("_entity_poly.pdbx_strand_id L"));
        assert!(!light.mmcif.contains("H,L"));
        assert!(light.mmcif.starts_with("data_TWO"));
        assert!(light.mmcif.contains("_atom_site.auth_asym_id"));
        assert!(light.mmcif.contains("_software.name"));

        let atom_rows = light
            .mmcif
            .lines()
            .filter(|l| l.starts_with("ATOM") || l.starts_with("HETATM"))
            .count();
        assert_eq!(atom_rows, 6);
        assert!(light
            .mmcif
            .lines()
            .filter(|l| l.starts_with("ATOM"))
            .all(|l| l.split_whitespace().nth(18) == Some("L")));
    }

    #[test]
    fn test_extract_is_idempotent() {
        let cif = fixture("two_chains.cif");
        assert_eq!(extract_chain(&cif, "H"), extract_chain(&cif, "H"));
    }

    #[test]
    fn test_sequence_length_counts_residue_numbers() {
        let cif = synthetic_cif(&[("A", "ACDEFGHIKLMNPQRSTVWY")]);
        let chain = extract_chain(&cif, "A");
        assert_eq!(chain.sequence, "ACDEFGHIKLMNPQRSTVWY");

        // Two atoms per residue in the synthetic document
        let atom_rows = chain
            .mmcif
            .lines()
            .filter(|l| l.starts_with("ATOM"))
            .count();
        assert_eq!(atom_rows, 40);
    }

    #[test]
    fn test_extract_unknown_chain() {
        let cif = synthetic_cif(&[("A", "ACDEF")]);
        let chain = extract_chain(&cif, "Z");
        assert!(chain.sequence.is_empty());
        assert!(!chain.mmcif.lines().any(|l| l.starts_with("ATOM")));
    }

    #[test]
    fn test_strand_id_in_loop_header_untouched() {
        let cif = "data_X
loop_
_entity_poly.entity_id
_entity_poly.pdbx_strand_id
1 A
2 B
#
";
        let chain = extract_chain(cif, "A");
        assert_eq!(chain.mmcif, cif.trim_end_matches('\n'));
    }
}
