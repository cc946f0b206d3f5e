//! Line-oriented scanning of the `_atom_site` loop in mmCIF text.
//!
//! Only the parts of the format needed to locate chains and residues are
//! understood: the loop's column declarations and its `ATOM`/`HETATM` rows,
//! split on whitespace. Everything else is reported as lying outside the
//! block so callers can copy it through untouched.

use crate::error::{Error, Result};
use tracing::trace;

const ATOM_SITE_PREFIX: &str = "_atom_site.";

/// Where the scanner is relative to the atom-site block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// No `_atom_site.` declaration seen yet
    Seeking,
    /// Collecting column declarations
    InHeaders,
    /// Reading atom records
    InData,
    /// The block has ended; nothing further is interpreted
    Done,
}

/// Positions of the columns used for chain and residue lookups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AtomSiteColumns {
    /// Chain identifier, `auth_asym_id` or else `label_asym_id`
    pub chain_id: Option<usize>,
    /// Residue name, `label_comp_id` or else `auth_comp_id`
    pub residue_name: Option<usize>,
    /// Residue number, `auth_seq_id` or else `label_seq_id`
    pub residue_seq: Option<usize>,
}

impl AtomSiteColumns {
    /// Resolve column positions from the declared column names (without the
    /// `_atom_site.` prefix). Author-assigned columns win over label columns.
    pub fn resolve(headers: &[String]) -> Self {
        let find = |name: &str| headers.iter().position(|h| h == name);

        Self {
            chain_id: find("auth_asym_id").or_else(|| find("label_asym_id")),
            residue_name: find("label_comp_id").or_else(|| find("auth_comp_id")),
            residue_seq: find("auth_seq_id").or_else(|| find("label_seq_id")),
        }
    }
}

/// A single `ATOM` or `HETATM` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomRecord<'a> {
    fields: Vec<&'a str>,
    columns: AtomSiteColumns,
}

impl<'a> AtomRecord<'a> {
    fn field(&self, idx: Option<usize>) -> Option<&'a str> {
        idx.and_then(|i| self.fields.get(i).copied())
    }

    /// The chain identifier, or `None` if the row is too short or the column
    /// was never declared.
    pub fn chain_id(&self) -> Option<&'a str> {
        self.field(self.columns.chain_id)
    }

    /// The three-letter residue name.
    pub fn residue_name(&self) -> Option<&'a str> {
        self.field(self.columns.residue_name)
    }

    /// The residue sequence number, kept as text.
    pub fn residue_seq(&self) -> Option<&'a str> {
        self.field(self.columns.residue_seq)
    }

    /// Whether this is a `HETATM` row.
    pub fn is_hetatm(&self) -> bool {
        self.fields.first() == Some(&"HETATM")
    }
}

/// Classification of one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScannedLine<'a> {
    /// Before or after the atom-site block
    Outside,
    /// An `_atom_site.` column declaration
    Header,
    /// A blank line inside the block
    Blank,
    /// An atom record inside the block
    Record(AtomRecord<'a>),
}

/// State machine over the lines of an mmCIF document.
///
/// Feed it every line in order. Column positions are resolved on the first
/// atom record, once all declarations of the block have been collected.
/// Any line in the data section that is neither blank nor an atom record
/// (usually the `#` terminator or the next category) ends the block.
#[derive(Debug)]
pub struct AtomSiteScanner {
    state: ScanState,
    headers: Vec<String>,
    columns: Option<AtomSiteColumns>,
}

impl Default for AtomSiteScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl AtomSiteScanner {
    /// A scanner positioned before the atom-site block.
    pub fn new() -> Self {
        Self {
            state: ScanState::Seeking,
            headers: Vec::new(),
            columns: None,
        }
    }

    /// Current position relative to the block.
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Declared column names, without the `_atom_site.` prefix.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Resolved column positions; `None` until the first atom record.
    pub fn columns(&self) -> Option<AtomSiteColumns> {
        self.columns
    }

    /// Classify the next line and advance the state machine.
    pub fn feed<'a>(&mut self, line: &'a str) -> ScannedLine<'a> {
        let trimmed = line.trim();

        match self.state {
            ScanState::Seeking => match atom_site_tag(trimmed) {
                Some(tag) => {
                    self.headers.push(tag);
                    self.transition(ScanState::InHeaders);
                    ScannedLine::Header
                }
                None => ScannedLine::Outside,
            },
            ScanState::InHeaders => {
                if let Some(tag) = atom_site_tag(trimmed) {
                    self.headers.push(tag);
                    ScannedLine::Header
                } else if trimmed.is_empty() {
                    ScannedLine::Blank
                } else if let Some(fields) = record_fields(trimmed) {
                    let columns = AtomSiteColumns::resolve(&self.headers);
                    trace!("Resolved atom-site columns {columns:?}");
                    self.columns = Some(columns);
                    self.transition(ScanState::InData);
                    ScannedLine::Record(AtomRecord { fields, columns })
                } else {
                    // Declarations without any rows
                    self.transition(ScanState::Done);
                    ScannedLine::Outside
                }
            }
            ScanState::InData => {
                if trimmed.is_empty() {
                    return ScannedLine::Blank;
                }
                match (record_fields(trimmed), self.columns) {
                    (Some(fields), Some(columns)) => {
                        ScannedLine::Record(AtomRecord { fields, columns })
                    }
                    _ => {
                        self.transition(ScanState::Done);
                        ScannedLine::Outside
                    }
                }
            }
            ScanState::Done => ScannedLine::Outside,
        }
    }

    fn transition(&mut self, next: ScanState) {
        trace!("Atom-site scanner {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

/// Column name of an `_atom_site.` declaration line.
fn atom_site_tag(trimmed: &str) -> Option<String> {
    trimmed
        .strip_prefix(ATOM_SITE_PREFIX)
        .and_then(|rest| rest.split_whitespace().next())
        .map(|name| name.to_string())
}

/// Whitespace-separated fields of an `ATOM`/`HETATM` row.
fn record_fields(trimmed: &str) -> Option<Vec<&str>> {
    let fields: Vec<&str> = trimmed.split_whitespace().collect();
    match fields.first() {
        Some(&"ATOM") | Some(&"HETATM") => Some(fields),
        _ => None,
    }
}

/// Reject text that cannot be a structure document at all.
pub fn validate_structure(cif: &str) -> Result<()> {
    if cif.trim().is_empty() {
        return Err(Error::EmptyStructure);
    }
    if !cif.lines().any(|l| l.trim_start().starts_with("data_")) {
        return Err(Error::MissingDataBlock);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABEL_ONLY: &str = "data_TEST
loop_
_atom_site.group_PDB
_atom_site.id
_atom_site.label_atom_id
_atom_site.label_comp_id
_atom_site.label_asym_id
_atom_site.label_seq_id
ATOM 1 N MET A 1
ATOM 2 CA MET A 1

HETATM 3 O HOH B 1
#
_software.name test
ATOM 4 N GLY C 1
";

    fn scan_all(text: &str) -> (AtomSiteScanner, Vec<ScannedLine<'_>>) {
        let mut scanner = AtomSiteScanner::new();
        let lines = text.lines().map(|l| scanner.feed(l)).collect();
        (scanner, lines)
    }

    #[test]
    fn test_state_transitions() {
        let mut scanner = AtomSiteScanner::new();
        let mut states = Vec::new();
        for line in LABEL_ONLY.lines() {
            scanner.feed(line);
            states.push(scanner.state());
        }
        assert_eq!(states[0], ScanState::Seeking);
        assert_eq!(states[1], ScanState::Seeking);
        assert_eq!(states[2], ScanState::InHeaders);
        assert_eq!(states[7], ScanState::InHeaders);
        assert_eq!(states[8], ScanState::InData);
        assert_eq!(states[10], ScanState::InData);
        assert_eq!(states[12], ScanState::Done);
        assert_eq!(*states.last().unwrap(), ScanState::Done);
    }

    #[test]
    fn test_label_columns_fallback() {
        let (scanner, lines) = scan_all(LABEL_ONLY);
        assert_eq!(
            scanner.columns(),
            Some(AtomSiteColumns {
                chain_id: Some(4),
                residue_name: Some(3),
                residue_seq: Some(5),
            })
        );

        let records: Vec<_> = lines
            .iter()
            .filter_map(|l| match l {
                ScannedLine::Record(r) => Some(r),
                _ => None,
            })
            .collect();
        // The ATOM row after the block terminator is not part of the block
        assert_eq!(records.len(), 3);
        assert_eq!(records[2].chain_id(), Some("B"));
        assert_eq!(records[2].residue_name(), Some("HOH"));
        assert!(records[2].is_hetatm());
        assert!(!records[0].is_hetatm());
        assert_eq!(lines[10], ScannedLine::Blank);
        assert_eq!(lines[14], ScannedLine::Outside);
    }

    #[test]
    fn test_author_columns_preferred() {
        let headers: Vec<String> = [
            "group_PDB",
            "label_comp_id",
            "label_asym_id",
            "label_seq_id",
            "auth_seq_id",
            "auth_comp_id",
            "auth_asym_id",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        let columns = AtomSiteColumns::resolve(&headers);
        assert_eq!(columns.chain_id, Some(6));
        assert_eq!(columns.residue_seq, Some(4));
        assert_eq!(columns.residue_name, Some(1));
    }

    #[test]
    fn test_short_record_has_no_chain() {
        let (_, lines) = scan_all(
            "data_X\n_atom_site.group_PDB\n_atom_site.id\n_atom_site.label_asym_id\nATOM 1\n",
        );
        match &lines[4] {
            ScannedLine::Record(r) => assert_eq!(r.chain_id(), None),
            other => panic!("Expected a record, found {other:?}"),
        }
    }

    #[test]
    fn test_headers_without_rows() {
        let (scanner, _) = scan_all("data_X\n_atom_site.id\n#\nATOM 1\n");
        assert_eq!(scanner.state(), ScanState::Done);
        assert_eq!(scanner.columns(), None);
        assert_eq!(scanner.headers(), &["id".to_string()]);
    }

    #[test]
    fn test_validate_structure() {
        assert!(matches!(validate_structure(""), Err(Error::EmptyStructure)));
        assert!(matches!(
            validate_structure("  \n\t\n"),
            Err(Error::EmptyStructure)
        ));
        assert!(matches!(
            validate_structure("HEADER    PDB file\nATOM 1\n"),
            Err(Error::MissingDataBlock)
        ));
        assert!(validate_structure(LABEL_ONLY).is_ok());
    }
}
