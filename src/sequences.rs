//! Sequence extraction from mmCIF documents.
//!
//! This module provides functions for listing the derived one-letter
//! sequence of every chain, and for tabulating them across files.

use crate::chains::{extract_chain, get_chain_ids};
use polars::prelude::*;
use std::collections::BTreeMap;

/// Get sequences of all chains in an mmCIF document.
///
/// # Arguments
///
/// * `cif` - Text of the mmCIF document
///
/// # Returns
///
/// A `BTreeMap` mapping chain IDs to their sequences, in chain order.
///
/// # Example
///
/// ```no_run
/// use cif_templates::{get_sequences, load_structure};
///
/// let cif = load_structure("path/to/structure.cif").unwrap();
/// for (chain_id, seq) in get_sequences(&cif) {
///     println!("Chain {}: {}", chain_id, seq);
/// }
/// ```
pub fn get_sequences(cif: &str) -> BTreeMap<String, String> {
    get_chain_ids(cif)
        .into_iter()
        .map(|chain_id| {
            let sequence = extract_chain(cif, &chain_id).sequence;
            (chain_id, sequence)
        })
        .collect()
}

/// A chain sequence tagged with the file it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    /// Source file
    pub file: String,
    /// Chain identifier
    pub chain: String,
    /// One-letter sequence
    pub sequence: String,
}

/// Tabulate sequence records with columns `file`, `chain`, `length`, `sequence`.
pub fn sequences_to_df(records: &[SequenceRecord]) -> PolarsResult<DataFrame> {
    df!(
        "file" => records.iter().map(|x| x.file.to_owned()).collect::<Vec<String>>(),
        "chain" => records.iter().map(|x| x.chain.to_owned()).collect::<Vec<String>>(),
        "length" => records.iter().map(|x| x.sequence.len() as u32).collect::<Vec<u32>>(),
        "sequence" => records.iter().map(|x| x.sequence.to_owned()).collect::<Vec<String>>(),
    )
}
