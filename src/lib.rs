#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

//! # cif-templates Library
//!
//! This library cuts per-chain structural templates out of mmCIF files and
//! maps each onto the protein sequences of an AlphaFold3 input job. Chains
//! are matched by identifier or by sequence, then placed on the target
//! sequence by exact containment or a seed search, and the resulting index
//! mapping is appended to the entry's `templates` list.
//!
//! Everything works on in-memory text; file handling lives in [`utils`].

#[allow(missing_docs)]
pub mod alignment;
pub mod chains;
pub mod cif;
mod error;
#[allow(missing_docs)]
pub mod inject;
#[allow(missing_docs)]
pub mod input;
pub mod residues;
pub mod sequences;
#[allow(missing_docs)]
pub mod settings;
pub mod utils;

#[cfg(test)]
mod testing;

// Re-export key public types
pub use alignment::{Anchor, TemplateRange};
pub use chains::{extract_chain, get_chain_ids, ExtractedChain};
pub use error::{Error, Result};
pub use inject::{ChainCache, MatchStrategy, TemplateInjector};
pub use input::{ChainIds, FoldInput, ProteinChain, SequenceEntry, Template};
pub use residues::one_letter_code;
pub use sequences::{get_sequences, sequences_to_df, SequenceRecord};
pub use settings::InjectSettings;
pub use utils::{
    load_input, load_sequences, load_structure, parse_seeds, run_with_threads, write_df_to_file,
    write_input, DataFrameFileType,
};

/// Inject templates from one mmCIF document into a folding job, using the
/// default [`InjectSettings`].
///
/// # Arguments
///
/// * `input` - The job to modify in place
/// * `cif` - Text of the mmCIF document
///
/// # Returns
///
/// The ordered audit log of every chain-selection and alignment decision.
///
/// # Example
///
/// ```no_run
/// use cif_templates::{inject_templates, load_input, load_structure};
///
/// let mut job = load_input("path/to/job.json").unwrap();
/// let cif = load_structure("path/to/structure.cif").unwrap();
/// for line in inject_templates(&mut job, &cif).unwrap() {
///     println!("{line}");
/// }
/// ```
pub fn inject_templates(input: &mut FoldInput, cif: &str) -> Result<Vec<String>> {
    TemplateInjector::default().inject(input, cif)
}
