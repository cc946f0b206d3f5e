//! AlphaFold3 input JSON.
//!
//! Only the fields the template injection reads or writes are typed. Any
//! other key, at any level, is carried through untouched.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Dialect written by [`FoldInput::new`]
pub const DIALECT: &str = "alphafold3";
/// Input format version written by [`FoldInput::new`]
pub const VERSION: u32 = 1;

/// A complete folding job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoldInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_seeds: Option<Vec<u32>>,
    pub sequences: Vec<SequenceEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One entry of the `sequences` list.
///
/// Only protein entries are interpreted; ligands, DNA and RNA stay in `other`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein: Option<ProteinChain>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// A protein chain to be folded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProteinChain {
    pub id: ChainIds,
    pub sequence: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unpaired_msa: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paired_msa: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates: Option<Vec<Template>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Chain label(s) of a protein entry. Homomers list several labels sharing
/// one sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChainIds {
    Single(String),
    Multiple(Vec<String>),
}

impl ChainIds {
    /// The label used for chain lookups: the only one, or the first of many.
    pub fn primary(&self) -> Option<&str> {
        match self {
            ChainIds::Single(id) => Some(id.as_str()),
            ChainIds::Multiple(ids) => ids.first().map(|id| id.as_str()),
        }
        .filter(|id| !id.is_empty())
    }
}

/// Structural template with its residue mapping onto the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    /// Single-chain mmCIF text
    pub mmcif: String,
    pub query_indices: Vec<usize>,
    pub template_indices: Vec<usize>,
}

impl FoldInput {
    /// Start a new job with the fixed dialect and version.
    pub fn new(
        name: impl Into<String>,
        model_seeds: Vec<u32>,
        sequences: Vec<SequenceEntry>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            model_seeds: Some(model_seeds),
            sequences,
            dialect: Some(DIALECT.to_string()),
            version: Some(VERSION),
            extra: Map::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Pretty-printed JSON with two-space indentation.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the fields template injection relies on, for every protein entry.
    pub fn validate(&self) -> Result<()> {
        for (entry, protein) in self.proteins() {
            if protein.id.primary().is_none() {
                return Err(Error::MissingField { entry, field: "id" });
            }
            if protein.sequence.is_empty() {
                return Err(Error::MissingField {
                    entry,
                    field: "sequence",
                });
            }
            if !protein.sequence.is_ascii() {
                return Err(Error::InvalidSequence { entry });
            }
        }
        Ok(())
    }

    /// Protein entries with their position in `sequences`.
    pub fn proteins(&self) -> impl Iterator<Item = (usize, &ProteinChain)> {
        self.sequences
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.protein.as_ref().map(|p| (i, p)))
    }
}

/// Decode the bare `sequences` array of a job.
pub fn sequences_from_json(json: &str) -> Result<Vec<SequenceEntry>> {
    Ok(serde_json::from_str(json)?)
}
