//! Template selection and injection into a folding job.

use crate::alignment::{find_anchor, Anchor, TemplateRange};
use crate::chains::{extract_chain, get_chain_ids, ExtractedChain};
use crate::cif::validate_structure;
use crate::error::Result;
use crate::input::{FoldInput, ProteinChain, Template};
use crate::settings::InjectSettings;
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Every chain of one structure document, extracted once and keyed by chain
/// identifier. Iteration follows sorted chain order.
#[derive(Debug, Clone, Default)]
pub struct ChainCache {
    chains: BTreeMap<String, ExtractedChain>,
}

impl ChainCache {
    pub fn build(cif: &str) -> Self {
        let chains = get_chain_ids(cif)
            .into_iter()
            .map(|chain_id| {
                let chain = extract_chain(cif, &chain_id);
                (chain_id, chain)
            })
            .collect();
        Self { chains }
    }

    pub fn get(&self, chain_id: &str) -> Option<&ExtractedChain> {
        self.chains.get(chain_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExtractedChain> {
        self.chains.values()
    }

    pub fn chain_ids(&self) -> Vec<&str> {
        self.chains.keys().map(|k| k.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// Chains long enough to be matched by sequence.
    fn candidates(&self, min_length: usize) -> impl Iterator<Item = &ExtractedChain> {
        self.iter().filter(move |c| c.sequence.len() >= min_length)
    }
}

/// Ways of picking the template chain for a protein entry, tried in
/// [`MatchStrategy::ORDER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    /// The chain whose identifier equals the entry's primary label
    ExactId,
    /// The first chain whose whole sequence occurs in the query
    Containment,
    /// The first chain whose leading residues occur in the query
    PartialStart,
}

/// Outcome of one strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<'c> {
    Matched(&'c ExtractedChain),
    /// The strategy found nothing, with the reason
    NotApplicable(String),
}

impl MatchStrategy {
    pub const ORDER: [MatchStrategy; 3] = [
        MatchStrategy::ExactId,
        MatchStrategy::Containment,
        MatchStrategy::PartialStart,
    ];

    pub fn apply<'c>(
        self,
        cache: &'c ChainCache,
        chain_id: &str,
        query: &str,
        settings: &InjectSettings,
    ) -> Selection<'c> {
        match self {
            MatchStrategy::ExactId => match cache.get(chain_id) {
                Some(chain) if !chain.sequence.is_empty() => Selection::Matched(chain),
                Some(_) => Selection::NotApplicable(format!(
                    "Exact ID match for '{chain_id}' has an empty sequence (ligand?)"
                )),
                None => Selection::NotApplicable(format!(
                    "Exact ID match for '{chain_id}' failed, searching by sequence similarity"
                )),
            },
            MatchStrategy::Containment => cache
                .candidates(settings.min_candidate_length)
                .find(|c| query.contains(c.sequence.as_str()))
                .map_or_else(
                    || {
                        Selection::NotApplicable(format!(
                            "No chain of at least {} residues is contained in the query",
                            settings.min_candidate_length
                        ))
                    },
                    Selection::Matched,
                ),
            MatchStrategy::PartialStart => {
                let prefix = settings.partial_prefix_length;
                cache
                    .candidates(settings.min_candidate_length)
                    .find(|c| c.sequence.get(..prefix).is_some_and(|h| query.contains(h)))
                    .map_or_else(
                        || {
                            Selection::NotApplicable(format!(
                                "No chain starts with {prefix} residues found in the query"
                            ))
                        },
                        Selection::Matched,
                    )
            }
        }
    }

    /// Human-readable description of a match made with this strategy.
    pub fn describe(&self, chain_id: &str) -> String {
        match self {
            MatchStrategy::ExactId => format!("Exact ID match with chain {chain_id}"),
            MatchStrategy::Containment => {
                format!("Sequence match (template inside query) with chain {chain_id}")
            }
            MatchStrategy::PartialStart => {
                format!("Partial sequence match (start) with chain {chain_id}")
            }
        }
    }
}

/// Audit trail of one injection call, mirrored to `tracing`.
#[derive(Debug, Default)]
struct InjectionLog {
    lines: Vec<String>,
}

impl InjectionLog {
    fn record(&mut self, line: String) {
        info!("{line}");
        self.lines.push(line);
    }

    fn failure(&mut self, line: String) {
        warn!("{line}");
        self.lines.push(line);
    }
}

/// Attaches structural templates from an mmCIF document to the protein
/// entries of a folding job.
#[derive(Debug, Clone, Default)]
pub struct TemplateInjector {
    settings: InjectSettings,
}

impl TemplateInjector {
    pub fn new(settings: InjectSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &InjectSettings {
        &self.settings
    }

    /// Inject templates from `cif` into every protein entry of `input`.
    ///
    /// Each protein entry has its MSA fields cleared, then gains at most one
    /// template. Entries that cannot be matched or aligned are left without a
    /// new template. Returns the audit log of every decision.
    ///
    /// # Errors
    ///
    /// Fails before touching `input` if the structure text is empty or not an
    /// mmCIF document, or if a protein entry lacks its chain label or sequence.
    pub fn inject(&self, input: &mut FoldInput, cif: &str) -> Result<Vec<String>> {
        validate_structure(cif)?;
        input.validate()?;

        let cache = ChainCache::build(cif);
        let mut log = InjectionLog::default();
        log.record(format!("Found chains in mmCIF: {:?}", cache.chain_ids()));

        let mut modified = 0;
        for protein in input.sequences.iter_mut().filter_map(|s| s.protein.as_mut()) {
            if self.inject_protein(protein, &cache, &mut log) {
                modified += 1;
            }
        }

        log.record(format!("Updated {modified} chains with templates."));
        Ok(log.lines)
    }

    fn inject_protein(
        &self,
        protein: &mut ProteinChain,
        cache: &ChainCache,
        log: &mut InjectionLog,
    ) -> bool {
        let Some(chain_id) = protein.id.primary() else {
            return false;
        };
        let query = protein.sequence.as_str();
        log.record(format!(
            "Processing chain {chain_id} (Length: {})...",
            query.len()
        ));

        // Template-only input, no precomputed alignments
        protein.unpaired_msa = Some(String::new());
        protein.paired_msa = Some(String::new());

        let Some((strategy, chain)) = self.select_chain(cache, chain_id, query, log) else {
            log.failure("  -> No suitable template chain found via auto-mapping.".to_string());
            return false;
        };
        log.record(format!(
            "  -> Selected template: {}. Template length: {}",
            strategy.describe(&chain.chain_id),
            chain.sequence.len()
        ));

        let Some(anchor) = find_anchor(&chain.sequence, query, &self.settings) else {
            log.failure(
                "  -> Error: Alignment failed (full containment and sliding window). Skipping."
                    .to_string(),
            );
            return false;
        };
        match anchor {
            Anchor::Contained { start } => {
                log.record(format!("  -> Full template found at index {start}."))
            }
            Anchor::Seeded { seed_offset, .. } => log.record(format!(
                "  -> Sliding window match found. Seed offset: {seed_offset}. Effective start: {}.",
                anchor.start()
            )),
        }

        let Some(range) = TemplateRange::clamp(anchor.start(), chain.sequence.len(), query.len())
        else {
            log.failure("  -> Error: Effective match length <= 0. Skipping.".to_string());
            return false;
        };
        log.record(format!("  -> Injection range: {range}"));

        protein
            .templates
            .get_or_insert_with(Vec::new)
            .push(Template {
                mmcif: chain.mmcif.clone(),
                query_indices: range.query_indices(),
                template_indices: range.template_indices(),
            });
        true
    }

    fn select_chain<'c>(
        &self,
        cache: &'c ChainCache,
        chain_id: &str,
        query: &str,
        log: &mut InjectionLog,
    ) -> Option<(MatchStrategy, &'c ExtractedChain)> {
        MatchStrategy::ORDER.iter().find_map(|&strategy| {
            match strategy.apply(cache, chain_id, query, &self.settings) {
                Selection::Matched(chain) => Some((strategy, chain)),
                Selection::NotApplicable(reason) => {
                    log.record(format!("  -> {reason}"));
                    None
                }
            }
        })
    }
}
