//! Template matching settings.

/// Length of the seed used by the sliding-window search
pub const SEED_LENGTH: usize = 20;
/// Largest template offset tried by the sliding-window search
pub const SEED_SEARCH_WINDOW: usize = 500;
/// Chains shorter than this never match by sequence
pub const MIN_CANDIDATE_LENGTH: usize = 10;
/// Template prefix length checked by the partial-start match
pub const PARTIAL_PREFIX_LENGTH: usize = 20;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InjectSettings {
    /// Seed length for the sliding-window search
    pub seed_length: usize,
    /// Number of template offsets the seed search may try
    pub search_window: usize,
    /// Minimum template length for sequence-based chain selection
    pub min_candidate_length: usize,
    /// Prefix length for the partial-start match
    pub partial_prefix_length: usize,
}

impl Default for InjectSettings {
    fn default() -> Self {
        Self {
            seed_length: SEED_LENGTH,
            search_window: SEED_SEARCH_WINDOW,
            min_candidate_length: MIN_CANDIDATE_LENGTH,
            partial_prefix_length: PARTIAL_PREFIX_LENGTH,
        }
    }
}
