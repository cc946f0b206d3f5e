//! Placement of a template sequence on a query sequence.
//!
//! No gapped alignment happens here. A template is placed either where its
//! full sequence occurs in the query, or by the first fixed-length seed from
//! its head that occurs in the query. The placement is then clamped to the
//! region both sequences cover.
//!
//! The seed search stops at the first template offset whose seed matches.
//! That is not necessarily the placement with the largest overlap.

use crate::settings::InjectSettings;
use std::fmt;

/// How a template was anchored on the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// The full template occurs in the query at `start`
    Contained {
        /// Query position of the first template residue
        start: usize,
    },
    /// The seed at `seed_offset` in the template occurs in the query at `seed_start`
    Seeded {
        /// Template position of the seed
        seed_offset: usize,
        /// Query position of the seed
        seed_start: usize,
    },
}

impl Anchor {
    /// Query position of the template's first residue. Negative when the
    /// template begins before the query does.
    pub fn start(&self) -> isize {
        match *self {
            Anchor::Contained { start } => start as isize,
            Anchor::Seeded {
                seed_offset,
                seed_start,
            } => seed_start as isize - seed_offset as isize,
        }
    }
}

/// Anchor `template` on `query`, trying full containment before the seed search.
pub fn find_anchor(template: &str, query: &str, settings: &InjectSettings) -> Option<Anchor> {
    match query.find(template) {
        Some(start) => Some(Anchor::Contained { start }),
        None => seed_search(template, query, settings),
    }
}

/// Slide a seed along the head of the template and return the first one found
/// in the query.
///
/// Offsets run from 0 up to, but excluding, the smaller of the search window
/// and `template.len() - seed_length`.
pub fn seed_search(template: &str, query: &str, settings: &InjectSettings) -> Option<Anchor> {
    let seed_length = settings.seed_length;
    if seed_length == 0 {
        return None;
    }
    let last_offset = settings
        .search_window
        .min(template.len().saturating_sub(seed_length));

    (0..last_offset).find_map(|offset| {
        template
            .get(offset..offset + seed_length)
            .and_then(|seed| query.find(seed))
            .map(|seed_start| Anchor::Seeded {
                seed_offset: offset,
                seed_start,
            })
    })
}

/// Matching stretch between query and template, as two equally long
/// contiguous ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateRange {
    pub query_start: usize,
    pub template_start: usize,
    pub length: usize,
}

impl TemplateRange {
    /// Clamp a placement starting at query position `start` to both sequences.
    ///
    /// Template residues before the query start are dropped, as are those past
    /// the query end. Returns `None` when nothing overlaps.
    pub fn clamp(start: isize, template_len: usize, query_len: usize) -> Option<Self> {
        let template_start = if start < 0 { start.unsigned_abs() } else { 0 };
        let query_start = start.max(0) as usize;

        let mut length = template_len as isize - template_start as isize;
        if query_start as isize + length > query_len as isize {
            length = query_len as isize - query_start as isize;
        }
        if length <= 0 {
            return None;
        }

        Some(Self {
            query_start,
            template_start,
            length: length as usize,
        })
    }

    pub fn query_end(&self) -> usize {
        self.query_start + self.length
    }

    pub fn template_end(&self) -> usize {
        self.template_start + self.length
    }

    /// Zero-based query positions covered by the template.
    pub fn query_indices(&self) -> Vec<usize> {
        (self.query_start..self.query_end()).collect()
    }

    /// Zero-based template positions, paired one-to-one with [`Self::query_indices`].
    pub fn template_indices(&self) -> Vec<usize> {
        (self.template_start..self.template_end()).collect()
    }
}

impl fmt::Display for TemplateRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Input[{}-{}] maps to Template[{}-{}]",
            self.query_start,
            self.query_end(),
            self.template_start,
            self.template_end()
        )
    }
}
