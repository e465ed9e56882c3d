//! Tree-driven analysis: completion, linting and hover.
//!
//! All passes are read-only over a [`Parse`] and consult a shared
//! [`TagIndex`]. An [`Analyzer`] is one editor session: it owns its memoised
//! completion data while the index itself is shared through `Arc`.
//!
//! Before the index is loaded every pass degrades gracefully: key completion
//! offers nothing, value completion yields `None`, the linter skips tag checks
//! and hover finds nothing.

mod complete;
mod hover;
mod levenshtein;
mod lint;

#[cfg(test)]
mod lint_tests;

use std::sync::{Arc, OnceLock};

use oql_core::TagIndex;
use rowan::TextSize;

use crate::diagnostics::Diagnostics;
use crate::parser::Parse;

pub use complete::{Candidate, CandidateCategory, Completion, ValidFor};
pub use hover::Hover;

/// Default edit distance for "did you mean" fixes.
pub const DEFAULT_MAX_DISTANCE: usize = 2;

/// Linter settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LintConfig {
    /// Known names within this Levenshtein distance are offered as fixes.
    pub max_distance: usize,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            max_distance: DEFAULT_MAX_DISTANCE,
        }
    }
}

impl LintConfig {
    pub fn with_max_distance(mut self, max_distance: usize) -> Self {
        self.max_distance = max_distance;
        self
    }
}

/// Per-session analysis service over a shared tag index.
#[derive(Debug)]
pub struct Analyzer {
    index: Arc<TagIndex>,
    config: LintConfig,
    /// Key candidates and their validity pattern, built on first use after load.
    keys: OnceLock<complete::Candidates>,
}

impl Analyzer {
    pub fn new(index: Arc<TagIndex>) -> Self {
        Self {
            index,
            config: LintConfig::default(),
            keys: OnceLock::new(),
        }
    }

    pub fn with_config(mut self, config: LintConfig) -> Self {
        self.config = config;
        self
    }

    pub fn index(&self) -> &TagIndex {
        &self.index
    }

    pub fn config(&self) -> LintConfig {
        self.config
    }

    /// Completion at `offset`, or `None` when nothing applies.
    pub fn complete(&self, parse: &Parse, offset: TextSize) -> Option<Completion> {
        complete::complete(self, parse, offset)
    }

    /// Unknown tags and disallowed statements, in tree order.
    pub fn lint(&self, parse: &Parse) -> Diagnostics {
        lint::lint(self, parse)
    }

    /// Metadata for the tag under `offset`.
    pub fn hover(&self, parse: &Parse, offset: TextSize) -> Option<Hover> {
        hover::hover(self, parse, offset)
    }

    fn key_candidates(&self) -> Option<&complete::Candidates> {
        if !self.index.is_loaded() {
            return None;
        }
        Some(
            self.keys
                .get_or_init(|| complete::Candidates::for_keys(&self.index)),
        )
    }
}
