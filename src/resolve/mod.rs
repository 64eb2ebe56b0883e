//! Name resolution strategies.
//!
//! A [`NameResolver`] reads the plain text of one page and returns the name
//! of the person the page belongs to, if it can find one. Two strategies are
//! provided, matching the two payroll layouts the tool was built for:
//!
//! - [`LabeledFieldStrategy`]: the name follows a `NOME COMPLETO` label.
//! - [`AnchoredHeuristicStrategy`]: the name sits a few lines above a
//!   six-digit occupation (CBO) code.

mod anchored;
mod labeled;

pub use anchored::{AnchoredHeuristicStrategy, DEFAULT_EXCLUDED_LABELS};
pub use labeled::{LabeledFieldStrategy, DEFAULT_LABEL};

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};

/// Extracts a person's name from the text of a single page.
///
/// Implementations are pure: the same text always yields the same answer and
/// no state is shared between calls.
pub trait NameResolver: Send + Sync {
    /// Tag identifying the strategy in reports.
    fn strategy(&self) -> Strategy;

    /// Resolve a name from page text.
    fn resolve(&self, page_text: &str) -> Option<String>;
}

/// Selectable name resolution strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Name on the line after a "full name" label
    #[default]
    LabeledField,
    /// Name above a six-digit occupation code
    AnchoredHeuristic,
}

impl Strategy {
    /// Short name used on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::LabeledField => "labeled",
            Strategy::AnchoredHeuristic => "anchored",
        }
    }

    /// Build the resolver for this strategy with default settings.
    pub fn resolver(self) -> Box<dyn NameResolver> {
        match self {
            Strategy::LabeledField => Box::new(LabeledFieldStrategy::new()),
            Strategy::AnchoredHeuristic => Box::new(AnchoredHeuristicStrategy::new()),
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "labeled" | "labeled_field" | "colaborador" => Ok(Strategy::LabeledField),
            "anchored" | "anchored_heuristic" | "clt" => Ok(Strategy::AnchoredHeuristic),
            other => Err(Error::InvalidOption(format!("unknown strategy: {}", other))),
        }
    }
}

/// Trim, collapse inner whitespace and NFC-normalize a candidate name.
///
/// Returns `None` when nothing is left.
pub(crate) fn clean_name(raw: &str) -> Option<String> {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return None;
    }
    Some(collapsed.nfc().collect())
}
