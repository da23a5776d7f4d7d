//! Shared data types (spec ch. 3): the keyword mapping and the evolving
//! generation context threaded through a single engine run.

use indexmap::IndexMap;

/// Keyword -> short definition. Backed by an insertion-ordered map so that
/// embedding it in a prompt yields deterministic text regardless of how the
/// map was populated (file order, completer response order, ...).
pub type KeywordMap = IndexMap<String, String>;

/// Serialize a [`KeywordMap`] as `"k: v, k2: v2"` in insertion order, the
/// form embedded in prompts (spec ch. 4.4).
pub fn format_keywords(keywords: &KeywordMap) -> String {
    keywords
        .iter()
        .map(|(k, v)| format!("{k}: {v}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// The evolving state of a single engine run.
///
/// `accepted_parody` is positionally aligned with the input (blanks
/// preserved as empty strings); `accepted_non_blank` holds only the
/// non-blank subset, in the same relative order, for use as rhyme and
/// semantic context.
#[derive(Debug, Default, Clone)]
pub struct ParodyContext {
    pub accepted_parody: Vec<String>,
    pub accepted_non_blank: Vec<String>,
}

impl ParodyContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a blank position: preserves alignment without touching the
    /// non-blank context used for prompts.
    pub fn push_blank(&mut self) {
        self.accepted_parody.push(String::new());
    }

    /// Record a finished, non-blank line.
    pub fn push_non_blank(&mut self, line: String) {
        self.accepted_parody.push(line.clone());
        self.accepted_non_blank.push(line);
    }

    /// Up to the last `n` accepted non-blank lines, oldest first.
    pub fn last_non_blank(&self, n: usize) -> Vec<String> {
        let len = self.accepted_non_blank.len();
        let start = len.saturating_sub(n);
        self.accepted_non_blank[start..].to_vec()
    }
}
