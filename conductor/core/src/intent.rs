//! Intent Classification
//!
//! Maps free text to a [`TaskKind`] with an ordered keyword table.
//!
//! The input is lowercased and each keyword is tested as a plain substring in
//! table order; the first hit wins. There is no scoring, stemming, or
//! tokenization, so keywords match inside other words ("reorder" hits
//! "order") and table order decides overlaps ("dead stock" must precede
//! "stock"). Text matching nothing falls back to [`FALLBACK_TASK`].

use crate::tasks::TaskKind;

/// Task chosen when no keyword matches
pub const FALLBACK_TASK: TaskKind = TaskKind::AskAssistant;

/// Built-in keyword table, in match order
pub const DEFAULT_KEYWORDS: &[(&str, TaskKind)] = &[
    ("health", TaskKind::AnalyzeBusiness),
    ("analyze", TaskKind::AnalyzeBusiness),
    ("forecast", TaskKind::ForecastDemand),
    ("predict", TaskKind::ForecastDemand),
    ("dead stock", TaskKind::AskAssistant),
    ("supplier", TaskKind::AskAssistant),
    ("purchase", TaskKind::GeneratePurchasePlan),
    ("buy", TaskKind::GeneratePurchasePlan),
    ("order", TaskKind::GeneratePurchasePlan),
    ("shelf", TaskKind::OptimizeShelves),
    ("layout", TaskKind::OptimizeShelves),
    ("stock", TaskKind::OptimizeStock),
    ("inventory", TaskKind::OptimizeStock),
];

/// Ordered keyword router from text to task kind
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntentClassifier {
    keywords: Vec<(String, TaskKind)>,
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentClassifier {
    /// Classifier over [`DEFAULT_KEYWORDS`]
    #[must_use]
    pub fn new() -> Self {
        Self::with_keywords(DEFAULT_KEYWORDS.iter().copied())
    }

    /// Classifier over a custom table; order is preserved, keywords are
    /// lowercased and whitespace-only keywords are dropped
    pub fn with_keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = (S, TaskKind)>,
        S: AsRef<str>,
    {
        let mut classifier = Self {
            keywords: Vec::new(),
        };
        for (keyword, kind) in keywords {
            classifier.push_keyword(keyword.as_ref(), kind);
        }
        classifier
    }

    /// Append a keyword after every existing one
    ///
    /// Surrounding spaces are kept, so `" rx "` only matches a spaced word.
    pub fn push_keyword(&mut self, keyword: &str, kind: TaskKind) {
        if keyword.trim().is_empty() {
            return;
        }
        self.keywords.push((keyword.to_lowercase(), kind));
    }

    /// The table, in match order
    pub fn keywords(&self) -> impl Iterator<Item = (&str, TaskKind)> {
        self.keywords.iter().map(|(k, kind)| (k.as_str(), *kind))
    }

    /// First keyword contained in `text`, with its task
    #[must_use]
    pub fn matched_keyword(&self, text: &str) -> Option<(&str, TaskKind)> {
        let lower = text.to_lowercase();
        self.keywords()
            .find(|(keyword, _)| lower.contains(keyword))
    }

    /// Classify `text`. Never fails.
    #[must_use]
    pub fn classify(&self, text: &str) -> TaskKind {
        self.matched_keyword(text)
            .map_or(FALLBACK_TASK, |(_, kind)| kind)
    }
}
