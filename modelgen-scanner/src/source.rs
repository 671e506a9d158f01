//! Existing source documents.

use std::collections::BTreeMap;

/// Existing source text keyed by logical document name.
///
/// Documents iterate in name order, which keeps marker order and every
/// derived diagnostic stable between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceSet {
    documents: BTreeMap<String, String>,
}

impl SourceSet {
    /// Creates an empty set (first-ever generation).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a document.
    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.documents.insert(name.into(), text.into());
    }

    /// Adds or replaces a document.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(name, text);
        self
    }

    /// Returns a document's text.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.documents.get(name).map(String::as_str)
    }

    /// Iterates `(name, text)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.documents
            .iter()
            .map(|(name, text)| (name.as_str(), text.as_str()))
    }

    /// Returns the number of documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns true if there are no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl From<BTreeMap<String, String>> for SourceSet {
    fn from(documents: BTreeMap<String, String>) -> Self {
        Self { documents }
    }
}

impl<N: Into<String>, T: Into<String>> FromIterator<(N, T)> for SourceSet {
    fn from_iter<I: IntoIterator<Item = (N, T)>>(iter: I) -> Self {
        Self {
            documents: iter
                .into_iter()
                .map(|(name, text)| (name.into(), text.into()))
                .collect(),
        }
    }
}
