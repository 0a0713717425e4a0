//! Document structures

use crate::processing::text_processor::TextProcessor;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

pub const DEFAULT_DOCUMENT_NAME: &str = "nameless";

/// A raw text together with its normalized tokens and term frequency table.
///
/// Everything is computed once at construction. There are no setters, so
/// `term_counts` always matches `tokens`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    name: String,
    #[serde(skip)]
    text: String,
    tokens: Vec<String>,
    term_counts: BTreeMap<String, usize>,
}

impl Document {
    pub fn new(text: impl Into<String>, name: Option<String>, processor: &TextProcessor) -> Self {
        let text = text.into();
        let tokens = processor.process_text(&text);
        Self::from_tokens(text, name.unwrap_or_else(|| DEFAULT_DOCUMENT_NAME.to_string()), tokens)
    }

    pub fn named(text: impl Into<String>, name: impl Into<String>, processor: &TextProcessor) -> Self {
        Self::new(text, Some(name.into()), processor)
    }

    fn from_tokens(text: String, name: String, tokens: Vec<String>) -> Self {
        let term_counts = count_terms(&tokens);
        Self {
            name,
            text,
            tokens,
            term_counts,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn term_counts(&self) -> &BTreeMap<String, usize> {
        &self.term_counts
    }

    pub fn term_count(&self, term: &str) -> usize {
        self.term_counts.get(term).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Fresh iterator over the tokens each time it is called.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.tokens.iter()
    }

    /// Terms sorted by descending count, ties broken alphabetically.
    pub fn top_terms(&self, limit: usize) -> Vec<(&str, usize)> {
        let mut terms: Vec<(&str, usize)> = self
            .term_counts
            .iter()
            .map(|(term, &count)| (term.as_str(), count))
            .collect();
        terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        terms.truncate(limit);
        terms
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

fn count_terms(tokens: &[String]) -> BTreeMap<String, usize> {
    tokens.iter().fold(BTreeMap::new(), |mut counts, token| {
        *counts.entry(token.clone()).or_insert(0) += 1;
        counts
    })
}
