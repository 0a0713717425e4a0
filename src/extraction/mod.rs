//! Dataset-specific extraction of the meaningful text in raw corpus files

pub mod bac;
pub mod rules;
pub mod twenty_news;

use crate::error::Result;

pub use bac::{BacArchive, BacExtractor, BlogPost};
pub use rules::{CleaningRule, RuleSet};
pub use twenty_news::{TwentyNewsCorpus, TwentyNewsExtractor};

/// One cleaned unit of text produced by an extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedRecord {
    /// Where the record came from, e.g. `alt.atheism/49960` or `blogs/1.xml#0`
    pub name: String,
    /// Prefix written before the text in consolidated output (the BAC date)
    pub label: Option<String>,
    pub text: String,
}

impl ExtractedRecord {
    pub fn consolidated_line(&self) -> String {
        match &self.label {
            Some(label) => format!("{} - {}", label, self.text),
            None => self.text.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Files or archive entries visited
    pub sources: usize,
    pub records: usize,
    pub skipped: Vec<String>,
}

/// A corpus that yields cleaned records one at a time.
pub trait RecordSource {
    fn describe(&self) -> String;

    fn for_each_record(
        &self,
        sink: &mut dyn FnMut(ExtractedRecord) -> Result<()>,
    ) -> Result<RunSummary>;
}
