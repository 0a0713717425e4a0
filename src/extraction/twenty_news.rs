//! 20 Newsgroups message cleaning

use crate::config::{ErrorPolicy, FallbackEncoding};
use crate::error::Result;
use crate::extraction::rules::RuleSet;
use crate::extraction::{ExtractedRecord, RecordSource, RunSummary};
use crate::input::text_extractor::{PlainTextExtractor, TextExtractor};
use indicatif::ProgressBar;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Header, address, quoting and separator noise, removed in this order.
const TWENTY_NEWS_RULES: &[(&str, &str)] = &[
    ("from_header", r"(?m)^From:.*?\n"),
    ("subject_header", r"(?m)^Subject:.*?\n"),
    ("archive_name_header", r"(?m)^Archive-name:.*?\n"),
    ("alt_atheism_archive_name_header", r"(?m)^Alt-atheism-archive-name:.*?\n"),
    ("last_modified_header", r"(?m)^Last-modified:.*?\n"),
    ("version_header", r"(?m)^Version:.*?\n"),
    ("address_line", r"(?m)^.*@.*?\n"),
    ("reply_lead_in", r"In\sarticle.*?writes:\n"),
    ("dash_separator", r"(?m)^-+$"),
    ("equals_separator", r"(?m)^=+$"),
    ("quote_marker", r"(?m)^>+"),
    ("non_text_char", r"[^a-zA-Z0-9\s.,]"),
];

pub struct TwentyNewsExtractor {
    rules: RuleSet,
}

impl TwentyNewsExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            rules: RuleSet::removals(TWENTY_NEWS_RULES)?,
        })
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Strip message noise and flatten the result onto one line.
    pub fn clean(&self, text: &str) -> String {
        flatten(&self.rules.apply(text))
    }
}

/// Line breaks and tabs become spaces, then two fixed collapsing passes.
/// Longer runs of spaces are only partially collapsed.
fn flatten(text: &str) -> String {
    text.replace('\n', " ")
        .replace('\t', " ")
        .replace('\r', " ")
        .replace("  ", " ")
        .replace("   ", " ")
}

/// A `<root>/<category>/<message>` tree of newsgroup messages.
pub struct TwentyNewsCorpus {
    root: PathBuf,
    extractor: TwentyNewsExtractor,
    reader: PlainTextExtractor,
    policy: ErrorPolicy,
    progress: ProgressBar,
}

impl TwentyNewsCorpus {
    pub fn new(root: impl Into<PathBuf>, fallback: FallbackEncoding) -> Result<Self> {
        Ok(Self {
            root: root.into(),
            extractor: TwentyNewsExtractor::new()?,
            reader: PlainTextExtractor::new(fallback),
            policy: ErrorPolicy::Abort,
            progress: ProgressBar::hidden(),
        })
    }

    pub fn with_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    fn record_name(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl RecordSource for TwentyNewsCorpus {
    fn describe(&self) -> String {
        format!("newsgroup tree {}", self.root.display())
    }

    fn for_each_record(
        &self,
        sink: &mut dyn FnMut(ExtractedRecord) -> Result<()>,
    ) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        let walker = WalkDir::new(&self.root)
            .min_depth(2)
            .max_depth(2)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let name = self.record_name(entry.path());
            self.progress.set_message(name.clone());
            summary.sources += 1;

            let text = match self.reader.extract(entry.path()) {
                Ok(text) => text,
                Err(e) if self.policy == ErrorPolicy::Skip && e.is_per_source() => {
                    warn!("Skipping {}: {}", name, e);
                    summary.skipped.push(name);
                    continue;
                }
                Err(e) => return Err(e),
            };

            debug!("Cleaning {}", name);
            sink(ExtractedRecord {
                name,
                label: None,
                text: self.extractor.clean(&text),
            })?;
            summary.records += 1;
            self.progress.inc(1);
        }

        info!(
            "Cleaned {} messages from {} ({} skipped)",
            summary.records,
            self.root.display(),
            summary.skipped.len()
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean(text: &str) -> String {
        TwentyNewsExtractor::new().unwrap().clean(text)
    }

    #[test]
    fn test_headers_and_addresses_are_removed() {
        assert_eq!(clean("From: a@b.com\nSubject: test\nHello world!\n"), "Hello world ");
    }

    #[test]
    fn test_archive_headers() {
        let text = "Archive-name: atheism/intro\nAlt-atheism-archive-name: intro\nLast-modified: 5 April 1993\nVersion: 1.1\nBody text.\n";
        assert_eq!(clean(text), "Body text. ");
    }

    #[test]
    fn test_quoted_reply() {
        let text = "In article <1993Apr5.123@foo.edu> john@foo.edu writes:\n> quoted line\nMy reply, here.\n";
        assert_eq!(clean(text), " quoted line My reply, here. ");
    }

    #[test]
    fn test_reply_lead_in_without_address() {
        assert_eq!(clean("In article 12345 somebody writes:\nBody\n"), "Body ");
    }

    #[test]
    fn test_separators_and_symbols() {
        // three line breaks collapse to two spaces, not one
        assert_eq!(clean("Intro\n-----\n=====\nBody (really) 100%\n"), "Intro  Body really 100 ");
    }

    #[test]
    fn test_tabs_and_carriage_returns() {
        assert_eq!(clean("a\tb\r\nc"), "a b c");
    }

    #[test]
    fn test_rule_order_is_exposed() {
        let extractor = TwentyNewsExtractor::new().unwrap();
        let names: Vec<&str> = extractor.rules().rules().iter().map(|r| r.name()).collect();
        assert_eq!(names.first(), Some(&"from_header"));
        assert_eq!(names.last(), Some(&"non_text_char"));
        assert!(extractor.rules().rule("address_line").unwrap().is_match("x@y\n"));
    }
}
