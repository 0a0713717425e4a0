//! Blog Authorship Corpus (BAC) date/post extraction

use crate::config::{ErrorPolicy, FallbackEncoding, PairingPolicy};
use crate::error::{NormalizerError, Result};
use crate::extraction::{ExtractedRecord, RecordSource, RunSummary};
use crate::input::decoding::decode_bytes;
use indicatif::ProgressBar;
use log::{debug, info, warn};
use regex::Regex;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

/// Link placeholder left in posts by the corpus scraper.
const BOILERPLATE_MARKER: &str = "urlLink";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogPost {
    pub date: String,
    pub post: String,
}

impl BlogPost {
    pub fn to_line(&self) -> String {
        format!("{} - {}", self.date, self.post)
    }
}

pub struct BacExtractor {
    date_regex: Regex,
    post_regex: Regex,
    whitespace_regex: Regex,
    pairing: PairingPolicy,
}

impl BacExtractor {
    pub fn new(pairing: PairingPolicy) -> Result<Self> {
        Ok(Self {
            date_regex: Regex::new(r"(?s)<date>(.*?)</date>")?,
            post_regex: Regex::new(r"(?s)<post>(.*?)</post>")?,
            whitespace_regex: Regex::new(r"\s+")?,
            pairing,
        })
    }

    /// Pair the Nth `<date>` with the Nth `<post>` of `content`.
    ///
    /// Under `PairingPolicy::Strict` differing counts are a `CountMismatch`;
    /// under `PairingPolicy::Truncate` the surplus entries are dropped.
    pub fn extract(&self, entry: &str, content: &str) -> Result<Vec<BlogPost>> {
        let dates: Vec<&str> = self
            .date_regex
            .captures_iter(content)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .collect();

        let posts: Vec<String> = self
            .post_regex
            .captures_iter(content)
            .filter_map(|caps| caps.get(1))
            .map(|m| self.clean_post(m.as_str()))
            .collect();

        if dates.len() != posts.len() {
            match self.pairing {
                PairingPolicy::Strict => {
                    return Err(NormalizerError::CountMismatch {
                        entry: entry.to_string(),
                        dates: dates.len(),
                        posts: posts.len(),
                    })
                }
                PairingPolicy::Truncate => warn!(
                    "'{}' has {} dates and {} posts, keeping {} pairs",
                    entry,
                    dates.len(),
                    posts.len(),
                    dates.len().min(posts.len())
                ),
            }
        }

        Ok(dates
            .into_iter()
            .zip(posts)
            .map(|(date, post)| BlogPost {
                date: date.to_string(),
                post,
            })
            .collect())
    }

    fn clean_post(&self, raw: &str) -> String {
        self.whitespace_regex
            .replace_all(raw, " ")
            .trim()
            .replace(BOILERPLATE_MARKER, "")
            .replace("  ", " ")
    }
}

/// A zip archive of BAC blog files.
pub struct BacArchive {
    path: PathBuf,
    extractor: BacExtractor,
    fallback: FallbackEncoding,
    policy: ErrorPolicy,
    progress: ProgressBar,
}

impl BacArchive {
    pub fn new(
        path: impl Into<PathBuf>,
        pairing: PairingPolicy,
        fallback: FallbackEncoding,
    ) -> Result<Self> {
        Ok(Self {
            path: path.into(),
            extractor: BacExtractor::new(pairing)?,
            fallback,
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

    fn read_entry(&self, entry: &str, file: &mut impl Read) -> Result<Vec<BlogPost>> {
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;

        let decoded = decode_bytes(entry, bytes, self.fallback)?;
        self.extractor.extract(entry, &decoded.text)
    }
}

impl RecordSource for BacArchive {
    fn describe(&self) -> String {
        format!("blog archive {}", self.path.display())
    }

    fn for_each_record(
        &self,
        sink: &mut dyn FnMut(ExtractedRecord) -> Result<()>,
    ) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        let mut archive = zip::ZipArchive::new(File::open(&self.path)?)?;

        for index in 0..archive.len() {
            let mut file = archive.by_index(index)?;
            if file.is_dir() {
                continue;
            }

            let entry = file.name().to_string();
            self.progress.set_message(entry.clone());
            summary.sources += 1;

            let posts = match self.read_entry(&entry, &mut file) {
                Ok(posts) => posts,
                Err(e) if self.policy == ErrorPolicy::Skip && e.is_per_source() => {
                    warn!("Skipping {}: {}", entry, e);
                    summary.skipped.push(entry);
                    continue;
                }
                Err(e) => return Err(e),
            };

            debug!("{}: {} posts", entry, posts.len());
            for (n, post) in posts.into_iter().enumerate() {
                sink(ExtractedRecord {
                    name: format!("{}#{}", entry, n),
                    label: Some(post.date),
                    text: post.post,
                })?;
                summary.records += 1;
            }
            self.progress.inc(1);
        }

        info!(
            "Extracted {} posts from {} entries of {} ({} skipped)",
            summary.records,
            summary.sources,
            self.path.display(),
            summary.skipped.len()
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor(pairing: PairingPolicy) -> BacExtractor {
        BacExtractor::new(pairing).unwrap()
    }

    #[test]
    fn test_single_pair() {
        let posts = extractor(PairingPolicy::Strict)
            .extract("b.xml", "<date>2004-01-01</date><post> Hello urlLink world </post>")
            .unwrap();
        assert_eq!(
            posts,
            vec![BlogPost {
                date: "2004-01-01".to_string(),
                post: "Hello world".to_string(),
            }]
        );
        assert_eq!(posts[0].to_line(), "2004-01-01 - Hello world");
    }

    #[test]
    fn test_multiline_posts_are_flattened() {
        let content = "<Blog>\n<date>01,May,2004</date>\n<post>\n\n  First\tpost\n  spans lines.\n</post>\n<date>02,May,2004</date>\n<post>Second</post>\n</Blog>";
        let posts = extractor(PairingPolicy::Strict).extract("b.xml", content).unwrap();

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].post, "First post spans lines.");
        assert_eq!(posts[1].date, "02,May,2004");
        assert_eq!(posts[1].post, "Second");
    }

    #[test]
    fn test_no_elements() {
        let posts = extractor(PairingPolicy::Strict).extract("b.xml", "plain text").unwrap();
        assert!(posts.is_empty());
    }

    #[test]
    fn test_count_mismatch_strict() {
        let content = "<date>d1</date><date>d2</date><post>only one</post>";
        let result = extractor(PairingPolicy::Strict).extract("b.xml", content);
        match result {
            Err(NormalizerError::CountMismatch { entry, dates, posts }) => {
                assert_eq!(entry, "b.xml");
                assert_eq!(dates, 2);
                assert_eq!(posts, 1);
            }
            other => panic!("expected a count mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_count_mismatch_truncate() {
        let content = "<date>d1</date><date>d2</date><post>only one</post>";
        let posts = extractor(PairingPolicy::Truncate).extract("b.xml", content).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].date, "d1");
    }
}
