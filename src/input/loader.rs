//! Corpus loader: a directory of NAF files into normalized documents

use crate::config::{CorpusConfig, ErrorPolicy};
use crate::error::{NormalizerError, Result};
use crate::input::file_detector::{document_name, is_corpus_file};
use crate::input::text_extractor::{NafExtractor, TextExtractor};
use crate::processing::{Document, TextProcessor};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

pub struct CorpusLoader<'a> {
    processor: &'a TextProcessor,
    extractor: NafExtractor,
    extension: String,
    policy: ErrorPolicy,
    skipped: Vec<PathBuf>,
}

impl<'a> CorpusLoader<'a> {
    pub fn new(processor: &'a TextProcessor, config: &CorpusConfig) -> Self {
        Self {
            processor,
            extractor: NafExtractor::new(config.raw_element.clone()),
            extension: config.extension.clone(),
            policy: ErrorPolicy::Abort,
            skipped: Vec::new(),
        }
    }

    pub fn with_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Load every corpus file in `dir`, in directory listing order.
    ///
    /// With `ErrorPolicy::Abort` the first bad file fails the whole load; with
    /// `ErrorPolicy::Skip` it is logged and recorded in `skipped()`.
    pub fn load_docs(&mut self, dir: &Path) -> Result<Vec<Document>> {
        if !dir.is_dir() {
            return Err(NormalizerError::InvalidInput(format!(
                "Not a directory: {}",
                dir.display()
            )));
        }

        self.skipped.clear();
        let mut documents = Vec::new();

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if !is_corpus_file(&path, &self.extension) {
                continue;
            }

            match self.load_document(&path) {
                Ok(document) => {
                    debug!("Loaded {} ({} tokens)", document, document.len());
                    documents.push(document);
                }
                Err(e) if self.policy == ErrorPolicy::Skip && e.is_per_source() => {
                    warn!("Skipping {}: {}", path.display(), e);
                    self.skipped.push(path);
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            "Loaded {} documents from {} ({} skipped)",
            documents.len(),
            dir.display(),
            self.skipped.len()
        );
        Ok(documents)
    }

    pub fn load_document(&self, path: &Path) -> Result<Document> {
        let file_name = path.file_name().and_then(|n| n.to_str()).ok_or_else(|| {
            NormalizerError::InvalidFileName {
                name: path.to_string_lossy().to_string(),
                reason: "not valid UTF-8".to_string(),
            }
        })?;
        let name = document_name(file_name)?;
        let raw_text = self.extractor.extract(path)?;

        Ok(Document::named(raw_text, name, self.processor))
    }

    pub fn skipped(&self) -> &[PathBuf] {
        &self.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_naf(dir: &Path, file_name: &str, raw: &str) {
        let markup = format!("<NAF><raw>{}</raw></NAF>", raw);
        fs::write(dir.join(file_name), markup).unwrap();
    }

    #[test]
    fn test_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let processor = TextProcessor::english().unwrap();
        let mut loader = CorpusLoader::new(&processor, &CorpusConfig::default());

        let docs = loader.load_docs(temp_dir.path()).unwrap();
        assert!(docs.is_empty());
    }

    #[test]
    fn test_only_matching_files_are_loaded() {
        let temp_dir = TempDir::new().unwrap();
        write_naf(temp_dir.path(), "wes.d001.naf", "Cats run");
        write_naf(temp_dir.path(), "wes.d002.NAF", "Dogs run");
        fs::write(temp_dir.path().join("notes.txt"), "ignored").unwrap();

        let processor = TextProcessor::english().unwrap();
        let mut loader = CorpusLoader::new(&processor, &CorpusConfig::default());
        let docs = loader.load_docs(temp_dir.path()).unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].name(), "d001");
        assert_eq!(docs[0].tokens(), ["cat", "run"]);
    }

    #[test]
    fn test_bad_file_aborts_by_default() {
        let temp_dir = TempDir::new().unwrap();
        write_naf(temp_dir.path(), "wes.d001.naf", "Cats run");
        fs::write(temp_dir.path().join("wes.d002.naf"), "<NAF><raw>").unwrap();

        let processor = TextProcessor::english().unwrap();
        let mut loader = CorpusLoader::new(&processor, &CorpusConfig::default());
        let result = loader.load_docs(temp_dir.path());
        assert!(matches!(result, Err(NormalizerError::MarkupParse { .. })));
    }

    #[test]
    fn test_skip_policy_collects_bad_files() {
        let temp_dir = TempDir::new().unwrap();
        write_naf(temp_dir.path(), "wes.d001.naf", "Cats run");
        fs::write(temp_dir.path().join("wes.d002.naf"), "<NAF><text/></NAF>").unwrap();
        write_naf(temp_dir.path(), "short.naf", "No name segment");

        let processor = TextProcessor::english().unwrap();
        let mut loader =
            CorpusLoader::new(&processor, &CorpusConfig::default()).with_policy(ErrorPolicy::Skip);
        let docs = loader.load_docs(temp_dir.path()).unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(loader.skipped().len(), 2);
    }

    #[test]
    fn test_not_a_directory() {
        let processor = TextProcessor::english().unwrap();
        let mut loader = CorpusLoader::new(&processor, &CorpusConfig::default());
        let result = loader.load_docs(Path::new("/definitely/not/here"));
        assert!(matches!(result, Err(NormalizerError::InvalidInput(_))));
    }
}
