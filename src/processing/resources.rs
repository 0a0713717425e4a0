//! Linguistic resources shared by the normalization pipeline
//!
//! The stopword set and stemming algorithm are loaded once, before any text is
//! processed, and are read-only afterwards. A missing or unsupported resource
//! is a startup failure, never a per-document one.

use crate::config::NormalizationConfig;
use crate::error::{NormalizerError, Result};
use log::{debug, info};
use rust_stemmers::Algorithm;
use std::collections::HashSet;
use std::path::Path;

const ENGLISH_STOPWORDS: &str = include_str!("../../resources/stopwords/english.txt");

/// Suffix-stripping algorithm applied to every surviving token.
#[derive(Debug, Clone, Copy)]
pub enum Stemming {
    /// Martin Porter's original algorithm, used for English.
    Porter,
    /// A Snowball stemmer for the other supported languages.
    Snowball(Algorithm),
}

#[derive(Debug, Clone)]
pub struct LinguisticResources {
    stop_words: HashSet<String>,
    stemming: Stemming,
}

impl LinguisticResources {
    /// Bundled English stopword list with the Porter stemmer.
    pub fn english() -> Self {
        Self {
            stop_words: parse_stop_words(ENGLISH_STOPWORDS),
            stemming: Stemming::Porter,
        }
    }

    pub fn load(config: &NormalizationConfig) -> Result<Self> {
        let stemming = stemming_for(&config.language)?;

        let stop_words = match &config.stopwords_path {
            Some(path) => load_stop_words(path)?,
            None if matches!(stemming, Stemming::Porter) => parse_stop_words(ENGLISH_STOPWORDS),
            None => {
                return Err(NormalizerError::Resource(format!(
                    "No bundled stopword list for '{}'; set normalization.stopwords_path",
                    config.language
                )))
            }
        };

        info!(
            "Loaded {} stopwords for language '{}'",
            stop_words.len(),
            config.language
        );

        Ok(Self {
            stop_words,
            stemming,
        })
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    pub fn stop_word_count(&self) -> usize {
        self.stop_words.len()
    }

    pub fn stemming(&self) -> Stemming {
        self.stemming
    }
}

impl Default for LinguisticResources {
    fn default() -> Self {
        Self::english()
    }
}

pub fn load_stop_words(path: &Path) -> Result<HashSet<String>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        NormalizerError::Resource(format!(
            "Failed to read stopword list '{}': {}",
            path.display(),
            e
        ))
    })?;

    let stop_words = parse_stop_words(&content);
    if stop_words.is_empty() {
        return Err(NormalizerError::Resource(format!(
            "Stopword list '{}' is empty",
            path.display()
        )));
    }

    debug!("Read stopword list from {}", path.display());
    Ok(stop_words)
}

fn parse_stop_words(content: &str) -> HashSet<String> {
    content
        .lines()
        .map(|line| line.trim().to_lowercase())
        .filter(|line| !line.is_empty())
        .collect()
}

fn stemming_for(language: &str) -> Result<Stemming> {
    let algorithm = match language.to_lowercase().as_str() {
        "english" => return Ok(Stemming::Porter),
        "arabic" => Algorithm::Arabic,
        "danish" => Algorithm::Danish,
        "dutch" => Algorithm::Dutch,
        "finnish" => Algorithm::Finnish,
        "french" => Algorithm::French,
        "german" => Algorithm::German,
        "greek" => Algorithm::Greek,
        "hungarian" => Algorithm::Hungarian,
        "italian" => Algorithm::Italian,
        "norwegian" => Algorithm::Norwegian,
        "portuguese" => Algorithm::Portuguese,
        "romanian" => Algorithm::Romanian,
        "russian" => Algorithm::Russian,
        "spanish" => Algorithm::Spanish,
        "swedish" => Algorithm::Swedish,
        "tamil" => Algorithm::Tamil,
        "turkish" => Algorithm::Turkish,
        other => {
            return Err(NormalizerError::Resource(format!(
                "No stemmer available for language '{}'",
                other
            )))
        }
    };
    Ok(Stemming::Snowball(algorithm))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_bundled_english_list() {
        let resources = LinguisticResources::english();
        assert_eq!(resources.stop_word_count(), 179);
        assert!(resources.is_stop_word("the"));
        assert!(resources.is_stop_word("don't"));
        assert!(!resources.is_stop_word("cat"));
        assert!(matches!(resources.stemming(), Stemming::Porter));
    }

    #[test]
    fn test_load_custom_list() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "  El \n\nla\nLOS").unwrap();

        let config = NormalizationConfig {
            language: "spanish".to_string(),
            stopwords_path: Some(file.path().to_path_buf()),
        };
        let resources = LinguisticResources::load(&config).unwrap();

        assert_eq!(resources.stop_word_count(), 3);
        assert!(resources.is_stop_word("el"));
        assert!(resources.is_stop_word("los"));
        assert!(matches!(
            resources.stemming(),
            Stemming::Snowball(Algorithm::Spanish)
        ));
    }

    #[test]
    fn test_missing_list_is_resource_error() {
        let config = NormalizationConfig {
            language: "english".to_string(),
            stopwords_path: Some("/definitely/not/here.txt".into()),
        };
        let result = LinguisticResources::load(&config);
        assert!(matches!(result, Err(NormalizerError::Resource(_))));
    }

    #[test]
    fn test_non_english_requires_list() {
        let config = NormalizationConfig {
            language: "french".to_string(),
            stopwords_path: None,
        };
        assert!(matches!(
            LinguisticResources::load(&config),
            Err(NormalizerError::Resource(_))
        ));
    }

    #[test]
    fn test_unknown_language() {
        let config = NormalizationConfig {
            language: "klingon".to_string(),
            stopwords_path: None,
        };
        assert!(matches!(
            LinguisticResources::load(&config),
            Err(NormalizerError::Resource(_))
        ));
    }
}
