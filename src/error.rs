//! Error handling for the corpus normalizer

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NormalizerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Linguistic resource error: {0}")]
    Resource(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Malformed markup in '{}': {source}", path.display())]
    MarkupParse {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    #[error("No <{element}> element in '{}'", path.display())]
    MissingRawText { path: PathBuf, element: String },

    #[error("Invalid document file name '{name}': {reason}")]
    InvalidFileName { name: String, reason: String },

    #[error("Could not decode '{entry}': {source}")]
    Decode {
        entry: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("'{}' declares unsupported encoding '{encoding}'", path.display())]
    UnsupportedEncoding { path: PathBuf, encoding: String },

    #[error("'{entry}' has {dates} <date> elements but {posts} <post> elements")]
    CountMismatch {
        entry: String,
        dates: usize,
        posts: usize,
    },

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Directory traversal error: {0}")]
    Traversal(#[from] walkdir::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl NormalizerError {
    /// Errors tied to a single input file or archive entry. These are the ones
    /// `ErrorPolicy::Skip` is allowed to swallow.
    pub fn is_per_source(&self) -> bool {
        matches!(
            self,
            NormalizerError::Io(_)
                | NormalizerError::MarkupParse { .. }
                | NormalizerError::MissingRawText { .. }
                | NormalizerError::InvalidFileName { .. }
                | NormalizerError::Decode { .. }
                | NormalizerError::UnsupportedEncoding { .. }
                | NormalizerError::CountMismatch { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, NormalizerError>;
