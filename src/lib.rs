//! Corpus normalizer library

pub mod cli;
pub mod config;
pub mod error;
pub mod extraction;
pub mod input;
pub mod output;
pub mod pipeline;
pub mod processing;

pub use config::Config;
pub use error::{NormalizerError, Result};
pub use processing::{Document, LinguisticResources, TextProcessor};
