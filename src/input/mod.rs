//! Input processing module
//! Handles corpus file detection, decoding, raw text extraction and loading

pub mod decoding;
pub mod file_detector;
pub mod loader;
pub mod text_extractor;

pub use loader::CorpusLoader;
