//! Text normalization: tokenization, token cleanup, stemming and documents

pub mod document;
pub mod resources;
pub mod text_processor;
pub mod tokenizer;

pub use document::Document;
pub use resources::LinguisticResources;
pub use text_processor::TextProcessor;
