//! Raw text extraction from corpus files

use crate::config::FallbackEncoding;
use crate::error::{NormalizerError, Result};
use crate::input::decoding::{decode_bytes, decode_latin1, declared_encoding};
use roxmltree::ParsingOptions;
use std::fs;
use std::path::Path;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> Result<String>;
}

/// Pulls the text of the first `raw_element` out of a NAF (XML) document.
pub struct NafExtractor {
    raw_element: String,
}

impl NafExtractor {
    pub fn new(raw_element: impl Into<String>) -> Self {
        Self {
            raw_element: raw_element.into(),
        }
    }

    pub fn extract_from_str(&self, path: &Path, markup: &str) -> Result<String> {
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };

        let tree = roxmltree::Document::parse_with_options(markup, options).map_err(|e| {
            NormalizerError::MarkupParse {
                path: path.to_path_buf(),
                source: e,
            }
        })?;

        let raw = tree
            .descendants()
            .find(|node| node.is_element() && node.has_tag_name(self.raw_element.as_str()))
            .ok_or_else(|| NormalizerError::MissingRawText {
                path: path.to_path_buf(),
                element: self.raw_element.clone(),
            })?;

        Ok(raw.text().unwrap_or_default().to_string())
    }
}

impl TextExtractor for NafExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path)?;
        let markup = decode_markup(path, bytes)?;
        self.extract_from_str(path, &markup)
    }
}

/// Decode markup in the encoding its XML declaration names, UTF-8 when it
/// names none. A non-UTF-8 declaration is dropped once the text is decoded.
fn decode_markup(path: &Path, bytes: Vec<u8>) -> Result<String> {
    match declared_encoding(&bytes).as_deref() {
        None | Some("utf-8") | Some("utf8") => {
            Ok(decode_bytes(&path.to_string_lossy(), bytes, FallbackEncoding::None)?.text)
        }
        Some("iso-8859-1") | Some("iso8859-1") | Some("latin-1") | Some("latin1")
        | Some("us-ascii") | Some("ascii") => Ok(strip_declaration(&decode_latin1(&bytes))),
        Some(other) => Err(NormalizerError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding: other.to_string(),
        }),
    }
}

fn strip_declaration(markup: &str) -> String {
    let trimmed = markup.trim_start();
    match trimmed.strip_prefix("<?xml").and_then(|rest| rest.find("?>").map(|end| &rest[end + 2..])) {
        Some(rest) => rest.to_string(),
        None => markup.to_string(),
    }
}

pub struct PlainTextExtractor {
    fallback: FallbackEncoding,
}

impl PlainTextExtractor {
    pub fn new(fallback: FallbackEncoding) -> Self {
        Self { fallback }
    }
}

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path)?;
        let decoded = decode_bytes(&path.to_string_lossy(), bytes, self.fallback)?;
        Ok(decoded.text)
    }
}
