//! Corpus file detection and document file name grammar

use crate::error::{NormalizerError, Result};
use std::path::Path;

/// Case-sensitive suffix check: `"doc.a.naf"` has extension `"naf"`, `"doc.a.NAF"` does not.
pub fn has_extension(file_name: &str, extension: &str) -> bool {
    file_name
        .strip_suffix(extension)
        .is_some_and(|stem| stem.ends_with('.'))
}

pub fn is_corpus_file(path: &Path, extension: &str) -> bool {
    path.is_file()
        && path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| has_extension(name, extension))
}

/// Document name encoded in a corpus file name.
///
/// Grammar: `<prefix>.<name>[.<qualifier>...].<ext>`. The name is the second
/// dot-delimited segment, so at least three segments are required and the
/// name segment must not be empty.
pub fn document_name(file_name: &str) -> Result<&str> {
    let segments: Vec<&str> = file_name.split('.').collect();

    if segments.len() < 3 {
        return Err(NormalizerError::InvalidFileName {
            name: file_name.to_string(),
            reason: "expected <prefix>.<name>.<ext>".to_string(),
        });
    }

    let name = segments[1];
    if name.is_empty() {
        return Err(NormalizerError::InvalidFileName {
            name: file_name.to_string(),
            reason: "empty name segment".to_string(),
        });
    }

    Ok(name)
}
