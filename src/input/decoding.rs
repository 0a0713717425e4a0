//! Two-stage text decoding: UTF-8 first, then the configured fallback

use crate::config::FallbackEncoding;
use crate::error::{NormalizerError, Result};
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Latin1,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
    pub encoding: TextEncoding,
}

/// Decode `bytes` read from `entry`. The fallback works on the same bytes; the
/// source is never read twice. Latin-1 maps every byte, so only
/// `FallbackEncoding::None` can fail.
pub fn decode_bytes(entry: &str, bytes: Vec<u8>, fallback: FallbackEncoding) -> Result<DecodedText> {
    match String::from_utf8(bytes) {
        Ok(text) => Ok(DecodedText {
            text,
            encoding: TextEncoding::Utf8,
        }),
        Err(err) => match fallback {
            FallbackEncoding::Latin1 => {
                debug!("'{}' is not valid UTF-8, decoding as Latin-1", entry);
                Ok(DecodedText {
                    text: decode_latin1(err.as_bytes()),
                    encoding: TextEncoding::Latin1,
                })
            }
            FallbackEncoding::None => Err(NormalizerError::Decode {
                entry: entry.to_string(),
                source: err,
            }),
        },
    }
}

/// Every byte maps to the code point of the same value.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Encoding named in an XML declaration (`<?xml ... encoding="..."?>`),
/// lowercased. `None` when there is no declaration or it names no encoding.
pub fn declared_encoding(bytes: &[u8]) -> Option<String> {
    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(256)]);
    let declaration = head
        .trim_start_matches('\u{feff}')
        .trim_start()
        .strip_prefix("<?xml")?;
    let declaration = &declaration[..declaration.find("?>")?];

    let value = &declaration[declaration.find("encoding")? + "encoding".len()..];
    let value = value.trim_start().strip_prefix('=')?.trim_start();
    let quote = value.chars().next().filter(|&c| c == '"' || c == '\'')?;
    let value = &value[1..];

    Some(value[..value.find(quote)?].trim().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_first() {
        let decoded = decode_bytes("a.txt", "café".as_bytes().to_vec(), FallbackEncoding::Latin1).unwrap();
        assert_eq!(decoded.text, "café");
        assert_eq!(decoded.encoding, TextEncoding::Utf8);
    }

    #[test]
    fn test_latin1_fallback_uses_same_bytes() {
        let bytes = vec![b'c', b'a', b'f', 0xE9];
        let decoded = decode_bytes("a.txt", bytes, FallbackEncoding::Latin1).unwrap();
        assert_eq!(decoded.text, "café");
        assert_eq!(decoded.encoding, TextEncoding::Latin1);
    }

    #[test]
    fn test_declared_encoding() {
        assert_eq!(
            declared_encoding(b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\n<NAF/>").as_deref(),
            Some("iso-8859-1")
        );
        assert_eq!(
            declared_encoding(b"\xef\xbb\xbf<?xml version='1.0' encoding = 'utf-8' ?><NAF/>").as_deref(),
            Some("utf-8")
        );
        assert_eq!(declared_encoding(b"<?xml version=\"1.0\"?><NAF/>"), None);
        assert_eq!(declared_encoding(b"<NAF encoding=\"latin1\"/>"), None);
    }

    #[test]
    fn test_no_fallback_names_entry() {
        let err = decode_bytes("blogs/1.xml", vec![0xFF, 0xFE], FallbackEncoding::None).unwrap_err();
        match err {
            NormalizerError::Decode { entry, .. } => assert_eq!(entry, "blogs/1.xml"),
            other => panic!("unexpected error: {}", other),
        }
    }
}
