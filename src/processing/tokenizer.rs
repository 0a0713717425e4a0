//! Word-level tokenization
//!
//! Splits on Unicode word boundaries, keeps punctuation as separate tokens and
//! splits English contractions the way Penn Treebank tokenizers do, so
//! `"don't stop!"` becomes `["do", "n't", "stop", "!"]`. Intra-word hyphens do
//! not split: `"well-known"` stays one token.

use crate::error::Result;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

/// Words the Treebank convention splits even without an apostrophe.
const FUSED_WORDS: &[(&str, usize)] = &[
    ("cannot", 3),
    ("gimme", 3),
    ("gonna", 3),
    ("gotta", 3),
    ("lemme", 3),
    ("wanna", 3),
];

pub struct WordTokenizer {
    contraction_regex: Regex,
}

impl WordTokenizer {
    pub fn new() -> Result<Self> {
        let contraction_regex = Regex::new(r"(?i)^(.+?)(n['’]t|['’](?:s|re|ve|ll|d|m))$")?;
        Ok(Self { contraction_regex })
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let segments: Vec<&str> = text.split_word_bounds().collect();
        let mut tokens = Vec::new();
        let mut i = 0;

        while i < segments.len() {
            if segments[i].trim().is_empty() {
                i += 1;
                continue;
            }

            let mut word = segments[i].to_string();
            while i + 2 < segments.len()
                && is_word(segments[i])
                && segments[i + 1] == "-"
                && is_word(segments[i + 2])
            {
                word.push('-');
                word.push_str(segments[i + 2]);
                i += 2;
            }

            self.split_contraction(&word, &mut tokens);
            i += 1;
        }

        tokens
    }

    fn split_contraction(&self, word: &str, tokens: &mut Vec<String>) {
        if let Some(caps) = self.contraction_regex.captures(word) {
            tokens.push(caps[1].to_string());
            tokens.push(caps[2].to_string());
            return;
        }

        let lower = word.to_lowercase();
        for &(fused, split_at) in FUSED_WORDS {
            if lower == fused && word.is_char_boundary(split_at) {
                let (head, tail) = word.split_at(split_at);
                tokens.push(head.to_string());
                tokens.push(tail.to_string());
                return;
            }
        }

        tokens.push(word.to_string());
    }
}

fn is_word(segment: &str) -> bool {
    segment.chars().any(char::is_alphanumeric)
}
