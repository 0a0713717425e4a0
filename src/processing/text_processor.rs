//! Token and text normalization

use crate::error::Result;
use crate::processing::resources::{LinguisticResources, Stemming};
use crate::processing::tokenizer::WordTokenizer;
use regex::Regex;
use rust_stemmers::Stemmer;

enum TokenStemmer {
    Porter,
    Snowball(Stemmer),
}

impl TokenStemmer {
    fn new(stemming: Stemming) -> Self {
        match stemming {
            Stemming::Porter => TokenStemmer::Porter,
            Stemming::Snowball(algorithm) => TokenStemmer::Snowball(Stemmer::create(algorithm)),
        }
    }

    fn stem(&self, token: &str) -> String {
        match self {
            TokenStemmer::Porter => porter_stemmer::stem(token),
            TokenStemmer::Snowball(stemmer) => stemmer.stem(token).into_owned(),
        }
    }
}

/// Turns raw text into the normalized token stream stored in a `Document`.
///
/// The processor owns the read-only linguistic resources, so one instance is
/// built at startup and shared by reference for the rest of the run.
pub struct TextProcessor {
    resources: LinguisticResources,
    tokenizer: WordTokenizer,
    stemmer: TokenStemmer,
    non_word_regex: Regex,
    isolated_letter_regex: Regex,
    leading_letter_regex: Regex,
    digit_regex: Regex,
}

impl TextProcessor {
    pub fn new(resources: LinguisticResources) -> Result<Self> {
        let stemmer = TokenStemmer::new(resources.stemming());

        Ok(Self {
            resources,
            tokenizer: WordTokenizer::new()?,
            stemmer,
            non_word_regex: Regex::new(r"\W")?,
            isolated_letter_regex: Regex::new(r"\s+[a-zA-Z]\s+")?,
            leading_letter_regex: Regex::new(r"^[a-zA-Z]\s+")?,
            digit_regex: Regex::new(r"\d+")?,
        })
    }

    pub fn english() -> Result<Self> {
        Self::new(LinguisticResources::english())
    }

    /// Normalize an already tokenized sequence.
    ///
    /// Lowercase, drop stopwords, strip non-word characters, isolated and
    /// leading single letters and digits, drop what became empty, then stem.
    /// Relative order of surviving tokens is preserved.
    pub fn process_tokens<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<String> {
        tokens
            .iter()
            .map(|token| token.as_ref().to_lowercase())
            .filter(|token| !self.resources.is_stop_word(token))
            .map(|token| self.strip_token(&token))
            .filter(|token| !token.is_empty())
            .map(|token| self.stemmer.stem(&token))
            .collect()
    }

    /// Tokenize raw text, then normalize the tokens.
    pub fn process_text(&self, text: &str) -> Vec<String> {
        let tokens = self.tokenizer.tokenize(text);
        self.process_tokens(&tokens)
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.tokenizer.tokenize(text)
    }

    fn strip_token(&self, token: &str) -> String {
        let token = self.non_word_regex.replace_all(token, "");
        let token = self.isolated_letter_regex.replace_all(&token, "");
        let token = self.leading_letter_regex.replace_all(&token, "");
        self.digit_regex.replace_all(&token, "").into_owned()
    }
}
