//! Rendering of normalized documents for the terminal or downstream tools

use crate::config::{OutputConfig, OutputFormat};
use crate::error::Result;
use crate::processing::Document;
use colored::Colorize;

/// Trait for rendering a collection of documents
pub trait OutputFormatter {
    fn format_documents(&self, documents: &[Document]) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Per-document summary with the most frequent terms
pub struct ConsoleFormatter {
    use_colors: bool,
    top_terms: usize,
}

/// One JSON object per line: name, tokens and term counts
pub struct JsonFormatter {
    pretty: bool,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, top_terms: usize) -> Self {
        Self {
            use_colors,
            top_terms,
        }
    }

    fn heading(&self, text: &str) -> String {
        if self.use_colors {
            text.bold().cyan().to_string()
        } else {
            text.to_string()
        }
    }

    fn term(&self, term: &str) -> String {
        if self.use_colors {
            term.green().to_string()
        } else {
            term.to_string()
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_documents(&self, documents: &[Document]) -> Result<String> {
        let mut out = String::new();
        let total_tokens: usize = documents.iter().map(Document::len).sum();

        out.push_str(&self.heading(&format!(
            "{} documents, {} tokens",
            documents.len(),
            total_tokens
        )));
        out.push('\n');

        for document in documents {
            out.push_str(&format!(
                "\n{}  ({} tokens, {} distinct terms)\n",
                self.heading(document.name()),
                document.len(),
                document.term_counts().len()
            ));

            let terms: Vec<String> = document
                .top_terms(self.top_terms)
                .into_iter()
                .map(|(term, count)| format!("{}:{}", self.term(term), count))
                .collect();
            if !terms.is_empty() {
                out.push_str(&format!("  {}\n", terms.join(" ")));
            }
        }

        Ok(out)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    pub fn format_document(&self, document: &Document) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(document)?
        } else {
            serde_json::to_string(document)?
        };
        Ok(json)
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_documents(&self, documents: &[Document]) -> Result<String> {
        let mut out = String::new();
        for document in documents {
            out.push_str(&self.format_document(document)?);
            out.push('\n');
        }
        Ok(out)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

pub fn formatter_for(config: &OutputConfig) -> Box<dyn OutputFormatter> {
    match config.format {
        OutputFormat::Console => Box::new(ConsoleFormatter::new(config.color_output, config.top_terms)),
        OutputFormat::Json => Box::new(JsonFormatter::new(false)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::TextProcessor;

    fn documents() -> Vec<Document> {
        let processor = TextProcessor::english().unwrap();
        vec![
            Document::named("Dogs bark at dogs", "d1", &processor),
            Document::named("", "empty", &processor),
        ]
    }

    #[test]
    fn test_console_output() {
        let out = ConsoleFormatter::new(false, 5)
            .format_documents(&documents())
            .unwrap();

        // "at" is a stopword
        assert!(out.starts_with("2 documents, 3 tokens"));
        assert!(out.contains("d1  (3 tokens, 2 distinct terms)"));
        assert!(out.contains("dog:2 bark:1"));
        assert!(out.contains("empty  (0 tokens, 0 distinct terms)"));
    }

    #[test]
    fn test_json_lines() {
        let out = JsonFormatter::new(false).format_documents(&documents()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["name"], "d1");
        assert_eq!(first["term_counts"]["dog"], 2);
    }

    #[test]
    fn test_formatter_selection() {
        let mut config = OutputConfig::default();
        assert_eq!(formatter_for(&config).supports_format(), OutputFormat::Console);
        config.format = OutputFormat::Json;
        assert_eq!(formatter_for(&config).supports_format(), OutputFormat::Json);
    }
}
