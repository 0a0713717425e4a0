//! CLI interface for the corpus normalizer

use crate::config::{ErrorPolicy, OutputFormat, PairingPolicy};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "corpus-normalizer")]
#[command(about = "Document ingestion and text normalization for bag-of-words corpora")]
#[command(long_about = "Clean newsgroup and blog corpora, load NAF documents, and produce per-document token streams and term frequency tables")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Skip and log bad input files instead of aborting the run
    #[arg(long, global = true)]
    pub skip_invalid: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load a directory of NAF documents and report their term counts
    Load {
        /// Directory containing the document files
        dir: PathBuf,

        /// Output format: console, json
        #[arg(short, long)]
        format: Option<String>,

        /// Save the report to a file instead of printing it
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Print the normalized token stream of a text
    Normalize {
        /// Text to normalize
        #[arg(conflicts_with = "file")]
        text: Option<String>,

        /// Read the text from a file
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Clean a 20 Newsgroups tree into one line per message
    News {
        /// Root directory with one sub-directory per newsgroup
        root: PathBuf,

        /// Consolidated output file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write each message as a normalized document (JSON lines)
        #[arg(short, long)]
        documents: Option<PathBuf>,
    },

    /// Extract date/post pairs from a zipped Blog Authorship Corpus
    Bac {
        /// Zip archive with the blog files
        archive: PathBuf,

        /// Consolidated output file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write each post as a normalized document (JSON lines)
        #[arg(short, long)]
        documents: Option<PathBuf>,

        /// What to do when dates and posts do not line up: strict, truncate
        #[arg(short, long)]
        pairing: Option<String>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" | "jsonl" => Ok(OutputFormat::Json),
        _ => Err(format!("Invalid output format: {}. Supported: console, json", format)),
    }
}

pub fn parse_pairing_policy(policy: &str) -> Result<PairingPolicy, String> {
    match policy.to_lowercase().as_str() {
        "strict" => Ok(PairingPolicy::Strict),
        "truncate" => Ok(PairingPolicy::Truncate),
        _ => Err(format!("Invalid pairing policy: {}. Supported: strict, truncate", policy)),
    }
}

pub fn error_policy(skip_invalid: bool, configured: ErrorPolicy) -> ErrorPolicy {
    if skip_invalid {
        ErrorPolicy::Skip
    } else {
        configured
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
