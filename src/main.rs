//! Corpus normalizer: document ingestion and text normalization tool

use clap::Parser;
use corpus_normalizer::cli::{self, Cli, Commands, ConfigAction};
use corpus_normalizer::config::{Config, ErrorPolicy};
use corpus_normalizer::error::{NormalizerError, Result};
use corpus_normalizer::extraction::{BacArchive, RecordSource, TwentyNewsCorpus};
use corpus_normalizer::input::CorpusLoader;
use corpus_normalizer::output::{formatter_for, ConsolidatedWriter, JsonFormatter};
use corpus_normalizer::pipeline::{Pipeline, PipelineOutput};
use corpus_normalizer::processing::{Document, LinguisticResources, TextProcessor};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let policy = cli::error_policy(cli.skip_invalid, config.errors);

    if let Err(e) = run_command(cli.command, config, policy) {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn run_command(command: Commands, mut config: Config, policy: ErrorPolicy) -> Result<()> {
    match command {
        Commands::Load { dir, format, save } => {
            if let Some(format) = format {
                config.output.format =
                    cli::parse_output_format(&format).map_err(NormalizerError::InvalidInput)?;
            }

            let processor = build_processor(&config)?;
            let mut loader = CorpusLoader::new(&processor, &config.corpus).with_policy(policy);
            let documents = loader.load_docs(&dir)?;

            for skipped in loader.skipped() {
                warn!("Skipped {}", skipped.display());
            }

            let report = formatter_for(&config.output).format_documents(&documents)?;
            match save {
                Some(path) => {
                    std::fs::write(&path, report)?;
                    info!("Report saved to {}", path.display());
                }
                None => print!("{}", report),
            }
        }

        Commands::Normalize { text, file } => {
            let text = match (text, file) {
                (Some(text), _) => text,
                (None, Some(path)) => std::fs::read_to_string(path)?,
                (None, None) => {
                    let mut buffer = String::new();
                    std::io::stdin().read_to_string(&mut buffer)?;
                    buffer
                }
            };

            let processor = build_processor(&config)?;
            println!("{}", processor.process_text(&text).join(" "));
        }

        Commands::News {
            root,
            output,
            documents,
        } => {
            if !root.is_dir() {
                return Err(NormalizerError::InvalidInput(format!(
                    "Newsgroup root is not a directory: {}",
                    root.display()
                )));
            }

            let progress = spinner("newsgroups");
            let source = TwentyNewsCorpus::new(&root, config.extraction.fallback_encoding)?
                .with_policy(policy)
                .with_progress(progress.clone());
            let output = output.unwrap_or_else(|| config.extraction.news_output.clone());

            let result = run_pipeline(&source, &config, output, documents.as_deref());
            progress.finish_and_clear();
            report_run(&result?);
        }

        Commands::Bac {
            archive,
            output,
            documents,
            pairing,
        } => {
            cli::validate_file_extension(&archive, &["zip"])
                .map_err(|e| NormalizerError::InvalidInput(format!("BAC archive: {}", e)))?;
            if let Some(pairing) = pairing {
                config.extraction.pairing =
                    cli::parse_pairing_policy(&pairing).map_err(NormalizerError::InvalidInput)?;
            }

            let progress = spinner("blog entries");
            let source = BacArchive::new(
                &archive,
                config.extraction.pairing,
                config.extraction.fallback_encoding,
            )?
            .with_policy(policy)
            .with_progress(progress.clone());
            let output = output.unwrap_or_else(|| config.extraction.bac_output.clone());

            let result = run_pipeline(&source, &config, output, documents.as_deref());
            progress.finish_and_clear();
            report_run(&result?);
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                let content = toml::to_string_pretty(&config).map_err(|e| {
                    NormalizerError::Configuration(format!("Failed to serialize config: {}", e))
                })?;
                println!("# {}\n{}", Config::config_path().display(), content);
            }

            Some(ConfigAction::Reset) => {
                Config::default().save()?;
                println!("Configuration reset to defaults");
            }
        },
    }

    Ok(())
}

/// Resources are loaded before any input is touched so a missing stopword
/// list fails the run immediately.
fn build_processor(config: &Config) -> Result<TextProcessor> {
    let resources = LinguisticResources::load(&config.normalization)?;
    TextProcessor::new(resources)
}

fn run_pipeline<S: RecordSource>(
    source: &S,
    config: &Config,
    output: PathBuf,
    documents_path: Option<&Path>,
) -> Result<PipelineOutput> {
    let writer = ConsolidatedWriter::create(output)?;

    match documents_path {
        Some(path) => {
            let processor = build_processor(config)?;
            let result = Pipeline::with_normalization(&processor).run(source, writer)?;
            write_documents(path, &result.documents)?;
            Ok(result)
        }
        None => Pipeline::new().run(source, writer),
    }
}

fn write_documents(path: &Path, documents: &[Document]) -> Result<()> {
    let formatter = JsonFormatter::new(false);
    let mut writer = ConsolidatedWriter::create(path)?;
    for document in documents {
        writer.write_line(&formatter.format_document(document)?)?;
    }
    let path = writer.finish()?;
    info!("Wrote {} documents to {}", documents.len(), path.display());
    Ok(())
}

fn report_run(result: &PipelineOutput) {
    println!(
        "{} records from {} sources written to {}",
        result.summary.records,
        result.summary.sources,
        result.output_path.display()
    );
    if !result.summary.skipped.is_empty() {
        println!("{} sources skipped:", result.summary.skipped.len());
        for name in &result.summary.skipped {
            println!("  {}", name);
        }
    }
}

fn spinner(prefix: &'static str) -> ProgressBar {
    let progress = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner} {prefix}: {pos} {wide_msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    progress.set_style(style);
    progress.set_prefix(prefix);
    progress.enable_steady_tick(Duration::from_millis(120));
    progress
}
