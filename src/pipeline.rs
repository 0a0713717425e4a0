//! Extract → normalize → store
//!
//! Runs a record source to completion, writing each cleaned record as one
//! line of consolidated output and, when a processor is attached, turning it
//! into a `Document` as well.

use crate::error::Result;
use crate::extraction::{RecordSource, RunSummary};
use crate::output::ConsolidatedWriter;
use crate::processing::{Document, TextProcessor};
use log::info;
use std::path::PathBuf;

#[derive(Debug)]
pub struct PipelineOutput {
    pub summary: RunSummary,
    pub output_path: PathBuf,
    pub documents: Vec<Document>,
}

#[derive(Default)]
pub struct Pipeline<'a> {
    processor: Option<&'a TextProcessor>,
}

impl<'a> Pipeline<'a> {
    /// Consolidate only, no normalization.
    pub fn new() -> Self {
        Self { processor: None }
    }

    pub fn with_normalization(processor: &'a TextProcessor) -> Self {
        Self {
            processor: Some(processor),
        }
    }

    /// On error the writer is dropped unfinished and no output file appears.
    pub fn run<S>(&self, source: &S, mut writer: ConsolidatedWriter) -> Result<PipelineOutput>
    where
        S: RecordSource + ?Sized,
    {
        info!("Processing {}", source.describe());
        let mut documents = Vec::new();

        let summary = source.for_each_record(&mut |record| {
            writer.write_line(&record.consolidated_line())?;
            if let Some(processor) = self.processor {
                documents.push(Document::named(record.text, record.name, processor));
            }
            Ok(())
        })?;

        let lines = writer.lines();
        let output_path = writer.finish()?;
        info!("Wrote {} lines to {}", lines, output_path.display());

        Ok(PipelineOutput {
            summary,
            output_path,
            documents,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NormalizerError;
    use crate::extraction::ExtractedRecord;
    use tempfile::TempDir;

    struct FixedSource {
        records: Vec<ExtractedRecord>,
        fail_after: Option<usize>,
    }

    impl RecordSource for FixedSource {
        fn describe(&self) -> String {
            "fixed records".to_string()
        }

        fn for_each_record(
            &self,
            sink: &mut dyn FnMut(ExtractedRecord) -> Result<()>,
        ) -> Result<RunSummary> {
            let mut summary = RunSummary::default();
            for (i, record) in self.records.iter().enumerate() {
                if Some(i) == self.fail_after {
                    return Err(NormalizerError::InvalidInput("boom".to_string()));
                }
                sink(record.clone())?;
                summary.sources += 1;
                summary.records += 1;
            }
            Ok(summary)
        }
    }

    fn records() -> Vec<ExtractedRecord> {
        vec![
            ExtractedRecord {
                name: "blogs/1.xml#0".to_string(),
                label: Some("2004-01-01".to_string()),
                text: "Cats were running".to_string(),
            },
            ExtractedRecord {
                name: "blogs/1.xml#1".to_string(),
                label: Some("2004-01-02".to_string()),
                text: "Dogs bark".to_string(),
            },
        ]
    }

    #[test]
    fn test_consolidate_and_normalize() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("out.txt");
        let processor = TextProcessor::english().unwrap();
        let source = FixedSource {
            records: records(),
            fail_after: None,
        };

        let output = Pipeline::with_normalization(&processor)
            .run(&source, ConsolidatedWriter::create(&target).unwrap())
            .unwrap();

        assert_eq!(output.summary.records, 2);
        assert_eq!(
            std::fs::read_to_string(&target).unwrap(),
            "2004-01-01 - Cats were running\n2004-01-02 - Dogs bark\n"
        );
        assert_eq!(output.documents.len(), 2);
        assert_eq!(output.documents[0].name(), "blogs/1.xml#0");
        assert_eq!(output.documents[0].tokens(), ["cat", "run"]);
    }

    #[test]
    fn test_consolidate_only() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("out.txt");
        let source = FixedSource {
            records: records(),
            fail_after: None,
        };

        let output = Pipeline::new()
            .run(&source, ConsolidatedWriter::create(&target).unwrap())
            .unwrap();
        assert!(output.documents.is_empty());
        assert_eq!(output.output_path, target);
    }

    #[test]
    fn test_failed_run_leaves_no_output() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("out.txt");
        let source = FixedSource {
            records: records(),
            fail_after: Some(1),
        };

        let result = Pipeline::new().run(&source, ConsolidatedWriter::create(&target).unwrap());
        assert!(result.is_err());
        assert!(!target.exists());
    }
}
