//! Consolidated line-per-record output files
//!
//! Lines go to a temporary file next to the target. The target only appears
//! once `finish` succeeds, so an aborted run never leaves partial output.

use crate::error::Result;
use log::debug;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tempfile::NamedTempFile;

pub struct ConsolidatedWriter {
    target: PathBuf,
    writer: BufWriter<NamedTempFile>,
    lines: usize,
}

impl ConsolidatedWriter {
    pub fn create(target: impl Into<PathBuf>) -> Result<Self> {
        let target = target.into();
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let temp = NamedTempFile::new_in(&dir)?;
        debug!("Writing {} via {}", target.display(), temp.path().display());

        Ok(Self {
            target,
            writer: BufWriter::new(temp),
            lines: 0,
        })
    }

    pub fn write_line(&mut self, line: &str) -> Result<()> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.lines += 1;
        Ok(())
    }

    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Flush and move the finished file into place.
    pub fn finish(self) -> Result<PathBuf> {
        let temp = self.writer.into_inner().map_err(|e| e.into_error())?;
        temp.as_file().sync_all()?;
        temp.persist(&self.target).map_err(|e| e.error)?;
        Ok(self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_lines_are_written_on_finish() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("out").join("news.txt");

        let mut writer = ConsolidatedWriter::create(&target).unwrap();
        writer.write_line("first").unwrap();
        writer.write_line("second").unwrap();
        assert_eq!(writer.lines(), 2);
        assert!(!target.exists());

        let written = writer.finish().unwrap();
        assert_eq!(written, target);
        assert_eq!(fs::read_to_string(&target).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn test_dropped_writer_leaves_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("bac.txt");

        {
            let mut writer = ConsolidatedWriter::create(&target).unwrap();
            writer.write_line("partial").unwrap();
        }

        assert!(!target.exists());
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }
}
