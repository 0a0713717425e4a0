//! Output: consolidated text files and document reports

pub mod formatter;
pub mod writer;

pub use formatter::{formatter_for, ConsoleFormatter, JsonFormatter, OutputFormatter};
pub use writer::ConsolidatedWriter;
