//! JSON file output
//!
//! Writes the finalized report as indented JSON to a single file,
//! replacing whatever was there before. There is no incremental output.

use crate::output::report::CrawlReport;
use crate::output::traits::{OutputError, OutputResult, ReportSink};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Report sink writing pretty-printed JSON to a file
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    /// Creates a sink targeting the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn io_error(&self, source: std::io::Error) -> OutputError {
        OutputError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl ReportSink for JsonFileSink {
    fn write_report(&self, report: &CrawlReport) -> OutputResult<()> {
        let file = File::create(&self.path).map_err(|e| self.io_error(e))?;
        let mut writer = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, report)?;
        writer.write_all(b"\n").map_err(|e| self.io_error(e))?;
        writer.flush().map_err(|e| self.io_error(e))?;

        tracing::debug!(
            path = %self.path.display(),
            pages = report.total_pages,
            "Report written"
        );

        Ok(())
    }

    fn destination(&self) -> String {
        self.path.display().to_string()
    }
}
