//! Session report export

use crate::types::SessionReport;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Output-specific error types
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialisation error: {0}")]
    Serialise(#[from] serde_json::Error),
}

/// Writes session reports under a base directory
pub struct OutputManager {
    base_dir: PathBuf,
}

impl OutputManager {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Write a report as pretty JSON
    /// Creates: <base_dir>/universal_fido_analysis_<YYYYmmdd_HHMMSS>.json
    pub fn write_session_report(&self, report: &SessionReport) -> OutputResult<PathBuf> {
        let filename = format!(
            "universal_fido_analysis_{}.json",
            Local::now().format("%Y%m%d_%H%M%S")
        );
        self.write_session_report_as(report, &filename)
    }

    /// Write a report under an explicit file name
    pub fn write_session_report_as(
        &self,
        report: &SessionReport,
        filename: &str,
    ) -> OutputResult<PathBuf> {
        fs::create_dir_all(&self.base_dir)?;
        let filepath = self.base_dir.join(filename);
        fs::write(&filepath, serde_json::to_vec_pretty(report)?)?;

        info!("Session report saved: {}", filepath.display());
        Ok(filepath)
    }
}

impl From<OutputError> for crate::errors::AppError {
    fn from(err: OutputError) -> Self {
        match err {
            OutputError::Io(e) => crate::errors::AppError::Io(e),
            OutputError::Serialise(e) => e.into(),
        }
    }
}
