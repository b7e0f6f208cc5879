use thiserror::Error;

/// Application-wide error type - single point of truth
#[derive(Error, Debug)]
pub enum AppError {
    /// Core analysis errors
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// File I/O operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration issues
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation/parsing
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Event delivered after the scan session stopped
    #[error("Scan session is no longer running")]
    SessionClosed,

    /// Invalid captured advertisement record
    #[error("Invalid capture record at line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },
}

/// Errors surfaced by the analysis core
///
/// Short or implausible payloads are never errors; they produce absent
/// structures and low scores.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// The caller delivered an event that breaks the input contract
    #[error("Input contract violation: {0}")]
    ContractViolation(String),

    /// Aggregator operation attempted in the wrong session state
    #[error("Session is {actual}, expected {expected}")]
    SessionState {
        expected: &'static str,
        actual: &'static str,
    },
}

/// Application-wide result type - single point of truth
pub type AppResult<T> = Result<T, AppError>;

/// Result type for core analysis operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidData(format!("JSON error: {}", err))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}
