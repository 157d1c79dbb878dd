use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in the folio application
#[derive(Error, Debug)]
pub enum FolioError {
    /// Error reading or parsing the profile document
    #[error("Failed to load profile from {path}: {message}")]
    ProfileLoadError { path: PathBuf, message: String },

    /// Error when the profile document fails schema validation
    #[error("Invalid profile data: {0}")]
    ProfileValidationError(String),

    /// Error in configuration (missing key, bad value)
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Error talking to the Gemini API
    #[error("API error: {0}")]
    ApiError(String),

    /// Network-level failure
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Error when serializing data
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Error reading or writing the quota store
    #[error("Quota store error: {0}")]
    QuotaStoreError(String),

    /// Error producing the resume PDF
    #[error("PDF export error: {0}")]
    PdfExportError(String),

    /// Filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for folio operations
pub type Result<T> = std::result::Result<T, FolioError>;

impl From<serde_json::Error> for FolioError {
    fn from(err: serde_json::Error) -> Self {
        FolioError::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FolioError::ProfileValidationError("first_name: missing".to_string());
        assert!(err.to_string().contains("first_name"));

        let err = FolioError::ConfigurationError("GEMINI_API_KEY not set".to_string());
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }
}
