//! Error types for dataset preparation operations

use thiserror::Error;

/// Result type alias for dataset preparation operations
pub type Result<T> = std::result::Result<T, DatasetError>;

/// Error types for dataset preparation operations
#[derive(Error, Debug)]
pub enum DatasetError {
    /// Input/output errors (file not found, permission denied, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image encoding or decoding errors
    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    /// Network errors during archive download
    #[error("Network error: {0}")]
    Network(String),

    /// Archive extraction errors (malformed tarball, unsafe entry paths)
    #[error("Archive error: {0}")]
    Archive(String),

    /// Annotation conversion errors (unreadable or unexpected MAT content)
    #[error("Annotation conversion error: {0}")]
    Conversion(String),

    /// Invalid configuration or parameters
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl DatasetError {
    /// Create a new invalid configuration error
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a new archive error
    pub fn archive<S: Into<String>>(msg: S) -> Self {
        Self::Archive(msg.into())
    }

    /// Create a new annotation conversion error
    pub fn conversion<S: Into<String>>(msg: S) -> Self {
        Self::Conversion(msg.into())
    }

    /// Create a network error with operation context
    pub fn network_error<E: std::fmt::Display>(context: &str, source: E) -> Self {
        Self::Network(format!("{}: {}", context, source))
    }

    /// Create file I/O error with operation context
    pub fn file_io_error<P: AsRef<std::path::Path>>(
        operation: &str,
        path: P,
        error: &std::io::Error,
    ) -> Self {
        let path_display = path.as_ref().display();
        Self::Io(std::io::Error::new(
            error.kind(),
            format!("Failed to {} '{}': {}", operation, path_display, error),
        ))
    }

    /// Create configuration error with valid ranges
    pub fn config_value_error<T: std::fmt::Display>(
        parameter: &str,
        value: T,
        valid_range: &str,
    ) -> Self {
        Self::InvalidConfig(format!(
            "Invalid {}: {} (valid range: {})",
            parameter, value, valid_range
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_error_creation() {
        let err = DatasetError::invalid_config("test config error");
        assert!(matches!(err, DatasetError::InvalidConfig(_)));

        let err = DatasetError::archive("truncated tarball");
        assert!(matches!(err, DatasetError::Archive(_)));
    }

    #[test]
    fn test_error_display() {
        let err = DatasetError::invalid_config("bad train count");
        assert_eq!(err.to_string(), "Invalid configuration: bad train count");

        let err = DatasetError::conversion("no numeric field");
        assert_eq!(
            err.to_string(),
            "Annotation conversion error: no numeric field"
        );
    }

    #[test]
    fn test_file_io_error_context() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = DatasetError::file_io_error("copy image", Path::new("/tmp/img.jpg"), &io_error);
        let error_string = err.to_string();
        assert!(error_string.contains("copy image"));
        assert!(error_string.contains("/tmp/img.jpg"));
    }

    #[test]
    fn test_config_value_error() {
        let err = DatasetError::config_value_error("synthetic image size", 0, ">= 1");
        let error_string = err.to_string();
        assert!(error_string.contains("synthetic image size"));
        assert!(error_string.contains(">= 1"));
    }

    #[test]
    fn test_network_error_context() {
        let io_error = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = DatasetError::network_error("download archive", io_error);
        assert!(err.to_string().contains("download archive"));
    }
}
