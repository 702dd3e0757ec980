use thiserror::Error;

/// Main error type for TuneGraph
///
/// The graph core never returns these: unknown nodes and misuse yield empty
/// results instead. Errors only come from the surrounding I/O layers.
#[derive(Error, Debug)]
pub enum TunegraphError {
    /// File system I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Source text could not be turned into relations
    #[error("Parse error: {0}")]
    Parse(String),

    /// A verb phrase table produced an invalid pattern
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// JSON rendering errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Convenient Result type using TunegraphError
pub type Result<T> = std::result::Result<T, TunegraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TunegraphError::Config("Test error".to_string());
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("Test error"));
    }

    #[test]
    fn test_error_from_regex() {
        let regex_err = regex::Regex::new("(unclosed").unwrap_err();
        let err: TunegraphError = regex_err.into();
        assert!(matches!(err, TunegraphError::Pattern(_)));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TunegraphError = io_err.into();
        assert!(matches!(err, TunegraphError::Io(_)));
    }

    #[test]
    fn test_error_invalid_input_display() {
        let err = TunegraphError::InvalidInput("unknown layer: foo".to_string());
        assert_eq!(err.to_string(), "Invalid input: unknown layer: foo");
    }
}
