use thiserror::Error;

/// Errors that can occur in the Harí application
#[derive(Error, Debug)]
pub enum HariError {
    /// Configuration error (missing credential, invalid knob)
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Network error for HTTP requests
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Gemini API error (blocked or empty responses, upstream failures)
    #[error("Gemini API error: {0}")]
    ApiError(String),

    /// Parse error for responses
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Error when serializing data
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Type alias for Result with HariError
pub type Result<T> = std::result::Result<T, HariError>;
