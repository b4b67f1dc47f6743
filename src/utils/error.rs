use thiserror::Error;

#[derive(Error, Debug)]
pub enum PoofError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API request failed with status {status}: {message}")]
    StatusError {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("Binary field '{field}' is missing or empty on the input item")]
    MissingBinaryField { field: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field '{field}'")]
    MissingConfigError { field: String },

    #[error("Processing failed for item {index}: {source}")]
    ItemError {
        index: usize,
        source: Box<PoofError>,
    },
}

pub type Result<T> = std::result::Result<T, PoofError>;
