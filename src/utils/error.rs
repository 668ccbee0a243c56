use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnrichError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("{source_name} returned unexpected status: {status}")]
    StatusError { source_name: String, status: u16 },

    #[error("Response parsing error: {message}")]
    ParseError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration field '{field}' failed validation: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Document extraction failed: {message}")]
    DocumentError { message: String },
}

impl EnrichError {
    /// 給 CLI 使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            EnrichError::ApiError(e) if e.is_timeout() => "Request timed out".to_string(),
            EnrichError::ApiError(_) => "Could not reach the remote service".to_string(),
            EnrichError::StatusError { source_name, status } => {
                format!("{} responded with HTTP {}", source_name, status)
            }
            EnrichError::ConfigValidationError { .. }
            | EnrichError::InvalidConfigValueError { .. } => {
                format!("Configuration problem: {}", self)
            }
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EnrichError>;
