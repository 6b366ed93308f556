use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Remote error ({status}): {message}")]
    RemoteError { status: u16, message: String },

    #[error("Transport error: {0}")]
    TransportError(String),

    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("Upload failed: {0}")]
    UploadError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::RemoteError { .. } => "REMOTE_ERROR",
            AppError::TransportError(_) => "TRANSPORT_ERROR",
            AppError::DecodeError(_) => "DECODE_ERROR",
            AppError::UploadError(_) => "UPLOAD_ERROR",
            AppError::ConfigError(_) => "CONFIG_ERROR",
            AppError::IoError(_) => "IO_ERROR",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Maps a non-success status of the LMS API to an error.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => AppError::Unauthorized(message),
            404 => AppError::NotFound(message),
            _ => AppError::RemoteError { status, message },
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::TransportError(err.to_string())
    }
}
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::DecodeError(err.to_string())
    }
}
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}
impl From<ini::ParseError> for AppError {
    fn from(err: ini::ParseError) -> Self {
        AppError::ConfigError(format!("invalid profile file: {}", err))
    }
}
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_from_status() {
        assert!(matches!(
            AppError::from_status(401, "bad token"),
            AppError::Unauthorized(_)
        ));
        assert!(matches!(
            AppError::from_status(403, "forbidden"),
            AppError::Unauthorized(_)
        ));
        assert!(matches!(
            AppError::from_status(404, "missing"),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            AppError::from_status(422, "bad question"),
            AppError::RemoteError { status: 422, .. }
        ));
    }

    #[test]
    fn test_error_messages() {
        let err = AppError::NotFound("quiz 7".into());
        assert_eq!(err.to_string(), "Not found: quiz 7");

        let err = AppError::from_status(500, "boom");
        assert_eq!(err.to_string(), "Remote error (500): boom");
        assert_eq!(err.error_code(), "REMOTE_ERROR");
    }

    #[test]
    fn test_decode_error_conversion() {
        let err: AppError = serde_json::from_str::<u64>("not json").unwrap_err().into();
        assert_eq!(err.error_code(), "DECODE_ERROR");
    }
}
