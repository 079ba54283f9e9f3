//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Input rejected before any computation ran.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Range whose start lies after its end.
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// Range longer than the engine is allowed to simulate.
    #[error("Range too long: {0}")]
    RangeTooLong(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading or writing ledger data failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the stable machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidRange(_) => "INVALID_RANGE",
            Self::RangeTooLong(_) => "RANGE_TOO_LONG",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true if the caller can fix the error by changing its input.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::InvalidRange(_) | Self::RangeTooLong(_)
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::Validation(String::new()), "VALIDATION_ERROR", true)]
    #[case(AppError::InvalidRange(String::new()), "INVALID_RANGE", true)]
    #[case(AppError::RangeTooLong(String::new()), "RANGE_TOO_LONG", true)]
    #[case(AppError::Config(String::new()), "CONFIG_ERROR", false)]
    #[case(AppError::Io(String::new()), "IO_ERROR", false)]
    #[case(AppError::Internal(String::new()), "INTERNAL_ERROR", false)]
    fn test_error_codes(#[case] err: AppError, #[case] code: &str, #[case] client: bool) {
        assert_eq!(err.error_code(), code);
        assert_eq!(err.is_client_error(), client);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::Validation("msg".into()).to_string(),
            "Validation error: msg"
        );
        assert_eq!(
            AppError::InvalidRange("msg".into()).to_string(),
            "Invalid range: msg"
        );
        assert_eq!(
            AppError::RangeTooLong("msg".into()).to_string(),
            "Range too long: msg"
        );
        assert_eq!(
            AppError::Config("msg".into()).to_string(),
            "Configuration error: msg"
        );
        assert_eq!(AppError::Io("msg".into()).to_string(), "I/O error: msg");
        assert_eq!(
            AppError::Internal("msg".into()).to_string(),
            "Internal error: msg"
        );
    }

    #[test]
    fn test_io_error_converts() {
        let err: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "ledger.json").into();
        assert_eq!(err.error_code(), "IO_ERROR");
        assert!(err.to_string().contains("ledger.json"));
    }
}
