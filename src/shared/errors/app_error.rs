use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Request timeout: {0}")]
    Timeout(String),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Rate limit exceeded: {0}")]
    RateLimitError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Checkpoint error: {0}")]
    CheckpointError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Coarse classification of a failed outbound call, used only for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchFailureKind {
    Timeout,
    ClientStatus,
    ServerStatus,
    RateLimited,
    Malformed,
    Api,
    Transport,
    NotFound,
    Fatal,
}

impl FetchFailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchFailureKind::Timeout => "timeout",
            FetchFailureKind::ClientStatus => "4xx",
            FetchFailureKind::ServerStatus => "5xx",
            FetchFailureKind::RateLimited => "rate-limited",
            FetchFailureKind::Malformed => "malformed",
            FetchFailureKind::Api => "api-error",
            FetchFailureKind::Transport => "transport",
            FetchFailureKind::NotFound => "not-found",
            FetchFailureKind::Fatal => "fatal",
        }
    }
}

impl std::fmt::Display for FetchFailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AppError {
    pub fn kind(&self) -> FetchFailureKind {
        match self {
            AppError::Timeout(_) => FetchFailureKind::Timeout,
            AppError::HttpStatus { status, .. } if *status >= 500 => FetchFailureKind::ServerStatus,
            AppError::HttpStatus { .. } => FetchFailureKind::ClientStatus,
            AppError::RateLimitError(_) => FetchFailureKind::RateLimited,
            AppError::SerializationError(_) => FetchFailureKind::Malformed,
            AppError::ApiError(_) => FetchFailureKind::Api,
            AppError::ExternalServiceError(_) => FetchFailureKind::Transport,
            AppError::NotFound(_) => FetchFailureKind::NotFound,
            AppError::CheckpointError(_)
            | AppError::ConfigError(_)
            | AppError::InvalidInput(_)
            | AppError::InternalError(_) => FetchFailureKind::Fatal,
        }
    }

    /// Whether this error is folded into "absent" at a client boundary
    /// instead of aborting the run.
    pub fn is_absorbable(&self) -> bool {
        self.kind() != FetchFailureKind::Fatal
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Timeout(err.to_string())
        } else if err.is_connect() {
            AppError::ExternalServiceError(format!(
                "Failed to connect to external service: {}",
                err
            ))
        } else if err.is_decode() {
            AppError::SerializationError(err.to_string())
        } else if let Some(status) = err.status() {
            match status.as_u16() {
                429 => AppError::RateLimitError("Too many requests".to_string()),
                404 => AppError::NotFound("External resource not found".to_string()),
                code => AppError::HttpStatus {
                    status: code,
                    body: err.to_string(),
                },
            }
        } else if err.is_builder() {
            AppError::InternalError(format!("Failed to build request: {}", err))
        } else {
            AppError::ExternalServiceError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::SerializationError(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::CheckpointError(err.to_string())
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(err: std::num::ParseIntError) -> Self {
        AppError::InvalidInput(format!("Invalid number: {}", err))
    }
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_split_by_class() {
        let client = AppError::HttpStatus {
            status: 400,
            body: "bad".to_string(),
        };
        let server = AppError::HttpStatus {
            status: 502,
            body: "gateway".to_string(),
        };

        assert_eq!(client.kind(), FetchFailureKind::ClientStatus);
        assert_eq!(server.kind(), FetchFailureKind::ServerStatus);
        assert!(client.is_absorbable());
        assert!(server.is_absorbable());
    }

    #[test]
    fn configuration_problems_are_fatal() {
        let err = AppError::ConfigError("bad url".to_string());
        assert_eq!(err.kind(), FetchFailureKind::Fatal);
        assert!(!err.is_absorbable());

        let err = AppError::InternalError("boom".to_string());
        assert!(!err.is_absorbable());
    }

    #[test]
    fn malformed_json_is_absorbable() {
        let err: AppError = serde_json::from_str::<serde_json::Value>("{nope")
            .unwrap_err()
            .into();
        assert_eq!(err.kind(), FetchFailureKind::Malformed);
        assert!(err.is_absorbable());
    }

    #[test]
    fn error_serializes_with_tag() {
        let err = AppError::Timeout("30s".to_string());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["type"], "Timeout");
        assert_eq!(json["message"], "30s");
    }
}
