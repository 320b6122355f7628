use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    TransportError,
    Unauthorized,
    NotFound,
    HttpError,
    DecodeError,
    ValidationError,
    ConfigError,
    SessionError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TransportError => "TRANSPORT_ERROR",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::NotFound => "NOT_FOUND",
            Self::HttpError => "HTTP_ERROR",
            Self::DecodeError => "DECODE_ERROR",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
            Self::SessionError => "SESSION_ERROR",
        }
    }
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct TaskdeskError {
    pub code: ErrorCode,
    pub message: String,
}

impl TaskdeskError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::TransportError, message)
    }

    /// Map a non-2xx response onto the matching code. `body` is the raw
    /// response text, kept for the user-facing message.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let detail = if body.trim().is_empty() {
            status.to_string()
        } else {
            format!("{status}: {}", body.trim())
        };
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::new(
                ErrorCode::Unauthorized,
                format!("Not authorized ({detail}). Try `taskdesk login`."),
            ),
            StatusCode::NOT_FOUND => Self::new(ErrorCode::NotFound, format!("Not found ({detail})")),
            _ => Self::new(ErrorCode::HttpError, format!("Request failed ({detail})")),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DecodeError, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    pub fn session(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SessionError, message)
    }
}

impl From<reqwest::Error> for TaskdeskError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::decode(e.to_string())
        } else {
            Self::transport(e.to_string())
        }
    }
}

impl From<toml::de::Error> for TaskdeskError {
    fn from(e: toml::de::Error) -> Self {
        Self::config(format!("failed to parse config file: {e}"))
    }
}

impl From<std::io::Error> for TaskdeskError {
    fn from(e: std::io::Error) -> Self {
        Self::session(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            TaskdeskError::from_status(StatusCode::UNAUTHORIZED, "").code,
            ErrorCode::Unauthorized
        );
        assert_eq!(
            TaskdeskError::from_status(StatusCode::FORBIDDEN, "denied").code,
            ErrorCode::Unauthorized
        );
        assert_eq!(
            TaskdeskError::from_status(StatusCode::NOT_FOUND, "").code,
            ErrorCode::NotFound
        );
        let e = TaskdeskError::from_status(StatusCode::BAD_REQUEST, "Title is required");
        assert_eq!(e.code, ErrorCode::HttpError);
        assert!(e.message.contains("Title is required"));
    }
}
