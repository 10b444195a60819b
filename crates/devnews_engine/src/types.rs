use devnews_core::{ErrorInfo, GENERIC_FAILURE_MESSAGE};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },
    #[error("{0}")]
    Network(String),
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("response too large (max {max_bytes} bytes)")]
    TooLarge { max_bytes: u64 },
    #[error("invalid client configuration: {0}")]
    Config(String),
    /// The service answered 2xx but reported failure.
    #[error("{0}")]
    Rejected(String),
    #[error("invalid response body: {0}")]
    MalformedBody(String),
}

impl GenerateError {
    pub(crate) fn rejected(message: Option<String>) -> Self {
        GenerateError::Rejected(message.unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string()))
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        match self {
            GenerateError::HttpStatus { status, body } => {
                ErrorInfo::transport(Some(*status), body.clone())
            }
            GenerateError::Rejected(message) => ErrorInfo::protocol(message.clone()),
            GenerateError::MalformedBody(_) => ErrorInfo::protocol(self.to_string()),
            GenerateError::Network(_)
            | GenerateError::Timeout(_)
            | GenerateError::TooLarge { .. }
            | GenerateError::Config(_) => ErrorInfo::transport(None, self.to_string()),
        }
    }
}
