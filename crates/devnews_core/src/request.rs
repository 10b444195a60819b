use std::fmt;

use crate::ResultSet;

/// Error text used when the service rejects a request without saying why.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to generate news";

/// Lifecycle of the single generation request.
///
/// The current result set lives inside `Succeeded`; starting a new request
/// drops it, so stale items are never shown while in flight.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    InFlight,
    Succeeded(ResultSet),
    Failed(ErrorInfo),
}

impl RequestState {
    pub fn status(&self) -> RequestStatus {
        match self {
            RequestState::Idle => RequestStatus::Idle,
            RequestState::InFlight => RequestStatus::InFlight,
            RequestState::Succeeded(_) => RequestStatus::Succeeded,
            RequestState::Failed(_) => RequestStatus::Failed,
        }
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self, RequestState::InFlight)
    }

    /// Items of the current result set; empty unless the last request succeeded.
    pub fn results(&self) -> &[crate::NewsItem] {
        match self {
            RequestState::Succeeded(items) => items,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        match self {
            RequestState::Failed(info) => Some(info),
            _ => None,
        }
    }
}

/// Data-free mirror of [`RequestState`] for view models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestStatus {
    #[default]
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network failure or non-2xx status.
    Transport,
    /// 2xx response without `success: true` and a `data` array.
    Protocol,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    pub kind: ErrorKind,
    pub status: Option<u16>,
    pub message: String,
}

impl ErrorInfo {
    pub fn transport(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Transport,
            status,
            message: message.into(),
        }
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Protocol,
            status: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(code) => write!(f, "HTTP {code}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Outcome of the diagnostic `GET /` probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectivityResult {
    Reachable { body: String },
    BadStatus { status: u16, reason: String },
    Unreachable { message: String },
}

impl ConnectivityResult {
    pub fn is_reachable(&self) -> bool {
        matches!(self, ConnectivityResult::Reachable { .. })
    }

    pub(crate) fn describe(&self) -> String {
        match self {
            ConnectivityResult::Reachable { body } => {
                format!("Connection test successful: {body}")
            }
            ConnectivityResult::BadStatus { status, reason } => {
                format!("Connection test failed: {status} {reason}")
            }
            ConnectivityResult::Unreachable { message } => {
                format!("Connection test error: {message}")
            }
        }
    }
}

/// Append-only trace of request transitions, cleared only on demand.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DiagnosticLog {
    lines: Vec<String>,
}

impl DiagnosticLog {
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn last(&self) -> Option<&str> {
        self.lines.last().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
