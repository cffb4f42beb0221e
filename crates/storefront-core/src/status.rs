use crate::error::FailureReason;

/// Lifecycle of one async request: idle -> loading -> success | error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error(FailureReason),
}

impl RequestStatus {
    pub fn is_idle(&self) -> bool {
        matches!(self, RequestStatus::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, RequestStatus::Loading)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RequestStatus::Success)
    }

    pub fn error(&self) -> Option<FailureReason> {
        match self {
            RequestStatus::Error(reason) => Some(*reason),
            _ => None,
        }
    }

    pub(crate) fn from_outcome<T>(outcome: &Result<T, FailureReason>) -> Self {
        match outcome {
            Ok(_) => RequestStatus::Success,
            Err(reason) => RequestStatus::Error(*reason),
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestStatus::Idle => write!(f, "idle"),
            RequestStatus::Loading => write!(f, "loading"),
            RequestStatus::Success => write!(f, "success"),
            RequestStatus::Error(reason) => write!(f, "error ({})", reason),
        }
    }
}
