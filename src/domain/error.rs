use thiserror::Error;

/// Failures surfaced by the dashboard controller.
///
/// Backend failures (`BackendUnavailable`, `MalformedResponse`) are caught by the
/// services and turned into empty results. The remaining variants are raised
/// before any request leaves the process.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    #[error("{operation}: backend unavailable: {reason}")]
    BackendUnavailable {
        operation: &'static str,
        reason: String,
    },

    #[error("{operation}: malformed response: {reason}")]
    MalformedResponse {
        operation: &'static str,
        reason: String,
    },

    #[error("invalid page size {0} (allowed: 10, 25, 50, 100)")]
    InvalidPageSize(u32),

    #[error("unknown filter column: {0}")]
    InvalidFilterColumn(String),

    #[error("missing {0} for the current login scope")]
    MissingIdentity(&'static str),
}

impl DashboardError {
    pub fn unavailable(operation: &'static str, reason: impl Into<String>) -> Self {
        DashboardError::BackendUnavailable {
            operation,
            reason: reason.into(),
        }
    }

    pub fn malformed(operation: &'static str, reason: impl Into<String>) -> Self {
        DashboardError::MalformedResponse {
            operation,
            reason: reason.into(),
        }
    }

    pub fn is_backend_failure(&self) -> bool {
        matches!(
            self,
            DashboardError::BackendUnavailable { .. } | DashboardError::MalformedResponse { .. }
        )
    }
}
