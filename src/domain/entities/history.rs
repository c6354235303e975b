use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::filter::FilterState;
use crate::domain::error::DashboardError;

pub const HISTORY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub session_id: String,
    pub user_id: Option<String>,
    pub is_logged_in: bool,
}

impl SessionIdentity {
    pub fn anonymous(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            user_id: None,
            is_logged_in: false,
        }
    }

    pub fn logged_in(session_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            user_id: Some(user_id.into()),
            is_logged_in: true,
        }
    }

    /// Resolves which key history is stored under. Logged-in users are scoped
    /// by `user_id`, anonymous sessions by `session_id`; the scopes never mix.
    pub fn scope(&self) -> Result<IdentityScope<'_>, DashboardError> {
        if self.is_logged_in {
            match self.user_id.as_deref().map(str::trim) {
                Some(user_id) if !user_id.is_empty() => Ok(IdentityScope::User(user_id)),
                _ => Err(DashboardError::MissingIdentity("user_id")),
            }
        } else if self.session_id.trim().is_empty() {
            Err(DashboardError::MissingIdentity("session_id"))
        } else {
            Ok(IdentityScope::Session(self.session_id.trim()))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityScope<'a> {
    Session(&'a str),
    User(&'a str),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHistoryEntry {
    pub session_id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub is_logged_in: bool,
    /// Serialized `FilterState`.
    #[serde(alias = "search_term", alias = "search_history")]
    pub filter_state: String,
    #[serde(default)]
    pub timestamp: String,
}

impl SearchHistoryEntry {
    pub fn new(identity: &SessionIdentity, filters: &FilterState, at: DateTime<Utc>) -> Self {
        Self {
            session_id: identity.session_id.clone(),
            user_id: identity.user_id.clone(),
            is_logged_in: identity.is_logged_in,
            filter_state: filters.to_json(),
            timestamp: at.format(HISTORY_TIMESTAMP_FORMAT).to_string(),
        }
    }

    pub fn filters(&self) -> serde_json::Result<FilterState> {
        FilterState::from_json(&self.filter_state)
    }
}
