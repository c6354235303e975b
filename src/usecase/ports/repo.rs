use std::collections::BTreeMap;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepoError {
    #[error("{0}")]
    Message(String),
}

/// Local UI preferences: per-table column visibility and the install's session id.
pub trait PreferenceRepository: Send + Sync {
    fn init(&self) -> Result<(), RepoError>;

    fn load_column_visibility(&self, table: &str) -> Result<BTreeMap<String, bool>, RepoError>;

    fn upsert_column_visibility(
        &self,
        table: &str,
        visibility: &BTreeMap<String, bool>,
    ) -> Result<(), RepoError>;

    fn load_session_id(&self) -> Result<Option<String>, RepoError>;

    fn store_session_id(&self, session_id: &str) -> Result<(), RepoError>;
}
