use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::entities::filter::ColumnVisibility;
use crate::domain::entities::history::SessionIdentity;
use crate::usecase::ports::repo::{PreferenceRepository, RepoError};

pub struct PreferenceService {
    repo: Arc<dyn PreferenceRepository>,
}

impl PreferenceService {
    pub fn new(repo: Arc<dyn PreferenceRepository>) -> Self {
        Self { repo }
    }

    /// Stored visibility merged over the defaults. Falls back to defaults
    /// when the local store cannot be read.
    pub fn column_visibility(&self, table: &str, columns: &[String]) -> ColumnVisibility {
        match self.repo.load_column_visibility(table) {
            Ok(stored) => ColumnVisibility::merged(columns, &stored),
            Err(err) => {
                warn!(error = %err, table, "failed to load column visibility");
                ColumnVisibility::with_defaults(columns)
            }
        }
    }

    pub fn save_column_visibility(
        &self,
        table: &str,
        visibility: &ColumnVisibility,
    ) -> Result<(), RepoError> {
        self.repo.upsert_column_visibility(table, visibility.as_map())
    }

    /// Anonymous identity that survives restarts, so saved filters can be
    /// found again. A fresh id is generated and stored on first launch. If it
    /// cannot be stored, the fresh id is used for this run only.
    pub fn session_identity(&self) -> SessionIdentity {
        match self.repo.load_session_id() {
            Ok(Some(session_id)) if !session_id.trim().is_empty() => {
                return SessionIdentity::anonymous(session_id);
            }
            Ok(_) => {}
            Err(err) => warn!(error = %err, "failed to load session id"),
        }

        let session_id = Uuid::new_v4().to_string();
        match self.repo.store_session_id(&session_id) {
            Ok(()) => info!(session_id = %session_id, "created session id"),
            Err(err) => warn!(error = %err, "session id not persisted"),
        }
        SessionIdentity::anonymous(session_id)
    }
}
