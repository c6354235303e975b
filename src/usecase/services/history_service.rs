use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, warn};

use crate::domain::entities::filter::FilterState;
use crate::domain::entities::history::{SearchHistoryEntry, SessionIdentity};
use crate::usecase::ports::backend::DashboardBackend;

/// Moves serialized filter state to and from the search-history endpoint.
///
/// Nothing here returns an error: identity problems and backend failures are
/// logged and collapse to an empty result or `false`.
#[derive(Clone)]
pub struct HistoryBridge {
    backend: Arc<dyn DashboardBackend>,
}

impl HistoryBridge {
    pub fn new(backend: Arc<dyn DashboardBackend>) -> Self {
        Self { backend }
    }

    pub async fn fetch(&self, identity: &SessionIdentity) -> Vec<SearchHistoryEntry> {
        if let Err(err) = identity.scope() {
            warn!(operation = "fetch_history", error = %err, "skipping history fetch");
            return Vec::new();
        }
        match self.backend.fetch_history(identity).await {
            Ok(entries) => entries,
            Err(err) => {
                error!(operation = "fetch_history", error = %err, "failed to fetch search history");
                Vec::new()
            }
        }
    }

    /// The backend returns entries oldest first.
    pub async fn latest(&self, identity: &SessionIdentity) -> Option<SearchHistoryEntry> {
        self.fetch(identity).await.pop()
    }

    pub async fn save(
        &self,
        identity: &SessionIdentity,
        filters: &FilterState,
        at: DateTime<Utc>,
    ) -> bool {
        if let Err(err) = identity.scope() {
            warn!(operation = "save_history", error = %err, "refusing to save search history");
            return false;
        }
        let entry = SearchHistoryEntry::new(identity, filters, at);
        match self.backend.save_history(&entry).await {
            Ok(()) => true,
            Err(err) => {
                error!(operation = "save_history", error = %err, "failed to save search history");
                false
            }
        }
    }

    pub async fn delete(&self, identity: &SessionIdentity) -> bool {
        if let Err(err) = identity.scope() {
            warn!(operation = "delete_history", error = %err, "refusing to delete search history");
            return false;
        }
        match self.backend.delete_history(identity).await {
            Ok(()) => true,
            Err(err) => {
                error!(operation = "delete_history", error = %err, "failed to delete search history");
                false
            }
        }
    }
}
