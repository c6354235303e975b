use chrono::{DateTime, Utc};
use tracing::{debug, error};

use crate::domain::entities::filter::FilterState;
use crate::domain::entities::session::Session;
use crate::domain::error::DashboardError;
use crate::usecase::services::history_service::HistoryBridge;

pub struct FilterService {
    history: HistoryBridge,
}

impl FilterService {
    pub fn new(history: HistoryBridge) -> Self {
        Self { history }
    }

    /// First call per session seeds from the latest persisted entry, unless
    /// the session was reset since. Seeded columns missing from
    /// `known_columns` are dropped.
    pub async fn get_active_filters(
        &self,
        session: &mut Session,
        known_columns: &[String],
    ) -> FilterState {
        if !session.filters_seeded {
            let mut seeded = FilterState::new();
            if session.apply_last_filter {
                if let Some(entry) = self.history.latest(&session.identity).await {
                    match entry.filters() {
                        Ok(filters) => seeded = filters,
                        Err(err) => {
                            error!(
                                operation = "fetch_history",
                                error = %err,
                                "stored filter state is not valid JSON"
                            );
                        }
                    }
                }
            }
            if !known_columns.is_empty() {
                seeded.retain_columns(known_columns);
            }
            session.filters = seeded;
            session.filters_seeded = true;
        }
        session.filters.clone()
    }

    /// Persists the current filters. The outcome decides whether the next
    /// session start reseeds from history.
    pub async fn persist(&self, session: &mut Session, at: DateTime<Utc>) -> bool {
        let saved = self
            .history
            .save(&session.identity, &session.filters, at)
            .await;
        session.apply_last_filter = saved;
        saved
    }
}

/// Replaces the selection for `column`. An empty selection removes the key.
pub fn apply_selection(
    state: &mut FilterState,
    column: &str,
    values: Vec<String>,
    known_columns: &[String],
) -> Result<(), DashboardError> {
    if !known_columns.is_empty() && !known_columns.iter().any(|known| known == column) {
        return Err(DashboardError::InvalidFilterColumn(column.to_string()));
    }
    if values.is_empty() {
        state.remove(column);
    } else {
        state.set(column, values);
    }
    Ok(())
}

/// Adds or removes one value from a column's selection.
pub fn toggle_value(
    state: &mut FilterState,
    column: &str,
    value: &str,
    known_columns: &[String],
) -> Result<(), DashboardError> {
    let mut values = state.get(column).map(<[String]>::to_vec).unwrap_or_default();
    match values.iter().position(|existing| existing == value) {
        Some(idx) => {
            values.remove(idx);
        }
        None => values.push(value.to_string()),
    }
    apply_selection(state, column, values, known_columns)
}

pub fn reset(session: &mut Session) {
    debug!(action = "reset_filter", "clearing filter state");
    session.filters.clear();
    session.filters_seeded = true;
    session.apply_last_filter = false;
    session.filter_applied = false;
    session.pagination.reset();
}
