use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::domain::entities::filter::FilterState;
use crate::domain::entities::history::{SearchHistoryEntry, SessionIdentity};
use crate::domain::entities::job::Row;
use crate::domain::error::DashboardError;

/// The remote query service. Database and table come from the adapter's config.
#[async_trait]
pub trait DashboardBackend: Send + Sync {
    async fn column_names(&self) -> Result<Vec<String>, DashboardError>;

    async fn row_count(&self, filters: Option<&FilterState>) -> Result<u64, DashboardError>;

    async fn unique_values(
        &self,
        column: &str,
        is_stacked: bool,
    ) -> Result<Vec<String>, DashboardError>;

    async fn run_query(&self, query: &str) -> Result<Vec<Row>, DashboardError>;

    async fn stacked_columns(&self) -> Result<Vec<String>, DashboardError>;

    async fn dev_stacks(&self) -> Result<Vec<String>, DashboardError>;

    /// Posting ids matching `keyword`; an empty keyword matches every posting.
    async fn search_keyword(&self, keyword: &str) -> Result<Vec<i64>, DashboardError>;

    /// Card fields keyed by posting id. Ids the backend does not know are absent.
    async fn job_informations(&self, pids: &[i64]) -> Result<BTreeMap<i64, Row>, DashboardError>;

    async fn fetch_history(
        &self,
        identity: &SessionIdentity,
    ) -> Result<Vec<SearchHistoryEntry>, DashboardError>;

    async fn save_history(&self, entry: &SearchHistoryEntry) -> Result<(), DashboardError>;

    async fn delete_history(&self, identity: &SessionIdentity) -> Result<(), DashboardError>;

    /// Table name used when building query text.
    fn table(&self) -> &str;
}
