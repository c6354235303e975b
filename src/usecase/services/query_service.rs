use std::sync::Arc;

use tracing::error;

use crate::domain::entities::filter::FilterState;
use crate::domain::entities::job::{JobSummary, Row};
use crate::domain::entities::page::PageDescriptor;
use crate::domain::entities::session::Session;
use crate::domain::query::{build_detail_query, build_query};
use crate::usecase::ports::backend::DashboardBackend;

#[derive(Debug, Clone, PartialEq)]
pub struct PageLoad {
    pub descriptor: PageDescriptor,
    pub rows: Vec<Row>,
    pub query: Option<String>,
}

pub struct QueryService {
    backend: Arc<dyn DashboardBackend>,
}

impl QueryService {
    pub fn new(backend: Arc<dyn DashboardBackend>) -> Self {
        Self { backend }
    }

    pub async fn row_count(&self, filters: Option<&FilterState>) -> u64 {
        match self.backend.row_count(filters).await {
            Ok(count) => count,
            Err(err) => {
                error!(operation = "row_count", error = %err, "failed to count rows");
                0
            }
        }
    }

    pub async fn run_query(&self, query: &str) -> Vec<Row> {
        match self.backend.run_query(query).await {
            Ok(rows) => rows,
            Err(err) => {
                error!(operation = "run_query", error = %err, query, "failed to run query");
                Vec::new()
            }
        }
    }

    /// Counts, clamps the session's page, and fetches that page. A failed
    /// count renders as an empty table.
    pub async fn load_page(&self, session: &mut Session) -> PageLoad {
        let filters = session.active_query_filters().cloned();
        let total_rows = self.row_count(filters.as_ref()).await;
        let descriptor = session.pagination.describe(total_rows);
        if descriptor.is_empty() {
            return PageLoad {
                descriptor,
                rows: Vec::new(),
                query: None,
            };
        }

        let query = build_query(
            self.backend.table(),
            filters.as_ref(),
            descriptor.limit(),
            descriptor.offset(),
        );
        let rows = self.run_query(&query).await;
        PageLoad {
            descriptor,
            rows,
            query: Some(query),
        }
    }

    pub async fn load_detail(&self, job: &JobSummary) -> Vec<Row> {
        let (Some(pid), Some(crawl_url)) = (job.pid, job.crawl_url.as_deref()) else {
            return Vec::new();
        };
        let query = build_detail_query(self.backend.table(), pid, crawl_url);
        self.run_query(&query).await
    }
}
