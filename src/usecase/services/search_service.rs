use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{error, warn};

use crate::domain::entities::job::{JobSummary, Row};
use crate::domain::entities::page::PageDescriptor;
use crate::domain::entities::session::Session;
use crate::usecase::ports::backend::DashboardBackend;

/// A posting found by keyword, with the fields its card was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub job: JobSummary,
    pub row: Row,
}

impl SearchHit {
    fn new(pid: i64, row: Row) -> Self {
        let mut job = JobSummary::from_row(&row);
        job.pid = Some(pid);
        Self { job, row }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchPage {
    pub descriptor: PageDescriptor,
    pub hits: Vec<SearchHit>,
}

/// Keyword search over posting ids, paged on the client.
pub struct SearchService {
    backend: Arc<dyn DashboardBackend>,
}

impl SearchService {
    pub fn new(backend: Arc<dyn DashboardBackend>) -> Self {
        Self { backend }
    }

    pub async fn matching_pids(&self, keyword: &str) -> Vec<i64> {
        match self.backend.search_keyword(keyword).await {
            Ok(pids) => pids,
            Err(err) => {
                error!(operation = "search_keyword", error = %err, keyword, "failed to search postings");
                Vec::new()
            }
        }
    }

    async fn job_informations(&self, pids: &[i64]) -> BTreeMap<i64, Row> {
        match self.backend.job_informations(pids).await {
            Ok(rows) => rows,
            Err(err) => {
                error!(operation = "job_informations", error = %err, "failed to load postings");
                BTreeMap::new()
            }
        }
    }

    /// Searches with the session's keyword, clamps its search page, and loads
    /// the cards of that page in result order.
    pub async fn load_page(&self, session: &mut Session) -> SearchPage {
        let pids = self.matching_pids(&session.search_keyword).await;
        let descriptor = session.search_pagination.describe(pids.len() as u64);
        if descriptor.is_empty() {
            return SearchPage {
                descriptor,
                hits: Vec::new(),
            };
        }

        let start = descriptor.offset() as usize;
        let end = start + descriptor.limit() as usize;
        let page_pids = &pids[start..end];
        let mut rows = self.job_informations(page_pids).await;
        let hits = page_pids
            .iter()
            .filter_map(|pid| match rows.remove(pid) {
                Some(row) => Some(SearchHit::new(*pid, row)),
                None => {
                    warn!(pid, "posting missing from job information");
                    None
                }
            })
            .collect();
        SearchPage { descriptor, hits }
    }

    pub async fn load_job(&self, pid: i64) -> Option<SearchHit> {
        self.job_informations(&[pid])
            .await
            .remove(&pid)
            .map(|row| SearchHit::new(pid, row))
    }
}
