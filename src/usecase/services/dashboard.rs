use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::domain::entities::session::Session;
use crate::domain::query::validate_filter_columns;
use crate::domain::error::DashboardError;
use crate::usecase::ports::backend::DashboardBackend;
use crate::usecase::ports::repo::{PreferenceRepository, RepoError};
use crate::usecase::services::catalog_service::{Catalog, CatalogService};
use crate::usecase::services::chart_service::ChartService;
use crate::usecase::services::filter_service::{self, FilterService};
use crate::usecase::services::history_service::HistoryBridge;
use crate::usecase::services::preference_service::PreferenceService;
use crate::usecase::services::query_service::{PageLoad, QueryService};
use crate::usecase::services::search_service::{SearchPage, SearchService};

#[derive(Debug, Clone, PartialEq)]
pub struct Bootstrap {
    pub catalog: Catalog,
    pub filter_options: BTreeMap<String, Vec<String>>,
    pub page: PageLoad,
    pub search: SearchPage,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome {
    pub saved: bool,
    pub page: PageLoad,
}

/// One interaction cycle per call: mutate the session, then reload the page.
pub struct Dashboard {
    table: String,
    pub catalog: CatalogService,
    pub filters: FilterService,
    pub history: HistoryBridge,
    pub queries: QueryService,
    pub searches: SearchService,
    pub charts: ChartService,
    pub preferences: PreferenceService,
}

impl Dashboard {
    pub fn new(backend: Arc<dyn DashboardBackend>, repo: Arc<dyn PreferenceRepository>) -> Self {
        let history = HistoryBridge::new(backend.clone());
        Self {
            table: backend.table().to_string(),
            catalog: CatalogService::new(backend.clone()),
            filters: FilterService::new(history.clone()),
            history,
            queries: QueryService::new(backend.clone()),
            searches: SearchService::new(backend.clone()),
            charts: ChartService::new(backend),
            preferences: PreferenceService::new(repo),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub async fn bootstrap(&self, session: &mut Session) -> Bootstrap {
        let catalog = self.catalog.load().await;
        session.column_visibility = self
            .preferences
            .column_visibility(&self.table, &catalog.columns);
        self.filters
            .get_active_filters(session, &catalog.columns)
            .await;
        let filter_options = self.catalog.filter_options(&catalog).await;
        let page = self.queries.load_page(session).await;
        let search = self.searches.load_page(session).await;
        info!(
            columns = catalog.columns.len(),
            total_rows = page.descriptor.total_rows,
            postings = search.descriptor.total_rows,
            "dashboard loaded"
        );
        Bootstrap {
            catalog,
            filter_options,
            page,
            search,
        }
    }

    /// Rejects filters on columns outside `known_columns` before anything is
    /// saved or queried. An empty column list (catalog not loaded) skips the check.
    pub async fn apply_filter(
        &self,
        session: &mut Session,
        known_columns: &[String],
        at: DateTime<Utc>,
    ) -> Result<FilterOutcome, DashboardError> {
        debug!(action = "apply_filter", "applying filter");
        if !known_columns.is_empty() {
            validate_filter_columns(&session.filters, known_columns)?;
        }
        session.filter_applied = true;
        session.pagination.reset();
        let saved = self.filters.persist(session, at).await;
        let page = self.queries.load_page(session).await;
        Ok(FilterOutcome { saved, page })
    }

    pub async fn reset_filter(&self, session: &mut Session) -> PageLoad {
        filter_service::reset(session);
        self.queries.load_page(session).await
    }

    pub async fn change_page_size(
        &self,
        session: &mut Session,
        rows_per_page: u32,
    ) -> Result<PageLoad, DashboardError> {
        debug!(action = "page_size", rows_per_page, "changing page size");
        session.pagination.set_rows_per_page(rows_per_page)?;
        Ok(self.queries.load_page(session).await)
    }

    pub async fn change_page(&self, session: &mut Session, page_index: i64) -> PageLoad {
        debug!(action = "page", page_index, "changing page");
        session.pagination.set_page(page_index);
        self.queries.load_page(session).await
    }

    pub async fn search(&self, session: &mut Session, keyword: &str) -> SearchPage {
        debug!(action = "search", keyword, "searching postings");
        session.search_keyword = keyword.trim().to_string();
        session.search_pagination.reset();
        self.searches.load_page(session).await
    }

    pub async fn reset_search(&self, session: &mut Session) -> SearchPage {
        debug!(action = "reset_search", "listing every posting");
        session.search_keyword.clear();
        session.search_pagination.reset();
        self.searches.load_page(session).await
    }

    pub async fn change_search_page_size(
        &self,
        session: &mut Session,
        rows_per_page: u32,
    ) -> Result<SearchPage, DashboardError> {
        debug!(action = "search_page_size", rows_per_page, "changing page size");
        session.search_pagination.set_rows_per_page(rows_per_page)?;
        Ok(self.searches.load_page(session).await)
    }

    pub async fn change_search_page(&self, session: &mut Session, page_index: i64) -> SearchPage {
        debug!(action = "search_page", page_index, "changing page");
        session.search_pagination.set_page(page_index);
        self.searches.load_page(session).await
    }

    pub fn set_column_visible(
        &self,
        session: &mut Session,
        column: &str,
        visible: bool,
    ) -> Result<(), RepoError> {
        session.column_visibility.set(column, visible);
        self.preferences
            .save_column_visibility(&self.table, &session.column_visibility)
    }

    pub fn show_all_columns(&self, session: &mut Session) -> Result<(), RepoError> {
        session.column_visibility.show_all();
        self.preferences
            .save_column_visibility(&self.table, &session.column_visibility)
    }
}
