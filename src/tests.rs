use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use rusqlite::Connection;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::domain::entities::chart::{
    histogram_bins, most_common, share_percent, stack_counts, ChartKind,
};
use crate::domain::entities::filter::{ColumnVisibility, FilterState};
use crate::domain::entities::history::{IdentityScope, SearchHistoryEntry, SessionIdentity};
use crate::domain::entities::job::{JobSummary, Row};
use crate::domain::entities::page::{paginate, Pagination};
use crate::domain::entities::session::{Session, View};
use crate::domain::error::DashboardError;
use crate::domain::query::{build_detail_query, build_query, validate_filter_columns, where_clause};
use crate::infra::config::AppConfig;
use crate::infra::http::backend::HttpBackend;
use crate::infra::http::client::HttpClientConfig;
use crate::infra::http::schema::pid_list_param;
use crate::infra::sqlite::repo::{load_column_visibility, upsert_column_visibility, SqlitePreferences};
use crate::infra::sqlite::schema::init_db;
use crate::usecase::ports::backend::DashboardBackend;
use crate::usecase::ports::repo::{PreferenceRepository, RepoError};
use crate::usecase::services::catalog_service::CatalogService;
use crate::usecase::services::dashboard::Dashboard;
use crate::usecase::services::filter_service::{apply_selection, toggle_value};
use crate::usecase::services::history_service::HistoryBridge;
use crate::usecase::services::preference_service::PreferenceService;
use crate::*;

fn unique_test_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("tech-map-{prefix}-{nanos}"))
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn job_row(pid: i64, company: &str) -> Row {
    let value = json!({
        "pid": pid,
        "crawl_url": format!("https://jobs.example/{pid}"),
        "company_name": company,
        "job_title": "Backend Engineer",
        "dev_stacks": ["Rust", "PostgreSQL"],
        "start_date": "2024-01-01",
        "end_date": "2024-02-01",
    });
    serde_json::from_value(value).expect("row should deserialize")
}

fn fixed_time() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0)
        .single()
        .expect("timestamp should be valid")
}

#[derive(Default)]
struct FakeState {
    columns: Vec<String>,
    total_rows: u64,
    filtered_rows: u64,
    rows: Vec<Row>,
    history: Vec<SearchHistoryEntry>,
    save_fails: bool,
    offline: bool,
    queries: Vec<String>,
    postings: BTreeMap<i64, Row>,
    posting_requests: Vec<Vec<i64>>,
}

#[derive(Default)]
struct FakeBackend {
    state: Mutex<FakeState>,
}

impl FakeBackend {
    fn with_table(columns: &[&str], total_rows: u64) -> Self {
        let backend = FakeBackend::default();
        {
            let mut state = backend.state.lock().expect("state lock");
            state.columns = strings(columns);
            state.total_rows = total_rows;
            state.filtered_rows = total_rows;
            state.rows = vec![job_row(1, "Acme")];
        }
        backend
    }

    fn queries(&self) -> Vec<String> {
        self.state.lock().expect("state lock").queries.clone()
    }

    fn history(&self) -> Vec<SearchHistoryEntry> {
        self.state.lock().expect("state lock").history.clone()
    }

    fn with_postings(count: i64) -> Self {
        let backend = FakeBackend::default();
        {
            let mut state = backend.state.lock().expect("state lock");
            state.postings = (1..=count)
                .map(|pid| {
                    let company = if pid % 2 == 0 { "Globex" } else { "Acme" };
                    (pid, job_row(pid, company))
                })
                .collect();
        }
        backend
    }

    fn posting_requests(&self) -> Vec<Vec<i64>> {
        self.state.lock().expect("state lock").posting_requests.clone()
    }

    fn offline() -> DashboardError {
        DashboardError::unavailable("fake", "offline")
    }
}

#[async_trait]
impl DashboardBackend for FakeBackend {
    async fn column_names(&self) -> Result<Vec<String>, DashboardError> {
        let state = self.state.lock().expect("state lock");
        if state.offline {
            return Err(Self::offline());
        }
        Ok(state.columns.clone())
    }

    async fn row_count(&self, filters: Option<&FilterState>) -> Result<u64, DashboardError> {
        let state = self.state.lock().expect("state lock");
        if state.offline {
            return Err(Self::offline());
        }
        Ok(match filters {
            Some(filters) if filters.has_constraints() => state.filtered_rows,
            _ => state.total_rows,
        })
    }

    async fn unique_values(
        &self,
        column: &str,
        _is_stacked: bool,
    ) -> Result<Vec<String>, DashboardError> {
        Ok(vec![format!("{column}-a"), format!("{column}-b")])
    }

    async fn run_query(&self, query: &str) -> Result<Vec<Row>, DashboardError> {
        let mut state = self.state.lock().expect("state lock");
        if state.offline {
            return Err(Self::offline());
        }
        state.queries.push(query.to_string());
        Ok(state.rows.clone())
    }

    async fn stacked_columns(&self) -> Result<Vec<String>, DashboardError> {
        Ok(vec!["dev_stacks".to_string()])
    }

    async fn dev_stacks(&self) -> Result<Vec<String>, DashboardError> {
        Ok(strings(&["Rust", "Go", "Rust", "Python", "Go", "Rust"]))
    }

    async fn search_keyword(&self, keyword: &str) -> Result<Vec<i64>, DashboardError> {
        let state = self.state.lock().expect("state lock");
        if state.offline {
            return Err(Self::offline());
        }
        Ok(state
            .postings
            .iter()
            .filter(|(_, row)| keyword.is_empty() || row.cell("company_name").contains(keyword))
            .map(|(pid, _)| *pid)
            .collect())
    }

    async fn job_informations(&self, pids: &[i64]) -> Result<BTreeMap<i64, Row>, DashboardError> {
        let mut state = self.state.lock().expect("state lock");
        if state.offline {
            return Err(Self::offline());
        }
        state.posting_requests.push(pids.to_vec());
        Ok(pids
            .iter()
            .filter_map(|pid| state.postings.get(pid).map(|row| (*pid, row.clone())))
            .collect())
    }

    async fn fetch_history(
        &self,
        identity: &SessionIdentity,
    ) -> Result<Vec<SearchHistoryEntry>, DashboardError> {
        let state = self.state.lock().expect("state lock");
        Ok(state
            .history
            .iter()
            .filter(|entry| entry.session_id == identity.session_id)
            .cloned()
            .collect())
    }

    async fn save_history(&self, entry: &SearchHistoryEntry) -> Result<(), DashboardError> {
        let mut state = self.state.lock().expect("state lock");
        if state.save_fails {
            return Err(DashboardError::unavailable("save_history", "status error"));
        }
        state.history.push(entry.clone());
        Ok(())
    }

    async fn delete_history(&self, identity: &SessionIdentity) -> Result<(), DashboardError> {
        let mut state = self.state.lock().expect("state lock");
        state
            .history
            .retain(|entry| entry.session_id != identity.session_id);
        Ok(())
    }

    fn table(&self) -> &str {
        "job_informations"
    }
}

#[derive(Default)]
struct MemoryPreferences {
    tables: Mutex<BTreeMap<String, BTreeMap<String, bool>>>,
    session_id: Mutex<Option<String>>,
}

impl PreferenceRepository for MemoryPreferences {
    fn init(&self) -> Result<(), RepoError> {
        Ok(())
    }

    fn load_column_visibility(&self, table: &str) -> Result<BTreeMap<String, bool>, RepoError> {
        let tables = self
            .tables
            .lock()
            .map_err(|err| RepoError::Message(err.to_string()))?;
        Ok(tables.get(table).cloned().unwrap_or_default())
    }

    fn upsert_column_visibility(
        &self,
        table: &str,
        visibility: &BTreeMap<String, bool>,
    ) -> Result<(), RepoError> {
        let mut tables = self
            .tables
            .lock()
            .map_err(|err| RepoError::Message(err.to_string()))?;
        tables.insert(table.to_string(), visibility.clone());
        Ok(())
    }

    fn load_session_id(&self) -> Result<Option<String>, RepoError> {
        let session_id = self
            .session_id
            .lock()
            .map_err(|err| RepoError::Message(err.to_string()))?;
        Ok(session_id.clone())
    }

    fn store_session_id(&self, session_id: &str) -> Result<(), RepoError> {
        let mut stored = self
            .session_id
            .lock()
            .map_err(|err| RepoError::Message(err.to_string()))?;
        *stored = Some(session_id.to_string());
        Ok(())
    }
}

fn dashboard_over(backend: Arc<FakeBackend>) -> (Dashboard, Arc<MemoryPreferences>) {
    let repo = Arc::new(MemoryPreferences::default());
    (Dashboard::new(backend, repo.clone()), repo)
}

fn anonymous_session() -> Session {
    Session::new(SessionIdentity::anonymous("session-1"))
}

const COLUMNS: [&str; 5] = [
    "company_name",
    "crawl_domain",
    "job_categories",
    "job_title",
    "pid",
];

// Query builder

#[test]
fn build_query_without_filters_has_no_where_clause() {
    let query = build_query("job_informations", None, 10, 0);

    assert_eq!(query, "SELECT * FROM job_informations LIMIT 10 OFFSET 0");
}

#[test]
fn build_query_joins_columns_with_and_and_skips_empty_lists() {
    let filters: FilterState = [
        ("crawl_domain".to_string(), strings(&["wanted", "saramin"])),
        ("job_categories".to_string(), Vec::new()),
        ("company_name".to_string(), strings(&["Acme"])),
    ]
    .into_iter()
    .collect();

    let query = build_query("job_informations", Some(&filters), 25, 50);

    assert_eq!(
        query,
        "SELECT * FROM job_informations WHERE company_name IN ('Acme') AND crawl_domain IN ('wanted', 'saramin') LIMIT 25 OFFSET 50"
    );
}

#[test]
fn where_clause_is_none_when_every_list_is_empty() {
    let filters: FilterState = [("company_name".to_string(), Vec::new())]
        .into_iter()
        .collect();

    assert_eq!(where_clause(Some(&filters)), None);
    assert_eq!(where_clause(Some(&FilterState::new())), None);
}

#[test]
fn build_query_doubles_single_quotes() {
    let filters: FilterState = [("company_name".to_string(), strings(&["O'Reilly"]))]
        .into_iter()
        .collect();

    let query = build_query("t", Some(&filters), 10, 0);

    assert!(query.contains("company_name IN ('O''Reilly')"), "{query}");
}

#[test]
fn build_detail_query_quotes_crawl_url() {
    let query = build_detail_query("job_informations", 42, "https://x.example/?q='a'");

    assert_eq!(
        query,
        "SELECT * FROM job_informations WHERE pid = 42 AND crawl_url = 'https://x.example/?q=''a'''"
    );
}

#[test]
fn validate_filter_columns_reports_first_unknown_column() {
    let filters: FilterState = [("salary".to_string(), strings(&["high"]))]
        .into_iter()
        .collect();

    let result = validate_filter_columns(&filters, &strings(&COLUMNS));

    assert_eq!(
        result,
        Err(DashboardError::InvalidFilterColumn("salary".to_string()))
    );
}

fn split_in_list(query: &str, column: &str) -> Vec<String> {
    let start = query
        .find(&format!("{column} IN ("))
        .expect("column clause should exist")
        + column.len()
        + " IN (".len();
    let end = query[start..].find(") LIMIT").expect("clause should close") + start;
    let inner = &query[start..end];
    let inner = &inner[1..inner.len() - 1];
    inner
        .split("', '")
        .map(|literal| literal.replace("''", "'"))
        .collect()
}

proptest! {
    #[test]
    fn build_query_emits_one_clause_per_non_empty_column(
        map in prop::collection::btree_map(
            "[a-z_]{1,10}",
            prop::collection::vec("[a-z0-9]{1,6}", 0..4),
            1..5,
        )
    ) {
        let filters: FilterState = map.clone().into_iter().collect();
        let query = build_query("t", Some(&filters), 10, 0);
        let non_empty = map.values().filter(|values| !values.is_empty()).count();

        prop_assert_eq!(query.matches(" IN (").count(), non_empty);
        if non_empty > 0 {
            prop_assert_eq!(query.matches(" AND ").count(), non_empty - 1);
        } else {
            prop_assert!(!query.contains("WHERE"));
        }
    }

    #[test]
    fn quoted_values_split_back_into_the_originals(
        values in prop::collection::vec("[a-z']{1,8}", 1..5)
    ) {
        let filters: FilterState = [("company_name".to_string(), values.clone())]
            .into_iter()
            .collect();
        let query = build_query("t", Some(&filters), 10, 0);

        prop_assert_eq!(split_in_list(&query, "company_name"), values);
    }

    #[test]
    fn filter_state_json_round_trips(
        map in prop::collection::btree_map(
            ".{1,10}",
            prop::collection::vec(".{0,8}", 1..4),
            0..5,
        )
    ) {
        let filters: FilterState = map.into_iter().collect();
        let decoded = FilterState::from_json(&filters.to_json()).expect("json should decode");

        prop_assert_eq!(decoded, filters);
    }
}

// Pagination

#[test]
fn paginate_empty_table_yields_empty_page() {
    let descriptor = paginate(0, 10, 7).expect("empty table should not error");

    assert_eq!(descriptor.page_count(), 0);
    assert_eq!(descriptor.page_index, 0);
    assert_eq!(descriptor.offset(), 0);
    assert_eq!(descriptor.limit(), 0);
}

#[test]
fn paginate_last_page_holds_remainder() {
    let descriptor = paginate(95, 25, 3).expect("should paginate");

    assert_eq!(descriptor.page_count(), 4);
    assert_eq!(descriptor.offset(), 75);
    assert_eq!(descriptor.limit(), 20);
}

#[test]
fn paginate_clamps_past_the_last_page() {
    let descriptor = paginate(100, 25, 4).expect("should paginate");

    assert_eq!(descriptor.page_index, 3);
    assert_eq!(descriptor.offset(), 75);
    assert_eq!(descriptor.limit(), 25);
}

#[test]
fn paginate_clamps_negative_pages_to_zero() {
    let descriptor = paginate(30, 10, -2).expect("should paginate");

    assert_eq!(descriptor.page_index, 0);
    assert_eq!((descriptor.offset(), descriptor.limit()), (0, 10));
}

#[test]
fn paginate_rejects_sizes_outside_the_menu() {
    assert_eq!(paginate(10, 7, 0), Err(DashboardError::InvalidPageSize(7)));
    assert_eq!(paginate(10, 0, 0), Err(DashboardError::InvalidPageSize(0)));
}

#[test]
fn thirty_seven_rows_split_into_four_pages() {
    let first = paginate(37, 10, 0).expect("should paginate");
    let last = paginate(37, 10, 3).expect("should paginate");

    assert_eq!(first.page_count(), 4);
    assert_eq!((first.offset(), first.limit()), (0, 10));
    assert_eq!((last.offset(), last.limit()), (30, 7));
}

#[test]
fn changing_page_size_resets_page_index() {
    let mut pagination = Pagination::default();
    pagination.set_page(5);
    pagination
        .set_rows_per_page(50)
        .expect("50 should be a valid size");

    assert_eq!(pagination.page_index(), 0);
    assert_eq!(pagination.page_size().get(), 50);

    pagination.set_page(2);
    assert!(pagination.set_rows_per_page(30).is_err());
    assert_eq!(pagination.page_index(), 2, "rejected size should keep the page");
}

#[test]
fn describe_stores_the_clamped_index() {
    let mut pagination = Pagination::default();
    pagination.set_page(99);

    let descriptor = pagination.describe(37);

    assert_eq!(descriptor.page_index, 3);
    assert_eq!(pagination.page_index(), 3);
}

// Filter state and history

#[test]
fn apply_selection_replaces_and_empty_removes() {
    let known = strings(&COLUMNS);
    let mut state = FilterState::new();

    apply_selection(&mut state, "crawl_domain", strings(&["wanted"]), &known)
        .expect("known column should be accepted");
    apply_selection(&mut state, "crawl_domain", strings(&["saramin"]), &known)
        .expect("known column should be accepted");
    assert_eq!(state.get("crawl_domain"), Some(&["saramin".to_string()][..]));

    apply_selection(&mut state, "crawl_domain", Vec::new(), &known)
        .expect("known column should be accepted");
    assert!(state.is_empty());
}

#[test]
fn apply_selection_rejects_unknown_columns() {
    let mut state = FilterState::new();

    let result = apply_selection(&mut state, "salary", strings(&["high"]), &strings(&COLUMNS));

    assert_eq!(
        result,
        Err(DashboardError::InvalidFilterColumn("salary".to_string()))
    );
    assert!(state.is_empty());
}

#[test]
fn toggle_value_adds_then_removes() {
    let known = strings(&COLUMNS);
    let mut state = FilterState::new();

    toggle_value(&mut state, "job_title", "Backend", &known).expect("should toggle on");
    toggle_value(&mut state, "job_title", "Frontend", &known).expect("should toggle on");
    assert_eq!(
        state.get("job_title"),
        Some(&strings(&["Backend", "Frontend"])[..])
    );

    toggle_value(&mut state, "job_title", "Backend", &known).expect("should toggle off");
    toggle_value(&mut state, "job_title", "Frontend", &known).expect("should toggle off");
    assert!(state.get("job_title").is_none());
}

#[test]
fn identity_scope_never_mixes_user_and_session() {
    let anonymous = SessionIdentity::anonymous("abc");
    let user = SessionIdentity::logged_in("abc", "user-7");
    let missing_user = SessionIdentity {
        session_id: "abc".to_string(),
        user_id: Some(String::new()),
        is_logged_in: true,
    };

    assert_eq!(anonymous.scope(), Ok(IdentityScope::Session("abc")));
    assert_eq!(user.scope(), Ok(IdentityScope::User("user-7")));
    assert_eq!(
        missing_user.scope(),
        Err(DashboardError::MissingIdentity("user_id"))
    );
    assert_eq!(
        SessionIdentity::anonymous("  ").scope(),
        Err(DashboardError::MissingIdentity("session_id"))
    );
}

#[test]
fn history_entry_serializes_filters_and_timestamp() {
    let filters: FilterState = [("crawl_domain".to_string(), strings(&["wanted"]))]
        .into_iter()
        .collect();

    let entry = SearchHistoryEntry::new(&SessionIdentity::anonymous("s1"), &filters, fixed_time());

    assert_eq!(entry.timestamp, "2024-05-01 12:30:00");
    assert_eq!(entry.filters().expect("filters should decode"), filters);
}

#[test]
fn history_entry_accepts_search_term_field() {
    let entry: SearchHistoryEntry = serde_json::from_value(json!({
        "session_id": "s1",
        "user_id": null,
        "is_logged_in": false,
        "search_term": "{\"crawl_domain\": [\"wanted\"]}",
        "timestamp": "2024-05-01 12:30:00",
    }))
    .expect("entry should deserialize");

    let filters = entry.filters().expect("filters should decode");
    assert_eq!(filters.get("crawl_domain"), Some(&strings(&["wanted"])[..]));
}

#[tokio::test]
async fn bootstrap_seeds_filters_from_latest_history_entry() {
    let backend = Arc::new(FakeBackend::with_table(&COLUMNS, 37));
    {
        let mut state = backend.state.lock().expect("state lock");
        let old: FilterState = [("crawl_domain".to_string(), strings(&["saramin"]))]
            .into_iter()
            .collect();
        let latest: FilterState = [
            ("crawl_domain".to_string(), strings(&["wanted"])),
            ("removed_column".to_string(), strings(&["x"])),
        ]
        .into_iter()
        .collect();
        let identity = SessionIdentity::anonymous("session-1");
        state
            .history
            .push(SearchHistoryEntry::new(&identity, &old, fixed_time()));
        state
            .history
            .push(SearchHistoryEntry::new(&identity, &latest, fixed_time()));
    }
    let (dashboard, _) = dashboard_over(backend.clone());
    let mut session = anonymous_session();

    let loaded = dashboard.bootstrap(&mut session).await;

    assert!(session.filters_seeded);
    assert_eq!(
        session.filters.columns().collect::<Vec<_>>(),
        vec!["crawl_domain"]
    );
    assert_eq!(
        session.filters.get("crawl_domain"),
        Some(&strings(&["wanted"])[..])
    );
    assert_eq!(loaded.catalog.columns, strings(&COLUMNS));
    assert_eq!(loaded.filter_options.len(), COLUMNS.len());
    assert_eq!(loaded.page.descriptor.page_count(), 4);
    assert_eq!(
        backend.queries(),
        vec!["SELECT * FROM job_informations LIMIT 10 OFFSET 0".to_string()],
        "seeded filters should not constrain the query until applied"
    );
}

#[tokio::test]
async fn bootstrap_applies_default_column_visibility() {
    let backend = Arc::new(FakeBackend::with_table(&COLUMNS, 5));
    let (dashboard, _) = dashboard_over(backend);
    let mut session = anonymous_session();

    let loaded = dashboard.bootstrap(&mut session).await;

    assert_eq!(
        session.column_visibility.visible_columns(&loaded.catalog.columns),
        strings(&["company_name", "crawl_domain", "job_categories", "job_title"])
    );
}

#[tokio::test]
async fn apply_filter_persists_and_queries_first_page() {
    let backend = Arc::new(FakeBackend::with_table(&COLUMNS, 37));
    backend.state.lock().expect("state lock").filtered_rows = 12;
    let (dashboard, _) = dashboard_over(backend.clone());
    let mut session = anonymous_session();
    dashboard.bootstrap(&mut session).await;
    session.pagination.set_page(3);
    toggle_value(&mut session.filters, "crawl_domain", "wanted", &strings(&COLUMNS))
        .expect("should toggle");

    let outcome = dashboard
        .apply_filter(&mut session, &strings(&COLUMNS), fixed_time())
        .await
        .expect("should apply known columns");

    assert!(outcome.saved);
    assert!(session.apply_last_filter);
    assert_eq!(outcome.page.descriptor.page_index, 0);
    assert_eq!(outcome.page.descriptor.total_rows, 12);
    assert_eq!(
        outcome.page.query.as_deref(),
        Some("SELECT * FROM job_informations WHERE crawl_domain IN ('wanted') LIMIT 10 OFFSET 0")
    );
    let history = backend.history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].timestamp, "2024-05-01 12:30:00");
    assert_eq!(
        history[0].filters().expect("filters should decode"),
        session.filters
    );
}

#[tokio::test]
async fn failed_save_disables_reseeding() {
    let backend = Arc::new(FakeBackend::with_table(&COLUMNS, 37));
    backend.state.lock().expect("state lock").save_fails = true;
    let (dashboard, _) = dashboard_over(backend.clone());
    let mut session = anonymous_session();
    dashboard.bootstrap(&mut session).await;

    let outcome = dashboard
        .apply_filter(&mut session, &strings(&COLUMNS), fixed_time())
        .await
        .expect("should apply an empty filter");

    assert!(!outcome.saved);
    assert!(!session.apply_last_filter);
    assert!(backend.history().is_empty());
}

#[tokio::test]
async fn reset_clears_filters_and_skips_history_seed() {
    let backend = Arc::new(FakeBackend::with_table(&COLUMNS, 37));
    let (dashboard, _) = dashboard_over(backend.clone());
    let mut session = anonymous_session();
    dashboard.bootstrap(&mut session).await;
    toggle_value(&mut session.filters, "job_title", "Backend", &strings(&COLUMNS))
        .expect("should toggle");
    dashboard
        .apply_filter(&mut session, &strings(&COLUMNS), fixed_time())
        .await
        .expect("should apply known columns");
    session.pagination.set_page(2);

    let loaded = dashboard.reset_filter(&mut session).await;

    assert!(session.filters.is_empty());
    assert!(!session.filter_applied);
    assert!(!session.apply_last_filter);
    assert_eq!(loaded.descriptor.page_index, 0);
    assert_eq!(
        loaded.query.as_deref(),
        Some("SELECT * FROM job_informations LIMIT 10 OFFSET 0")
    );

    let active = dashboard
        .filters
        .get_active_filters(&mut session, &strings(&COLUMNS))
        .await;
    assert!(active.is_empty(), "reset should not reseed from history");
}

#[tokio::test]
async fn apply_filter_rejects_unknown_column_without_saving() {
    let backend = Arc::new(FakeBackend::with_table(&COLUMNS, 37));
    let (dashboard, _) = dashboard_over(backend.clone());
    let mut session = anonymous_session();
    dashboard.bootstrap(&mut session).await;
    session
        .filters
        .set("removed_column", strings(&["x"]));

    let result = dashboard
        .apply_filter(&mut session, &strings(&COLUMNS), fixed_time())
        .await;

    assert_eq!(
        result,
        Err(DashboardError::InvalidFilterColumn("removed_column".to_string()))
    );
    assert!(!session.filter_applied);
    assert!(backend.history().is_empty());
    assert_eq!(backend.queries().len(), 1, "only the bootstrap page should be queried");
}

#[tokio::test]
async fn saved_filters_reseed_on_next_launch() {
    let backend = Arc::new(FakeBackend::with_table(&COLUMNS, 37));
    let repo = Arc::new(MemoryPreferences::default());

    let first_launch = Dashboard::new(backend.clone(), repo.clone());
    let mut session = Session::new(first_launch.preferences.session_identity());
    first_launch.bootstrap(&mut session).await;
    toggle_value(&mut session.filters, "crawl_domain", "wanted", &strings(&COLUMNS))
        .expect("should toggle");
    first_launch
        .apply_filter(&mut session, &strings(&COLUMNS), fixed_time())
        .await
        .expect("should apply known columns");

    let second_launch = Dashboard::new(backend.clone(), repo.clone());
    let identity = second_launch.preferences.session_identity();
    assert_eq!(identity, session.identity);
    let mut restarted = Session::new(identity);
    second_launch.bootstrap(&mut restarted).await;

    assert_eq!(
        restarted.filters.get("crawl_domain"),
        Some(&strings(&["wanted"])[..])
    );
}

#[test]
fn absorbed_cycle_keeps_edits_made_while_it_ran() {
    let started_from = anonymous_session();
    let mut cycle = started_from.clone();
    cycle.filters_seeded = true;
    cycle.pagination.set_page(3);
    cycle.search_keyword = "rust".to_string();

    let mut live = started_from.clone();
    live.view = View::Chart;
    live.chart_kind = ChartKind::Bar;
    toggle_value(&mut live.filters, "job_title", "Backend", &strings(&COLUMNS))
        .expect("should toggle");

    live.absorb_cycle(&started_from, cycle);

    assert_eq!(live.view, View::Chart);
    assert_eq!(live.chart_kind, ChartKind::Bar);
    assert_eq!(live.filters.get("job_title"), Some(&strings(&["Backend"])[..]));
    assert!(live.filters_seeded);
    assert_eq!(live.pagination.page_index(), 3);
    assert_eq!(live.search_keyword, "rust");
}

#[tokio::test]
async fn reset_cycle_clears_filters_in_the_live_session() {
    let backend = Arc::new(FakeBackend::with_table(&COLUMNS, 37));
    let (dashboard, _) = dashboard_over(backend);
    let mut started_from = anonymous_session();
    dashboard.bootstrap(&mut started_from).await;
    toggle_value(&mut started_from.filters, "job_title", "Backend", &strings(&COLUMNS))
        .expect("should toggle");
    started_from.filter_applied = true;

    let mut live = started_from.clone();
    let mut cycle = started_from.clone();
    dashboard.reset_filter(&mut cycle).await;
    live.view = View::Chart;

    live.absorb_cycle(&started_from, cycle);

    assert!(live.filters.is_empty());
    assert!(!live.filter_applied);
    assert!(!live.apply_last_filter);
    assert_eq!(live.view, View::Chart);
}

// Keyword search

#[tokio::test]
async fn search_pages_postings_in_result_order() {
    let backend = Arc::new(FakeBackend::with_postings(12));
    let (dashboard, _) = dashboard_over(backend.clone());
    let mut session = anonymous_session();

    let first = dashboard.search(&mut session, "  ").await;

    assert_eq!(session.search_keyword, "");
    assert_eq!(first.descriptor.total_rows, 12);
    assert_eq!(first.descriptor.page_count(), 2);
    let pids = first
        .hits
        .iter()
        .map(|hit| hit.job.pid)
        .collect::<Vec<_>>();
    assert_eq!(pids, (1..=10).map(Some).collect::<Vec<_>>());

    let last = dashboard.change_search_page(&mut session, 7).await;

    assert_eq!(last.descriptor.page_index, 1);
    assert_eq!(last.hits.len(), 2);
    assert_eq!(last.hits[0].job.company_name, "Acme");
    assert_eq!(last.hits[1].job.company_name, "Globex");
    assert_eq!(
        backend.posting_requests(),
        vec![(1..=10).collect::<Vec<_>>(), vec![11, 12]]
    );
}

#[tokio::test]
async fn keyword_search_narrows_results_and_returns_to_first_page() {
    let backend = Arc::new(FakeBackend::with_postings(30));
    let (dashboard, _) = dashboard_over(backend);
    let mut session = anonymous_session();
    dashboard.reset_search(&mut session).await;
    dashboard.change_search_page(&mut session, 2).await;

    let found = dashboard.search(&mut session, "Globex").await;

    assert_eq!(session.search_keyword, "Globex");
    assert_eq!(found.descriptor.page_index, 0);
    assert_eq!(found.descriptor.total_rows, 15);
    assert!(found.hits.iter().all(|hit| hit.job.company_name == "Globex"));

    let resized = dashboard
        .change_search_page_size(&mut session, 25)
        .await
        .expect("25 should be accepted");
    assert_eq!(resized.descriptor.page_count(), 1);
    assert_eq!(
        dashboard.change_search_page_size(&mut session, 30).await,
        Err(DashboardError::InvalidPageSize(30))
    );

    let everything = dashboard.reset_search(&mut session).await;
    assert!(session.search_keyword.is_empty());
    assert_eq!(everything.descriptor.total_rows, 30);
}

#[tokio::test]
async fn search_with_unreachable_backend_is_empty() {
    let backend = Arc::new(FakeBackend::with_postings(5));
    backend.state.lock().expect("state lock").offline = true;
    let (dashboard, _) = dashboard_over(backend.clone());
    let mut session = anonymous_session();

    let found = dashboard.search(&mut session, "Acme").await;

    assert!(found.descriptor.is_empty());
    assert!(found.hits.is_empty());
    assert!(backend.posting_requests().is_empty());
}

#[tokio::test]
async fn load_job_fetches_one_posting() {
    let backend = Arc::new(FakeBackend::with_postings(3));
    let (dashboard, _) = dashboard_over(backend.clone());

    let hit = dashboard.searches.load_job(2).await.expect("posting 2 should exist");

    assert_eq!(hit.job.pid, Some(2));
    assert_eq!(hit.row.cell("company_name"), "Globex");
    assert!(dashboard.searches.load_job(99).await.is_none());
    assert_eq!(backend.posting_requests(), vec![vec![2], vec![99]]);
}

#[tokio::test]
async fn page_size_change_resets_to_first_page() {
    let backend = Arc::new(FakeBackend::with_table(&COLUMNS, 95));
    let (dashboard, _) = dashboard_over(backend);
    let mut session = anonymous_session();
    dashboard.bootstrap(&mut session).await;
    dashboard.change_page(&mut session, 5).await;

    let loaded = dashboard
        .change_page_size(&mut session, 25)
        .await
        .expect("25 should be accepted");

    assert_eq!(loaded.descriptor.page_index, 0);
    assert_eq!(loaded.descriptor.page_count(), 4);
    assert_eq!(
        dashboard.change_page_size(&mut session, 30).await,
        Err(DashboardError::InvalidPageSize(30))
    );
}

#[tokio::test]
async fn change_page_clamps_and_queries_remainder() {
    let backend = Arc::new(FakeBackend::with_table(&COLUMNS, 37));
    let (dashboard, _) = dashboard_over(backend);
    let mut session = anonymous_session();
    dashboard.bootstrap(&mut session).await;

    let loaded = dashboard.change_page(&mut session, 10).await;

    assert_eq!(loaded.descriptor.page_index, 3);
    assert_eq!(session.pagination.page_index(), 3);
    assert_eq!(
        loaded.query.as_deref(),
        Some("SELECT * FROM job_informations LIMIT 7 OFFSET 30")
    );
}

#[tokio::test]
async fn unreachable_backend_renders_empty_table() {
    let backend = Arc::new(FakeBackend::with_table(&COLUMNS, 37));
    backend.state.lock().expect("state lock").offline = true;
    let (dashboard, _) = dashboard_over(backend.clone());
    let mut session = anonymous_session();

    let loaded = dashboard.bootstrap(&mut session).await;

    assert!(loaded.catalog.columns.is_empty());
    assert!(loaded.page.descriptor.is_empty());
    assert!(loaded.page.rows.is_empty());
    assert!(backend.queries().is_empty());
}

#[tokio::test]
async fn column_visibility_changes_are_saved_per_table() {
    let backend = Arc::new(FakeBackend::with_table(&COLUMNS, 3));
    let (dashboard, repo) = dashboard_over(backend);
    let mut session = anonymous_session();
    dashboard.bootstrap(&mut session).await;

    dashboard
        .set_column_visible(&mut session, "job_title", false)
        .expect("should save visibility");

    let stored = repo
        .load_column_visibility("job_informations")
        .expect("should load visibility");
    assert_eq!(stored.get("job_title"), Some(&false));

    dashboard
        .show_all_columns(&mut session)
        .expect("should save visibility");
    let stored = repo
        .load_column_visibility("job_informations")
        .expect("should load visibility");
    assert!(stored.values().all(|visible| *visible));
}

#[tokio::test]
async fn history_delete_clears_the_session_scope() {
    let backend = Arc::new(FakeBackend::with_table(&COLUMNS, 3));
    let bridge = HistoryBridge::new(backend.clone());
    let identity = SessionIdentity::anonymous("session-1");

    assert!(bridge.save(&identity, &FilterState::new(), fixed_time()).await);
    assert!(bridge.latest(&identity).await.is_some());
    assert!(bridge.delete(&identity).await);
    assert!(bridge.latest(&identity).await.is_none());
}

#[tokio::test]
async fn chart_service_returns_most_common_stacks() {
    let backend = Arc::new(FakeBackend::with_table(&COLUMNS, 3));
    let (dashboard, _) = dashboard_over(backend);

    let counts = dashboard.charts.top_stacks().await;

    let pairs = counts
        .iter()
        .map(|entry| (entry.stack.as_str(), entry.count))
        .collect::<Vec<_>>();
    assert_eq!(pairs, vec![("Rust", 3), ("Go", 2), ("Python", 1)]);
}

// Job cards and charts

#[test]
fn job_summary_caps_badges_at_eight() {
    let row: Row = serde_json::from_value(json!({
        "company_name": "Acme",
        "job_title": "Engineer",
        "dev_stacks": "['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i']",
    }))
    .expect("row should deserialize");

    let summary = JobSummary::from_row(&row);

    let badges = summary.stack_badges();
    assert_eq!(badges.len(), 9);
    assert_eq!(badges[7], "h");
    assert_eq!(badges[8], "...");
}

#[test]
fn job_summary_date_label_variants() {
    let mut summary = JobSummary::default();
    assert_eq!(summary.date_label(), "상시모집");

    summary.start_date = "2024-01-01".to_string();
    assert_eq!(summary.date_label(), "2024-01-01");

    summary.end_date = "2024-02-01".to_string();
    assert_eq!(summary.date_label(), "2024-01-01 ~ 2024-02-01");
}

#[test]
fn job_summary_reads_detail_identity() {
    let summary = JobSummary::from_row(&job_row(7, "Acme"));

    assert_eq!(summary.pid, Some(7));
    assert_eq!(summary.crawl_url.as_deref(), Some("https://jobs.example/7"));
    assert_eq!(summary.dev_stacks, strings(&["Rust", "PostgreSQL"]));
}

#[test]
fn row_cells_render_null_as_empty() {
    let row: Row = serde_json::from_value(json!({
        "a": null,
        "b": 3,
        "c": ["x", "y"],
    }))
    .expect("row should deserialize");

    assert_eq!(
        row.project(&strings(&["a", "b", "c", "missing"])),
        strings(&["", "3", "x, y", ""])
    );
}

#[test]
fn stack_counts_break_ties_by_first_appearance() {
    let counts = stack_counts(&strings(&["Go", "Rust", "Go", "Rust", "Java"]));

    let order = counts
        .iter()
        .map(|entry| entry.stack.as_str())
        .collect::<Vec<_>>();
    assert_eq!(order, vec!["Go", "Rust", "Java"]);
    assert_eq!(most_common(&strings(&["a", "b", "a"]), 1).len(), 1);
}

#[test]
fn share_percent_sums_to_one_hundred() {
    let counts = stack_counts(&strings(&["a", "a", "b", "c"]));

    let shares = share_percent(&counts);

    assert_eq!(shares, vec![50.0, 25.0, 25.0]);
}

#[test]
fn histogram_bins_cover_every_value() {
    let bins = histogram_bins(&[1, 2, 2, 3, 10], 3);

    assert_eq!(bins.len(), 3);
    assert_eq!(bins.iter().map(|bin| bin.frequency).sum::<u64>(), 5);
    assert_eq!(bins[0].frequency, 4);
    assert_eq!(bins[2].frequency, 1, "max value lands in the last bin");

    let single = histogram_bins(&[4, 4], 10);
    assert_eq!(single.iter().map(|bin| bin.frequency).sum::<u64>(), 2);
}

// Column visibility persistence

#[test]
fn init_db_creates_column_visibility_table() {
    let temp_dir = unique_test_dir("init-db");
    let db_path = temp_dir.join("preferences.sqlite");

    let result = init_db(&db_path);

    assert!(result.is_ok(), "init_db should succeed: {result:?}");
    let conn = Connection::open(&db_path).expect("should open sqlite db");
    let table_count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'column_visibility'",
            [],
            |row| row.get(0),
        )
        .expect("table count query should succeed");
    assert_eq!(table_count, 1);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn column_visibility_persists_per_table() {
    let temp_dir = unique_test_dir("column-visibility");
    let db_path = temp_dir.join("preferences.sqlite");
    init_db(&db_path).expect("init_db should succeed");

    let mut visibility = BTreeMap::new();
    visibility.insert("job_title".to_string(), true);
    visibility.insert("pid".to_string(), false);
    upsert_column_visibility(&db_path, "job_informations", &visibility)
        .expect("should store column visibility");

    let mut replacement = BTreeMap::new();
    replacement.insert("pid".to_string(), true);
    upsert_column_visibility(&db_path, "job_informations", &replacement)
        .expect("should replace column visibility");

    let loaded =
        load_column_visibility(&db_path, "job_informations").expect("should load visibility");
    let other = load_column_visibility(&db_path, "other_table").expect("should load visibility");

    assert_eq!(loaded, replacement);
    assert!(other.is_empty());

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn stored_visibility_overrides_defaults() {
    let temp_dir = unique_test_dir("preference-service");
    let repo = Arc::new(SqlitePreferences {
        db_path: temp_dir.join("preferences.sqlite"),
    });
    repo.init().expect("init should succeed");
    let service = PreferenceService::new(repo);
    let columns = strings(&["company_name", "pid", "job_title"]);

    let mut visibility = ColumnVisibility::with_defaults(&columns);
    assert_eq!(
        visibility.visible_columns(&columns),
        strings(&["company_name", "job_title"])
    );

    visibility.set("pid", true);
    visibility.set("job_title", false);
    service
        .save_column_visibility("job_informations", &visibility)
        .expect("should save");

    let loaded = service.column_visibility("job_informations", &columns);
    assert_eq!(
        loaded.visible_columns(&columns),
        strings(&["company_name", "pid"])
    );

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn session_id_persists_across_preference_stores() {
    let temp_dir = unique_test_dir("session-id");
    let db_path = temp_dir.join("preferences.sqlite");
    let first = SqlitePreferences {
        db_path: db_path.clone(),
    };
    first.init().expect("init should succeed");
    assert_eq!(first.load_session_id().expect("should load session id"), None);
    let created = PreferenceService::new(Arc::new(first)).session_identity();

    let second = SqlitePreferences {
        db_path: db_path.clone(),
    };
    second.init().expect("init should succeed");
    assert_eq!(
        second.load_session_id().expect("should load session id"),
        Some(created.session_id.clone())
    );
    let reloaded = PreferenceService::new(Arc::new(second)).session_identity();

    assert_eq!(reloaded, created);
    assert!(!reloaded.is_logged_in);
    assert!(!reloaded.session_id.is_empty());

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

// HTTP backend

fn http_backend(server: &MockServer) -> HttpBackend {
    let config = AppConfig {
        api_url: server.uri(),
        database: "jobs".to_string(),
        table: "job_informations".to_string(),
    };
    HttpBackend::new(config, &HttpClientConfig::default()).expect("client should build")
}

#[tokio::test]
async fn save_fails_locally_for_logged_in_user_without_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
        .expect(0)
        .mount(&server)
        .await;
    let bridge = HistoryBridge::new(Arc::new(http_backend(&server)));
    let identity = SessionIdentity {
        session_id: "s1".to_string(),
        user_id: Some(String::new()),
        is_logged_in: true,
    };

    assert!(!bridge.save(&identity, &FilterState::new(), fixed_time()).await);
}

#[tokio::test]
async fn save_fails_locally_for_anonymous_session_without_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
        .expect(0)
        .mount(&server)
        .await;
    let bridge = HistoryBridge::new(Arc::new(http_backend(&server)));

    let saved = bridge
        .save(&SessionIdentity::anonymous(""), &FilterState::new(), fixed_time())
        .await;

    assert!(!saved);
}

#[tokio::test]
async fn save_posts_entry_and_checks_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/history"))
        .and(body_json(json!({
            "session_id": "s1",
            "search_history": "{\"crawl_domain\":[\"wanted\"]}",
            "timestamp": "2024-05-01 12:30:00",
            "user_id": null,
            "is_logged_in": false,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
        .expect(1)
        .mount(&server)
        .await;
    let bridge = HistoryBridge::new(Arc::new(http_backend(&server)));
    let filters: FilterState = [("crawl_domain".to_string(), strings(&["wanted"]))]
        .into_iter()
        .collect();

    assert!(
        bridge
            .save(&SessionIdentity::anonymous("s1"), &filters, fixed_time())
            .await
    );
}

#[tokio::test]
async fn save_reports_failure_on_non_success_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "error"})))
        .mount(&server)
        .await;
    let backend = http_backend(&server);
    let entry = SearchHistoryEntry::new(
        &SessionIdentity::anonymous("s1"),
        &FilterState::new(),
        fixed_time(),
    );

    let result = backend.save_history(&entry).await;

    assert!(
        matches!(result, Err(DashboardError::BackendUnavailable { operation: "save_history", .. })),
        "{result:?}"
    );
}

#[tokio::test]
async fn non_json_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/columns"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;
    let backend = Arc::new(http_backend(&server));

    let result = backend.column_names().await;
    assert!(
        matches!(result, Err(DashboardError::MalformedResponse { operation: "column_names", .. })),
        "{result:?}"
    );

    let catalog = CatalogService::new(backend).load().await;
    assert!(catalog.columns.is_empty());
}

#[tokio::test]
async fn server_error_is_backend_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/row_count"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let backend = http_backend(&server);

    let result = backend.row_count(None).await;

    assert!(
        result
            .as_ref()
            .is_err_and(DashboardError::is_backend_failure),
        "{result:?}"
    );
}

#[tokio::test]
async fn row_count_omits_filters_when_unconstrained() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/row_count"))
        .and(body_json(json!({"database": "jobs", "table": "job_informations"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"row_count": 37})))
        .expect(2)
        .mount(&server)
        .await;
    let backend = http_backend(&server);

    assert_eq!(backend.row_count(None).await, Ok(37));
    assert_eq!(backend.row_count(Some(&FilterState::new())).await, Ok(37));
}

#[tokio::test]
async fn fetch_history_with_empty_body_yields_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/history"))
        .and(query_param("session_id", "s1"))
        .and(query_param("is_logged_in", "false"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    let bridge = HistoryBridge::new(Arc::new(http_backend(&server)));

    let entries = bridge.fetch(&SessionIdentity::anonymous("s1")).await;

    assert!(entries.is_empty());
}

#[tokio::test]
async fn run_query_is_memoized_per_query_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"pid": 1, "company_name": "Acme"}])),
        )
        .expect(1)
        .mount(&server)
        .await;
    let backend = http_backend(&server);
    let query = "SELECT * FROM job_informations LIMIT 10 OFFSET 0";

    let first = backend.run_query(query).await.expect("query should succeed");
    let second = backend.run_query(query).await.expect("query should succeed");

    assert_eq!(first, second);
    assert_eq!(first[0].cell("company_name"), "Acme");
    assert_eq!(backend.cache().len(), 1);
}

#[tokio::test]
async fn run_query_treats_empty_body_as_no_rows() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    let backend = http_backend(&server);

    let rows = backend
        .run_query("SELECT * FROM job_informations WHERE pid = 1 AND crawl_url = 'x'")
        .await
        .expect("empty body should not be an error");

    assert!(rows.is_empty());
}

#[tokio::test]
async fn dev_stacks_is_fetched_with_get() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dev_stacks"))
        .and(query_param("database", "jobs"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"dev_stacks": ["Rust", "Go", "Rust"]})),
        )
        .mount(&server)
        .await;
    let backend = http_backend(&server);

    assert_eq!(
        backend.dev_stacks().await,
        Ok(strings(&["Rust", "Go", "Rust"]))
    );
}

#[tokio::test]
async fn save_reports_failure_when_backend_is_unreachable() {
    let server = MockServer::start().await;
    let backend = http_backend(&server);
    drop(server);
    let bridge = HistoryBridge::new(Arc::new(backend));

    let saved = bridge
        .save(&SessionIdentity::anonymous("s1"), &FilterState::new(), fixed_time())
        .await;

    assert!(!saved);
}

#[tokio::test]
async fn delete_sends_identity_as_query_params() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/history"))
        .and(query_param("session_id", "s1"))
        .and(query_param("is_logged_in", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
        .expect(1)
        .mount(&server)
        .await;
    let bridge = HistoryBridge::new(Arc::new(http_backend(&server)));

    assert!(bridge.delete(&SessionIdentity::anonymous("s1")).await);
}

#[tokio::test]
async fn delete_reports_failure_on_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/history"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    let bridge = HistoryBridge::new(Arc::new(http_backend(&server)));

    assert!(!bridge.delete(&SessionIdentity::anonymous("s1")).await);
}

#[tokio::test]
async fn search_keyword_is_fetched_with_get() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search_keyword"))
        .and(query_param("database", "jobs"))
        .and(query_param("search_keyword", "rust"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": [7, 3, 12]})))
        .expect(1)
        .mount(&server)
        .await;
    let backend = http_backend(&server);

    assert_eq!(backend.search_keyword("rust").await, Ok(vec![7, 3, 12]));
}

#[test]
fn pid_list_param_is_bracketed() {
    assert_eq!(pid_list_param(&[1, 22, 3]), "[1, 22, 3]");
    assert_eq!(pid_list_param(&[]), "[]");
}

#[tokio::test]
async fn job_informations_are_keyed_by_posting_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/job_information"))
        .and(query_param("database", "jobs"))
        .and(query_param("pid_list", "[3, 7]"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "3": {"company_name": "Acme", "job_title": "Backend", "dev_stacks": "['Rust']"},
            "7": {"company_name": "Globex", "job_title": "Frontend", "dev_stacks": []},
        })))
        .expect(1)
        .mount(&server)
        .await;
    let backend = Arc::new(http_backend(&server));

    let rows = backend
        .job_informations(&[3, 7])
        .await
        .expect("should load postings");

    assert_eq!(rows.keys().copied().collect::<Vec<_>>(), vec![3, 7]);
    assert_eq!(rows[&7].cell("company_name"), "Globex");
    let job = JobSummary::from_row(&rows[&3]);
    assert_eq!(job.dev_stacks, strings(&["Rust"]));
}

#[tokio::test]
async fn job_informations_reject_non_numeric_ids() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/job_information"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"abc": {"company_name": "Acme"}})),
        )
        .mount(&server)
        .await;
    let backend = http_backend(&server);

    let result = backend.job_informations(&[1]).await;

    assert!(
        matches!(result, Err(DashboardError::MalformedResponse { operation: "job_informations", .. })),
        "{result:?}"
    );
}

#[test]
fn page_label_is_one_based() {
    assert_eq!(page_label(0), "1");
    assert_eq!(page_label(3), "4");
}
