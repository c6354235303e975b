use std::collections::BTreeMap;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::domain::entities::filter::FilterState;
use crate::domain::entities::history::{SearchHistoryEntry, SessionIdentity};
use crate::domain::entities::job::Row;
use crate::domain::error::DashboardError;
use crate::infra::config::AppConfig;
use crate::infra::http::cache::{QueryCache, QueryKey};
use crate::infra::http::client::{create_client, HttpClientConfig};
use crate::infra::http::schema::{
    pid_list_param, value_labels, ColumnNamesResponse, DevStacksResponse, QueryRequest,
    RowCountRequest, RowCountResponse, SaveHistoryRequest, SearchKeywordResponse,
    StackedColumnsResponse, StatusResponse, TableRequest, UniqueValuesRequest,
    UniqueValuesResponse,
};
use crate::usecase::ports::backend::DashboardBackend;

pub struct HttpBackend {
    client: Client,
    config: AppConfig,
    cache: QueryCache,
}

impl HttpBackend {
    pub fn new(config: AppConfig, client_config: &HttpClientConfig) -> Result<Self> {
        Ok(Self {
            client: create_client(client_config)?,
            config,
            cache: QueryCache::new(),
        })
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    async fn post_json<B, T>(
        &self,
        operation: &'static str,
        path: &str,
        body: &B,
    ) -> Result<T, DashboardError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.config.endpoint(path);
        debug!(operation, url = %url, "POST");
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|err| DashboardError::unavailable(operation, err.to_string()))?;
        read_json(operation, response).await
    }

    async fn get_json<T>(
        &self,
        operation: &'static str,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, DashboardError>
    where
        T: DeserializeOwned,
    {
        let url = self.config.endpoint(path);
        debug!(operation, url = %url, "GET");
        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|err| DashboardError::unavailable(operation, err.to_string()))?;
        read_json(operation, response).await
    }

    fn table_request(&self) -> TableRequest<'_> {
        TableRequest {
            database: &self.config.database,
            table: &self.config.table,
        }
    }
}

fn identity_params(identity: &SessionIdentity) -> [(&'static str, String); 3] {
    [
        ("session_id", identity.session_id.clone()),
        ("user_id", identity.user_id.clone().unwrap_or_default()),
        ("is_logged_in", identity.is_logged_in.to_string()),
    ]
}

async fn read_body(operation: &'static str, response: Response) -> Result<String, DashboardError> {
    let status = response.status();
    if !status.is_success() {
        return Err(DashboardError::unavailable(
            operation,
            format!("unexpected status {status}"),
        ));
    }
    response
        .text()
        .await
        .map_err(|err| DashboardError::unavailable(operation, err.to_string()))
}

async fn read_json<T: DeserializeOwned>(
    operation: &'static str,
    response: Response,
) -> Result<T, DashboardError> {
    let body = read_body(operation, response).await?;
    if body.trim().is_empty() {
        return Err(DashboardError::malformed(operation, "empty body"));
    }
    serde_json::from_str(&body).map_err(|err| DashboardError::malformed(operation, err.to_string()))
}

#[async_trait]
impl DashboardBackend for HttpBackend {
    async fn column_names(&self) -> Result<Vec<String>, DashboardError> {
        let response: ColumnNamesResponse = self
            .post_json("column_names", "columns", &self.table_request())
            .await?;
        Ok(response.column_names)
    }

    async fn row_count(&self, filters: Option<&FilterState>) -> Result<u64, DashboardError> {
        let request = RowCountRequest {
            database: &self.config.database,
            table: &self.config.table,
            filters: filters.filter(|filters| filters.has_constraints()),
        };
        let response: RowCountResponse = self.post_json("row_count", "row_count", &request).await?;
        Ok(response.row_count)
    }

    async fn unique_values(
        &self,
        column: &str,
        is_stacked: bool,
    ) -> Result<Vec<String>, DashboardError> {
        let request = UniqueValuesRequest {
            database: &self.config.database,
            table: &self.config.table,
            column,
            is_stacked,
        };
        let response: UniqueValuesResponse = self
            .post_json("unique_values", "unique_values", &request)
            .await?;
        Ok(value_labels(response.unique_values))
    }

    async fn run_query(&self, query: &str) -> Result<Vec<Row>, DashboardError> {
        let key = QueryKey {
            endpoint: self.config.endpoint("query"),
            database: self.config.database.clone(),
            query: query.to_string(),
        };
        if let Some(rows) = self.cache.get(&key) {
            debug!(operation = "run_query", "serving memoized rows");
            return Ok(rows);
        }

        let request = QueryRequest {
            database: &self.config.database,
            query,
        };
        debug!(operation = "run_query", url = %key.endpoint, "POST");
        let response = self
            .client
            .post(&key.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|err| DashboardError::unavailable("run_query", err.to_string()))?;
        let body = read_body("run_query", response).await?;

        // An empty body means the query matched nothing.
        let rows = if body.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str::<Option<Vec<Row>>>(&body)
                .map_err(|err| DashboardError::malformed("run_query", err.to_string()))?
                .unwrap_or_default()
        };
        self.cache.insert(key, rows.clone());
        Ok(rows)
    }

    async fn stacked_columns(&self) -> Result<Vec<String>, DashboardError> {
        let response: StackedColumnsResponse = self
            .post_json("stacked_columns", "stacked_columns", &self.table_request())
            .await?;
        Ok(response.stacked_columns)
    }

    async fn dev_stacks(&self) -> Result<Vec<String>, DashboardError> {
        let response: DevStacksResponse = self
            .get_json(
                "dev_stacks",
                "dev_stacks",
                &[("database", self.config.database.clone())],
            )
            .await?;
        Ok(response.dev_stacks)
    }

    async fn search_keyword(&self, keyword: &str) -> Result<Vec<i64>, DashboardError> {
        let response: SearchKeywordResponse = self
            .get_json(
                "search_keyword",
                "search_keyword",
                &[
                    ("database", self.config.database.clone()),
                    ("search_keyword", keyword.to_string()),
                ],
            )
            .await?;
        Ok(response.result)
    }

    async fn job_informations(&self, pids: &[i64]) -> Result<BTreeMap<i64, Row>, DashboardError> {
        // JSON object keys are the ids rendered as strings.
        let response: BTreeMap<String, Row> = self
            .get_json(
                "job_informations",
                "job_information",
                &[
                    ("database", self.config.database.clone()),
                    ("pid_list", pid_list_param(pids)),
                ],
            )
            .await?;
        response
            .into_iter()
            .map(|(pid, row)| {
                pid.trim()
                    .parse::<i64>()
                    .map(|pid| (pid, row))
                    .map_err(|_| {
                        DashboardError::malformed("job_informations", format!("bad posting id {pid:?}"))
                    })
            })
            .collect()
    }

    async fn fetch_history(
        &self,
        identity: &SessionIdentity,
    ) -> Result<Vec<SearchHistoryEntry>, DashboardError> {
        self.get_json("fetch_history", "history", &identity_params(identity))
            .await
    }

    async fn save_history(&self, entry: &SearchHistoryEntry) -> Result<(), DashboardError> {
        let request = SaveHistoryRequest {
            session_id: &entry.session_id,
            search_history: &entry.filter_state,
            timestamp: &entry.timestamp,
            user_id: entry.user_id.as_deref(),
            is_logged_in: entry.is_logged_in,
        };
        let response: StatusResponse = self.post_json("save_history", "history", &request).await?;
        if response.status == "success" {
            Ok(())
        } else {
            Err(DashboardError::unavailable(
                "save_history",
                format!("backend reported status {:?}", response.status),
            ))
        }
    }

    async fn delete_history(&self, identity: &SessionIdentity) -> Result<(), DashboardError> {
        let url = self.config.endpoint("history");
        debug!(operation = "delete_history", url = %url, "DELETE");
        let response = self
            .client
            .delete(&url)
            .query(&identity_params(identity))
            .send()
            .await
            .map_err(|err| DashboardError::unavailable("delete_history", err.to_string()))?;
        read_body("delete_history", response).await.map(|_| ())
    }

    fn table(&self) -> &str {
        &self.config.table
    }
}
