//! Request and response bodies for each backend endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::entities::filter::FilterState;

#[derive(Debug, Serialize)]
pub struct TableRequest<'a> {
    pub database: &'a str,
    pub table: &'a str,
}

#[derive(Debug, Serialize)]
pub struct RowCountRequest<'a> {
    pub database: &'a str,
    pub table: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<&'a FilterState>,
}

#[derive(Debug, Serialize)]
pub struct UniqueValuesRequest<'a> {
    pub database: &'a str,
    pub table: &'a str,
    pub column: &'a str,
    pub is_stacked: bool,
}

#[derive(Debug, Serialize)]
pub struct QueryRequest<'a> {
    pub database: &'a str,
    pub query: &'a str,
}

#[derive(Debug, Serialize)]
pub struct SaveHistoryRequest<'a> {
    pub session_id: &'a str,
    pub search_history: &'a str,
    pub timestamp: &'a str,
    pub user_id: Option<&'a str>,
    pub is_logged_in: bool,
}

#[derive(Debug, Deserialize)]
pub struct ColumnNamesResponse {
    pub column_names: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct RowCountResponse {
    pub row_count: u64,
}

#[derive(Debug, Deserialize)]
pub struct UniqueValuesResponse {
    pub unique_values: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub struct StackedColumnsResponse {
    pub stacked_columns: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct DevStacksResponse {
    pub dev_stacks: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchKeywordResponse {
    pub result: Vec<i64>,
}

#[derive(Debug, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

/// Distinct values may come back as numbers; nulls are not selectable.
pub fn value_labels(values: Vec<Value>) -> Vec<String> {
    values
        .into_iter()
        .filter_map(|value| match value {
            Value::Null => None,
            Value::String(text) => Some(text),
            other => Some(other.to_string()),
        })
        .collect()
}

/// The job-information endpoint takes the id list as one bracketed parameter.
pub fn pid_list_param(pids: &[i64]) -> String {
    let joined = pids
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{joined}]")
}
