//! SQL text for the query endpoint.
//!
//! The backend only accepts a query string, so values are inlined as quoted
//! literals with `'` doubled. Column names are never quoted; callers validate
//! them against the table's column list before building.

use crate::domain::entities::filter::FilterState;
use crate::domain::error::DashboardError;

pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// `column IN (...)` clauses joined by `AND`; `None` when nothing constrains.
pub fn where_clause(filters: Option<&FilterState>) -> Option<String> {
    let clauses = filters?
        .iter()
        .filter(|(_, values)| !values.is_empty())
        .map(|(column, values)| {
            let literals = values
                .iter()
                .map(|value| quote_literal(value))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{column} IN ({literals})")
        })
        .collect::<Vec<_>>();

    if clauses.is_empty() {
        None
    } else {
        Some(clauses.join(" AND "))
    }
}

pub fn build_query(table: &str, filters: Option<&FilterState>, limit: u64, offset: u64) -> String {
    match where_clause(filters) {
        Some(where_sql) => {
            format!("SELECT * FROM {table} WHERE {where_sql} LIMIT {limit} OFFSET {offset}")
        }
        None => format!("SELECT * FROM {table} LIMIT {limit} OFFSET {offset}"),
    }
}

pub fn build_detail_query(table: &str, pid: i64, crawl_url: &str) -> String {
    format!(
        "SELECT * FROM {table} WHERE pid = {pid} AND crawl_url = {}",
        quote_literal(crawl_url)
    )
}

pub fn validate_filter_columns(
    filters: &FilterState,
    known_columns: &[String],
) -> Result<(), DashboardError> {
    match filters
        .columns()
        .find(|column| !known_columns.iter().any(|known| known == column))
    {
        Some(unknown) => Err(DashboardError::InvalidFilterColumn(unknown.to_string())),
        None => Ok(()),
    }
}
