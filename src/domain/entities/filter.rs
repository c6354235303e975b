use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Columns shown when no stored preference exists for a column.
pub const DEFAULT_VISIBLE_COLUMNS: [&str; 6] = [
    "job_title",
    "job_categories",
    "end_date",
    "crawl_domain",
    "company_name",
    "start_date",
];

/// Column name -> selected values. An absent column places no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterState(BTreeMap<String, Vec<String>>);

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> String {
        // A string-keyed map of string lists always serializes.
        serde_json::to_string(&self.0).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn get(&self, column: &str) -> Option<&[String]> {
        self.0.get(column).map(Vec::as_slice)
    }

    pub fn set(&mut self, column: impl Into<String>, values: Vec<String>) {
        self.0.insert(column.into(), values);
    }

    pub fn remove(&mut self, column: &str) -> Option<Vec<String>> {
        self.0.remove(column)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn retain_columns(&mut self, columns: &[String]) {
        self.0.retain(|column, _| columns.contains(column));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when at least one column carries a non-empty selection.
    pub fn has_constraints(&self) -> bool {
        self.0.values().any(|values| !values.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.0.iter()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl FromIterator<(String, Vec<String>)> for FilterState {
    fn from_iter<T: IntoIterator<Item = (String, Vec<String>)>>(iter: T) -> Self {
        FilterState(iter.into_iter().collect())
    }
}

/// Which columns are rendered per row. Never feeds the `WHERE` clause.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnVisibility(BTreeMap<String, bool>);

impl ColumnVisibility {
    pub fn with_defaults(columns: &[String]) -> Self {
        ColumnVisibility(
            columns
                .iter()
                .map(|column| {
                    let visible = DEFAULT_VISIBLE_COLUMNS.contains(&column.as_str());
                    (column.clone(), visible)
                })
                .collect(),
        )
    }

    /// Stored entries win; columns without one fall back to the defaults.
    /// Stored entries for columns that no longer exist are dropped.
    pub fn merged(columns: &[String], stored: &BTreeMap<String, bool>) -> Self {
        let mut visibility = Self::with_defaults(columns);
        for (column, visible) in visibility.0.iter_mut() {
            if let Some(saved) = stored.get(column) {
                *visible = *saved;
            }
        }
        visibility
    }

    pub fn is_visible(&self, column: &str) -> bool {
        self.0.get(column).copied().unwrap_or(false)
    }

    pub fn set(&mut self, column: impl Into<String>, visible: bool) {
        self.0.insert(column.into(), visible);
    }

    pub fn show_all(&mut self) {
        for visible in self.0.values_mut() {
            *visible = true;
        }
    }

    /// Visible columns in the order of `columns`.
    pub fn visible_columns(&self, columns: &[String]) -> Vec<String> {
        columns
            .iter()
            .filter(|column| self.is_visible(column))
            .cloned()
            .collect()
    }

    pub fn as_map(&self) -> &BTreeMap<String, bool> {
        &self.0
    }
}
