use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const MAX_STACK_BADGES: usize = 8;
pub const ALWAYS_OPEN_LABEL: &str = "상시모집";

/// One row object returned by the query endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(pub Map<String, Value>);

impl Row {
    pub fn value(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }

    /// Display text for a cell; missing and null cells render empty.
    pub fn cell(&self, column: &str) -> String {
        match self.0.get(column) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(text)) => text.clone(),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(text) => text.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", "),
            Some(other) => other.to_string(),
        }
    }

    pub fn project(&self, columns: &[String]) -> Vec<String> {
        columns.iter().map(|column| self.cell(column)).collect()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// Card view of a job-posting row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobSummary {
    pub pid: Option<i64>,
    pub crawl_url: Option<String>,
    pub company_name: String,
    pub job_title: String,
    pub dev_stacks: Vec<String>,
    pub start_date: String,
    pub end_date: String,
}

impl JobSummary {
    pub fn from_row(row: &Row) -> Self {
        let pid = match row.value("pid") {
            Some(Value::Number(number)) => number.as_i64(),
            Some(Value::String(text)) => text.trim().parse().ok(),
            _ => None,
        };
        let crawl_url = Some(row.cell("crawl_url")).filter(|url| !url.is_empty());

        Self {
            pid,
            crawl_url,
            company_name: row.cell("company_name"),
            job_title: row.cell("job_title"),
            dev_stacks: row.value("dev_stacks").map(parse_stacks).unwrap_or_default(),
            start_date: row.cell("start_date"),
            end_date: row.cell("end_date"),
        }
    }

    pub fn stack_badges(&self) -> Vec<String> {
        if self.dev_stacks.len() <= MAX_STACK_BADGES {
            return self.dev_stacks.clone();
        }
        let mut badges = self.dev_stacks[..MAX_STACK_BADGES].to_vec();
        badges.push("...".to_string());
        badges
    }

    pub fn date_label(&self) -> String {
        let mut label = self.start_date.clone();
        if !self.end_date.is_empty() {
            label.push_str(&format!(" ~ {}", self.end_date));
        }
        if label.is_empty() {
            return ALWAYS_OPEN_LABEL.to_string();
        }
        label
    }
}

/// Stacks arrive either as a JSON array or as a bracketed, comma separated string.
fn parse_stacks(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(text) => Some(text.clone()),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .collect(),
        Value::String(text) => text
            .trim()
            .trim_start_matches('[')
            .trim_end_matches(']')
            .split(',')
            .map(|part| part.trim().trim_matches(|c| c == '\'' || c == '"').trim())
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}
