use dashmap::DashMap;

use crate::domain::entities::job::Row;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub endpoint: String,
    pub database: String,
    pub query: String,
}

/// Successful query results keyed by their request arguments. Entries live
/// for the rest of the process.
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: DashMap<QueryKey, Vec<Row>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &QueryKey) -> Option<Vec<Row>> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    pub fn insert(&self, key: QueryKey, rows: Vec<Row>) {
        self.entries.insert(key, rows);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
