use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::error;

use crate::usecase::ports::backend::DashboardBackend;

/// Column metadata for the configured table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub columns: Vec<String>,
    pub stacked_columns: Vec<String>,
}

impl Catalog {
    pub fn is_stacked(&self, column: &str) -> bool {
        self.stacked_columns.iter().any(|stacked| stacked == column)
    }
}

pub struct CatalogService {
    backend: Arc<dyn DashboardBackend>,
}

impl CatalogService {
    pub fn new(backend: Arc<dyn DashboardBackend>) -> Self {
        Self { backend }
    }

    pub async fn load(&self) -> Catalog {
        let columns = match self.backend.column_names().await {
            Ok(columns) => columns,
            Err(err) => {
                error!(operation = "column_names", error = %err, "failed to load column names");
                Vec::new()
            }
        };
        let stacked_columns = match self.backend.stacked_columns().await {
            Ok(columns) => columns,
            Err(err) => {
                error!(operation = "stacked_columns", error = %err, "failed to load stacked columns");
                Vec::new()
            }
        };
        Catalog {
            columns,
            stacked_columns,
        }
    }

    pub async fn unique_values(&self, catalog: &Catalog, column: &str) -> Vec<String> {
        match self
            .backend
            .unique_values(column, catalog.is_stacked(column))
            .await
        {
            Ok(values) => values,
            Err(err) => {
                error!(operation = "unique_values", error = %err, column, "failed to load unique values");
                Vec::new()
            }
        }
    }

    /// Selectable values for every column, in column order.
    pub async fn filter_options(&self, catalog: &Catalog) -> BTreeMap<String, Vec<String>> {
        let mut options = BTreeMap::new();
        for column in &catalog.columns {
            options.insert(column.clone(), self.unique_values(catalog, column).await);
        }
        options
    }
}
