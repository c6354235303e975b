use std::sync::Arc;

use tracing::error;

use crate::domain::entities::chart::{most_common, StackCount, TOP_STACKS};
use crate::usecase::ports::backend::DashboardBackend;

pub struct ChartService {
    backend: Arc<dyn DashboardBackend>,
}

impl ChartService {
    pub fn new(backend: Arc<dyn DashboardBackend>) -> Self {
        Self { backend }
    }

    pub async fn top_stacks(&self) -> Vec<StackCount> {
        match self.backend.dev_stacks().await {
            Ok(stacks) => most_common(&stacks, TOP_STACKS),
            Err(err) => {
                error!(operation = "dev_stacks", error = %err, "failed to load dev stacks");
                Vec::new()
            }
        }
    }
}
