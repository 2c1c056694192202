//! Todo request service
//!
//! Turns one inbound operation into exactly one bounded store call. Path ids
//! and bodies are parsed here, before the store is touched, and the first
//! error ends the operation.

use keeper_core::{deadline_after, HealthStatus, KeeperError, Result, Todo, TodoInput, TodoStore};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Budget for the health probe
pub const HEALTH_TIMEOUT: Duration = Duration::from_secs(1);
/// Budget for every todo operation
pub const STORE_TIMEOUT: Duration = Duration::from_secs(3);

pub struct TodoService {
    store: Arc<dyn TodoStore>,
}

impl TodoService {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }

    /// Probe the store. Failure degrades to an unhealthy status.
    pub async fn health(&self) -> HealthStatus {
        info!("health check");
        let deadline = deadline_after(HEALTH_TIMEOUT);

        match self.store.health_check(deadline).await {
            Ok(()) => HealthStatus::healthy(),
            Err(e) => {
                warn!("store health check failed: {}", e);
                HealthStatus::unhealthy()
            }
        }
    }

    pub async fn list(&self) -> Result<Vec<Todo>> {
        info!("listing todos");
        let deadline = deadline_after(STORE_TIMEOUT);

        self.store
            .list_todos(deadline)
            .await
            .inspect_err(|e| warn!("failed to list todos: {}", e))
    }

    pub async fn get(&self, raw_id: &str) -> Result<Todo> {
        info!("getting todo {}", raw_id);
        let deadline = deadline_after(STORE_TIMEOUT);
        let id = parse_id(raw_id)?;

        self.store
            .get_todo(deadline, id)
            .await
            .inspect_err(|e| warn!("failed to get todo {}: {}", id, e))
    }

    pub async fn create(&self, body: &[u8]) -> Result<Todo> {
        info!("creating todo");
        let deadline = deadline_after(STORE_TIMEOUT);
        let input = parse_body(body)?;

        self.store
            .create_todo(deadline, &input)
            .await
            .inspect_err(|e| warn!("failed to create todo: {}", e))
    }

    /// Returns the submitted fields with `id` attached.
    pub async fn update(&self, raw_id: &str, body: &[u8]) -> Result<Todo> {
        info!("updating todo {}", raw_id);
        let deadline = deadline_after(STORE_TIMEOUT);
        let id = parse_id(raw_id)?;
        let input = parse_body(body)?;

        self.store
            .update_todo(deadline, id, &input)
            .await
            .inspect_err(|e| warn!("failed to update todo {}: {}", id, e))?;

        Ok(Todo::from_input(id, input))
    }

    pub async fn delete(&self, raw_id: &str) -> Result<()> {
        info!("deleting todo {}", raw_id);
        let deadline = deadline_after(STORE_TIMEOUT);
        let id = parse_id(raw_id)?;

        self.store
            .delete_todo(deadline, id)
            .await
            .inspect_err(|e| warn!("failed to delete todo {}: {}", id, e))
    }
}

fn parse_id(raw: &str) -> Result<i64> {
    raw.parse::<i64>().map_err(|e| {
        warn!("invalid todo id {:?}: {}", raw, e);
        KeeperError::InvalidInput(format!("invalid id {:?}: {}", raw, e))
    })
}

fn parse_body(body: &[u8]) -> Result<TodoInput> {
    serde_json::from_slice(body).map_err(|e| {
        warn!("invalid todo body: {}", e);
        KeeperError::from(e)
    })
}
