//! Storage traits for persistence

use crate::Result;
use async_trait::async_trait;
use keeper_types::{Todo, TodoInput};
use tokio::time::Instant;

/// Todo store
///
/// Every call is bounded by an absolute deadline supplied by the caller.
/// Implementations fail with `KeeperError::Timeout` once it passes.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// All rows in storage order; empty when the table is empty.
    async fn list_todos(&self, deadline: Instant) -> Result<Vec<Todo>>;

    /// The row with `id`, or `KeeperError::NotFound`.
    async fn get_todo(&self, deadline: Instant, id: i64) -> Result<Todo>;

    /// Insert a new row and return it with its store-assigned id.
    async fn create_todo(&self, deadline: Instant, input: &TodoInput) -> Result<Todo>;

    /// Overwrite title, description and completed of the row with `id`.
    async fn update_todo(&self, deadline: Instant, id: i64, input: &TodoInput) -> Result<()>;

    /// Physically remove the row with `id`.
    async fn delete_todo(&self, deadline: Instant, id: i64) -> Result<()>;

    /// Connectivity probe.
    async fn health_check(&self, deadline: Instant) -> Result<()>;
}
