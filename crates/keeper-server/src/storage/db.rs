//! SQLite database layer (embedded, no external dependencies)

use anyhow::{Context, Result};
use async_trait::async_trait;
use keeper_core::{with_deadline, KeeperError, Todo, TodoInput, TodoStore};
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
};
use sqlx::{Connection, SqlitePool};
use std::str::FromStr;
use std::sync::Arc;
use tokio::time::Instant;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS todos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT,
    description TEXT,
    completed BOOLEAN
)
"#;

/// Path selecting a private in-memory database
pub const MEMORY_PATH: &str = ":memory:";

pub struct Database {
    pool: Arc<SqlitePool>,
}

impl Database {
    pub async fn new(database_path: &str) -> Result<Self> {
        if database_path == MEMORY_PATH {
            return Self::open_in_memory().await;
        }

        tracing::info!("Opening SQLite database at: {}", database_path);

        // Create parent directory if needed
        if let Some(parent) = std::path::Path::new(database_path)
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
        {
            tokio::fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create database directory: {}", parent.display())
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .with_context(|| {
                format!("Failed to connect to SQLite database at: {}", database_path)
            })?;

        Self::from_pool(pool).await
    }

    /// Private in-memory database. A single connection that never expires,
    /// since each SQLite memory connection is its own database.
    pub async fn open_in_memory() -> Result<Self> {
        tracing::info!("Opening in-memory SQLite database");
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .context("Failed to open in-memory SQLite database")?;

        Self::from_pool(pool).await
    }

    async fn from_pool(pool: SqlitePool) -> Result<Self> {
        tracing::info!("SQLite connection established, applying schema...");

        sqlx::query(SCHEMA)
            .execute(&pool)
            .await
            .context("Failed to create todos table")?;

        tracing::info!("Database initialization complete");

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Close every pooled connection. Waits for checked-out connections.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database closed");
    }
}

fn store_error(e: sqlx::Error) -> KeeperError {
    KeeperError::Store(e.to_string())
}

#[async_trait]
impl TodoStore for Database {
    async fn list_todos(&self, deadline: Instant) -> keeper_core::Result<Vec<Todo>> {
        with_deadline(deadline, async {
            let rows: Vec<TodoRow> = sqlx::query_as(
                r#"
                SELECT id, title, description, completed FROM todos
                "#,
            )
            .fetch_all(&*self.pool)
            .await
            .map_err(store_error)?;

            Ok(rows.into_iter().map(Todo::from).collect::<Vec<_>>())
        })
        .await
    }

    async fn get_todo(&self, deadline: Instant, id: i64) -> keeper_core::Result<Todo> {
        with_deadline(deadline, async {
            let row: Option<TodoRow> = sqlx::query_as(
                r#"
                SELECT id, title, description, completed FROM todos WHERE id = ?1
                "#,
            )
            .bind(id)
            .fetch_optional(&*self.pool)
            .await
            .map_err(store_error)?;

            row.map(|r| r.into()).ok_or(KeeperError::NotFound(id))
        })
        .await
    }

    async fn create_todo(&self, deadline: Instant, input: &TodoInput) -> keeper_core::Result<Todo> {
        with_deadline(deadline, async {
            let result = sqlx::query(
                r#"
                INSERT INTO todos (title, description, completed)
                VALUES (?1, ?2, ?3)
                "#,
            )
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.completed)
            .execute(&*self.pool)
            .await
            .map_err(store_error)?;

            Ok(Todo::from_input(result.last_insert_rowid(), input.clone()))
        })
        .await
    }

    async fn update_todo(
        &self,
        deadline: Instant,
        id: i64,
        input: &TodoInput,
    ) -> keeper_core::Result<()> {
        with_deadline(deadline, async {
            let result = sqlx::query(
                r#"
                UPDATE todos SET title = ?1, description = ?2, completed = ?3
                WHERE id = ?4
                "#,
            )
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.completed)
            .bind(id)
            .execute(&*self.pool)
            .await
            .map_err(store_error)?;

            tracing::debug!("updated {} row(s) for todo {}", result.rows_affected(), id);

            if result.rows_affected() == 0 {
                return Err(KeeperError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn delete_todo(&self, deadline: Instant, id: i64) -> keeper_core::Result<()> {
        with_deadline(deadline, async {
            let result = sqlx::query(
                r#"
                DELETE FROM todos WHERE id = ?1
                "#,
            )
            .bind(id)
            .execute(&*self.pool)
            .await
            .map_err(store_error)?;

            tracing::debug!("deleted {} row(s) for todo {}", result.rows_affected(), id);

            if result.rows_affected() == 0 {
                return Err(KeeperError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn health_check(&self, deadline: Instant) -> keeper_core::Result<()> {
        with_deadline(deadline, async {
            let mut conn = self.pool.acquire().await.map_err(store_error)?;
            conn.ping().await.map_err(store_error)
        })
        .await
    }
}

// Helper struct for sqlx query_as
#[derive(sqlx::FromRow)]
struct TodoRow {
    id: i64,
    title: Option<String>,
    description: Option<String>,
    completed: Option<bool>,
}

impl From<TodoRow> for Todo {
    fn from(r: TodoRow) -> Self {
        Todo {
            id: r.id,
            title: r.title.unwrap_or_default(),
            description: r.description.unwrap_or_default(),
            completed: r.completed.unwrap_or_default(),
        }
    }
}
