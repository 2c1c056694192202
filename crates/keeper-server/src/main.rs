//! Keeper Server
//!
//! Serves a persisted todo list over HTTP with JSON bodies.
//!
//! Uses SQLite (embedded) as the only store.

mod config;
mod handlers;
mod services;
mod storage;

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use std::sync::Arc;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use config::Config;
use services::TodoService;
use storage::Database;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub todo_service: Arc<TodoService>,
}

#[tokio::main]
async fn main() {
    // Set up panic hook to log crashes
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()));
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        eprintln!("[PANIC] at {:?}: {}", location, payload);
        tracing::error!("PANIC at {:?}: {}", location, payload);
    }));

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Starting Keeper Server v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_server().await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server() -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    info!(
        "Config loaded: bind={}, db={}",
        config.bind_address, config.database_path
    );

    let db = Arc::new(
        Database::new(&config.database_path)
            .await
            .context("Failed to initialize database")?,
    );

    let state = AppState {
        todo_service: Arc::new(TodoService::new(db.clone())),
    };
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address)
        .await
        .context("Failed to bind to address")?;
    info!("Server listening on http://{}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    db.close().await;
    info!("Server stopped");

    Ok(())
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health))
        .route(
            "/todo",
            get(handlers::todos::list).post(handlers::todos::create),
        )
        .route(
            "/todo/:id",
            get(handlers::todos::get)
                .put(handlers::todos::update)
                .delete(handlers::todos::delete),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, shutting down...");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use tower::ServiceExt;

    async fn setup() -> (Router, Arc<Database>) {
        let db = Arc::new(Database::open_in_memory().await.unwrap());
        let state = AppState {
            todo_service: Arc::new(TodoService::new(db.clone())),
        };
        (build_router(state), db)
    }

    fn request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    const SINGLE_TODO: &str =
        r#"{"Id":1,"Title":"Test todo","Description":"Test description","Completed":false}"#;

    #[tokio::test]
    async fn test_end_to_end() {
        let (app, _db) = setup().await;

        // Create todo
        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/todo",
                r#"{"Title":"Test todo","Description":"Test description","Completed":false}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, SINGLE_TODO);

        // List todos
        let response = app
            .clone()
            .oneshot(request("GET", "/todo", ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, format!("[{}]", SINGLE_TODO));

        // Get it back
        let response = app.oneshot(request("GET", "/todo/1", "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, SINGLE_TODO);
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _db) = setup().await;

        let response = app.oneshot(request("GET", "/", "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, r#"{"message":"It's healthy"}"#);
    }

    #[tokio::test]
    async fn test_health_unavailable_when_store_closed() {
        let (app, db) = setup().await;
        db.close().await;

        let response = app.oneshot(request("GET", "/", "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body_string(response).await, r#"{"message":"It's unhealthy"}"#);
    }

    #[tokio::test]
    async fn test_list_empty_is_array() {
        let (app, _db) = setup().await;

        let response = app.oneshot(request("GET", "/todo", "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "[]");
    }

    #[tokio::test]
    async fn test_create_with_lowercase_fields_ignores_id() {
        let (app, _db) = setup().await;

        let response = app
            .oneshot(request(
                "POST",
                "/todo",
                r#"{"id": 50, "title": "Test todo", "description": "Test description"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, SINGLE_TODO);
    }

    #[tokio::test]
    async fn test_update_then_get() {
        let (app, _db) = setup().await;
        app.clone()
            .oneshot(request("POST", "/todo", r#"{"Title":"Test todo"}"#))
            .await
            .unwrap();

        let updated = r#"{"Id":1,"Title":"Done","Description":"all of it","Completed":true}"#;
        let response = app
            .clone()
            .oneshot(request(
                "PUT",
                "/todo/1",
                r#"{"Title":"Done","Description":"all of it","Completed":true}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, updated);

        let response = app.oneshot(request("GET", "/todo/1", "")).await.unwrap();
        assert_eq!(body_string(response).await, updated);
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let (app, _db) = setup().await;
        app.clone()
            .oneshot(request("POST", "/todo", r#"{"Title":"Test todo"}"#))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(request("DELETE", "/todo/1", ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "deleted.");

        let response = app
            .clone()
            .oneshot(request("GET", "/todo/1", ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app.oneshot(request("GET", "/todo", "")).await.unwrap();
        assert_eq!(body_string(response).await, "[]");
    }

    #[tokio::test]
    async fn test_error_statuses() {
        let (app, _db) = setup().await;

        let cases = [
            ("GET", "/todo/abc", "", StatusCode::BAD_REQUEST),
            ("GET", "/todo/42", "", StatusCode::NOT_FOUND),
            ("POST", "/todo", "{broken", StatusCode::BAD_REQUEST),
            ("PUT", "/todo/42", r#"{"Title":"x"}"#, StatusCode::NOT_FOUND),
            ("PUT", "/todo/1", r#""text""#, StatusCode::BAD_REQUEST),
            ("DELETE", "/todo/42", "", StatusCode::NOT_FOUND),
            ("DELETE", "/todo/x", "", StatusCode::BAD_REQUEST),
        ];

        for (method, uri, body, expected) in cases {
            let response = app
                .clone()
                .oneshot(request(method, uri, body))
                .await
                .unwrap();
            assert_eq!(response.status(), expected, "{} {}", method, uri);
        }
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let (app, _db) = setup().await;

        let response = app.oneshot(request("GET", "/todo/42", "")).await.unwrap();
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["status"], 404);
        assert_eq!(body["error"], "Todo not found: 42");
    }

    #[tokio::test]
    async fn test_store_failure_is_internal_error() {
        let (app, db) = setup().await;
        db.close().await;

        let response = app.oneshot(request("GET", "/todo", "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
