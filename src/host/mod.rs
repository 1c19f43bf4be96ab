//! Static SPA Host
//!
//! Serves the compiled front-end. The browser router uses history-mode URLs,
//! so a reload on `/manage` asks the server for `/manage`: every path in the
//! route table answers with the SPA entry document, everything else is looked
//! up as a static file.
//!
//! ```text
//! GET /manage        → dist/index.html   (route table path)
//! GET /app_bg.wasm   → dist/app_bg.wasm  (static file)
//! GET /unknown       → 404
//! ```

pub mod error;

pub use error::{HostError, HostResult};

use axum::{
    extract::State,
    http::Uri,
    response::Html,
    routing::get,
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::routes::RouteTable;

/// Shared state for the host handlers
#[derive(Debug, Clone)]
pub struct HostState {
    /// Directory holding `index.html` and the wasm bundle
    pub dist_dir: PathBuf,
    pub table: Arc<RouteTable>,
}

impl HostState {
    pub fn new(dist_dir: impl Into<PathBuf>, table: Arc<RouteTable>) -> Self {
        Self {
            dist_dir: dist_dir.into(),
            table,
        }
    }
}

/// Build the host router: one route per table path, static files otherwise
pub fn build_router(state: HostState) -> Router {
    let assets = ServeDir::new(&state.dist_dir);
    let shared_state = Arc::new(state);

    let mut router = Router::new();
    for binding in shared_state.table.bindings() {
        router = router.route(&binding.path, get(spa_entry));
    }

    router
        .fallback_service(assets)
        .layer(TraceLayer::new_for_http())
        .with_state(shared_state)
}

/// Start the host
pub async fn serve(state: HostState, addr: &str) -> HostResult<()> {
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Dashboard available at http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Static host shut down gracefully");
    Ok(())
}

async fn spa_entry(State(state): State<Arc<HostState>>, uri: Uri) -> HostResult<Html<String>> {
    let path = state.dist_dir.join("index.html");
    let html = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| HostError::MissingEntry {
            path,
            error: e.to_string(),
        })?;

    tracing::debug!(path = %uri.path(), "Serving SPA entry");
    Ok(Html(html))
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tempfile::{tempdir, TempDir};
    use tower::util::ServiceExt;

    const INDEX: &str = "<!DOCTYPE html><div id=\"app\"></div>";

    fn create_test_app(with_index: bool) -> (Router, TempDir) {
        let dir = tempdir().unwrap();
        if with_index {
            std::fs::write(dir.path().join("index.html"), INDEX).unwrap();
        }
        std::fs::write(dir.path().join("app.js"), "console.log(1)").unwrap();

        let state = HostState::new(dir.path(), Arc::new(RouteTable::standard()));
        (build_router(state), dir)
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8_lossy(&bytes).to_string())
    }

    #[tokio::test]
    async fn test_table_paths_serve_entry() {
        let (app, _dir) = create_test_app(true);

        for path in ["/", "/resource", "/service", "/synergy", "/manage", "/login"] {
            let (status, body) = get(app.clone(), path).await;
            assert_eq!(status, StatusCode::OK, "path {}", path);
            assert_eq!(body, INDEX);
        }
    }

    #[tokio::test]
    async fn test_static_files_served() {
        let (app, _dir) = create_test_app(true);
        let (status, body) = get(app, "/app.js").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "console.log(1)");
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let (app, _dir) = create_test_app(true);
        let (status, _) = get(app, "/unknown").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_missing_entry_is_500() {
        let (app, _dir) = create_test_app(false);
        let (status, body) = get(app, "/synergy").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.contains("MISSING_ENTRY"));
    }
}
