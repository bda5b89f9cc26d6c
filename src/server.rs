use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tracing::{error, info};

use crate::aggregate::aggregate;
use crate::providers::Provider;
use crate::render::Template;

/// Everything a request needs. Built once at startup and never mutated.
pub struct AppState {
    pub providers: Vec<Box<dyn Provider>>,
    pub template: Template,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new().route("/", get(index)).with_state(state)
}

async fn index(State(state): State<Arc<AppState>>) -> Response {
    match aggregate(&state.providers).await {
        Ok(issues) => {
            info!(
                assignees = issues.len(),
                issues = issues.issue_count(),
                "rendering issue table"
            );
            Html(state.template.render(&issues)).into_response()
        }
        Err(e) => {
            error!("Failed to fetch Redmine issues: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to fetch Redmine issues: {e}"),
            )
                .into_response()
        }
    }
}

pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let source_count = state.providers.len();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(%addr, sources = source_count, "Starting server");

    axum::serve(listener, router(Arc::new(state)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server failed")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}
