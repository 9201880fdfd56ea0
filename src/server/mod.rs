//! HTTP boundary for the user-posts service.
//!
//! Provides the axum router exposing `GET /v1/user-posts/:user_id` and the
//! serve loop with graceful shutdown on Ctrl-C.

pub mod handlers;

use crate::aggregator::UserPostsAggregator;
use crate::upstream::HttpTransport;
use anyhow::{Context, Result};
use axum::{routing::get, Router};
use tracing::info;

/// Build the application router.
pub fn router<T: HttpTransport + 'static>(aggregator: UserPostsAggregator<T>) -> Router {
    Router::new()
        .route("/v1/user-posts/:user_id", get(handlers::get_user_posts::<T>))
        .with_state(aggregator)
}

/// Bind `listen_addr` and serve `app` until Ctrl-C.
pub async fn serve(listen_addr: &str, app: Router) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", listen_addr))?;

    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
