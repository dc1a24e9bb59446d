//! Dashboard web server (enabled by the default `dashboard` feature).
//!
//! Projects the snapshot store and module config as JSON, pushes each
//! refresh tick over SSE, and serves a basic root page.

pub mod handlers;
pub mod sse;
pub mod state;

use std::future::Future;
use std::net::{SocketAddr, TcpListener};

use axum::{
    routing::{get, post, put},
    Router,
};
use tracing::{info, warn};

use crate::utils::error::{Error, Result};
pub use state::DashboardState;

pub fn router(state: DashboardState) -> Router {
    use handlers::*;

    Router::new()
        .route("/", get(root_handler))
        .route("/healthz", get(health))
        .route("/metrics", get(metrics_handler))
        .route("/api/snapshot", get(snapshot_handler))
        .route("/api/overview", get(overview_handler))
        .route("/api/events", get(sse::events_handler))
        .route("/api/clock", get(clock_handler))
        .route("/api/modules", get(modules_handler))
        .route("/api/modules/:id/toggle", post(toggle_module_handler))
        .route("/api/modules/:id/priority", put(module_priority_handler))
        .route("/api/system", get(system_handler))
        .route("/api/system/toggle", post(system_toggle_handler))
        .route("/api/risk-controls", get(risk_controls_handler).put(risk_controls_update_handler))
        .route("/api/risk-controls/reset", post(risk_controls_reset_handler))
        .with_state(state)
}

/// Bind `addr`, falling back to an ephemeral port on the same host when it is
/// unavailable.
pub fn bind(addr: SocketAddr) -> Result<TcpListener> {
    match TcpListener::bind(addr) {
        | Ok(l) => Ok(l),
        | Err(e) => {
            warn!("{} unavailable: {} – binding to random port", addr, e);
            Ok(TcpListener::bind(SocketAddr::new(addr.ip(), 0))?)
        }
    }
}

/// Serve the dashboard on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: DashboardState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let local_addr = listener.local_addr()?;
    info!("Dashboard running at http://{}", local_addr);

    axum::Server::from_tcp(listener)
        .map_err(|e| Error::ServerError(format!("failed to create server from listener: {}", e)))?
        .serve(router(state).into_make_service())
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| Error::ServerError(e.to_string()))
}
