//! In-memory mock of the Clutch listing API
//!
//! Serves `cars` and `properties` with the same wire shapes as the real
//! backend and lets tests inject reorder and load failures.

pub mod api;
pub mod state;

pub use api::{MockError, build_router};
pub use state::{MockState, Table};

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Serve the mock on `addr` until the task is aborted
pub async fn serve(state: Arc<MockState>, addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Mock listing API on http://{}", listener.local_addr()?);
    axum::serve(listener, build_router(state)).await
}

/// Bind an ephemeral localhost port and serve in the background
///
/// Returns the bound address; the server stops when the handle is aborted
/// or the runtime shuts down.
pub async fn spawn(state: Arc<MockState>) -> std::io::Result<(SocketAddr, JoinHandle<()>)> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = build_router(state);

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "Mock server stopped");
        }
    });

    Ok((addr, handle))
}
