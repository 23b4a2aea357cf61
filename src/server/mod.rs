//! HTTP boundary for the browser front end.
//!
//! Two JSON/multipart endpoints mirror the library entry points:
//! - `POST /api/analyze` runs a consultation and returns the record
//! - `POST /api/generate-pdf` renders a record into a downloadable PDF
//!
//! plus `GET /health` for liveness probes. State is immutable and shared.

mod error;
mod handlers;
mod routes;

pub use error::ApiError;
pub use routes::create_router;

use crate::config::{AnalysisConfig, ServerConfig};
use crate::error::ClearCueError;
use crate::pipeline::llm::ReplyGenerator;
use std::sync::Arc;
use tracing::info;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<dyn ReplyGenerator>,
    pub config: Arc<AnalysisConfig>,
}

impl AppState {
    pub fn new(generator: Arc<dyn ReplyGenerator>, config: AnalysisConfig) -> Self {
        Self {
            generator,
            config: Arc::new(config),
        }
    }
}

/// Bind `server.addr()` and serve until Ctrl-C.
pub async fn serve(state: AppState, server: &ServerConfig) -> Result<(), ClearCueError> {
    let addr = server.addr();
    let app = create_router(state, server.body_limit_bytes);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| ClearCueError::ServerFailed {
            addr: addr.clone(),
            source,
        })?;
    info!("Starting server at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|source| ClearCueError::ServerFailed { addr, source })?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    // An error here means no signal handler could be installed; serve until killed.
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
