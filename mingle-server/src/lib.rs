//! HTTP boundary for the Mingle matching engine.
//!
//! Maps the three core read operations onto JSON endpoints over a shared,
//! read-only [`AppState`]:
//!
//! - `GET /` — liveness message.
//! - `GET /match/users/:user_id` — ranked user matches (`top_n`, default 10).
//! - `GET /match/events/:user_id` — ranked event matches (`top_n`, default 5).
//! - `GET /users` — full profile dump for the demo dashboard.
//!
//! The wire shapes live in [`views`]; core types stay serialization-free.
//! CORS is permissive because the demo dashboard is served from another
//! origin.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use mingle_core::{ProfileStore, Scorer};
use thiserror::Error;
use tower_http::cors::CorsLayer;

mod error;
mod routes;
pub mod views;

pub use error::ApiError;

/// Shared, read-only state behind every handler.
pub struct AppState {
    pub(crate) store: ProfileStore,
    pub(crate) scorer: Box<dyn Scorer>,
}

impl AppState {
    /// Bundle a loaded store with the scorer the handlers should use.
    pub fn new(store: ProfileStore, scorer: impl Scorer + 'static) -> Self {
        Self {
            store,
            scorer: Box::new(scorer),
        }
    }
}

/// Assemble the application router over shared state.
#[must_use]
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::root))
        .route("/match/users/:user_id", get(routes::user_matches))
        .route("/match/events/:user_id", get(routes::event_matches))
        .route("/users", get(routes::list_users))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Errors raised while binding and running the server.
#[derive(Debug, Error)]
pub enum ServeError {
    /// Binding the listen address failed.
    #[error("failed to bind {addr}")]
    Bind {
        /// Requested listen address.
        addr: SocketAddr,
        /// Source error from std I/O.
        #[source]
        source: io::Error,
    },
    /// The accept loop terminated with an error.
    #[error("server terminated unexpectedly")]
    Serve {
        /// Source error from std I/O.
        #[source]
        source: io::Error,
    },
}

/// Bind `addr` and serve requests until the process is stopped.
///
/// # Errors
/// Returns [`ServeError`] when the address cannot be bound or the accept
/// loop fails.
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<(), ServeError> {
    let app = build_router(Arc::new(state));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServeError::Bind { addr, source })?;
    tracing::info!("listening on {addr}");
    axum::serve(listener, app)
        .await
        .map_err(|source| ServeError::Serve { source })
}
