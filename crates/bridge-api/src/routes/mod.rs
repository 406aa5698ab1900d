//! Route definitions

use axum::{routing::get, Router};

use crate::handlers::{health, servers};
use crate::state::AppState;

/// Create the status router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .merge(server_routes())
}

fn server_routes() -> Router<AppState> {
    Router::new()
        .route("/servers", get(servers::list_servers))
        .route("/servers/:index", get(servers::get_server))
        .route("/servers/:index/history/:kind", get(servers::get_history))
}
