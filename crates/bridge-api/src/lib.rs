//! # bridge-api
//!
//! Process wiring for the bridge and a small read-only status API built
//! with Axum.

pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{build_runtime, build_sink, create_app, run};
pub use state::AppState;
