//! Server status handlers
//!
//! Read-only views over the runtime: connectivity, cached metadata and the
//! rolling event history of each configured server.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use bridge_cache::HistoryCounts;
use bridge_core::events::ParseEventKindError;
use bridge_core::{DomainEvent, EventKind};
use bridge_gateway::{ConnectionState, ServerConnection};
use serde::{Deserialize, Serialize};

use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Status of one configured server
#[derive(Debug, Serialize)]
pub struct ServerStatus {
    pub index: usize,
    pub endpoint: String,
    pub name: String,
    pub state: ConnectionState,
    pub history: HistoryCounts,
    pub cached_players: usize,
}

impl ServerStatus {
    fn new(index: usize, server: &ServerConnection) -> Self {
        Self {
            index,
            endpoint: server.endpoint().to_string(),
            name: server.server_name(),
            state: server.state(),
            history: server.history().counts(),
            cached_players: server.directory().len(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

fn server_at(state: &AppState, index: usize) -> ApiResult<Arc<ServerConnection>> {
    state
        .runtime()
        .connection_at(index)
        .ok_or(ApiError::ServerNotFound(index))
}

/// GET /servers
pub async fn list_servers(State(state): State<AppState>) -> Json<Vec<ServerStatus>> {
    let servers = state
        .runtime()
        .connections()
        .iter()
        .enumerate()
        .map(|(index, server)| ServerStatus::new(index, server))
        .collect();

    Json(servers)
}

/// GET /servers/:index
pub async fn get_server(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> ApiResult<Json<ServerStatus>> {
    let server = server_at(&state, index)?;
    Ok(Json(ServerStatus::new(index, &server)))
}

/// GET /servers/:index/history/:kind?limit=N
///
/// Most recent events of one kind, oldest first.
pub async fn get_history(
    State(state): State<AppState>,
    Path((index, kind)): Path<(usize, String)>,
    Query(query): Query<HistoryQuery>,
) -> ApiResult<Json<Vec<DomainEvent>>> {
    let server = server_at(&state, index)?;
    let kind: EventKind = kind
        .parse()
        .map_err(|e: ParseEventKindError| ApiError::UnknownEventKind(e.0))?;

    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    Ok(Json(server.history().recent(kind, limit)))
}
