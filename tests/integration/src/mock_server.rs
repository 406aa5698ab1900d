//! Mock management server
//!
//! Serves the subset of the management API the bridge uses. Every mutating
//! call is recorded in arrival order. Console frames pushed with
//! [`MockServer::push_console`] reach every connected console socket.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Request, State,
    },
    http::{header, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

pub const SERVER_NAME: &str = "Test Server";

/// A recorded management API call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    Exec { command: String, time: String },
    Broadcast { message: String },
    Tell { player_uuid: String, message: String },
    Placeholders { message: String, uuid: Option<String> },
}

struct MockInner {
    key: String,
    calls: Mutex<Vec<MockCall>>,
    exec_delay: Mutex<Option<Duration>>,
    roster: Mutex<Vec<(String, String)>>,
    console: broadcast::Sender<String>,
}

#[derive(Clone)]
struct MockState(Arc<MockInner>);

/// Running mock server
pub struct MockServer {
    addr: SocketAddr,
    state: MockState,
    _handle: JoinHandle<()>,
}

impl MockServer {
    /// Start a mock that accepts `key` and knows Steve and Alex
    pub async fn start(key: &str) -> Result<Self> {
        let (console, _) = broadcast::channel(64);
        let state = MockState(Arc::new(MockInner {
            key: key.to_string(),
            calls: Mutex::new(Vec::new()),
            exec_delay: Mutex::new(None),
            roster: Mutex::new(vec![
                ("Steve".to_string(), "uuid-steve".to_string()),
                ("Alex".to_string(), "uuid-alex".to_string()),
            ]),
            console,
        }));

        let api = Router::new()
            .route("/v1/ping", get(ping))
            .route("/v1/server", get(server_info))
            .route("/v1/players", get(online_players))
            .route("/v1/players/all", get(all_players))
            .route("/v1/server/exec", post(exec))
            .route("/v1/chat/broadcast", post(broadcast_message))
            .route("/v1/chat/tell", post(tell))
            .route("/v1/placeholders/replace", post(replace_placeholders))
            .route_layer(middleware::from_fn_with_state(state.clone(), require_key));

        let app = Router::new()
            .route("/v1/ws/console", get(console_socket))
            .merge(api)
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(Self {
            addr,
            state,
            _handle: handle,
        })
    }

    /// `host:port` as the bridge expects it in its configuration
    pub fn endpoint(&self) -> String {
        self.addr.to_string()
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.state.0.calls.lock().clone()
    }

    pub fn exec_calls(&self) -> Vec<MockCall> {
        self.calls()
            .into_iter()
            .filter(|call| matches!(call, MockCall::Exec { .. }))
            .collect()
    }

    /// Delay every exec reply by `delay`
    pub fn set_exec_delay(&self, delay: Duration) {
        *self.state.0.exec_delay.lock() = Some(delay);
    }

    /// Number of console sockets currently attached
    pub fn console_subscribers(&self) -> usize {
        self.state.0.console.receiver_count()
    }

    /// Send one raw frame to every console socket
    pub fn push_console(&self, frame: impl Into<String>) -> usize {
        self.state.0.console.send(frame.into()).unwrap_or(0)
    }
}

// ============================================================================
// Authentication
// ============================================================================

async fn require_key(State(state): State<MockState>, request: Request, next: Next) -> Response {
    let authorized = request
        .headers()
        .get("key")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|key| key == state.0.key);

    if authorized {
        next.run(request).await
    } else {
        (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
    }
}

fn cookie_key(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == "x-servertap-key").then(|| value.to_string())
    })
}

// ============================================================================
// HTTP handlers
// ============================================================================

async fn ping() -> &'static str {
    "pong"
}

async fn server_info(State(state): State<MockState>) -> Json<serde_json::Value> {
    Json(json!({
        "name": SERVER_NAME,
        "motd": "A Minecraft Server",
        "version": "git-Paper-196 (MC: 1.20.1)",
        "bukkitVersion": "1.20.1-R0.1-SNAPSHOT",
        "maxPlayers": 20,
        "onlinePlayers": state.0.roster.lock().len(),
        "health": { "cpus": 8 },
    }))
}

async fn online_players(State(state): State<MockState>) -> Json<serde_json::Value> {
    let players: Vec<_> = state
        .0
        .roster
        .lock()
        .iter()
        .map(|(name, uuid)| json!({ "uuid": uuid, "displayName": name, "op": false }))
        .collect();
    Json(json!(players))
}

async fn all_players(State(state): State<MockState>) -> Json<serde_json::Value> {
    let players: Vec<_> = state
        .0
        .roster
        .lock()
        .iter()
        .map(|(name, uuid)| json!({ "uuid": uuid, "name": name, "whitelisted": false }))
        .collect();
    Json(json!(players))
}

#[derive(Deserialize)]
struct ExecForm {
    command: String,
    #[serde(default)]
    time: String,
}

async fn exec(State(state): State<MockState>, Form(form): Form<ExecForm>) -> String {
    state.0.calls.lock().push(MockCall::Exec {
        command: form.command.clone(),
        time: form.time,
    });

    let delay = *state.0.exec_delay.lock();
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    format!("executed {}", form.command)
}

#[derive(Deserialize)]
struct BroadcastForm {
    message: String,
}

async fn broadcast_message(State(state): State<MockState>, Form(form): Form<BroadcastForm>) -> &'static str {
    state.0.calls.lock().push(MockCall::Broadcast {
        message: form.message,
    });
    "success"
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TellForm {
    player_uuid: String,
    message: String,
}

async fn tell(State(state): State<MockState>, Form(form): Form<TellForm>) -> &'static str {
    state.0.calls.lock().push(MockCall::Tell {
        player_uuid: form.player_uuid,
        message: form.message,
    });
    "success"
}

#[derive(Deserialize)]
struct PlaceholderForm {
    message: String,
    #[serde(default)]
    uuid: Option<String>,
}

/// Expands `%balance%` and answers with a JSON string, like the real plugin
async fn replace_placeholders(
    State(state): State<MockState>,
    Form(form): Form<PlaceholderForm>,
) -> Json<String> {
    state.0.calls.lock().push(MockCall::Placeholders {
        message: form.message.clone(),
        uuid: form.uuid,
    });
    Json(form.message.replace("%balance%", "100"))
}

// ============================================================================
// Console WebSocket
// ============================================================================

async fn console_socket(
    State(state): State<MockState>,
    headers: HeaderMap,
    ws: WebSocketUpgrade,
) -> Response {
    if cookie_key(&headers).as_deref() != Some(state.0.key.as_str()) {
        return (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
    }

    let frames = state.0.console.subscribe();
    ws.on_upgrade(move |socket| forward_console(socket, frames))
}

async fn forward_console(mut socket: WebSocket, mut frames: broadcast::Receiver<String>) {
    while let Ok(frame) = frames.recv().await {
        if socket.send(Message::Text(frame)).await.is_err() {
            break;
        }
    }
}
