//! Bridge integration tests
//!
//! Every test runs against an in-process mock management server; no
//! external services are required.
//!
//! Run with: cargo test -p integration-tests --test bridge_tests

use std::sync::Arc;
use std::time::Duration;

use bridge_api::build_runtime;
use bridge_client::{ClientConfig, CommandOutput, ServerApiClient};
use bridge_common::ServerBehavior;
use bridge_core::{ChatTarget, DomainError, EventKind};
use bridge_gateway::{
    BridgeRuntime, ConnectionSupervisor, ConsoleSource, ListenerRegistry, ServerConnection, StreamError,
    WebSocketSource,
};
use bridge_service::TemplateRenderer;
use integration_tests::{
    assert_json, assert_status, bridge_config, chat_frame, command_frame, console_frame,
    leave_frame, login_frame, wait_until, wait_until_within, MockCall, MockServer, RecordingSink, TestServer,
    LEAVE_GROUP, LOGIN_GROUP, TEST_KEY,
};
use reqwest::StatusCode;

fn client(mock: &MockServer, key: &str) -> ServerApiClient {
    ServerApiClient::new(ClientConfig::new(mock.endpoint(), key)).expect("valid endpoint")
}

/// Start a bridge against `mock` and wait until its console socket is attached
async fn connected_bridge(mock: &MockServer) -> (Arc<BridgeRuntime>, Arc<RecordingSink>) {
    let sink = RecordingSink::new();
    let runtime = build_runtime(&bridge_config(&mock.endpoint(), TEST_KEY), sink.clone())
        .expect("runtime builds");

    runtime.start().await;
    assert!(wait_until(|| mock.console_subscribers() == 1).await, "console never attached");

    (runtime, sink)
}

// ============================================================================
// Transport
// ============================================================================

#[tokio::test]
async fn test_exec_timeout_yields_no_response() {
    let mock = MockServer::start(TEST_KEY).await.unwrap();
    mock.set_exec_delay(Duration::from_secs(3));

    let output = client(&mock, TEST_KEY)
        .execute_command_with_timeout("list", Duration::from_millis(200))
        .await
        .unwrap();

    assert_eq!(output, CommandOutput::NoResponse);
    assert_eq!(output.text(), "this command has no return");
    assert_eq!(
        mock.exec_calls(),
        vec![MockCall::Exec {
            command: "list".to_string(),
            time: "200".to_string(),
        }]
    );
}

#[tokio::test]
async fn test_exec_without_output_gives_up_at_request_timeout() {
    let mock = MockServer::start(TEST_KEY).await.unwrap();
    mock.set_exec_delay(Duration::from_secs(10));
    let config = ClientConfig::new(mock.endpoint(), TEST_KEY)
        .with_request_timeout(Duration::from_millis(200));
    let client = ServerApiClient::new(config).unwrap();

    let started = std::time::Instant::now();
    let output = client.execute_command("save-all").await.unwrap();

    assert_eq!(output, CommandOutput::NoResponse);
    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(
        mock.exec_calls(),
        vec![MockCall::Exec {
            command: "save-all".to_string(),
            time: "100000".to_string(),
        }]
    );
}

#[tokio::test]
async fn test_exec_returns_raw_output() {
    let mock = MockServer::start(TEST_KEY).await.unwrap();

    let output = client(&mock, TEST_KEY).execute_command("list").await.unwrap();

    assert_eq!(output, CommandOutput::Output("executed list".to_string()));
}

#[tokio::test]
async fn test_wrong_key_is_rejected() {
    let mock = MockServer::start(TEST_KEY).await.unwrap();

    let err = client(&mock, "wrong").ping().await.unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert_eq!(err.operation(), "ping");
}

#[tokio::test]
async fn test_probe_counts_rejected_key_as_reachable() {
    let mock = MockServer::start(TEST_KEY).await.unwrap();
    let supervisor = |key: &str| {
        ConnectionSupervisor::new(
            ServerConnection::new(client(&mock, key), 8),
            Arc::new(ListenerRegistry::new()),
            Arc::new(WebSocketSource),
        )
    };

    assert!(supervisor("wrong").probe().await);
    assert!(supervisor(TEST_KEY).probe().await);

    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let endpoint = listener.local_addr().unwrap().to_string();
    drop(listener);
    let offline = ConnectionSupervisor::new(
        ServerConnection::new(ServerApiClient::new(ClientConfig::new(endpoint, TEST_KEY)).unwrap(), 8),
        Arc::new(ListenerRegistry::new()),
        Arc::new(WebSocketSource),
    );
    assert!(!offline.probe().await);
}

#[tokio::test]
async fn test_refused_connection_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let endpoint = listener.local_addr().unwrap().to_string();
    drop(listener);

    let client = ServerApiClient::new(ClientConfig::new(endpoint, TEST_KEY)).unwrap();
    let err = client.server_info().await.unwrap_err();

    assert!(err.is_connect());
    assert!(DomainError::from(err).is_upstream());
}

#[tokio::test]
async fn test_roster_backs_case_insensitive_lookup() {
    let mock = MockServer::start(TEST_KEY).await.unwrap();
    let server = ServerConnection::new(client(&mock, TEST_KEY), 8);

    let uuid = server.directory().resolve_by_name("steve").await.unwrap();
    assert_eq!(uuid.as_deref(), Some("uuid-steve"));

    let name = server.directory().resolve_by_identifier("uuid-alex").await.unwrap();
    assert_eq!(name, "Alex");

    assert!(server.directory().resolve_by_name("Herobrine").await.unwrap().is_none());
}

#[tokio::test]
async fn test_placeholders_expanded_server_side() {
    let mock = MockServer::start(TEST_KEY).await.unwrap();
    let server = ServerConnection::new(client(&mock, TEST_KEY), 8);
    let behavior = ServerBehavior {
        enable_placeholder_api: true,
        ..ServerBehavior::default()
    };

    let text = TemplateRenderer::new(&server, &behavior, "Steve", Some("uuid-steve"))
        .render("%player% has %balance% coins")
        .await
        .unwrap();

    assert_eq!(text, "Steve has 100 coins");
    assert_eq!(
        mock.calls(),
        vec![MockCall::Placeholders {
            message: "Steve has %balance% coins".to_string(),
            uuid: Some("uuid-steve".to_string()),
        }]
    );
}

// ============================================================================
// Console stream
// ============================================================================

#[tokio::test]
async fn test_console_handshake_requires_key_cookie() {
    let mock = MockServer::start(TEST_KEY).await.unwrap();
    let server = ServerConnection::new(client(&mock, "wrong"), 8);

    let err = match WebSocketSource.open(&server).await {
        Ok(_) => panic!("handshake with the wrong key succeeded"),
        Err(e) => e,
    };

    assert!(matches!(err, StreamError::Rejected { status: 401 }));
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_chat_keyword_gets_auto_reply() {
    let mock = MockServer::start(TEST_KEY).await.unwrap();
    let (runtime, _sink) = connected_bridge(&mock).await;

    mock.push_console(chat_frame("Steve", ".hello"));

    assert!(wait_until(|| !mock.calls().is_empty()).await);
    assert_eq!(
        mock.calls(),
        vec![MockCall::Tell {
            player_uuid: "uuid-steve".to_string(),
            message: "world".to_string(),
        }]
    );

    let server = runtime.connection_at(0).unwrap();
    assert_eq!(server.history().len(EventKind::PlayerChat), 1);

    runtime.shutdown().await;
}

#[tokio::test]
async fn test_translated_command_executes_once() {
    let mock = MockServer::start(TEST_KEY).await.unwrap();
    let (runtime, _sink) = connected_bridge(&mock).await;

    mock.push_console(command_frame("Steve", "say"));
    mock.push_console(command_frame("Steve", "home"));
    mock.push_console(chat_frame("Steve", "no keyword here"));

    assert!(wait_until(|| runtime.connection_at(0).unwrap().history().len(EventKind::PlayerChat) == 1).await);
    assert_eq!(
        mock.exec_calls(),
        vec![MockCall::Exec {
            command: "say helloworld".to_string(),
            time: "100000".to_string(),
        }]
    );

    runtime.shutdown().await;
}

#[tokio::test]
async fn test_silent_command_does_not_starve_later_chat() {
    let mock = MockServer::start(TEST_KEY).await.unwrap();
    mock.set_exec_delay(Duration::from_secs(12));
    let (runtime, _sink) = connected_bridge(&mock).await;

    mock.push_console(command_frame("Steve", "say"));
    mock.push_console(chat_frame("Steve", ".hello"));

    let told = || {
        mock.calls()
            .iter()
            .any(|call| matches!(call, MockCall::Tell { message, .. } if message == "world"))
    };
    assert!(wait_until_within(Duration::from_secs(9), told).await);
    assert_eq!(mock.exec_calls().len(), 1);

    let server = runtime.connection_at(0).unwrap();
    assert_eq!(server.history().len(EventKind::PlayerChat), 1);

    runtime.shutdown().await;
}

#[tokio::test]
async fn test_stale_frame_has_no_side_effects() {
    let mock = MockServer::start(TEST_KEY).await.unwrap();
    let (runtime, _sink) = connected_bridge(&mock).await;

    mock.push_console(console_frame("", "<Steve> .hello", 60_000));
    mock.push_console(command_frame("Steve", "say"));

    assert!(wait_until(|| !mock.exec_calls().is_empty()).await);
    assert!(!mock
        .calls()
        .iter()
        .any(|call| matches!(call, MockCall::Tell { .. })));

    let server = runtime.connection_at(0).unwrap();
    assert_eq!(server.history().len(EventKind::PlayerChat), 0);
    assert_eq!(server.history().len(EventKind::CommandIssued), 1);

    runtime.shutdown().await;
}

#[tokio::test]
async fn test_login_welcomes_in_order() {
    let mock = MockServer::start(TEST_KEY).await.unwrap();
    let (runtime, sink) = connected_bridge(&mock).await;

    mock.push_console(login_frame("Steve"));

    assert!(wait_until(|| mock.calls().len() == 2).await);
    assert_eq!(
        mock.calls(),
        vec![
            MockCall::Broadcast {
                message: "§6Welcome Steve to the server~".to_string(),
            },
            MockCall::Tell {
                player_uuid: "uuid-steve".to_string(),
                message: "§6Welcome Steve to the server~".to_string(),
            },
        ]
    );
    assert_eq!(
        sink.sent(),
        vec![(
            ChatTarget::Group(LOGIN_GROUP),
            "Steve joined Test Server, 2 player(s) online now".to_string(),
        )]
    );

    runtime.shutdown().await;
}

#[tokio::test]
async fn test_leave_notice_goes_to_leave_groups() {
    let mock = MockServer::start(TEST_KEY).await.unwrap();
    let (runtime, sink) = connected_bridge(&mock).await;

    mock.push_console(leave_frame("Alex"));

    assert!(wait_until(|| !sink.sent().is_empty()).await);
    assert_eq!(
        sink.sent(),
        vec![(
            ChatTarget::Group(LEAVE_GROUP),
            "Alex left the server, 2 player(s) online now".to_string(),
        )]
    );
    assert!(mock.calls().is_empty());

    runtime.shutdown().await;
}

// ============================================================================
// Status API
// ============================================================================

#[tokio::test]
async fn test_status_api_reports_servers() {
    let mock = MockServer::start(TEST_KEY).await.unwrap();
    let (runtime, _sink) = connected_bridge(&mock).await;
    let connection = runtime.connection_at(0).unwrap();
    assert!(wait_until(|| connection.is_connected()).await);

    mock.push_console(chat_frame("Steve", "hi"));
    assert!(wait_until(|| connection.history().len(EventKind::PlayerChat) == 1).await);

    let api = TestServer::start(runtime.clone()).await.unwrap();

    let health = api.get("/health").await.unwrap();
    assert_eq!(health.text().await.unwrap(), "OK");

    let servers: serde_json::Value = assert_json(api.get("/servers").await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(servers[0]["endpoint"], mock.endpoint());
    assert_eq!(servers[0]["name"], "Test Server");
    assert_eq!(servers[0]["state"], "connected");
    assert_eq!(servers[0]["history"]["chat"], 1);

    let history: serde_json::Value = assert_json(
        api.get("/servers/0/history/PLAYER_CHAT").await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(history[0]["player_name"], "Steve");
    assert_eq!(history[0]["message"], "hi");

    let missing: serde_json::Value = assert_json(api.get("/servers/3").await.unwrap(), StatusCode::NOT_FOUND)
        .await
        .unwrap();
    assert_eq!(missing["code"], "UNKNOWN_SERVER");

    assert_status(api.get("/servers/0/history/nope").await.unwrap(), StatusCode::BAD_REQUEST)
        .await
        .unwrap();

    runtime.shutdown().await;
}
