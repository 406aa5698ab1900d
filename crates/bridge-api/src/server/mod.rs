//! Server setup and initialization
//!
//! Wires configuration into the chat sink, the behavior listeners and the
//! bridge runtime, then serves the status API until Ctrl-C.

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use bridge_client::{LogSink, OneBotSink};
use bridge_common::{AppError, BridgeConfig};
use bridge_core::ChatSink;
use bridge_gateway::{BridgeRuntime, ListenerRegistry, WebSocketSource};
use bridge_service::{register_behaviors, BehaviorContext};
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::middleware::apply_middleware;
use crate::routes::create_router;
use crate::state::AppState;

/// Build the status application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let router = create_router();
    let router = apply_middleware(router);
    router.with_state(state)
}

/// OneBot sink when an endpoint is configured, otherwise a logging sink
pub fn build_sink(config: &BridgeConfig) -> Result<Arc<dyn ChatSink>, AppError> {
    match config.onebot.url.as_deref().filter(|url| !url.is_empty()) {
        Some(url) => {
            let sink = OneBotSink::new(
                url,
                config.onebot.access_token.clone(),
                config.stream.request_timeout(),
            )
            .map_err(AppError::internal)?;
            info!(url, "Relaying chat messages to OneBot");
            Ok(Arc::new(sink))
        }
        None => {
            warn!("No OneBot endpoint configured, chat messages will only be logged");
            Ok(Arc::new(LogSink))
        }
    }
}

/// Register the behaviors and build one connection per configured server
pub fn build_runtime(
    config: &BridgeConfig,
    sink: Arc<dyn ChatSink>,
) -> Result<Arc<BridgeRuntime>, AppError> {
    let ctx = Arc::new(BehaviorContext::from_config(config, sink));
    let mut registry = ListenerRegistry::new();
    register_behaviors(&mut registry, &ctx);

    let runtime = BridgeRuntime::from_config(config, Arc::new(registry), Arc::new(WebSocketSource))
        .map_err(|e| AppError::Validation(e.to_string()))?;

    Ok(Arc::new(runtime))
}

/// Serve the status API until `shutdown` resolves
pub async fn run_status_server(
    app: Router,
    addr: &str,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to bind to {addr}: {e}")))?;

    info!("Status API listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| AppError::internal(anyhow::anyhow!("Status API error: {e}")))
}

/// Run the bridge until Ctrl-C
pub async fn run(config: BridgeConfig) -> Result<(), AppError> {
    let sink = build_sink(&config)?;
    let runtime = build_runtime(&config, sink)?;

    runtime.start().await;

    let result = if config.status.enabled {
        let app = create_app(AppState::new(runtime.clone()));
        run_status_server(app, &config.status.address(), shutdown_signal()).await
    } else {
        shutdown_signal().await;
        Ok(())
    };

    info!("Shutting down");
    runtime.shutdown().await;
    result
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
