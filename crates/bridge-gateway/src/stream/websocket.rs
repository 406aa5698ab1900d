//! WebSocket console source
//!
//! Connects to `ws://<host:port>/v1/ws/console`, authenticating with the
//! `x-servertap-key` cookie.

use async_trait::async_trait;
use futures::{future, StreamExt};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::header::COOKIE;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::Message;

use super::{ConsoleSource, FrameStream, StreamError};
use crate::connection::ServerConnection;

/// Cookie carrying the management API key on the console socket
pub const KEY_COOKIE: &str = "x-servertap-key";

/// Production console source
#[derive(Debug, Clone, Copy, Default)]
pub struct WebSocketSource;

#[async_trait]
impl ConsoleSource for WebSocketSource {
    async fn open(&self, server: &ServerConnection) -> Result<FrameStream, StreamError> {
        let url = server.client().console_url();
        let mut request = url
            .as_str()
            .into_client_request()
            .map_err(|e| StreamError::InvalidRequest(e.to_string()))?;

        let cookie = HeaderValue::from_str(&format!("{KEY_COOKIE}={}", server.client().auth_key()))
            .map_err(|e| StreamError::InvalidRequest(e.to_string()))?;
        request.headers_mut().insert(COOKIE, cookie);

        let (socket, _response) = connect_async(request).await?;
        tracing::debug!(endpoint = server.endpoint(), %url, "Console socket opened");

        let frames = socket
            .take_while(|message| future::ready(!matches!(message, Ok(Message::Close(_)))))
            .filter_map(|message| {
                future::ready(match message {
                    Ok(Message::Text(text)) => Some(Ok(text)),
                    Ok(Message::Binary(bytes)) => Some(
                        String::from_utf8(bytes).map_err(|e| StreamError::Protocol(e.to_string())),
                    ),
                    // Ping, pong and raw frames carry no records
                    Ok(_) => None,
                    Err(e) => Some(Err(StreamError::from(e))),
                })
            });

        Ok(frames.boxed())
    }
}
