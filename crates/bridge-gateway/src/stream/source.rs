//! Console source abstraction

use async_trait::async_trait;
use futures::stream::BoxStream;

use super::StreamError;
use crate::connection::ServerConnection;

/// Text frames of one open console stream; the stream ends when the peer closes
pub type FrameStream = BoxStream<'static, Result<String, StreamError>>;

/// Opens console streams for a server
#[async_trait]
pub trait ConsoleSource: Send + Sync {
    async fn open(&self, server: &ServerConnection) -> Result<FrameStream, StreamError>;
}
