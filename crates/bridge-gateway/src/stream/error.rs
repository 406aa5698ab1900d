//! Stream errors

use std::io;

use thiserror::Error;
use tokio_tungstenite::tungstenite::{self, error::ProtocolError};

/// Why a console stream failed to open or terminated
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("Connection refused: {0}")]
    Refused(String),

    #[error("Handshake rejected with HTTP {status}")]
    Rejected { status: u16 },

    #[error("Stream closed by peer")]
    Closed,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("WebSocket protocol error: {0}")]
    Protocol(String),

    #[error("Invalid console request: {0}")]
    InvalidRequest(String),
}

impl StreamError {
    /// Expected faults of a flaky network or a restarting server
    ///
    /// Both transient and other faults lead to a reconnect; this only
    /// decides how loudly the fault is logged.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Refused(_) | Self::Rejected { .. } | Self::Closed => true,
            Self::Io(e) => matches!(
                e.kind(),
                io::ErrorKind::ConnectionRefused
                    | io::ErrorKind::ConnectionReset
                    | io::ErrorKind::ConnectionAborted
                    | io::ErrorKind::BrokenPipe
                    | io::ErrorKind::TimedOut
                    | io::ErrorKind::UnexpectedEof
            ),
            Self::Protocol(_) | Self::InvalidRequest(_) => false,
        }
    }
}

impl From<tungstenite::Error> for StreamError {
    fn from(err: tungstenite::Error) -> Self {
        match err {
            tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed => {
                Self::Closed
            }
            tungstenite::Error::Io(e) if e.kind() == io::ErrorKind::ConnectionRefused => {
                Self::Refused(e.to_string())
            }
            tungstenite::Error::Io(e) => Self::Io(e),
            tungstenite::Error::Http(response) => Self::Rejected {
                status: response.status().as_u16(),
            },
            tungstenite::Error::Protocol(ProtocolError::ResetWithoutClosingHandshake) => {
                Self::Closed
            }
            tungstenite::Error::Url(e) => Self::InvalidRequest(e.to_string()),
            other => Self::Protocol(other.to_string()),
        }
    }
}
