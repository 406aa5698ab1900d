//! Chat platform sinks

mod log_sink;
mod onebot;

pub use log_sink::LogSink;
pub use onebot::OneBotSink;
