//! Bridge entry point
//!
//! Run with:
//! ```bash
//! cargo run -p bridge-api --bin mc-bridge
//! ```
//!
//! Configuration is read from `bridge.toml` (or the file named by
//! `BRIDGE_CONFIG`) and `BRIDGE__*` environment variables.

use bridge_common::{try_init_tracing, BridgeConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match BridgeConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let tracing_config = TracingConfig::from_log_config(&config.log, config.app.env);
    if let Err(e) = try_init_tracing(&tracing_config) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        name = %config.app.name,
        env = ?config.app.env,
        servers = config.servers.len(),
        "Configuration loaded"
    );

    if let Err(e) = bridge_api::run(config).await {
        error!(error = %e, code = e.error_code(), "Bridge stopped with an error");
        std::process::exit(1);
    }
}
