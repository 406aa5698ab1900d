//! Configuration structs

mod bridge_config;

pub use bridge_config::{
    AppSettings, BridgeConfig, ConfigError, Environment, LogConfig, OneBotConfig, ServerBehavior,
    ServerEntry, StatusConfig, StreamConfig, CONFIG_PATH_VAR, DEFAULT_CONFIG_PATH, ENV_PREFIX,
};
