//! Bridge configuration
//!
//! Loaded from an optional TOML file layered under `BRIDGE__*` environment
//! variables, e.g. `BRIDGE__STREAM__RECONNECT_DELAY_SECS=30`. The file path
//! comes from `BRIDGE_CONFIG` and defaults to `bridge.toml`.

use std::collections::{HashMap, HashSet};
use std::env;
use std::time::Duration;

use serde::Deserialize;

/// Environment variable naming the configuration file
pub const CONFIG_PATH_VAR: &str = "BRIDGE_CONFIG";

/// Configuration file used when `BRIDGE_CONFIG` is unset
pub const DEFAULT_CONFIG_PATH: &str = "bridge.toml";

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "BRIDGE";

/// Main bridge configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BridgeConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub status: StatusConfig,
    #[serde(default)]
    pub stream: StreamConfig,
    #[serde(default)]
    pub onebot: OneBotConfig,
    #[serde(default)]
    pub servers: Vec<ServerEntry>,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default)]
    pub env: Environment,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            env: Environment::default(),
        }
    }
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Status HTTP API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StatusConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_status_port")]
    pub port: u16,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: default_host(),
            port: default_status_port(),
        }
    }
}

impl StatusConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Console stream and transport tuning
#[derive(Debug, Clone, Deserialize)]
pub struct StreamConfig {
    /// Wait between reconnect attempts
    #[serde(default = "default_reconnect_delay_secs")]
    pub reconnect_delay_secs: u64,
    /// Records older than this are skipped
    #[serde(default = "default_stale_after_ms")]
    pub stale_after_ms: i64,
    /// Default timeout for `execute_command`
    #[serde(default = "default_command_timeout_ms")]
    pub command_timeout_ms: u64,
    /// Timeout for every other REST call
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Entries kept per rolling history log
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            reconnect_delay_secs: default_reconnect_delay_secs(),
            stale_after_ms: default_stale_after_ms(),
            command_timeout_ms: default_command_timeout_ms(),
            request_timeout_ms: default_request_timeout_ms(),
            history_capacity: default_history_capacity(),
        }
    }
}

impl StreamConfig {
    #[must_use]
    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_secs(self.reconnect_delay_secs)
    }

    #[must_use]
    pub fn command_timeout(&self) -> Duration {
        Duration::from_millis(self.command_timeout_ms)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// OneBot v11 HTTP endpoint; messages are only logged when `url` is unset
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OneBotConfig {
    pub url: Option<String>,
    pub access_token: Option<String>,
}

/// One managed game server
#[derive(Debug, Clone, Deserialize)]
pub struct ServerEntry {
    /// `host:port` of the management API
    pub uri: String,
    pub auth_key: String,
    #[serde(default)]
    pub behavior: ServerBehavior,
}

/// Per-server behavior toggles and templates
///
/// Templates understand `%player%`, `%server_name%` and `%player_num%`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerBehavior {
    pub enable_placeholder_api: bool,

    pub show_welcome_message: bool,
    pub welcome_message: String,
    pub welcome_message_broadcast: String,

    pub auto_reply: bool,
    pub auto_reply_dict: HashMap<String, String>,
    pub auto_reply_start: String,

    pub join_event_qq_broadcast: bool,
    pub join_event_qq_message: String,
    pub join_event_qq_broadcast_group: Vec<i64>,

    pub leave_event_qq_broadcast: bool,
    pub leave_event_qq_message: String,
    pub leave_event_qq_broadcast_group: Vec<i64>,

    pub command_translator: bool,
    pub translate_commands: HashMap<String, String>,
}

impl Default for ServerBehavior {
    fn default() -> Self {
        Self {
            enable_placeholder_api: false,

            show_welcome_message: true,
            welcome_message: "§6Welcome %player% to the server~".to_string(),
            welcome_message_broadcast: "§6Welcome %player% to the server~".to_string(),

            auto_reply: true,
            auto_reply_dict: HashMap::from([("hello".to_string(), "world".to_string())]),
            auto_reply_start: ".".to_string(),

            join_event_qq_broadcast: true,
            join_event_qq_message:
                "%player% joined %server_name%, %player_num% player(s) online now".to_string(),
            join_event_qq_broadcast_group: Vec::new(),

            leave_event_qq_broadcast: true,
            leave_event_qq_message: "%player% left the server, %player_num% player(s) online now"
                .to_string(),
            leave_event_qq_broadcast_group: Vec::new(),

            command_translator: true,
            translate_commands: HashMap::from([(
                "say".to_string(),
                "say helloworld".to_string(),
            )]),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "mc-bridge".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_status_port() -> u16 {
    8787
}

fn default_reconnect_delay_secs() -> u64 {
    10
}

fn default_stale_after_ms() -> i64 {
    10_000
}

fn default_command_timeout_ms() -> u64 {
    100_000
}

fn default_request_timeout_ms() -> u64 {
    5_000
}

fn default_history_capacity() -> usize {
    500
}

impl BridgeConfig {
    /// Load configuration from `.env`, the configuration file and `BRIDGE__*` variables
    ///
    /// # Errors
    /// Returns an error if a source cannot be parsed or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let path = env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&path)
    }

    /// Load from an explicit file path, still layered under the environment
    ///
    /// A missing file is not an error; all sections have defaults except
    /// `servers`, which validation requires.
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::with_name(path).required(false))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document without consulting the environment
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::from_str(source, ::config::FileFormat::Toml))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.servers.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one [[servers]] entry is required".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for (index, server) in self.servers.iter().enumerate() {
            if server.uri.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("servers[{index}].uri is empty")));
            }
            if server.auth_key.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "servers[{index}].auth_key is empty"
                )));
            }
            if !seen.insert(server.uri.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "server {} is configured twice",
                    server.uri
                )));
            }
        }

        if self.stream.stale_after_ms < 0 {
            return Err(ConfigError::Invalid(
                "stream.stale_after_ms must not be negative".to_string(),
            ));
        }

        Ok(())
    }

    /// Behavior configured for a server endpoint
    #[must_use]
    pub fn behavior_for(&self, uri: &str) -> Option<&ServerBehavior> {
        self.servers
            .iter()
            .find(|s| s.uri == uri)
            .map(|s| &s.behavior)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
