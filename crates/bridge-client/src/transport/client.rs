//! Management API client
//!
//! Stateless: every call is exactly one HTTP request carrying the `key`
//! header. Nothing is retried here; callers decide what a failure means.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::instrument;

use bridge_core::{DomainResult, PlayerRecord, RosterSource};

use super::error::{TransportError, TransportResult};
use super::models::{
    CommandOutput, InventoryItem, Objective, OnlinePlayer, OperatorEntry, PluginInfo,
    ScoreboardSummary, ServerInfo, WhitelistEntry, World,
};

/// Header carrying the management API key
pub const AUTH_HEADER: &str = "key";

/// Connection settings for one server
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// `host:port`, optionally prefixed with `http://` or `https://`
    pub endpoint: String,
    pub auth_key: String,
    /// HTTP timeout for every call, `execute_command` included
    pub request_timeout: Duration,
    /// How long `execute_command` asks the server to wait for output
    pub command_timeout: Duration,
}

impl ClientConfig {
    pub fn new(endpoint: impl Into<String>, auth_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            auth_key: auth_key.into(),
            request_timeout: Duration::from_secs(5),
            command_timeout: Duration::from_millis(100_000),
        }
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = timeout;
        self
    }
}

/// Typed client for the management REST API
#[derive(Debug, Clone)]
pub struct ServerApiClient {
    http: reqwest::Client,
    endpoint: String,
    base_url: Url,
    auth_key: String,
    request_timeout: Duration,
    command_timeout: Duration,
}

impl ServerApiClient {
    /// Create a new client
    ///
    /// # Errors
    /// Returns `TransportError::Config` if the endpoint is not a usable URL
    pub fn new(config: ClientConfig) -> TransportResult<Self> {
        let base_url = base_url(&config.endpoint)?;
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| TransportError::Config {
                endpoint: config.endpoint.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            http,
            endpoint: config.endpoint,
            base_url,
            auth_key: config.auth_key,
            request_timeout: config.request_timeout,
            command_timeout: config.command_timeout,
        })
    }

    /// The configured `host:port`
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn auth_key(&self) -> &str {
        &self.auth_key
    }

    /// URL of an API path, e.g. `/v1/ping`
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    /// WebSocket URL of the console stream
    pub fn console_url(&self) -> String {
        let scheme = if self.base_url.scheme() == "https" { "wss" } else { "ws" };
        let authority = self.base_url.as_str().split_once("://").map_or("", |(_, rest)| rest);
        format!("{scheme}://{}/v1/ws/console", authority.trim_end_matches('/'))
    }

    // =========================================================================
    // Server
    // =========================================================================

    /// Reachability probe; returns the raw reply body
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    pub async fn ping(&self) -> TransportResult<String> {
        let response = self.send("ping", self.get("/v1/ping")).await?;
        read_text("ping", response).await
    }

    pub async fn server_info(&self) -> TransportResult<ServerInfo> {
        self.get_json("server_info", "/v1/server").await
    }

    pub async fn plugins(&self) -> TransportResult<Vec<PluginInfo>> {
        self.get_json("plugins", "/v1/plugins").await
    }

    // =========================================================================
    // Players
    // =========================================================================

    /// Players currently online
    pub async fn online_players(&self) -> TransportResult<Vec<OnlinePlayer>> {
        self.get_json("online_players", "/v1/players").await
    }

    /// Every player the server has ever seen
    pub async fn all_players(&self) -> TransportResult<Vec<PlayerRecord>> {
        self.get_json("all_players", "/v1/players/all").await
    }

    pub async fn inventory(
        &self,
        player_uuid: &str,
        world_uuid: &str,
    ) -> TransportResult<Vec<InventoryItem>> {
        let path = format!("/v1/players/{player_uuid}/{world_uuid}/inventory");
        self.get_json("inventory", &path).await
    }

    // =========================================================================
    // Worlds
    // =========================================================================

    pub async fn worlds(&self) -> TransportResult<Vec<World>> {
        self.get_json("worlds", "/v1/worlds").await
    }

    pub async fn world(&self, world_uuid: &str) -> TransportResult<World> {
        self.get_json("world", &format!("/v1/worlds/{world_uuid}")).await
    }

    pub async fn save_world(&self, world_uuid: &str) -> TransportResult<String> {
        let request = self.post(&format!("/v1/worlds/{world_uuid}/save"));
        let response = self.send("save_world", request).await?;
        read_text("save_world", response).await
    }

    // =========================================================================
    // Scoreboard
    // =========================================================================

    pub async fn scoreboard(&self) -> TransportResult<ScoreboardSummary> {
        self.get_json("scoreboard", "/v1/scoreboard").await
    }

    pub async fn objective(&self, name: &str) -> TransportResult<Objective> {
        self.get_json("objective", &format!("/v1/scoreboard/{name}")).await
    }

    // =========================================================================
    // Operators and whitelist
    // =========================================================================

    pub async fn ops(&self) -> TransportResult<Vec<OperatorEntry>> {
        self.get_json("ops", "/v1/ops").await
    }

    pub async fn set_op(&self, name: &str) -> TransportResult<CommandOutput> {
        self.execute_command(&format!("op {name}")).await
    }

    pub async fn remove_op(&self, name: &str) -> TransportResult<CommandOutput> {
        self.execute_command(&format!("deop {name}")).await
    }

    pub async fn whitelist(&self) -> TransportResult<Vec<WhitelistEntry>> {
        self.get_json("whitelist", "/v1/server/whitelist").await
    }

    pub async fn whitelist_on(&self) -> TransportResult<CommandOutput> {
        self.execute_command("whitelist on").await
    }

    pub async fn whitelist_off(&self) -> TransportResult<CommandOutput> {
        self.execute_command("whitelist off").await
    }

    pub async fn add_to_whitelist(&self, name: &str) -> TransportResult<CommandOutput> {
        self.execute_command(&format!("whitelist add {name}")).await
    }

    pub async fn remove_from_whitelist(&self, name: &str) -> TransportResult<CommandOutput> {
        self.execute_command(&format!("whitelist remove {name}")).await
    }

    // =========================================================================
    // Chat
    // =========================================================================

    /// Broadcast a message to every online player
    #[instrument(skip(self, message), fields(endpoint = %self.endpoint))]
    pub async fn broadcast(&self, message: &str) -> TransportResult<String> {
        let request = self.post("/v1/chat/broadcast").form(&[("message", message)]);
        let response = self.send("broadcast", request).await?;
        read_text("broadcast", response).await
    }

    /// Send a private message to one player
    #[instrument(skip(self, message), fields(endpoint = %self.endpoint))]
    pub async fn tell(&self, player_uuid: &str, message: &str) -> TransportResult<String> {
        let request = self
            .post("/v1/chat/tell")
            .form(&[("playerUuid", player_uuid), ("message", message)]);
        let response = self.send("tell", request).await?;
        read_text("tell", response).await
    }

    /// Expand placeholders server-side, optionally in the context of a player
    pub async fn replace_placeholders(
        &self,
        message: &str,
        player_uuid: Option<&str>,
    ) -> TransportResult<String> {
        let mut form = vec![("message", message)];
        if let Some(uuid) = player_uuid {
            form.push(("uuid", uuid));
        }

        let request = self.post("/v1/placeholders/replace").form(&form);
        let response = self.send("replace_placeholders", request).await?;
        let body = read_text("replace_placeholders", response).await?;
        Ok(unquote(body))
    }

    // =========================================================================
    // Console commands
    // =========================================================================

    /// Run a console command
    ///
    /// The server is asked to wait `command_timeout` for output, but the
    /// request itself gives up after `request_timeout`. A command with no
    /// output therefore resolves to `CommandOutput::NoResponse` quickly.
    pub async fn execute_command(&self, command: &str) -> TransportResult<CommandOutput> {
        self.exec(command, self.command_timeout, self.request_timeout)
            .await
    }

    /// Run a console command, waiting up to `timeout` on both ends
    ///
    /// A request that times out yields `CommandOutput::NoResponse`; any other
    /// failure is an error.
    pub async fn execute_command_with_timeout(
        &self,
        command: &str,
        timeout: Duration,
    ) -> TransportResult<CommandOutput> {
        self.exec(command, timeout, timeout).await
    }

    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn exec(
        &self,
        command: &str,
        server_wait: Duration,
        http_timeout: Duration,
    ) -> TransportResult<CommandOutput> {
        let time = server_wait.as_millis().to_string();
        let request = self
            .post("/v1/server/exec")
            .timeout(http_timeout)
            .form(&[("command", command), ("time", time.as_str())]);

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                tracing::debug!(command, "Command produced no response before timeout");
                return Ok(CommandOutput::NoResponse);
            }
            Err(e) => return Err(TransportError::request("execute_command", e)),
        };

        let response = check_status("execute_command", response).await?;
        match response.text().await {
            Ok(text) => Ok(CommandOutput::Output(text)),
            Err(e) if e.is_timeout() => Ok(CommandOutput::NoResponse),
            Err(e) => Err(TransportError::request("execute_command", e)),
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn get(&self, path: &str) -> RequestBuilder {
        self.http
            .get(self.url(path))
            .header(AUTH_HEADER, &self.auth_key)
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.http
            .post(self.url(path))
            .header(AUTH_HEADER, &self.auth_key)
    }

    async fn send(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> TransportResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| TransportError::request(operation, e))?;
        check_status(operation, response).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        path: &str,
    ) -> TransportResult<T> {
        let response = self.send(operation, self.get(path)).await?;
        let body = read_text(operation, response).await?;
        serde_json::from_str(&body).map_err(|e| TransportError::decode(operation, e))
    }
}

#[async_trait]
impl RosterSource for ServerApiClient {
    async fn fetch_roster(&self) -> DomainResult<Vec<PlayerRecord>> {
        Ok(self.all_players().await?)
    }
}

fn base_url(endpoint: &str) -> TransportResult<Url> {
    let config_error = |reason: String| TransportError::Config {
        endpoint: endpoint.to_string(),
        reason,
    };

    let trimmed = endpoint.trim();
    if trimmed.is_empty() {
        return Err(config_error("endpoint is empty".to_string()));
    }

    let raw = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    };

    let url = Url::parse(&raw).map_err(|e| config_error(e.to_string()))?;
    if url.host_str().is_none() {
        return Err(config_error("endpoint has no host".to_string()));
    }
    Ok(url)
}

async fn check_status(operation: &'static str, response: Response) -> TransportResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(TransportError::Status {
        operation,
        status: status.as_u16(),
        body,
    })
}

async fn read_text(operation: &'static str, response: Response) -> TransportResult<String> {
    response
        .text()
        .await
        .map_err(|e| TransportError::request(operation, e))
}

/// Replies that are a bare JSON string are unwrapped; anything else is kept as-is
fn unquote(body: String) -> String {
    match serde_json::from_str::<String>(&body) {
        Ok(text) => text,
        Err(_) => body,
    }
}
