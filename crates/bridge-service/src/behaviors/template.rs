//! Message templates
//!
//! Templates may reference `%player%`, `%server_name%` and `%player_num%`.
//! Values that need a management API call are only fetched when the
//! template references them. With the placeholder API enabled the result
//! is then expanded server-side in the context of the player.

use bridge_common::ServerBehavior;
use bridge_gateway::{HandlerResult, ServerConnection};
use tracing::instrument;

pub const PLAYER_PLACEHOLDER: &str = "%player%";
pub const SERVER_NAME: &str = "%server_name%";
pub const PLAYER_NUM: &str = "%player_num%";

/// Renders templates for one server and one player
pub struct TemplateRenderer<'a> {
    server: &'a ServerConnection,
    behavior: &'a ServerBehavior,
    player_name: &'a str,
    player_uuid: Option<&'a str>,
}

impl<'a> TemplateRenderer<'a> {
    pub fn new(
        server: &'a ServerConnection,
        behavior: &'a ServerBehavior,
        player_name: &'a str,
        player_uuid: Option<&'a str>,
    ) -> Self {
        Self {
            server,
            behavior,
            player_name,
            player_uuid,
        }
    }

    #[instrument(skip(self), fields(endpoint = %self.server.endpoint(), player = %self.player_name))]
    pub async fn render(&self, template: &str) -> HandlerResult<String> {
        let mut text = template.replace(PLAYER_PLACEHOLDER, self.player_name);

        if text.contains(SERVER_NAME) {
            if self.server.server_info().is_none() {
                if let Err(e) = self.server.refresh_server_info().await {
                    tracing::debug!(error = %e, "Server name unavailable");
                }
            }
            text = text.replace(SERVER_NAME, &self.server.server_name());
        }

        if text.contains(PLAYER_NUM) {
            let count = self.server.online_player_count().await?;
            text = text.replace(PLAYER_NUM, &count.to_string());
        }

        if self.behavior.enable_placeholder_api {
            text = self
                .server
                .client()
                .replace_placeholders(&text, self.player_uuid)
                .await?;
        }

        Ok(text)
    }
}
