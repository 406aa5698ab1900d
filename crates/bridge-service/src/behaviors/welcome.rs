//! Welcome: greets joining players in game and announces them to chat groups
//!
//! Order per login: in-game broadcast, group announcements, private welcome.

use std::sync::Arc;

use async_trait::async_trait;
use bridge_core::{ChatTarget, DomainError, DomainEvent};
use bridge_gateway::{EventListener, HandlerResult, ServerConnection};

use super::{BehaviorContext, TemplateRenderer};

pub struct WelcomeListener {
    ctx: Arc<BehaviorContext>,
}

impl WelcomeListener {
    pub fn new(ctx: Arc<BehaviorContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl EventListener for WelcomeListener {
    async fn handle(&self, event: &DomainEvent, server: &Arc<ServerConnection>) -> HandlerResult<()> {
        let DomainEvent::PlayerLogin(login) = event else {
            return Ok(());
        };
        let Some(behavior) = self.ctx.behavior_for(server.endpoint()) else {
            return Ok(());
        };

        let uuid = login.player_uuid.as_deref();
        let renderer = TemplateRenderer::new(server, behavior, &login.player_name, uuid);

        if behavior.show_welcome_message {
            let text = renderer.render(&behavior.welcome_message_broadcast).await?;
            server.client().broadcast(&text).await?;
        }

        if behavior.join_event_qq_broadcast && !behavior.join_event_qq_broadcast_group.is_empty() {
            let text = renderer.render(&behavior.join_event_qq_message).await?;
            announce(&self.ctx, &behavior.join_event_qq_broadcast_group, &text).await;
        }

        if behavior.show_welcome_message {
            let uuid = uuid.ok_or_else(|| DomainError::PlayerNotFound(login.player_name.clone()))?;
            let text = renderer.render(&behavior.welcome_message).await?;
            server.client().tell(uuid, &text).await?;
        }

        tracing::info!(endpoint = server.endpoint(), player = %login.player_name, "Player welcomed");
        Ok(())
    }

    fn name(&self) -> &str {
        "welcome"
    }
}

/// Send `text` to every group; a failing group is logged and skipped
pub(crate) async fn announce(ctx: &BehaviorContext, groups: &[i64], text: &str) -> usize {
    let mut delivered = 0;

    for &group in groups {
        match ctx.sink().send(ChatTarget::Group(group), text).await {
            Ok(()) => delivered += 1,
            Err(e) => tracing::warn!(group, error = %e, "Group announcement failed"),
        }
    }

    delivered
}
