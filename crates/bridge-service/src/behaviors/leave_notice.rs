//! Leave notice: announces departing players to chat groups

use std::sync::Arc;

use async_trait::async_trait;
use bridge_core::DomainEvent;
use bridge_gateway::{EventListener, HandlerResult, ServerConnection};

use super::welcome::announce;
use super::{BehaviorContext, TemplateRenderer};

pub struct LeaveNoticeListener {
    ctx: Arc<BehaviorContext>,
}

impl LeaveNoticeListener {
    pub fn new(ctx: Arc<BehaviorContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl EventListener for LeaveNoticeListener {
    async fn handle(&self, event: &DomainEvent, server: &Arc<ServerConnection>) -> HandlerResult<()> {
        let DomainEvent::PlayerDisconnect(leave) = event else {
            return Ok(());
        };
        let Some(behavior) = self.ctx.behavior_for(server.endpoint()) else {
            return Ok(());
        };
        if !behavior.leave_event_qq_broadcast || behavior.leave_event_qq_broadcast_group.is_empty() {
            return Ok(());
        }

        let text = TemplateRenderer::new(server, behavior, &leave.player_name, leave.player_uuid.as_deref())
            .render(&behavior.leave_event_qq_message)
            .await?;
        let delivered = announce(&self.ctx, &behavior.leave_event_qq_broadcast_group, &text).await;

        tracing::info!(endpoint = server.endpoint(), player = %leave.player_name, delivered, "Leave notice sent");
        Ok(())
    }

    fn name(&self) -> &str {
        "leave_notice"
    }
}
