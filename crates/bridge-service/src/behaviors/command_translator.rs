//! Command translator: maps player commands onto console commands

use std::sync::Arc;

use async_trait::async_trait;
use bridge_core::DomainEvent;
use bridge_gateway::{EventListener, HandlerResult, ServerConnection};

use super::{BehaviorContext, TemplateRenderer};

pub struct CommandTranslatorListener {
    ctx: Arc<BehaviorContext>,
}

impl CommandTranslatorListener {
    pub fn new(ctx: Arc<BehaviorContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl EventListener for CommandTranslatorListener {
    async fn handle(&self, event: &DomainEvent, server: &Arc<ServerConnection>) -> HandlerResult<()> {
        let DomainEvent::CommandIssued(issued) = event else {
            return Ok(());
        };
        let Some(behavior) = self.ctx.behavior_for(server.endpoint()) else {
            return Ok(());
        };
        if !behavior.command_translator {
            return Ok(());
        }
        let Some(template) = behavior.translate_commands.get(&issued.command) else {
            return Ok(());
        };

        let command = TemplateRenderer::new(server, behavior, &issued.player_name, issued.player_uuid.as_deref())
            .render(template)
            .await?;
        let output = server.client().execute_command(&command).await?;

        tracing::info!(
            endpoint = server.endpoint(),
            player = %issued.player_name,
            verb = %issued.command,
            command = %command,
            output = output.text(),
            "Command translated"
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "command_translator"
    }
}
