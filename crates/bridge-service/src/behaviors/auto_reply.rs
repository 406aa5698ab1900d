//! Auto-reply: answers prefixed chat keywords with a private message

use std::sync::Arc;

use async_trait::async_trait;
use bridge_core::{DomainError, DomainEvent};
use bridge_gateway::{EventListener, HandlerResult, ServerConnection};

use super::{BehaviorContext, TemplateRenderer};

pub struct AutoReplyListener {
    ctx: Arc<BehaviorContext>,
}

impl AutoReplyListener {
    pub fn new(ctx: Arc<BehaviorContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl EventListener for AutoReplyListener {
    async fn handle(&self, event: &DomainEvent, server: &Arc<ServerConnection>) -> HandlerResult<()> {
        let DomainEvent::PlayerChat(chat) = event else {
            return Ok(());
        };
        let Some(behavior) = self.ctx.behavior_for(server.endpoint()) else {
            return Ok(());
        };
        if !behavior.auto_reply {
            return Ok(());
        }

        let Some(keyword) = chat.message.strip_prefix(behavior.auto_reply_start.as_str()) else {
            return Ok(());
        };
        let Some(reply) = behavior.auto_reply_dict.get(keyword) else {
            return Ok(());
        };

        let uuid = chat
            .player_uuid
            .as_deref()
            .ok_or_else(|| DomainError::PlayerNotFound(chat.player_name.clone()))?;

        let text = TemplateRenderer::new(server, behavior, &chat.player_name, Some(uuid))
            .render(reply)
            .await?;
        server.client().tell(uuid, &text).await?;

        tracing::info!(endpoint = server.endpoint(), player = %chat.player_name, keyword, "Auto-reply sent");
        Ok(())
    }

    fn name(&self) -> &str {
        "auto_reply"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behaviors::test_support::{offline_server, RecordingSink, ENDPOINT};
    use bridge_common::ServerBehavior;
    use bridge_core::{ConsoleRecord, PlayerChatEvent};
    use bridge_gateway::HandlerError;
    use std::collections::HashMap;

    fn listener(behavior: ServerBehavior) -> AutoReplyListener {
        let ctx = BehaviorContext::new(
            HashMap::from([(ENDPOINT.to_string(), behavior)]),
            Arc::new(RecordingSink::default()),
        );
        AutoReplyListener::new(Arc::new(ctx))
    }

    fn chat(message: &str, uuid: Option<&str>) -> DomainEvent {
        let record = ConsoleRecord::new(0, "", format!("<Steve> {message}"));
        DomainEvent::PlayerChat(PlayerChatEvent {
            timestamp_millis: 0,
            record,
            player_name: "Steve".to_string(),
            player_uuid: uuid.map(str::to_string),
            message: message.to_string(),
        })
    }

    #[tokio::test]
    async fn test_unprefixed_chat_is_ignored() {
        let listener = listener(ServerBehavior::default());
        // A hit would need the unreachable server, so Ok means no call was made
        listener
            .handle(&chat("hello", Some("u")), &offline_server())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_unknown_keyword_is_ignored() {
        let listener = listener(ServerBehavior::default());
        listener
            .handle(&chat(".nothing", Some("u")), &offline_server())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_disabled_auto_reply_is_ignored() {
        let listener = listener(ServerBehavior {
            auto_reply: false,
            ..ServerBehavior::default()
        });
        listener
            .handle(&chat(".hello", Some("u")), &offline_server())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_hit_without_identifier_fails() {
        let listener = listener(ServerBehavior::default());

        let err = listener
            .handle(&chat(".hello", None), &offline_server())
            .await
            .unwrap_err();
        assert!(matches!(err, HandlerError::Domain(DomainError::PlayerNotFound(ref name)) if name == "Steve"));
    }

    #[tokio::test]
    async fn test_hit_calls_the_server() {
        let listener = listener(ServerBehavior::default());

        let err = listener
            .handle(&chat(".hello", Some("u")), &offline_server())
            .await
            .unwrap_err();
        assert!(matches!(err, HandlerError::Transport(_)));
    }

    #[tokio::test]
    async fn test_other_servers_are_skipped() {
        let ctx = BehaviorContext::new(HashMap::new(), Arc::new(RecordingSink::default()));
        AutoReplyListener::new(Arc::new(ctx))
            .handle(&chat(".hello", Some("u")), &offline_server())
            .await
            .unwrap();
    }
}
