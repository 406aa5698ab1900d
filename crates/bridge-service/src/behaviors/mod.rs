//! Event-driven behaviors
//!
//! Every behavior is an [`EventListener`] that looks up the configuration of
//! the server the event came from. Servers without configuration are skipped.

mod auto_reply;
mod command_translator;
mod context;
mod leave_notice;
mod template;
mod welcome;

use std::sync::Arc;

use bridge_core::EventKind;
use bridge_gateway::{EventListener, ListenerRegistry};

pub use auto_reply::AutoReplyListener;
pub use command_translator::CommandTranslatorListener;
pub use context::BehaviorContext;
pub use leave_notice::LeaveNoticeListener;
pub use template::{TemplateRenderer, PLAYER_NUM, PLAYER_PLACEHOLDER, SERVER_NAME};
pub use welcome::WelcomeListener;

/// Register every behavior under its event kind
pub fn register_behaviors(registry: &mut ListenerRegistry, ctx: &Arc<BehaviorContext>) {
    let behaviors: [(EventKind, Arc<dyn EventListener>); 4] = [
        (EventKind::PlayerChat, Arc::new(AutoReplyListener::new(ctx.clone()))),
        (EventKind::PlayerLogin, Arc::new(WelcomeListener::new(ctx.clone()))),
        (EventKind::PlayerDisconnect, Arc::new(LeaveNoticeListener::new(ctx.clone()))),
        (EventKind::CommandIssued, Arc::new(CommandTranslatorListener::new(ctx.clone()))),
    ];

    for (kind, listener) in behaviors {
        tracing::debug!(kind = %kind, listener = listener.name(), "Registering behavior");
        registry.register(kind, listener);
    }
}
