//! # bridge-service
//!
//! Application layer: the chat bridge behaviors (auto-reply, welcome,
//! leave notice and command translation) expressed as event listeners.

pub mod behaviors;

pub use behaviors::{
    register_behaviors, AutoReplyListener, BehaviorContext, CommandTranslatorListener,
    LeaveNoticeListener, TemplateRenderer, WelcomeListener, PLAYER_NUM, PLAYER_PLACEHOLDER,
    SERVER_NAME,
};
