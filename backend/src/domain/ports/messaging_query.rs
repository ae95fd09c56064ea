//! Driving port for reading conversations.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{Actor, Conversation, ConversationId, Error, Message};

/// A conversation with its messages, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationThread {
    /// Conversation.
    pub conversation: Conversation,
    /// Messages.
    pub messages: Vec<Message>,
}

/// Conversation reads.
#[async_trait]
pub trait MessagingQuery: Send + Sync {
    /// The actor's conversations, most recently updated first.
    async fn conversations(&self, actor: Actor) -> Result<Vec<Conversation>, Error>;

    /// Open a conversation and mark its messages read for the actor.
    async fn open(&self, actor: Actor, id: &ConversationId) -> Result<ConversationThread, Error>;
}
