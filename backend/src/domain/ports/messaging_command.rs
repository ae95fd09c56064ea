//! Driving port for sending messages.

use async_trait::async_trait;

use crate::domain::{Actor, ConversationId, Error, Message, MessageContent};

/// Message mutations.
#[async_trait]
pub trait MessagingCommand: Send + Sync {
    /// Post a message to a conversation the actor takes part in.
    async fn send(
        &self,
        actor: Actor,
        conversation: &ConversationId,
        content: MessageContent,
    ) -> Result<Message, Error>;
}
