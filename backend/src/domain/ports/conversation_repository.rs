//! Port abstraction for conversations and their messages.
use async_trait::async_trait;

use crate::domain::{Conversation, ConversationId, Message, ProjectId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by conversation repository adapters.
    pub enum ConversationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "conversation repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "conversation repository query failed: {message}",
    }
}

/// Storage of [`Conversation`] and [`Message`] documents.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Insert or replace a conversation.
    async fn save(&self, conversation: &Conversation) -> Result<(), ConversationRepositoryError>;

    /// Fetch a conversation by identifier.
    async fn find_by_id(
        &self,
        id: &ConversationId,
    ) -> Result<Option<Conversation>, ConversationRepositoryError>;

    /// Active conversation between `first` and `second` about `project`.
    async fn find_between(
        &self,
        first: &UserId,
        second: &UserId,
        project: Option<ProjectId>,
    ) -> Result<Option<Conversation>, ConversationRepositoryError>;

    /// Conversations `user` takes part in, most recently updated first.
    async fn list_for_user(
        &self,
        user: &UserId,
    ) -> Result<Vec<Conversation>, ConversationRepositoryError>;

    /// Insert or replace messages.
    async fn save_messages(&self, messages: &[Message]) -> Result<(), ConversationRepositoryError>;

    /// Messages of a conversation, oldest first.
    async fn list_messages(
        &self,
        conversation: &ConversationId,
    ) -> Result<Vec<Message>, ConversationRepositoryError>;
}
