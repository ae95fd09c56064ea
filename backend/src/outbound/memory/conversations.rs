//! In-memory `ConversationRepository`.

use std::cmp::Reverse;
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{ConversationRepository, ConversationRepositoryError};
use crate::domain::{Conversation, ConversationId, Message, MessageId, ProjectId, UserId};

/// Conversations and messages kept in process memory.
#[derive(Debug, Default)]
pub struct MemoryConversationRepository {
    conversations: RwLock<HashMap<ConversationId, Conversation>>,
    messages: RwLock<HashMap<MessageId, Message>>,
}

impl MemoryConversationRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConversationRepository for MemoryConversationRepository {
    async fn save(&self, conversation: &Conversation) -> Result<(), ConversationRepositoryError> {
        self.conversations
            .write()
            .await
            .insert(conversation.id, conversation.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &ConversationId,
    ) -> Result<Option<Conversation>, ConversationRepositoryError> {
        Ok(self.conversations.read().await.get(id).cloned())
    }

    async fn find_between(
        &self,
        first: &UserId,
        second: &UserId,
        project: Option<ProjectId>,
    ) -> Result<Option<Conversation>, ConversationRepositoryError> {
        Ok(self
            .conversations
            .read()
            .await
            .values()
            .filter(|conversation| {
                conversation.is_active
                    && conversation.project == project
                    && conversation.involves(*first)
                    && conversation.involves(*second)
            })
            .max_by_key(|conversation| conversation.updated_at)
            .cloned())
    }

    async fn list_for_user(
        &self,
        user: &UserId,
    ) -> Result<Vec<Conversation>, ConversationRepositoryError> {
        let mut joined: Vec<Conversation> = self
            .conversations
            .read()
            .await
            .values()
            .filter(|conversation| conversation.involves(*user))
            .cloned()
            .collect();
        joined.sort_by_key(|conversation| Reverse(conversation.updated_at));
        Ok(joined)
    }

    async fn save_messages(&self, batch: &[Message]) -> Result<(), ConversationRepositoryError> {
        let mut messages = self.messages.write().await;
        for message in batch {
            messages.insert(message.id, message.clone());
        }
        Ok(())
    }

    async fn list_messages(
        &self,
        conversation: &ConversationId,
    ) -> Result<Vec<Message>, ConversationRepositoryError> {
        let mut thread: Vec<Message> = self
            .messages
            .read()
            .await
            .values()
            .filter(|message| message.conversation == *conversation)
            .cloned()
            .collect();
        thread.sort_by_key(|message| message.created_at);
        Ok(thread)
    }
}
