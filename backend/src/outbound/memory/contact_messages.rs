//! In-memory `ContactMessageRepository`.

use std::cmp::Reverse;
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{ContactMessageRepository, ContactMessageRepositoryError};
use crate::domain::{ContactMessage, ContactMessageId};

/// Contact submissions kept in process memory.
#[derive(Debug, Default)]
pub struct MemoryContactMessageRepository {
    messages: RwLock<HashMap<ContactMessageId, ContactMessage>>,
}

impl MemoryContactMessageRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContactMessageRepository for MemoryContactMessageRepository {
    async fn save(&self, message: &ContactMessage) -> Result<(), ContactMessageRepositoryError> {
        self.messages
            .write()
            .await
            .insert(message.id, message.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &ContactMessageId,
    ) -> Result<Option<ContactMessage>, ContactMessageRepositoryError> {
        Ok(self.messages.read().await.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<ContactMessage>, ContactMessageRepositoryError> {
        let mut inbox: Vec<ContactMessage> = self.messages.read().await.values().cloned().collect();
        inbox.sort_by_key(|message| Reverse(message.created_at));
        Ok(inbox)
    }

    async fn delete(&self, id: &ContactMessageId) -> Result<bool, ContactMessageRepositoryError> {
        Ok(self.messages.write().await.remove(id).is_some())
    }
}
