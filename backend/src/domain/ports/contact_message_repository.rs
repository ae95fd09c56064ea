//! Port abstraction for contact form submissions.
use async_trait::async_trait;

use crate::domain::{ContactMessage, ContactMessageId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by contact message adapters.
    pub enum ContactMessageRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "contact message repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "contact message repository query failed: {message}",
    }
}

/// Storage of [`ContactMessage`] documents.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactMessageRepository: Send + Sync {
    /// Insert or replace a message.
    async fn save(&self, message: &ContactMessage) -> Result<(), ContactMessageRepositoryError>;

    /// Fetch a message by identifier.
    async fn find_by_id(
        &self,
        id: &ContactMessageId,
    ) -> Result<Option<ContactMessage>, ContactMessageRepositoryError>;

    /// Every message, newest first.
    async fn list(&self) -> Result<Vec<ContactMessage>, ContactMessageRepositoryError>;

    /// Remove a message; returns `false` when it did not exist.
    async fn delete(&self, id: &ContactMessageId) -> Result<bool, ContactMessageRepositoryError>;
}
