//! Contact inbox service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::port_errors::map_contact_error;
use crate::domain::ports::{ContactInbox, ContactMessageRepository};
use crate::domain::{ContactMessage, ContactMessageId, ContactStatus, Error};

/// Contact inbox backed by a [`ContactMessageRepository`].
#[derive(Clone)]
pub struct ContactService<R> {
    messages: Arc<R>,
}

impl<R> ContactService<R> {
    /// Create a new service.
    pub fn new(messages: Arc<R>) -> Self {
        Self { messages }
    }
}

fn message_not_found() -> Error {
    Error::not_found("Message not found")
}

#[async_trait]
impl<R> ContactInbox for ContactService<R>
where
    R: ContactMessageRepository,
{
    async fn submit(&self, message: ContactMessage) -> Result<ContactMessage, Error> {
        self.messages
            .save(&message)
            .await
            .map_err(map_contact_error)?;
        info!(
            contact_id = %message.id,
            category = message.category.as_str(),
            "contact message received"
        );
        Ok(message)
    }

    async fn list(&self) -> Result<Vec<ContactMessage>, Error> {
        self.messages.list().await.map_err(map_contact_error)
    }

    async fn set_status(
        &self,
        id: &ContactMessageId,
        status: ContactStatus,
    ) -> Result<ContactMessage, Error> {
        let mut message = self
            .messages
            .find_by_id(id)
            .await
            .map_err(map_contact_error)?
            .ok_or_else(message_not_found)?;
        message.status = status;
        self.messages
            .save(&message)
            .await
            .map_err(map_contact_error)?;
        Ok(message)
    }

    async fn delete(&self, id: &ContactMessageId) -> Result<(), Error> {
        if self.messages.delete(id).await.map_err(map_contact_error)? {
            Ok(())
        } else {
            Err(message_not_found())
        }
    }
}
