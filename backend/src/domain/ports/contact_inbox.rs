//! Driving port for contact form submissions and their triage.

use async_trait::async_trait;

use crate::domain::{ContactMessage, ContactMessageId, ContactStatus, Error};

/// Contact form use-cases. Everything except `submit` is admin-only and
/// guarded by the inbound adapter.
#[async_trait]
pub trait ContactInbox: Send + Sync {
    /// Store a validated submission.
    async fn submit(&self, message: ContactMessage) -> Result<ContactMessage, Error>;

    /// Every submission, newest first.
    async fn list(&self) -> Result<Vec<ContactMessage>, Error>;

    /// Move a submission to `status`.
    async fn set_status(
        &self,
        id: &ContactMessageId,
        status: ContactStatus,
    ) -> Result<ContactMessage, Error>;

    /// Delete a submission.
    async fn delete(&self, id: &ContactMessageId) -> Result<(), Error>;
}
