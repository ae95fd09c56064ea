//! Driven port for transactional email.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::EmailAddress;

use super::define_port_error;

define_port_error! {
    /// Errors raised by mail adapters.
    pub enum MailerError {
        /// The message could not be handed to the transport.
        Delivery { message: String } => "email delivery failed: {message}",
    }
}

/// A plain-text transactional email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    /// Recipient.
    pub to: EmailAddress,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
}

/// Port for sending account emails (verification, password reset).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send one email.
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailerError>;
}

/// Mailer that keeps every message in memory so tests can read links.
#[derive(Debug, Default)]
pub struct FixtureMailer {
    sent: Mutex<Vec<OutboundEmail>>,
}

impl FixtureMailer {
    /// Messages sent so far, oldest first.
    #[must_use]
    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Mailer for FixtureMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailerError> {
        let mut sent = self
            .sent
            .lock()
            .map_err(|_| MailerError::delivery("fixture mailbox poisoned"))?;
        sent.push(email.clone());
        Ok(())
    }
}
