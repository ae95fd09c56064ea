//! Mail adapter that records outgoing email in the structured log.
//!
//! Bodies carry one-time links, so only the recipient and subject are
//! logged. Deployments with a real mail relay swap in another `Mailer`.

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{Mailer, MailerError, OutboundEmail};

/// `Mailer` that logs each message instead of delivering it.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingMailer;

#[async_trait]
impl Mailer for LoggingMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailerError> {
        info!(
            to = %email.to.as_str(),
            subject = %email.subject,
            body_len = email.body.len(),
            "outbound email queued"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EmailAddress;

    #[tokio::test]
    async fn logging_never_fails() {
        let email = OutboundEmail {
            to: EmailAddress::parse("ada@example.com").expect("email"),
            subject: "Verify Your CraftyCrib Account".to_owned(),
            body: "https://craftycrib.example/auth/verify/abc".to_owned(),
        };
        LoggingMailer.send(&email).await.expect("logged");
    }
}
