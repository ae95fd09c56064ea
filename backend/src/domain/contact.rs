//! Messages sent through the public contact form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::wire_enum::wire_enum;
use crate::domain::{ContactMessageId, EmailAddress, Error};

wire_enum! {
    /// Topic picked on the contact form.
    pub enum ContactCategory as "contact category" {
        /// General question.
        General => "general",
        /// Help with the product.
        Support => "support",
        /// Business proposal.
        Partnership => "partnership",
        /// Contractor enquiry.
        Contractor => "contractor",
        /// Anything else.
        Other => "other",
    }
}

wire_enum! {
    /// Handling state of a contact message.
    pub enum ContactStatus as "contact status" {
        /// Not opened yet.
        New => "new",
        /// Opened by an administrator.
        Read => "read",
        /// Answered.
        Replied => "replied",
        /// Filed away.
        Archived => "archived",
    }
}

/// Contact form validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactError {
    /// Name blank.
    #[error("Name is required")]
    MissingName,
    /// Email missing or malformed.
    #[error("Please enter a valid email")]
    InvalidEmail,
}

impl From<ContactError> for Error {
    fn from(value: ContactError) -> Self {
        let field = match value {
            ContactError::MissingName => "name",
            ContactError::InvalidEmail => "email",
        };
        Self::invalid_request(value.to_string()).with_details(json!({ "field": field }))
    }
}

/// Stored contact form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    /// Identifier.
    pub id: ContactMessageId,
    /// Sender name.
    pub name: String,
    /// Sender email.
    pub email: EmailAddress,
    /// Subject line.
    pub subject: String,
    /// Body.
    pub message: String,
    /// Topic.
    pub category: ContactCategory,
    /// Handling state.
    pub status: ContactStatus,
    /// Submission instant.
    pub created_at: DateTime<Utc>,
}

impl ContactMessage {
    /// Validate a submission. Name and email are required; everything else
    /// defaults to empty text and the general category.
    pub fn submit(
        name: &str,
        email: &str,
        subject: Option<&str>,
        message: Option<&str>,
        category: Option<ContactCategory>,
        now: DateTime<Utc>,
    ) -> Result<Self, ContactError> {
        let sender = name.trim();
        if sender.is_empty() {
            return Err(ContactError::MissingName);
        }
        let address = EmailAddress::parse(email).map_err(|_| ContactError::InvalidEmail)?;
        let text = |raw: Option<&str>| raw.map(str::trim).unwrap_or_default().to_owned();
        Ok(Self {
            id: ContactMessageId::random(),
            name: sender.to_owned(),
            email: address,
            subject: text(subject),
            message: text(message),
            category: category.unwrap_or(ContactCategory::General),
            status: ContactStatus::New,
            created_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn submissions_start_as_new() {
        let message = ContactMessage::submit(
            " Ada ",
            "ADA@example.com",
            Some(" Hello "),
            None,
            None,
            Utc::now(),
        )
        .expect("valid submission");
        assert_eq!(message.name, "Ada");
        assert_eq!(message.email.as_str(), "ada@example.com");
        assert_eq!(message.subject, "Hello");
        assert_eq!(message.message, "");
        assert_eq!(message.category, ContactCategory::General);
        assert_eq!(message.status, ContactStatus::New);
    }

    #[rstest]
    #[case("", "ada@example.com", ContactError::MissingName)]
    #[case("Ada", "not-an-email", ContactError::InvalidEmail)]
    fn name_and_email_are_required(
        #[case] name: &str,
        #[case] email: &str,
        #[case] expected: ContactError,
    ) {
        let err = ContactMessage::submit(name, email, None, None, None, Utc::now())
            .expect_err("invalid submission");
        assert_eq!(err, expected);
    }
}
