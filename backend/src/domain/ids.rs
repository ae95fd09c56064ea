//! Strongly typed document identifiers.
//!
//! Every stored document is keyed by a UUID. Wrapping each in its own newtype
//! keeps a project id from being passed where a user id is expected.

use serde_json::json;

use crate::domain::Error;

/// Raised when a textual identifier is not a UUID.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field} must be a valid UUID")]
pub struct IdParseError {
    field: &'static str,
}

impl IdParseError {
    /// Name of the identifier that failed to parse.
    #[must_use]
    pub fn field(&self) -> &'static str {
        self.field
    }
}

impl From<IdParseError> for Error {
    fn from(value: IdParseError) -> Self {
        Self::invalid_request(value.to_string()).with_details(json!({
            "field": value.field,
            "code": "invalid_uuid",
        }))
    }
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident => $field:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(uuid::Uuid);

        impl $name {
            /// Allocate a fresh random identifier.
            #[must_use]
            pub fn random() -> Self {
                Self(uuid::Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// Parse a textual identifier.
            pub fn parse(raw: &str) -> Result<Self, $crate::domain::IdParseError> {
                uuid::Uuid::parse_str(raw.trim())
                    .map(Self)
                    .map_err(|_| $crate::domain::IdParseError { field: $field })
            }

            /// Access the inner UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> &uuid::Uuid {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::domain::IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

define_id! {
    /// Identifier of a user account.
    UserId => "userId"
}
define_id! {
    /// Identifier of a renovation project.
    ProjectId => "projectId"
}
define_id! {
    /// Identifier of an image uploaded to a project.
    ImageId => "imageId"
}
define_id! {
    /// Identifier of a generated design variant.
    VariantId => "variantId"
}
define_id! {
    /// Identifier of a contractor profile.
    ContractorId => "contractorId"
}
define_id! {
    /// Identifier of a conversation between users.
    ConversationId => "conversationId"
}
define_id! {
    /// Identifier of a single message.
    MessageId => "messageId"
}
define_id! {
    /// Identifier of a contact form submission.
    ContactMessageId => "contactMessageId"
}
