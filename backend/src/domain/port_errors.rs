//! Mapping of driven-port failures onto the API error taxonomy.
//!
//! Connection failures surface as `service_unavailable`, query failures as
//! `internal_error`. Details stay in the logs; internal messages are redacted
//! before leaving the process.

use tracing::warn;

use crate::domain::Error;
use crate::domain::ports::{
    ContactMessageRepositoryError, ContractorRepositoryError, ConversationRepositoryError,
    DesignGenerationError, MailerError, PasswordHashError, ProjectRepositoryError,
    SiteContentRepositoryError, UserRepositoryError,
};

fn unavailable(error: &impl std::fmt::Display) -> Error {
    warn!(%error, "repository unavailable");
    Error::service_unavailable("Storage is temporarily unavailable")
}

fn internal(error: &impl std::fmt::Display) -> Error {
    warn!(%error, "repository query failed");
    Error::internal(error.to_string())
}

pub(crate) fn map_user_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { .. } => unavailable(&error),
        UserRepositoryError::Query { .. } => internal(&error),
        UserRepositoryError::DuplicateEmail { .. } => Error::conflict("Email already registered")
            .with_details(serde_json::json!({ "field": "email" })),
    }
}

pub(crate) fn map_project_error(error: ProjectRepositoryError) -> Error {
    match error {
        ProjectRepositoryError::Connection { .. } => unavailable(&error),
        ProjectRepositoryError::Query { .. } => internal(&error),
        ProjectRepositoryError::DuplicateSlug { .. } => {
            Error::conflict("Another project already uses this slug, please retry")
        }
    }
}

pub(crate) fn map_contractor_error(error: ContractorRepositoryError) -> Error {
    match error {
        ContractorRepositoryError::Connection { .. } => unavailable(&error),
        ContractorRepositoryError::Query { .. } => internal(&error),
        ContractorRepositoryError::DuplicateProfile { .. } => {
            Error::conflict("Contractor profile already exists")
        }
    }
}

pub(crate) fn map_conversation_error(error: ConversationRepositoryError) -> Error {
    match error {
        ConversationRepositoryError::Connection { .. } => unavailable(&error),
        ConversationRepositoryError::Query { .. } => internal(&error),
    }
}

pub(crate) fn map_contact_error(error: ContactMessageRepositoryError) -> Error {
    match error {
        ContactMessageRepositoryError::Connection { .. } => unavailable(&error),
        ContactMessageRepositoryError::Query { .. } => internal(&error),
    }
}

pub(crate) fn map_site_content_error(error: SiteContentRepositoryError) -> Error {
    match error {
        SiteContentRepositoryError::Connection { .. } => unavailable(&error),
        SiteContentRepositoryError::Query { .. } => internal(&error),
    }
}

pub(crate) fn map_hash_error(error: PasswordHashError) -> Error {
    warn!(%error, "password hashing failed");
    Error::internal(error.to_string())
}

pub(crate) fn map_mailer_error(error: MailerError) -> Error {
    warn!(%error, "mail delivery failed");
    Error::service_unavailable("Email could not be sent")
}

/// Provider failures: missing configuration is `service_unavailable`,
/// everything else `upstream_failure` carrying the user-facing message.
pub(crate) fn map_generation_error(error: &DesignGenerationError) -> Error {
    match error {
        DesignGenerationError::NotConfigured => Error::service_unavailable(error.user_message()),
        _ => Error::upstream_failure(error.user_message()),
    }
}
