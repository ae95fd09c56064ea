//! Port abstraction for account persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{EmailAddress, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another account already uses the email address.
        DuplicateEmail { email: String } => "email already registered: {email}",
    }
}

/// Storage of [`User`] documents.
///
/// Token lookups receive the SHA-256 digest, never the clear-text token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new account; fails with `DuplicateEmail` when the address is
    /// taken.
    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError>;

    /// Replace an existing account document.
    async fn save(&self, user: &User) -> Result<(), UserRepositoryError>;

    /// Fetch an account by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch an account by normalised email.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch the account holding a pending verification token.
    async fn find_by_verification_digest(
        &self,
        digest: &str,
    ) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch the account holding a pending password reset token.
    async fn find_by_reset_digest(&self, digest: &str)
    -> Result<Option<User>, UserRepositoryError>;
}
