//! Port abstraction for contractor profile persistence.
use async_trait::async_trait;

use crate::domain::{Contractor, ContractorId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by contractor repository adapters.
    pub enum ContractorRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "contractor repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "contractor repository query failed: {message}",
        /// The user already owns a profile.
        DuplicateProfile { message: String } => "contractor profile already exists: {message}",
    }
}

/// Storage of [`Contractor`] documents.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContractorRepository: Send + Sync {
    /// Store a new profile; one per user.
    async fn insert(&self, contractor: &Contractor) -> Result<(), ContractorRepositoryError>;

    /// Replace an existing profile.
    async fn save(&self, contractor: &Contractor) -> Result<(), ContractorRepositoryError>;

    /// Fetch a profile by identifier.
    async fn find_by_id(
        &self,
        id: &ContractorId,
    ) -> Result<Option<Contractor>, ContractorRepositoryError>;

    /// Fetch the profile owned by `user`.
    async fn find_by_user(
        &self,
        user: &UserId,
    ) -> Result<Option<Contractor>, ContractorRepositoryError>;

    /// Fetch a profile by slug.
    async fn find_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<Contractor>, ContractorRepositoryError>;

    /// Every active profile, in no particular order.
    async fn list_active(&self) -> Result<Vec<Contractor>, ContractorRepositoryError>;
}
