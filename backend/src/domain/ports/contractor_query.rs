//! Driving port for the contractor directory.

use async_trait::async_trait;

use crate::domain::{Actor, Contractor, ContractorFilter, Error, Project};

/// Contractor reads.
#[async_trait]
pub trait ContractorQuery: Send + Sync {
    /// Filtered, ranked directory page.
    async fn browse(&self, filter: ContractorFilter) -> Result<Vec<Contractor>, Error>;

    /// Public profile by slug; counts a profile view.
    async fn view(&self, slug: &str) -> Result<Contractor, Error>;

    /// The actor's own profile, when set up.
    async fn own_profile(&self, actor: Actor) -> Result<Option<Contractor>, Error>;

    /// Open projects matching the actor's specialties, newest first.
    async fn available_projects(
        &self,
        actor: Actor,
        limit: Option<usize>,
    ) -> Result<Vec<Project>, Error>;
}
