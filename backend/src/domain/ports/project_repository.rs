//! Port abstraction for project persistence.
use async_trait::async_trait;

use crate::domain::{Project, ProjectId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by project repository adapters.
    pub enum ProjectRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "project repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "project repository query failed: {message}",
        /// Another project already uses the slug or gallery slug.
        DuplicateSlug { message: String } => "project slug already taken: {message}",
    }
}

/// Storage of [`Project`] documents.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Insert or replace a project. Slugs and gallery slugs are unique
    /// across projects.
    async fn save(&self, project: &Project) -> Result<(), ProjectRepositoryError>;

    /// Remove a project; returns `false` when it did not exist.
    async fn delete(&self, id: &ProjectId) -> Result<bool, ProjectRepositoryError>;

    /// Fetch a project by identifier.
    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, ProjectRepositoryError>;

    /// Fetch a project by its unlisted share token.
    async fn find_by_share_token(
        &self,
        token: &str,
    ) -> Result<Option<Project>, ProjectRepositoryError>;

    /// Fetch a published project by gallery slug.
    async fn find_published_by_slug(
        &self,
        public_slug: &str,
    ) -> Result<Option<Project>, ProjectRepositoryError>;

    /// Projects of `owner`, newest first.
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Project>, ProjectRepositoryError>;

    /// Published projects, most recently published first.
    async fn list_published(&self) -> Result<Vec<Project>, ProjectRepositoryError>;

    /// Projects visible to contractors with status completed or pending,
    /// newest first.
    async fn list_open_to_contractors(&self) -> Result<Vec<Project>, ProjectRepositoryError>;
}
