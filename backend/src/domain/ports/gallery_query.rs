//! Driving port for the public gallery of published projects.

use async_trait::async_trait;

use crate::domain::{Error, Project};

/// Public gallery reads.
#[async_trait]
pub trait GalleryQuery: Send + Sync {
    /// Published projects, most recently published first.
    async fn published(&self) -> Result<Vec<Project>, Error>;

    /// A published project by gallery slug; counts a view.
    async fn by_public_slug(&self, public_slug: &str) -> Result<Project, Error>;
}
