//! Driving port for project reads.

use async_trait::async_trait;

use crate::domain::{Actor, Error, Project, ProjectId, ProjectStats};

/// Project reads.
#[async_trait]
pub trait ProjectQuery: Send + Sync {
    /// The actor's projects, newest first.
    async fn list_own(&self, actor: Actor) -> Result<Vec<Project>, Error>;

    /// One project the actor may manage.
    async fn get(&self, actor: Actor, id: &ProjectId) -> Result<Project, Error>;

    /// Project behind an unlisted share link. Public.
    async fn by_share_token(&self, token: &str) -> Result<Project, Error>;

    /// Dashboard figures for the actor's projects.
    async fn stats(&self, actor: Actor) -> Result<ProjectStats, Error>;
}
