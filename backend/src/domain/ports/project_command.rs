//! Driving port for owner-scoped project mutations.
//!
//! Every operation takes the acting user. Projects the actor may not manage
//! are reported as not found so identifiers are not disclosed.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::project::DesignVariant;
use crate::domain::{
    Actor, ContractorId, Error, ImageId, ImageUpload, Project, ProjectChanges, ProjectDraft,
    ProjectId, ProjectStatus,
};

/// Result of a successful generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOutcome {
    /// Project the render belongs to.
    pub project_id: ProjectId,
    /// The stored variant.
    pub variant: DesignVariant,
    /// Credits left on the owner's plan; `None` means unlimited.
    pub credits_remaining: Option<u32>,
}

/// Project mutations.
#[async_trait]
pub trait ProjectCommand: Send + Sync {
    /// Create a draft owned by the actor.
    async fn create(&self, actor: Actor, draft: ProjectDraft) -> Result<Project, Error>;

    /// Apply owner edits.
    async fn update(
        &self,
        actor: Actor,
        id: &ProjectId,
        changes: ProjectChanges,
    ) -> Result<Project, Error>;

    /// Delete a project.
    async fn delete(&self, actor: Actor, id: &ProjectId) -> Result<(), Error>;

    /// Attach already-hosted photos.
    async fn add_images(
        &self,
        actor: Actor,
        id: &ProjectId,
        uploads: Vec<ImageUpload>,
    ) -> Result<Project, Error>;

    /// Detach one photo.
    async fn remove_image(
        &self,
        actor: Actor,
        id: &ProjectId,
        image: &ImageId,
    ) -> Result<Project, Error>;

    /// Render a design variant, optionally overriding the style.
    async fn generate(
        &self,
        actor: Actor,
        id: &ProjectId,
        style: Option<String>,
    ) -> Result<GenerationOutcome, Error>;

    /// List the project in the gallery and return its gallery path.
    async fn publish(&self, actor: Actor, id: &ProjectId) -> Result<String, Error>;

    /// Withdraw the project from the gallery.
    async fn unpublish(&self, actor: Actor, id: &ProjectId) -> Result<Project, Error>;

    /// Choose the gallery cover.
    async fn set_featured_image(
        &self,
        actor: Actor,
        id: &ProjectId,
        url: &str,
    ) -> Result<Project, Error>;

    /// Set the status directly.
    async fn set_status(
        &self,
        actor: Actor,
        id: &ProjectId,
        status: ProjectStatus,
    ) -> Result<Project, Error>;

    /// Accept a contractor's pending request.
    async fn accept_contractor(
        &self,
        actor: Actor,
        id: &ProjectId,
        contractor: &ContractorId,
    ) -> Result<Project, Error>;
}
