//! Project domain service.
//!
//! Implements the owner-scoped project ports, the public gallery, and the AI
//! generation flow. Generation checks the owner's plan allowance, moves the
//! project through `generating`, calls the [`DesignGenerator`], and records
//! either the new variant or the failure before returning.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::catalogue::quality_for;
use crate::domain::port_errors::{
    map_contractor_error, map_generation_error, map_project_error, map_user_error,
};
use crate::domain::ports::{
    ContractorRepository, CreditsQuery, DesignGenerator, GalleryQuery, GenerationOutcome,
    ProjectCommand, ProjectQuery, ProjectRepository, ProjectRepositoryError, UserRepository,
};
use crate::domain::{
    Actor, ContractorId, Error, GenerationMode, GenerationRequest, ImageId, ImageUpload, Project,
    ProjectChanges, ProjectDraft, ProjectId, ProjectStats, ProjectStatus, ProviderCredits, User,
};

/// Settings for the project service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSettings {
    /// Origin prefixed to relative image URLs before they reach the
    /// generation provider.
    pub public_base_url: String,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            public_base_url: "http://localhost:3000".to_owned(),
        }
    }
}

/// Project service implementing the project, gallery, and credits ports.
#[derive(Clone)]
pub struct ProjectService<P, U, C, G> {
    projects: Arc<P>,
    users: Arc<U>,
    contractors: Arc<C>,
    generator: Arc<G>,
    clock: Arc<dyn Clock>,
    settings: ProjectSettings,
}

impl<P, U, C, G> ProjectService<P, U, C, G> {
    /// Create a new service.
    pub fn new(
        projects: Arc<P>,
        users: Arc<U>,
        contractors: Arc<C>,
        generator: Arc<G>,
        clock: Arc<dyn Clock>,
        settings: ProjectSettings,
    ) -> Self {
        Self {
            projects,
            users,
            contractors,
            generator,
            clock,
            settings,
        }
    }

    fn absolute_url(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            return url.to_owned();
        }
        format!(
            "{}/{}",
            self.settings.public_base_url.trim_end_matches('/'),
            url.trim_start_matches('/')
        )
    }
}

/// Extra save attempts after a slug collision.
const SLUG_RETRIES: u32 = 3;

fn project_not_found() -> Error {
    Error::not_found("Project not found")
}

impl<P, U, C, G> ProjectService<P, U, C, G>
where
    P: ProjectRepository,
    U: UserRepository,
    C: ContractorRepository,
    G: DesignGenerator,
{
    /// Load a project the actor may manage. Foreign projects look missing.
    async fn owned(&self, actor: Actor, id: &ProjectId) -> Result<Project, Error> {
        self.projects
            .find_by_id(id)
            .await
            .map_err(map_project_error)?
            .filter(|project| actor.may_manage(project.owner))
            .ok_or_else(project_not_found)
    }

    async fn save(&self, project: &Project) -> Result<(), Error> {
        self.projects.save(project).await.map_err(map_project_error)
    }

    /// Save a project whose slug may have just been derived from its title,
    /// renumbering the slug when another project already holds it.
    async fn save_claiming_slug(&self, project: &mut Project) -> Result<(), Error> {
        let mut attempt = 0;
        loop {
            match self.projects.save(project).await {
                Err(ProjectRepositoryError::DuplicateSlug { .. }) if attempt < SLUG_RETRIES => {
                    attempt += 1;
                    project.disambiguate_slug(attempt);
                }
                result => return result.map_err(map_project_error),
            }
        }
    }

    /// Load, mutate, and store a managed project.
    async fn modify<F>(&self, actor: Actor, id: &ProjectId, change: F) -> Result<Project, Error>
    where
        F: FnOnce(&mut Project) -> Result<(), Error> + Send,
    {
        let mut project = self.owned(actor, id).await?;
        change(&mut project)?;
        self.save(&project).await?;
        Ok(project)
    }

    /// Current stored copy of a project, whatever its owner.
    async fn reload(&self, id: &ProjectId) -> Result<Project, Error> {
        self.projects
            .find_by_id(id)
            .await
            .map_err(map_project_error)?
            .ok_or_else(project_not_found)
    }

    async fn owner_account(&self, project: &Project) -> Result<User, Error> {
        self.users
            .find_by_id(&project.owner)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found("User not found"))
    }

    fn generation_request(
        &self,
        project: &Project,
        owner: &User,
        style: Option<&str>,
    ) -> Result<GenerationRequest, Error> {
        let source = project
            .source_image()
            .ok_or(crate::domain::ProjectError::NoSourceImage)?;
        Ok(GenerationRequest {
            image_url: self.absolute_url(&source.url),
            room_type: project.room_type.as_str().to_owned(),
            style: project.generation_style(style)?,
            mode: GenerationMode::Interior,
            quality: quality_for(owner.subscription.effective_plan()),
        })
    }
}

#[async_trait]
impl<P, U, C, G> ProjectCommand for ProjectService<P, U, C, G>
where
    P: ProjectRepository,
    U: UserRepository,
    C: ContractorRepository,
    G: DesignGenerator,
{
    async fn create(&self, actor: Actor, draft: ProjectDraft) -> Result<Project, Error> {
        let mut project = Project::create(actor.id, draft.validate()?, self.clock.utc());
        self.save_claiming_slug(&mut project).await?;
        info!(project_id = %project.id, owner = %project.owner, "project created");
        Ok(project)
    }

    async fn update(
        &self,
        actor: Actor,
        id: &ProjectId,
        changes: ProjectChanges,
    ) -> Result<Project, Error> {
        let mut project = self.owned(actor, id).await?;
        project.apply_changes(changes, self.clock.utc())?;
        self.save_claiming_slug(&mut project).await?;
        Ok(project)
    }

    async fn delete(&self, actor: Actor, id: &ProjectId) -> Result<(), Error> {
        let project = self.owned(actor, id).await?;
        if !self
            .projects
            .delete(&project.id)
            .await
            .map_err(map_project_error)?
        {
            return Err(project_not_found());
        }
        info!(project_id = %project.id, "project deleted");
        Ok(())
    }

    async fn add_images(
        &self,
        actor: Actor,
        id: &ProjectId,
        uploads: Vec<ImageUpload>,
    ) -> Result<Project, Error> {
        let now = self.clock.utc();
        self.modify(actor, id, |project| {
            project
                .add_images(uploads, now)
                .map(|_| ())
                .map_err(Error::from)
        })
        .await
    }

    async fn remove_image(
        &self,
        actor: Actor,
        id: &ProjectId,
        image: &ImageId,
    ) -> Result<Project, Error> {
        let now = self.clock.utc();
        let image = *image;
        self.modify(actor, id, |project| {
            project
                .remove_image(image, now)
                .map(|_| ())
                .map_err(Error::from)
        })
        .await
    }

    async fn generate(
        &self,
        actor: Actor,
        id: &ProjectId,
        style: Option<String>,
    ) -> Result<GenerationOutcome, Error> {
        let mut project = self.owned(actor, id).await?;
        let owner = self.owner_account(&project).await?;
        if !owner.subscription.can_generate() {
            return Err(Error::forbidden("No generation credits remaining"));
        }
        let request = self.generation_request(&project, &owner, style.as_deref())?;

        project.begin_generation(self.clock.utc())?;
        self.save(&project).await?;
        info!(project_id = %project.id, style = %request.style, "generation started");

        let result = self.generator.generate(&request).await;

        // The provider call is slow; apply its outcome to fresh copies so
        // edits made in the meantime are kept.
        let mut project = self.reload(&project.id).await?;
        match result {
            Ok(design) => {
                let variant = project.complete_generation(request, design, self.clock.utc());
                self.save(&project).await?;
                let mut owner = self.owner_account(&project).await?;
                owner.subscription.consume_credit();
                owner.updated_at = self.clock.utc();
                self.users.save(&owner).await.map_err(map_user_error)?;
                info!(project_id = %project.id, variant_id = %variant.id, "generation completed");
                Ok(GenerationOutcome {
                    project_id: project.id,
                    variant,
                    credits_remaining: owner.subscription.credits_remaining(),
                })
            }
            Err(error) => {
                warn!(project_id = %project.id, error = %error, "generation failed");
                project.fail_generation(request, error.user_message(), self.clock.utc());
                self.save(&project).await?;
                Err(map_generation_error(&error))
            }
        }
    }

    async fn publish(&self, actor: Actor, id: &ProjectId) -> Result<String, Error> {
        let mut project = self.owned(actor, id).await?;
        let path = project.publish(self.clock.utc())?;
        self.save(&project).await?;
        info!(project_id = %project.id, path = %path, "project published");
        Ok(path)
    }

    async fn unpublish(&self, actor: Actor, id: &ProjectId) -> Result<Project, Error> {
        let now = self.clock.utc();
        self.modify(actor, id, |project| {
            project.unpublish(now);
            Ok(())
        })
        .await
    }

    async fn set_featured_image(
        &self,
        actor: Actor,
        id: &ProjectId,
        url: &str,
    ) -> Result<Project, Error> {
        let now = self.clock.utc();
        self.modify(actor, id, |project| {
            project.set_featured_image(url, now).map_err(Error::from)
        })
        .await
    }

    async fn set_status(
        &self,
        actor: Actor,
        id: &ProjectId,
        status: ProjectStatus,
    ) -> Result<Project, Error> {
        let now = self.clock.utc();
        self.modify(actor, id, |project| {
            project.set_status(status, now).map_err(Error::from)
        })
        .await
    }

    async fn accept_contractor(
        &self,
        actor: Actor,
        id: &ProjectId,
        contractor: &ContractorId,
    ) -> Result<Project, Error> {
        let now = self.clock.utc();
        let chosen = *contractor;
        let project = self
            .modify(actor, id, |project| {
                project.accept_contractor(chosen, now).map_err(Error::from)
            })
            .await?;

        if let Some(mut profile) = self
            .contractors
            .find_by_id(&chosen)
            .await
            .map_err(map_contractor_error)?
        {
            profile.record_project_accepted();
            profile.updated_at = now;
            self.contractors
                .save(&profile)
                .await
                .map_err(map_contractor_error)?;
        } else {
            warn!(contractor_id = %chosen, "accepted contractor has no profile");
        }
        info!(project_id = %project.id, contractor_id = %chosen, "contractor accepted");
        Ok(project)
    }
}

#[async_trait]
impl<P, U, C, G> ProjectQuery for ProjectService<P, U, C, G>
where
    P: ProjectRepository,
    U: UserRepository,
    C: ContractorRepository,
    G: DesignGenerator,
{
    async fn list_own(&self, actor: Actor) -> Result<Vec<Project>, Error> {
        self.projects
            .list_by_owner(&actor.id)
            .await
            .map_err(map_project_error)
    }

    async fn get(&self, actor: Actor, id: &ProjectId) -> Result<Project, Error> {
        self.owned(actor, id).await
    }

    async fn by_share_token(&self, token: &str) -> Result<Project, Error> {
        self.projects
            .find_by_share_token(token.trim())
            .await
            .map_err(map_project_error)?
            .ok_or_else(project_not_found)
    }

    async fn stats(&self, actor: Actor) -> Result<ProjectStats, Error> {
        let projects = self.list_own(actor).await?;
        Ok(ProjectStats::from_projects(&projects))
    }
}

#[async_trait]
impl<P, U, C, G> GalleryQuery for ProjectService<P, U, C, G>
where
    P: ProjectRepository,
    U: UserRepository,
    C: ContractorRepository,
    G: DesignGenerator,
{
    async fn published(&self) -> Result<Vec<Project>, Error> {
        self.projects
            .list_published()
            .await
            .map_err(map_project_error)
    }

    async fn by_public_slug(&self, public_slug: &str) -> Result<Project, Error> {
        let mut project = self
            .projects
            .find_published_by_slug(public_slug)
            .await
            .map_err(map_project_error)?
            .ok_or_else(project_not_found)?;
        project.record_view();
        self.save(&project).await?;
        Ok(project)
    }
}

#[async_trait]
impl<P, U, C, G> CreditsQuery for ProjectService<P, U, C, G>
where
    P: ProjectRepository,
    U: UserRepository,
    C: ContractorRepository,
    G: DesignGenerator,
{
    async fn provider_credits(&self) -> Result<ProviderCredits, Error> {
        self.generator
            .credits()
            .await
            .map_err(|error| map_generation_error(&error))
    }
}

#[cfg(test)]
#[path = "project_service_tests.rs"]
mod tests;
