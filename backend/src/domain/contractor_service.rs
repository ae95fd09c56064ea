//! Contractor domain service.
//!
//! Owns contractor profiles, the public directory, reviews, and bids on open
//! projects. A bid also opens (or reuses) the conversation between the
//! contractor and the project owner and posts a system message there.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::port_errors::{
    map_contractor_error, map_conversation_error, map_project_error, map_user_error,
};
use crate::domain::ports::{
    ContractorCommand, ContractorQuery, ContractorRepository, ConversationRepository,
    InterestRequest, ProjectRepository, UserRepository,
};
use crate::domain::{
    Actor, Contractor, ContractorFilter, ContractorProfileUpdate, ContractorSetup, Conversation,
    Error, Message, MessageContent, NewReview, Project, ProjectId, Role,
};

/// Contractor service implementing the contractor ports.
#[derive(Clone)]
pub struct ContractorService<C, P, U, V> {
    contractors: Arc<C>,
    projects: Arc<P>,
    users: Arc<U>,
    conversations: Arc<V>,
    clock: Arc<dyn Clock>,
}

impl<C, P, U, V> ContractorService<C, P, U, V> {
    /// Create a new service.
    pub fn new(
        contractors: Arc<C>,
        projects: Arc<P>,
        users: Arc<U>,
        conversations: Arc<V>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            contractors,
            projects,
            users,
            conversations,
            clock,
        }
    }
}

fn require_contractor(actor: Actor) -> Result<(), Error> {
    if actor.role == Role::Contractor {
        Ok(())
    } else {
        Err(Error::forbidden("Contractor account required"))
    }
}

fn interest_notice(profile: &Contractor, project: &Project, note: Option<&str>) -> String {
    let mut text = format!(
        "{} is interested in your project \"{}\".",
        profile.company_name, project.title
    );
    if let Some(note) = note.map(str::trim).filter(|note| !note.is_empty()) {
        text.push_str("\n\n");
        text.push_str(note);
    }
    text
}

impl<C, P, U, V> ContractorService<C, P, U, V>
where
    C: ContractorRepository,
    P: ProjectRepository,
    U: UserRepository,
    V: ConversationRepository,
{
    async fn profile_of(&self, actor: Actor) -> Result<Option<Contractor>, Error> {
        self.contractors
            .find_by_user(&actor.id)
            .await
            .map_err(map_contractor_error)
    }

    async fn require_profile(&self, actor: Actor) -> Result<Contractor, Error> {
        require_contractor(actor)?;
        self.profile_of(actor)
            .await?
            .ok_or_else(|| Error::not_found("Set up your contractor profile first"))
    }

    async fn save_profile(&self, profile: &Contractor) -> Result<(), Error> {
        self.contractors
            .save(profile)
            .await
            .map_err(map_contractor_error)
    }

    async fn find_active_by_slug(&self, slug: &str) -> Result<Contractor, Error> {
        self.contractors
            .find_by_slug(slug)
            .await
            .map_err(map_contractor_error)?
            .filter(|profile| profile.is_active)
            .ok_or_else(|| Error::not_found("Contractor not found"))
    }

    /// Post the bid notice in the conversation between the contractor and the
    /// project owner, opening it when needed.
    async fn notify_owner(
        &self,
        actor: Actor,
        project: &Project,
        content: MessageContent,
    ) -> Result<(), Error> {
        let now = self.clock.utc();
        let mut conversation = self
            .conversations
            .find_between(&actor.id, &project.owner, Some(project.id))
            .await
            .map_err(map_conversation_error)?
            .unwrap_or_else(|| Conversation::open([actor.id, project.owner], Some(project.id), now));
        let message = Message::system(conversation.id, actor.id, content, project.id, now);
        conversation.record(&message);
        self.conversations
            .save(&conversation)
            .await
            .map_err(map_conversation_error)?;
        self.conversations
            .save_messages(std::slice::from_ref(&message))
            .await
            .map_err(map_conversation_error)
    }
}

#[async_trait]
impl<C, P, U, V> ContractorCommand for ContractorService<C, P, U, V>
where
    C: ContractorRepository,
    P: ProjectRepository,
    U: UserRepository,
    V: ConversationRepository,
{
    async fn setup(&self, actor: Actor, setup: ContractorSetup) -> Result<Contractor, Error> {
        require_contractor(actor)?;
        if self.profile_of(actor).await?.is_some() {
            return Err(Error::conflict("Contractor profile already exists"));
        }
        let user = self
            .users
            .find_by_id(&actor.id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found("User not found"))?;

        let profile = Contractor::create(user.id, &user.email, setup, self.clock.utc());
        self.contractors
            .insert(&profile)
            .await
            .map_err(map_contractor_error)?;
        info!(contractor_id = %profile.id, slug = %profile.slug, "contractor profile created");
        Ok(profile)
    }

    async fn update_profile(
        &self,
        actor: Actor,
        update: ContractorProfileUpdate,
    ) -> Result<Contractor, Error> {
        let mut profile = self.require_profile(actor).await?;
        profile.apply_update(update, self.clock.utc())?;
        self.save_profile(&profile).await?;
        Ok(profile)
    }

    async fn express_interest(
        &self,
        actor: Actor,
        project: &ProjectId,
        interest: InterestRequest,
    ) -> Result<(), Error> {
        let mut profile = self.require_profile(actor).await?;
        let mut target = self
            .projects
            .find_by_id(project)
            .await
            .map_err(map_project_error)?
            .filter(Project::is_open_to_contractors)
            .ok_or_else(|| Error::not_found("Project not found"))?;

        let now = self.clock.utc();
        let notice = MessageContent::try_new(&interest_notice(
            &profile,
            &target,
            interest.message.as_deref(),
        ))?;
        target.add_contractor_request(profile.id, interest.message, interest.quotation, now)?;
        self.projects
            .save(&target)
            .await
            .map_err(map_project_error)?;

        profile.record_project_received();
        profile.updated_at = now;
        self.save_profile(&profile).await?;

        self.notify_owner(actor, &target, notice).await?;
        info!(contractor_id = %profile.id, project_id = %target.id, "interest expressed");
        Ok(())
    }

    async fn review(
        &self,
        actor: Actor,
        slug: &str,
        review: NewReview,
    ) -> Result<Contractor, Error> {
        if actor.role != Role::Client {
            return Err(Error::forbidden("Only clients can leave reviews"));
        }
        let mut profile = self.find_active_by_slug(slug).await?;
        profile.add_review(actor.id, review, self.clock.utc());
        self.save_profile(&profile).await?;
        Ok(profile)
    }
}

#[async_trait]
impl<C, P, U, V> ContractorQuery for ContractorService<C, P, U, V>
where
    C: ContractorRepository,
    P: ProjectRepository,
    U: UserRepository,
    V: ConversationRepository,
{
    async fn browse(&self, filter: ContractorFilter) -> Result<Vec<Contractor>, Error> {
        let active = self
            .contractors
            .list_active()
            .await
            .map_err(map_contractor_error)?;
        Ok(filter.apply(active))
    }

    async fn view(&self, slug: &str) -> Result<Contractor, Error> {
        let mut profile = self.find_active_by_slug(slug).await?;
        profile.record_profile_view();
        self.save_profile(&profile).await?;
        Ok(profile)
    }

    async fn own_profile(&self, actor: Actor) -> Result<Option<Contractor>, Error> {
        require_contractor(actor)?;
        self.profile_of(actor).await
    }

    async fn available_projects(
        &self,
        actor: Actor,
        limit: Option<usize>,
    ) -> Result<Vec<Project>, Error> {
        let profile = self.require_profile(actor).await?;
        let open = self
            .projects
            .list_open_to_contractors()
            .await
            .map_err(map_project_error)?;
        Ok(open
            .into_iter()
            .filter(|project| profile.covers(project.room_type))
            .take(limit.unwrap_or(usize::MAX))
            .collect())
    }
}

#[cfg(test)]
#[path = "contractor_service_tests.rs"]
mod tests;
