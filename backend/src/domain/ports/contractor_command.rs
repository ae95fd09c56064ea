//! Driving port for contractor profile mutations and bids.

use async_trait::async_trait;

use crate::domain::{
    Actor, Contractor, ContractorProfileUpdate, ContractorSetup, Error, NewReview, ProjectId,
};

/// A contractor's interest in a project.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterestRequest {
    /// Note to the owner.
    pub message: Option<String>,
    /// Quoted price.
    pub quotation: Option<f64>,
}

/// Contractor mutations.
#[async_trait]
pub trait ContractorCommand: Send + Sync {
    /// Create the actor's profile. Contractors only; one per user.
    async fn setup(&self, actor: Actor, setup: ContractorSetup) -> Result<Contractor, Error>;

    /// Edit the actor's profile.
    async fn update_profile(
        &self,
        actor: Actor,
        update: ContractorProfileUpdate,
    ) -> Result<Contractor, Error>;

    /// Bid on an open project and open a conversation with its owner.
    async fn express_interest(
        &self,
        actor: Actor,
        project: &ProjectId,
        interest: InterestRequest,
    ) -> Result<(), Error>;

    /// Review a contractor. Clients only.
    async fn review(
        &self,
        actor: Actor,
        slug: &str,
        review: NewReview,
    ) -> Result<Contractor, Error>;
}
