//! Driving port for the AI provider's credit balance.

use async_trait::async_trait;

use crate::domain::{Error, ProviderCredits};

/// Provider balance reads.
#[async_trait]
pub trait CreditsQuery: Send + Sync {
    /// Remaining provider credits.
    async fn provider_credits(&self) -> Result<ProviderCredits, Error>;
}
