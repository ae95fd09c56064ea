//! Driving port for account lookups.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Account reads used to resolve the session user.
#[async_trait]
pub trait AccountQuery: Send + Sync {
    /// Fetch an account by identifier.
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, Error>;
}
