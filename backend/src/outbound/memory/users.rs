//! In-memory `UserRepository`.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{EmailAddress, User, UserId};

/// Accounts kept in process memory.
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl MemoryUserRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    async fn find_where<F>(&self, predicate: F) -> Option<User>
    where
        F: Fn(&User) -> bool + Send,
    {
        self.users
            .read()
            .await
            .values()
            .find(|user| predicate(user))
            .cloned()
    }
}

fn email_taken(users: &HashMap<UserId, User>, candidate: &User) -> bool {
    users
        .values()
        .any(|user| user.id != candidate.id && user.email == candidate.email)
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.id) || email_taken(&users, user) {
            return Err(UserRepositoryError::duplicate_email(user.email.as_str()));
        }
        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn save(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut users = self.users.write().await;
        if email_taken(&users, user) {
            return Err(UserRepositoryError::duplicate_email(user.email.as_str()));
        }
        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError> {
        Ok(self.find_where(|user| &user.email == email).await)
    }

    async fn find_by_verification_digest(
        &self,
        digest: &str,
    ) -> Result<Option<User>, UserRepositoryError> {
        Ok(self
            .find_where(|user| user.verification_digest() == Some(digest))
            .await)
    }

    async fn find_by_reset_digest(
        &self,
        digest: &str,
    ) -> Result<Option<User>, UserRepositoryError> {
        Ok(self
            .find_where(|user| user.password_reset_digest() == Some(digest))
            .await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use crate::domain::service_test_support::make_user;

    #[tokio::test]
    async fn insert_rejects_a_taken_email() {
        let repo = MemoryUserRepository::new();
        repo.insert(&make_user("ada@example.com", Role::Client))
            .await
            .expect("first insert");

        let err = repo
            .insert(&make_user("ada@example.com", Role::Contractor))
            .await
            .expect_err("duplicate");
        assert!(matches!(err, UserRepositoryError::DuplicateEmail { .. }));
    }

    #[tokio::test]
    async fn verification_digest_finds_the_account() {
        let repo = MemoryUserRepository::new();
        let mut user = make_user("grace@example.com", Role::Client);
        let _raw = user.issue_verification_token(user.created_at);
        let digest = user
            .verification_digest()
            .map(str::to_owned)
            .expect("digest issued");
        repo.insert(&user).await.expect("insert");

        let found = repo
            .find_by_verification_digest(&digest)
            .await
            .expect("lookup");
        assert_eq!(found.map(|account| account.id), Some(user.id));
        assert!(
            repo.find_by_reset_digest(&digest)
                .await
                .expect("lookup")
                .is_none()
        );
    }
}
