//! In-memory `ContractorRepository`.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{ContractorRepository, ContractorRepositoryError};
use crate::domain::{Contractor, ContractorId, UserId};

/// Contractor profiles kept in process memory.
#[derive(Debug, Default)]
pub struct MemoryContractorRepository {
    contractors: RwLock<HashMap<ContractorId, Contractor>>,
}

impl MemoryContractorRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    async fn find_where<F>(&self, predicate: F) -> Option<Contractor>
    where
        F: Fn(&Contractor) -> bool + Send,
    {
        self.contractors
            .read()
            .await
            .values()
            .find(|contractor| predicate(contractor))
            .cloned()
    }
}

#[async_trait]
impl ContractorRepository for MemoryContractorRepository {
    async fn insert(&self, contractor: &Contractor) -> Result<(), ContractorRepositoryError> {
        let mut contractors = self.contractors.write().await;
        let clash = contractors.values().find(|existing| {
            existing.id == contractor.id
                || existing.user == contractor.user
                || existing.slug == contractor.slug
        });
        if let Some(existing) = clash {
            return Err(ContractorRepositoryError::duplicate_profile(
                existing.slug.clone(),
            ));
        }
        contractors.insert(contractor.id, contractor.clone());
        Ok(())
    }

    async fn save(&self, contractor: &Contractor) -> Result<(), ContractorRepositoryError> {
        self.contractors
            .write()
            .await
            .insert(contractor.id, contractor.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &ContractorId,
    ) -> Result<Option<Contractor>, ContractorRepositoryError> {
        Ok(self.contractors.read().await.get(id).cloned())
    }

    async fn find_by_user(
        &self,
        user: &UserId,
    ) -> Result<Option<Contractor>, ContractorRepositoryError> {
        Ok(self.find_where(|contractor| contractor.user == *user).await)
    }

    async fn find_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<Contractor>, ContractorRepositoryError> {
        Ok(self.find_where(|contractor| contractor.slug == slug).await)
    }

    async fn list_active(&self) -> Result<Vec<Contractor>, ContractorRepositoryError> {
        Ok(self
            .contractors
            .read()
            .await
            .values()
            .filter(|contractor| contractor.is_active)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::service_test_support::make_contractor;

    #[tokio::test]
    async fn one_profile_per_user() {
        let repo = MemoryContractorRepository::new();
        let user = UserId::random();
        repo.insert(&make_contractor(user)).await.expect("first profile");

        let err = repo
            .insert(&make_contractor(user))
            .await
            .expect_err("second profile");
        assert!(matches!(
            err,
            ContractorRepositoryError::DuplicateProfile { .. }
        ));
    }

    #[tokio::test]
    async fn inactive_profiles_are_not_listed() {
        let repo = MemoryContractorRepository::new();
        let mut hidden = make_contractor(UserId::random());
        hidden.slug = "atelier-bois-hidden".to_owned();
        hidden.is_active = false;
        repo.insert(&make_contractor(UserId::random()))
            .await
            .expect("insert");
        repo.insert(&hidden).await.expect("insert");

        let active = repo.list_active().await.expect("list");
        assert_eq!(active.len(), 1);
    }
}
