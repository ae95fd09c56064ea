//! PostgreSQL-backed `ContractorRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ContractorRepository, ContractorRepositoryError};
use crate::domain::{Contractor, ContractorId, UserId};

use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, unique_violation,
};
use super::models::{ContractorRow, DocumentError};
use super::pool::{DbPool, PoolError};
use super::schema::contractors;

type ContractorQuery = contractors::BoxedQuery<'static, Pg>;

/// Diesel-backed implementation of the contractor repository port.
#[derive(Clone)]
pub struct DieselContractorRepository {
    pool: DbPool,
}

impl DieselContractorRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn load(
        &self,
        query: ContractorQuery,
    ) -> Result<Vec<Contractor>, ContractorRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = query
            .select(ContractorRow::as_select())
            .load::<ContractorRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter()
            .map(ContractorRow::into_contractor)
            .collect::<Result<Vec<_>, _>>()
            .map_err(map_document_error)
    }

    async fn load_one(
        &self,
        query: ContractorQuery,
    ) -> Result<Option<Contractor>, ContractorRepositoryError> {
        Ok(self.load(query.limit(1)).await?.into_iter().next())
    }
}

fn map_pool_error(error: PoolError) -> ContractorRepositoryError {
    map_basic_pool_error(error, ContractorRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ContractorRepositoryError {
    if let Some(constraint) = unique_violation(&error) {
        return ContractorRepositoryError::duplicate_profile(constraint.to_owned());
    }
    map_basic_diesel_error(
        error,
        ContractorRepositoryError::query,
        ContractorRepositoryError::connection,
    )
}

fn map_document_error(error: DocumentError) -> ContractorRepositoryError {
    ContractorRepositoryError::query(error.to_string())
}

#[async_trait]
impl ContractorRepository for DieselContractorRepository {
    async fn insert(&self, contractor: &Contractor) -> Result<(), ContractorRepositoryError> {
        let row = ContractorRow::from_contractor(contractor).map_err(map_document_error)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(contractors::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn save(&self, contractor: &Contractor) -> Result<(), ContractorRepositoryError> {
        let row = ContractorRow::from_contractor(contractor).map_err(map_document_error)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(contractors::table)
            .values(&row)
            .on_conflict(contractors::id)
            .do_update()
            .set(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &ContractorId,
    ) -> Result<Option<Contractor>, ContractorRepositoryError> {
        self.load_one(
            contractors::table
                .into_boxed()
                .filter(contractors::id.eq(*id.as_uuid())),
        )
        .await
    }

    async fn find_by_user(
        &self,
        user: &UserId,
    ) -> Result<Option<Contractor>, ContractorRepositoryError> {
        self.load_one(
            contractors::table
                .into_boxed()
                .filter(contractors::user_id.eq(*user.as_uuid())),
        )
        .await
    }

    async fn find_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<Contractor>, ContractorRepositoryError> {
        self.load_one(
            contractors::table
                .into_boxed()
                .filter(contractors::slug.eq(slug.to_owned())),
        )
        .await
    }

    async fn list_active(&self) -> Result<Vec<Contractor>, ContractorRepositoryError> {
        self.load(
            contractors::table
                .into_boxed()
                .filter(contractors::is_active.eq(true)),
        )
        .await
    }
}
