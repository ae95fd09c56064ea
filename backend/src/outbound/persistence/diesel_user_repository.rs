//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Token lookups hit the indexed digest columns; the account itself is
//! stored as a JSONB document.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{EmailAddress, User, UserId};

use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, unique_violation,
};
use super::models::{DocumentError, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

type UserQuery = users::BoxedQuery<'static, Pg>;

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn find_one<F>(&self, filter: F) -> Result<Option<User>, UserRepositoryError>
    where
        F: FnOnce(UserQuery) -> UserQuery + Send,
    {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = filter(users::table.into_boxed())
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(UserRow::into_user)
            .transpose()
            .map_err(map_document_error)
    }
}

fn map_pool_error(error: PoolError) -> UserRepositoryError {
    map_basic_pool_error(error, UserRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserRepositoryError {
    map_basic_diesel_error(
        error,
        UserRepositoryError::query,
        UserRepositoryError::connection,
    )
}

fn map_document_error(error: DocumentError) -> UserRepositoryError {
    UserRepositoryError::query(error.to_string())
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError> {
        let row = UserRow::from_user(user).map_err(map_document_error)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        match diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
        {
            Ok(_) => Ok(()),
            Err(error) if unique_violation(&error).is_some() => {
                Err(UserRepositoryError::duplicate_email(user.email.as_str()))
            }
            Err(error) => Err(map_diesel_error(error)),
        }
    }

    async fn save(&self, user: &User) -> Result<(), UserRepositoryError> {
        let row = UserRow::from_user(user).map_err(map_document_error)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        match diesel::insert_into(users::table)
            .values(&row)
            .on_conflict(users::id)
            .do_update()
            .set(&row)
            .execute(&mut conn)
            .await
        {
            Ok(_) => Ok(()),
            Err(error) if unique_violation(&error).is_some() => {
                Err(UserRepositoryError::duplicate_email(user.email.as_str()))
            }
            Err(error) => Err(map_diesel_error(error)),
        }
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let wanted = *id.as_uuid();
        self.find_one(move |query| query.filter(users::id.eq(wanted)))
            .await
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError> {
        let address = email.as_str().to_owned();
        self.find_one(move |query| query.filter(users::email.eq(address)))
            .await
    }

    async fn find_by_verification_digest(
        &self,
        digest: &str,
    ) -> Result<Option<User>, UserRepositoryError> {
        let wanted = digest.to_owned();
        self.find_one(move |query| query.filter(users::verification_digest.eq(wanted)))
            .await
    }

    async fn find_by_reset_digest(
        &self,
        digest: &str,
    ) -> Result<Option<User>, UserRepositoryError> {
        let wanted = digest.to_owned();
        self.find_one(move |query| query.filter(users::reset_digest.eq(wanted)))
            .await
    }
}
