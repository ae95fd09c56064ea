//! PostgreSQL-backed `ContactMessageRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ContactMessageRepository, ContactMessageRepositoryError};
use crate::domain::{ContactMessage, ContactMessageId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{ContactMessageRow, DocumentError};
use super::pool::{DbPool, PoolError};
use super::schema::contact_messages;

/// Diesel-backed implementation of the contact message repository port.
#[derive(Clone)]
pub struct DieselContactMessageRepository {
    pool: DbPool,
}

impl DieselContactMessageRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ContactMessageRepositoryError {
    map_basic_pool_error(error, ContactMessageRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ContactMessageRepositoryError {
    map_basic_diesel_error(
        error,
        ContactMessageRepositoryError::query,
        ContactMessageRepositoryError::connection,
    )
}

fn map_document_error(error: DocumentError) -> ContactMessageRepositoryError {
    ContactMessageRepositoryError::query(error.to_string())
}

#[async_trait]
impl ContactMessageRepository for DieselContactMessageRepository {
    async fn save(&self, message: &ContactMessage) -> Result<(), ContactMessageRepositoryError> {
        let row = ContactMessageRow::from_message(message).map_err(map_document_error)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(contact_messages::table)
            .values(&row)
            .on_conflict(contact_messages::id)
            .do_update()
            .set(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &ContactMessageId,
    ) -> Result<Option<ContactMessage>, ContactMessageRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = contact_messages::table
            .filter(contact_messages::id.eq(*id.as_uuid()))
            .select(ContactMessageRow::as_select())
            .first::<ContactMessageRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(ContactMessageRow::into_message)
            .transpose()
            .map_err(map_document_error)
    }

    async fn list(&self) -> Result<Vec<ContactMessage>, ContactMessageRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = contact_messages::table
            .order(contact_messages::created_at.desc())
            .select(ContactMessageRow::as_select())
            .load::<ContactMessageRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter()
            .map(ContactMessageRow::into_message)
            .collect::<Result<Vec<_>, _>>()
            .map_err(map_document_error)
    }

    async fn delete(&self, id: &ContactMessageId) -> Result<bool, ContactMessageRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed =
            diesel::delete(contact_messages::table.filter(contact_messages::id.eq(*id.as_uuid())))
                .execute(&mut conn)
                .await
                .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }
}
