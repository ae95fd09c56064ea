//! PostgreSQL-backed `ConversationRepository` implementation using Diesel ORM.
//!
//! Participants live in a `UUID[]` column so membership checks use the GIN
//! index instead of scanning documents.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ConversationRepository, ConversationRepositoryError};
use crate::domain::{Conversation, ConversationId, Message, ProjectId, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{ConversationRow, DocumentError, MessageRow};
use super::pool::{DbPool, PoolError};
use super::schema::{conversations, messages};

/// Diesel-backed implementation of the conversation repository port.
#[derive(Clone)]
pub struct DieselConversationRepository {
    pool: DbPool,
}

impl DieselConversationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ConversationRepositoryError {
    map_basic_pool_error(error, ConversationRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ConversationRepositoryError {
    map_basic_diesel_error(
        error,
        ConversationRepositoryError::query,
        ConversationRepositoryError::connection,
    )
}

fn map_document_error(error: DocumentError) -> ConversationRepositoryError {
    ConversationRepositoryError::query(error.to_string())
}

fn decode_conversations(
    rows: Vec<ConversationRow>,
) -> Result<Vec<Conversation>, ConversationRepositoryError> {
    rows.into_iter()
        .map(ConversationRow::into_conversation)
        .collect::<Result<Vec<_>, _>>()
        .map_err(map_document_error)
}

#[async_trait]
impl ConversationRepository for DieselConversationRepository {
    async fn save(&self, conversation: &Conversation) -> Result<(), ConversationRepositoryError> {
        let row = ConversationRow::from_conversation(conversation).map_err(map_document_error)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(conversations::table)
            .values(&row)
            .on_conflict(conversations::id)
            .do_update()
            .set(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &ConversationId,
    ) -> Result<Option<Conversation>, ConversationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = conversations::table
            .filter(conversations::id.eq(*id.as_uuid()))
            .select(ConversationRow::as_select())
            .first::<ConversationRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(ConversationRow::into_conversation)
            .transpose()
            .map_err(map_document_error)
    }

    async fn find_between(
        &self,
        first: &UserId,
        second: &UserId,
        project: Option<ProjectId>,
    ) -> Result<Option<Conversation>, ConversationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = conversations::table
            .into_boxed()
            .filter(conversations::is_active.eq(true))
            .filter(
                conversations::participants
                    .contains(vec![*first.as_uuid(), *second.as_uuid()]),
            );
        query = match project {
            Some(id) => query.filter(conversations::project_id.eq(*id.as_uuid())),
            None => query.filter(conversations::project_id.is_null()),
        };
        let rows = query
            .order(conversations::updated_at.desc())
            .limit(1)
            .select(ConversationRow::as_select())
            .load::<ConversationRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(decode_conversations(rows)?.into_iter().next())
    }

    async fn list_for_user(
        &self,
        user: &UserId,
    ) -> Result<Vec<Conversation>, ConversationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = conversations::table
            .filter(conversations::participants.contains(vec![*user.as_uuid()]))
            .order(conversations::updated_at.desc())
            .select(ConversationRow::as_select())
            .load::<ConversationRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        decode_conversations(rows)
    }

    async fn save_messages(&self, batch: &[Message]) -> Result<(), ConversationRepositoryError> {
        if batch.is_empty() {
            return Ok(());
        }
        let rows = batch
            .iter()
            .map(MessageRow::from_message)
            .collect::<Result<Vec<_>, _>>()
            .map_err(map_document_error)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(messages::table)
            .values(&rows)
            .on_conflict(messages::id)
            .do_update()
            .set(messages::document.eq(excluded(messages::document)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn list_messages(
        &self,
        conversation: &ConversationId,
    ) -> Result<Vec<Message>, ConversationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = messages::table
            .filter(messages::conversation_id.eq(*conversation.as_uuid()))
            .order(messages::created_at.asc())
            .select(MessageRow::as_select())
            .load::<MessageRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter()
            .map(MessageRow::into_message)
            .collect::<Result<Vec<_>, _>>()
            .map_err(map_document_error)
    }
}
