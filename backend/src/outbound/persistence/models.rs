//! Row types for the document tables.
//!
//! Each row carries the aggregate as a JSONB `document` plus the scalar
//! columns queries filter or sort on. The scalars are always derived from the
//! aggregate when writing, so they cannot drift from the document.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::{
    Contractor, ContactMessage, Conversation, GalleryVideo, LandingAsset, Message, Project,
    SpecialistsConfig, User,
};

use super::schema::{
    contact_messages, contractors, conversations, landing_assets, messages, projects,
    site_settings, users,
};

/// Key of the specialists section in `site_settings`.
pub(crate) const SPECIALISTS_KEY: &str = "specialists";
/// Key of the gallery video in `site_settings`.
pub(crate) const GALLERY_VIDEO_KEY: &str = "gallery_video";

/// Failure converting between a stored document and its aggregate.
#[derive(Debug, thiserror::Error)]
#[error("stored {table} document is invalid: {source}")]
pub(crate) struct DocumentError {
    table: &'static str,
    source: serde_json::Error,
}

fn encode<T: Serialize>(table: &'static str, value: &T) -> Result<Value, DocumentError> {
    serde_json::to_value(value).map_err(|source| DocumentError { table, source })
}

fn decode<T: DeserializeOwned>(table: &'static str, value: Value) -> Result<T, DocumentError> {
    serde_json::from_value(value).map_err(|source| DocumentError { table, source })
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub verification_digest: Option<String>,
    pub reset_digest: Option<String>,
    pub document: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRow {
    pub(crate) fn from_user(user: &User) -> Result<Self, DocumentError> {
        Ok(Self {
            id: *user.id.as_uuid(),
            email: user.email.as_str().to_owned(),
            verification_digest: user.verification_digest().map(str::to_owned),
            reset_digest: user.password_reset_digest().map(str::to_owned),
            document: encode("users", user)?,
            created_at: user.created_at,
            updated_at: user.updated_at,
        })
    }

    pub(crate) fn into_user(self) -> Result<User, DocumentError> {
        decode("users", self.document)
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ProjectRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub share_token: String,
    pub slug: String,
    pub public_slug: Option<String>,
    pub is_published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub visibility: String,
    pub status: String,
    pub document: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProjectRow {
    pub(crate) fn from_project(project: &Project) -> Result<Self, DocumentError> {
        Ok(Self {
            id: *project.id.as_uuid(),
            owner_id: *project.owner.as_uuid(),
            share_token: project.share_token.clone(),
            slug: project.slug.clone(),
            public_slug: project.public_slug.clone(),
            is_published: project.is_published,
            published_at: project.published_at,
            visibility: project.visibility.as_str().to_owned(),
            status: project.status.as_str().to_owned(),
            document: encode("projects", project)?,
            created_at: project.created_at,
            updated_at: project.updated_at,
        })
    }

    pub(crate) fn into_project(self) -> Result<Project, DocumentError> {
        decode("projects", self.document)
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = contractors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ContractorRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub slug: String,
    pub is_active: bool,
    pub document: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContractorRow {
    pub(crate) fn from_contractor(contractor: &Contractor) -> Result<Self, DocumentError> {
        Ok(Self {
            id: *contractor.id.as_uuid(),
            user_id: *contractor.user.as_uuid(),
            slug: contractor.slug.clone(),
            is_active: contractor.is_active,
            document: encode("contractors", contractor)?,
            created_at: contractor.created_at,
            updated_at: contractor.updated_at,
        })
    }

    pub(crate) fn into_contractor(self) -> Result<Contractor, DocumentError> {
        decode("contractors", self.document)
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = conversations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ConversationRow {
    pub id: Uuid,
    pub participants: Vec<Uuid>,
    pub project_id: Option<Uuid>,
    pub is_active: bool,
    pub document: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ConversationRow {
    pub(crate) fn from_conversation(conversation: &Conversation) -> Result<Self, DocumentError> {
        Ok(Self {
            id: *conversation.id.as_uuid(),
            participants: conversation
                .participants
                .iter()
                .map(|participant| *participant.as_uuid())
                .collect(),
            project_id: conversation.project.map(|project| *project.as_uuid()),
            is_active: conversation.is_active,
            document: encode("conversations", conversation)?,
            created_at: conversation.created_at,
            updated_at: conversation.updated_at,
        })
    }

    pub(crate) fn into_conversation(self) -> Result<Conversation, DocumentError> {
        decode("conversations", self.document)
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MessageRow {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub document: Value,
    pub created_at: DateTime<Utc>,
}

impl MessageRow {
    pub(crate) fn from_message(message: &Message) -> Result<Self, DocumentError> {
        Ok(Self {
            id: *message.id.as_uuid(),
            conversation_id: *message.conversation.as_uuid(),
            document: encode("messages", message)?,
            created_at: message.created_at,
        })
    }

    pub(crate) fn into_message(self) -> Result<Message, DocumentError> {
        decode("messages", self.document)
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = contact_messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ContactMessageRow {
    pub id: Uuid,
    pub document: Value,
    pub created_at: DateTime<Utc>,
}

impl ContactMessageRow {
    pub(crate) fn from_message(message: &ContactMessage) -> Result<Self, DocumentError> {
        Ok(Self {
            id: *message.id.as_uuid(),
            document: encode("contact_messages", message)?,
            created_at: message.created_at,
        })
    }

    pub(crate) fn into_message(self) -> Result<ContactMessage, DocumentError> {
        decode("contact_messages", self.document)
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = landing_assets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct LandingAssetRow {
    pub key: String,
    pub document: Value,
    pub updated_at: DateTime<Utc>,
}

impl LandingAssetRow {
    pub(crate) fn from_asset(asset: &LandingAsset) -> Result<Self, DocumentError> {
        Ok(Self {
            key: asset.key.clone(),
            document: encode("landing_assets", asset)?,
            updated_at: asset.updated_at,
        })
    }

    pub(crate) fn into_asset(self) -> Result<LandingAsset, DocumentError> {
        decode("landing_assets", self.document)
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = site_settings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SiteSettingRow {
    pub key: String,
    pub document: Value,
    pub updated_at: DateTime<Utc>,
}

impl SiteSettingRow {
    pub(crate) fn from_specialists(config: &SpecialistsConfig) -> Result<Self, DocumentError> {
        Ok(Self {
            key: SPECIALISTS_KEY.to_owned(),
            document: encode("site_settings", config)?,
            updated_at: config.updated_at,
        })
    }

    pub(crate) fn from_gallery_video(video: &GalleryVideo) -> Result<Self, DocumentError> {
        Ok(Self {
            key: GALLERY_VIDEO_KEY.to_owned(),
            document: encode("site_settings", video)?,
            updated_at: video.updated_at,
        })
    }

    pub(crate) fn into_document<T: DeserializeOwned>(self) -> Result<T, DocumentError> {
        decode("site_settings", self.document)
    }
}
