//! Conversations between clients and contractors.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::domain::wire_enum::wire_enum;
use crate::domain::{ConversationId, Error, MessageId, ProjectId, UserId};

/// Longest accepted message, in characters.
pub const MAX_MESSAGE_CHARS: usize = 5000;

/// Rejected message bodies.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MessageContentError {
    /// Blank body.
    #[error("Message cannot be empty")]
    Empty,
    /// Body over [`MAX_MESSAGE_CHARS`].
    #[error("Message cannot exceed 5000 characters")]
    TooLong,
}

impl From<MessageContentError> for Error {
    fn from(value: MessageContentError) -> Self {
        Self::invalid_request(value.to_string()).with_details(json!({ "field": "content" }))
    }
}

/// Trimmed, non-empty message body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MessageContent(String);

impl MessageContent {
    /// Validate a message body.
    pub fn try_new(raw: &str) -> Result<Self, MessageContentError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(MessageContentError::Empty);
        }
        if trimmed.chars().count() > MAX_MESSAGE_CHARS {
            return Err(MessageContentError::TooLong);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the body.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MessageContent {
    type Error = MessageContentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_new(&value)
    }
}

impl From<MessageContent> for String {
    fn from(value: MessageContent) -> Self {
        value.0
    }
}

/// Preview of the latest message of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastMessage {
    /// Body.
    pub content: String,
    /// Author.
    pub sender: UserId,
    /// Send instant.
    pub created_at: DateTime<Utc>,
}

/// Thread between participants, optionally about a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    /// Identifier.
    pub id: ConversationId,
    /// Users taking part.
    pub participants: Vec<UserId>,
    /// Related project.
    pub project: Option<ProjectId>,
    /// Latest message.
    pub last_message: Option<LastMessage>,
    /// Unread messages per participant.
    pub unread_count: BTreeMap<UserId, u32>,
    /// Open for new messages.
    pub is_active: bool,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Last activity instant.
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Open a conversation between distinct `participants`.
    #[must_use]
    pub fn open(
        participants: impl IntoIterator<Item = UserId>,
        project: Option<ProjectId>,
        now: DateTime<Utc>,
    ) -> Self {
        let mut unique: Vec<UserId> = Vec::new();
        for user in participants {
            if !unique.contains(&user) {
                unique.push(user);
            }
        }
        Self {
            id: ConversationId::random(),
            participants: unique,
            project,
            last_message: None,
            unread_count: BTreeMap::new(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether `user` takes part.
    #[must_use]
    pub fn involves(&self, user: UserId) -> bool {
        self.participants.contains(&user)
    }

    /// Whether the conversation is the one between `a` and `b` about `project`.
    #[must_use]
    pub fn is_between(&self, a: UserId, b: UserId, project: Option<ProjectId>) -> bool {
        self.project == project && self.involves(a) && self.involves(b)
    }

    /// Unread messages for `user`.
    #[must_use]
    pub fn unread_for(&self, user: UserId) -> u32 {
        self.unread_count.get(&user).copied().unwrap_or_default()
    }

    /// Update the preview and unread counters after `message` was sent.
    pub fn record(&mut self, message: &Message) {
        self.last_message = Some(LastMessage {
            content: message.content.as_str().to_owned(),
            sender: message.sender,
            created_at: message.created_at,
        });
        for participant in &self.participants {
            if *participant != message.sender {
                let count = self.unread_count.entry(*participant).or_default();
                *count = count.saturating_add(1);
            }
        }
        self.updated_at = message.created_at;
    }

    /// Clear `user`'s unread counter.
    pub fn mark_read(&mut self, user: UserId) {
        self.unread_count.remove(&user);
    }
}

/// File attached to a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// File name.
    pub name: String,
    /// Download URL.
    pub url: String,
    /// MIME type.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Size in bytes.
    pub size: Option<u64>,
}

/// Read receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadReceipt {
    /// Reader.
    pub user: UserId,
    /// Read instant.
    pub read_at: DateTime<Utc>,
}

wire_enum! {
    /// Kind of record a message refers to.
    pub enum RelatedKind as "related kind" {
        /// A project.
        Project => "project",
        /// A quotation.
        Quotation => "quotation",
        /// A design variant.
        Design => "design",
    }
}

/// Record a message refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedTo {
    /// Kind of record.
    #[serde(rename = "type")]
    pub kind: RelatedKind,
    /// Identifier of the record.
    pub reference: Uuid,
}

/// One message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Identifier.
    pub id: MessageId,
    /// Parent conversation.
    pub conversation: ConversationId,
    /// Author.
    pub sender: UserId,
    /// Body.
    pub content: MessageContent,
    /// Attachments.
    pub attachments: Vec<Attachment>,
    /// Read receipts.
    pub read_by: Vec<ReadReceipt>,
    /// Generated by the platform rather than typed by a user.
    pub is_system_message: bool,
    /// Referenced record.
    pub related_to: Option<RelatedTo>,
    /// Send instant.
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// A message typed by `sender`.
    #[must_use]
    pub fn new(
        conversation: ConversationId,
        sender: UserId,
        content: MessageContent,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: MessageId::random(),
            conversation,
            sender,
            content,
            attachments: Vec::new(),
            read_by: Vec::new(),
            is_system_message: false,
            related_to: None,
            created_at: now,
        }
    }

    /// A platform notice sent on behalf of `sender`, pointing at a project.
    #[must_use]
    pub fn system(
        conversation: ConversationId,
        sender: UserId,
        content: MessageContent,
        project: ProjectId,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            is_system_message: true,
            related_to: Some(RelatedTo {
                kind: RelatedKind::Project,
                reference: *project.as_uuid(),
            }),
            ..Self::new(conversation, sender, content, now)
        }
    }

    /// Whether `user` has read the message. Authors have always read their
    /// own messages.
    #[must_use]
    pub fn is_read_by(&self, user: UserId) -> bool {
        self.sender == user || self.read_by.iter().any(|receipt| receipt.user == user)
    }

    /// Add a read receipt for `user`; returns `true` when one was added.
    pub fn mark_read_by(&mut self, user: UserId, now: DateTime<Utc>) -> bool {
        if self.is_read_by(user) {
            return false;
        }
        self.read_by.push(ReadReceipt { user, read_at: now });
        true
    }
}
