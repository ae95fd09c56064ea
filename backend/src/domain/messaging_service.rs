//! Messaging domain service.
//!
//! Conversations are visible to their participants only; anyone else is told
//! the conversation does not exist.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::debug;

use crate::domain::port_errors::map_conversation_error;
use crate::domain::ports::{
    ConversationRepository, ConversationThread, MessagingCommand, MessagingQuery,
};
use crate::domain::{Actor, Conversation, ConversationId, Error, Message, MessageContent};

/// Messaging service implementing the messaging ports.
#[derive(Clone)]
pub struct MessagingService<V> {
    conversations: Arc<V>,
    clock: Arc<dyn Clock>,
}

impl<V> MessagingService<V> {
    /// Create a new service.
    pub fn new(conversations: Arc<V>, clock: Arc<dyn Clock>) -> Self {
        Self {
            conversations,
            clock,
        }
    }
}

impl<V> MessagingService<V>
where
    V: ConversationRepository,
{
    async fn joined(&self, actor: Actor, id: &ConversationId) -> Result<Conversation, Error> {
        self.conversations
            .find_by_id(id)
            .await
            .map_err(map_conversation_error)?
            .filter(|conversation| conversation.involves(actor.id))
            .ok_or_else(|| Error::not_found("Conversation not found"))
    }
}

#[async_trait]
impl<V> MessagingCommand for MessagingService<V>
where
    V: ConversationRepository,
{
    async fn send(
        &self,
        actor: Actor,
        conversation: &ConversationId,
        content: MessageContent,
    ) -> Result<Message, Error> {
        let mut thread = self.joined(actor, conversation).await?;
        let message = Message::new(thread.id, actor.id, content, self.clock.utc());
        thread.record(&message);
        self.conversations
            .save_messages(std::slice::from_ref(&message))
            .await
            .map_err(map_conversation_error)?;
        self.conversations
            .save(&thread)
            .await
            .map_err(map_conversation_error)?;
        debug!(conversation_id = %thread.id, message_id = %message.id, "message sent");
        Ok(message)
    }
}

#[async_trait]
impl<V> MessagingQuery for MessagingService<V>
where
    V: ConversationRepository,
{
    async fn conversations(&self, actor: Actor) -> Result<Vec<Conversation>, Error> {
        self.conversations
            .list_for_user(&actor.id)
            .await
            .map_err(map_conversation_error)
    }

    async fn open(&self, actor: Actor, id: &ConversationId) -> Result<ConversationThread, Error> {
        let mut conversation = self.joined(actor, id).await?;
        let mut messages = self
            .conversations
            .list_messages(&conversation.id)
            .await
            .map_err(map_conversation_error)?;

        let now = self.clock.utc();
        let newly_read: Vec<Message> = messages
            .iter_mut()
            .filter_map(|message| {
                message
                    .mark_read_by(actor.id, now)
                    .then(|| message.clone())
            })
            .collect();
        if !newly_read.is_empty() {
            self.conversations
                .save_messages(&newly_read)
                .await
                .map_err(map_conversation_error)?;
        }
        if conversation.unread_for(actor.id) > 0 {
            conversation.mark_read(actor.id);
            self.conversations
                .save(&conversation)
                .await
                .map_err(map_conversation_error)?;
        }
        Ok(ConversationThread {
            conversation,
            messages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockConversationRepository;
    use crate::domain::service_test_support::{client_actor, fixture_clock, fixture_timestamp};
    use crate::domain::{ErrorCode, UserId};

    fn service(repo: MockConversationRepository) -> MessagingService<MockConversationRepository> {
        MessagingService::new(Arc::new(repo), fixture_clock())
    }

    fn content(text: &str) -> MessageContent {
        MessageContent::try_new(text).expect("valid content")
    }

    #[tokio::test]
    async fn outsiders_cannot_open_a_conversation() {
        let conversation = Conversation::open(
            [UserId::random(), UserId::random()],
            None,
            fixture_timestamp(),
        );
        let id = conversation.id;
        let mut repo = MockConversationRepository::new();
        repo.expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(conversation)));
        repo.expect_list_messages().times(0);

        let err = service(repo)
            .open(client_actor(), &id)
            .await
            .expect_err("outsider");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "Conversation not found");
    }

    #[tokio::test]
    async fn send_updates_preview_and_unread_counter() {
        let actor = client_actor();
        let other = UserId::random();
        let conversation = Conversation::open([actor.id, other], None, fixture_timestamp());
        let id = conversation.id;
        let mut repo = MockConversationRepository::new();
        repo.expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(conversation)));
        repo.expect_save_messages()
            .times(1)
            .return_once(|_| Ok(()));
        repo.expect_save()
            .withf(move |saved: &Conversation| {
                saved.unread_for(other) == 1
                    && saved
                        .last_message
                        .as_ref()
                        .is_some_and(|last| last.content == "Hello there")
            })
            .times(1)
            .return_once(|_| Ok(()));

        let message = service(repo)
            .send(actor, &id, content("Hello there"))
            .await
            .expect("sent");
        assert_eq!(message.sender, actor.id);
        assert!(!message.is_system_message);
    }

    #[tokio::test]
    async fn open_marks_messages_read() {
        let actor = client_actor();
        let other = UserId::random();
        let mut conversation = Conversation::open([actor.id, other], None, fixture_timestamp());
        let incoming = Message::new(
            conversation.id,
            other,
            content("Are you free Monday?"),
            fixture_timestamp(),
        );
        let outgoing = Message::new(
            conversation.id,
            actor.id,
            content("Yes"),
            fixture_timestamp(),
        );
        conversation.record(&incoming);
        let id = conversation.id;
        let mut repo = MockConversationRepository::new();
        repo.expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(conversation)));
        repo.expect_list_messages()
            .times(1)
            .return_once(move |_| Ok(vec![incoming, outgoing]));
        repo.expect_save_messages()
            .withf(|messages: &[Message]| messages.len() == 1)
            .times(1)
            .return_once(|_| Ok(()));
        repo.expect_save()
            .withf(move |saved: &Conversation| saved.unread_for(actor.id) == 0)
            .times(1)
            .return_once(|_| Ok(()));

        let thread = service(repo).open(actor, &id).await.expect("thread");
        assert!(
            thread
                .messages
                .iter()
                .all(|message| message.is_read_by(actor.id))
        );
    }
}
