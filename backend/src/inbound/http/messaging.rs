//! Conversation handlers.
//!
//! ```text
//! GET  /dashboard/messages
//! GET  /dashboard/messages/{id}
//! POST /dashboard/messages/{id}
//! ```
//!
//! Conversations the caller does not take part in answer `404`.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::ConversationThread;
use crate::domain::{Conversation, ConversationId, MessageContent};
use crate::inbound::http::ApiResult;
use crate::inbound::http::guards::actor;
use crate::inbound::http::schemas::{ConversationSchema, ErrorSchema, MessageSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct SendMessageRequest {
    #[schema(example = "Hello, when can you visit?")]
    pub content: String,
}

/// Conversations of the signed-in user, most recent activity first.
#[utoipa::path(
    get,
    path = "/dashboard/messages",
    responses(
        (status = 200, description = "Conversations", body = [ConversationSchema]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["messages"],
    operation_id = "listConversations"
)]
#[get("/dashboard/messages")]
pub async fn list_conversations(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Conversation>>> {
    let actor = actor(&state, &session).await?;
    Ok(web::Json(state.messaging_query.conversations(actor).await?))
}

/// Open a conversation, marking its messages read.
#[utoipa::path(
    get,
    path = "/dashboard/messages/{id}",
    params(("id" = String, Path, description = "Conversation identifier")),
    responses(
        (status = 200, description = "Conversation with messages, oldest first", body = Object),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["messages"],
    operation_id = "openConversation"
)]
#[get("/dashboard/messages/{id}")]
pub async fn open_conversation(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ConversationThread>> {
    let actor = actor(&state, &session).await?;
    let id = ConversationId::parse(&path)?;
    Ok(web::Json(state.messaging_query.open(actor, &id).await?))
}

/// Post a message to a conversation.
#[utoipa::path(
    post,
    path = "/dashboard/messages/{id}",
    params(("id" = String, Path, description = "Conversation identifier")),
    request_body = SendMessageRequest,
    responses(
        (status = 201, description = "Message sent", body = MessageSchema),
        (status = 400, description = "Empty or oversized message", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["messages"],
    operation_id = "sendMessage"
)]
#[post("/dashboard/messages/{id}")]
pub async fn send_message(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<SendMessageRequest>,
) -> ApiResult<HttpResponse> {
    let actor = actor(&state, &session).await?;
    let id = ConversationId::parse(&path)?;
    let content = MessageContent::try_new(&payload.content)?;
    let message = state.messaging.send(actor, &id, content).await?;
    Ok(HttpResponse::Created().json(message))
}

#[cfg(test)]
mod tests {
    use crate::domain::Conversation;
    use crate::domain::ports::ConversationRepository;
    use crate::inbound::http::test_utils::TestHarness;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn participants_exchange_messages() {
        let harness = TestHarness::new();
        let app = actix_test::init_service(harness.app()).await;
        let ada = harness.register(&app, "ada@example.com", None).await;
        let pro = harness
            .register(&app, "pro@example.com", Some("contractor"))
            .await;
        let conversation = Conversation::open(
            [
                harness.user_id("ada@example.com").await,
                harness.user_id("pro@example.com").await,
            ],
            None,
            chrono::Utc::now(),
        );
        harness
            .conversations
            .save(&conversation)
            .await
            .expect("save conversation");
        let uri = format!("/dashboard/messages/{}", conversation.id);

        let sent = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&uri)
                .cookie(pro)
                .set_json(json!({ "content": "  Bonjour, when can I visit?  " }))
                .to_request(),
        )
        .await;
        assert_eq!(sent.status(), StatusCode::CREATED);

        let listed = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/dashboard/messages")
                .cookie(ada.clone())
                .to_request(),
        )
        .await;
        let conversations: Value = actix_test::read_body_json(listed).await;
        assert_eq!(
            conversations[0]["lastMessage"]["content"],
            "Bonjour, when can I visit?"
        );

        let opened = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri(&uri).cookie(ada).to_request(),
        )
        .await;
        assert_eq!(opened.status(), StatusCode::OK);
        let thread: Value = actix_test::read_body_json(opened).await;
        assert_eq!(thread["messages"].as_array().map(Vec::len), Some(1));
        assert_eq!(thread["conversation"]["unreadCount"], json!({}));
    }

    #[actix_web::test]
    async fn outsiders_get_not_found() {
        let harness = TestHarness::new();
        let app = actix_test::init_service(harness.app()).await;
        harness.register(&app, "ada@example.com", None).await;
        let outsider = harness.register(&app, "eve@example.com", None).await;
        let conversation = Conversation::open(
            [harness.user_id("ada@example.com").await],
            None,
            chrono::Utc::now(),
        );
        harness
            .conversations
            .save(&conversation)
            .await
            .expect("save conversation");

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/dashboard/messages/{}", conversation.id))
                .cookie(outsider)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn blank_messages_are_rejected() {
        let harness = TestHarness::new();
        let app = actix_test::init_service(harness.app()).await;
        let ada = harness.register(&app, "ada@example.com", None).await;
        let conversation = Conversation::open(
            [harness.user_id("ada@example.com").await],
            None,
            chrono::Utc::now(),
        );
        harness
            .conversations
            .save(&conversation)
            .await
            .expect("save conversation");

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/dashboard/messages/{}", conversation.id))
                .cookie(ada)
                .set_json(json!({ "content": "   " }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn malformed_ids_are_bad_requests() {
        let harness = TestHarness::new();
        let app = actix_test::init_service(harness.app()).await;
        let ada = harness.register(&app, "ada@example.com", None).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/dashboard/messages/not-a-uuid")
                .cookie(ada)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
