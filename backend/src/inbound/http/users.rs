//! Account profile handlers and the public user representation.
//!
//! ```text
//! GET /auth/me
//! GET /dashboard/settings
//! PUT /dashboard/settings
//! ```

use actix_web::{get, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::user::Address;
use crate::domain::{ProfileSettings, Subscription, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::guards::current_user;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// User as exposed over HTTP; never carries the password hash or tokens.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    #[schema(example = "Ada")]
    pub first_name: String,
    #[schema(example = "Lovelace")]
    pub last_name: String,
    #[schema(example = "Ada Lovelace")]
    pub full_name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "client")]
    pub role: String,
    pub verified: bool,
    pub is_premium: bool,
    #[schema(value_type = Object)]
    pub subscription: Subscription,
    /// Remaining generations; absent means unlimited.
    pub credits_remaining: Option<u32>,
    pub phone: Option<String>,
    #[schema(value_type = Object)]
    pub address: Address,
    #[schema(value_type = Option<String>)]
    pub last_login: Option<DateTime<Utc>>,
    #[schema(value_type = String)]
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            full_name: user.full_name(),
            is_premium: user.is_premium(),
            credits_remaining: user.subscription.credits_remaining(),
            email: user.email.to_string(),
            role: user.role.as_str().to_owned(),
            first_name: user.first_name,
            last_name: user.last_name,
            verified: user.verified,
            subscription: user.subscription,
            phone: user.phone,
            address: user.address,
            last_login: user.last_login,
            created_at: user.created_at,
        }
    }
}

/// Account settings form.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SettingsRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub phone: Option<String>,
}

/// Return the signed-in user's profile.
#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "currentUser"
)]
#[get("/auth/me")]
pub async fn me(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UserResponse>> {
    let user = current_user(&state, &session).await?;
    Ok(web::Json(UserResponse::from(user)))
}

/// Account settings view.
#[utoipa::path(
    get,
    path = "/dashboard/settings",
    responses(
        (status = 200, description = "Editable account settings", body = UserResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["dashboard"],
    operation_id = "getSettings"
)]
#[get("/dashboard/settings")]
pub async fn get_settings(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UserResponse>> {
    let user = current_user(&state, &session).await?;
    Ok(web::Json(UserResponse::from(user)))
}

/// Update the signed-in user's names and phone.
#[utoipa::path(
    put,
    path = "/dashboard/settings",
    request_body = SettingsRequest,
    responses(
        (status = 200, description = "Settings updated", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["dashboard"],
    operation_id = "updateSettings"
)]
#[put("/dashboard/settings")]
pub async fn update_settings(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SettingsRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let user_id = session.require_user_id()?;
    let form = payload.into_inner();
    let settings =
        ProfileSettings::try_new(&form.first_name, &form.last_name, form.phone.as_deref())?;
    let updated = state.accounts.update_settings(&user_id, settings).await?;
    Ok(web::Json(UserResponse::from(updated)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use crate::domain::service_test_support::make_user;
    use crate::inbound::http::test_utils::TestHarness;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use serde_json::{Value, json};

    #[test]
    fn response_omits_secrets() {
        let mut user = make_user("ada@example.com", Role::Client);
        user.issue_verification_token(user.created_at);
        let value = serde_json::to_value(UserResponse::from(user)).expect("serialise");
        let text = value.to_string();
        assert!(!text.contains("passwordHash"));
        assert!(!text.contains("fixture$"));
        assert!(!text.contains("verification"));
        assert_eq!(value["fullName"], "Ada Lovelace");
        assert_eq!(value["creditsRemaining"], 3);
    }

    #[actix_web::test]
    async fn settings_require_a_session() {
        let harness = TestHarness::new();
        let app = actix_test::init_service(harness.app()).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/dashboard/settings").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn settings_update_trims_and_clears_phone() {
        let harness = TestHarness::new();
        let app = actix_test::init_service(harness.app()).await;
        let cookie = harness.register(&app, "ada@example.com", None).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri("/dashboard/settings")
                .cookie(cookie.clone())
                .set_json(json!({ "firstName": " Augusta ", "lastName": "King", "phone": "  " }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["firstName"], "Augusta");
        assert_eq!(body["phone"], Value::Null);

        let account = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/auth/me")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let me_body: Value = actix_test::read_body_json(account).await;
        assert_eq!(me_body["fullName"], "Augusta King");
    }

    #[actix_web::test]
    async fn settings_reject_blank_names() {
        let harness = TestHarness::new();
        let app = actix_test::init_service(harness.app()).await;
        let cookie = harness.register(&app, "ada@example.com", None).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri("/dashboard/settings")
                .cookie(cookie)
                .set_json(json!({ "firstName": "", "lastName": "King" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
