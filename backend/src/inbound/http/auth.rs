//! Registration, login, and account recovery handlers.
//!
//! ```text
//! POST /auth/register
//! POST /auth/login
//! POST /auth/logout
//! GET  /auth/verify/{token}
//! POST /auth/forgot-password
//! POST /auth/reset-password/{token}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::ports::PASSWORD_RESET_REQUESTED;
use crate::domain::{LoginCredentials, NewPassword, Registration, RegistrationInput};
use crate::inbound::http::ApiResult;
use crate::inbound::http::guards::require_guest;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::UserResponse;

/// Registration form.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisterRequest {
    #[schema(example = "Ada")]
    pub first_name: String,
    #[schema(example = "Lovelace")]
    pub last_name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    /// `client` (default) or `contractor`.
    #[schema(example = "client")]
    pub role: Option<String>,
}

/// Login form.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    #[schema(example = "ada@example.com")]
    pub email: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct ForgotPasswordRequest {
    #[schema(example = "ada@example.com")]
    pub email: String,
}

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub password: String,
    pub confirm_password: String,
}

/// Plain confirmation message.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "You have been logged out")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Create an account and sign it in.
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    require_guest(&state, &session).await?;
    let form = payload.into_inner();
    let registration = Registration::try_from_input(RegistrationInput {
        first_name: &form.first_name,
        last_name: &form.last_name,
        email: &form.email,
        password: &form.password,
        confirm_password: &form.confirm_password,
        role: form.role.as_deref(),
    })?;
    let user = state.accounts.register(registration).await?;
    session.persist_user(&user.id)?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// Authenticate with email and password.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    require_guest(&state, &session).await?;
    let credentials = LoginCredentials::try_from_parts(&payload.email, &payload.password)?;
    let user = state.accounts.login(&credentials).await?;
    session.persist_user(&user.id)?;
    info!(user_id = %user.id, "signed in");
    Ok(web::Json(UserResponse::from(user)))
}

/// Drop the session.
#[utoipa::path(
    post,
    path = "/auth/logout",
    responses((status = 200, description = "Signed out", body = MessageResponse)),
    tags = ["auth"],
    operation_id = "logout"
)]
#[post("/auth/logout")]
pub async fn logout(session: SessionContext) -> web::Json<MessageResponse> {
    session.purge();
    web::Json(MessageResponse::new("You have been logged out"))
}

/// Confirm an email address from the mailed link.
#[utoipa::path(
    get,
    path = "/auth/verify/{token}",
    params(("token" = String, Path, description = "Token from the verification email")),
    responses(
        (status = 200, description = "Email verified", body = MessageResponse),
        (status = 400, description = "Invalid or expired link", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "verifyEmail",
    security([])
)]
#[get("/auth/verify/{token}")]
pub async fn verify_email(
    state: web::Data<HttpState>,
    token: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    state.accounts.verify_email(&token).await?;
    Ok(web::Json(MessageResponse::new(
        "Email verified successfully! You can now log in.",
    )))
}

/// Request a password reset email.
///
/// Always answers with the same message so account existence is not leaked.
#[utoipa::path(
    post,
    path = "/auth/forgot-password",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 200, description = "Request accepted", body = MessageResponse),
        (status = 400, description = "Already signed in", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "forgotPassword",
    security([])
)]
#[post("/auth/forgot-password")]
pub async fn forgot_password(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ForgotPasswordRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    require_guest(&state, &session).await?;
    state.accounts.request_password_reset(&payload.email).await?;
    Ok(web::Json(MessageResponse::new(PASSWORD_RESET_REQUESTED)))
}

/// Choose a new password with a reset token.
#[utoipa::path(
    post,
    path = "/auth/reset-password/{token}",
    params(("token" = String, Path, description = "Token from the reset email")),
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 400, description = "Invalid request or expired link", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "resetPassword",
    security([])
)]
#[post("/auth/reset-password/{token}")]
pub async fn reset_password(
    state: web::Data<HttpState>,
    session: SessionContext,
    token: web::Path<String>,
    payload: web::Json<ResetPasswordRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    require_guest(&state, &session).await?;
    let password = NewPassword::try_new(&payload.password, &payload.confirm_password)?;
    state.accounts.reset_password(&token, password).await?;
    Ok(web::Json(MessageResponse::new(
        "Password reset successfully! You can now log in.",
    )))
}
