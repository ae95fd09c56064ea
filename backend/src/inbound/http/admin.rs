//! Administrator endpoints for site content, the contact inbox, and
//! subscription plans.
//!
//! ```text
//! GET    /admin/landing
//! PUT    /admin/landing/{key}
//! GET    /admin/specialists
//! PUT    /admin/specialists/image
//! PUT    /admin/specialists/options
//! PUT    /admin/video
//! DELETE /admin/video
//! GET    /admin/messages
//! PATCH  /admin/messages/{id}/status
//! DELETE /admin/messages/{id}
//! PUT    /admin/users/{id}/plan
//! ```
//!
//! Every handler applies [`Guard::Admin`] before touching a port.

use std::collections::BTreeMap;

use actix_web::{HttpResponse, delete, get, patch, put, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::ports::SpecialistsImageUpdate;
use crate::domain::{
    CategoryForm, ContactMessage, ContactMessageId, ContactStatus, GalleryVideo, LandingAsset,
    LandingAssetUpdate, ResolvedLandingAsset, SpecialistsConfig, SubscriptionPlan, UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::guards::{Guard, guarded_user};
use crate::inbound::http::schemas::{ContactMessageSchema, ErrorSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::UserResponse;
use crate::inbound::http::validation::required_text;

async fn require_admin(state: &HttpState, session: &SessionContext) -> ApiResult<()> {
    guarded_user(state, session, Guard::Admin).await.map(|_| ())
}

/// New image for a landing slot or the specialists section.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageRequest {
    #[schema(example = "https://res.cloudinary.com/demo/hero.jpg")]
    pub url: String,
    /// Blank keeps the current alternative text.
    pub alt: Option<String>,
    pub public_id: Option<String>,
}

/// Specialists categories keyed by category id.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct SpecialistsOptionsRequest {
    /// `label` and newline-separated `options` per category.
    #[schema(value_type = Object)]
    pub categories: BTreeMap<String, CategoryForm>,
}

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct VideoRequest {
    pub url: String,
    pub public_id: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct StatusRequest {
    #[schema(example = "read")]
    pub status: String,
}

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct PlanRequest {
    #[schema(example = "pro")]
    pub plan: String,
}

/// Every landing slot with its effective image.
#[utoipa::path(
    get,
    path = "/admin/landing",
    responses(
        (status = 200, description = "Landing slots", body = [Object]),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminLandingAssets"
)]
#[get("/admin/landing")]
pub async fn landing_assets(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<ResolvedLandingAsset>>> {
    require_admin(&state, &session).await?;
    Ok(web::Json(state.site_content_query.landing_assets().await?))
}

#[utoipa::path(
    put,
    path = "/admin/landing/{key}",
    params(("key" = String, Path, description = "Landing slot key")),
    request_body = ImageRequest,
    responses(
        (status = 200, description = "Slot updated", body = Object),
        (status = 400, description = "Unknown slot or missing URL", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminUpdateLandingAsset"
)]
#[put("/admin/landing/{key}")]
pub async fn update_landing_asset(
    state: web::Data<HttpState>,
    session: SessionContext,
    key: web::Path<String>,
    payload: web::Json<ImageRequest>,
) -> ApiResult<web::Json<LandingAsset>> {
    require_admin(&state, &session).await?;
    let body = payload.into_inner();
    let asset = state
        .site_content
        .update_landing_asset(
            &key,
            LandingAssetUpdate {
                url: body.url,
                alt: body.alt,
                public_id: body.public_id,
            },
        )
        .await?;
    info!(key = %asset.key, "landing asset updated");
    Ok(web::Json(asset))
}

#[utoipa::path(
    get,
    path = "/admin/specialists",
    responses(
        (status = 200, description = "Specialists section", body = Object),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminSpecialists"
)]
#[get("/admin/specialists")]
pub async fn specialists(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<SpecialistsConfig>> {
    require_admin(&state, &session).await?;
    Ok(web::Json(state.site_content_query.specialists().await?))
}

#[utoipa::path(
    put,
    path = "/admin/specialists/image",
    request_body = ImageRequest,
    responses(
        (status = 200, description = "Image replaced", body = Object),
        (status = 400, description = "Missing URL", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminSpecialistsImage"
)]
#[put("/admin/specialists/image")]
pub async fn update_specialists_image(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ImageRequest>,
) -> ApiResult<web::Json<SpecialistsConfig>> {
    require_admin(&state, &session).await?;
    let body = payload.into_inner();
    Ok(web::Json(
        state
            .site_content
            .update_specialists_image(SpecialistsImageUpdate {
                url: body.url,
                alt: body.alt,
                public_id: body.public_id,
            })
            .await?,
    ))
}

#[utoipa::path(
    put,
    path = "/admin/specialists/options",
    request_body = SpecialistsOptionsRequest,
    responses(
        (status = 200, description = "Categories replaced", body = Object),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminSpecialistsOptions"
)]
#[put("/admin/specialists/options")]
pub async fn update_specialists_options(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SpecialistsOptionsRequest>,
) -> ApiResult<web::Json<SpecialistsConfig>> {
    require_admin(&state, &session).await?;
    Ok(web::Json(
        state
            .site_content
            .update_specialists_options(payload.into_inner().categories)
            .await?,
    ))
}

#[utoipa::path(
    put,
    path = "/admin/video",
    request_body = VideoRequest,
    responses(
        (status = 200, description = "Video set", body = Object),
        (status = 400, description = "Missing URL", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminSetVideo"
)]
#[put("/admin/video")]
pub async fn set_video(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<VideoRequest>,
) -> ApiResult<web::Json<GalleryVideo>> {
    require_admin(&state, &session).await?;
    let body = payload.into_inner();
    Ok(web::Json(
        state
            .site_content
            .set_gallery_video(&body.url, body.public_id)
            .await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/admin/video",
    responses(
        (status = 204, description = "Video removed"),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminDeleteVideo"
)]
#[delete("/admin/video")]
pub async fn delete_video(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    require_admin(&state, &session).await?;
    state.site_content.delete_gallery_video().await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Contact form submissions, newest first.
#[utoipa::path(
    get,
    path = "/admin/messages",
    responses(
        (status = 200, description = "Submissions", body = [ContactMessageSchema]),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminContactMessages"
)]
#[get("/admin/messages")]
pub async fn contact_messages(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<ContactMessage>>> {
    require_admin(&state, &session).await?;
    Ok(web::Json(state.contact.list().await?))
}

#[utoipa::path(
    patch,
    path = "/admin/messages/{id}/status",
    params(("id" = String, Path, description = "Submission identifier")),
    request_body = StatusRequest,
    responses(
        (status = 200, description = "Status changed", body = ContactMessageSchema),
        (status = 400, description = "Unknown status", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminContactStatus"
)]
#[patch("/admin/messages/{id}/status")]
pub async fn set_contact_status(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<StatusRequest>,
) -> ApiResult<web::Json<ContactMessage>> {
    require_admin(&state, &session).await?;
    let id = ContactMessageId::parse(&path)?;
    let status: ContactStatus =
        required_text(Some(&payload.status), "status", "Status is required")?.parse()?;
    Ok(web::Json(state.contact.set_status(&id, status).await?))
}

#[utoipa::path(
    delete,
    path = "/admin/messages/{id}",
    params(("id" = String, Path, description = "Submission identifier")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminDeleteContact"
)]
#[delete("/admin/messages/{id}")]
pub async fn delete_contact(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    require_admin(&state, &session).await?;
    let id = ContactMessageId::parse(&path)?;
    state.contact.delete(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Move a user to another subscription plan, resetting the monthly usage.
#[utoipa::path(
    put,
    path = "/admin/users/{id}/plan",
    params(("id" = String, Path, description = "User identifier")),
    request_body = PlanRequest,
    responses(
        (status = 200, description = "Plan changed", body = UserResponse),
        (status = 400, description = "Unknown plan", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminChangePlan"
)]
#[put("/admin/users/{id}/plan")]
pub async fn change_plan(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<PlanRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    require_admin(&state, &session).await?;
    let id = UserId::parse(&path)?;
    let plan: SubscriptionPlan =
        required_text(Some(&payload.plan), "plan", "Plan is required")?.parse()?;
    let user = state.accounts.change_plan(&id, plan).await?;
    info!(user_id = %user.id, plan = plan.as_str(), "subscription plan changed");
    Ok(web::Json(user.into()))
}
