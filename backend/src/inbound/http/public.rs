//! Public pages without authentication.
//!
//! ```text
//! GET  /pricing
//! POST /contact
//! GET  /landing
//! GET  /gallery
//! GET  /gallery/{slug}
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::catalogue::{PricingPlan, pricing_plans};
use crate::domain::{ContactCategory, ContactMessage, LandingView};
use crate::inbound::http::ApiResult;
use crate::inbound::http::projects::PublicProjectResponse;
use crate::inbound::http::schemas::{ContactMessageSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_optional;

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct ContactRequest {
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    pub subject: Option<String>,
    pub message: Option<String>,
    #[schema(example = "support")]
    pub category: Option<String>,
}

/// Subscription plans with prices and allowances.
#[utoipa::path(
    get,
    path = "/pricing",
    responses((status = 200, description = "Plans", body = [Object])),
    tags = ["public"],
    operation_id = "pricing",
    security([])
)]
#[get("/pricing")]
pub async fn pricing() -> web::Json<Vec<PricingPlan>> {
    web::Json(pricing_plans())
}

/// Leave a message for the site team.
#[utoipa::path(
    post,
    path = "/contact",
    request_body = ContactRequest,
    responses(
        (status = 201, description = "Message stored", body = ContactMessageSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["public"],
    operation_id = "submitContact",
    security([])
)]
#[post("/contact")]
pub async fn submit_contact(
    state: web::Data<HttpState>,
    payload: web::Json<ContactRequest>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let message = ContactMessage::submit(
        &body.name,
        &body.email,
        body.subject.as_deref(),
        body.message.as_deref(),
        parse_optional::<ContactCategory>(body.category.as_deref())?,
        Utc::now(),
    )?;
    let stored = state.contact.submit(message).await?;
    Ok(HttpResponse::Created().json(stored))
}

/// Landing images, specialists section, and gallery video.
#[utoipa::path(
    get,
    path = "/landing",
    responses((status = 200, description = "Landing content", body = Object)),
    tags = ["public"],
    operation_id = "landing",
    security([])
)]
#[get("/landing")]
pub async fn landing(state: web::Data<HttpState>) -> ApiResult<web::Json<LandingView>> {
    Ok(web::Json(state.site_content_query.landing().await?))
}

/// Published projects, most recently published first.
#[utoipa::path(
    get,
    path = "/gallery",
    responses((status = 200, description = "Gallery", body = [PublicProjectResponse])),
    tags = ["public"],
    operation_id = "gallery",
    security([])
)]
#[get("/gallery")]
pub async fn gallery(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<PublicProjectResponse>>> {
    let projects = state.gallery.published().await?;
    Ok(web::Json(
        projects.into_iter().map(PublicProjectResponse::from).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/gallery/{slug}",
    params(("slug" = String, Path, description = "Gallery slug")),
    responses(
        (status = 200, description = "Published project", body = PublicProjectResponse),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["public"],
    operation_id = "galleryProject",
    security([])
)]
#[get("/gallery/{slug}")]
pub async fn gallery_project(
    state: web::Data<HttpState>,
    slug: web::Path<String>,
) -> ApiResult<web::Json<PublicProjectResponse>> {
    let project = state.gallery.by_public_slug(&slug).await?;
    Ok(web::Json(project.into()))
}

#[cfg(test)]
mod tests {
    use crate::inbound::http::test_utils::TestHarness;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn pricing_lists_three_plans() {
        let harness = TestHarness::new();
        let app = actix_test::init_service(harness.app()).await;
        let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/pricing").to_request())
            .await;
        let body: Value = actix_test::read_body_json(res).await;
        let plans = body.as_array().expect("plans");
        assert_eq!(plans.len(), 3);
        assert_eq!(plans[0]["plan"], "free");
        assert_eq!(plans[1]["popular"], true);
        assert_eq!(plans[2]["generations"], Value::Null);
    }

    #[actix_web::test]
    async fn contact_defaults_to_general() {
        let harness = TestHarness::new();
        let app = actix_test::init_service(harness.app()).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/contact")
                .set_json(json!({ "name": "Ada", "email": "ada@example.com" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["category"], "general");
        assert_eq!(body["status"], "new");
    }

    #[rstest]
    #[case(json!({ "name": "", "email": "ada@example.com" }), "name")]
    #[case(json!({ "name": "Ada", "email": "not-an-email" }), "email")]
    #[actix_web::test]
    async fn contact_reports_the_invalid_field(#[case] body: Value, #[case] field: &str) {
        let harness = TestHarness::new();
        let app = actix_test::init_service(harness.app()).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/contact")
                .set_json(body)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], field);
    }

    #[actix_web::test]
    async fn landing_falls_back_to_defaults() {
        let harness = TestHarness::new();
        let app = actix_test::init_service(harness.app()).await;
        let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/landing").to_request())
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["galleryVideo"], Value::Null);
        assert_eq!(
            body["specialists"]["categories"].as_array().map(Vec::len),
            Some(5)
        );
    }

    #[actix_web::test]
    async fn unknown_gallery_slug_is_not_found() {
        let harness = TestHarness::new();
        let app = actix_test::init_service(harness.app()).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/gallery/nothing-here").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
