//! JSON endpoints under `/api` used by the front end's scripts.
//!
//! ```text
//! GET   /api/health
//! GET   /api/styles
//! GET   /api/room-types
//! GET   /api/credits
//! POST  /api/generate
//! GET   /api/projects/{id}
//! PATCH /api/projects/{id}/status
//! GET   /api/contractors/search
//! GET   /api/stats
//! ```

use actix_web::{get, patch, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::catalogue::{ROOM_TYPES, RoomTypeEntry, STYLES, StyleEntry};
use crate::domain::contractor::{SEARCH_DEFAULT_LIMIT, SEARCH_MAX_LIMIT, ServiceArea};
use crate::domain::ports::GenerationOutcome;
use crate::domain::{
    Contractor, ContractorId, Project, ProjectId, ProjectStats, ProjectStatus, ProviderCredits,
    Rating, Specialty,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::contractors::BrowseParams;
use crate::inbound::http::guards::actor;
use crate::inbound::http::schemas::{ErrorSchema, ProjectSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::required_text;

/// Version reported by the API health check.
pub const API_VERSION: &str = "1.0.0";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiHealth {
    #[schema(example = "ok")]
    pub status: String,
    #[schema(value_type = String)]
    pub timestamp: DateTime<Utc>,
    #[schema(example = "1.0.0")]
    pub version: String,
}

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ApiGenerateRequest {
    pub project_id: String,
    pub style: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct ApiStatusRequest {
    #[schema(example = "in-progress")]
    pub status: String,
}

/// Search filters; `limit` defaults to 10 and is capped at 50.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(default)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    pub q: Option<String>,
    pub specialty: Option<String>,
    pub city: Option<String>,
    pub limit: Option<usize>,
}

/// Directory entry trimmed for autocomplete.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContractorSummary {
    #[schema(value_type = String)]
    pub id: ContractorId,
    pub company_name: String,
    pub slug: String,
    #[schema(value_type = Vec<String>)]
    pub specialties: Vec<Specialty>,
    #[schema(value_type = Object)]
    pub rating: Rating,
    #[schema(value_type = Object)]
    pub service_area: ServiceArea,
}

impl From<Contractor> for ContractorSummary {
    fn from(contractor: Contractor) -> Self {
        Self {
            id: contractor.id,
            company_name: contractor.company_name,
            slug: contractor.slug,
            specialties: contractor.specialties,
            rating: contractor.rating,
            service_area: contractor.service_area,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/health",
    responses((status = 200, description = "API is up", body = ApiHealth)),
    tags = ["api"],
    operation_id = "apiHealth",
    security([])
)]
#[get("/api/health")]
pub async fn health() -> web::Json<ApiHealth> {
    web::Json(ApiHealth {
        status: "ok".to_owned(),
        timestamp: Utc::now(),
        version: API_VERSION.to_owned(),
    })
}

#[utoipa::path(
    get,
    path = "/api/styles",
    responses((status = 200, description = "Design styles", body = [Object])),
    tags = ["api"],
    operation_id = "apiStyles",
    security([])
)]
#[get("/api/styles")]
pub async fn styles() -> web::Json<&'static [StyleEntry]> {
    web::Json(&STYLES)
}

#[utoipa::path(
    get,
    path = "/api/room-types",
    responses((status = 200, description = "Room types", body = [Object])),
    tags = ["api"],
    operation_id = "apiRoomTypes",
    security([])
)]
#[get("/api/room-types")]
pub async fn room_types() -> web::Json<&'static [RoomTypeEntry]> {
    web::Json(&ROOM_TYPES)
}

/// Credits left on the AI provider account.
#[utoipa::path(
    get,
    path = "/api/credits",
    responses(
        (status = 200, description = "Provider credits", body = Object),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Provider not configured", body = ErrorSchema)
    ),
    tags = ["api"],
    operation_id = "apiCredits"
)]
#[get("/api/credits")]
pub async fn credits(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ProviderCredits>> {
    actor(&state, &session).await?;
    Ok(web::Json(state.credits.provider_credits().await?))
}

#[utoipa::path(
    post,
    path = "/api/generate",
    request_body = ApiGenerateRequest,
    responses(
        (status = 200, description = "Variant generated", body = Object),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "No generation credits remaining", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["api"],
    operation_id = "apiGenerate"
)]
#[post("/api/generate")]
pub async fn generate(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ApiGenerateRequest>,
) -> ApiResult<web::Json<GenerationOutcome>> {
    let actor = actor(&state, &session).await?;
    let body = payload.into_inner();
    let raw_id = required_text(
        Some(&body.project_id),
        "projectId",
        "Project id is required",
    )?;
    let id = ProjectId::parse(&raw_id)?;
    Ok(web::Json(state.projects.generate(actor, &id, body.style).await?))
}

#[utoipa::path(
    get,
    path = "/api/projects/{id}",
    params(("id" = String, Path, description = "Project identifier")),
    responses(
        (status = 200, description = "Project", body = ProjectSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["api"],
    operation_id = "apiGetProject"
)]
#[get("/api/projects/{id}")]
pub async fn project(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Project>> {
    let actor = actor(&state, &session).await?;
    let id = ProjectId::parse(&path)?;
    Ok(web::Json(state.projects_query.get(actor, &id).await?))
}

/// Move a project to another status; `generating` is reserved.
#[utoipa::path(
    patch,
    path = "/api/projects/{id}/status",
    params(("id" = String, Path, description = "Project identifier")),
    request_body = ApiStatusRequest,
    responses(
        (status = 200, description = "Status changed", body = ProjectSchema),
        (status = 400, description = "Unknown or reserved status", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["api"],
    operation_id = "apiProjectStatus"
)]
#[patch("/api/projects/{id}/status")]
pub async fn project_status(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<ApiStatusRequest>,
) -> ApiResult<web::Json<Project>> {
    let actor = actor(&state, &session).await?;
    let id = ProjectId::parse(&path)?;
    let status: ProjectStatus =
        required_text(Some(&payload.status), "status", "Status is required")?.parse()?;
    Ok(web::Json(state.projects.set_status(actor, &id, status).await?))
}

#[utoipa::path(
    get,
    path = "/api/contractors/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching contractors", body = [ContractorSummary]),
        (status = 400, description = "Unknown specialty", body = ErrorSchema)
    ),
    tags = ["api"],
    operation_id = "apiSearchContractors",
    security([])
)]
#[get("/api/contractors/search")]
pub async fn search_contractors(
    state: web::Data<HttpState>,
    params: web::Query<SearchParams>,
) -> ApiResult<web::Json<Vec<ContractorSummary>>> {
    let params = params.into_inner();
    let limit = params
        .limit
        .unwrap_or(SEARCH_DEFAULT_LIMIT)
        .min(SEARCH_MAX_LIMIT);
    let filter = BrowseParams {
        specialty: params.specialty,
        city: params.city,
        min_rating: None,
        q: params.q,
    }
    .into_filter(limit)?;
    let found = state.contractors_query.browse(filter).await?;
    Ok(web::Json(
        found.into_iter().map(ContractorSummary::from).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/stats",
    responses(
        (status = 200, description = "Project counters", body = Object),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["api"],
    operation_id = "apiStats"
)]
#[get("/api/stats")]
pub async fn stats(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ProjectStats>> {
    let actor = actor(&state, &session).await?;
    Ok(web::Json(state.projects_query.stats(actor).await?))
}

#[cfg(test)]
mod tests {
    use crate::inbound::http::test_utils::TestHarness;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn health_reports_the_version() {
        let harness = TestHarness::new();
        let app = actix_test::init_service(harness.app()).await;
        let res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/api/health").to_request())
                .await;
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], "1.0.0");
        assert!(body["timestamp"].is_string());
    }

    #[rstest]
    #[case("/api/styles", 14)]
    #[case("/api/room-types", 10)]
    #[actix_web::test]
    async fn catalogue_endpoints_list_every_entry(#[case] uri: &str, #[case] expected: usize) {
        let harness = TestHarness::new();
        let app = actix_test::init_service(harness.app()).await;
        let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await;
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body.as_array().map(Vec::len), Some(expected));
    }

    #[actix_web::test]
    async fn credits_require_a_session() {
        let harness = TestHarness::new();
        let app = actix_test::init_service(harness.app()).await;
        let res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/api/credits").to_request())
                .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn generate_then_count_variants() {
        let harness = TestHarness::new();
        let app = actix_test::init_service(harness.app()).await;
        let cookie = harness.register(&app, "ada@example.com", None).await;
        let project = harness.create_project(&app, &cookie).await;
        let id = project["id"].as_str().expect("id");

        let generated = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/generate")
                .cookie(cookie.clone())
                .set_json(json!({ "projectId": id }))
                .to_request(),
        )
        .await;
        assert_eq!(generated.status(), StatusCode::OK);
        let outcome: Value = actix_test::read_body_json(generated).await;
        assert_eq!(outcome["variant"]["style"], "industrial");

        let stats = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/stats")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let stats: Value = actix_test::read_body_json(stats).await;
        assert_eq!(stats["totalProjects"], 1);
        assert_eq!(stats["completedDesigns"], 1);
        assert_eq!(stats["totalVariants"], 1);
    }

    #[rstest]
    #[case("in-progress", StatusCode::OK)]
    #[case("generating", StatusCode::BAD_REQUEST)]
    #[case("sideways", StatusCode::BAD_REQUEST)]
    #[actix_web::test]
    async fn status_patch_respects_reserved_states(
        #[case] status: &str,
        #[case] expected: StatusCode,
    ) {
        let harness = TestHarness::new();
        let app = actix_test::init_service(harness.app()).await;
        let cookie = harness.register(&app, "ada@example.com", None).await;
        let project = harness.create_project(&app, &cookie).await;
        let id = project["id"].as_str().expect("id");

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::patch()
                .uri(&format!("/api/projects/{id}/status"))
                .cookie(cookie)
                .set_json(json!({ "status": status }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), expected);
    }

    #[actix_web::test]
    async fn search_caps_the_limit() {
        let harness = TestHarness::new();
        let app = actix_test::init_service(harness.app()).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/contractors/search?limit=500&q=kitchen")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body, json!([]));
    }
}
