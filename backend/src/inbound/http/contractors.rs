//! Contractor directory and profile handlers.
//!
//! ```text
//! GET  /contractors
//! POST /contractors/setup
//! GET  /contractors/profile
//! PUT  /contractors/profile
//! GET  /contractors/projects/available
//! POST /contractors/projects/{id}/interest
//! GET  /contractors/{slug}
//! POST /contractors/{slug}/reviews
//! ```
//!
//! Literal paths are registered ahead of `/contractors/{slug}` so a profile
//! slug never shadows them.

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::InterestRequest;
use crate::domain::{
    AvailabilityStatus, Contractor, ContractorFilter, ContractorProfileUpdate, ContractorSetup,
    ContractorSetupInput, Error, NewReview, Project, ProjectId, Specialty,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::MessageResponse;
use crate::inbound::http::guards::actor;
use crate::inbound::http::schemas::{ContractorSchema, ErrorSchema, ProjectSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_optional;

/// Directory filters from the query string.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(default, rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct BrowseParams {
    /// Required specialty, e.g. `kitchen`.
    pub specialty: Option<String>,
    /// City served (case-insensitive substring).
    pub city: Option<String>,
    /// Minimum average rating.
    pub min_rating: Option<f64>,
    /// Free text.
    pub q: Option<String>,
}

impl BrowseParams {
    pub(crate) fn into_filter(self, limit: usize) -> ApiResult<ContractorFilter> {
        Ok(ContractorFilter {
            specialty: parse_optional::<Specialty>(self.specialty.as_deref())?,
            city: trimmed(self.city),
            min_rating: self.min_rating,
            query: trimmed(self.q),
            limit,
        })
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|text| !text.is_empty())
}

fn parse_specialties(raw: &[String]) -> ApiResult<Vec<Specialty>> {
    raw.iter()
        .map(|value| value.parse::<Specialty>().map_err(Error::from))
        .collect()
}

/// Contractor onboarding form.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct SetupRequest {
    #[schema(example = "Atelier Dupont")]
    pub company_name: String,
    pub description: String,
    #[schema(example = json!(["kitchen", "plumbing"]))]
    pub specialties: Vec<String>,
    pub experience_years: Option<u32>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    /// Comma separated.
    #[schema(example = "Paris, Lyon")]
    pub service_cities: Option<String>,
    pub service_radius: Option<u32>,
    pub hourly_rate: Option<f64>,
    pub minimum_project: Option<f64>,
}

impl SetupRequest {
    fn into_setup(self) -> ApiResult<ContractorSetup> {
        let specialties = parse_specialties(&self.specialties)?;
        let parsed = ContractorSetup::try_from_input(ContractorSetupInput {
            company_name: &self.company_name,
            description: &self.description,
            specialties: &specialties,
            experience_years: self.experience_years,
            phone: self.phone.as_deref(),
            website: self.website.as_deref(),
            street: self.street.as_deref(),
            city: self.city.as_deref(),
            state: self.state.as_deref(),
            zip_code: self.zip_code.as_deref(),
            service_cities: self.service_cities.as_deref(),
            service_radius: self.service_radius,
            hourly_rate: self.hourly_rate,
            minimum_project: self.minimum_project,
        })?;
        Ok(parsed)
    }
}

/// Profile edits; absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileUpdateRequest {
    pub company_name: Option<String>,
    pub description: Option<String>,
    pub specialties: Option<Vec<String>>,
    #[schema(example = "busy")]
    pub availability: Option<String>,
    /// Comma separated.
    pub service_cities: Option<String>,
    pub hourly_rate: Option<f64>,
}

impl ProfileUpdateRequest {
    fn into_update(self) -> ApiResult<ContractorProfileUpdate> {
        Ok(ContractorProfileUpdate {
            company_name: self.company_name,
            description: self.description,
            specialties: self
                .specialties
                .as_deref()
                .map(parse_specialties)
                .transpose()?,
            availability: parse_optional::<AvailabilityStatus>(self.availability.as_deref())?,
            service_cities: self.service_cities.map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|city| !city.is_empty())
                    .map(str::to_owned)
                    .collect()
            }),
            hourly_rate: self.hourly_rate,
        })
    }
}

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct InterestBody {
    pub message: Option<String>,
    pub quotation: Option<f64>,
}

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct ReviewRequest {
    #[schema(example = 5)]
    pub rating: u8,
    pub title: Option<String>,
    pub comment: Option<String>,
    /// Project the work was done for.
    pub project: Option<String>,
}

/// Browse active contractors, premium profiles first.
#[utoipa::path(
    get,
    path = "/contractors",
    params(BrowseParams),
    responses(
        (status = 200, description = "Matching contractors", body = [ContractorSchema]),
        (status = 400, description = "Unknown specialty", body = ErrorSchema)
    ),
    tags = ["contractors"],
    operation_id = "browseContractors",
    security([])
)]
#[get("/contractors")]
pub async fn browse(
    state: web::Data<HttpState>,
    params: web::Query<BrowseParams>,
) -> ApiResult<web::Json<Vec<Contractor>>> {
    let filter = params.into_inner().into_filter(ContractorFilter::default().limit)?;
    Ok(web::Json(state.contractors_query.browse(filter).await?))
}

/// Create the contractor profile of the signed-in contractor.
#[utoipa::path(
    post,
    path = "/contractors/setup",
    request_body = SetupRequest,
    responses(
        (status = 201, description = "Profile created", body = ContractorSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Not a contractor", body = ErrorSchema),
        (status = 409, description = "Profile already exists", body = ErrorSchema)
    ),
    tags = ["contractors"],
    operation_id = "setupContractor"
)]
#[post("/contractors/setup")]
pub async fn setup(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SetupRequest>,
) -> ApiResult<HttpResponse> {
    let actor = actor(&state, &session).await?;
    let request = payload.into_inner().into_setup()?;
    let profile = state.contractors.setup(actor, request).await?;
    Ok(HttpResponse::Created().json(profile))
}

#[utoipa::path(
    get,
    path = "/contractors/profile",
    responses(
        (status = 200, description = "Own profile", body = ContractorSchema),
        (status = 403, description = "Not a contractor", body = ErrorSchema),
        (status = 404, description = "No profile yet", body = ErrorSchema)
    ),
    tags = ["contractors"],
    operation_id = "ownContractorProfile"
)]
#[get("/contractors/profile")]
pub async fn own_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Contractor>> {
    let actor = actor(&state, &session).await?;
    state
        .contractors_query
        .own_profile(actor)
        .await?
        .map(web::Json)
        .ok_or_else(|| Error::not_found("Set up your contractor profile first"))
}

#[utoipa::path(
    put,
    path = "/contractors/profile",
    request_body = ProfileUpdateRequest,
    responses(
        (status = 200, description = "Profile updated", body = ContractorSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "No profile yet", body = ErrorSchema)
    ),
    tags = ["contractors"],
    operation_id = "updateContractorProfile"
)]
#[put("/contractors/profile")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ProfileUpdateRequest>,
) -> ApiResult<web::Json<Contractor>> {
    let actor = actor(&state, &session).await?;
    let update = payload.into_inner().into_update()?;
    Ok(web::Json(state.contractors.update_profile(actor, update).await?))
}

/// Projects open to contractors whose room type matches a specialty.
#[utoipa::path(
    get,
    path = "/contractors/projects/available",
    responses(
        (status = 200, description = "Open projects", body = [ProjectSchema]),
        (status = 403, description = "Not a contractor", body = ErrorSchema),
        (status = 404, description = "No profile yet", body = ErrorSchema)
    ),
    tags = ["contractors"],
    operation_id = "availableProjects"
)]
#[get("/contractors/projects/available")]
pub async fn available_projects(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Project>>> {
    let actor = actor(&state, &session).await?;
    Ok(web::Json(
        state
            .contractors_query
            .available_projects(actor, None)
            .await?,
    ))
}

/// Bid on an open project; the owner is notified in a conversation.
#[utoipa::path(
    post,
    path = "/contractors/projects/{id}/interest",
    params(("id" = String, Path, description = "Project identifier")),
    request_body = InterestBody,
    responses(
        (status = 200, description = "Interest recorded", body = MessageResponse),
        (status = 400, description = "Already expressed interest", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["contractors"],
    operation_id = "expressInterest"
)]
#[post("/contractors/projects/{id}/interest")]
pub async fn express_interest(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: Option<web::Json<InterestBody>>,
) -> ApiResult<web::Json<MessageResponse>> {
    let actor = actor(&state, &session).await?;
    let project = ProjectId::parse(&path)?;
    let body = payload.map(web::Json::into_inner).unwrap_or_default();
    state
        .contractors
        .express_interest(
            actor,
            &project,
            InterestRequest {
                message: body.message,
                quotation: body.quotation,
            },
        )
        .await?;
    Ok(web::Json(MessageResponse::new(
        "Interest expressed successfully",
    )))
}

/// Public profile; counts a view.
#[utoipa::path(
    get,
    path = "/contractors/{slug}",
    params(("slug" = String, Path, description = "Profile slug")),
    responses(
        (status = 200, description = "Contractor", body = ContractorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["contractors"],
    operation_id = "viewContractor",
    security([])
)]
#[get("/contractors/{slug}")]
pub async fn view(
    state: web::Data<HttpState>,
    slug: web::Path<String>,
) -> ApiResult<web::Json<Contractor>> {
    Ok(web::Json(state.contractors_query.view(&slug).await?))
}

#[utoipa::path(
    post,
    path = "/contractors/{slug}/reviews",
    params(("slug" = String, Path, description = "Profile slug")),
    request_body = ReviewRequest,
    responses(
        (status = 201, description = "Review added", body = ContractorSchema),
        (status = 400, description = "Rating out of range", body = ErrorSchema),
        (status = 403, description = "Clients only", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["contractors"],
    operation_id = "reviewContractor"
)]
#[post("/contractors/{slug}/reviews")]
pub async fn review(
    state: web::Data<HttpState>,
    session: SessionContext,
    slug: web::Path<String>,
    payload: web::Json<ReviewRequest>,
) -> ApiResult<HttpResponse> {
    let actor = actor(&state, &session).await?;
    let body = payload.into_inner();
    let project = body
        .project
        .as_deref()
        .map(ProjectId::parse)
        .transpose()?;
    let new_review = NewReview::try_new(
        body.rating,
        body.title.as_deref(),
        body.comment.as_deref(),
        project,
    )?;
    let profile = state.contractors.review(actor, &slug, new_review).await?;
    Ok(HttpResponse::Created().json(profile))
}
