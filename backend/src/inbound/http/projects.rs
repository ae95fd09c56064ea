//! Project handlers.
//!
//! ```text
//! GET    /projects
//! POST   /projects
//! GET    /projects/share/{token}
//! GET    /projects/{id}
//! PUT    /projects/{id}
//! DELETE /projects/{id}
//! POST   /projects/{id}/upload
//! DELETE /projects/{id}/images/{imageId}
//! POST   /projects/{id}/generate
//! POST   /projects/{id}/publish
//! POST   /projects/{id}/unpublish
//! POST   /projects/{id}/set-featured
//! POST   /projects/{id}/contractors/{contractorId}/accept
//! ```
//!
//! Projects belonging to someone else answer `404` so identifiers are not
//! disclosed; administrators pass the owner check.

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::GenerationOutcome;
use crate::domain::project::{DesignVariant, Dimensions, ProjectImage};
use crate::domain::{
    Budget, ContractorId, DesignStyle, ImageId, ImageUpload, Preferences, Priorities, Project,
    ProjectChanges, ProjectDraft, ProjectId, RoomType, Visibility,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::guards::actor;
use crate::inbound::http::schemas::{ErrorSchema, ProjectSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_optional, required_text};

/// Image already hosted elsewhere.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageUploadRequest {
    #[schema(example = "https://res.cloudinary.com/demo/kitchen.jpg")]
    pub url: String,
    pub public_id: Option<String>,
}

impl From<ImageUploadRequest> for ImageUpload {
    fn from(value: ImageUploadRequest) -> Self {
        Self {
            url: value.url,
            public_id: value.public_id,
        }
    }
}

/// New project form. Preference lists are comma separated.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateProjectRequest {
    #[schema(example = "Loft kitchen")]
    pub title: String,
    pub description: String,
    #[schema(example = "kitchen")]
    pub room_type: Option<String>,
    #[schema(example = "industrial")]
    pub style: Option<String>,
    pub budget_min: Option<f64>,
    pub budget_max: Option<f64>,
    pub length: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    #[schema(example = "white, oak")]
    pub colors: Option<String>,
    pub materials: Option<String>,
    pub must_have: Option<String>,
    pub must_avoid: Option<String>,
    pub priority_quality: Option<u8>,
    pub priority_price: Option<u8>,
    pub priority_speed: Option<u8>,
    #[serde(rename = "isDIY")]
    pub is_diy: bool,
    pub images: Vec<ImageUploadRequest>,
}

impl CreateProjectRequest {
    fn into_draft(self) -> ApiResult<ProjectDraft> {
        let room_type: RoomType = required_text(
            self.room_type.as_deref(),
            "roomType",
            "Room type is required",
        )?
        .parse()?;
        let draft = ProjectDraft {
            title: self.title,
            description: self.description,
            room_type,
            style: parse_optional::<DesignStyle>(self.style.as_deref())?,
            budget: Budget::try_new(self.budget_min, self.budget_max)?,
            dimensions: Dimensions {
                length: self.length,
                width: self.width,
                height: self.height,
                ..Dimensions::default()
            },
            preferences: Preferences::from_csv(
                self.colors.as_deref(),
                self.materials.as_deref(),
                self.must_have.as_deref(),
                self.must_avoid.as_deref(),
            ),
            priorities: Priorities::try_new(
                self.priority_quality,
                self.priority_price,
                self.priority_speed,
            )?,
            is_diy: self.is_diy,
            images: self.images.into_iter().map(ImageUpload::from).collect(),
        };
        Ok(draft.validate()?)
    }
}

/// Partial project update; absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub room_type: Option<String>,
    pub style: Option<String>,
    pub budget_min: Option<f64>,
    pub budget_max: Option<f64>,
    #[schema(example = "contractors")]
    pub visibility: Option<String>,
    pub colors: Option<String>,
    pub materials: Option<String>,
    pub must_have: Option<String>,
    pub must_avoid: Option<String>,
    pub priority_quality: Option<u8>,
    pub priority_price: Option<u8>,
    pub priority_speed: Option<u8>,
    pub notes: Option<String>,
}

impl UpdateProjectRequest {
    fn into_changes(self) -> ApiResult<ProjectChanges> {
        let budget = (self.budget_min.is_some() || self.budget_max.is_some())
            .then(|| Budget::try_new(self.budget_min, self.budget_max))
            .transpose()?;
        let preferences = [
            &self.colors,
            &self.materials,
            &self.must_have,
            &self.must_avoid,
        ]
        .iter()
        .any(|field| field.is_some())
        .then(|| {
            Preferences::from_csv(
                self.colors.as_deref(),
                self.materials.as_deref(),
                self.must_have.as_deref(),
                self.must_avoid.as_deref(),
            )
        });
        let priorities = (self.priority_quality.is_some()
            || self.priority_price.is_some()
            || self.priority_speed.is_some())
        .then(|| {
            Priorities::try_new(
                self.priority_quality,
                self.priority_price,
                self.priority_speed,
            )
        })
        .transpose()?;
        Ok(ProjectChanges {
            title: self.title,
            description: self.description,
            room_type: parse_optional::<RoomType>(self.room_type.as_deref())?,
            style: parse_optional::<DesignStyle>(self.style.as_deref())?,
            budget,
            visibility: parse_optional::<Visibility>(self.visibility.as_deref())?,
            preferences,
            priorities,
            notes: self.notes,
        })
    }
}

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct UploadImagesRequest {
    pub images: Vec<ImageUploadRequest>,
}

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct GenerateRequest {
    /// Style override; defaults to the project's style.
    #[schema(example = "scandinavian")]
    pub style: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct FeaturedImageRequest {
    pub image_url: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublishResponse {
    #[schema(example = "/gallery/loft-kitchen-lx3k2a")]
    pub gallery_url: String,
}

/// Project as shown to visitors of the gallery or a share link.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicProjectResponse {
    #[schema(value_type = String)]
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    #[schema(value_type = String, example = "kitchen")]
    pub room_type: RoomType,
    #[schema(value_type = Option<String>)]
    pub style: Option<DesignStyle>,
    #[schema(value_type = Vec<Object>)]
    pub original_images: Vec<ProjectImage>,
    #[schema(value_type = Vec<Object>)]
    pub design_variants: Vec<DesignVariant>,
    pub featured_image: Option<String>,
    pub public_slug: Option<String>,
    pub tags: Vec<String>,
    pub likes: u64,
    pub views: u64,
    #[schema(value_type = Option<String>)]
    pub published_at: Option<DateTime<Utc>>,
}

impl From<Project> for PublicProjectResponse {
    fn from(project: Project) -> Self {
        Self {
            id: project.id,
            title: project.title,
            description: project.description,
            room_type: project.room_type,
            style: project.style,
            original_images: project.original_images,
            design_variants: project.design_variants,
            featured_image: project.featured_image,
            public_slug: project.public_slug,
            tags: project.tags,
            likes: project.likes,
            views: project.views,
            published_at: project.published_at,
        }
    }
}

fn project_id(raw: &str) -> ApiResult<ProjectId> {
    Ok(ProjectId::parse(raw)?)
}

/// Projects owned by the caller, newest first.
#[utoipa::path(
    get,
    path = "/projects",
    responses(
        (status = 200, description = "Own projects", body = [ProjectSchema]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "listProjects"
)]
#[get("/projects")]
pub async fn list_projects(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Project>>> {
    let actor = actor(&state, &session).await?;
    Ok(web::Json(state.projects_query.list_own(actor).await?))
}

/// Create a draft project.
#[utoipa::path(
    post,
    path = "/projects",
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Project created", body = ProjectSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "createProject"
)]
#[post("/projects")]
pub async fn create_project(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateProjectRequest>,
) -> ApiResult<HttpResponse> {
    let actor = actor(&state, &session).await?;
    let draft = payload.into_inner().into_draft()?;
    let project = state.projects.create(actor, draft).await?;
    Ok(HttpResponse::Created().json(project))
}

/// Unlisted view through a share token.
#[utoipa::path(
    get,
    path = "/projects/share/{token}",
    params(("token" = String, Path, description = "Share token")),
    responses(
        (status = 200, description = "Shared project", body = PublicProjectResponse),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "sharedProject",
    security([])
)]
#[get("/projects/share/{token}")]
pub async fn shared_project(
    state: web::Data<HttpState>,
    token: web::Path<String>,
) -> ApiResult<web::Json<PublicProjectResponse>> {
    let project = state.projects_query.by_share_token(&token).await?;
    Ok(web::Json(project.into()))
}

#[utoipa::path(
    get,
    path = "/projects/{id}",
    params(("id" = String, Path, description = "Project identifier")),
    responses(
        (status = 200, description = "Project", body = ProjectSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "getProject"
)]
#[get("/projects/{id}")]
pub async fn get_project(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Project>> {
    let actor = actor(&state, &session).await?;
    let id = project_id(&path)?;
    Ok(web::Json(state.projects_query.get(actor, &id).await?))
}

#[utoipa::path(
    put,
    path = "/projects/{id}",
    params(("id" = String, Path, description = "Project identifier")),
    request_body = UpdateProjectRequest,
    responses(
        (status = 200, description = "Project updated", body = ProjectSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "updateProject"
)]
#[put("/projects/{id}")]
pub async fn update_project(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateProjectRequest>,
) -> ApiResult<web::Json<Project>> {
    let actor = actor(&state, &session).await?;
    let id = project_id(&path)?;
    let changes = payload.into_inner().into_changes()?;
    Ok(web::Json(state.projects.update(actor, &id, changes).await?))
}

#[utoipa::path(
    delete,
    path = "/projects/{id}",
    params(("id" = String, Path, description = "Project identifier")),
    responses(
        (status = 204, description = "Project deleted"),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "deleteProject"
)]
#[delete("/projects/{id}")]
pub async fn delete_project(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let actor = actor(&state, &session).await?;
    let id = project_id(&path)?;
    state.projects.delete(actor, &id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Attach up to five hosted images.
#[utoipa::path(
    post,
    path = "/projects/{id}/upload",
    params(("id" = String, Path, description = "Project identifier")),
    request_body = UploadImagesRequest,
    responses(
        (status = 200, description = "Images added", body = ProjectSchema),
        (status = 400, description = "No images or too many", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "uploadImages"
)]
#[post("/projects/{id}/upload")]
pub async fn upload_images(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UploadImagesRequest>,
) -> ApiResult<web::Json<Project>> {
    let actor = actor(&state, &session).await?;
    let id = project_id(&path)?;
    let uploads = payload
        .into_inner()
        .images
        .into_iter()
        .map(ImageUpload::from)
        .collect();
    Ok(web::Json(state.projects.add_images(actor, &id, uploads).await?))
}

#[utoipa::path(
    delete,
    path = "/projects/{id}/images/{imageId}",
    params(
        ("id" = String, Path, description = "Project identifier"),
        ("imageId" = String, Path, description = "Image identifier")
    ),
    responses(
        (status = 200, description = "Image removed", body = ProjectSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "removeImage"
)]
#[delete("/projects/{id}/images/{image_id}")]
pub async fn remove_image(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<Project>> {
    let actor = actor(&state, &session).await?;
    let (raw_project, raw_image) = path.into_inner();
    let id = project_id(&raw_project)?;
    let image = ImageId::parse(&raw_image)?;
    Ok(web::Json(state.projects.remove_image(actor, &id, &image).await?))
}

/// Render a design variant through the AI provider.
#[utoipa::path(
    post,
    path = "/projects/{id}/generate",
    params(("id" = String, Path, description = "Project identifier")),
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Variant generated", body = Object),
        (status = 400, description = "No source image or unknown style", body = ErrorSchema),
        (status = 403, description = "No generation credits remaining", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Generation already in progress", body = ErrorSchema),
        (status = 502, description = "Provider failure", body = ErrorSchema),
        (status = 503, description = "Provider not configured", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "generateDesign"
)]
#[post("/projects/{id}/generate")]
pub async fn generate_design(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: Option<web::Json<GenerateRequest>>,
) -> ApiResult<web::Json<GenerationOutcome>> {
    let actor = actor(&state, &session).await?;
    let id = project_id(&path)?;
    let style = payload.and_then(|body| body.into_inner().style);
    Ok(web::Json(state.projects.generate(actor, &id, style).await?))
}

/// List the project in the public gallery.
#[utoipa::path(
    post,
    path = "/projects/{id}/publish",
    params(("id" = String, Path, description = "Project identifier")),
    responses(
        (status = 200, description = "Published", body = PublishResponse),
        (status = 400, description = "Nothing to publish", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "publishProject"
)]
#[post("/projects/{id}/publish")]
pub async fn publish_project(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<PublishResponse>> {
    let actor = actor(&state, &session).await?;
    let id = project_id(&path)?;
    let gallery_url = state.projects.publish(actor, &id).await?;
    Ok(web::Json(PublishResponse { gallery_url }))
}

#[utoipa::path(
    post,
    path = "/projects/{id}/unpublish",
    params(("id" = String, Path, description = "Project identifier")),
    responses(
        (status = 200, description = "Unpublished", body = ProjectSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "unpublishProject"
)]
#[post("/projects/{id}/unpublish")]
pub async fn unpublish_project(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Project>> {
    let actor = actor(&state, &session).await?;
    let id = project_id(&path)?;
    Ok(web::Json(state.projects.unpublish(actor, &id).await?))
}

/// Choose the gallery cover among the project's images and renders.
#[utoipa::path(
    post,
    path = "/projects/{id}/set-featured",
    params(("id" = String, Path, description = "Project identifier")),
    request_body = FeaturedImageRequest,
    responses(
        (status = 200, description = "Featured image set", body = ProjectSchema),
        (status = 400, description = "Image not part of the project", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "setFeaturedImage"
)]
#[post("/projects/{id}/set-featured")]
pub async fn set_featured_image(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<FeaturedImageRequest>,
) -> ApiResult<web::Json<Project>> {
    let actor = actor(&state, &session).await?;
    let id = project_id(&path)?;
    let url = required_text(Some(&payload.image_url), "imageUrl", "Image URL is required")?;
    Ok(web::Json(
        state.projects.set_featured_image(actor, &id, &url).await?,
    ))
}

/// Accept a contractor's pending request; other pending requests are
/// rejected.
#[utoipa::path(
    post,
    path = "/projects/{id}/contractors/{contractorId}/accept",
    params(
        ("id" = String, Path, description = "Project identifier"),
        ("contractorId" = String, Path, description = "Contractor identifier")
    ),
    responses(
        (status = 200, description = "Contractor selected", body = ProjectSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Request no longer pending", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "acceptContractor"
)]
#[post("/projects/{id}/contractors/{contractor_id}/accept")]
pub async fn accept_contractor(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<Project>> {
    let actor = actor(&state, &session).await?;
    let (raw_project, raw_contractor) = path.into_inner();
    let id = project_id(&raw_project)?;
    let contractor = ContractorId::parse(&raw_contractor)?;
    Ok(web::Json(
        state
            .projects
            .accept_contractor(actor, &id, &contractor)
            .await?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::TestHarness;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    fn draft_requires_a_room_type() {
        let request = CreateProjectRequest {
            title: "Loft".to_owned(),
            description: "Open plan".to_owned(),
            ..CreateProjectRequest::default()
        };
        let err = request.into_draft().expect_err("room type missing");
        assert_eq!(err.message(), "Room type is required");
    }

    #[rstest]
    fn draft_splits_preferences_and_defaults_priorities() {
        let request = CreateProjectRequest {
            title: " Loft ".to_owned(),
            description: "Open plan".to_owned(),
            room_type: Some("kitchen".to_owned()),
            colors: Some("white, oak ,".to_owned()),
            priority_price: Some(5),
            ..CreateProjectRequest::default()
        };
        let draft = request.into_draft().expect("valid draft");
        assert_eq!(draft.title, "Loft");
        assert_eq!(draft.preferences.colors, vec!["white", "oak"]);
        assert_eq!(draft.priorities.price, 5);
        assert_eq!(draft.priorities.quality, 3);
    }

    #[rstest]
    #[case(Some(500.0), Some(100.0))]
    #[case(Some(-1.0), None)]
    fn draft_rejects_bad_budgets(#[case] min: Option<f64>, #[case] max: Option<f64>) {
        let request = CreateProjectRequest {
            title: "Loft".to_owned(),
            description: "Open plan".to_owned(),
            room_type: Some("kitchen".to_owned()),
            budget_min: min,
            budget_max: max,
            ..CreateProjectRequest::default()
        };
        assert!(request.into_draft().is_err());
    }

    #[rstest]
    fn empty_update_changes_nothing() {
        let changes = UpdateProjectRequest::default()
            .into_changes()
            .expect("valid");
        assert_eq!(changes, ProjectChanges::default());
    }

    #[actix_web::test]
    async fn owner_lifecycle_from_draft_to_gallery() {
        let harness = TestHarness::new();
        let app = actix_test::init_service(harness.app()).await;
        let cookie = harness.register(&app, "ada@example.com", None).await;
        let project = harness.create_project(&app, &cookie).await;
        assert_eq!(project["status"], "draft");
        let id = project["id"].as_str().expect("id").to_owned();

        let early = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/projects/{id}/publish"))
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(early.status(), StatusCode::BAD_REQUEST);

        let generated = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/projects/{id}/generate"))
                .cookie(cookie.clone())
                .set_json(json!({ "style": "scandinavian" }))
                .to_request(),
        )
        .await;
        assert_eq!(generated.status(), StatusCode::OK);
        let outcome: Value = actix_test::read_body_json(generated).await;
        assert_eq!(outcome["variant"]["name"], "Scandinavian Design");
        assert_eq!(outcome["creditsRemaining"], 2);

        let published = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/projects/{id}/publish"))
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(published.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(published).await;
        let gallery_url = body["galleryUrl"].as_str().expect("gallery url").to_owned();
        assert!(gallery_url.starts_with("/gallery/"));

        let public = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri(&gallery_url).to_request(),
        )
        .await;
        assert_eq!(public.status(), StatusCode::OK);
        let shown: Value = actix_test::read_body_json(public).await;
        assert_eq!(shown["views"], 1);
        assert!(shown.get("shareToken").is_none());
    }

    #[actix_web::test]
    async fn other_users_cannot_see_or_edit_the_project() {
        let harness = TestHarness::new();
        let app = actix_test::init_service(harness.app()).await;
        let owner = harness.register(&app, "ada@example.com", None).await;
        let project = harness.create_project(&app, &owner).await;
        let id = project["id"].as_str().expect("id");
        let stranger = harness.register(&app, "eve@example.com", None).await;

        for req in [
            actix_test::TestRequest::get().uri(&format!("/projects/{id}")),
            actix_test::TestRequest::put()
                .uri(&format!("/projects/{id}"))
                .set_json(json!({ "title": "Taken over" })),
            actix_test::TestRequest::post()
                .uri(&format!("/projects/{id}/upload"))
                .set_json(json!({ "images": [{ "url": "https://cdn.example/eve.jpg" }] })),
            actix_test::TestRequest::post()
                .uri(&format!("/projects/{id}/generate"))
                .set_json(json!({})),
            actix_test::TestRequest::post().uri(&format!("/projects/{id}/publish")),
            actix_test::TestRequest::post()
                .uri(&format!("/projects/{id}/set-featured"))
                .set_json(json!({ "imageUrl": "https://cdn.example/kitchen.jpg" })),
            actix_test::TestRequest::patch()
                .uri(&format!("/api/projects/{id}/status"))
                .set_json(json!({ "status": "in-progress" })),
            actix_test::TestRequest::delete().uri(&format!("/projects/{id}")),
        ] {
            let res =
                actix_test::call_service(&app, req.cookie(stranger.clone()).to_request()).await;
            assert_eq!(res.status(), StatusCode::NOT_FOUND);
        }

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/projects/{id}"))
                .cookie(owner)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let stored: Value = actix_test::read_body_json(res).await;
        assert_eq!(stored, project);
    }

    #[actix_web::test]
    async fn update_edits_fields_and_visibility() {
        let harness = TestHarness::new();
        let app = actix_test::init_service(harness.app()).await;
        let cookie = harness.register(&app, "ada@example.com", None).await;
        let project = harness.create_project(&app, &cookie).await;
        let id = project["id"].as_str().expect("id");

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri(&format!("/projects/{id}"))
                .cookie(cookie)
                .set_json(json!({
                    "title": "Sunny kitchen",
                    "visibility": "contractors",
                    "budgetMin": 1000.0,
                    "budgetMax": 5000.0,
                }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["title"], "Sunny kitchen");
        assert_eq!(body["visibility"], "contractors");
        assert_eq!(body["budget"]["max"], 5000.0);
    }

    #[actix_web::test]
    async fn unknown_visibility_is_rejected() {
        let harness = TestHarness::new();
        let app = actix_test::init_service(harness.app()).await;
        let cookie = harness.register(&app, "ada@example.com", None).await;
        let project = harness.create_project(&app, &cookie).await;
        let id = project["id"].as_str().expect("id");

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri(&format!("/projects/{id}"))
                .cookie(cookie)
                .set_json(json!({ "visibility": "everyone" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn images_are_added_and_removed() {
        let harness = TestHarness::new();
        let app = actix_test::init_service(harness.app()).await;
        let cookie = harness.register(&app, "ada@example.com", None).await;
        let project = harness.create_project(&app, &cookie).await;
        let id = project["id"].as_str().expect("id");

        let empty = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/projects/{id}/upload"))
                .cookie(cookie.clone())
                .set_json(json!({ "images": [] }))
                .to_request(),
        )
        .await;
        assert_eq!(empty.status(), StatusCode::BAD_REQUEST);

        let added = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/projects/{id}/upload"))
                .cookie(cookie.clone())
                .set_json(json!({ "images": [{ "url": "/uploads/second.jpg" }] }))
                .to_request(),
        )
        .await;
        let body: Value = actix_test::read_body_json(added).await;
        let images = body["originalImages"].as_array().expect("images");
        assert_eq!(images.len(), 2);
        let image_id = images[1]["id"].as_str().expect("image id");

        let removed = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri(&format!("/projects/{id}/images/{image_id}"))
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let body: Value = actix_test::read_body_json(removed).await;
        assert_eq!(body["originalImages"].as_array().map(Vec::len), Some(1));
    }

    #[actix_web::test]
    async fn free_plan_runs_out_of_credits() {
        let harness = TestHarness::new();
        let app = actix_test::init_service(harness.app()).await;
        let cookie = harness.register(&app, "ada@example.com", None).await;
        let project = harness.create_project(&app, &cookie).await;
        let id = project["id"].as_str().expect("id");

        for _ in 0..3 {
            let res = actix_test::call_service(
                &app,
                actix_test::TestRequest::post()
                    .uri(&format!("/projects/{id}/generate"))
                    .cookie(cookie.clone())
                    .to_request(),
            )
            .await;
            assert_eq!(res.status(), StatusCode::OK);
        }
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/projects/{id}/generate"))
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["message"], "No generation credits remaining");
    }

    #[actix_web::test]
    async fn share_token_opens_the_project_without_a_session() {
        let harness = TestHarness::new();
        let app = actix_test::init_service(harness.app()).await;
        let cookie = harness.register(&app, "ada@example.com", None).await;
        let project = harness.create_project(&app, &cookie).await;
        let token = project["shareToken"].as_str().expect("token");

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/projects/share/{token}"))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["title"], "Loft kitchen");
    }
}
