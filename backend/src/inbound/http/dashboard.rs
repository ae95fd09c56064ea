//! Dashboard overview handler.

use actix_web::{get, web};

use crate::domain::ports::DashboardView;
use crate::inbound::http::ApiResult;
use crate::inbound::http::guards::actor;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Role-specific dashboard: project stats and recent projects for clients,
/// profile stats and matching projects for contractors.
#[utoipa::path(
    get,
    path = "/dashboard",
    responses(
        (status = 200, description = "Dashboard content tagged by `kind`", body = Object),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["dashboard"],
    operation_id = "dashboard"
)]
#[get("/dashboard")]
pub async fn overview(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<DashboardView>> {
    let actor = actor(&state, &session).await?;
    Ok(web::Json(state.dashboard.overview(actor).await?))
}
