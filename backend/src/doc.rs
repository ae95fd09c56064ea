//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: every HTTP endpoint from the inbound layer
//! - **Schemas**: domain type wrappers from
//!   [`crate::inbound::http::schemas`] that provide OpenAPI definitions
//!   without coupling domain types to the utoipa framework
//! - **Security**: Session cookie authentication scheme
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::schemas::{
    ContactMessageSchema, ContractorSchema, ConversationSchema, ErrorCodeSchema, ErrorSchema,
    MessageSchema, ProjectSchema,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /auth/login or POST /auth/register.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "CraftyCrib API",
        description = "Renovation marketplace: AI room redesigns, a public gallery, and contractor matching.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::verify_email,
        crate::inbound::http::auth::forgot_password,
        crate::inbound::http::auth::reset_password,
        crate::inbound::http::users::me,
        crate::inbound::http::users::get_settings,
        crate::inbound::http::users::update_settings,
        crate::inbound::http::dashboard::overview,
        crate::inbound::http::messaging::list_conversations,
        crate::inbound::http::messaging::open_conversation,
        crate::inbound::http::messaging::send_message,
        crate::inbound::http::projects::list_projects,
        crate::inbound::http::projects::create_project,
        crate::inbound::http::projects::shared_project,
        crate::inbound::http::projects::get_project,
        crate::inbound::http::projects::update_project,
        crate::inbound::http::projects::delete_project,
        crate::inbound::http::projects::upload_images,
        crate::inbound::http::projects::remove_image,
        crate::inbound::http::projects::generate_design,
        crate::inbound::http::projects::publish_project,
        crate::inbound::http::projects::unpublish_project,
        crate::inbound::http::projects::set_featured_image,
        crate::inbound::http::projects::accept_contractor,
        crate::inbound::http::contractors::browse,
        crate::inbound::http::contractors::setup,
        crate::inbound::http::contractors::own_profile,
        crate::inbound::http::contractors::update_profile,
        crate::inbound::http::contractors::available_projects,
        crate::inbound::http::contractors::express_interest,
        crate::inbound::http::contractors::view,
        crate::inbound::http::contractors::review,
        crate::inbound::http::public::pricing,
        crate::inbound::http::public::submit_contact,
        crate::inbound::http::public::landing,
        crate::inbound::http::public::gallery,
        crate::inbound::http::public::gallery_project,
        crate::inbound::http::admin::landing_assets,
        crate::inbound::http::admin::update_landing_asset,
        crate::inbound::http::admin::specialists,
        crate::inbound::http::admin::update_specialists_image,
        crate::inbound::http::admin::update_specialists_options,
        crate::inbound::http::admin::set_video,
        crate::inbound::http::admin::delete_video,
        crate::inbound::http::admin::contact_messages,
        crate::inbound::http::admin::set_contact_status,
        crate::inbound::http::admin::delete_contact,
        crate::inbound::http::admin::change_plan,
        crate::inbound::http::api::health,
        crate::inbound::http::api::styles,
        crate::inbound::http::api::room_types,
        crate::inbound::http::api::credits,
        crate::inbound::http::api::generate,
        crate::inbound::http::api::project,
        crate::inbound::http::api::project_status,
        crate::inbound::http::api::search_contractors,
        crate::inbound::http::api::stats,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        ProjectSchema,
        ContractorSchema,
        ConversationSchema,
        MessageSchema,
        ContactMessageSchema
    )),
    tags(
        (name = "auth", description = "Registration, sessions, and account recovery"),
        (name = "dashboard", description = "Signed-in overview and account settings"),
        (name = "projects", description = "Renovation projects and their lifecycle"),
        (name = "contractors", description = "Contractor profiles, interest, and reviews"),
        (name = "messages", description = "Conversations between users"),
        (name = "public", description = "Pricing, contact form, landing content, and gallery"),
        (name = "admin", description = "Site administration"),
        (name = "api", description = "Programmatic JSON API"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI schema field structure.

    use super::*;
    use rstest::rstest;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // Note: utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";
    const PROJECT_SCHEMA_NAME: &str = "crate.domain.Project";
    const CONTRACTOR_SCHEMA_NAME: &str = "crate.domain.Contractor";

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case(ERROR_SCHEMA_NAME, "code")]
    #[case(ERROR_SCHEMA_NAME, "message")]
    #[case(ERROR_SCHEMA_NAME, "traceId")]
    #[case(PROJECT_SCHEMA_NAME, "roomType")]
    #[case(PROJECT_SCHEMA_NAME, "designVariants")]
    #[case(PROJECT_SCHEMA_NAME, "shareToken")]
    #[case(CONTRACTOR_SCHEMA_NAME, "companyName")]
    #[case(CONTRACTOR_SCHEMA_NAME, "serviceArea")]
    fn schemas_expose_camel_case_fields(#[case] schema: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let found = schemas.get(schema).expect("registered schema");

        assert_object_schema_has_field(found, field);
    }

    #[rstest]
    #[case("/auth/register")]
    #[case("/projects/{id}/generate")]
    #[case("/contractors/{slug}/reviews")]
    #[case("/admin/users/{id}/plan")]
    #[case("/api/stats")]
    #[case("/health/ready")]
    fn paths_are_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[test]
    fn session_cookie_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
