//! HTTP inbound adapter exposing REST endpoints.
//!
//! [`configure`] registers every handler except the health probes, which the
//! server mounts next to its own readiness state.

use actix_web::web;

pub mod admin;
pub mod api;
pub mod auth;
pub mod contractors;
pub mod dashboard;
pub mod error;
pub mod guards;
pub mod health;
pub mod messaging;
pub mod projects;
pub mod public;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

/// Register the application routes.
///
/// Literal segments are registered before the parameterised routes that
/// would otherwise capture them (`/projects/share/..`, `/contractors/setup`).
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::register)
        .service(auth::login)
        .service(auth::logout)
        .service(auth::verify_email)
        .service(auth::forgot_password)
        .service(auth::reset_password)
        .service(users::me)
        .service(users::get_settings)
        .service(users::update_settings)
        .service(dashboard::overview)
        .service(messaging::list_conversations)
        .service(messaging::open_conversation)
        .service(messaging::send_message)
        .service(projects::list_projects)
        .service(projects::create_project)
        .service(projects::shared_project)
        .service(projects::get_project)
        .service(projects::update_project)
        .service(projects::delete_project)
        .service(projects::upload_images)
        .service(projects::remove_image)
        .service(projects::generate_design)
        .service(projects::publish_project)
        .service(projects::unpublish_project)
        .service(projects::set_featured_image)
        .service(projects::accept_contractor)
        .service(contractors::browse)
        .service(contractors::setup)
        .service(contractors::own_profile)
        .service(contractors::update_profile)
        .service(contractors::available_projects)
        .service(contractors::express_interest)
        .service(contractors::view)
        .service(contractors::review)
        .service(public::pricing)
        .service(public::submit_contact)
        .service(public::landing)
        .service(public::gallery)
        .service(public::gallery_project)
        .service(admin::landing_assets)
        .service(admin::update_landing_asset)
        .service(admin::specialists)
        .service(admin::update_specialists_image)
        .service(admin::update_specialists_options)
        .service(admin::set_video)
        .service(admin::delete_video)
        .service(admin::contact_messages)
        .service(admin::set_contact_status)
        .service(admin::delete_contact)
        .service(admin::change_plan)
        .service(api::health)
        .service(api::styles)
        .service(api::room_types)
        .service(api::credits)
        .service(api::generate)
        .service(api::project)
        .service(api::project_status)
        .service(api::search_contractors)
        .service(api::stats);
}
