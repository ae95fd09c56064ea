//! Domain primitives, aggregates, and services.
//!
//! Purpose: define the strongly typed entities of the marketplace (accounts,
//! projects, contractor profiles, conversations, site content), their
//! lifecycle transitions, and the services that orchestrate them through
//! ports. Nothing here depends on Actix, Diesel, or reqwest.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - User, Project, Contractor, Conversation, Message: document aggregates.
//! - `*Service`: implementations of the driving ports in [`ports`].

pub mod auth;
pub mod catalogue;
pub mod contact;
pub mod contractor;
pub mod error;
pub mod generation;
pub mod ids;
pub mod messaging;
pub mod ports;
pub mod project;
pub mod site_content;
pub mod slug;
pub mod token;
pub mod trace_id;
pub mod user;
pub(crate) mod wire_enum;

mod account_service;
mod contact_service;
mod contractor_service;
mod dashboard_service;
mod messaging_service;
mod port_errors;
mod project_service;
#[cfg(test)]
pub(crate) mod service_test_support;
mod site_content_service;

pub use self::account_service::{AccountService, AccountSettings};
pub use self::auth::{
    AuthValidationError, LoginCredentials, NewPassword, ProfileSettings, Registration,
    RegistrationInput,
};
pub use self::contact::{ContactCategory, ContactError, ContactMessage, ContactStatus};
pub use self::contact_service::ContactService;
pub use self::contractor::{
    AvailabilityStatus, Contractor, ContractorDashboardStats, ContractorError, ContractorFilter,
    ContractorProfileUpdate, ContractorSetup, ContractorSetupInput, NewReview, Rating, Review,
    Specialty,
};
pub use self::contractor_service::ContractorService;
pub use self::dashboard_service::DashboardService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::generation::{
    GeneratedDesign, GenerationMode, GenerationRequest, OutputQuality, ProviderCredits,
};
pub use self::ids::{
    ContactMessageId, ContractorId, ConversationId, IdParseError, ImageId, MessageId, ProjectId,
    UserId, VariantId,
};
pub use self::messaging::{Conversation, Message, MessageContent, MessageContentError};
pub use self::messaging_service::MessagingService;
pub use self::project::{
    Budget, DesignStyle, DesignVariant, ImageUpload, Preferences, Priorities, Project,
    ProjectChanges, ProjectDraft, ProjectError, ProjectStats, ProjectStatus, RoomType, Visibility,
};
pub use self::project_service::{ProjectService, ProjectSettings};
pub use self::site_content::{
    CategoryForm, GalleryVideo, LandingAsset, LandingAssetUpdate, LandingView,
    ResolvedLandingAsset, SiteContentError, SpecialistsConfig,
};
pub use self::site_content_service::SiteContentService;
pub use self::trace_id::TraceId;
pub use self::user::{
    Actor, EmailAddress, NewUser, PasswordHash, Role, Subscription, SubscriptionPlan, User,
    UserValidationError,
};
pub use self::wire_enum::UnknownVariant;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use craftycrib::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
