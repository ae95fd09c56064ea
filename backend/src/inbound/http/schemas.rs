//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers below mirror the JSON shape of their domain counterparts and only
//! exist for documentation.

#![expect(
    dead_code,
    reason = "Fields are read by utoipa when generating the OpenAPI document"
)]

use utoipa::ToSchema;

/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request clashes with existing state.
    #[schema(rename = "conflict")]
    Conflict,
    /// A dependency is not configured or temporarily down.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// The AI provider failed.
    #[schema(rename = "upstream_failure")]
    UpstreamFailure,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// API error response payload.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "Title is required")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// Renovation project owned by a client.
#[derive(ToSchema)]
#[schema(as = crate::domain::Project, rename_all = "camelCase")]
pub struct ProjectSchema {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    owner: String,
    #[schema(example = "Sunny kitchen")]
    title: String,
    #[schema(example = "sunny-kitchen-lx3k2a")]
    slug: String,
    description: String,
    #[schema(example = "kitchen")]
    room_type: String,
    #[schema(example = "scandinavian")]
    style: Option<String>,
    #[schema(value_type = Object)]
    budget: serde_json::Value,
    #[schema(value_type = Vec<Object>)]
    original_images: Vec<serde_json::Value>,
    #[schema(value_type = Vec<Object>)]
    design_variants: Vec<serde_json::Value>,
    #[schema(example = "draft")]
    status: String,
    #[schema(example = "private")]
    visibility: String,
    is_published: bool,
    public_slug: Option<String>,
    featured_image: Option<String>,
    share_token: String,
    likes: u64,
    views: u64,
    #[schema(value_type = Vec<Object>)]
    contractor_requests: Vec<serde_json::Value>,
    selected_contractor: Option<String>,
    created_at: String,
    updated_at: String,
}

/// Contractor business profile.
#[derive(ToSchema)]
#[schema(as = crate::domain::Contractor, rename_all = "camelCase")]
pub struct ContractorSchema {
    id: String,
    user: String,
    #[schema(example = "Atelier Dupont")]
    company_name: String,
    #[schema(example = "atelier-dupont")]
    slug: String,
    description: String,
    #[schema(example = json!(["kitchen", "plumbing"]))]
    specialties: Vec<String>,
    #[schema(value_type = Object)]
    rating: serde_json::Value,
    #[schema(value_type = Object)]
    availability: serde_json::Value,
    #[schema(value_type = Object)]
    service_area: serde_json::Value,
    #[schema(value_type = Vec<Object>)]
    reviews: Vec<serde_json::Value>,
    is_premium: bool,
    is_verified: bool,
    is_active: bool,
}

/// Conversation between two users.
#[derive(ToSchema)]
#[schema(as = crate::domain::Conversation, rename_all = "camelCase")]
pub struct ConversationSchema {
    id: String,
    participants: Vec<String>,
    project: Option<String>,
    #[schema(value_type = Object)]
    last_message: Option<serde_json::Value>,
    #[schema(value_type = Object)]
    unread_count: serde_json::Value,
    is_active: bool,
    created_at: String,
    updated_at: String,
}

/// Message inside a conversation.
#[derive(ToSchema)]
#[schema(as = crate::domain::Message, rename_all = "camelCase")]
pub struct MessageSchema {
    id: String,
    conversation: String,
    sender: String,
    #[schema(example = "Hello, when can you visit?")]
    content: String,
    is_system_message: bool,
    created_at: String,
}

/// Message submitted through the public contact form.
#[derive(ToSchema)]
#[schema(as = crate::domain::ContactMessage, rename_all = "camelCase")]
pub struct ContactMessageSchema {
    id: String,
    name: String,
    email: String,
    subject: String,
    message: String,
    #[schema(example = "general")]
    category: String,
    #[schema(example = "new")]
    status: String,
    created_at: String,
}
