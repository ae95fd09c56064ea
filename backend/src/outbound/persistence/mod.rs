//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Each aggregate is stored as a JSONB document beside the scalar columns
//! its queries filter or sort on. Connections come from a shared `bb8` pool
//! through `diesel-async`.
//!
//! - **Thin adapters**: repositories only translate between rows and domain
//!   aggregates. No business rules live here.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Typed errors**: Diesel and pool failures map onto each port's
//!   `Connection`/`Query` variants; unique violations map onto the port's
//!   duplicate variant where one exists.
//!
//! ```ignore
//! use craftycrib::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/craftycrib")).await?;
//! let users = DieselUserRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_contact_message_repository;
mod diesel_contractor_repository;
mod diesel_conversation_repository;
mod diesel_project_repository;
mod diesel_site_content_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_contact_message_repository::DieselContactMessageRepository;
pub use diesel_contractor_repository::DieselContractorRepository;
pub use diesel_conversation_repository::DieselConversationRepository;
pub use diesel_project_repository::DieselProjectRepository;
pub use diesel_site_content_repository::DieselSiteContentRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
