//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, the generation provider, hashing, mail) are
//! implemented by outbound adapters. Driving ports (`*Command`, `*Query`,
//! `ContactInbox`) are implemented by domain services and called by inbound
//! adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod account_query;
mod contact_inbox;
mod contact_message_repository;
mod contractor_command;
mod contractor_query;
mod contractor_repository;
mod conversation_repository;
mod credits_query;
mod dashboard_query;
mod design_generator;
mod gallery_query;
mod mailer;
mod messaging_command;
mod messaging_query;
mod password_hasher;
mod project_command;
mod project_query;
mod project_repository;
mod site_content_command;
mod site_content_query;
mod site_content_repository;
mod user_repository;

pub use account_command::{AccountCommand, PASSWORD_RESET_REQUESTED};
pub use account_query::AccountQuery;
pub use contact_inbox::ContactInbox;
#[cfg(test)]
pub use contact_message_repository::MockContactMessageRepository;
pub use contact_message_repository::{ContactMessageRepository, ContactMessageRepositoryError};
pub use contractor_command::{ContractorCommand, InterestRequest};
pub use contractor_query::ContractorQuery;
#[cfg(test)]
pub use contractor_repository::MockContractorRepository;
pub use contractor_repository::{ContractorRepository, ContractorRepositoryError};
#[cfg(test)]
pub use conversation_repository::MockConversationRepository;
pub use conversation_repository::{ConversationRepository, ConversationRepositoryError};
pub use credits_query::CreditsQuery;
pub use dashboard_query::{DashboardQuery, DashboardView};
#[cfg(test)]
pub use design_generator::MockDesignGenerator;
pub use design_generator::{DesignGenerationError, DesignGenerator, FixtureDesignGenerator};
pub use gallery_query::GalleryQuery;
#[cfg(test)]
pub use mailer::MockMailer;
pub use mailer::{FixtureMailer, Mailer, MailerError, OutboundEmail};
pub use messaging_command::MessagingCommand;
pub use messaging_query::{ConversationThread, MessagingQuery};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{FixturePasswordHasher, PasswordHashError, PasswordHasher};
pub use project_command::{GenerationOutcome, ProjectCommand};
pub use project_query::ProjectQuery;
#[cfg(test)]
pub use project_repository::MockProjectRepository;
pub use project_repository::{ProjectRepository, ProjectRepositoryError};
pub use site_content_command::{SiteContentCommand, SpecialistsImageUpdate};
pub use site_content_query::SiteContentQuery;
#[cfg(test)]
pub use site_content_repository::MockSiteContentRepository;
pub use site_content_repository::{SiteContentRepository, SiteContentRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
