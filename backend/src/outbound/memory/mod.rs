//! In-memory repository adapters.
//!
//! Used when no database URL is configured and by the integration tests.
//! Each adapter keeps its documents behind a Tokio `RwLock` and honours the
//! same uniqueness and ordering rules as the PostgreSQL adapters. Data is
//! lost on restart.

mod contact_messages;
mod contractors;
mod conversations;
mod projects;
mod site_content;
mod users;

pub use contact_messages::MemoryContactMessageRepository;
pub use contractors::MemoryContractorRepository;
pub use conversations::MemoryConversationRepository;
pub use projects::MemoryProjectRepository;
pub use site_content::MemorySiteContentRepository;
pub use users::MemoryUserRepository;
