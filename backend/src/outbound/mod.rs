//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL document repositories using Diesel ORM
//! - **memory**: in-process repositories for development and tests
//! - **homedesigns**: reqwest client for the AI generation provider
//! - **`argon2_hasher`**: Argon2id password hashing
//! - **`logging_mailer`**: email adapter that writes to the log
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod argon2_hasher;
pub mod homedesigns;
pub mod logging_mailer;
pub mod memory;
pub mod persistence;
