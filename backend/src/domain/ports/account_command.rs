//! Driving ports for account use-cases: registration, login, email
//! verification, password recovery, settings.
//!
//! Inbound adapters validate raw form input into domain types before calling
//! these ports; the ports own uniqueness checks, hashing, and token handling.

use async_trait::async_trait;

use crate::domain::{
    Error, LoginCredentials, NewPassword, ProfileSettings, Registration, SubscriptionPlan, User,
    UserId,
};

/// Response text of the forgot-password flow, identical whether or not the
/// account exists.
pub const PASSWORD_RESET_REQUESTED: &str =
    "If an account exists with that email, a reset link has been sent.";

/// Account mutations.
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Create an account. Duplicate emails are a conflict.
    async fn register(&self, registration: Registration) -> Result<User, Error>;

    /// Check credentials and record the login.
    async fn login(&self, credentials: &LoginCredentials) -> Result<User, Error>;

    /// Confirm an email address with the token from the verification mail.
    async fn verify_email(&self, token: &str) -> Result<User, Error>;

    /// Mail a reset link when `email` belongs to an account. Always succeeds
    /// for unknown addresses.
    async fn request_password_reset(&self, email: &str) -> Result<(), Error>;

    /// Replace the password using the token from the reset mail.
    async fn reset_password(&self, token: &str, password: NewPassword) -> Result<(), Error>;

    /// Update names and phone of `user`.
    async fn update_settings(
        &self,
        user: &UserId,
        settings: ProfileSettings,
    ) -> Result<User, Error>;

    /// Move `user` to `plan`, starting a new credit period.
    async fn change_plan(&self, user: &UserId, plan: SubscriptionPlan) -> Result<User, Error>;
}
