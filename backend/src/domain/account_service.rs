//! Account domain service.
//!
//! Implements [`AccountCommand`] and [`AccountQuery`] over the user
//! repository, a password hasher, and a mailer. One-time tokens are handed
//! out in mail links and looked up by digest.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::port_errors::{map_hash_error, map_mailer_error, map_user_error};
use crate::domain::ports::{
    AccountCommand, AccountQuery, Mailer, OutboundEmail, PasswordHasher, UserRepository,
};
use crate::domain::token::digest_token;
use crate::domain::{
    EmailAddress, Error, LoginCredentials, NewPassword, NewUser, ProfileSettings, Registration,
    SubscriptionPlan, User, UserId,
};

/// Behaviour switches for account flows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSettings {
    /// New accounts must confirm their email before logging in.
    pub require_email_verification: bool,
    /// Origin used to build links in emails, without a trailing slash.
    pub public_base_url: String,
}

impl Default for AccountSettings {
    fn default() -> Self {
        Self {
            require_email_verification: false,
            public_base_url: "http://localhost:3000".to_owned(),
        }
    }
}

/// Account service implementing the account driving ports.
#[derive(Clone)]
pub struct AccountService<U, H, M> {
    users: Arc<U>,
    hasher: Arc<H>,
    mailer: Arc<M>,
    clock: Arc<dyn Clock>,
    settings: AccountSettings,
}

impl<U, H, M> AccountService<U, H, M> {
    /// Create a new service.
    pub fn new(
        users: Arc<U>,
        hasher: Arc<H>,
        mailer: Arc<M>,
        clock: Arc<dyn Clock>,
        settings: AccountSettings,
    ) -> Self {
        Self {
            users,
            hasher,
            mailer,
            clock,
            settings,
        }
    }
}

impl<U, H, M> AccountService<U, H, M>
where
    U: UserRepository,
    H: PasswordHasher,
    M: Mailer,
{
    fn link(&self, path: &str) -> String {
        format!("{}{path}", self.settings.public_base_url.trim_end_matches('/'))
    }

    async fn send_verification(&self, user: &User, token: &str) -> Result<(), Error> {
        let url = self.link(&format!("/auth/verify/{token}"));
        let email = OutboundEmail {
            to: user.email.clone(),
            subject: "Verify Your CraftyCrib Account".to_owned(),
            body: format!(
                "Hi {},\n\nConfirm your email address to start designing:\n{url}\n\n\
                 This link expires in 24 hours. If you didn't create this account, \
                 please ignore this email.",
                user.first_name
            ),
        };
        self.mailer.send(&email).await.map_err(map_mailer_error)
    }

    async fn send_password_reset(&self, user: &User, token: &str) -> Result<(), Error> {
        let url = self.link(&format!("/auth/reset-password/{token}"));
        let email = OutboundEmail {
            to: user.email.clone(),
            subject: "Reset Your CraftyCrib Password".to_owned(),
            body: format!(
                "Hi {},\n\nChoose a new password here:\n{url}\n\n\
                 This link expires in 1 hour. If you didn't request this, \
                 please ignore this email.",
                user.first_name
            ),
        };
        self.mailer.send(&email).await.map_err(map_mailer_error)
    }

    async fn require_user(&self, id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found("User not found"))
    }
}

#[async_trait]
impl<U, H, M> AccountCommand for AccountService<U, H, M>
where
    U: UserRepository,
    H: PasswordHasher,
    M: Mailer,
{
    async fn register(&self, registration: Registration) -> Result<User, Error> {
        if self
            .users
            .find_by_email(&registration.email)
            .await
            .map_err(map_user_error)?
            .is_some()
        {
            return Err(Error::conflict("Email already registered")
                .with_details(serde_json::json!({ "field": "email" })));
        }

        let password_hash = self
            .hasher
            .hash(registration.password.expose())
            .map_err(map_hash_error)?;
        let now = self.clock.utc();
        let mut user = User::create(
            NewUser {
                first_name: registration.first_name,
                last_name: registration.last_name,
                email: registration.email,
                password_hash,
                role: registration.role,
                verified: !self.settings.require_email_verification,
            },
            now,
        );
        let verification = (!user.verified).then(|| user.issue_verification_token(now));
        self.users.insert(&user).await.map_err(map_user_error)?;
        info!(user_id = %user.id, role = user.role.as_str(), "account registered");

        if let Some(token) = verification {
            // The account exists either way; a lost mail can be re-requested.
            if let Err(error) = self.send_verification(&user, &token).await {
                warn!(user_id = %user.id, error = %error, "verification email not sent");
            }
        }
        Ok(user)
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let not_registered = || Error::unauthorized("Email not registered");
        let email = EmailAddress::parse(credentials.email()).map_err(|_| not_registered())?;
        let mut user = self
            .users
            .find_by_email(&email)
            .await
            .map_err(map_user_error)?
            .ok_or_else(not_registered)?;

        if !user.verified {
            return Err(Error::unauthorized(
                "Please verify your email before logging in",
            ));
        }
        let matches = self
            .hasher
            .verify(credentials.password(), user.password_hash())
            .map_err(map_hash_error)?;
        if !matches {
            return Err(Error::unauthorized("Incorrect password"));
        }

        user.record_login(self.clock.utc());
        self.users.save(&user).await.map_err(map_user_error)?;
        Ok(user)
    }

    async fn verify_email(&self, token: &str) -> Result<User, Error> {
        let invalid = || Error::invalid_request("Verification link is invalid or has expired");
        let mut user = self
            .users
            .find_by_verification_digest(&digest_token(token))
            .await
            .map_err(map_user_error)?
            .ok_or_else(invalid)?;
        if !user.confirm_email(token, self.clock.utc()) {
            return Err(invalid());
        }
        self.users.save(&user).await.map_err(map_user_error)?;
        Ok(user)
    }

    async fn request_password_reset(&self, email: &str) -> Result<(), Error> {
        let Ok(address) = EmailAddress::parse(email) else {
            return Ok(());
        };
        let Some(mut user) = self
            .users
            .find_by_email(&address)
            .await
            .map_err(map_user_error)?
        else {
            return Ok(());
        };

        let token = user.issue_password_reset_token(self.clock.utc());
        self.users.save(&user).await.map_err(map_user_error)?;
        self.send_password_reset(&user, &token).await
    }

    async fn reset_password(&self, token: &str, password: NewPassword) -> Result<(), Error> {
        let invalid = || Error::invalid_request("Password reset link is invalid or has expired");
        let now = self.clock.utc();
        let mut user = self
            .users
            .find_by_reset_digest(&digest_token(token))
            .await
            .map_err(map_user_error)?
            .filter(|candidate| candidate.accepts_password_reset(token, now))
            .ok_or_else(invalid)?;

        let hash = self
            .hasher
            .hash(password.expose())
            .map_err(map_hash_error)?;
        user.replace_password(hash, now);
        self.users.save(&user).await.map_err(map_user_error)?;
        info!(user_id = %user.id, "password reset");
        Ok(())
    }

    async fn update_settings(
        &self,
        user: &UserId,
        settings: ProfileSettings,
    ) -> Result<User, Error> {
        let mut account = self.require_user(user).await?;
        account.first_name = settings.first_name;
        account.last_name = settings.last_name;
        account.phone = settings.phone;
        account.updated_at = self.clock.utc();
        self.users.save(&account).await.map_err(map_user_error)?;
        Ok(account)
    }

    async fn change_plan(&self, user: &UserId, plan: SubscriptionPlan) -> Result<User, Error> {
        let mut account = self.require_user(user).await?;
        let now = self.clock.utc();
        account.subscription.change_plan(plan, now);
        account.updated_at = now;
        self.users.save(&account).await.map_err(map_user_error)?;
        info!(user_id = %account.id, plan = plan.as_str(), "subscription plan changed");
        Ok(account)
    }
}

#[async_trait]
impl<U, H, M> AccountQuery for AccountService<U, H, M>
where
    U: UserRepository,
    H: PasswordHasher,
    M: Mailer,
{
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, Error> {
        self.users.find_by_id(id).await.map_err(map_user_error)
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
