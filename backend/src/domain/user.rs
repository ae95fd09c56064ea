//! User accounts, roles, and subscriptions.

use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, Duration, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{Error, UserId};
use crate::domain::token::OneTimeToken;

/// Lifetime of an email verification link, in hours.
pub const VERIFICATION_TOKEN_TTL_HOURS: i64 = 24;
/// Lifetime of a password reset link, in hours.
pub const PASSWORD_RESET_TOKEN_TTL_HOURS: i64 = 1;

const DEFAULT_COUNTRY: &str = "France";

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Validation errors for user-level value objects.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Email is empty or malformed.
    #[error("Please enter a valid email")]
    InvalidEmail,
    /// Role string is not a known role.
    #[error("unknown role: {0}")]
    UnknownRole(String),
    /// Plan string is not a known plan.
    #[error("unknown subscription plan: {0}")]
    UnknownPlan(String),
}

impl From<UserValidationError> for Error {
    fn from(value: UserValidationError) -> Self {
        let field = match value {
            UserValidationError::InvalidEmail => "email",
            UserValidationError::UnknownRole(_) => "role",
            UserValidationError::UnknownPlan(_) => "plan",
        };
        Self::invalid_request(value.to_string()).with_details(json!({ "field": field }))
    }
}

/// Normalised (trimmed, lowercased) email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and normalise an email address.
    ///
    /// # Examples
    /// ```
    /// use craftycrib::domain::EmailAddress;
    ///
    /// let email = EmailAddress::parse("  Ada@Example.COM ").expect("valid");
    /// assert_eq!(email.as_str(), "ada@example.com");
    /// ```
    pub fn parse(raw: &str) -> Result<Self, UserValidationError> {
        let normalised = raw.trim().to_lowercase();
        if email_regex().is_match(&normalised) {
            Ok(Self(normalised))
        } else {
            Err(UserValidationError::InvalidEmail)
        }
    }

    /// Borrow the normalised address.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Homeowner creating projects.
    #[default]
    Client,
    /// Renovation professional.
    Contractor,
    /// Site administrator.
    Admin,
}

impl Role {
    /// Wire name of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Contractor => "contractor",
            Self::Admin => "admin",
        }
    }

    /// Whether this role may be chosen at self-registration.
    #[must_use]
    pub const fn is_self_assignable(self) -> bool {
        matches!(self, Self::Client | Self::Contractor)
    }
}

impl FromStr for Role {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "client" => Ok(Self::Client),
            "contractor" => Ok(Self::Contractor),
            "admin" => Ok(Self::Admin),
            other => Err(UserValidationError::UnknownRole(other.to_owned())),
        }
    }
}

/// Subscription plan, which fixes the monthly generation allowance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionPlan {
    /// Three generations, standard quality.
    #[default]
    Free,
    /// Fifty generations a month.
    Pro,
    /// Unlimited generations.
    Premium,
}

impl SubscriptionPlan {
    /// All plans in display order.
    pub const ALL: [Self; 3] = [Self::Free, Self::Pro, Self::Premium];

    /// Generations allowed per period; `None` means unlimited.
    #[must_use]
    pub const fn allowance(self) -> Option<u32> {
        match self {
            Self::Free => Some(3),
            Self::Pro => Some(50),
            Self::Premium => None,
        }
    }

    /// Monthly price in whole euros.
    #[must_use]
    pub const fn monthly_price_eur(self) -> u32 {
        match self {
            Self::Free => 0,
            Self::Pro => 19,
            Self::Premium => 49,
        }
    }

    /// Wire name of the plan.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Pro => "pro",
            Self::Premium => "premium",
        }
    }
}

impl FromStr for SubscriptionPlan {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(Self::Free),
            "pro" => Ok(Self::Pro),
            "premium" => Ok(Self::Premium),
            other => Err(UserValidationError::UnknownPlan(other.to_owned())),
        }
    }
}

/// Billing state of a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    /// Allowance usable.
    #[default]
    Active,
    /// Cancelled by the user; falls back to free allowance.
    Cancelled,
    /// Lapsed; falls back to free allowance.
    Expired,
}

/// Subscription and credit usage of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    /// Current plan.
    pub plan: SubscriptionPlan,
    /// Billing state.
    pub status: SubscriptionStatus,
    /// Generations consumed in the current period.
    pub credits_used: u32,
    /// Start of the current period.
    pub period_started_at: DateTime<Utc>,
}

impl Subscription {
    /// Free plan starting at `now`.
    #[must_use]
    pub fn free(now: DateTime<Utc>) -> Self {
        Self {
            plan: SubscriptionPlan::Free,
            status: SubscriptionStatus::Active,
            credits_used: 0,
            period_started_at: now,
        }
    }

    /// Plan whose allowance currently applies.
    #[must_use]
    pub fn effective_plan(&self) -> SubscriptionPlan {
        match self.status {
            SubscriptionStatus::Active => self.plan,
            SubscriptionStatus::Cancelled | SubscriptionStatus::Expired => SubscriptionPlan::Free,
        }
    }

    /// Paid plan in good standing.
    #[must_use]
    pub fn is_premium(&self) -> bool {
        self.effective_plan() != SubscriptionPlan::Free
    }

    /// Remaining generations; `None` means unlimited.
    #[must_use]
    pub fn credits_remaining(&self) -> Option<u32> {
        self.effective_plan()
            .allowance()
            .map(|allowance| allowance.saturating_sub(self.credits_used))
    }

    /// Whether another generation may be started.
    #[must_use]
    pub fn can_generate(&self) -> bool {
        self.credits_remaining().is_none_or(|left| left > 0)
    }

    /// Record one successful generation.
    pub fn consume_credit(&mut self) {
        self.credits_used = self.credits_used.saturating_add(1);
    }

    /// Switch plan and start a new period.
    pub fn change_plan(&mut self, plan: SubscriptionPlan, now: DateTime<Utc>) {
        self.plan = plan;
        self.status = SubscriptionStatus::Active;
        self.credits_used = 0;
        self.period_started_at = now;
    }
}

/// Postal address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Street line.
    pub street: Option<String>,
    /// City.
    pub city: Option<String>,
    /// Postal code.
    pub postal_code: Option<String>,
    /// Country name.
    pub country: String,
}

impl Default for Address {
    fn default() -> Self {
        Self {
            street: None,
            city: None,
            postal_code: None,
            country: DEFAULT_COUNTRY.to_owned(),
        }
    }
}

/// Encoded password hash (PHC string).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash produced by a [`crate::domain::ports::PasswordHasher`].
    #[must_use]
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Borrow the encoded hash.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// Registered account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Stable identifier.
    pub id: UserId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Unique login email.
    pub email: EmailAddress,
    password_hash: PasswordHash,
    /// Account role.
    pub role: Role,
    /// Whether the email address has been confirmed.
    pub verified: bool,
    verification: Option<OneTimeToken>,
    password_reset: Option<OneTimeToken>,
    /// Plan and credit usage.
    pub subscription: Subscription,
    /// Contact phone.
    pub phone: Option<String>,
    /// Postal address.
    pub address: Address,
    /// Last successful login.
    pub last_login: Option<DateTime<Utc>>,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Last modification instant.
    pub updated_at: DateTime<Utc>,
}

/// Fields needed to create a [`User`].
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Login email.
    pub email: EmailAddress,
    /// Hash of the chosen password.
    pub password_hash: PasswordHash,
    /// Account role.
    pub role: Role,
    /// Whether the account starts verified.
    pub verified: bool,
}

impl User {
    /// Build a fresh account at `now`.
    #[must_use]
    pub fn create(new: NewUser, now: DateTime<Utc>) -> Self {
        Self {
            id: UserId::random(),
            first_name: new.first_name,
            last_name: new.last_name,
            email: new.email,
            password_hash: new.password_hash,
            role: new.role,
            verified: new.verified,
            verification: None,
            password_reset: None,
            subscription: Subscription::free(now),
            phone: None,
            address: Address::default(),
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// "First Last".
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Stored password hash.
    #[must_use]
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Whether the account has a paid plan in good standing.
    #[must_use]
    pub fn is_premium(&self) -> bool {
        self.subscription.is_premium()
    }

    /// Digest of the pending verification token, if any.
    #[must_use]
    pub fn verification_digest(&self) -> Option<&str> {
        self.verification.as_ref().map(OneTimeToken::digest)
    }

    /// Digest of the pending password reset token, if any.
    #[must_use]
    pub fn password_reset_digest(&self) -> Option<&str> {
        self.password_reset.as_ref().map(OneTimeToken::digest)
    }

    /// Issue a verification token and return its clear-text value.
    pub fn issue_verification_token(&mut self, now: DateTime<Utc>) -> String {
        let (raw, token) = OneTimeToken::issue(now, Duration::hours(VERIFICATION_TOKEN_TTL_HOURS));
        self.verification = Some(token);
        self.updated_at = now;
        raw
    }

    /// Confirm the email with `raw`. Returns `false` when the token does not
    /// match or has expired.
    pub fn confirm_email(&mut self, raw: &str, now: DateTime<Utc>) -> bool {
        let accepted = self
            .verification
            .as_ref()
            .is_some_and(|token| token.accepts(raw, now));
        if accepted {
            self.verified = true;
            self.verification = None;
            self.updated_at = now;
        }
        accepted
    }

    /// Issue a password reset token and return its clear-text value.
    pub fn issue_password_reset_token(&mut self, now: DateTime<Utc>) -> String {
        let (raw, token) = OneTimeToken::issue(now, Duration::hours(PASSWORD_RESET_TOKEN_TTL_HOURS));
        self.password_reset = Some(token);
        self.updated_at = now;
        raw
    }

    /// Whether `raw` is a live password reset token for this account.
    #[must_use]
    pub fn accepts_password_reset(&self, raw: &str, now: DateTime<Utc>) -> bool {
        self.password_reset
            .as_ref()
            .is_some_and(|token| token.accepts(raw, now))
    }

    /// Replace the password and burn the reset token.
    pub fn replace_password(&mut self, hash: PasswordHash, now: DateTime<Utc>) {
        self.password_hash = hash;
        self.password_reset = None;
        self.updated_at = now;
    }

    /// Record a successful login.
    pub fn record_login(&mut self, now: DateTime<Utc>) {
        self.last_login = Some(now);
        self.updated_at = now;
    }
}

/// The signed-in user as seen by domain services: who they are and what
/// they may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    /// Account identifier.
    pub id: UserId,
    /// Account role.
    pub role: Role,
}

impl Actor {
    /// Actor for `user`.
    #[must_use]
    pub const fn of(user: &User) -> Self {
        Self {
            id: user.id,
            role: user.role,
        }
    }

    /// Whether the actor administers the site.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Owner guard: the owner or an administrator.
    #[must_use]
    pub fn may_manage(&self, owner: UserId) -> bool {
        self.id == owner || self.is_admin()
    }
}
