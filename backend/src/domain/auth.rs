//! Authentication inputs: login, registration, password changes, settings.
//!
//! Handlers hand raw strings to these constructors; everything past this point
//! deals in validated values. Clear-text passwords are held in
//! [`Zeroizing`] buffers so they are wiped on drop.

use serde_json::json;
use zeroize::Zeroizing;

use crate::domain::{EmailAddress, Error, Role};

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Validation failures for authentication inputs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthValidationError {
    /// First name missing.
    #[error("First name is required")]
    EmptyFirstName,
    /// Last name missing.
    #[error("Last name is required")]
    EmptyLastName,
    /// Email missing or malformed.
    #[error("Please enter a valid email")]
    InvalidEmail,
    /// Password missing at login.
    #[error("Password is required")]
    EmptyPassword,
    /// Password shorter than [`MIN_PASSWORD_LEN`].
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
    /// Confirmation differs from the password.
    #[error("Passwords do not match")]
    PasswordMismatch,
    /// Role missing, unknown, or not self-assignable.
    #[error("Please select a valid role")]
    InvalidRole,
}

impl AuthValidationError {
    fn field(&self) -> &'static str {
        match self {
            Self::EmptyFirstName => "firstName",
            Self::EmptyLastName => "lastName",
            Self::InvalidEmail => "email",
            Self::EmptyPassword | Self::PasswordTooShort => "password",
            Self::PasswordMismatch => "confirmPassword",
            Self::InvalidRole => "role",
        }
    }
}

impl From<AuthValidationError> for Error {
    fn from(value: AuthValidationError) -> Self {
        Self::invalid_request(value.to_string()).with_details(json!({ "field": value.field() }))
    }
}

fn required_name(raw: &str, missing: AuthValidationError) -> Result<String, AuthValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(missing)
    } else {
        Ok(trimmed.to_owned())
    }
}

/// Validated login credentials.
///
/// # Examples
/// ```
/// use craftycrib::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" Ada@Example.com ", "secret1").expect("valid");
/// assert_eq!(creds.email(), "ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Lowercase the email and require a password.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, AuthValidationError> {
        let normalised = email.trim().to_lowercase();
        if normalised.is_empty() {
            return Err(AuthValidationError::InvalidEmail);
        }
        if password.is_empty() {
            return Err(AuthValidationError::EmptyPassword);
        }
        Ok(Self {
            email: normalised,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Lowercased email used for lookup.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Clear-text password.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// A new password with its confirmation checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPassword(Zeroizing<String>);

impl NewPassword {
    /// Require the minimum length and a matching confirmation.
    pub fn try_new(password: &str, confirm: &str) -> Result<Self, AuthValidationError> {
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthValidationError::PasswordTooShort);
        }
        if password != confirm {
            return Err(AuthValidationError::PasswordMismatch);
        }
        Ok(Self(Zeroizing::new(password.to_owned())))
    }

    /// Clear-text password.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

/// Raw registration form.
#[derive(Debug, Clone, Copy)]
pub struct RegistrationInput<'a> {
    /// Given name.
    pub first_name: &'a str,
    /// Family name.
    pub last_name: &'a str,
    /// Email address.
    pub email: &'a str,
    /// Chosen password.
    pub password: &'a str,
    /// Repeated password.
    pub confirm_password: &'a str,
    /// Requested role; defaults to client.
    pub role: Option<&'a str>,
}

/// Validated registration.
#[derive(Debug, Clone)]
pub struct Registration {
    /// Given name, trimmed.
    pub first_name: String,
    /// Family name, trimmed.
    pub last_name: String,
    /// Normalised email.
    pub email: EmailAddress,
    /// Chosen password.
    pub password: NewPassword,
    /// Client or contractor.
    pub role: Role,
}

impl Registration {
    /// Validate every field in form order, reporting the first failure.
    pub fn try_from_input(input: RegistrationInput<'_>) -> Result<Self, AuthValidationError> {
        let first_name = required_name(input.first_name, AuthValidationError::EmptyFirstName)?;
        let last_name = required_name(input.last_name, AuthValidationError::EmptyLastName)?;
        let email =
            EmailAddress::parse(input.email).map_err(|_| AuthValidationError::InvalidEmail)?;
        let password = NewPassword::try_new(input.password, input.confirm_password)?;
        let role = match input.role.map(str::trim).filter(|raw| !raw.is_empty()) {
            None => Role::Client,
            Some(raw) => raw
                .parse::<Role>()
                .ok()
                .filter(|role| role.is_self_assignable())
                .ok_or(AuthValidationError::InvalidRole)?,
        };
        Ok(Self {
            first_name,
            last_name,
            email,
            password,
            role,
        })
    }
}

/// Editable account settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSettings {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Phone; `None` clears it.
    pub phone: Option<String>,
}

impl ProfileSettings {
    /// Require both names; blank phones clear the stored value.
    pub fn try_new(
        first_name: &str,
        last_name: &str,
        phone: Option<&str>,
    ) -> Result<Self, AuthValidationError> {
        Ok(Self {
            first_name: required_name(first_name, AuthValidationError::EmptyFirstName)?,
            last_name: required_name(last_name, AuthValidationError::EmptyLastName)?,
            phone: phone
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_owned),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn input<'a>() -> RegistrationInput<'a> {
        RegistrationInput {
            first_name: "Ada",
            last_name: "Lovelace",
            email: "Ada@Example.com",
            password: "secret1",
            confirm_password: "secret1",
            role: None,
        }
    }

    #[rstest]
    #[case("", "pw", AuthValidationError::InvalidEmail)]
    #[case("ada@example.com", "", AuthValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: AuthValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn registration_defaults_to_client() {
        let registration = Registration::try_from_input(input()).expect("valid input");
        assert_eq!(registration.role, Role::Client);
        assert_eq!(registration.email.as_str(), "ada@example.com");
    }

    #[rstest]
    #[case(RegistrationInput { first_name: " ", ..input() }, AuthValidationError::EmptyFirstName)]
    #[case(RegistrationInput { last_name: "", ..input() }, AuthValidationError::EmptyLastName)]
    #[case(RegistrationInput { email: "nope", ..input() }, AuthValidationError::InvalidEmail)]
    #[case(
        RegistrationInput { password: "short", confirm_password: "short", ..input() },
        AuthValidationError::PasswordTooShort
    )]
    #[case(
        RegistrationInput { confirm_password: "secret2", ..input() },
        AuthValidationError::PasswordMismatch
    )]
    #[case(RegistrationInput { role: Some("admin"), ..input() }, AuthValidationError::InvalidRole)]
    #[case(RegistrationInput { role: Some("wizard"), ..input() }, AuthValidationError::InvalidRole)]
    fn registration_rejects_invalid_fields(
        #[case] raw: RegistrationInput<'static>,
        #[case] expected: AuthValidationError,
    ) {
        let err = Registration::try_from_input(raw).expect_err("invalid input");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn contractors_may_self_register() {
        let registration = Registration::try_from_input(RegistrationInput {
            role: Some("contractor"),
            ..input()
        })
        .expect("valid input");
        assert_eq!(registration.role, Role::Contractor);
    }

    #[rstest]
    fn validation_error_names_the_field() {
        let error: Error = AuthValidationError::PasswordMismatch.into();
        assert_eq!(error.message(), "Passwords do not match");
        assert_eq!(error.details(), Some(&json!({ "field": "confirmPassword" })));
    }

    #[rstest]
    fn settings_clear_blank_phone() {
        let settings = ProfileSettings::try_new("Ada", "Lovelace", Some("  ")).expect("valid");
        assert!(settings.phone.is_none());
    }
}
