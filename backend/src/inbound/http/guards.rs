//! Per-request access guards.
//!
//! Guards resolve the session user through [`AccountQuery`] on every request
//! so role or plan changes take effect without a fresh login.
//!
//! [`AccountQuery`]: crate::domain::ports::AccountQuery

use crate::domain::{Actor, Error, Role, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Access rule applied to the signed-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// Any signed-in user.
    Authenticated,
    /// Client accounts (admins pass every role guard).
    Client,
    /// Contractor accounts.
    Contractor,
    /// Administrators only.
    Admin,
    /// Users on a paid plan.
    Premium,
}

impl Guard {
    /// Check `user` against the rule.
    pub fn check(self, user: &User) -> ApiResult<()> {
        let allowed = match self {
            Self::Authenticated => true,
            Self::Client => matches!(user.role, Role::Client | Role::Admin),
            Self::Contractor => matches!(user.role, Role::Contractor | Role::Admin),
            Self::Admin => user.role == Role::Admin,
            Self::Premium => user.is_premium(),
        };
        if allowed {
            return Ok(());
        }
        Err(match self {
            Self::Premium => Error::forbidden("This feature requires a premium subscription."),
            _ => Error::forbidden("Access denied"),
        })
    }
}

/// Load the signed-in user or fail with `401`.
///
/// A session pointing at a deleted account is purged.
pub async fn current_user(state: &HttpState, session: &SessionContext) -> ApiResult<User> {
    let id = session.require_user_id()?;
    match state.accounts_query.find_user(&id).await? {
        Some(user) => Ok(user),
        None => {
            session.purge();
            Err(Error::unauthorized("Please log in to access this page"))
        }
    }
}

/// Load the signed-in user and apply `guard`.
pub async fn guarded_user(
    state: &HttpState,
    session: &SessionContext,
    guard: Guard,
) -> ApiResult<User> {
    let user = current_user(state, session).await?;
    guard.check(&user)?;
    Ok(user)
}

/// Resolve the acting user for a service call.
pub async fn actor(state: &HttpState, session: &SessionContext) -> ApiResult<Actor> {
    current_user(state, session).await.map(|user| Actor::of(&user))
}

/// Reject requests from signed-in users.
pub async fn require_guest(state: &HttpState, session: &SessionContext) -> ApiResult<()> {
    let Some(id) = session.user_id()? else {
        return Ok(());
    };
    if state.accounts_query.find_user(&id).await?.is_some() {
        return Err(Error::invalid_request("Already signed in"));
    }
    session.purge();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::service_test_support::{fixture_timestamp, make_user};
    use crate::domain::{ErrorCode, SubscriptionPlan};
    use rstest::rstest;

    #[rstest]
    #[case(Role::Client, Guard::Client, true)]
    #[case(Role::Contractor, Guard::Client, false)]
    #[case(Role::Contractor, Guard::Contractor, true)]
    #[case(Role::Client, Guard::Contractor, false)]
    #[case(Role::Admin, Guard::Contractor, true)]
    #[case(Role::Admin, Guard::Admin, true)]
    #[case(Role::Client, Guard::Admin, false)]
    #[case(Role::Client, Guard::Authenticated, true)]
    fn role_guards(#[case] role: Role, #[case] guard: Guard, #[case] allowed: bool) {
        let user = make_user("guard@example.com", role);
        assert_eq!(guard.check(&user).is_ok(), allowed);
    }

    #[rstest]
    fn premium_guard_follows_the_plan() {
        let mut user = make_user("plan@example.com", Role::Client);
        let err = Guard::Premium.check(&user).expect_err("free plan");
        assert_eq!(err.code(), ErrorCode::Forbidden);

        user.subscription
            .change_plan(SubscriptionPlan::Premium, fixture_timestamp());
        assert!(Guard::Premium.check(&user).is_ok());
    }
}
