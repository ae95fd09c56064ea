//! Random tokens for share links and one-time account flows.
//!
//! Verification and password reset tokens are handed to the user in clear
//! text exactly once; only their SHA-256 digest is stored.

use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Byte length of verification and reset tokens.
pub const ACCOUNT_TOKEN_BYTES: usize = 32;
/// Byte length of project share tokens.
pub const SHARE_TOKEN_BYTES: usize = 16;

/// Produce `len` random bytes encoded as lowercase hex.
#[must_use]
pub fn random_hex(len: usize) -> String {
    let mut bytes = vec![0_u8; len];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Hex-encoded SHA-256 digest of a clear-text token.
#[must_use]
pub fn digest_token(raw: &str) -> String {
    hex::encode(Sha256::digest(raw.as_bytes()))
}

/// Stored half of a one-time token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OneTimeToken {
    digest: String,
    expires_at: DateTime<Utc>,
}

impl OneTimeToken {
    /// Issue a new token valid for `ttl`, returning the clear-text value
    /// alongside the stored record.
    #[must_use]
    pub fn issue(now: DateTime<Utc>, ttl: Duration) -> (String, Self) {
        let raw = random_hex(ACCOUNT_TOKEN_BYTES);
        let token = Self {
            digest: digest_token(&raw),
            expires_at: now + ttl,
        };
        (raw, token)
    }

    /// Digest used for lookups.
    #[must_use]
    pub fn digest(&self) -> &str {
        &self.digest
    }

    /// Instant after which the token is rejected.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Whether `raw` matches this token and it has not expired at `now`.
    #[must_use]
    pub fn accepts(&self, raw: &str, now: DateTime<Utc>) -> bool {
        now < self.expires_at && digest_token(raw) == self.digest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ACCOUNT_TOKEN_BYTES, 64)]
    #[case(SHARE_TOKEN_BYTES, 32)]
    fn random_hex_has_expected_length(#[case] bytes: usize, #[case] chars: usize) {
        let token = random_hex(bytes);
        assert_eq!(token.len(), chars);
        assert!(token.chars().all(|ch| ch.is_ascii_hexdigit()));
    }

    #[rstest]
    fn issued_token_accepts_its_raw_value_until_expiry() {
        let now = Utc::now();
        let (raw, token) = OneTimeToken::issue(now, Duration::hours(1));

        assert!(token.accepts(&raw, now));
        assert!(!token.accepts(&raw, now + Duration::hours(2)));
        assert!(!token.accepts("forged", now));
        assert_ne!(token.digest(), raw);
    }
}
