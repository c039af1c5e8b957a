//! Authentication and authorization ports.

use chrono::{DateTime, Utc};

use crate::domain::Principal;
use crate::error::RepoError;

/// Token service trait for issuing and validating bearer tokens.
///
/// Both operations take `now` from the caller: the validity window is a
/// pure computation against supplied wall-clock time, not an ambient clock.
pub trait TokenService: Send + Sync {
    /// Issue a signed, time-bounded token for an authenticated principal.
    fn issue(&self, principal: &Principal, now: DateTime<Utc>) -> Result<String, AuthError>;

    /// Verify a token and extract the principal it carries.
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<Principal, AuthError>;

    /// Configured token lifetime, for the login response.
    fn expires_in_minutes(&self) -> i64;
}

/// Password hashing service.
///
/// Hashing is deterministic: the same plaintext always produces the same
/// digest, and the digest must be computed identically at registration and
/// at login.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password into its stored digest form.
    fn hash(&self, plaintext: &str) -> String;

    /// Compare a plaintext password against a stored digest.
    fn verify(&self, plaintext: &str, digest: &str) -> bool;
}

/// Authentication and authorization errors.
///
/// The first four variants must be indistinguishable to external callers
/// (generic 401); they are separate kinds for internal dispatch and tests.
/// Store failures stay distinct so operators can tell outages from bad
/// logins.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No authentication attempt was made. The pipeline treats this as
    /// anonymous, not as a failure.
    #[error("no credentials provided")]
    NoCredentials,

    /// An Authorization header was present but could not be parsed.
    #[error("malformed credentials")]
    MalformedCredentials,

    /// Well-formed credentials with a wrong username or password. The same
    /// variant covers "no such user" and "wrong password".
    #[error("invalid username or password")]
    InvalidCredentials,

    /// Missing, invalid, or expired bearer token.
    #[error("unauthenticated")]
    Unauthenticated,

    /// Valid principal, insufficient role.
    #[error("insufficient permissions")]
    Forbidden,

    #[error("token creation failed: {0}")]
    TokenCreation(String),

    #[error(transparent)]
    Store(#[from] RepoError),
}
