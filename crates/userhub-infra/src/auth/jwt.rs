//! JWT token service implementation.

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use userhub_core::domain::{Principal, Role};
use userhub_core::ports::{AuthError, TokenService};

/// JWT token service configuration. Loaded once at startup and held
/// immutable for the process lifetime.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub key: String,
    pub issuer: String,
    pub audience: String,
    pub expires_in_minutes: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            key: "change-me-in-production".to_string(),
            issuer: "userhub-api".to_string(),
            audience: "userhub-clients".to_string(),
            expires_in_minutes: 60,
        }
    }
}

/// Internal JWT claims structure for serialization.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // stringified user id
    unique_name: String,
    role: String,
    nbf: i64,
    exp: i64,
    iss: String,
    aud: String,
}

/// HS256-signed bearer tokens carrying identity and role claims.
///
/// Validation is stateless: trust is the signature plus claim inspection,
/// with no store lookup. There is no revocation list, so an issued token
/// stays valid until its natural expiry regardless of server-side account
/// changes.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: JwtConfig,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.key.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.key.as_bytes());

        Self {
            encoding_key,
            decoding_key,
            config,
        }
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, principal: &Principal, now: DateTime<Utc>) -> Result<String, AuthError> {
        let expires_at = now + TimeDelta::minutes(self.config.expires_in_minutes);

        let claims = Claims {
            sub: principal.user_id.to_string(),
            unique_name: principal.user_name.clone(),
            role: principal.role.to_string(),
            nbf: now.timestamp(),
            exp: expires_at.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenCreation(e.to_string()))
    }

    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<Principal, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_audience(&[&self.config.audience]);
        // The validity window is checked below against the caller's clock.
        validation.validate_exp = false;
        validation.validate_nbf = false;

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            tracing::debug!(reason = %e, "bearer token rejected");
            AuthError::Unauthenticated
        })?;

        let ts = now.timestamp();
        if ts < data.claims.nbf || ts >= data.claims.exp {
            tracing::debug!("bearer token outside validity window");
            return Err(AuthError::Unauthenticated);
        }

        let user_id: i64 = data.claims.sub.parse().map_err(|_| {
            tracing::debug!("bearer token subject is not a user id");
            AuthError::Unauthenticated
        })?;

        Ok(Principal {
            user_id,
            user_name: data.claims.unique_name,
            role: Role::parse_or_default(&data.claims.role),
        })
    }

    fn expires_in_minutes(&self) -> i64 {
        self.config.expires_in_minutes
    }
}
