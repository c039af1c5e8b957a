//! Authentication middleware and extractors.
//!
//! One extractor serves both schemes: `Authorization: Bearer <token>` goes
//! through stateless token validation, `Authorization: Basic <base64>` is
//! decoded and verified against the user store. Either way the handler
//! receives the same [`Principal`] shape, so the authorization policy does
//! not care how the caller authenticated.

use actix_web::http::{StatusCode, header};
use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, web};
use chrono::Utc;
use futures::future::LocalBoxFuture;

use userhub_core::domain::Principal;
use userhub_core::error::RepoError;
use userhub_core::ports::{AuthError, TokenService};
use userhub_infra::extract_basic_credentials;
use userhub_shared::ErrorResponse;

use crate::state::AppState;

/// Authenticated principal extractor.
///
/// Use this in handlers to require authentication:
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, {}!", identity.user_name)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity(pub Principal);

impl std::ops::Deref for Identity {
    type Target = Principal;

    fn deref(&self) -> &Principal {
        &self.0
    }
}

/// Error type for authentication failures.
///
/// Carries the configured realm so 401 responses can issue the
/// `WWW-Authenticate: Basic` challenge.
#[derive(Debug)]
pub struct AuthenticationError {
    error: AuthError,
    realm: Option<String>,
}

impl AuthenticationError {
    fn new(error: AuthError, realm: String) -> Self {
        Self {
            error,
            realm: Some(realm),
        }
    }
}

impl std::fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl actix_web::ResponseError for AuthenticationError {
    fn status_code(&self) -> StatusCode {
        match &self.error {
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::Store(_) | AuthError::TokenCreation(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self.status_code() {
            StatusCode::FORBIDDEN => HttpResponse::Forbidden().json(ErrorResponse::forbidden()),
            StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!("authentication infrastructure failure: {}", self.error);
                HttpResponse::InternalServerError().json(ErrorResponse::internal_error())
            }
            _ => {
                // One generic body for every authentication failure; the
                // precise reason stays internal.
                let mut builder = HttpResponse::Unauthorized();
                if let Some(realm) = &self.realm {
                    builder.insert_header((
                        header::WWW_AUTHENTICATE,
                        format!("Basic realm=\"{realm}\""),
                    ));
                }
                builder.json(ErrorResponse::unauthorized())
            }
        }
    }
}

/// Case-insensitive scheme match; returns the remainder after the scheme
/// token.
fn strip_scheme<'a>(header: &'a str, scheme: &str) -> Option<&'a str> {
    let prefix = header.get(..scheme.len())?;
    prefix
        .eq_ignore_ascii_case(scheme)
        .then(|| &header[scheme.len()..])
}

async fn authenticate(state: &AppState, header: &str) -> Result<Principal, AuthError> {
    if let Some(token) = strip_scheme(header, "Bearer ") {
        return state.tokens.validate(token.trim(), Utc::now());
    }

    // Not a Bearer header: try Basic. Any other scheme falls out of
    // `extract_basic_credentials` as NoCredentials.
    let (user_name, password) = extract_basic_credentials(header)?;
    state.verifier.verify(&user_name, &password).await
}

impl FromRequest for Identity {
    type Error = AuthenticationError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let header = req.headers().get(header::AUTHORIZATION).cloned();

        Box::pin(async move {
            let Some(state) = state else {
                tracing::error!("AppState not found in app data");
                return Err(AuthenticationError {
                    error: AuthError::Store(RepoError::Connection(
                        "application state missing".to_string(),
                    )),
                    realm: None,
                });
            };
            let realm = state.basic_realm.clone();

            let Some(value) = header else {
                return Err(AuthenticationError::new(AuthError::NoCredentials, realm));
            };
            let Ok(value) = value.to_str() else {
                return Err(AuthenticationError::new(
                    AuthError::MalformedCredentials,
                    realm,
                ));
            };

            match authenticate(&state, value).await {
                Ok(principal) => Ok(Identity(principal)),
                Err(error) => Err(AuthenticationError::new(error, realm)),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test};
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use std::sync::Arc;

    use userhub_core::domain::{Role, User};
    use userhub_core::ports::{PasswordHasher, UserRepository};
    use userhub_infra::database::InMemoryUserRepository;
    use userhub_infra::{JwtConfig, Sha256PasswordHasher};

    async fn test_state() -> AppState {
        let users = Arc::new(InMemoryUserRepository::new());
        users
            .insert(User::new(
                "alice".into(),
                Sha256PasswordHasher.hash("secret"),
                "Alice Example".into(),
                Role::Admin,
                "alice@example.com".into(),
                "555-0100".into(),
            ))
            .await
            .unwrap();

        AppState::assemble(
            users,
            JwtConfig {
                key: "test-secret-key".into(),
                ..JwtConfig::default()
            },
            "test-realm".into(),
        )
    }

    async fn whoami(identity: Identity) -> HttpResponse {
        HttpResponse::Ok().body(identity.user_name.clone())
    }

    macro_rules! test_app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($state.clone()))
                    .route("/protected", web::get().to(whoami)),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn bearer_token_authenticates() {
        let state = test_state().await;
        let app = test_app!(state);

        let principal = Principal {
            user_id: 1,
            user_name: "alice".into(),
            role: Role::Admin,
        };
        let token = state.tokens.issue(&principal, Utc::now()).unwrap();

        let req = test::TestRequest::get()
            .uri("/protected")
            .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, "alice");
    }

    #[actix_web::test]
    async fn basic_credentials_authenticate() {
        let state = test_state().await;
        let app = test_app!(state);

        let req = test::TestRequest::get()
            .uri("/protected")
            .insert_header((
                header::AUTHORIZATION,
                format!("Basic {}", STANDARD.encode("alice:secret")),
            ))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, "alice");
    }

    #[actix_web::test]
    async fn missing_header_is_challenged() {
        let state = test_state().await;
        let app = test_app!(state);

        let req = test::TestRequest::get().uri("/protected").to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let challenge = res
            .headers()
            .get(header::WWW_AUTHENTICATE)
            .and_then(|v| v.to_str().ok())
            .unwrap();
        assert_eq!(challenge, "Basic realm=\"test-realm\"");
    }

    #[actix_web::test]
    async fn wrong_password_and_garbage_token_are_generic_401s() {
        let state = test_state().await;
        let app = test_app!(state);

        let bad_basic = test::TestRequest::get()
            .uri("/protected")
            .insert_header((
                header::AUTHORIZATION,
                format!("Basic {}", STANDARD.encode("alice:wrong")),
            ))
            .to_request();
        let res_basic = test::call_service(&app, bad_basic).await;
        assert_eq!(res_basic.status(), StatusCode::UNAUTHORIZED);

        let bad_bearer = test::TestRequest::get()
            .uri("/protected")
            .insert_header((header::AUTHORIZATION, "Bearer not.a.token"))
            .to_request();
        let res_bearer = test::call_service(&app, bad_bearer).await;
        assert_eq!(res_bearer.status(), StatusCode::UNAUTHORIZED);

        let body_basic = test::read_body(res_basic).await;
        let body_bearer = test::read_body(res_bearer).await;
        assert_eq!(body_basic, body_bearer);
    }
}
