//! Authentication handlers.

use actix_web::{HttpResponse, web};
use chrono::Utc;

use userhub_core::ports::{AuthError, TokenService};
use userhub_shared::dto::{AuthResponse, LoginRequest, UserSummary};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/auth/login
///
/// Verifies the credentials and mints a bearer token. The failure response
/// is the same generic 401 whether the username or the password was wrong.
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let principal = match state.verifier.verify(&req.user_name, &req.password).await {
        Ok(principal) => principal,
        Err(AuthError::Store(e)) => return Err(e.into()),
        Err(_) => return Err(AppError::Unauthorized),
    };

    let token = state
        .tokens
        .issue(&principal, Utc::now())
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in_minutes: state.tokens.expires_in_minutes(),
        user: UserSummary {
            id: principal.user_id,
            user_name: principal.user_name,
            role: principal.role.to_string(),
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
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

    #[actix_web::test]
    async fn login_returns_token_and_user() {
        let state = test_state().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .route("/api/auth/login", web::post().to(login)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(serde_json::json!({"userName": "alice", "password": "secret"}))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert!(!body["access_token"].as_str().unwrap().is_empty());
        assert_eq!(body["token_type"], "Bearer");
        assert_eq!(body["expires_in_minutes"], 60);
        assert_eq!(body["user"]["id"], 1);
        assert_eq!(body["user"]["userName"], "alice");
        assert_eq!(body["user"]["role"], "Admin");

        // The minted token must validate immediately.
        let token = body["access_token"].as_str().unwrap();
        let principal = state.tokens.validate(token, Utc::now()).unwrap();
        assert_eq!(principal.user_name, "alice");
    }

    #[actix_web::test]
    async fn bad_credentials_get_one_generic_response() {
        let state = test_state().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .route("/api/auth/login", web::post().to(login)),
        )
        .await;

        let unknown_user = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(serde_json::json!({"userName": "mallory", "password": "secret"}))
            .to_request();
        let wrong_password = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(serde_json::json!({"userName": "alice", "password": "wrong"}))
            .to_request();

        let res_unknown = test::call_service(&app, unknown_user).await;
        let res_wrong = test::call_service(&app, wrong_password).await;

        assert_eq!(res_unknown.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(res_wrong.status(), StatusCode::UNAUTHORIZED);

        let body_unknown = test::read_body(res_unknown).await;
        let body_wrong = test::read_body(res_wrong).await;
        assert_eq!(body_unknown, body_wrong);
    }
}
