//! Application state - shared across all handlers.

use std::sync::Arc;

use userhub_core::auth::CredentialVerifier;
use userhub_core::ports::{PasswordHasher, TokenService, UserRepository};
use userhub_infra::database::InMemoryUserRepository;
use userhub_infra::{JwtConfig, JwtTokenService, Sha256PasswordHasher};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub tokens: Arc<dyn TokenService>,
    pub verifier: Arc<CredentialVerifier>,
    pub basic_realm: String,
}

impl AppState {
    /// Build the application state with the appropriate store backend.
    pub async fn new(config: &AppConfig) -> Self {
        #[cfg(feature = "postgres")]
        let users: Arc<dyn UserRepository> = {
            if let Some(db_config) = &config.database {
                match userhub_infra::connect(db_config).await {
                    Ok(conn) => Arc::new(userhub_infra::PostgresUserRepository::new(conn)),
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                        Arc::new(InMemoryUserRepository::new())
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Arc::new(InMemoryUserRepository::new())
            }
        };

        #[cfg(not(feature = "postgres"))]
        let users: Arc<dyn UserRepository> = {
            tracing::info!("Running without postgres feature - using in-memory repository");
            Arc::new(InMemoryUserRepository::new())
        };

        let state = Self::assemble(users, config.jwt.clone(), config.basic_realm.clone());
        tracing::info!("Application state initialized");
        state
    }

    /// Wire the auth services around a chosen repository.
    pub fn assemble(users: Arc<dyn UserRepository>, jwt: JwtConfig, basic_realm: String) -> Self {
        let hasher: Arc<dyn PasswordHasher> = Arc::new(Sha256PasswordHasher);
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(jwt));
        let verifier = Arc::new(CredentialVerifier::new(users.clone(), hasher.clone()));

        Self {
            users,
            hasher,
            tokens,
            verifier,
            basic_realm,
        }
    }
}
