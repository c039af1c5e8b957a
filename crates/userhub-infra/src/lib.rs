//! # Userhub Infrastructure
//!
//! Concrete implementations of the ports defined in `userhub-core`:
//! password hashing, token issuance/validation, Basic-credential decoding,
//! and the user store.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL user repository via SeaORM. Without
//!   it only the in-memory repository is available.

pub mod auth;
pub mod database;

pub use auth::{JwtConfig, JwtTokenService, Sha256PasswordHasher, extract_basic_credentials};
pub use database::InMemoryUserRepository;

#[cfg(feature = "postgres")]
pub use database::{DatabaseConfig, PostgresUserRepository, connect};
