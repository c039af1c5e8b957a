//! Authentication implementations.

mod basic;
mod jwt;
mod password;

pub use basic::extract_basic_credentials;
pub use jwt::{JwtConfig, JwtTokenService};
pub use password::Sha256PasswordHasher;
