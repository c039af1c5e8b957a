use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User role - a closed set of exactly two values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    ReadOnly,
}

impl Role {
    /// Parse a role string, case-insensitively. Returns `None` for
    /// anything that is not `Admin` or `ReadOnly`.
    pub fn parse(input: &str) -> Option<Self> {
        if input.eq_ignore_ascii_case("admin") {
            Some(Role::Admin)
        } else if input.eq_ignore_ascii_case("readonly") {
            Some(Role::ReadOnly)
        } else {
            None
        }
    }

    /// Parse a role string, falling back to `ReadOnly` for unrecognized
    /// input. This fallback is the contract for user creation.
    pub fn parse_or_default(input: &str) -> Self {
        Self::parse(input).unwrap_or(Role::ReadOnly)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::ReadOnly => "ReadOnly",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User entity - represents a user account in the system.
///
/// `password_hash` holds the lowercase hex SHA-256 digest of the plaintext
/// password. It must never be serialized to any caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub user_name: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: Role,
    pub email_id: String,
    pub mobile_num: String,
    pub profile_pic_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user. The id is assigned by the store on insert.
    pub fn new(
        user_name: String,
        password_hash: String,
        full_name: String,
        role: Role,
        email_id: String,
        mobile_num: String,
    ) -> Self {
        Self {
            id: 0,
            user_name,
            password_hash,
            full_name,
            role,
            email_id,
            mobile_num,
            profile_pic_url: None,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_role_is_case_insensitive() {
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::parse("ReadOnly"), Some(Role::ReadOnly));
        assert_eq!(Role::parse("readonly"), Some(Role::ReadOnly));
    }

    #[test]
    fn unknown_role_falls_back_to_read_only() {
        assert_eq!(Role::parse("superuser"), None);
        assert_eq!(Role::parse_or_default("superuser"), Role::ReadOnly);
        assert_eq!(Role::parse_or_default(""), Role::ReadOnly);
    }
}
