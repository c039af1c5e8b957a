//! Data Transfer Objects - request/response types for the API.
//!
//! User-facing fields are camelCase on the wire; the login response keeps
//! its snake_case OAuth-style token keys.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_name: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in_minutes: i64,
    pub user: UserSummary,
}

/// The identity echoed back in a login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: i64,
    pub user_name: String,
    pub role: String,
}

/// Request to create a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub user_name: String,
    pub password: String,
    pub full_name: String,
    /// "Admin" / "ReadOnly"; unrecognized values fall back to ReadOnly.
    #[serde(default = "default_role")]
    pub role: String,
    pub email_id: String,
    pub mobile_num: String,
}

fn default_role() -> String {
    "ReadOnly".to_string()
}

/// Request to partially update a user. Absent or blank fields are left
/// unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub full_name: Option<String>,
    pub role: Option<String>,
    pub email_id: Option<String>,
    pub mobile_num: Option<String>,
}

/// A user's public representation. Never carries the password digest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i64,
    pub user_name: String,
    pub full_name: String,
    pub role: String,
    pub email_id: String,
    pub mobile_num: String,
    pub profile_pic_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Query parameters for filtered user listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFilterQuery {
    pub user_name: Option<String>,
    pub role: Option<String>,
    pub email_id: Option<String>,
    pub mobile_num: Option<String>,
    pub skip: Option<u64>,
    pub take: Option<u64>,
}

/// Query parameters for plain paged listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageQuery {
    pub skip: Option<u64>,
    pub take: Option<u64>,
}

/// A page of results with pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub skip: u64,
    pub take: u64,
    pub has_more: bool,
}

impl<T> PagedResult<T> {
    pub fn new(items: Vec<T>, total_count: u64, skip: u64, take: u64) -> Self {
        Self {
            items,
            total_count,
            skip,
            take,
            has_more: skip + take < total_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paged_result_computes_has_more() {
        let page = PagedResult::new(vec![1, 2, 3], 10, 0, 3);
        assert!(page.has_more);

        let last = PagedResult::new(vec![1], 10, 9, 3);
        assert!(!last.has_more);
    }

    #[test]
    fn user_dto_uses_camel_case_on_the_wire() {
        let dto = UserDto {
            id: 1,
            user_name: "alice".into(),
            full_name: "Alice Example".into(),
            role: "Admin".into(),
            email_id: "alice@example.com".into(),
            mobile_num: "555-0100".into(),
            profile_pic_url: None,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&dto).unwrap();
        assert!(json.get("userName").is_some());
        assert!(json.get("emailId").is_some());
        assert!(json.get("password_hash").is_none());
    }
}
