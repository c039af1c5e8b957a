use serde::{Deserialize, Serialize};

use super::{Role, User};

/// The authenticated identity attached to a request.
///
/// Produced fresh on every successful authentication, by either scheme,
/// and dropped at the end of the request. Never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: i64,
    pub user_name: String,
    pub role: Role,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            user_name: user.user_name.clone(),
            role: user.role,
        }
    }
}
