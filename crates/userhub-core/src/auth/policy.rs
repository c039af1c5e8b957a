//! Role-based authorization policy.
//!
//! A static table from protected operation to required role. Evaluation is
//! a pure lookup: no state, no store access.

use crate::domain::{Principal, Role};
use crate::ports::AuthError;

/// Protected operations on the user resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Create,
    Update,
    Delete,
    UploadProfileAsset,
    /// Read by id, listing, and filtering - paged or not.
    Read,
}

/// What a given action requires of the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleRequirement {
    /// Any authenticated principal, either role.
    Authenticated,
    AdminOnly,
}

impl UserAction {
    pub fn requirement(self) -> RoleRequirement {
        match self {
            UserAction::Create
            | UserAction::Update
            | UserAction::Delete
            | UserAction::UploadProfileAsset => RoleRequirement::AdminOnly,
            UserAction::Read => RoleRequirement::Authenticated,
        }
    }
}

/// Check a principal against the requirement for `action`.
///
/// `None` (no valid principal) is `Unauthenticated`; a principal with an
/// insufficient role is `Forbidden`. Distinct kinds, 401 vs 403.
pub fn authorize(principal: Option<&Principal>, action: UserAction) -> Result<(), AuthError> {
    let principal = principal.ok_or(AuthError::Unauthenticated)?;

    match action.requirement() {
        RoleRequirement::Authenticated => Ok(()),
        RoleRequirement::AdminOnly if principal.role == Role::Admin => Ok(()),
        RoleRequirement::AdminOnly => Err(AuthError::Forbidden),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(role: Role) -> Principal {
        Principal {
            user_id: 7,
            user_name: "carol".into(),
            role,
        }
    }

    #[test]
    fn read_only_cannot_create() {
        let p = principal(Role::ReadOnly);
        let err = authorize(Some(&p), UserAction::Create).unwrap_err();
        assert!(matches!(err, AuthError::Forbidden));
    }

    #[test]
    fn read_only_can_read() {
        let p = principal(Role::ReadOnly);
        assert!(authorize(Some(&p), UserAction::Read).is_ok());
    }

    #[test]
    fn admin_can_do_everything() {
        let p = principal(Role::Admin);
        for action in [
            UserAction::Create,
            UserAction::Update,
            UserAction::Delete,
            UserAction::UploadProfileAsset,
            UserAction::Read,
        ] {
            assert!(authorize(Some(&p), action).is_ok());
        }
    }

    #[test]
    fn missing_principal_is_unauthenticated_not_forbidden() {
        let err = authorize(None, UserAction::Read).unwrap_err();
        assert!(matches!(err, AuthError::Unauthenticated));
    }
}
