//! Credential verification against the user store.

use std::sync::Arc;

use crate::domain::Principal;
use crate::ports::{AuthError, PasswordHasher, UserRepository};

/// Verifies a username/password pair and produces a [`Principal`].
///
/// Unknown usernames and wrong passwords fail identically with
/// [`AuthError::InvalidCredentials`] so callers cannot enumerate accounts.
/// Store failures propagate as [`AuthError::Store`] instead.
pub struct CredentialVerifier {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl CredentialVerifier {
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    pub async fn verify(&self, user_name: &str, password: &str) -> Result<Principal, AuthError> {
        let user = self
            .users
            .find_by_user_name(user_name)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.hasher.verify(password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(Principal::from(&user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Role, User};
    use crate::error::RepoError;
    use crate::ports::{UserFilter, UserRepository};
    use async_trait::async_trait;

    /// Stand-in digest: the reversed plaintext.
    struct ReverseHasher;

    impl PasswordHasher for ReverseHasher {
        fn hash(&self, plaintext: &str) -> String {
            plaintext.chars().rev().collect()
        }

        fn verify(&self, plaintext: &str, digest: &str) -> bool {
            self.hash(plaintext) == digest
        }
    }

    struct SingleUserRepo {
        user: Option<User>,
        fail: bool,
    }

    #[async_trait]
    impl UserRepository for SingleUserRepo {
        async fn find_by_id(&self, _id: i64) -> Result<Option<User>, RepoError> {
            Ok(self.user.clone())
        }

        async fn find_by_user_name(&self, user_name: &str) -> Result<Option<User>, RepoError> {
            if self.fail {
                return Err(RepoError::Connection("store down".into()));
            }
            Ok(self
                .user
                .clone()
                .filter(|u| u.user_name == user_name))
        }

        async fn find_all(&self) -> Result<Vec<User>, RepoError> {
            unimplemented!()
        }

        async fn find_page(&self, _skip: u64, _take: u64) -> Result<Vec<User>, RepoError> {
            unimplemented!()
        }

        async fn find_filtered(
            &self,
            _filter: &UserFilter,
            _skip: Option<u64>,
            _take: Option<u64>,
        ) -> Result<Vec<User>, RepoError> {
            unimplemented!()
        }

        async fn insert(&self, _user: User) -> Result<User, RepoError> {
            unimplemented!()
        }

        async fn update(&self, _user: User) -> Result<User, RepoError> {
            unimplemented!()
        }

        async fn delete(&self, _id: i64) -> Result<(), RepoError> {
            unimplemented!()
        }

        async fn user_name_exists(
            &self,
            _user_name: &str,
            _exclude_id: Option<i64>,
        ) -> Result<bool, RepoError> {
            unimplemented!()
        }

        async fn count(&self) -> Result<u64, RepoError> {
            unimplemented!()
        }

        async fn count_filtered(&self, _filter: &UserFilter) -> Result<u64, RepoError> {
            unimplemented!()
        }
    }

    fn alice() -> User {
        let mut user = User::new(
            "alice".into(),
            ReverseHasher.hash("secret"),
            "Alice Example".into(),
            Role::Admin,
            "alice@example.com".into(),
            "555-0100".into(),
        );
        user.id = 42;
        user
    }

    fn verifier(repo: SingleUserRepo) -> CredentialVerifier {
        CredentialVerifier::new(Arc::new(repo), Arc::new(ReverseHasher))
    }

    #[tokio::test]
    async fn valid_credentials_yield_principal() {
        let v = verifier(SingleUserRepo {
            user: Some(alice()),
            fail: false,
        });

        let principal = v.verify("alice", "secret").await.unwrap();
        assert_eq!(principal.user_id, 42);
        assert_eq!(principal.user_name, "alice");
        assert_eq!(principal.role, Role::Admin);
    }

    #[tokio::test]
    async fn unknown_user_and_wrong_password_fail_identically() {
        let v = verifier(SingleUserRepo {
            user: Some(alice()),
            fail: false,
        });

        let unknown = v.verify("bob", "secret").await.unwrap_err();
        let wrong = v.verify("alice", "hunter2").await.unwrap_err();

        assert!(matches!(unknown, AuthError::InvalidCredentials));
        assert!(matches!(wrong, AuthError::InvalidCredentials));
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[tokio::test]
    async fn store_failure_is_not_invalid_credentials() {
        let v = verifier(SingleUserRepo {
            user: None,
            fail: true,
        });

        let err = v.verify("alice", "secret").await.unwrap_err();
        assert!(matches!(err, AuthError::Store(_)));
    }
}
