use std::sync::Arc;

use axum::extract::FromRef;
use tracing::{error, info, instrument, warn};

use super::errors::AuthError;
use super::jwt::{JwtKeys, TokenPair};
use crate::state::AppState;
use crate::users::{RepoError, User, UserRepository};

/// Register / login orchestration over a user store and a token issuer.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    keys: JwtKeys,
}

impl FromRef<AppState> for AuthService {
    fn from_ref(state: &AppState) -> Self {
        Self::new(state.users.clone(), JwtKeys::from_ref(state))
    }
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, keys: JwtKeys) -> Self {
        Self { users, keys }
    }

    /// Create an account; returns the id assigned by the store.
    #[instrument(skip(self, password))]
    pub async fn register(&self, email: &str, password: &str) -> Result<i64, AuthError> {
        let mut user = User::new(email, password)?;

        let existing = self.users.find_by_email(&user.email).await.map_err(|e| {
            error!(error = %e, "find_by_email failed");
            AuthError::FailedToFind(e.to_string())
        })?;
        if existing.is_some() {
            warn!("email already registered");
            return Err(AuthError::UserAlreadyExists);
        }

        user.prepare_for_save()?;

        let id = self.users.save(&user).await.map_err(|e| match e {
            RepoError::Duplicate => {
                warn!("email registered concurrently");
                AuthError::UserAlreadyExists
            }
            RepoError::MissingId => {
                error!("store did not return an id");
                AuthError::FailedToGetId
            }
            other => {
                error!(error = %other, "save user failed");
                AuthError::FailedToSave(other.to_string())
            }
        })?;

        info!(user_id = %id, "user registered");
        Ok(id)
    }

    /// Authenticate and issue an access/refresh token pair.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair, AuthError> {
        let user = self
            .users
            .find_by_email(email)
            .await
            .map_err(|e| {
                error!(error = %e, "find_by_email failed");
                AuthError::FailedToFind(e.to_string())
            })?
            .ok_or_else(|| {
                warn!("login unknown email");
                AuthError::UserNotFound
            })?;

        if let Err(e) = user.check_password(password) {
            warn!(user_id = %user.id, "login invalid password");
            return Err(e.into());
        }

        let tokens = self.keys.issue_pair(user.id).map_err(|e| {
            error!(error = %e, "jwt sign failed");
            AuthError::Token(e.to_string())
        })?;

        info!(user_id = %user.id, "user logged in");
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::auth::jwt::TokenKind;
    use crate::users::MemoryUserRepository;

    fn service_with(users: Arc<dyn UserRepository>) -> AuthService {
        let state = AppState::fake();
        AuthService::new(users, JwtKeys::from_ref(&state))
    }

    fn service() -> (AuthService, Arc<MemoryUserRepository>) {
        let repo = Arc::new(MemoryUserRepository::new());
        (service_with(repo.clone()), repo)
    }

    /// Records calls and fails in configurable ways.
    #[derive(Default)]
    struct SpyRepo {
        calls: Mutex<Vec<&'static str>>,
        fail_find: bool,
        save_result: Option<fn() -> RepoError>,
    }

    impl SpyRepo {
        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().expect("lock").clone()
        }
    }

    #[async_trait]
    impl UserRepository for SpyRepo {
        async fn find_by_email(&self, _email: &str) -> Result<Option<User>, RepoError> {
            self.calls.lock().expect("lock").push("find_by_email");
            if self.fail_find {
                return Err(RepoError::Unavailable("down".into()));
            }
            Ok(None)
        }

        async fn save(&self, user: &User) -> Result<i64, RepoError> {
            self.calls.lock().expect("lock").push("save");
            assert_ne!(user.password, "password", "plaintext reached the store");
            match self.save_result {
                Some(make_err) => Err(make_err()),
                None => Ok(1),
            }
        }
    }

    #[tokio::test]
    async fn register_then_duplicate_is_rejected() {
        let (svc, repo) = service();
        let id = svc
            .register("test@example.com", "password")
            .await
            .expect("first register");
        assert_eq!(id, 1);

        let err = svc
            .register("test@example.com", "password2")
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::UserAlreadyExists);
        assert_eq!(repo.len().expect("len"), 1);
    }

    #[tokio::test]
    async fn register_stores_hash_not_plaintext() {
        let (svc, repo) = service();
        svc.register("test@example.com", "password")
            .await
            .expect("register");

        let stored = repo
            .find_by_email("test@example.com")
            .await
            .expect("find")
            .expect("present");
        assert_ne!(stored.password, "password");
        assert!(stored.created_at.is_some());
        assert_eq!(stored.created_at, stored.updated_at);
    }

    #[tokio::test]
    async fn register_invalid_email_never_touches_store() {
        let spy = Arc::new(SpyRepo::default());
        let svc = service_with(spy.clone());

        let err = svc.register("not-an-email", "password").await.unwrap_err();
        assert_eq!(err, AuthError::InvalidEmail);
        assert!(spy.calls().is_empty());
    }

    #[tokio::test]
    async fn register_short_password_is_rejected() {
        let spy = Arc::new(SpyRepo::default());
        let svc = service_with(spy.clone());

        let err = svc.register("a@example.com", "12345").await.unwrap_err();
        assert_eq!(err, AuthError::InvalidPassword);
        assert!(spy.calls().is_empty());
    }

    #[tokio::test]
    async fn register_maps_store_failures() {
        let spy = Arc::new(SpyRepo {
            fail_find: true,
            ..Default::default()
        });
        let err = service_with(spy.clone())
            .register("a@example.com", "password")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::FailedToFind(_)));
        assert_eq!(spy.calls(), vec!["find_by_email"]);

        let cases: [(fn() -> RepoError, AuthError); 3] = [
            (|| RepoError::Duplicate, AuthError::UserAlreadyExists),
            (|| RepoError::MissingId, AuthError::FailedToGetId),
            (
                || RepoError::Unavailable("down".into()),
                AuthError::FailedToSave("store unavailable: down".into()),
            ),
        ];
        for (make_err, expected) in cases {
            let spy = Arc::new(SpyRepo {
                save_result: Some(make_err),
                ..Default::default()
            });
            let err = service_with(spy.clone())
                .register("a@example.com", "password")
                .await
                .unwrap_err();
            assert_eq!(err, expected);
            assert_eq!(spy.calls(), vec!["find_by_email", "save"]);
        }
    }

    #[tokio::test]
    async fn login_returns_two_distinct_tokens() {
        let (svc, _repo) = service();
        let id = svc
            .register("test@example.com", "password")
            .await
            .expect("register");

        let tokens = svc
            .login("test@example.com", "password")
            .await
            .expect("login");
        assert!(!tokens.access_token.is_empty());
        assert!(!tokens.refresh_token.is_empty());
        assert_ne!(tokens.access_token, tokens.refresh_token);

        let keys = JwtKeys::from_ref(&AppState::fake());
        let claims = keys.verify(&tokens.access_token).expect("access verifies");
        assert_eq!(claims.sub, id.to_string());
        assert_eq!(claims.kind, TokenKind::Access);
        let claims = keys.verify(&tokens.refresh_token).expect("refresh verifies");
        assert_eq!(claims.sub, id.to_string());
        assert_eq!(claims.kind, TokenKind::Refresh);
    }

    #[tokio::test]
    async fn login_wrong_password_and_unknown_user() {
        let (svc, _repo) = service();
        svc.register("test@example.com", "password")
            .await
            .expect("register");

        let err = svc
            .login("test@example.com", "wrongpass")
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::IncorrectPassword);

        let err = svc
            .login("nobody@example.com", "password")
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::UserNotFound);
    }

    #[tokio::test]
    async fn login_lookup_failure_is_internal() {
        let spy = Arc::new(SpyRepo {
            fail_find: true,
            ..Default::default()
        });
        let err = service_with(spy)
            .login("a@example.com", "password")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::FailedToFind(_)));
        assert!(!err.is_client_error());
    }
}
