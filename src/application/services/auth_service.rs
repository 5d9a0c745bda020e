//! Authentication Service
//!
//! Signup, login and logout over the user repository and the session store.
//! Login regenerates the session id before anything is written back to the
//! client, so a pre-login id never survives authentication.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::application::dto::SignupRequest;
use crate::domain::{NewUser, SessionData, SessionStore, UserRepository};
use crate::shared::codes;
use crate::shared::error::AppError;

/// Hash a password using Argon2id
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}

/// Verify a password against its stored hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(format!("Invalid password hash: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

pub struct AuthService<U, S>
where
    U: UserRepository,
    S: SessionStore,
{
    users: Arc<U>,
    sessions: Arc<S>,
}

impl<U, S> AuthService<U, S>
where
    U: UserRepository,
    S: SessionStore,
{
    pub fn new(users: Arc<U>, sessions: Arc<S>) -> Self {
        Self { users, sessions }
    }

    /// Register a new account. Both uniqueness probes run before the insert
    /// so the caller gets the specific conflict; the database constraints
    /// still back them up against races.
    pub async fn signup(&self, request: &SignupRequest) -> Result<i64, AppError> {
        if self.users.email_exists(&request.email).await? {
            return Err(AppError::Conflict(codes::ALREADY_EXIST_EMAIL));
        }
        if self.users.nickname_exists(&request.nickname).await? {
            return Err(AppError::Conflict(codes::ALREADY_EXIST_NICKNAME));
        }

        let password_hash = hash_password(&request.password)?;
        let user = NewUser {
            email: request.email.clone(),
            password_hash,
            nickname: request.nickname.clone(),
            profile_image_url: request.profile_image_url.clone(),
        };

        self.users.create(&user).await
    }

    /// Verify credentials and open a fresh session, destroying `old_session`
    /// when one was presented. Returns the new session id and its data.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        old_session: Option<&str>,
    ) -> Result<(String, SessionData), AppError> {
        let credentials = self
            .users
            .find_credentials_by_email(email)
            .await?
            .ok_or(AppError::Unauthorized(codes::INVALID_CREDENTIALS))?;

        if !verify_password(password, &credentials.password_hash)? {
            return Err(AppError::Unauthorized(codes::INVALID_CREDENTIALS));
        }

        let data = SessionData {
            user_id: credentials.user_id,
            email: credentials.email,
            nickname: credentials.nickname,
            profile_image_url: credentials.profile_image_url,
        };

        let session_id = self.sessions.regenerate(old_session, &data).await?;
        Ok((session_id, data))
    }

    /// Destroy the caller's session. Destroying an already-gone session is
    /// not an error; logout is idempotent.
    pub async fn logout(&self, session_id: &str) -> Result<(), AppError> {
        self.sessions.destroy(session_id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::session::MockSessionStore;
    use crate::domain::entities::user::MockUserRepository;
    use crate::domain::UserCredentials;
    use pretty_assertions::assert_eq;

    fn signup_request() -> SignupRequest {
        serde_json::from_str(
            r#"{"email":"a@b.com","password":"Abcdef1!","nickname":"tester"}"#,
        )
        .unwrap()
    }

    fn credentials_with(password: &str) -> UserCredentials {
        UserCredentials {
            user_id: 7,
            email: "a@b.com".to_string(),
            nickname: "tester".to_string(),
            password_hash: hash_password(password).unwrap(),
            profile_image_url: None,
        }
    }

    #[tokio::test]
    async fn signup_rejects_taken_email() {
        let mut users = MockUserRepository::new();
        users.expect_email_exists().returning(|_| Ok(true));
        let sessions = MockSessionStore::new();

        let service = AuthService::new(Arc::new(users), Arc::new(sessions));
        let err = service.signup(&signup_request()).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Conflict(code) if code == codes::ALREADY_EXIST_EMAIL
        ));
    }

    #[tokio::test]
    async fn signup_rejects_taken_nickname() {
        let mut users = MockUserRepository::new();
        users.expect_email_exists().returning(|_| Ok(false));
        users.expect_nickname_exists().returning(|_| Ok(true));
        let sessions = MockSessionStore::new();

        let service = AuthService::new(Arc::new(users), Arc::new(sessions));
        let err = service.signup(&signup_request()).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Conflict(code) if code == codes::ALREADY_EXIST_NICKNAME
        ));
    }

    #[tokio::test]
    async fn signup_stores_a_hash_not_the_password() {
        let mut users = MockUserRepository::new();
        users.expect_email_exists().returning(|_| Ok(false));
        users.expect_nickname_exists().returning(|_| Ok(false));
        users
            .expect_create()
            .withf(|user: &NewUser| {
                user.password_hash != "Abcdef1!" && user.password_hash.starts_with("$argon2")
            })
            .returning(|_| Ok(1));
        let sessions = MockSessionStore::new();

        let service = AuthService::new(Arc::new(users), Arc::new(sessions));
        assert_eq!(service.signup(&signup_request()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn login_with_unknown_email_is_invalid_credentials() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_credentials_by_email()
            .returning(|_| Ok(None));
        let sessions = MockSessionStore::new();

        let service = AuthService::new(Arc::new(users), Arc::new(sessions));
        let err = service
            .login("a@b.com", "Abcdef1!", None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Unauthorized(code) if code == codes::INVALID_CREDENTIALS
        ));
    }

    #[tokio::test]
    async fn login_with_wrong_password_is_invalid_credentials() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_credentials_by_email()
            .returning(|_| Ok(Some(credentials_with("Abcdef1!"))));
        let sessions = MockSessionStore::new();

        let service = AuthService::new(Arc::new(users), Arc::new(sessions));
        let err = service
            .login("a@b.com", "Wrongpw1!", None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Unauthorized(code) if code == codes::INVALID_CREDENTIALS
        ));
    }

    #[tokio::test]
    async fn login_regenerates_the_presented_session() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_credentials_by_email()
            .returning(|_| Ok(Some(credentials_with("Abcdef1!"))));

        let mut sessions = MockSessionStore::new();
        sessions
            .expect_regenerate()
            .withf(|old: &Option<&str>, data: &SessionData| {
                *old == Some("stale-id") && data.user_id == 7
            })
            .returning(|_, _| Ok("fresh-id".to_string()));

        let service = AuthService::new(Arc::new(users), Arc::new(sessions));
        let (session_id, data) = service
            .login("a@b.com", "Abcdef1!", Some("stale-id"))
            .await
            .unwrap();
        assert_eq!(session_id, "fresh-id");
        assert_eq!(data.nickname, "tester");
    }
}
