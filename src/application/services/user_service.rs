//! User Service
//!
//! Profile reads, self-service updates and account withdrawal. Profile
//! access is self-only: the target id in the path must match the session
//! user or the call is rejected before any repository work.

use std::sync::Arc;

use crate::application::dto::UpdateUserRequest;
use crate::application::services::auth_service::hash_password;
use crate::domain::{SessionData, SessionStore, UserProfile, UserRepository};
use crate::shared::codes;
use crate::shared::error::AppError;

pub struct UserService<U, S>
where
    U: UserRepository,
    S: SessionStore,
{
    users: Arc<U>,
    sessions: Arc<S>,
}

impl<U, S> UserService<U, S>
where
    U: UserRepository,
    S: SessionStore,
{
    pub fn new(users: Arc<U>, sessions: Arc<S>) -> Self {
        Self { users, sessions }
    }

    pub async fn get_profile(
        &self,
        current: &SessionData,
        target_id: i64,
    ) -> Result<UserProfile, AppError> {
        if target_id != current.user_id {
            return Err(AppError::Forbidden);
        }
        self.users
            .find_profile_by_id(target_id)
            .await?
            .ok_or(AppError::NotFound(codes::NOT_FOUND_USER))
    }

    pub async fn check_email_available(&self, email: &str) -> Result<(), AppError> {
        if self.users.email_exists(email).await? {
            return Err(AppError::Conflict(codes::ALREADY_EXIST_EMAIL));
        }
        Ok(())
    }

    pub async fn check_nickname_available(&self, nickname: &str) -> Result<(), AppError> {
        if self.users.nickname_exists(nickname).await? {
            return Err(AppError::Conflict(codes::ALREADY_EXIST_NICKNAME));
        }
        Ok(())
    }

    /// Update nickname and profile image, then refresh the session record so
    /// subsequent requests see the new identity. Returns the updated session
    /// data.
    pub async fn update_profile(
        &self,
        current: &SessionData,
        session_id: &str,
        target_id: i64,
        request: &UpdateUserRequest,
    ) -> Result<SessionData, AppError> {
        if target_id != current.user_id {
            return Err(AppError::Forbidden);
        }

        if request.nickname != current.nickname
            && self.users.nickname_exists(&request.nickname).await?
        {
            return Err(AppError::Conflict(codes::ALREADY_EXIST_NICKNAME));
        }
        self.users
            .update_nickname(current.user_id, &request.nickname)
            .await?;

        let profile_image_url = match &request.profile_image_url {
            None => current.profile_image_url.clone(),
            Some(None) => {
                self.users.clear_profile_image(current.user_id).await?;
                None
            }
            Some(Some(path)) => {
                self.users
                    .replace_profile_image(current.user_id, path)
                    .await?;
                Some(path.clone())
            }
        };

        let updated = SessionData {
            user_id: current.user_id,
            email: current.email.clone(),
            nickname: request.nickname.clone(),
            profile_image_url,
        };
        self.sessions.save(session_id, &updated).await?;
        Ok(updated)
    }

    pub async fn change_password(
        &self,
        current: &SessionData,
        target_id: i64,
        password: &str,
    ) -> Result<(), AppError> {
        if target_id != current.user_id {
            return Err(AppError::Forbidden);
        }

        let password_hash = hash_password(password)?;
        self.users
            .update_password(current.user_id, &password_hash)
            .await
    }

    /// Soft-delete the account and destroy the session that performed it.
    pub async fn withdraw(
        &self,
        current: &SessionData,
        session_id: &str,
        target_id: i64,
    ) -> Result<(), AppError> {
        if target_id != current.user_id {
            return Err(AppError::Forbidden);
        }

        if !self.users.soft_delete(current.user_id).await? {
            return Err(AppError::NotFound(codes::NOT_FOUND_USER));
        }

        self.sessions.destroy(session_id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::session::MockSessionStore;
    use crate::domain::entities::user::MockUserRepository;
    use pretty_assertions::assert_eq;

    fn session_of(user_id: i64) -> SessionData {
        SessionData {
            user_id,
            email: "a@b.com".to_string(),
            nickname: "tester".to_string(),
            profile_image_url: None,
        }
    }

    fn update_request(json: &str) -> UpdateUserRequest {
        serde_json::from_str(json).unwrap()
    }

    #[tokio::test]
    async fn reading_someone_elses_profile_is_forbidden() {
        let mut users = MockUserRepository::new();
        users.expect_find_profile_by_id().never();

        let service = UserService::new(Arc::new(users), Arc::new(MockSessionStore::new()));
        let err = service.get_profile(&session_of(1), 2).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
    }

    #[tokio::test]
    async fn updating_someone_else_is_forbidden() {
        let service = UserService::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(MockSessionStore::new()),
        );

        let err = service
            .update_profile(
                &session_of(1),
                "sid",
                2,
                &update_request(r#"{"nickname":"other"}"#),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
    }

    #[tokio::test]
    async fn nickname_collision_is_reported_before_any_write() {
        let mut users = MockUserRepository::new();
        users.expect_nickname_exists().returning(|_| Ok(true));
        users.expect_update_nickname().never();

        let service = UserService::new(Arc::new(users), Arc::new(MockSessionStore::new()));
        let err = service
            .update_profile(
                &session_of(1),
                "sid",
                1,
                &update_request(r#"{"nickname":"taken"}"#),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Conflict(code) if code == codes::ALREADY_EXIST_NICKNAME
        ));
    }

    #[tokio::test]
    async fn keeping_the_same_nickname_skips_the_collision_probe() {
        let mut users = MockUserRepository::new();
        users.expect_nickname_exists().never();
        users.expect_update_nickname().returning(|_, _| Ok(()));

        let mut sessions = MockSessionStore::new();
        sessions.expect_save().returning(|_, _| Ok(()));

        let service = UserService::new(Arc::new(users), Arc::new(sessions));
        let updated = service
            .update_profile(
                &session_of(1),
                "sid",
                1,
                &update_request(r#"{"nickname":"tester"}"#),
            )
            .await
            .unwrap();
        assert_eq!(updated.nickname, "tester");
    }

    #[tokio::test]
    async fn explicit_null_clears_the_profile_image() {
        let mut users = MockUserRepository::new();
        users.expect_nickname_exists().never();
        users.expect_update_nickname().returning(|_, _| Ok(()));
        users
            .expect_clear_profile_image()
            .times(1)
            .returning(|_| Ok(()));

        let mut sessions = MockSessionStore::new();
        sessions
            .expect_save()
            .withf(|_, data: &SessionData| data.profile_image_url.is_none())
            .returning(|_, _| Ok(()));

        let service = UserService::new(Arc::new(users), Arc::new(sessions));
        let updated = service
            .update_profile(
                &session_of(1),
                "sid",
                1,
                &update_request(r#"{"nickname":"tester","profileImageUrl":null}"#),
            )
            .await
            .unwrap();
        assert_eq!(updated.profile_image_url, None);
    }

    #[tokio::test]
    async fn withdrawal_destroys_the_session() {
        let mut users = MockUserRepository::new();
        users.expect_soft_delete().returning(|_| Ok(true));

        let mut sessions = MockSessionStore::new();
        sessions
            .expect_destroy()
            .withf(|sid: &str| sid == "sid")
            .times(1)
            .returning(|_| Ok(true));

        let service = UserService::new(Arc::new(users), Arc::new(sessions));
        service
            .withdraw(&session_of(1), "sid", 1)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn withdrawing_a_missing_account_is_not_found() {
        let mut users = MockUserRepository::new();
        users.expect_soft_delete().returning(|_| Ok(false));

        let service = UserService::new(Arc::new(users), Arc::new(MockSessionStore::new()));
        let err = service
            .withdraw(&session_of(1), "sid", 1)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::NotFound(code) if code == codes::NOT_FOUND_USER
        ));
    }

    #[tokio::test]
    async fn taken_email_probe_conflicts() {
        let mut users = MockUserRepository::new();
        users.expect_email_exists().returning(|_| Ok(true));

        let service = UserService::new(Arc::new(users), Arc::new(MockSessionStore::new()));
        let err = service.check_email_available("a@b.com").await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Conflict(code) if code == codes::ALREADY_EXIST_EMAIL
        ));
    }
}
