//! Post Service
//!
//! Board reads and writes. Ownership is enforced here; the repositories
//! only answer who owns what.

use std::sync::Arc;

use crate::application::dto::{UpdatePostRequest, WritePostRequest};
use crate::domain::{NewPost, Post, PostRepository, SearchSort, SessionData, UserRepository};
use crate::shared::codes;
use crate::shared::error::AppError;

pub struct PostService<P, U>
where
    P: PostRepository,
    U: UserRepository,
{
    posts: Arc<P>,
    users: Arc<U>,
}

impl<P, U> PostService<P, U>
where
    P: PostRepository,
    U: UserRepository,
{
    pub fn new(posts: Arc<P>, users: Arc<U>) -> Self {
        Self { posts, users }
    }

    pub async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Post>, AppError> {
        self.posts.list(offset, limit).await
    }

    pub async fn search(
        &self,
        keyword: &str,
        sort: SearchSort,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Post>, AppError> {
        self.posts.search(keyword, sort, offset, limit).await
    }

    /// Detail view; each successful fetch counts as one view.
    pub async fn detail(&self, post_id: i64) -> Result<Post, AppError> {
        self.posts
            .fetch_detail_marking_view(post_id)
            .await?
            .ok_or(AppError::NotFound(codes::POST_NOT_FOUND))
    }

    /// The author nickname is snapshotted from the session at write time.
    /// The author must still be an active account; a session that outlived
    /// withdrawal cannot write.
    pub async fn write(
        &self,
        author: &SessionData,
        request: &WritePostRequest,
    ) -> Result<i64, AppError> {
        if !self.users.is_active(author.user_id).await? {
            return Err(AppError::NotFound(codes::NOT_FOUND_USER));
        }

        let post = NewPost {
            user_id: author.user_id,
            nickname: author.nickname.clone(),
            title: request.title.clone(),
            content: request.content.clone(),
            attach_file_path: request.attach_file_url.clone(),
        };
        self.posts.create(&post).await
    }

    pub async fn update(
        &self,
        user_id: i64,
        post_id: i64,
        request: &UpdatePostRequest,
    ) -> Result<(), AppError> {
        self.ensure_owner(post_id, user_id).await?;
        self.posts
            .update(
                post_id,
                user_id,
                &request.title,
                &request.content,
                &request.attachment_change(),
            )
            .await
    }

    pub async fn delete(&self, user_id: i64, post_id: i64) -> Result<(), AppError> {
        self.ensure_owner(post_id, user_id).await?;
        if !self.posts.soft_delete(post_id).await? {
            return Err(AppError::NotFound(codes::POST_NOT_FOUND));
        }
        Ok(())
    }

    /// Returns the new like count.
    pub async fn like(&self, user_id: i64, post_id: i64) -> Result<i64, AppError> {
        self.posts.like(post_id, user_id).await
    }

    /// Returns the new like count.
    pub async fn unlike(&self, user_id: i64, post_id: i64) -> Result<i64, AppError> {
        self.posts.unlike(post_id, user_id).await
    }

    async fn ensure_owner(&self, post_id: i64, user_id: i64) -> Result<(), AppError> {
        let owner = self
            .posts
            .find_owner(post_id)
            .await?
            .ok_or(AppError::NotFound(codes::POST_NOT_FOUND))?;
        if owner != user_id {
            return Err(AppError::Forbidden);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::post::MockPostRepository;
    use crate::domain::entities::user::MockUserRepository;
    use crate::domain::AttachmentChange;
    use pretty_assertions::assert_eq;

    fn author() -> SessionData {
        SessionData {
            user_id: 1,
            email: "a@b.com".to_string(),
            nickname: "tester".to_string(),
            profile_image_url: None,
        }
    }

    fn service_with(posts: MockPostRepository) -> PostService<MockPostRepository, MockUserRepository> {
        let mut users = MockUserRepository::new();
        users.expect_is_active().returning(|_| Ok(true));
        PostService::new(Arc::new(posts), Arc::new(users))
    }

    fn update_request(json: &str) -> UpdatePostRequest {
        serde_json::from_str(json).unwrap()
    }

    #[tokio::test]
    async fn detail_of_missing_post_is_not_found() {
        let mut posts = MockPostRepository::new();
        posts
            .expect_fetch_detail_marking_view()
            .returning(|_| Ok(None));

        let service = service_with(posts);
        let err = service.detail(99).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::NotFound(code) if code == codes::POST_NOT_FOUND
        ));
    }

    #[tokio::test]
    async fn write_snapshots_the_author_nickname() {
        let mut posts = MockPostRepository::new();
        posts
            .expect_create()
            .withf(|post: &NewPost| post.user_id == 1 && post.nickname == "tester")
            .returning(|_| Ok(42));

        let service = service_with(posts);
        let request: WritePostRequest =
            serde_json::from_str(r#"{"title":"hello","content":"world"}"#).unwrap();
        assert_eq!(service.write(&author(), &request).await.unwrap(), 42);
    }

    #[tokio::test]
    async fn a_withdrawn_author_cannot_write() {
        let mut posts = MockPostRepository::new();
        posts.expect_create().never();
        let mut users = MockUserRepository::new();
        users.expect_is_active().returning(|_| Ok(false));

        let service = PostService::new(Arc::new(posts), Arc::new(users));
        let request: WritePostRequest =
            serde_json::from_str(r#"{"title":"hello","content":"world"}"#).unwrap();
        let err = service.write(&author(), &request).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::NotFound(code) if code == codes::NOT_FOUND_USER
        ));
    }

    #[tokio::test]
    async fn updating_another_users_post_is_forbidden() {
        let mut posts = MockPostRepository::new();
        posts.expect_find_owner().returning(|_| Ok(Some(2)));
        posts.expect_update().never();

        let service = service_with(posts);
        let err = service
            .update(1, 5, &update_request(r#"{"title":"t","content":"c"}"#))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
    }

    #[tokio::test]
    async fn updating_a_missing_post_is_not_found() {
        let mut posts = MockPostRepository::new();
        posts.expect_find_owner().returning(|_| Ok(None));

        let service = service_with(posts);
        let err = service
            .update(1, 5, &update_request(r#"{"title":"t","content":"c"}"#))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::NotFound(code) if code == codes::POST_NOT_FOUND
        ));
    }

    #[tokio::test]
    async fn update_passes_the_attachment_change_through() {
        let mut posts = MockPostRepository::new();
        posts.expect_find_owner().returning(|_| Ok(Some(1)));
        posts
            .expect_update()
            .withf(|_, _, _, _, change: &AttachmentChange| *change == AttachmentChange::Remove)
            .returning(|_, _, _, _, _| Ok(()));

        let service = service_with(posts);
        service
            .update(
                1,
                5,
                &update_request(r#"{"title":"t","content":"c","attachFileUrl":null}"#),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn delete_requires_ownership() {
        let mut posts = MockPostRepository::new();
        posts.expect_find_owner().returning(|_| Ok(Some(2)));
        posts.expect_soft_delete().never();

        let service = service_with(posts);
        let err = service.delete(1, 5).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
    }

    #[tokio::test]
    async fn like_returns_the_new_count() {
        let mut posts = MockPostRepository::new();
        posts
            .expect_like()
            .withf(|post_id: &i64, user_id: &i64| *post_id == 5 && *user_id == 1)
            .returning(|_, _| Ok(4));

        let service = service_with(posts);
        assert_eq!(service.like(1, 5).await.unwrap(), 4);
    }
}
