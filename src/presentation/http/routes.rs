//! Route Definitions
//!
//! The versioned API surface. Protected sub-routers carry the session
//! middleware as a route layer; anything else is public. Unknown paths and
//! known paths hit with the wrong method both answer in the uniform
//! envelope.

use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{get, patch, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::presentation::http::handlers::{auth, comment, health, post as posts, upload, user};
use crate::presentation::middleware::{auth_middleware, timeout_middleware};
use crate::shared::codes;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Slack on top of the upload limit for multipart framing.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

fn auth_routes(state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login));

    let protected = Router::new()
        .route("/logout", post(auth::logout))
        .route("/check", get(auth::check))
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    public.merge(protected)
}

fn user_routes(state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/email/check", get(user::check_email))
        .route("/nickname/check", get(user::check_nickname));

    let protected = Router::new()
        .route(
            "/{user_id}",
            get(user::get_user)
                .put(user::update_user)
                .delete(user::withdraw),
        )
        .route("/{user_id}/password", patch(user::change_password))
        .route(
            "/upload/profile-image",
            post(upload::upload_profile_image).layer(DefaultBodyLimit::max(
                state.settings.upload.max_bytes + MULTIPART_OVERHEAD,
            )),
        )
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    public.merge(protected)
}

fn post_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(posts::list_posts).post(posts::write_post))
        .route("/search", get(posts::search_posts))
        .route(
            "/{post_id}",
            get(posts::get_post)
                .patch(posts::update_post)
                .delete(posts::delete_post),
        )
        .route(
            "/{post_id}/likes",
            post(posts::like_post).delete(posts::unlike_post),
        )
        .route(
            "/{post_id}/comments",
            get(comment::list_comments).post(comment::write_comment),
        )
        .route(
            "/{post_id}/comments/{comment_id}",
            patch(comment::update_comment).delete(comment::delete_comment),
        )
        .route(
            "/upload/attach-file",
            post(upload::upload_attach_file).layer(DefaultBodyLimit::max(
                state.settings.upload.max_bytes + MULTIPART_OVERHEAD,
            )),
        )
        .route_layer(from_fn_with_state(state.clone(), auth_middleware))
}

/// Create the application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .nest("/auth", auth_routes(&state))
        .nest("/users", user_routes(&state))
        .nest("/posts", post_routes(&state));

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1", api)
        .nest_service("/public", ServeDir::new("public"))
        .fallback(|| async { AppError::NotFound(codes::NOT_FOUND) })
        .method_not_allowed_fallback(|| async { AppError::MethodNotAllowed })
        .layer(from_fn_with_state(state.clone(), timeout_middleware))
        .with_state(state)
}
