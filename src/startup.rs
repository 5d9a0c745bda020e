//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;

use crate::application::services::{AuthService, CommentService, PostService, UserService};
use crate::config::Settings;
use crate::infrastructure::{
    create_pool, create_redis_connection, run_migrations, PgCommentRepository, PgPostRepository,
    PgUserRepository, RedisSessionStore,
};
use crate::presentation::http::routes;
use crate::presentation::middleware::{cors, logging};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub sessions: Arc<RedisSessionStore>,
    pub auth_service: Arc<AuthService<PgUserRepository, RedisSessionStore>>,
    pub user_service: Arc<UserService<PgUserRepository, RedisSessionStore>>,
    pub post_service: Arc<PostService<PgPostRepository, PgUserRepository>>,
    pub comment_service:
        Arc<CommentService<PgCommentRepository, PgPostRepository, PgUserRepository>>,
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        let db = create_pool(&settings.database).await?;
        tracing::info!("Database connection pool created");

        run_migrations(&db).await?;
        tracing::info!("Database migrations applied");

        let redis = create_redis_connection(&settings.redis).await?;
        tracing::info!("Redis connection established");

        let sessions = Arc::new(RedisSessionStore::new(redis, settings.session.ttl_secs));
        let users = Arc::new(PgUserRepository::new(db.clone()));
        let posts = Arc::new(PgPostRepository::new(db.clone()));
        let comments = Arc::new(PgCommentRepository::new(db));

        let state = AppState {
            settings: Arc::new(settings.clone()),
            sessions: sessions.clone(),
            auth_service: Arc::new(AuthService::new(users.clone(), sessions.clone())),
            user_service: Arc::new(UserService::new(users.clone(), sessions)),
            post_service: Arc::new(PostService::new(posts.clone(), users.clone())),
            comment_service: Arc::new(CommentService::new(comments, posts, users)),
        };

        let router = routes::create_router(state)
            .layer(logging::create_trace_layer())
            .layer(cors::create_cors_layer(&settings.cors));

        let addr: SocketAddr = settings.server_addr().parse()?;
        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Listening on {}", addr);

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router).await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}
