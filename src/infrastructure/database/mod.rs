//! Database Module
//!
//! PostgreSQL connection pool and migrations.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

use crate::config::DatabaseSettings;

/// Create a PostgreSQL connection pool
pub async fn create_pool(settings: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout))
        .connect(&settings.url)
        .await
}

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

#[cfg(test)]
mod tests {
    const SCHEMA: &str =
        include_str!("../../../migrations/20250301000000_create_board_schema.sql");

    fn table_body(name: &str) -> &'static str {
        SCHEMA
            .split(&format!("CREATE TABLE {name}"))
            .nth(1)
            .and_then(|rest| rest.split(';').next())
            .unwrap_or_else(|| panic!("{name} table missing from schema"))
    }

    #[test]
    fn file_rows_carry_their_owner_and_post_back_reference() {
        let files = table_body("files");
        assert!(files.contains("user_id     BIGINT NOT NULL"));
        assert!(files.contains("post_id     BIGINT"));
        assert!(SCHEMA.contains("files_user_id_fkey"));
        assert!(SCHEMA.contains("files_post_id_fkey"));
    }
}
