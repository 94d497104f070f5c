use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;

use crate::config::DatabaseConfig;

/// Single idempotent bootstrap statement for the only table this service owns.
const USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id            BIGSERIAL    PRIMARY KEY,
    username      VARCHAR(50)  NOT NULL UNIQUE,
    password_hash VARCHAR(255) NOT NULL,
    created_at    TIMESTAMPTZ  NOT NULL DEFAULT now(),
    updated_at    TIMESTAMPTZ  NOT NULL DEFAULT now(),
    is_active     BOOLEAN      NOT NULL DEFAULT TRUE
)
"#;

pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<PgPool> {
    let db = PgPoolOptions::new()
        .max_connections(cfg.max_connections)
        .acquire_timeout(cfg.acquire_timeout)
        .connect_with(cfg.connect_options()?)
        .await
        .context("connect to database")?;
    info!(max_connections = cfg.max_connections, "database connected");
    Ok(db)
}

pub async fn ensure_schema(db: &PgPool) -> anyhow::Result<()> {
    sqlx::query(USERS_TABLE)
        .execute(db)
        .await
        .context("create users table")?;
    Ok(())
}
