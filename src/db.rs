use anyhow::Context;
use sqlx::{migrate::Migrator, postgres::PgPoolOptions, PgPool};

use crate::config::DatabaseConfig;

/// Schema for both table groups, embedded at compile time.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.connection_url())
        .await
        .with_context(|| {
            format!("connect to database {}@{}:{}", config.name, config.host, config.port)
        })?;
    tracing::debug!(
        host = %config.host,
        port = config.port,
        db = %config.name,
        "database pool ready"
    );
    Ok(pool)
}

/// Creates every table that does not exist yet.
pub async fn migrate(db: &PgPool) -> anyhow::Result<()> {
    MIGRATOR.run(db).await.context("run migrations")?;
    Ok(())
}
