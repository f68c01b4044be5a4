use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates a PostgreSQL connection pool and makes sure the schema exists.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .context("Failed to connect to PostgreSQL")?;

    ensure_schema(&pool).await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Idempotent DDL for everything the service persists.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS match_history (
            id               UUID PRIMARY KEY,
            candidate_name   TEXT NOT NULL,
            job_title        TEXT NOT NULL,
            overall_score    DOUBLE PRECISION NOT NULL,
            verdict          TEXT NOT NULL,
            rejection_reason TEXT,
            report           JSONB NOT NULL,
            created_at       TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create match_history table")?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS match_history_created_at_idx ON match_history (created_at DESC)",
    )
    .execute(pool)
    .await
    .context("Failed to create match_history index")?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS job_descriptions (
            id          UUID PRIMARY KEY,
            job_title   TEXT NOT NULL,
            company     TEXT,
            record      JSONB NOT NULL,
            created_at  TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create job_descriptions table")?;

    Ok(())
}
