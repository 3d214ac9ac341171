use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .context("failed to connect to PostgreSQL")?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Creates the `contacts` table if it does not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS contacts (
            id                SERIAL PRIMARY KEY,
            business_name     TEXT NOT NULL,
            email             TEXT NOT NULL,
            website           TEXT,
            website_generator TEXT,
            business_type     TEXT,
            city              TEXT,
            initial_contact   TEXT,
            follow_up         TEXT,
            notes             TEXT,
            hook_email        TEXT,
            follow_up_email   TEXT,
            created_at        TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at        TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await
    .context("failed to create contacts table")?;

    info!("contacts schema ready");
    Ok(())
}
