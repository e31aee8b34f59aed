use anyhow::Context;
use sqlx::PgPool;
use tracing::info;

/// Idempotent table definitions. Existing tables are left as they are.
const STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id            SERIAL PRIMARY KEY,
        name          VARCHAR NOT NULL UNIQUE,
        password      VARCHAR NOT NULL,
        email         VARCHAR,
        creation_time TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS advertisements (
        id             SERIAL PRIMARY KEY,
        title          VARCHAR NOT NULL,
        descriptions   VARCHAR NOT NULL,
        creations_date TIMESTAMPTZ NOT NULL DEFAULT now(),
        user_id        INTEGER REFERENCES users (id) ON DELETE SET NULL
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS ix_advertisements_title ON advertisements (title)
    "#,
];

pub async fn ensure_schema(pool: &PgPool) -> anyhow::Result<()> {
    let mut tx = pool.begin().await.context("begin tx")?;
    for stmt in STATEMENTS {
        sqlx::query(stmt)
            .execute(&mut *tx)
            .await
            .context("create tables")?;
    }
    tx.commit().await.context("commit tx")?;
    info!("database schema ready");
    Ok(())
}
