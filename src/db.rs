use anyhow::Result;
use sea_orm::{DatabaseConnection, SqlxPostgresConnector};
use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::config::RetryPolicy;

pub type DbPool = PgPool;

/// Open a Postgres pool, retrying with backoff while the server is unavailable.
pub async fn create_pool(database_url: &str, retry: RetryPolicy) -> Result<DbPool> {
    let mut attempt = 1;
    loop {
        match PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
        {
            Ok(pool) => return Ok(pool),
            Err(err) if attempt < retry.attempts => {
                let delay = retry.delay_after(attempt);
                tracing::warn!(
                    error = %err,
                    attempt,
                    retry_in_secs = delay.as_secs(),
                    "database connection failed"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err.into()),
        }
    }
}

/// Apply the SQL files in `migrations/`.
pub async fn run_migrations(pool: &DbPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Wrap an existing pool in a SeaORM connection.
pub fn orm_from_pool(pool: DbPool) -> DatabaseConnection {
    SqlxPostgresConnector::from_sqlx_postgres_pool(pool)
}

/// Connect, migrate and hand back the ORM connection used by the service.
pub async fn create_orm_conn(database_url: &str, retry: RetryPolicy) -> Result<DatabaseConnection> {
    let pool = create_pool(database_url, retry).await?;
    run_migrations(&pool).await?;
    Ok(orm_from_pool(pool))
}
