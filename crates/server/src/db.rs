use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::vector_store::StoreError;

/// Create a PostgreSQL connection pool and run migrations (which also
/// enable the `vector` extension).
pub async fn init_pg_pool(config: &docrag_core::config::PostgresConfig) -> Result<PgPool, StoreError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url())
        .await?;
    info!("PostgreSQL connected: {}:{}/{}", config.host, config.port, config.database);

    sqlx::migrate!("../../migrations").run(&pool).await?;
    info!("Database migrations applied successfully");

    Ok(pool)
}
