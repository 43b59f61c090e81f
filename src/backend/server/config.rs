//! Server Configuration
//!
//! Environment-driven configuration. Unlike optional services, the database
//! is required: a social network with no datastore cannot serve a single
//! request, so a missing or unreachable `DATABASE_URL` fails startup
//! instead of degrading.

use sqlx::PgPool;

/// Load and initialize the database connection pool.
///
/// Reads `DATABASE_URL`, connects, and runs migrations from the crate's
/// `migrations/` directory. Migration failures are logged but do not abort
/// startup; they usually mean the schema is already in place.
pub async fn load_database() -> Result<PgPool, sqlx::Error> {
    let database_url = std::env::var("DATABASE_URL").map_err(|_| {
        sqlx::Error::Configuration("DATABASE_URL environment variable is not set".into())
    })?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;
    tracing::info!("Database connection pool created");

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => tracing::info!("Database migrations completed"),
        Err(e) => {
            tracing::warn!("Migration run failed (schema may already exist): {:?}", e);
        }
    }

    Ok(pool)
}

/// Root directory for uploaded media, from `MEDIA_DIR` (default `uploads`)
pub fn media_root() -> String {
    std::env::var("MEDIA_DIR").unwrap_or_else(|_| "uploads".to_string())
}

/// HTTP port, from `SERVER_PORT` (default 3000)
pub fn server_port() -> u16 {
    std::env::var("SERVER_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000)
}
