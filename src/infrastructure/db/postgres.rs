use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{info, warn};

use crate::settings::AppConfig;

const MAX_RETRY_WAIT: Duration = Duration::from_secs(30);

/// Connects with the pool limits from `config`, retrying startup failures
/// `db_connect_retries` times with a doubling wait capped at 30s.
pub async fn create_pool(config: &AppConfig) -> Result<PgPool, sqlx::Error> {
    let options = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(config.db_acquire_timeout());

    let mut wait = Duration::from_secs(1);
    let mut attempt = 0;

    loop {
        match options.clone().connect(&config.database_url).await {
            Ok(pool) => {
                info!(max_connections = config.db_max_connections, "Database pool ready");
                return Ok(pool);
            }
            Err(e) if attempt < config.db_connect_retries => {
                attempt += 1;
                warn!(
                    attempt,
                    retries = config.db_connect_retries,
                    error = %e,
                    "Database unavailable, retrying in {:?}",
                    wait
                );
                tokio::time::sleep(wait).await;
                wait = (wait * 2).min(MAX_RETRY_WAIT);
            }
            Err(e) => return Err(e),
        }
    }
}

/// Applies the migrations embedded from `./migrations`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations applied.");
    Ok(())
}

pub async fn check_connection(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_rt::test]
    async fn unreachable_database_fails_after_configured_retries() {
        let config = AppConfig {
            database_url: "postgres://poets@127.0.0.1:1/poets".into(),
            db_connect_retries: 0,
            db_acquire_timeout_secs: 1,
            ..Default::default()
        };

        let started = std::time::Instant::now();
        assert!(create_pool(&config).await.is_err());
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
