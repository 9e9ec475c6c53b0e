use crate::config::DatabaseConfig;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use tracing::{error, info};

pub type ConnectionPool = Pool<ConnectionManager<PgConnection>>;

/// Creates a bounded connection pool for the configured database.
///
/// Connections are opened on demand, so the pool can be created while the
/// database is unreachable. Requests made in that state fail once
/// `connection_timeout` elapses.
pub fn create_pool(config: &DatabaseConfig) -> Result<ConnectionPool, url::ParseError> {
    let manager = ConnectionManager::new(config.url()?);
    let pool = Pool::builder()
        .max_size(config.max_connections)
        .min_idle(Some(0))
        .connection_timeout(config.connection_timeout())
        .test_on_check_out(true)
        .build_unchecked(manager);
    Ok(pool)
}

/// Checks out a single connection and releases it, logging whether the database is reachable.
pub fn check_connection(pool: &ConnectionPool) -> Result<(), PoolError> {
    match pool.get() {
        Ok(_conn) => {
            info!("Database connected successfully");
            Ok(())
        }
        Err(err) => {
            error!("Database connection failed: {err}");
            Err(err)
        }
    }
}
