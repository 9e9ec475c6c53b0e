use crate::api::{self, ApiError, ApiResult};
use crate::config::Config;
use crate::db::{self, ConnectionPool};
use axum::ServiceExt;
use axum::extract::Request;
use diesel::PgConnection;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tower::layer::Layer;
use tower_http::normalize_path::NormalizePathLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Process-wide resources shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub connection_pool: ConnectionPool,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, InitError> {
        let connection_pool = db::create_pool(&config.database)?;
        Ok(Self {
            config: Arc::new(config),
            connection_pool,
        })
    }

    /// Runs `query` on the blocking thread pool with a connection checked out of the pool.
    /// The connection is returned to the pool as soon as `query` finishes, whatever the outcome.
    pub async fn run_query<F, T, E>(&self, query: F) -> ApiResult<T>
    where
        F: FnOnce(&mut PgConnection) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        ApiError: From<E>,
    {
        let pool = self.connection_pool.clone();
        let task = tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            query(&mut *conn).map_err(ApiError::from)
        });
        match task.await {
            Ok(result) => result,
            Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
            Err(err) => Err(ApiError::BlockingTask(err)),
        }
    }
}

#[derive(Debug, Error)]
#[error(transparent)]
pub enum InitError {
    Config(#[from] config::ConfigError),
    DatabaseUrl(#[from] url::ParseError),
    Io(#[from] std::io::Error),
}

pub fn enable_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=debug,tower_http=debug", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Builds application state from configuration and probes the database.
/// An unreachable database is logged but does not prevent startup.
pub async fn initialize() -> Result<AppState, InitError> {
    let config = Config::load()?;
    let state = AppState::new(config)?;

    let pool = state.connection_pool.clone();
    if let Err(err) = tokio::task::spawn_blocking(move || db::check_connection(&pool)).await {
        tracing::warn!("Database connection check did not complete: {err}");
    }
    Ok(state)
}

pub async fn run(state: AppState) -> Result<(), InitError> {
    let address = format!("0.0.0.0:{}", state.config.port);
    let app = NormalizePathLayer::trim_trailing_slash().layer(api::routes(state));

    let listener = TcpListener::bind(address).await?;
    info!("Server running on http://{}", listener.local_addr()?);
    info!("API endpoints available at /api/users, /api/cities, /api/posts, /api/events");
    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to install signal handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Stopping server...");
}
