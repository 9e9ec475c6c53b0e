#![warn(clippy::pedantic)]
// Gives warnings for every diesel::prelude::* import
#![allow(clippy::wildcard_imports)]
// Too subjective
#![allow(clippy::similar_names, clippy::too_many_lines)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::single_match_else)]
#![allow(clippy::manual_let_else)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::new_without_default)]

mod api;
mod app;
mod config;
mod dashboard;
mod db;
mod error;
mod model;
mod schema;
mod string;
mod time;

#[cfg(target_env = "musl")]
use mimalloc::MiMalloc;

#[cfg(target_env = "musl")]
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() {
    app::enable_tracing();
    if dashboard::enabled() {
        let result = match config::Config::load() {
            Ok(config) => dashboard::run(&config.dashboard).await,
            Err(err) => {
                tracing::error!("Could not load configuration. Details:\n{err}");
                std::process::exit(1);
            }
        };
        if let Err(err) = result {
            tracing::error!("Dashboard stopped unexpectedly: {}: {err}", error::ErrorKind::kind(&err));
            std::process::exit(1);
        }
        return;
    }

    let state = match app::initialize().await {
        Ok(state) => state,
        Err(err) => {
            tracing::error!("An error occurred during initialization. Details:\n{err}");
            std::process::exit(1);
        }
    };
    if let Err(err) = app::run(state).await {
        tracing::error!("Server stopped unexpectedly. Details:\n{err}");
        std::process::exit(1);
    }
}
