mod client;
mod input;
mod view;

use crate::config::DashboardConfig;
use crate::dashboard::client::ApiClient;
use crate::dashboard::input::Command;
use crate::dashboard::view::Dashboard;
use thiserror::Error;
use tokio::runtime::Handle;
use url::Url;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Failed to fetch data from server")]
    FailedFetch,
    #[error("API url {0} cannot be used as a base url")]
    InvalidUrl(Url),
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error(transparent)]
    Request(#[from] reqwest::Error),
}

pub fn enabled() -> bool {
    std::env::args().any(|arg| arg == "--dashboard")
}

/// Runs the interactive dashboard until the user exits. Data is fetched once on start and
/// again on every `refresh`.
pub async fn run(config: &DashboardConfig) -> Result<(), DashboardError> {
    let client = ApiClient::new(config.api_url.clone());
    let runtime = Handle::current();
    tokio::task::spawn_blocking(move || command_loop(&client, &runtime))
        .await
        .unwrap_or_else(|err| std::panic::resume_unwind(err.into_panic()))
}

fn command_loop(client: &ApiClient, runtime: &Handle) -> Result<(), DashboardError> {
    print_info(client);
    let mut editor = input::create_editor()?;
    let mut dashboard = Dashboard::default();
    refresh(&mut dashboard, client, runtime);

    loop {
        let command = input::read_command(&mut editor)?;
        if let Some(tab) = command.tab() {
            dashboard.select(tab);
            println!("{}", dashboard.render());
            continue;
        }
        match command {
            Command::Refresh => refresh(&mut dashboard, client, runtime),
            Command::Help => print_info(client),
            Command::Clear => {
                editor.clear_screen().ok();
            }
            Command::Exit => return Ok(()),
            Command::Users | Command::Cities | Command::Events => {}
        }
    }
}

fn refresh(dashboard: &mut Dashboard, client: &ApiClient, runtime: &Handle) {
    println!("Loading data...");
    dashboard.apply(runtime.block_on(client.fetch_all()));
    println!("{}", dashboard.render());
}

fn print_info(client: &ApiClient) {
    println!("Event Management Dashboard ({})", client.base_url());
    println!("Available commands: {:?}\n", Command::names());
}
