use config::{ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    pub database: DatabaseConfig,
    pub dashboard: DashboardConfig,
}

impl Config {
    /// Loads configuration from the built-in defaults, an optional `config.toml` in the working
    /// directory, and `EVENTS_`-prefixed environment variables, in increasing order of precedence.
    /// A `.env` file is read into the environment first if one exists.
    pub fn load() -> Result<Self, ConfigError> {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            return Err(ConfigError::Foreign(Box::new(err)));
        }

        config::Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Configuration consisting of built-in defaults only.
    #[cfg(test)]
    pub fn defaults() -> Result<Self, ConfigError> {
        config::Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
    pub connection_timeout_ms: u64,
}

impl DatabaseConfig {
    /// Connection url with the credentials and database name percent-encoded.
    pub fn url(&self) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&format!("postgres://{}:{}/", self.host, self.port))?;
        // Setters only fail for urls without a host, which the parse above rules out
        let _ = url.set_username(&self.user);
        let _ = url.set_password(Some(&self.password));
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.clear().push(&self.name);
        }
        Ok(url)
    }

    pub fn connection_timeout(&self) -> Duration {
        Duration::from_millis(self.connection_timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    pub api_url: Url,
}

const DEFAULT_CONFIG: &str = include_str!("../config.toml.dist");
const CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "EVENTS";
