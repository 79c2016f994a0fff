use anyhow::Result;
use config::Config;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MAX_OCCURRENCES, DEFAULT_PROXY_USER_HEADER, MAX_OCCURRENCES_LIMIT};
use crate::error::{CoreError, CoreResult};
use crate::model::ClientRecord;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
    pub database: DatabaseConfig,
    pub booking: BookingConfig,
    #[serde(default)]
    pub directory: DirectoryConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
    SingleUser,
    Proxy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub method: AuthMethod,
    pub proxy: Option<ProxyAuthConfig>,
    pub single_user: Option<SingleUserAuthConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProxyAuthConfig {
    /// Trusted header carrying the authenticated user's email.
    pub header: Option<String>,
}

impl ProxyAuthConfig {
    #[must_use]
    pub fn header_name(&self) -> &str {
        self.header.as_deref().unwrap_or(DEFAULT_PROXY_USER_HEADER)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SingleUserAuthConfig {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    Memory,
    Postgres,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u8,
}

impl DatabaseConfig {
    /// ## Summary
    /// Returns the connection URL, which the postgres backend cannot run without.
    ///
    /// ## Errors
    /// Returns a configuration error if no URL was configured.
    pub fn require_url(&self) -> CoreResult<&str> {
        self.url
            .as_deref()
            .filter(|url| !url.is_empty())
            .ok_or_else(|| {
                CoreError::ConfigError(
                    "database.url is required when storage.backend = \"postgres\"".to_string(),
                )
            })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// ## Summary
    /// Returns the bind address in the format "host:port".
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// How the occurrence budget of a recurrence rule is consumed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OccurrenceBudget {
    /// Every attempted date counts, including dates skipped because of a conflict.
    #[default]
    Attempts,
    /// Only accepted instances count.
    Accepted,
}

/// How multi-record writes reach the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchMode {
    /// One all-or-nothing batch per operation.
    #[default]
    Atomic,
    /// One store call per record, no rollback of earlier calls.
    Sequential,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookingConfig {
    pub default_max_occurrences: u32,
    /// Upper bound on `max_occurrences`, and on any series bounded only by an end date.
    #[serde(default = "default_max_occurrences_limit")]
    pub max_occurrences_limit: u32,
    #[serde(default)]
    pub occurrence_budget: OccurrenceBudget,
    #[serde(default)]
    pub batch_mode: BatchMode,
}

const fn default_max_occurrences_limit() -> u32 {
    MAX_OCCURRENCES_LIMIT
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            default_max_occurrences: DEFAULT_MAX_OCCURRENCES,
            max_occurrences_limit: MAX_OCCURRENCES_LIMIT,
            occurrence_budget: OccurrenceBudget::default(),
            batch_mode: BatchMode::default(),
        }
    }
}

/// Seed data for the in-memory client and photographer registries.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectoryConfig {
    #[serde(default)]
    pub clients: Vec<ClientRecord>,
    #[serde(default)]
    pub photographers: Vec<String>,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from defaults, an optional `config.toml`, and `AGENDA_*`
    /// environment variables into a `Settings`. Environment variables take precedence.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8698)?
            .set_default("logging.level", "info")?
            .set_default("auth.method", "single_user")?
            .set_default("auth.single_user.name", "Studio")?
            .set_default("auth.single_user.email", "studio@localhost")?
            .set_default("storage.backend", "memory")?
            .set_default("database.max_connections", 4)?
            .set_default(
                "booking.default_max_occurrences",
                i64::from(DEFAULT_MAX_OCCURRENCES),
            )?
            .set_default(
                "booking.max_occurrences_limit",
                i64::from(MAX_OCCURRENCES_LIMIT),
            )?
            .set_default("booking.occurrence_budget", "attempts")?
            .set_default("booking.batch_mode", "atomic")?
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            // Env, e.g. AGENDA_DATABASE__URL
            .add_source(
                config::Environment::with_prefix("AGENDA")
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
