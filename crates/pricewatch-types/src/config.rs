//! Configuration types for Pricewatch.
//!
//! `PricewatchConfig` mirrors the optional `pricewatch.toml` file. Every field
//! has a default so an empty file (or no file at all) is valid; environment
//! variables are layered on top by `pricewatch-infra::config`.

use std::path::PathBuf;

use secrecy::SecretString;
use serde::Deserialize;

/// Top-level configuration shared by the REST service, the bot and the CLI.
#[derive(Debug, Default, Deserialize)]
pub struct PricewatchConfig {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub telegram: TelegramConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Relational store connection settings.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// sqlx connection URL, e.g. `sqlite://pricewatch.db?mode=rwc`.
    #[serde(default = "default_database_url")]
    pub url: String,

    /// Upper bound on pooled connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_database_url() -> String {
    "sqlite://pricewatch.db?mode=rwc".to_string()
}

fn default_max_connections() -> u32 {
    8
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
        }
    }
}

/// REST listener settings.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Telegram bot credentials.
#[derive(Debug, Default, Deserialize)]
pub struct TelegramConfig {
    /// Bot API token from @BotFather. Required only by `pricewatch bot`.
    #[serde(default, deserialize_with = "deserialize_secret")]
    pub bot_token: Option<SecretString>,
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.is_empty()).map(SecretString::from))
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    /// Bridge tracing spans to the OpenTelemetry stdout exporter.
    #[serde(default)]
    pub otel: bool,

    /// Also append log events to this file.
    #[serde(default)]
    pub file: Option<PathBuf>,
}
