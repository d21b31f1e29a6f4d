//! Configuration loader for Pricewatch.
//!
//! Layers, lowest priority first: built-in defaults, an optional TOML file,
//! then environment variables. A `.env` file in the working directory is
//! loaded into the environment before variables are read.

use std::path::Path;

use pricewatch_types::config::PricewatchConfig;
use pricewatch_types::error::ConfigError;
use secrecy::SecretString;

/// Config file looked up when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "pricewatch.toml";

/// Load configuration from `path` (or [`DEFAULT_CONFIG_FILE`]) and the
/// process environment.
///
/// - An explicit `path` that cannot be read is an error.
/// - A missing default file is not an error; defaults are used.
/// - A file that fails to parse is an error.
pub fn load_config(path: Option<&Path>) -> Result<PricewatchConfig, ConfigError> {
    if let Err(err) = dotenvy::dotenv() {
        if !err.not_found() {
            tracing::warn!("Failed to load .env: {err}");
        }
    }

    let mut config = match path {
        Some(path) => read_file(path)?,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                read_file(default_path)?
            } else {
                tracing::debug!("No {DEFAULT_CONFIG_FILE} found, using defaults");
                PricewatchConfig::default()
            }
        }
    };

    apply_env(&mut config, |key| std::env::var(key).ok())?;
    Ok(config)
}

fn read_file(path: &Path) -> Result<PricewatchConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse_config(&content).map_err(|message| ConfigError::Parse {
        path: path.display().to_string(),
        message,
    })
}

/// Parse the TOML form of the configuration.
pub fn parse_config(content: &str) -> Result<PricewatchConfig, String> {
    toml::from_str(content).map_err(|e| e.to_string())
}

/// Overlay environment variables onto `config`.
///
/// `lookup` returns the value of a variable, if set. Empty values are
/// treated as unset.
pub fn apply_env<F>(config: &mut PricewatchConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(url) = get("PRICEWATCH_DATABASE_URL").or_else(|| get("DATABASE_URL")) {
        config.database.url = url;
    }
    if let Some(raw) = get("PRICEWATCH_DB_MAX_CONNECTIONS") {
        config.database.max_connections = parse_value("PRICEWATCH_DB_MAX_CONNECTIONS", &raw)?;
    }
    if let Some(host) = get("PRICEWATCH_HOST") {
        config.http.host = host;
    }
    if let Some(raw) = get("PRICEWATCH_PORT") {
        config.http.port = parse_value("PRICEWATCH_PORT", &raw)?;
    }
    if let Some(token) = get("BOT_TOKEN").or_else(|| get("TELOXIDE_TOKEN")) {
        config.telegram.bot_token = Some(SecretString::from(token));
    }
    if let Some(raw) = get("PRICEWATCH_OTEL") {
        config.logging.otel = parse_bool("PRICEWATCH_OTEL", &raw)?;
    }
    if let Some(path) = get("PRICEWATCH_LOG_FILE") {
        config.logging.file = Some(path.into());
    }
    Ok(())
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key: key.to_string(),
        message: e.to_string(),
    })
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("expected a boolean, got '{other}'"),
        }),
    }
}
