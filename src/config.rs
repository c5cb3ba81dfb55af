//! Configuration parsing and validation for botlogd.

use serde::Deserialize;
use std::path::Path;

use crate::resolver::DEFAULT_INTERVAL_DAYS;

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub database: Option<DatabaseConfig>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "127.0.0.1:8080")
    #[serde(default = "default_listen")]
    pub listen: String,
}

fn default_listen() -> String {
    "127.0.0.1:8080".to_string()
}

/// Directory paths the service reads from.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the bot's `{YYYY-MM-DD}.log` files
    pub bot_log_dir: String,
    /// Directory holding the service's own `{YYYY-MM-DD}.log` files
    pub service_log_dir: String,
    /// Directory holding the `ListUsers.txt` snapshot
    pub user_list_dir: String,
    /// Days used to synthesize a missing range bound
    #[serde(default = "default_interval_days")]
    pub default_interval_days: i64,
}

fn default_interval_days() -> i64 {
    DEFAULT_INTERVAL_DAYS
}

/// Database configuration. Absent section means file-only mode.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the bot's SQLite database file
    pub path: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            source: e,
        })?;

        Self::parse_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("storage.bot_log_dir", &self.storage.bot_log_dir),
            ("storage.service_log_dir", &self.storage.service_log_dir),
            ("storage.user_list_dir", &self.storage.user_list_dir),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("'{}' must not be empty", name)));
            }
        }

        if self.storage.default_interval_days <= 0 {
            return Err(ConfigError::Validation(
                "'storage.default_interval_days' must be positive".to_string(),
            ));
        }

        if let Some(db) = &self.database {
            if db.path.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "'database.path' must not be empty when a [database] section is present"
                        .to_string(),
                ));
            }
        } else {
            tracing::warn!("No database configured - stats will report zero defaults");
        }

        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config() {
        let toml = r#"
            [server]
            listen = "127.0.0.1:9000"

            [storage]
            bot_log_dir = "/var/log/bot"
            service_log_dir = "/var/log/botlogd"
            user_list_dir = "/var/lib/bot"
        "#;

        let config = Config::parse_str(toml).unwrap();
        assert_eq!(config.server.listen, "127.0.0.1:9000");
        assert_eq!(config.storage.bot_log_dir, "/var/log/bot");
        assert_eq!(config.storage.default_interval_days, 21);
        assert!(config.database.is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            [server]
            listen = "0.0.0.0:8080"

            [storage]
            bot_log_dir = "/var/log/bot"
            service_log_dir = "/var/log/botlogd"
            user_list_dir = "/var/lib/bot"
            default_interval_days = 7

            [database]
            path = "./bot.db"

            [logging]
            level = "debug"
        "#;

        let config = Config::parse_str(toml).unwrap();
        assert_eq!(config.storage.default_interval_days, 7);
        assert_eq!(config.database.unwrap().path, "./bot.db");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_listen_defaults_when_omitted() {
        let toml = r#"
            [server]

            [storage]
            bot_log_dir = "/a"
            service_log_dir = "/b"
            user_list_dir = "/c"
        "#;

        let config = Config::parse_str(toml).unwrap();
        assert_eq!(config.server.listen, "127.0.0.1:8080");
    }

    #[test]
    fn test_empty_directory_rejected() {
        let toml = r#"
            [server]
            listen = "127.0.0.1:9000"

            [storage]
            bot_log_dir = ""
            service_log_dir = "/var/log/botlogd"
            user_list_dir = "/var/lib/bot"
        "#;

        let err = Config::parse_str(toml).unwrap_err();
        assert!(err.to_string().contains("bot_log_dir"));
    }

    #[test]
    fn test_missing_storage_section_rejected() {
        let toml = r#"
            [server]
            listen = "127.0.0.1:9000"
        "#;

        assert!(Config::parse_str(toml).is_err());
    }

    #[test]
    fn test_non_positive_interval_rejected() {
        let toml = r#"
            [server]
            listen = "127.0.0.1:9000"

            [storage]
            bot_log_dir = "/a"
            service_log_dir = "/b"
            user_list_dir = "/c"
            default_interval_days = 0
        "#;

        let err = Config::parse_str(toml).unwrap_err();
        assert!(err.to_string().contains("default_interval_days"));
    }

    #[test]
    fn test_empty_database_path_rejected() {
        let toml = r#"
            [server]
            listen = "127.0.0.1:9000"

            [storage]
            bot_log_dir = "/a"
            service_log_dir = "/b"
            user_list_dir = "/c"

            [database]
            path = ""
        "#;

        let err = Config::parse_str(toml).unwrap_err();
        assert!(err.to_string().contains("database.path"));
    }
}
