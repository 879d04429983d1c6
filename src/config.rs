//! Configuration module
//!
//! Loads a TOML file (default `~/.config/fleetease-prebook/config.toml`,
//! overridable via the `PREBOOK_CONFIG` env var). Every field has a
//! default so a missing or partial file still yields a working config.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSection,
    pub logging: LoggingConfig,
    pub sweeper: SweeperConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address for the REST API
    pub api_host: String,
    /// Port for the REST API
    pub api_port: u16,
    /// Seconds to wait for in-flight work during shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_host: "0.0.0.0".to_string(),
            api_port: 8080,
            shutdown_timeout: 30,
        }
    }
}

/// Database settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    /// SeaORM connection URL
    pub url: String,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: "sqlite://./prebook.db?mode=rwc".to_string(),
        }
    }
}

impl DatabaseSection {
    /// Connection URL, with a `DATABASE_URL` env override winning
    /// over the config file.
    pub fn connection_url(&self) -> String {
        std::env::var("DATABASE_URL").unwrap_or_else(|_| self.url.clone())
    }
}

/// Logging settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing filter when RUST_LOG is not set
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Stale-lock sweeper settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SweeperConfig {
    /// Seconds between sweep passes
    pub check_interval_secs: u64,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            check_interval_secs: 60,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }
}

/// Default config file location: `<config dir>/fleetease-prebook/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fleetease-prebook")
        .join("config.toml")
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_section() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.api_host, "0.0.0.0");
        assert_eq!(cfg.server.api_port, 8080);
        assert_eq!(cfg.server.shutdown_timeout, 30);
        assert_eq!(cfg.database.url, "sqlite://./prebook.db?mode=rwc");
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.sweeper.check_interval_secs, 60);
    }

    #[test]
    fn full_file_parses() {
        let toml_content = r#"
[server]
api_host = "127.0.0.1"
api_port = 9090
shutdown_timeout = 5

[database]
url = "sqlite::memory:"

[logging]
level = "debug"

[sweeper]
check_interval_secs = 10
"#;
        let cfg: AppConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(cfg.server.api_host, "127.0.0.1");
        assert_eq!(cfg.server.api_port, 9090);
        assert_eq!(cfg.server.shutdown_timeout, 5);
        assert_eq!(cfg.database.url, "sqlite::memory:");
        assert_eq!(cfg.logging.level, "debug");
        assert_eq!(cfg.sweeper.check_interval_secs, 10);
    }

    #[test]
    fn partial_file_keeps_defaults_elsewhere() {
        let toml_content = r#"
[server]
api_port = 3000
"#;
        let cfg: AppConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(cfg.server.api_port, 3000);
        // untouched fields fall back to defaults
        assert_eq!(cfg.server.api_host, "0.0.0.0");
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.sweeper.check_interval_secs, 60);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = AppConfig::load(Path::new("/definitely/not/here.toml"));
        assert!(err.is_err());
    }
}
