/// Server configuration
use crate::error::{Result, ServerError};
use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use users_storage::PoolSettings;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_database")]
    pub database: DatabaseSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub environment: Environment,

    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,

    /// Directory holding the web UI; `None` disables static file serving
    #[serde(default = "default_web_dir")]
    pub web_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseSettings {
    #[serde(default = "default_database_url")]
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,

    #[serde(default = "default_busy_timeout_secs")]
    pub busy_timeout_secs: u64,
}

/// Deployment mode; decides how much fault detail reaches clients
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ServerConfig {
    /// Load configuration, layering in order:
    ///
    /// 1. built-in defaults
    /// 2. the config file (`path`, or `config.toml` when it exists)
    /// 3. `USERS_*` environment variables (`USERS_DATABASE__URL`, ...)
    /// 4. `PORT` and `APP_ENV`
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from("config.toml");
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings
            .add_source(
                config::Environment::with_prefix("USERS")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.port", std::env::var("PORT").ok())
            .and_then(|s| {
                s.set_override_option("server.environment", std::env::var("APP_ENV").ok())
            })
            .map_err(|e| ServerError::Config(e.to_string()))?;

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.database.url.trim().is_empty() {
            return Err(ServerError::Config(
                "Database URL is required (set USERS_DATABASE__URL)".to_string(),
            ));
        }

        if self.database.max_connections == 0 {
            return Err(ServerError::Config(
                "database.max_connections must be at least 1".to_string(),
            ));
        }

        self.server.cors_origins()?;

        Ok(())
    }

    /// Pool settings derived from the `[database]` section
    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_connections: self.database.max_connections,
            acquire_timeout: Duration::from_secs(self.database.acquire_timeout_secs),
            busy_timeout: Duration::from_secs(self.database.busy_timeout_secs),
        }
    }
}

impl ServerSettings {
    /// Allowed CORS origins as header values
    pub fn cors_origins(&self) -> Result<Vec<HeaderValue>> {
        self.allowed_origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|_| {
                    ServerError::Config(format!("Invalid CORS origin: {:?}", origin))
                })
            })
            .collect()
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
        environment: Environment::default(),
        allowed_origins: default_allowed_origins(),
        web_dir: default_web_dir(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://127.0.0.1:3000".to_string(),
        "http://localhost:5500".to_string(),
        "http://127.0.0.1:5500".to_string(),
    ]
}

fn default_web_dir() -> Option<PathBuf> {
    Some(PathBuf::from("./web"))
}

fn default_database() -> DatabaseSettings {
    DatabaseSettings {
        url: default_database_url(),
        max_connections: default_max_connections(),
        acquire_timeout_secs: default_acquire_timeout_secs(),
        busy_timeout_secs: default_busy_timeout_secs(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/users.db".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_acquire_timeout_secs() -> u64 {
    60
}

fn default_busy_timeout_secs() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            database: default_database(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.server.allowed_origins.len(), 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.toml");
        std::fs::write(
            &path,
            r#"
[server]
port = 8088
environment = "production"
allowed_origins = ["https://users.example.com"]

[database]
url = "sqlite://./test.db"
max_connections = 4
"#,
        )
        .unwrap();

        let config = ServerConfig::load_from(Some(&path)).unwrap();
        // PORT / APP_ENV may be set in the test environment
        if std::env::var("PORT").is_err() {
            assert_eq!(config.server.port, 8088);
        }
        if std::env::var("APP_ENV").is_err() {
            assert_eq!(config.server.environment, Environment::Production);
        }
        assert_eq!(config.database.max_connections, 4);
        assert_eq!(config.pool_settings().max_connections, 4);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = ServerConfig::default();
        config.database.max_connections = 0;
        assert!(config.validate().is_err());

        let mut config = ServerConfig::default();
        config.database.url = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = ServerConfig::default();
        config.server.allowed_origins = vec!["http://bad\norigin".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_environment_parsing() {
        let env: Environment = serde_json::from_str("\"production\"").unwrap();
        assert_eq!(env, Environment::Production);
        assert!(!env.is_development());
        assert_eq!(Environment::Development.to_string(), "development");
    }
}
