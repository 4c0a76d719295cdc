/// Configuration management for Cat Voting Service
///
/// Loads configuration from environment variables. `main` calls
/// `dotenvy::dotenv()` first so a local `.env` file is honoured.
use db_pool::env_utils::{parse_env_optional, parse_env_with_default, parse_flag};
use db_pool::DbConfig;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Service name used for logs, metrics labels and the health payload
pub const SERVICE_NAME: &str = "cat-voting-service";

/// The Cat API image search endpoint
pub const DEFAULT_CAT_API_URL: &str = "https://api.thecatapi.com/v1/images/search";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },

    #[error("Database configuration error: {0}")]
    Database(String),
}

/// Which `CatStore` implementation backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" | "in-memory" => Ok(StoreBackend::Memory),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(()),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// Persistence settings
    pub store: StoreConfig,
    /// External image provider settings
    pub cat_api: CatApiConfig,
}

/// Application settings
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
    pub log_format: LogFormat,
    /// Fixed seed for the name generator, for reproducible runs
    pub name_seed: Option<u64>,
}

/// Persistence settings
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Present only for the Postgres backend
    pub database: Option<DbConfig>,
    /// Run the idempotent DDL at startup
    pub ensure_schema: bool,
}

#[derive(Clone)]
pub struct CatApiConfig {
    pub url: String,
    pub api_key: Option<String>,
}

impl fmt::Debug for CatApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatApiConfig")
            .field("url", &self.url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

fn parse_enum<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match parse_env_optional::<String>(key) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        None => Ok(default),
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let app = AppConfig {
            env: parse_env_optional("APP_ENV").unwrap_or_else(|| "development".to_string()),
            host: parse_env_optional("APP_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_env_with_default("PORT", 8080),
            log_format: parse_enum("LOG_FORMAT", LogFormat::Text)?,
            name_seed: parse_env_optional("NAME_SEED"),
        };

        let backend = parse_enum("CAT_STORE", StoreBackend::Postgres)?;
        let database = match backend {
            StoreBackend::Postgres => {
                Some(DbConfig::from_env(SERVICE_NAME).map_err(ConfigError::Database)?)
            }
            StoreBackend::Memory => None,
        };
        let store = StoreConfig {
            backend,
            database,
            ensure_schema: parse_env_optional::<String>("DB_ENSURE_SCHEMA")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
        };

        let cat_api = CatApiConfig {
            url: parse_env_optional("CAT_API_URL")
                .unwrap_or_else(|| DEFAULT_CAT_API_URL.to_string()),
            api_key: parse_env_optional("CAT_API_KEY"),
        };

        Ok(Config {
            app,
            store,
            cat_api,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: &[&str] = &[
        "APP_ENV",
        "APP_HOST",
        "PORT",
        "LOG_FORMAT",
        "NAME_SEED",
        "CAT_STORE",
        "DB_ENSURE_SCHEMA",
        "CAT_API_URL",
        "CAT_API_KEY",
        "DATABASE_URL",
        "SERVER",
        "DATABASE",
    ];

    fn clear_env() {
        for key in VARS {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial_test::serial]
    fn test_default_values_with_memory_store() {
        clear_env();
        std::env::set_var("CAT_STORE", "memory");

        let config = Config::from_env().unwrap();

        assert_eq!(config.app.env, "development");
        assert_eq!(config.app.host, "0.0.0.0");
        assert_eq!(config.app.port, 8080);
        assert_eq!(config.app.log_format, LogFormat::Text);
        assert_eq!(config.app.name_seed, None);
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert!(config.store.database.is_none());
        assert!(!config.store.ensure_schema);
        assert_eq!(config.cat_api.url, DEFAULT_CAT_API_URL);
        assert!(config.cat_api.api_key.is_none());

        clear_env();
    }

    #[test]
    #[serial_test::serial]
    fn test_postgres_store_requires_connection_parameters() {
        clear_env();

        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::Database(_)));

        std::env::set_var("SERVER", "localhost");
        std::env::set_var("DATABASE", "cats");
        std::env::set_var("DB_ENSURE_SCHEMA", "true");
        let config = Config::from_env().unwrap();
        assert_eq!(config.store.backend, StoreBackend::Postgres);
        assert!(config.store.database.is_some());
        assert!(config.store.ensure_schema);

        clear_env();
    }

    #[test]
    #[serial_test::serial]
    fn test_invalid_store_backend() {
        clear_env();
        std::env::set_var("CAT_STORE", "sqlserver");

        match Config::from_env() {
            Err(ConfigError::InvalidValue { key, value }) => {
                assert_eq!(key, "CAT_STORE");
                assert_eq!(value, "sqlserver");
            }
            other => panic!("unexpected result: {:?}", other),
        }

        clear_env();
    }

    #[test]
    #[serial_test::serial]
    fn test_api_key_is_redacted() {
        clear_env();
        std::env::set_var("CAT_STORE", "memory");
        std::env::set_var("CAT_API_KEY", "live_abc123");
        std::env::set_var("NAME_SEED", "7");

        let config = Config::from_env().unwrap();
        assert_eq!(config.app.name_seed, Some(7));
        assert!(!format!("{:?}", config.cat_api).contains("live_abc123"));

        clear_env();
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("json".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!(" JSON ".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!("pretty".parse::<LogFormat>(), Ok(LogFormat::Text));
        assert_eq!("text".parse::<LogFormat>(), Ok(LogFormat::Text));
        assert!("yaml".parse::<LogFormat>().is_err());
    }

    #[test]
    #[serial_test::serial]
    fn test_log_format_from_env() {
        clear_env();
        std::env::set_var("CAT_STORE", "memory");
        std::env::set_var("LOG_FORMAT", "json");

        let config = Config::from_env().unwrap();
        assert_eq!(config.app.log_format, LogFormat::Json);

        std::env::set_var("LOG_FORMAT", "xml");
        match Config::from_env() {
            Err(ConfigError::InvalidValue { key, value }) => {
                assert_eq!(key, "LOG_FORMAT");
                assert_eq!(value, "xml");
            }
            other => panic!("unexpected result: {:?}", other),
        }

        clear_env();
    }
}
