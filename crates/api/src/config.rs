use std::fmt::Display;
use std::str::FromStr;

/// Output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable multi-field lines.
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    fn from_env_value(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Pretty
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8003`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long shutdown waits for the log workers to drain (default: `5`).
    pub shutdown_timeout_secs: u64,
    /// Capacity of the recommendation-log queue (default: `1024`).
    pub log_queue_capacity: usize,
    /// Number of recommendation-log worker tasks (default: `2`).
    pub log_workers: usize,
    /// Tracing output format (default: pretty).
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                             | Default                 |
    /// |-------------------------------------|-------------------------|
    /// | `HOST`                              | `0.0.0.0`               |
    /// | `RECOMMENDATIONS_PORT`              | `8003`                  |
    /// | `CORS_ORIGINS`                      | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`              | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS`             | `5`                     |
    /// | `RECOMMENDATION_LOG_QUEUE_CAPACITY` | `1024`                  |
    /// | `RECOMMENDATION_LOG_WORKERS`        | `2`                     |
    /// | `LOG_FORMAT`                        | `pretty`                |
    ///
    /// # Panics
    ///
    /// Panics if a numeric variable is set but does not parse.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let log_format = std::env::var("LOG_FORMAT")
            .map(|v| LogFormat::from_env_value(&v))
            .unwrap_or(LogFormat::Pretty);

        Self {
            host,
            port: env_or("RECOMMENDATIONS_PORT", 8003),
            cors_origins,
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30),
            shutdown_timeout_secs: env_or("SHUTDOWN_TIMEOUT_SECS", 5),
            log_queue_capacity: env_or::<usize>("RECOMMENDATION_LOG_QUEUE_CAPACITY", 1024).max(1),
            log_workers: env_or::<usize>("RECOMMENDATION_LOG_WORKERS", 2).max(1),
            log_format,
        }
    }
}

/// Database connection settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Full Postgres connection URL.
    pub url: String,
    /// Pool size (default: `20`).
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Load database settings from the environment.
    ///
    /// `DATABASE_URL` wins when set. Otherwise the URL is assembled from:
    ///
    /// | Env Var       | Default     |
    /// |---------------|-------------|
    /// | `DB_HOST`     | `localhost` |
    /// | `DB_PORT`     | `5432`      |
    /// | `DB_USER`     | `postgres`  |
    /// | `DB_PASSWORD` | (empty)     |
    /// | `DB_NAME`     | `mealplan`  |
    ///
    /// `DB_MAX_CONNECTIONS` (default `20`) sizes the pool.
    pub fn from_env() -> Self {
        let url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| {
                let host = std::env::var("DB_HOST").unwrap_or_else(|_| "localhost".into());
                let port: u16 = env_or("DB_PORT", 5432);
                let user = std::env::var("DB_USER").unwrap_or_else(|_| "postgres".into());
                let password = std::env::var("DB_PASSWORD").unwrap_or_default();
                let name = std::env::var("DB_NAME").unwrap_or_else(|_| "mealplan".into());
                build_database_url(&host, port, &user, &password, &name)
            });

        Self {
            url,
            max_connections: env_or("DB_MAX_CONNECTIONS", 20),
        }
    }
}

/// Assemble a `postgres://` URL from its parts.
pub fn build_database_url(host: &str, port: u16, user: &str, password: &str, name: &str) -> String {
    if password.is_empty() {
        format!("postgres://{user}@{host}:{port}/{name}")
    } else {
        format!("postgres://{user}:{password}@{host}:{port}/{name}")
    }
}

/// Read and parse `key`, falling back to `default` when unset.
fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} must be a valid value: {e}")),
        Err(_) => default,
    }
}
