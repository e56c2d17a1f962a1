//! Process configuration from the environment.

use std::str::FromStr;
use std::time::Duration;

/// Runtime configuration shared by the api and worker binaries.
///
/// Defaults target the compose topology (service hostnames `db` and
/// `redis`). Missing or malformed variables fall back to their defaults;
/// configuration never fails the process.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub redis_url: String,
    pub bind_addr: String,
    /// Submission text used when a request carries none.
    pub default_text: String,
    /// Pause after a worker processing error before the loop resumes.
    pub worker_backoff: Duration,
    /// Eager database connection attempts at startup.
    pub connect_attempts: u32,
    pub connect_retry_delay: Duration,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: env_or(
                "DATABASE_URL",
                "postgres://postgres:postgres@db:5432/postgres",
            ),
            redis_url: env_or("REDIS_URL", "redis://redis:6379/0"),
            bind_addr: env_or("BIND_ADDR", "0.0.0.0:8000"),
            default_text: env_or("APP_INPUT", "hello from docker compose"),
            worker_backoff: Duration::from_secs(env_parse("WORKER_BACKOFF_SECS", 1)),
            connect_attempts: env_parse("DB_CONNECT_ATTEMPTS", 5),
            connect_retry_delay: Duration::from_secs(env_parse("DB_CONNECT_RETRY_SECS", 3)),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    parse_or(std::env::var(key).ok(), default)
}

fn parse_or<T: FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_or_accepts_valid_values() {
        assert_eq!(parse_or(Some("7".to_string()), 1u32), 7);
        assert_eq!(parse_or(Some(" 12 ".to_string()), 1u64), 12);
    }

    #[test]
    fn parse_or_falls_back_on_missing_or_malformed() {
        assert_eq!(parse_or(None, 5u32), 5);
        assert_eq!(parse_or(Some("".to_string()), 5u32), 5);
        assert_eq!(parse_or(Some("three".to_string()), 5u32), 5);
        assert_eq!(parse_or(Some("-1".to_string()), 5u32), 5);
    }
}
