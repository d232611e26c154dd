use anyhow::{Context, Result};

const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub port: u16,
    pub rust_log: String,
    /// Upload size cap enforced before extraction is attempted.
    pub max_upload_bytes: usize,
    /// Component score above which a strength line is reported.
    pub strong_score_threshold: f64,
    /// Component score below which a suggestion line is reported.
    pub weak_score_threshold: f64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            db_max_connections: parse_env("DB_MAX_CONNECTIONS", 10)?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            strong_score_threshold: parse_env("STRONG_SCORE_THRESHOLD", 75.0)?,
            weak_score_threshold: parse_env("WEAK_SCORE_THRESHOLD", 50.0)?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value: u32 = parse_env("RESUMATCH_TEST_UNSET_VAR", 10).unwrap();
        assert_eq!(value, 10);
    }

    #[test]
    fn test_parse_env_reads_and_parses() {
        std::env::set_var("RESUMATCH_TEST_POOL_SIZE", "25");
        let value: u32 = parse_env("RESUMATCH_TEST_POOL_SIZE", 10).unwrap();
        assert_eq!(value, 25);
        std::env::remove_var("RESUMATCH_TEST_POOL_SIZE");
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("RESUMATCH_TEST_BAD_PORT", "not-a-number");
        let result: Result<u16> = parse_env("RESUMATCH_TEST_BAD_PORT", 8080);
        assert!(result.is_err());
        std::env::remove_var("RESUMATCH_TEST_BAD_PORT");
    }
}
