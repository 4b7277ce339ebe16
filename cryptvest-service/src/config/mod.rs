use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub common: core_config::Config,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Connection string. Never logged or echoed; only its presence is reported.
    pub url: Option<Secret<String>>,
    pub name: Option<String>,
    pub timeout_secs: u64,
}

impl DatabaseConfig {
    pub fn server_selection_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CorsConfig {
    /// Empty means every origin is allowed.
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
}

impl ServiceConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(ServiceConfig {
            common: common_config,
            database: DatabaseConfig {
                url: get_env("DATABASE_URL", is_prod)?.map(Secret::new),
                name: get_env("DATABASE_NAME", is_prod)?,
                timeout_secs: get_env("DATABASE_TIMEOUT_SECS", false)?
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(5),
            },
            cors: CorsConfig {
                allowed_origins: get_env("CORS_ALLOWED_ORIGINS", false)?
                    .map(|v| parse_origins(&v))
                    .unwrap_or_default(),
            },
            observability: ObservabilityConfig {
                log_level: get_env("LOG_LEVEL", false)?.unwrap_or_else(|| "info".to_string()),
                otlp_endpoint: get_env("OTLP_ENDPOINT", false)?,
            },
        })
    }
}

/// Reads an optional variable; blank values count as unset.
fn get_env(key: &str, required: bool) -> Result<Option<String>, AppError> {
    match env::var(key) {
        Ok(val) if !val.trim().is_empty() => Ok(Some(val)),
        _ if required => Err(AppError::ConfigError(anyhow::anyhow!(
            "{} is required in production but not set",
            key
        ))),
        _ => Ok(None),
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty() && *o != "*")
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_skips_blanks_and_wildcard() {
        assert_eq!(
            parse_origins("https://a.example, ,https://b.example,*"),
            vec!["https://a.example", "https://b.example"]
        );
        assert!(parse_origins("*").is_empty());
    }

    #[test]
    fn test_required_env_missing_is_config_error() {
        let result = get_env("CRYPTVEST_TEST_SURELY_UNSET_KEY", true);
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }

    #[test]
    fn test_optional_env_missing_is_none() {
        let result = get_env("CRYPTVEST_TEST_SURELY_UNSET_KEY", false);
        assert!(matches!(result, Ok(None)));
    }

    #[test]
    fn test_database_url_is_redacted_in_debug() {
        let database = DatabaseConfig {
            url: Some(Secret::new("mongodb://user:hunter2@db:27017".to_string())),
            name: Some("cryptvest".to_string()),
            timeout_secs: 5,
        };

        let rendered = format!("{:?}", database);
        assert!(!rendered.contains("hunter2"));
        assert_eq!(database.server_selection_timeout(), Duration::from_secs(5));
    }
}
