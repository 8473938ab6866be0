use std::env;
use std::path::PathBuf;
use std::time::Duration;

use auth::TokenConfig;
use auth::TokenConfigError;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::inbound::http::router::HttpLimits;

/// Application configuration for image-service.
///
/// Loaded from configuration files with environment variable overrides.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    pub request_timeout_seconds: u64,
}

/// Token verification settings; must match the issuing auth-service.
#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub expiration_seconds: u64,
}

impl JwtConfig {
    pub fn token_config(&self) -> Result<TokenConfig, TokenConfigError> {
        TokenConfig::new(
            self.secret.as_bytes(),
            self.issuer.as_str(),
            Duration::from_secs(self.expiration_seconds),
        )
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("expiration_seconds", &self.expiration_seconds)
            .finish()
    }
}

/// Local image storage.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Existing directory uploaded files are written to
    pub path: PathBuf,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

impl Config {
    /// Load configuration from files with environment variable overrides.
    ///
    /// # Configuration Priority (highest to lowest)
    /// 1. Environment variables (DATABASE__URL, STORAGE__PATH, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(Environment::default().separator("__"))
            .build()?;

        configuration.try_deserialize()
    }

    pub fn http_limits(&self) -> HttpLimits {
        HttpLimits {
            request_timeout: Duration::from_secs(self.server.request_timeout_seconds),
            max_upload_bytes: self.storage.max_upload_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    const MINIMAL: &str = r#"
        [database]
        url = "postgresql://localhost/images"

        [server]
        http_port = 8081
        request_timeout_seconds = 5

        [jwt]
        secret = "s3cr3t-value"
        issuer = "imager"
        expiration_seconds = 60

        [storage]
        path = "/tmp/images"
    "#;

    fn parse(source: &str) -> Config {
        ConfigBuilder::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_storage_defaults() {
        let config = parse(MINIMAL);

        assert_eq!(config.storage.path, PathBuf::from("/tmp/images"));
        assert_eq!(config.storage.max_upload_bytes, 10 * 1024 * 1024);

        let limits = config.http_limits();
        assert_eq!(limits.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_jwt_secret_is_redacted() {
        let config = parse(MINIMAL);

        let debug = format!("{:?}", config.jwt);
        assert!(!debug.contains("s3cr3t-value"));
        assert!(debug.contains("<redacted>"));
        assert!(config.jwt.token_config().is_ok());
    }
}
