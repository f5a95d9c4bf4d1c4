//! Configuration module
//!
//! Runtime settings for the thumbnail service: listener, public URL pieces,
//! authentication, video repository and thumbnail storage.

use std::env;

use crate::models::VideoId;
use crate::storage_types::StorageBackend;

// Common constants
const SERVER_PORT: u16 = 8091;
const PUBLIC_HOST: &str = "localhost";
const MAX_CONNECTIONS: u32 = 10;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const MIN_JWT_SECRET_LEN: usize = 32;

/// Base configuration shared by every entrypoint
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub public_host: String,
    pub cors_origins: Vec<String>,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub jwt_secret: String,
    pub environment: String,
}

/// Thumbnail service configuration
#[derive(Clone, Debug)]
pub struct ThumbnailServiceConfig {
    pub base: BaseConfig,
    /// Postgres URL. When unset videos are kept in memory.
    pub database_url: Option<String>,
    pub storage_backend: StorageBackend,
    pub local_storage_path: Option<String>,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<ThumbnailServiceConfig>);

impl Config {
    fn as_service(&self) -> &ThumbnailServiceConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_env(&self.as_service().base.environment)
    }

    /// Load configuration from `.env` and the process environment
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Config(Box::new(ThumbnailServiceConfig::from_lookup(
            lookup,
        )?)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_service().validate()
    }

    // Convenience getters for common fields
    pub fn server_port(&self) -> u16 {
        self.as_service().base.server_port
    }

    pub fn public_host(&self) -> &str {
        &self.as_service().base.public_host
    }

    pub fn jwt_secret(&self) -> &str {
        &self.as_service().base.jwt_secret
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.as_service().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.as_service().base.environment
    }

    pub fn db_max_connections(&self) -> u32 {
        self.as_service().base.db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.as_service().base.db_timeout_seconds
    }

    pub fn database_url(&self) -> Option<&str> {
        self.as_service().database_url.as_deref()
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.as_service().storage_backend
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.as_service().local_storage_path.as_deref()
    }

    /// Public URL under which the thumbnail of `video_id` is served
    pub fn thumbnail_url(&self, video_id: &VideoId) -> String {
        format!(
            "http://{}:{}{}/{}",
            self.public_host(),
            self.server_port(),
            crate::constants::THUMBNAIL_ROUTE_PREFIX,
            video_id.to_path_segment()
        )
    }
}

fn is_production_env(environment: &str) -> bool {
    let environment = environment.to_lowercase();
    environment == "production" || environment == "prod"
}

impl ThumbnailServiceConfig {
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins_str = lookup("CORS_ORIGINS").unwrap_or_else(|| "*".to_string());
        if is_production_env(&environment) && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let base = BaseConfig {
            server_port: lookup("PORT")
                .unwrap_or_else(|| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            public_host: lookup("PUBLIC_HOST")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| PUBLIC_HOST.to_string()),
            cors_origins,
            db_max_connections: lookup("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: lookup("DB_TIMEOUT_SECONDS")
                .unwrap_or_else(|| CONNECTION_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            jwt_secret: lookup("JWT_SECRET")
                .ok_or_else(|| anyhow::anyhow!("JWT_SECRET must be set for authentication"))?,
            environment,
        };

        let storage_backend = match lookup("STORAGE_BACKEND") {
            Some(raw) => raw.parse::<StorageBackend>()?,
            None => StorageBackend::Memory,
        };

        Ok(ThumbnailServiceConfig {
            base,
            database_url: lookup("DATABASE_URL").filter(|s| !s.trim().is_empty()),
            storage_backend,
            local_storage_path: lookup("LOCAL_STORAGE_PATH").filter(|s| !s.trim().is_empty()),
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.base.jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(anyhow::anyhow!(
                "JWT_SECRET must be at least 32 characters long"
            ));
        }

        if let Some(url) = &self.database_url {
            if !(url.starts_with("postgresql://") || url.starts_with("postgres://")) {
                return Err(anyhow::anyhow!(
                    "DATABASE_URL must be a valid PostgreSQL connection string"
                ));
            }
        }

        if self.base.db_max_connections == 0 {
            return Err(anyhow::anyhow!("DB_MAX_CONNECTIONS must be greater than 0"));
        }

        if self.storage_backend == StorageBackend::Local && self.local_storage_path.is_none() {
            return Err(anyhow::anyhow!(
                "LOCAL_STORAGE_PATH must be set when using local storage backend"
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, anyhow::Error> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[("JWT_SECRET", SECRET)]).unwrap();
        assert_eq!(config.server_port(), 8091);
        assert_eq!(config.public_host(), "localhost");
        assert_eq!(config.storage_backend(), StorageBackend::Memory);
        assert_eq!(config.database_url(), None);
        assert_eq!(config.db_max_connections(), 10);
        assert_eq!(config.cors_origins(), &["*".to_string()]);
        assert!(!config.is_production());
        config.validate().unwrap();
    }

    #[test]
    fn test_missing_jwt_secret_fails() {
        let err = config_from(&[]).unwrap_err();
        assert!(err.to_string().contains("JWT_SECRET"));
    }

    #[test]
    fn test_short_jwt_secret_rejected() {
        let config = config_from(&[("JWT_SECRET", "short")]).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_port_rejected() {
        let err = config_from(&[("JWT_SECRET", SECRET), ("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_wildcard_cors_rejected_in_production() {
        let err = config_from(&[("JWT_SECRET", SECRET), ("ENVIRONMENT", "production")])
            .unwrap_err();
        assert!(err.to_string().contains("CORS_ORIGINS"));

        let config = config_from(&[
            ("JWT_SECRET", SECRET),
            ("APP_ENV", "prod"),
            ("CORS_ORIGINS", "https://a.example, https://b.example"),
        ])
        .unwrap();
        assert!(config.is_production());
        assert_eq!(config.cors_origins().len(), 2);
    }

    #[test]
    fn test_local_backend_requires_path() {
        let config = config_from(&[("JWT_SECRET", SECRET), ("STORAGE_BACKEND", "local")]).unwrap();
        assert!(config.validate().is_err());

        let config = config_from(&[
            ("JWT_SECRET", SECRET),
            ("STORAGE_BACKEND", "LOCAL"),
            ("LOCAL_STORAGE_PATH", "/var/lib/tubely"),
        ])
        .unwrap();
        config.validate().unwrap();
    }

    #[test]
    fn test_unknown_backend_rejected() {
        assert!(config_from(&[("JWT_SECRET", SECRET), ("STORAGE_BACKEND", "s3")]).is_err());
    }

    #[test]
    fn test_database_url_must_be_postgres() {
        let config = config_from(&[("JWT_SECRET", SECRET), ("DATABASE_URL", "mysql://db")]).unwrap();
        assert!(config.validate().is_err());

        let config = config_from(&[
            ("JWT_SECRET", SECRET),
            ("DATABASE_URL", "postgres://tubely@localhost/tubely"),
        ])
        .unwrap();
        config.validate().unwrap();
    }

    #[test]
    fn test_thumbnail_url() {
        let config = config_from(&[
            ("JWT_SECRET", SECRET),
            ("PORT", "9000"),
            ("PUBLIC_HOST", "media.internal"),
        ])
        .unwrap();
        assert_eq!(
            config.thumbnail_url(&VideoId::parse("vid-1").unwrap()),
            "http://media.internal:9000/upload/thumbnails/vid-1"
        );
        assert_eq!(
            config.thumbnail_url(&VideoId::parse("a/b c").unwrap()),
            "http://media.internal:9000/upload/thumbnails/a%2Fb%20c"
        );
    }
}
