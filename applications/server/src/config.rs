/// Server configuration
use crate::{
    error::{Result, ServerError},
    services::auth::MAX_ACCESS_TOKEN_MINUTES,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_auth")]
    pub auth: AuthSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Base URL used when handing out upload links. Falls back to the
    /// request's `Host` header when unset.
    #[serde(default)]
    pub public_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Directory uploads are written to and `/static` is served from
    #[serde(default = "default_media_dir")]
    pub media_dir: PathBuf,

    #[serde(default = "default_max_upload_mb")]
    pub max_upload_mb: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthSettings {
    #[serde(default)]
    pub jwt_secret: String,

    /// Lifetime of tokens minted by `/auth/token`
    #[serde(default = "default_access_token_expire_minutes")]
    pub access_token_expire_minutes: u64,

    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl ServerConfig {
    /// Load configuration from an optional file and the environment.
    ///
    /// Without an explicit path, `./config.toml` is read when present.
    /// Environment variables use the `MOON_` prefix and `__` between section
    /// and key, e.g. `MOON_AUTH__JWT_SECRET`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from("config.toml");
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("MOON")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.is_empty() {
            return Err(ServerError::Config(
                "JWT secret is required (set MOON_AUTH__JWT_SECRET)".to_string(),
            ));
        }

        if self.auth.access_token_expire_minutes == 0
            || self.auth.access_token_expire_minutes > MAX_ACCESS_TOKEN_MINUTES
        {
            return Err(ServerError::Config(format!(
                "access_token_expire_minutes must be between 1 and {}, got {}",
                MAX_ACCESS_TOKEN_MINUTES, self.auth.access_token_expire_minutes
            )));
        }

        if !(4..=31).contains(&self.auth.bcrypt_cost) {
            return Err(ServerError::Config(format!(
                "bcrypt_cost must be between 4 and 31, got {}",
                self.auth.bcrypt_cost
            )));
        }

        Ok(())
    }

    /// Request body limit in bytes, sized for uploads
    pub fn max_upload_bytes(&self) -> usize {
        self.storage.max_upload_mb * 1024 * 1024
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
        public_url: None,
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
        media_dir: default_media_dir(),
        max_upload_mb: default_max_upload_mb(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/moon.db".to_string()
}

fn default_media_dir() -> PathBuf {
    PathBuf::from("./data/media")
}

fn default_max_upload_mb() -> usize {
    50
}

fn default_auth() -> AuthSettings {
    AuthSettings {
        jwt_secret: String::new(),
        access_token_expire_minutes: default_access_token_expire_minutes(),
        bcrypt_cost: default_bcrypt_cost(),
    }
}

fn default_access_token_expire_minutes() -> u64 {
    30
}

fn default_bcrypt_cost() -> u32 {
    bcrypt::DEFAULT_COST
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            auth: default_auth(),
        }
    }
}
