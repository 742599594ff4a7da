//! Application configuration
//!
//! All values are read once at process start from environment variables,
//! with a `.env` file loaded first if present. Nothing is re-read at
//! runtime.

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::store::{BackendType, StoreConfig};

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Listen port for the HTTP server
    #[serde(default = "default_port")]
    pub port: u16,

    /// Logical database name; the file backend uses it as a subdirectory
    #[serde(default = "default_db_name")]
    pub db_name: String,

    #[serde(default)]
    pub store: StoreConfig,

    /// Resend API key; email delivery is disabled when unset
    #[serde(default)]
    pub resend_api_key: Option<String>,

    /// Sender address for transactional emails
    #[serde(default = "default_sender_email")]
    pub sender_email: String,

    /// Allowed cross-origin hosts; `*` means permissive
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            db_name: default_db_name(),
            store: StoreConfig::default(),
            resend_api_key: None,
            sender_email: default_sender_email(),
            cors_origins: default_cors_origins(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the environment (and `.env` if present)
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| Error::config(format!("Invalid PORT value: {raw}")))?,
            Err(_) => default_port(),
        };

        let db_name = env::var("DB_NAME").unwrap_or_else(|_| default_db_name());

        let backend = match env::var("STORE_BACKEND").ok().as_deref() {
            None | Some("memory") => BackendType::Memory,
            Some("file") => BackendType::File,
            Some(other) => {
                return Err(Error::config(format!("Unknown STORE_BACKEND: {other}")));
            }
        };
        let base_dir = env::var("STORE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"))
            .join(&db_name);

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            port,
            db_name,
            store: StoreConfig { backend, base_dir },
            resend_api_key: env::var("RESEND_API_KEY").ok(),
            sender_email: env::var("SENDER_EMAIL").unwrap_or_else(|_| default_sender_email()),
            cors_origins,
        })
    }
}

fn default_port() -> u16 {
    8000
}

fn default_db_name() -> String {
    "xtrec".to_string()
}

fn default_sender_email() -> String {
    "onboarding@resend.dev".to_string()
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_usable() {
        let config = AppConfig::default();
        assert_eq!(config.port, 8000);
        assert_eq!(config.db_name, "xtrec");
        assert_eq!(config.store.backend, BackendType::Memory);
        assert!(config.resend_api_key.is_none());
        assert_eq!(config.cors_origins, vec!["*".to_string()]);
    }

    #[test]
    fn deserializes_partial_config() {
        let config: AppConfig = serde_json::from_str(
            r#"{"port": 9001, "store": {"backend": "file", "base_dir": "/tmp/xtrec"}}"#,
        )
        .unwrap();
        assert_eq!(config.port, 9001);
        assert_eq!(config.store.backend, BackendType::File);
        assert_eq!(config.sender_email, "onboarding@resend.dev");
    }
}
