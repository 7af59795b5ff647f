//! Configuration management for video-service
//!
//! Each section is read from its own environment prefix (`APP_`, `VIDEO_`),
//! after loading a `.env` file if one exists.
use serde::{Deserialize, Serialize};
use thiserror::Error;
use video_core::AgeRestrictionCheck;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {prefix}* configuration: {source}")]
    Env {
        prefix: &'static str,
        #[source]
        source: envy::Error,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub videos: VideoConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_env")]
    pub env: String,
    /// Worker thread count; actix-web picks one per core when unset
    #[serde(default)]
    pub workers: Option<usize>,
    #[serde(default)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoConfig {
    #[serde(default)]
    pub age_restriction_check: AgeRestrictionCheck,
    /// Start with the sample video already in the store
    #[serde(default)]
    pub seed_sample: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            env: default_env(),
            workers: None,
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        Ok(Config {
            app: load_section("APP_")?,
            videos: load_section("VIDEO_")?,
        })
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.app.host.clone(), self.app.port)
    }
}

fn load_section<T>(prefix: &'static str) -> Result<T, ConfigError>
where
    T: serde::de::DeserializeOwned,
{
    envy::prefixed(prefix)
        .from_env::<T>()
        .map_err(|source| ConfigError::Env { prefix, source })
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_env() -> String {
    "development".to_string()
}
