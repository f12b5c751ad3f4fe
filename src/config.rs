// src/config.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::info;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Backend connection settings. `JOBS_API_URL` wins when set; otherwise
/// the environment-keyed section of `config.yaml` is used.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    local: ClientConfig,
    production: ClientConfig,
}

impl ClientConfig {
    /// Load configuration based on environment
    pub fn load() -> Result<Self> {
        if let Ok(base_url) = std::env::var("JOBS_API_URL") {
            let timeout_seconds = std::env::var("JOBS_API_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS);
            return Ok(Self {
                base_url,
                timeout_seconds,
            });
        }

        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);
        Self::load_from_file(&environment)
    }

    fn get_environment() -> String {
        std::env::var("JOBSCOUT_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .or_else(|_| std::env::var("ENV"))
            .unwrap_or_else(|_| "local".to_string())
    }

    fn load_from_file(environment: &str) -> Result<Self> {
        let config_path = PathBuf::from("config.yaml");
        if !config_path.exists() {
            anyhow::bail!(
                "config.yaml not found and JOBS_API_URL is not set. The client cannot start without a backend URL."
            );
        }

        let config_content =
            std::fs::read_to_string(&config_path).context("Failed to read config.yaml")?;

        let config_file: ConfigFile =
            serde_yaml::from_str(&config_content).context("Failed to parse config.yaml")?;

        let config = match environment {
            "production" => config_file.production,
            _ => config_file.local,
        };

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_file() {
        let yaml = r#"
local:
  base_url: "http://localhost:5000"
production:
  base_url: "https://api.example.com"
  timeout_seconds: 60
"#;
        let parsed: ConfigFile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(parsed.local.base_url, "http://localhost:5000");
        assert_eq!(parsed.local.timeout_seconds, DEFAULT_TIMEOUT_SECS);
        assert_eq!(parsed.production.timeout_seconds, 60);
    }
}
