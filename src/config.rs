use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub annict: AnnictConfig,

    pub anilist: AnilistConfig,

    pub myanimelist: MyAnimeListConfig,

    pub network: NetworkConfig,

    pub retry: RetryConfigSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    /// Maximum database connections (default: 5)
    pub max_db_connections: u32,

    /// Minimum database connections (default: 1)
    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/kiroku.db".to_string(),
            log_level: "info".to_string(),
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnictConfig {
    pub graphql_url: String,

    pub oauth_base_url: String,

    /// OAuth application credentials, created at annict.com/settings/apps.
    pub client_id: String,

    pub client_secret: String,

    pub redirect_uri: String,

    pub scope: String,
}

impl Default for AnnictConfig {
    fn default() -> Self {
        Self {
            graphql_url: "https://api.annict.com/graphql".to_string(),
            oauth_base_url: "https://api.annict.com".to_string(),
            client_id: String::new(),
            client_secret: String::new(),
            redirect_uri: "kiroku://oauth/callback".to_string(),
            scope: "read write".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnilistConfig {
    pub graphql_url: String,
}

impl Default for AnilistConfig {
    fn default() -> Self {
        Self {
            graphql_url: "https://graphql.anilist.co".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MyAnimeListConfig {
    pub base_url: String,

    /// Sent as the X-MAL-CLIENT-ID header on every request.
    pub client_id: String,
}

impl Default for MyAnimeListConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.myanimelist.net/v2".to_string(),
            client_id: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Request timeout in seconds (default: 30)
    pub request_timeout_seconds: u64,

    pub user_agent: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            request_timeout_seconds: 30,
            user_agent: crate::constants::USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfigSection {
    pub max_attempts: u32,

    pub initial_delay_ms: u64,

    pub max_delay_ms: u64,

    pub backoff_factor: f64,

    /// Overall deadline for a retried operation, in seconds. 0 disables it.
    pub overall_timeout_seconds: u64,
}

impl Default for RetryConfigSection {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay_ms: 500,
            max_delay_ms: 10_000,
            backoff_factor: 2.0,
            overall_timeout_seconds: 60,
        }
    }
}

impl RetryConfigSection {
    #[must_use]
    pub const fn overall_timeout(&self) -> Option<Duration> {
        if self.overall_timeout_seconds == 0 {
            None
        } else {
            Some(Duration::from_secs(self.overall_timeout_seconds))
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::default_config_path();
        self.save_to_path(&path)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("kiroku").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".kiroku").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.retry.max_attempts == 0 {
            anyhow::bail!("retry.max_attempts must be at least 1");
        }

        if self.retry.backoff_factor < 1.0 {
            anyhow::bail!("retry.backoff_factor must be >= 1.0");
        }

        if self.network.request_timeout_seconds == 0 {
            anyhow::bail!("network.request_timeout_seconds must be > 0");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.annict.redirect_uri, "kiroku://oauth/callback");
        assert_eq!(config.anilist.graphql_url, "https://graphql.anilist.co");
        assert_eq!(config.network.request_timeout_seconds, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[annict]"));
        assert!(toml_str.contains("[retry]"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [retry]
            max_attempts = 5
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.retry.max_attempts, 5);

        assert_eq!(config.annict.scope, "read write");
    }

    #[test]
    fn test_validate_rejects_zero_attempts() {
        let mut config = Config::default();
        config.retry.max_attempts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_shrinking_backoff() {
        let mut config = Config::default();
        config.retry.backoff_factor = 0.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overall_timeout_zero_disables() {
        let mut config = Config::default();
        config.retry.overall_timeout_seconds = 0;
        assert!(config.retry.overall_timeout().is_none());
        config.retry.overall_timeout_seconds = 60;
        assert_eq!(
            config.retry.overall_timeout(),
            Some(Duration::from_secs(60))
        );
    }
}
