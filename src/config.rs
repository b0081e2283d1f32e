//! Global configuration.
//!
//! Loaded from .screenctl.yml or ~/.config/screenctl/screenctl.yml

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::client::HttpClientConfig;
use crate::error::ScreenctlError;
use crate::site::{DEFAULT_CONFIG_FILE, SiteBuilder};

/// Global configuration for screenctl.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Remote service settings.
    pub server: ServerConfig,

    /// Site build settings.
    pub site: SiteConfig,
}

impl GlobalConfig {
    /// Load configuration with fallback chain.
    ///
    /// Search order:
    /// 1. Explicit path if provided
    /// 2. .screenctl.yml in current directory
    /// 3. ~/.config/screenctl/screenctl.yml
    /// 4. Defaults
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        for candidate in Self::candidate_paths() {
            if !candidate.exists() {
                continue;
            }
            match Self::load_from_file(&candidate) {
                Ok(config) => {
                    log::info!("Loaded config from {}", candidate.display());
                    return Ok(config);
                }
                Err(e) => log::warn!("Skipping {}: {:#}", candidate.display(), e),
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Implicit config locations, most specific first
    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(".screenctl.yml")];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("screenctl").join("screenctl.yml"));
        }
        paths
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> crate::Result<()> {
        if self.server.url.trim().is_empty() {
            return Err(ScreenctlError::Config("server.url must not be empty".to_string()));
        }
        if self.server.timeout_ms == 0 {
            return Err(ScreenctlError::Config("server.timeout-ms must be > 0".to_string()));
        }
        Ok(())
    }

    /// Site builder configured from the `site` section
    pub fn site_builder(&self) -> SiteBuilder {
        SiteBuilder::new(self.site.index_titles.clone(), self.site.config_file.clone())
    }

    /// HTTP client settings, reading the API key from the environment
    pub fn http_config(&self) -> HttpClientConfig {
        let api_key = std::env::var(&self.server.api_key_env).ok().filter(|k| !k.is_empty());
        if api_key.is_none() {
            log::debug!("{} not set, connecting without credentials", self.server.api_key_env);
        }
        HttpClientConfig::new(self.server.url.clone())
            .with_api_key(api_key)
            .with_timeout(Duration::from_millis(self.server.timeout_ms))
    }
}

/// Remote service settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Endpoint of the tool server.
    pub url: String,

    /// Environment variable holding the API key.
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// Request timeout in milliseconds.
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:3000/mcp".to_string(),
            api_key_env: "SCREENCTL_API_KEY".to_string(),
            timeout_ms: 30_000,
        }
    }
}

/// Site build settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Route table file name.
    #[serde(rename = "config-file")]
    pub config_file: String,

    /// Screen titles served at `/`.
    #[serde(rename = "index-titles")]
    pub index_titles: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            config_file: DEFAULT_CONFIG_FILE.to_string(),
            index_titles: vec!["home".to_string(), "index".to_string(), "landing".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = GlobalConfig::default();
        assert_eq!(config.server.url, "http://127.0.0.1:3000/mcp");
        assert_eq!(config.server.timeout_ms, 30_000);
        assert_eq!(config.site.config_file, "site-config.json");
        assert_eq!(config.site.index_titles.len(), 3);
    }

    #[test]
    fn test_config_validation() {
        let config = GlobalConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_config() {
        let config = GlobalConfig {
            server: ServerConfig {
                timeout_ms: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = GlobalConfig {
            server: ServerConfig {
                url: " ".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("server.url"));
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
server:
  url: https://screens.internal/mcp
  timeout-ms: 5000
site:
  index-titles: [start]
"#;
        let config: GlobalConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.server.url, "https://screens.internal/mcp");
        assert_eq!(config.server.timeout_ms, 5000);
        assert_eq!(config.site.index_titles, vec!["start".to_string()]);
        // Other fields should have defaults
        assert_eq!(config.server.api_key_env, "SCREENCTL_API_KEY");
        assert_eq!(config.site.config_file, "site-config.json");
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.yml");
        fs::write(&path, "site:\n  config-file: routes.json\n").unwrap();

        let config = GlobalConfig::load(Some(&path)).unwrap();
        assert_eq!(config.site.config_file, "routes.json");
        assert_eq!(config.site_builder().config_file(), "routes.json");
    }

    #[test]
    fn test_candidate_order() {
        let paths = GlobalConfig::candidate_paths();
        assert_eq!(paths[0], PathBuf::from(".screenctl.yml"));
        assert!(paths.iter().skip(1).all(|p| p.ends_with("screenctl/screenctl.yml")));
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let path = PathBuf::from("/nonexistent/screenctl.yml");
        assert!(GlobalConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn test_http_config_timeout() {
        let config = GlobalConfig {
            server: ServerConfig {
                api_key_env: "SCREENCTL_TEST_UNSET_KEY".to_string(),
                timeout_ms: 1500,
                ..Default::default()
            },
            ..Default::default()
        };
        let http = config.http_config();
        assert_eq!(http.timeout, Duration::from_millis(1500));
        assert_eq!(http.url, "http://127.0.0.1:3000/mcp");
        assert!(http.api_key.is_none());
    }
}
