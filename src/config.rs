use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{AppError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_cms_url")]
    pub cms_url: String,

    pub cms_token: Option<String>,

    /// Base for relative media references. Falls back to `cms_url`.
    pub media_url: Option<String>,

    #[serde(default = "default_site_url")]
    pub site_url: String,

    #[serde(default = "default_lang")]
    pub default_lang: String,

    #[serde(default = "default_sidebar_limit")]
    pub sidebar_limit: usize,

    #[serde(default = "default_view_dwell_secs")]
    pub view_dwell_secs: u64,

    #[serde(default = "default_ad_placeholder")]
    pub ad_placeholder: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_cms_url() -> String {
    "http://localhost:1337".to_string()
}

fn default_site_url() -> String {
    "https://shottyodharaprotidin.com".to_string()
}

fn default_lang() -> String {
    "bn".to_string()
}

fn default_sidebar_limit() -> usize {
    5
}

fn default_view_dwell_secs() -> u64 {
    10
}

fn default_ad_placeholder() -> String {
    "/default.jpg".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cms_url: default_cms_url(),
            cms_token: None,
            media_url: None,
            site_url: default_site_url(),
            default_lang: default_lang(),
            sidebar_limit: default_sidebar_limit(),
            view_dwell_secs: default_view_dwell_secs(),
            ad_placeholder: default_ad_placeholder(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults there on first run.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("article-desk")
            .join("config.toml")
    }

    pub fn media_base(&self) -> &str {
        self.media_url.as_deref().unwrap_or(&self.cms_url)
    }

    pub fn view_dwell(&self) -> Duration {
        Duration::from_secs(self.view_dwell_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn validate(&self) -> Result<()> {
        url::Url::parse(&self.cms_url)
            .map_err(|e| AppError::Config(format!("cms_url '{}': {}", self.cms_url, e)))?;
        if self.sidebar_limit == 0 {
            return Err(AppError::Config("sidebar_limit must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();

        assert!(path.exists());
        assert_eq!(config.sidebar_limit, 5);
        assert_eq!(config.view_dwell_secs, 10);
        assert_eq!(config.ad_placeholder, "/default.jpg");
        assert_eq!(config.media_base(), "http://localhost:1337");
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "cms_url = \"https://cms.example.com\"\nmedia_url = \"https://cdn.example.com\"\nsidebar_limit = 3\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config.cms_url, "https://cms.example.com");
        assert_eq!(config.media_base(), "https://cdn.example.com");
        assert_eq!(config.sidebar_limit, 3);
        assert_eq!(config.default_lang, "bn");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn invalid_cms_url_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "cms_url = \"not a url\"\n").unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
