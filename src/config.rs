//! Site configuration for the news update job.
//!
//! Every constant the pipeline depends on lives in [`SiteConfig`] and is
//! passed to the collection builder at construction. The defaults describe
//! the Gorla Minore municipal site; a YAML file can override any subset of
//! fields:
//!
//! ```yaml
//! listing_url: /novita
//! max_news: 50
//! home_count: 3
//! layout: anchors
//! fallback_layout: generic
//! ```

use crate::error::NewsError;
use crate::scrapers::layout::Layout;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, instrument};
use url::Url;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Origin every relative link and image is resolved against.
    pub base_url: String,
    /// Listing page to scrape; relative values are joined to `base_url`.
    pub listing_url: String,
    /// Maximum number of records in the feed.
    pub max_news: usize,
    /// Number of leading records tagged as home-page featured.
    pub home_count: usize,
    /// Feed file, overwritten on every successful run.
    pub output_path: PathBuf,
    /// Budget for the single listing fetch.
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Primary block-selection strategy.
    pub layout: Layout,
    /// Strategy tried when the primary one finds nothing.
    pub fallback_layout: Option<Layout>,
    /// Category used for home blocks without a label.
    pub home_category: String,
    /// Category used for listing blocks without a label.
    pub listing_category: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://comune.gorlaminore.va.it".to_string(),
            listing_url: "/novita".to_string(),
            max_news: 100,
            home_count: 5,
            output_path: PathBuf::from("news.json"),
            timeout_secs: 20,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            layout: Layout::Cards,
            fallback_layout: Some(Layout::Generic),
            home_category: "Avviso".to_string(),
            listing_category: "Informativa".to_string(),
        }
    }
}

impl SiteConfig {
    /// Parse a YAML document; missing fields keep their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, NewsError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load the configuration from `path`, or the defaults when no path is given.
    #[instrument(level = "info")]
    pub async fn load(path: Option<&Path>) -> Result<Self, NewsError> {
        match path {
            Some(path) => {
                let yaml = tokio::fs::read_to_string(path).await?;
                let config = Self::from_yaml(&yaml)?;
                info!(path = %path.display(), "Loaded configuration");
                Ok(config)
            }
            None => {
                info!("Using built-in configuration");
                Ok(Self::default())
            }
        }
    }

    pub fn base(&self) -> Result<Url, NewsError> {
        Ok(Url::parse(&self.base_url)?)
    }

    /// Absolute listing URL.
    pub fn listing(&self) -> Result<Url, NewsError> {
        Ok(self.base()?.join(&self.listing_url)?)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Primary layout followed by the fallback, if any and distinct.
    pub fn layouts(&self) -> Vec<Layout> {
        let mut layouts = vec![self.layout];
        if let Some(fallback) = self.fallback_layout {
            if fallback != self.layout {
                layouts.push(fallback);
            }
        }
        layouts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SiteConfig::default();
        assert_eq!(config.max_news, 100);
        assert_eq!(config.timeout(), Duration::from_secs(20));
        assert_eq!(config.output_path, PathBuf::from("news.json"));
        assert_eq!(
            config.listing().unwrap().as_str(),
            "https://comune.gorlaminore.va.it/novita"
        );
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = SiteConfig::from_yaml("max_news: 10\nhome_count: 2\nlayout: anchors\n").unwrap();
        assert_eq!(config.max_news, 10);
        assert_eq!(config.home_count, 2);
        assert_eq!(config.layout, Layout::Anchors);
        assert_eq!(config.base_url, "https://comune.gorlaminore.va.it");
        assert_eq!(config.fallback_layout, Some(Layout::Generic));
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(SiteConfig::from_yaml("").unwrap(), SiteConfig::default());
    }

    #[test]
    fn test_example_config_matches_defaults() {
        let config = SiteConfig::from_yaml(include_str!("../gorla_news.example.yaml")).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn test_invalid_yaml_is_config_error() {
        let err = SiteConfig::from_yaml("max_news: [1, 2").unwrap_err();
        assert!(matches!(err, NewsError::Config(_)));
    }

    #[test]
    fn test_absolute_listing_url_wins() {
        let config = SiteConfig {
            listing_url: "https://example.org/news".to_string(),
            ..SiteConfig::default()
        };
        assert_eq!(config.listing().unwrap().as_str(), "https://example.org/news");
    }

    #[test]
    fn test_layout_chain() {
        let mut config = SiteConfig::default();
        assert_eq!(config.layouts(), vec![Layout::Cards, Layout::Generic]);

        config.fallback_layout = None;
        assert_eq!(config.layouts(), vec![Layout::Cards]);

        config.layout = Layout::Generic;
        config.fallback_layout = Some(Layout::Generic);
        assert_eq!(config.layouts(), vec![Layout::Generic]);
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gorla_news.yaml");
        tokio::fs::write(&path, "output_path: out/feed.json\n").await.unwrap();

        let config = SiteConfig::load(Some(&path)).await.unwrap();
        assert_eq!(config.output_path, PathBuf::from("out/feed.json"));
    }

    #[tokio::test]
    async fn test_load_missing_file_is_io_error() {
        let err = SiteConfig::load(Some(Path::new("/nonexistent/gorla_news.yaml")))
            .await
            .unwrap_err();
        assert!(matches!(err, NewsError::Io(_)));
    }
}
