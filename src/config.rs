use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const CONFIG_FILE: &str = "site.yaml";

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct SiteConfig {
    pub site_url: String,
    pub title: String,
    pub description: Option<String>,
    pub hero: Option<Hero>,
    #[serde(default)]
    pub projects: Vec<Project>,

    /// Number of posts listed on the home page.
    #[serde(default = "default_recent_posts")]
    pub recent_posts: usize,
    #[serde(default = "default_highlight_theme")]
    pub highlight_theme: String,

    /// Relative to the source directory.
    #[serde(default = "default_posts_dir")]
    pub posts_dir: PathBuf,
    #[serde(default = "default_templates_dir")]
    pub templates_dir: PathBuf,

    pub feed: Option<FeedConfig>,
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct Hero {
    pub title: String,
    pub subtitle: Option<String>,
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct Project {
    pub title: String,
    pub summary: String,
    pub url: Option<String>,
}

/// Present when an RSS feed should be written. Missing fields fall back to the site's.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone, Default)]
pub struct FeedConfig {
    pub title: Option<String>,
    pub description: Option<String>,
    pub language: Option<String>,
}

fn default_recent_posts() -> usize {
    3
}

fn default_highlight_theme() -> String {
    "base16-ocean.dark".into()
}

fn default_posts_dir() -> PathBuf {
    PathBuf::from("_posts")
}

fn default_templates_dir() -> PathBuf {
    PathBuf::from("templates")
}

impl SiteConfig {
    pub fn from_yaml(source: &str) -> Result<Self> {
        serde_yaml::from_str(source).map_err(|err| Error::Config(err.to_string()))
    }

    /// Read `site.yaml` from a source directory.
    pub fn load(source_dir: &Path) -> Result<Self> {
        let path = source_dir.join(CONFIG_FILE);
        let source = std::fs::read_to_string(&path)
            .map_err(|err| Error::Config(format!("cannot read {}: {}", path.display(), err)))?;

        Self::from_yaml(&source)
    }

    pub fn post_url(&self, slug: &str) -> String {
        format!("{}/{}/", self.site_url.trim_end_matches('/'), slug)
    }
}
