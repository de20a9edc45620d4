//! Site configuration module.
//!
//! Handles loading and validating the site config file (`site.toml` by
//! default). The file is read once at startup; the validated result becomes the
//! process-wide [`SiteMetadata`](crate::metadata::SiteMetadata).
//!
//! ## Configuration Options
//!
//! ```toml
//! url = "https://www.example.com"   # required
//! path_prefix = "/"                 # site is served under this path
//! title = "Jane Doe"                # required
//! subtitle = "Notes on things"
//! copyright = "© All rights reserved."
//! posts_per_page = 4
//! disqus_shortname = ""            # passed through for post comments
//! google_analytics_id = ""          # gtag.js is emitted when set
//! ad_client = ""                    # AdSense script is emitted when set
//! use_katex = false
//! sidebar_embed = ""                # raw HTML placed verbatim in the sidebar
//!
//! [[menu]]
//! label = "Articles"
//! path = "/"
//!
//! [author]
//! name = "Jane Doe"
//! photo = "/photo.jpg"              # required
//! bio = "Writes things."
//!
//! [author.contacts]
//! email = "jane@example.com"
//! github = "janedoe"
//! ```
//!
//! ## Partial Configuration
//!
//! Every key except `url`, `title`, and `author.photo` has a default, so a
//! minimal config is three lines. Unknown keys are rejected to catch typos
//! early.

use crate::image_url::is_absolute_url;
use crate::types::{Author, MenuItem};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "site.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("missing required config field `{0}`")]
    MissingField(&'static str),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration as written in the config file.
///
/// Optional string settings use the empty string for "unset", matching how
/// authors leave them blank in the file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Base URL of the deployed site, e.g. `https://www.example.com`.
    pub url: String,
    /// Path under which the site is served. `/` for the domain root.
    pub path_prefix: String,
    pub title: String,
    pub subtitle: String,
    pub copyright: String,
    /// Posts per listing page.
    pub posts_per_page: u32,
    pub disqus_shortname: String,
    pub google_analytics_id: String,
    /// AdSense publisher id (`ca-pub-…`).
    pub ad_client: String,
    pub use_katex: bool,
    /// Pre-rendered third-party HTML for the sidebar. Not sanitized.
    pub sidebar_embed: String,
    pub menu: Vec<MenuItem>,
    pub author: Author,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            path_prefix: "/".to_string(),
            title: String::new(),
            subtitle: String::new(),
            copyright: "© All rights reserved.".to_string(),
            posts_per_page: 4,
            disqus_shortname: String::new(),
            google_analytics_id: String::new(),
            ad_client: String::new(),
            use_katex: false,
            sidebar_embed: String::new(),
            menu: Vec::new(),
            author: Author::default(),
        }
    }
}

impl SiteConfig {
    /// Check required fields are present and values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require("url", &self.url)?;
        require("title", &self.title)?;
        require("author.photo", &self.author.photo)?;

        if !is_absolute_url(self.url.trim()) {
            return Err(ConfigError::Validation(format!(
                "url must start with http:// or https:// (got \"{}\")",
                self.url
            )));
        }
        if !self.path_prefix.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "path_prefix must start with '/' (got \"{}\")",
                self.path_prefix
            )));
        }
        if self.posts_per_page == 0 {
            return Err(ConfigError::Validation(
                "posts_per_page must be at least 1".into(),
            ));
        }
        for (i, item) in self.menu.iter().enumerate() {
            if item.label.trim().is_empty() || item.path.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "menu[{i}] needs both a label and a path"
                )));
            }
        }
        Ok(())
    }
}

fn require(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        Err(ConfigError::MissingField(field))
    } else {
        Ok(())
    }
}

/// Parse and validate config file contents.
pub fn parse_config(content: &str) -> Result<SiteConfig, ConfigError> {
    let config: SiteConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load and validate the config file at `path`.
///
/// A missing file is an error: the site cannot be described without one.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Returns a fully-commented stock `site.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Site configuration
# ==================
# `url`, `title`, and `author.photo` are required. Everything else is optional
# and shows its default below. Unknown keys cause an error.

# Base URL of the deployed site. Used to build absolute social image URLs.
url = "https://www.example.com"

# Path the site is served under. Keep "/" when serving from the domain root.
path_prefix = "/"

title = "Jane Doe"
subtitle = "Notes on software and the night sky"
copyright = "© All rights reserved."

# Posts per listing page.
posts_per_page = 4

# Leave blank to disable.
disqus_shortname = ""
google_analytics_id = ""
ad_client = ""

use_katex = false

# Raw HTML placed verbatim in the sidebar (e.g. a donation button).
# It is NOT sanitized: only paste markup you trust.
sidebar_embed = ""

# ---------------------------------------------------------------------------
# Navigation menu, shown in this order
# ---------------------------------------------------------------------------
[[menu]]
label = "Articles"
path = "/"

[[menu]]
label = "About me"
path = "/pages/about"

# ---------------------------------------------------------------------------
# Author
# ---------------------------------------------------------------------------
[author]
name = "Jane Doe"
# Site-relative path or absolute URL. Default social preview image.
photo = "/photo.jpg"
bio = "Notes on software and the night sky"

# Contact handles. Blank entries are hidden. Display order is fixed:
# email, facebook, telegram, twitter, github, rss, vkontakte, linkedin,
# instagram, line, gitlab, weibo, codepen, youtube.
[author.contacts]
email = "jane@example.com"
facebook = ""
telegram = ""
twitter = "janedoe"
github = "janedoe"
rss = ""
vkontakte = ""
linkedin = ""
instagram = ""
line = ""
gitlab = ""
weibo = ""
codepen = ""
youtube = ""
"##
}
