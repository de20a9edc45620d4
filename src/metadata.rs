//! Site metadata: the validated, read-only view of the site config.
//!
//! Every renderer (head, sidebar, layout) reads the same [`SiteMetadata`].
//! It is built once at startup and handed to consumers explicitly, either by
//! reference or through a [`MetadataProvider`] that shares one `Arc`. There is
//! no global lookup, so tests can fabricate metadata without any setup.
//!
//! ## From config to metadata
//!
//! Loading goes through [`SiteConfig::validate`](crate::config::SiteConfig::validate)
//! first, so a `SiteMetadata` always has a `url`, a `title`, and an author
//! photo. Optional string settings that authors leave blank in the file
//! become `None` here, and the sidebar embed is wrapped as an
//! [`EmbedFragment`] so its trust level travels with it.

use crate::config::{self, ConfigError, SiteConfig};
use crate::sidebar::EmbedFragment;
use crate::types::{Author, MenuItem};
use std::path::Path;
use std::sync::Arc;

/// Immutable snapshot of site-wide metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteMetadata {
    pub url: String,
    pub path_prefix: String,
    pub title: String,
    pub subtitle: String,
    pub copyright: String,
    pub posts_per_page: u32,
    pub menu: Vec<MenuItem>,
    pub author: Author,
    /// Comment-thread account for post pages. Stored for the content layer
    /// that renders comments; nothing in this crate emits it.
    pub disqus_shortname: Option<String>,
    pub google_analytics_id: Option<String>,
    pub ad_client: Option<String>,
    pub use_katex: bool,
    pub sidebar_embed: Option<EmbedFragment>,
}

impl SiteMetadata {
    /// Validate a parsed config and freeze it into metadata.
    pub fn from_config(config: SiteConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            url: config.url.trim().to_string(),
            path_prefix: config.path_prefix,
            title: config.title,
            subtitle: config.subtitle,
            copyright: config.copyright,
            posts_per_page: config.posts_per_page,
            menu: config.menu,
            author: config.author,
            disqus_shortname: non_blank(config.disqus_shortname),
            google_analytics_id: non_blank(config.google_analytics_id),
            ad_client: non_blank(config.ad_client),
            use_katex: config.use_katex,
            sidebar_embed: non_blank(config.sidebar_embed).map(EmbedFragment::from_untrusted),
        })
    }

    /// Load metadata from a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::from_config(config::load_config(path)?)
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Hands out the one shared [`SiteMetadata`] for a run.
///
/// Cloning the provider is cheap and every clone yields the same snapshot.
#[derive(Debug, Clone)]
pub struct MetadataProvider {
    inner: Arc<SiteMetadata>,
}

impl MetadataProvider {
    pub fn new(metadata: SiteMetadata) -> Self {
        Self {
            inner: Arc::new(metadata),
        }
    }

    /// Read the config file once and wrap the result.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        SiteMetadata::load(path).map(Self::new)
    }

    pub fn site_metadata(&self) -> Arc<SiteMetadata> {
        Arc::clone(&self.inner)
    }
}
