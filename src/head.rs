//! Document head composition: title, description, Open Graph, Twitter Card.
//!
//! [`compose_head`] turns site metadata plus one page's inputs into a
//! [`ResolvedHead`] value; [`render_head`] turns that value into markup. The
//! split keeps the decisions (which image, which card type) testable without
//! parsing HTML, and lets the `head` CLI command print the same value as JSON.
//!
//! ## Fixed choices
//!
//! - `og:site_name` carries the page title, not the site title. Social cards
//!   for an article therefore show the article name in the site slot.
//! - `twitter:card` is always `summary` (the compact card), never
//!   `summary_large_image`.
//! - `og:image` and `twitter:image` are always the same absolute URL, produced
//!   by [`ImageResolver`](crate::image_url::ImageResolver).

use crate::config::ConfigError;
use crate::image_url::ImageResolver;
use crate::metadata::SiteMetadata;
use maud::{Markup, html};
use serde::Serialize;

pub const TWITTER_CARD: &str = "summary";

/// Per-page head inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub title: String,
    pub description: Option<String>,
    /// Absolute URL or site-relative path. Falls back to the author photo.
    pub social_image: Option<String>,
}

impl PageRequest {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_social_image(mut self, image: impl Into<String>) -> Self {
        self.social_image = Some(image.into());
        self
    }
}

/// Everything that goes into a page's `<head>` metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedHead {
    pub title: String,
    pub description: Option<String>,
    pub og_site_name: String,
    pub og_image_url: String,
    pub twitter_card: &'static str,
    pub twitter_title: String,
    pub twitter_description: Option<String>,
    pub twitter_image_url: String,
}

/// Resolve head metadata for one page.
///
/// Fails only when no image can be resolved (no page image and no author
/// photo).
pub fn compose_head(meta: &SiteMetadata, page: &PageRequest) -> Result<ResolvedHead, ConfigError> {
    let image_url = ImageResolver::for_site(meta).resolve(page.social_image.as_deref())?;
    Ok(ResolvedHead {
        title: page.title.clone(),
        description: page.description.clone(),
        og_site_name: page.title.clone(),
        og_image_url: image_url.clone(),
        twitter_card: TWITTER_CARD,
        twitter_title: page.title.clone(),
        twitter_description: page.description.clone(),
        twitter_image_url: image_url,
    })
}

/// Render the head tags. Description tags are left out when there is no
/// description rather than emitted empty.
pub fn render_head(head: &ResolvedHead) -> Markup {
    html! {
        title { (head.title) }
        @if let Some(description) = &head.description {
            meta name="description" content=(description);
        }
        meta property="og:site_name" content=(head.og_site_name);
        meta property="og:image" content=(head.og_image_url);
        meta name="twitter:card" content=(head.twitter_card);
        meta name="twitter:title" content=(head.twitter_title);
        @if let Some(description) = &head.twitter_description {
            meta name="twitter:description" content=(description);
        }
        meta name="twitter:image" content=(head.twitter_image_url);
    }
}
