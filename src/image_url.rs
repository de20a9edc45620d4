//! Social image URL resolution.
//!
//! Social crawlers fetch `og:image` / `twitter:image` without knowing which
//! site a page came from, so a site-relative path like `/photo.jpg` is useless
//! to them. Every image that ends up in a meta tag goes through
//! [`resolve_image_url`], which leaves absolute URLs alone and turns
//! everything else into `site_url + path_prefix + path`.
//!
//! ```text
//! https://cdn.test/pic.png   →  https://cdn.test/pic.png
//! /photo.jpg   (prefix "/")  →  https://x.test/photo.jpg
//! photo.jpg    (prefix "/blog/") → https://x.test/blog/photo.jpg
//! /img/a.png?v=2#top         →  https://x.test/img/a.png?v=2#top
//! ```
//!
//! Separators are only normalized at the two joints (base/prefix and
//! prefix/path). The path itself, including any query string or fragment,
//! is copied verbatim.

use crate::config::ConfigError;
use crate::metadata::SiteMetadata;

/// True for `http://` and `https://` URLs, ignoring ASCII case.
pub fn is_absolute_url(candidate: &str) -> bool {
    has_prefix_ignore_case(candidate, "http://") || has_prefix_ignore_case(candidate, "https://")
}

fn has_prefix_ignore_case(s: &str, prefix: &str) -> bool {
    s.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// Join a site-relative path onto the path prefix.
///
/// - `with_prefix("/photo.jpg", "/")` → `"/photo.jpg"`
/// - `with_prefix("photo.jpg", "/blog/")` → `"/blog/photo.jpg"`
/// - `with_prefix("/", "/blog")` → `"/blog/"`
pub fn with_prefix(path: &str, path_prefix: &str) -> String {
    let prefix = path_prefix.trim_matches('/');
    let path = path.trim_start_matches('/');
    if prefix.is_empty() {
        format!("/{path}")
    } else {
        format!("/{prefix}/{path}")
    }
}

/// Resolve an image reference to the absolute URL used in social meta tags.
///
/// Absolute `http(s)` URLs are returned unchanged. Anything else is treated as
/// a site-relative path and qualified with `site_url` and `path_prefix`.
///
/// Fails with [`ConfigError::MissingField`] when `candidate` is blank: there is
/// no image to point crawlers at.
pub fn resolve_image_url(
    candidate: &str,
    site_url: &str,
    path_prefix: &str,
) -> Result<String, ConfigError> {
    let candidate = candidate.trim();
    if candidate.is_empty() {
        return Err(ConfigError::MissingField("author.photo"));
    }
    if is_absolute_url(candidate) {
        return Ok(candidate.to_string());
    }
    let base = site_url.trim_end_matches('/');
    Ok(format!("{base}{}", with_prefix(candidate, path_prefix)))
}

/// Image resolution bound to one site: carries the base URL, the path prefix,
/// and the author photo used when a page has no image of its own.
#[derive(Debug, Clone, Copy)]
pub struct ImageResolver<'a> {
    site_url: &'a str,
    path_prefix: &'a str,
    default_photo: &'a str,
}

impl<'a> ImageResolver<'a> {
    pub fn for_site(meta: &'a SiteMetadata) -> Self {
        Self {
            site_url: &meta.url,
            path_prefix: &meta.path_prefix,
            default_photo: &meta.author.photo,
        }
    }

    /// Resolve a page's image, falling back to the author photo only when the
    /// page supplies none.
    ///
    /// A page image that is present but blank is an error rather than a
    /// fallback: the page asked for an image and named nothing.
    pub fn resolve(&self, page_image: Option<&str>) -> Result<String, ConfigError> {
        match page_image {
            Some(image) if image.trim().is_empty() => Err(ConfigError::Validation(
                "page social image is empty".to_string(),
            )),
            Some(image) => resolve_image_url(image, self.site_url, self.path_prefix),
            None => resolve_image_url(self.default_photo, self.site_url, self.path_prefix),
        }
    }
}
