//! # Folio
//!
//! The metadata and delivery core of a personal publishing site. Content is
//! built elsewhere into static HTML; folio decides what goes into each
//! page's `<head>` and sidebar, and serves the finished output directory.
//!
//! # Architecture
//!
//! ```text
//! site.toml ─► SiteMetadata ─┬─► head     (title, Open Graph, Twitter Card)
//!                            ├─► sidebar  (author, embed, menu, contacts, ©)
//!                            └─► layout   (full page document)
//!
//! public/ ─► server  (security headers → compression → static files)
//! ```
//!
//! Metadata is read once and passed explicitly to every renderer. Renderers
//! are pure functions: same metadata and page inputs, same bytes out.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `site.toml` parsing, defaults, validation, stock config |
//! | [`metadata`] | Validated read-only [`metadata::SiteMetadata`] and its provider |
//! | [`types`] | Menu, author, and contact types shared by config and renderers |
//! | [`image_url`] | Absolute social image URLs from absolute or site-relative paths |
//! | [`head`] | Resolves and renders title, description, `og:*`, `twitter:*` tags |
//! | [`sidebar`] | Sidebar view model and rendering, incl. the untrusted embed slot |
//! | [`layout`] | Whole-page documents around a pre-rendered body |
//! | [`server`] | Hardened static file server for the build output |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Absolute Image URLs
//!
//! Social crawlers do not know which site a relative `og:image` belongs to,
//! so every image in a meta tag is fully qualified with the site URL and path
//! prefix. Absolute URLs (for images on a CDN) pass through untouched.
//!
//! ## The Page Title Is the Site Name
//!
//! `og:site_name` is filled with the page title, and `twitter:card` is always
//! `summary`. Both are long-standing behavior of this site and are kept as-is.
//!
//! ## Untrusted Embed as a Type
//!
//! The sidebar can carry a third-party HTML snippet. It lives in
//! [`sidebar::EmbedFragment`], the one value in the page that is written out
//! unescaped. All other text goes through maud's auto-escaping.
//!
//! ## Middleware Order as Data
//!
//! The server's stages are listed in [`server::MIDDLEWARE_CHAIN`] and folded
//! into the router, so the documented order and the running order cannot
//! drift apart.

pub mod config;
pub mod head;
pub mod image_url;
pub mod layout;
pub mod metadata;
pub mod output;
pub mod server;
pub mod sidebar;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
