//! Shared test utilities for the folio test suite.
//!
//! Provides fabricated site metadata so renderer tests never touch a config
//! file, and a minimal valid config for loader tests.
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let meta = sample_metadata();
//! let head = compose_head(&meta, &PageRequest::new("Hi"))?;
//! assert_eq!(head.og_image_url, "https://x.test/photo.jpg");
//! ```

use crate::metadata::SiteMetadata;
use crate::types::{Author, Contacts, MenuItem};

/// The smallest config that passes validation.
pub const MINIMAL_CONFIG: &str = r#"url = "https://x.test"
title = "Test Site"

[author]
name = "Test Author"
photo = "/photo.jpg"
"#;

/// Metadata for `https://x.test` served from the root, with a two-entry menu
/// and three contacts (email, twitter, github).
pub fn sample_metadata() -> SiteMetadata {
    SiteMetadata {
        url: "https://x.test".to_string(),
        path_prefix: "/".to_string(),
        title: "Test Site".to_string(),
        subtitle: "A site for tests".to_string(),
        copyright: "© Test Author".to_string(),
        posts_per_page: 4,
        menu: vec![
            MenuItem {
                label: "Articles".to_string(),
                path: "/".to_string(),
            },
            MenuItem {
                label: "About me".to_string(),
                path: "/pages/about".to_string(),
            },
        ],
        author: Author {
            name: "Test Author".to_string(),
            photo: "/photo.jpg".to_string(),
            bio: "Writes tests.".to_string(),
            contacts: Contacts {
                email: "author@x.test".to_string(),
                twitter: "tester".to_string(),
                github: "tester".to_string(),
                ..Default::default()
            },
        },
        disqus_shortname: None,
        google_analytics_id: None,
        ad_client: None,
        use_katex: false,
        sidebar_embed: None,
    }
}
