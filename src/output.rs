//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Output leads with what the site *is* (title, URLs, menu entries, contacts)
//! and shows derived values (resolved URLs, hrefs) as secondary context on the
//! same line. Positional indices use the same 3-digit form everywhere.
//!
//! ```text
//! Site
//!     Jane Doe: Notes on software
//!     URL: https://www.example.com (prefix /)
//!     Social image: https://www.example.com/photo.jpg
//!     Posts per page: 4
//!
//! Menu
//! 001 Articles → /
//! 002 About me → /pages/about
//!
//! Contacts
//! 001 email → mailto:jane@example.com
//!
//! Extras
//!     Google Analytics: off
//!     ...
//! ```
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::image_url::ImageResolver;
use crate::metadata::SiteMetadata;
use crate::sidebar::assemble_sidebar;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn on_off(value: Option<&str>) -> String {
    value.map_or_else(|| "off".to_string(), str::to_string)
}

/// Format the `check` command's summary of validated site metadata.
pub fn format_check_output(meta: &SiteMetadata) -> Vec<String> {
    let mut lines = Vec::new();
    let sidebar = assemble_sidebar(meta, true);

    lines.push("Site".to_string());
    if meta.subtitle.is_empty() {
        lines.push(format!("{}{}", indent(1), meta.title));
    } else {
        lines.push(format!("{}{}: {}", indent(1), meta.title, meta.subtitle));
    }
    lines.push(format!(
        "{}URL: {} (prefix {})",
        indent(1),
        meta.url,
        meta.path_prefix
    ));
    let social = ImageResolver::for_site(meta)
        .resolve(None)
        .unwrap_or_else(|e| format!("<{e}>"));
    lines.push(format!("{}Social image: {}", indent(1), social));
    lines.push(format!("{}Posts per page: {}", indent(1), meta.posts_per_page));

    lines.push(String::new());
    lines.push("Menu".to_string());
    for (i, link) in sidebar.menu.iter().enumerate() {
        lines.push(format!("{} {} → {}", format_index(i + 1), link.label, link.href));
    }

    lines.push(String::new());
    lines.push("Contacts".to_string());
    for (i, contact) in sidebar.contacts.iter().enumerate() {
        lines.push(format!(
            "{} {} → {}",
            format_index(i + 1),
            contact.channel.key(),
            contact.href
        ));
    }

    lines.push(String::new());
    lines.push("Extras".to_string());
    lines.push(format!(
        "{}Google Analytics: {}",
        indent(1),
        on_off(meta.google_analytics_id.as_deref())
    ));
    lines.push(format!(
        "{}AdSense: {}",
        indent(1),
        on_off(meta.ad_client.as_deref())
    ));
    lines.push(format!(
        "{}Disqus: {}",
        indent(1),
        on_off(meta.disqus_shortname.as_deref())
    ));
    lines.push(format!(
        "{}KaTeX: {}",
        indent(1),
        if meta.use_katex { "on" } else { "off" }
    ));
    match &meta.sidebar_embed {
        Some(embed) => lines.push(format!(
            "{}Sidebar embed: {} bytes of untrusted HTML",
            indent(1),
            embed.as_untrusted_html().len()
        )),
        None => lines.push(format!("{}Sidebar embed: none", indent(1))),
    }

    lines
}

pub fn print_check_output(meta: &SiteMetadata) {
    for line in format_check_output(meta) {
        println!("{}", line);
    }
}
