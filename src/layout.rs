//! Full page documents: head metadata, site scripts, sidebar, and body.
//!
//! The page body arrives pre-rendered (it comes from the content build);
//! this module only wraps it. Everything here is a pure function of the site
//! metadata and the page inputs, so the same page always renders to the same
//! bytes.
//!
//! ## Document shape
//!
//! ```text
//! <!DOCTYPE html>
//! <html lang="en">
//!   <head>  charset, viewport, head tags, [katex css], [gtag.js], [adsense]
//!   <body>
//!     div.layout
//!       aside.sidebar   (sidebar::render_sidebar)
//!       main.content    (page body)
//! ```

use crate::config::ConfigError;
use crate::head::{PageRequest, ResolvedHead, compose_head, render_head};
use crate::metadata::SiteMetadata;
use crate::sidebar::{assemble_sidebar, render_sidebar};
use maud::{DOCTYPE, Markup, PreEscaped, html};

const KATEX_CSS: &str = "https://cdn.jsdelivr.net/npm/katex@0.16.9/dist/katex.min.css";
const GTAG_JS: &str = "https://www.googletagmanager.com/gtag/js";
const ADSENSE_JS: &str = "https://pagead2.googlesyndication.com/pagead/js/adsbygoogle.js";

/// Render a complete HTML document for one page.
///
/// Fails only if the page's social image cannot be resolved.
pub fn render_page(
    meta: &SiteMetadata,
    page: &PageRequest,
    is_index: bool,
    body: Markup,
) -> Result<Markup, ConfigError> {
    let head = compose_head(meta, page)?;
    let sidebar = render_sidebar(&assemble_sidebar(meta, is_index));
    Ok(base_document(meta, &head, sidebar, body))
}

fn base_document(meta: &SiteMetadata, head: &ResolvedHead, sidebar: Markup, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                (render_head(head))
                @if meta.use_katex {
                    link rel="stylesheet" href=(KATEX_CSS);
                }
                @if let Some(id) = &meta.google_analytics_id {
                    (analytics_scripts(id))
                }
                @if let Some(client) = &meta.ad_client {
                    script data-ad-client=(client) async src=(ADSENSE_JS) {}
                }
            }
            body {
                div.layout {
                    (sidebar)
                    main.content { (body) }
                }
            }
        }
    }
}

/// gtag.js loader plus its inline bootstrap.
fn analytics_scripts(id: &str) -> Markup {
    html! {
        script async src={ (GTAG_JS) "?id=" (id) } {}
        script { (PreEscaped(gtag_bootstrap(id))) }
    }
}

/// Inline gtag config. The id is embedded as a JSON string literal with `</`
/// broken up so it cannot close the surrounding script element.
fn gtag_bootstrap(id: &str) -> String {
    let literal = serde_json::Value::String(id.to_string())
        .to_string()
        .replace("</", "<\\/");
    format!(
        "window.dataLayer=window.dataLayer||[];\
         function gtag(){{dataLayer.push(arguments);}}\
         gtag('js',new Date());gtag('config',{literal});"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::sample_metadata;

    fn render(meta: &SiteMetadata, is_index: bool) -> String {
        let page = PageRequest::new("Hello").with_description("World");
        render_page(meta, &page, is_index, html! { article { "Body text" } })
            .unwrap()
            .into_string()
    }

    #[test]
    fn document_structure() {
        let html = render(&sample_metadata(), true);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<html lang="en">"#));
        assert!(html.contains("<title>Hello</title>"));
        assert!(html.contains(r#"<meta property="og:image" content="https://x.test/photo.jpg">"#));
        assert!(html.contains("<article>Body text</article>"));
    }

    #[test]
    fn sidebar_precedes_body() {
        let html = render(&sample_metadata(), false);
        let sidebar = html.find(r#"class="sidebar""#).unwrap();
        let main = html.find(r#"<main class="content">"#).unwrap();
        assert!(sidebar < main);
    }

    #[test]
    fn optional_scripts_absent_by_default() {
        let html = render(&sample_metadata(), true);
        assert!(!html.contains("googletagmanager"));
        assert!(!html.contains("adsbygoogle"));
        assert!(!html.contains("katex"));
    }

    #[test]
    fn adsense_script_when_client_set() {
        let mut meta = sample_metadata();
        meta.ad_client = Some("ca-pub-123".to_string());
        let html = render(&meta, true);
        assert!(html.contains(r#"data-ad-client="ca-pub-123""#));
        assert!(html.contains(ADSENSE_JS));
    }

    #[test]
    fn analytics_when_id_set() {
        let mut meta = sample_metadata();
        meta.google_analytics_id = Some("UA-42-2".to_string());
        meta.use_katex = true;
        let html = render(&meta, true);
        assert!(html.contains("https://www.googletagmanager.com/gtag/js?id=UA-42-2"));
        assert!(html.contains(r#"gtag('config',"UA-42-2")"#));
        assert!(html.contains(KATEX_CSS));
    }

    #[test]
    fn gtag_bootstrap_cannot_close_script() {
        let js = gtag_bootstrap("x</script><script>alert(1)");
        assert!(!js.contains("</script>"));
    }

    #[test]
    fn missing_photo_fails_render() {
        let mut meta = sample_metadata();
        meta.author.photo = String::new();
        let result = render_page(&meta, &PageRequest::new("x"), true, html! {});
        assert!(matches!(result, Err(ConfigError::MissingField("author.photo"))));
    }
}
