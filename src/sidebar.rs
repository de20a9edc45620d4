//! Sidebar assembly: author identity, embed slot, menu, contacts, copyright.
//!
//! [`assemble_sidebar`] builds a [`SidebarView`] from site metadata; the view
//! always has the same five sections in the same order ([`SidebarView::SECTIONS`]).
//! The only thing that differs between the home page and every other page is
//! the author block's [`AuthorMode`].
//!
//! ## Untrusted HTML passthrough
//!
//! The embed slot holds third-party markup (donation buttons and the like)
//! pasted into the config. It is wrapped in [`EmbedFragment`] and written out
//! verbatim: it is not parsed, validated, or sanitized. Everything else in
//! the sidebar goes through maud's escaping.

use crate::image_url::{is_absolute_url, with_prefix};
use crate::metadata::SiteMetadata;
use crate::types::ContactChannel;
use maud::{Markup, Render, html};

/// Pre-rendered HTML from outside the site, emitted without escaping.
///
/// The only way in is [`EmbedFragment::from_untrusted`], so every place that
/// creates one names the trust decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedFragment(String);

impl EmbedFragment {
    pub fn from_untrusted(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    pub fn as_untrusted_html(&self) -> &str {
        &self.0
    }
}

impl Render for EmbedFragment {
    fn render_to(&self, buffer: &mut String) {
        buffer.push_str(&self.0);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarSection {
    Author,
    Embed,
    Menu,
    Contacts,
    Copyright,
}

/// How the author block presents itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorMode {
    /// Home page: the name is the page headline and there is nowhere to go back to.
    Index,
    /// Any other page: smaller heading plus a link back home.
    Page,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorBlock {
    pub name: String,
    pub photo_url: String,
    pub bio: String,
    pub home_href: String,
    pub mode: AuthorMode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuLink {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactLink {
    pub channel: ContactChannel,
    pub handle: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarView {
    pub author: AuthorBlock,
    pub embed: Option<EmbedFragment>,
    pub menu: Vec<MenuLink>,
    pub contacts: Vec<ContactLink>,
    pub copyright: String,
}

impl SidebarView {
    /// Render order of the sidebar sections.
    pub const SECTIONS: [SidebarSection; 5] = [
        SidebarSection::Author,
        SidebarSection::Embed,
        SidebarSection::Menu,
        SidebarSection::Contacts,
        SidebarSection::Copyright,
    ];
}

/// Site-relative links get the path prefix; absolute ones are left alone.
fn site_href(path: &str, path_prefix: &str) -> String {
    if is_absolute_url(path) {
        path.to_string()
    } else {
        with_prefix(path, path_prefix)
    }
}

pub fn assemble_sidebar(meta: &SiteMetadata, is_index_page: bool) -> SidebarView {
    let prefix = meta.path_prefix.as_str();
    let author = AuthorBlock {
        name: meta.author.name.clone(),
        photo_url: site_href(&meta.author.photo, prefix),
        bio: meta.author.bio.clone(),
        home_href: with_prefix("/", prefix),
        mode: if is_index_page {
            AuthorMode::Index
        } else {
            AuthorMode::Page
        },
    };

    let menu = meta
        .menu
        .iter()
        .map(|item| MenuLink {
            label: item.label.clone(),
            href: site_href(&item.path, prefix),
        })
        .collect();

    let contacts = meta
        .author
        .contacts
        .iter()
        .map(|(channel, handle)| ContactLink {
            channel,
            handle: handle.to_string(),
            href: channel.href(handle),
        })
        .collect();

    SidebarView {
        author,
        embed: meta.sidebar_embed.clone(),
        menu,
        contacts,
        copyright: meta.copyright.clone(),
    }
}

// ============================================================================
// Rendering
// ============================================================================

pub fn render_sidebar(view: &SidebarView) -> Markup {
    html! {
        aside.sidebar {
            div.sidebar__inner {
                @for section in SidebarView::SECTIONS {
                    (render_section(view, section))
                }
            }
        }
    }
}

fn render_section(view: &SidebarView, section: SidebarSection) -> Markup {
    match section {
        SidebarSection::Author => render_author(&view.author),
        SidebarSection::Embed => html! {
            div.sidebar__embed {
                @if let Some(embed) = &view.embed {
                    (embed)
                }
            }
        },
        SidebarSection::Menu => html! {
            nav.menu {
                ul.menu__list {
                    @for link in &view.menu {
                        li.menu__list-item {
                            a.menu__list-item-link href=(link.href) { (link.label) }
                        }
                    }
                }
            }
        },
        SidebarSection::Contacts => html! {
            div.contacts {
                ul.contacts__list {
                    @for contact in &view.contacts {
                        li.contacts__list-item {
                            a.contacts__list-item-link
                                href=(contact.href)
                                title=(contact.handle)
                                rel="noopener noreferrer"
                                target="_blank" {
                                (contact.channel.key())
                            }
                        }
                    }
                }
            }
        },
        SidebarSection::Copyright => html! {
            div.copyright { (view.copyright) }
        },
    }
}

fn render_author(author: &AuthorBlock) -> Markup {
    html! {
        div.author {
            a href=(author.home_href) {
                img.author__photo src=(author.photo_url) width="75" height="75" alt=(author.name);
            }
            @match author.mode {
                AuthorMode::Index => {
                    h1.author__title {
                        a.author__title-link href=(author.home_href) { (author.name) }
                    }
                },
                AuthorMode::Page => {
                    h2.author__title {
                        a.author__title-link href=(author.home_href) { (author.name) }
                    }
                    a.author__back href=(author.home_href) { "← All articles" }
                }
            }
            p.author__subtitle { (author.bio) }
        }
    }
}
