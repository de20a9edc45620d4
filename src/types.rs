//! Shared types used across configuration, head composition, and the sidebar.
//!
//! These are deserialized straight from the site config and then carried,
//! unchanged, inside [`SiteMetadata`](crate::metadata::SiteMetadata).

use serde::{Deserialize, Serialize};

/// A navigation menu entry. Menu order is the order in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MenuItem {
    pub label: String,
    /// Site-relative path, e.g. `/pages/about`.
    pub path: String,
}

/// The site author, shown in the sidebar and used as the default social image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Author {
    pub name: String,
    /// Site-relative path or absolute URL of the author photo.
    pub photo: String,
    pub bio: String,
    pub contacts: Contacts,
}

/// Contact handles, one per supported channel. Empty means "not shown".
///
/// The field order matches [`ContactChannel::ALL`], which is the order
/// contacts are displayed in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Contacts {
    pub email: String,
    pub facebook: String,
    pub telegram: String,
    pub twitter: String,
    pub github: String,
    pub rss: String,
    pub vkontakte: String,
    pub linkedin: String,
    pub instagram: String,
    pub line: String,
    pub gitlab: String,
    pub weibo: String,
    pub codepen: String,
    pub youtube: String,
}

impl Contacts {
    /// Non-empty handles in display order.
    pub fn iter(&self) -> impl Iterator<Item = (ContactChannel, &str)> + '_ {
        ContactChannel::ALL.into_iter().filter_map(move |channel| {
            let handle = channel.handle(self).trim();
            (!handle.is_empty()).then_some((channel, handle))
        })
    }
}

/// A contact channel shown in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactChannel {
    Email,
    Facebook,
    Telegram,
    Twitter,
    Github,
    Rss,
    Vkontakte,
    Linkedin,
    Instagram,
    Line,
    Gitlab,
    Weibo,
    Codepen,
    Youtube,
}

impl ContactChannel {
    /// Every channel, in display order.
    pub const ALL: [ContactChannel; 14] = [
        Self::Email,
        Self::Facebook,
        Self::Telegram,
        Self::Twitter,
        Self::Github,
        Self::Rss,
        Self::Vkontakte,
        Self::Linkedin,
        Self::Instagram,
        Self::Line,
        Self::Gitlab,
        Self::Weibo,
        Self::Codepen,
        Self::Youtube,
    ];

    /// Config key for this channel (also used as the icon/CSS name).
    pub fn key(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Facebook => "facebook",
            Self::Telegram => "telegram",
            Self::Twitter => "twitter",
            Self::Github => "github",
            Self::Rss => "rss",
            Self::Vkontakte => "vkontakte",
            Self::Linkedin => "linkedin",
            Self::Instagram => "instagram",
            Self::Line => "line",
            Self::Gitlab => "gitlab",
            Self::Weibo => "weibo",
            Self::Codepen => "codepen",
            Self::Youtube => "youtube",
        }
    }

    fn handle(self, contacts: &Contacts) -> &str {
        match self {
            Self::Email => &contacts.email,
            Self::Facebook => &contacts.facebook,
            Self::Telegram => &contacts.telegram,
            Self::Twitter => &contacts.twitter,
            Self::Github => &contacts.github,
            Self::Rss => &contacts.rss,
            Self::Vkontakte => &contacts.vkontakte,
            Self::Linkedin => &contacts.linkedin,
            Self::Instagram => &contacts.instagram,
            Self::Line => &contacts.line,
            Self::Gitlab => &contacts.gitlab,
            Self::Weibo => &contacts.weibo,
            Self::Codepen => &contacts.codepen,
            Self::Youtube => &contacts.youtube,
        }
    }

    /// Build the link target for a handle on this channel.
    ///
    /// Handles that are already absolute URLs are used as-is, so a config can
    /// point any channel at a custom address.
    pub fn href(self, handle: &str) -> String {
        if crate::image_url::is_absolute_url(handle) {
            return handle.to_string();
        }
        match self {
            Self::Email => format!("mailto:{handle}"),
            Self::Facebook => format!("https://www.facebook.com/{handle}"),
            Self::Telegram => format!("tg://resolve?domain={handle}"),
            Self::Twitter => format!("https://www.twitter.com/{handle}"),
            Self::Github => format!("https://github.com/{handle}"),
            Self::Rss => handle.to_string(),
            Self::Vkontakte => format!("https://vk.com/{handle}"),
            Self::Linkedin => format!("https://www.linkedin.com/in/{handle}"),
            Self::Instagram => format!("https://www.instagram.com/{handle}"),
            Self::Line => format!("line://ti/p/{handle}"),
            Self::Gitlab => format!("https://www.gitlab.com/{handle}"),
            Self::Weibo => format!("https://www.weibo.com/{handle}"),
            Self::Codepen => format!("https://www.codepen.io/{handle}"),
            Self::Youtube => format!("https://www.youtube.com/channel/{handle}"),
        }
    }
}
