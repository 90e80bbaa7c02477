use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Category, GlobalSettings};
use crate::i18n::Locale;

/// Settled result of one page lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome<T> {
    Ready(T),
    Missing,
}

impl<T> FetchOutcome<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            FetchOutcome::Ready(value) => Some(value),
            FetchOutcome::Missing => None,
        }
    }
}

impl<T: Default> FetchOutcome<T> {
    pub fn unwrap_or_default(self) -> T {
        self.into_option().unwrap_or_default()
    }
}

/// What the aggregator hands to the renderer.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PageOutcome {
    Article(Box<ArticleViewModel>),
    NotFound(NotFoundPage),
}

impl PageOutcome {
    pub fn view_model(&self) -> Option<&ArticleViewModel> {
        match self {
            PageOutcome::Article(page) => Some(page),
            PageOutcome::NotFound(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PageOutcome::NotFound(_))
    }

    pub fn meta(&self) -> &PageMeta {
        match self {
            PageOutcome::Article(page) => &page.meta,
            PageOutcome::NotFound(page) => &page.meta,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NotFoundPage {
    pub slug: String,
    pub lang: String,
    pub meta: PageMeta,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub title: String,
    pub description: Option<String>,
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArticleViewModel {
    pub slug: String,
    pub lang: String,
    pub locale: Locale,
    pub meta: PageMeta,

    pub view_key: Option<String>,
    pub view_count: u64,

    pub title: String,
    pub breadcrumb: String,
    pub body_html: String,
    pub excerpt: Option<String>,
    pub cover_url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub published_label: Option<String>,
    pub category_name: String,
    pub category_slug: String,
    pub author_name: String,
    pub tags: Vec<String>,
    pub video: Option<VideoEmbed>,
    pub share: ShareLinks,

    /// Newest articles from the same category.
    pub related: Vec<SidebarItem>,
    pub most_viewed: Vec<SidebarItem>,
    pub popular: Vec<SidebarItem>,
    pub settings: Option<GlobalSettings>,
    pub trending: Vec<Category>,
    pub ad_banner: Option<AdBanner>,
    pub social: SocialStats,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoEmbed {
    pub video_id: String,
    pub embed_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareLinks {
    pub facebook: String,
    pub whatsapp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdBanner {
    pub image_url: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocialStats {
    pub facebook: SocialCounter,
    pub twitter: SocialCounter,
    pub youtube: SocialCounter,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocialCounter {
    pub count: u64,
    /// Grouped and, for Bengali pages, digit-translated.
    pub display: String,
    pub url: String,
}

/// One row of the most-viewed / popular tabs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarItem {
    pub slug: String,
    pub title: String,
    pub thumbnail_url: Option<String>,
    pub date_label: Option<String>,
}
