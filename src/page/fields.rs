//! Derived page fields. Each one falls back independently when its source
//! data is missing.

use crate::i18n::{format_date, group_thousands, translate_number, Locale, Strings};
use crate::models::{
    AdBanner, Article, GlobalSettings, PageMeta, ShareLinks, SidebarItem, SocialCounter,
    SocialStats,
};
use crate::services::MediaResolver;

const DEFAULT_CATEGORY_SLUG: &str = "general";
const DEFAULT_LINK: &str = "#";
const BREADCRUMB_CHARS: usize = 50;

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

pub fn category_name(article: &Article, strings: &Strings) -> String {
    non_empty(article.category.as_ref().and_then(|c| c.name.as_deref()))
        .unwrap_or(strings.category_fallback)
        .to_string()
}

pub fn category_slug(article: &Article) -> String {
    non_empty(article.category.as_ref().and_then(|c| c.slug.as_deref()))
        .unwrap_or(DEFAULT_CATEGORY_SLUG)
        .to_string()
}

pub fn author_name(article: &Article, strings: &Strings) -> String {
    non_empty(article.author.as_ref().and_then(|a| a.name.as_deref()))
        .unwrap_or(strings.author_fallback)
        .to_string()
}

pub fn tag_names(article: &Article) -> Vec<String> {
    article
        .tags
        .iter()
        .filter_map(|tag| non_empty(tag.name.as_deref()))
        .map(str::to_string)
        .collect()
}

pub fn breadcrumb(title: &str) -> String {
    let head: String = title.chars().take(BREADCRUMB_CHARS).collect();
    format!("{head}...")
}

/// Sidebar ad from global settings.
///
/// Suppressed when the banner is the CMS placeholder image, matched against
/// the reference both before and after resolution.
pub fn ad_banner(
    settings: Option<&GlobalSettings>,
    resolver: &MediaResolver,
    placeholder: &str,
) -> Option<AdBanner> {
    let settings = settings?;
    let media = settings.ad_banner_sidebar.as_ref();
    let image_url = resolver.resolve(media)?;

    let raw = media.and_then(|m| m.url.as_deref()).map(str::trim);
    if image_url == placeholder || raw == Some(placeholder) {
        tracing::debug!("Ad banner is the placeholder image, hiding it");
        return None;
    }

    let link = non_empty(settings.ad_banner_sidebar_link.as_deref())
        .unwrap_or(DEFAULT_LINK)
        .to_string();

    Some(AdBanner { image_url, link })
}

pub fn social_stats(settings: Option<&GlobalSettings>, lang: &str) -> SocialStats {
    let counter = |count: Option<u64>, url: Option<&str>| {
        let count = count.unwrap_or(0);
        SocialCounter {
            count,
            display: translate_number(&group_thousands(count), lang),
            url: non_empty(url).unwrap_or(DEFAULT_LINK).to_string(),
        }
    };

    SocialStats {
        facebook: counter(
            settings.and_then(|s| s.social_facebook_fans),
            settings.and_then(|s| s.social_facebook_url.as_deref()),
        ),
        twitter: counter(
            settings.and_then(|s| s.social_twitter_followers),
            settings.and_then(|s| s.social_twitter_url.as_deref()),
        ),
        youtube: counter(
            settings.and_then(|s| s.social_youtube_subscribers),
            settings.and_then(|s| s.social_youtube_url.as_deref()),
        ),
    }
}

pub fn share_links(site_url: &str, lang: &str, slug: &str, title: &str) -> ShareLinks {
    let page_url = format!("{}/{}/article/{}", site_url.trim_end_matches('/'), lang, slug);
    ShareLinks {
        facebook: format!("https://www.facebook.com/sharer/sharer.php?u={page_url}"),
        whatsapp: format!("https://wa.me/?text={}", urlencoding::encode(title)),
    }
}

/// Rows for the most-viewed / popular tabs. Entries without a slug cannot be
/// linked and are dropped.
pub fn sidebar_items(
    articles: Vec<Article>,
    resolver: &MediaResolver,
    locale: Locale,
    strings: &Strings,
) -> Vec<SidebarItem> {
    articles
        .into_iter()
        .filter_map(|article| {
            let slug = non_empty(article.slug.as_deref())?.to_string();
            Some(SidebarItem {
                slug,
                title: non_empty(article.title.as_deref())
                    .unwrap_or(strings.untitled)
                    .to_string(),
                thumbnail_url: resolver.resolve(article.cover.as_ref()),
                date_label: article
                    .published_at
                    .or(article.created_at)
                    .map(|date| format_date(&date, locale)),
            })
        })
        .collect()
}

pub fn article_meta(article: &Article, cover_url: Option<&str>) -> PageMeta {
    PageMeta {
        title: article.title.clone().unwrap_or_default(),
        description: article.excerpt.clone(),
        images: cover_url.map(str::to_string).into_iter().collect(),
    }
}

pub fn not_found_meta() -> PageMeta {
    PageMeta {
        title: "Article Not Found".to_string(),
        description: None,
        images: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Author, Category, Media, Tag};
    use chrono::{TimeZone, Utc};

    fn resolver() -> MediaResolver {
        MediaResolver::new("http://localhost:1337").unwrap()
    }

    fn settings_with_banner(url: &str, link: Option<&str>) -> GlobalSettings {
        GlobalSettings {
            ad_banner_sidebar: Some(Media {
                url: Some(url.to_string()),
                alternative_text: None,
            }),
            ad_banner_sidebar_link: link.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn category_and_author_fall_back_per_locale() {
        let bare = Article::default();
        assert_eq!(category_name(&bare, Strings::for_lang("en")), "Category");
        assert_eq!(category_name(&bare, Strings::for_lang("bn")), "ক্যাটাগরি");
        assert_eq!(category_slug(&bare), "general");
        assert_eq!(author_name(&bare, Strings::for_lang("en")), "Editor");

        let full = Article {
            category: Some(Category {
                id: Some(1),
                name: Some("Economy".to_string()),
                slug: Some("economy".to_string()),
            }),
            author: Some(Author {
                name: Some("R. Hasan".to_string()),
            }),
            ..Default::default()
        };
        assert_eq!(category_name(&full, Strings::for_lang("en")), "Economy");
        assert_eq!(category_slug(&full), "economy");
        assert_eq!(author_name(&full, Strings::for_lang("en")), "R. Hasan");
    }

    #[test]
    fn empty_names_count_as_missing() {
        let article = Article {
            author: Some(Author {
                name: Some(String::new()),
            }),
            tags: vec![
                Tag {
                    id: Some(1),
                    name: Some("finance".to_string()),
                },
                Tag { id: Some(2), name: None },
            ],
            ..Default::default()
        };
        assert_eq!(author_name(&article, Strings::for_lang("bn")), "সম্পাদক");
        assert_eq!(tag_names(&article), vec!["finance".to_string()]);
    }

    #[test]
    fn breadcrumb_truncates_on_characters() {
        assert_eq!(breadcrumb("Short"), "Short...");
        let long = "ক".repeat(60);
        assert_eq!(breadcrumb(&long).chars().count(), 53);
    }

    #[test]
    fn placeholder_banner_is_suppressed() {
        let settings = settings_with_banner("/default.jpg", Some("https://sponsor.example.com"));
        assert_eq!(ad_banner(Some(&settings), &resolver(), "/default.jpg"), None);

        let absolute = settings_with_banner("http://localhost:1337/default.jpg", None);
        assert_eq!(
            ad_banner(
                Some(&absolute),
                &resolver(),
                "http://localhost:1337/default.jpg"
            ),
            None
        );
    }

    #[test]
    fn real_banner_is_shown_with_default_link() {
        let settings = settings_with_banner("/uploads/ad.png", None);
        let banner = ad_banner(Some(&settings), &resolver(), "/default.jpg").unwrap();
        assert_eq!(banner.image_url, "http://localhost:1337/uploads/ad.png");
        assert_eq!(banner.link, "#");

        assert_eq!(ad_banner(None, &resolver(), "/default.jpg"), None);
    }

    #[test]
    fn social_counters_default_and_translate() {
        let settings = GlobalSettings {
            social_facebook_fans: Some(12345),
            social_facebook_url: Some("https://facebook.com/site".to_string()),
            ..Default::default()
        };

        let stats = social_stats(Some(&settings), "bn");
        assert_eq!(stats.facebook.display, "১২,৩৪৫");
        assert_eq!(stats.facebook.url, "https://facebook.com/site");
        assert_eq!(stats.twitter.count, 0);
        assert_eq!(stats.twitter.url, "#");

        let english = social_stats(None, "en");
        assert_eq!(english.youtube.display, "0");
    }

    #[test]
    fn share_links_encode_title() {
        let links = share_links(
            "https://news.example.com/",
            "en",
            "budget-2025",
            "Budget 2025 Unveiled",
        );
        assert_eq!(
            links.facebook,
            "https://www.facebook.com/sharer/sharer.php?u=https://news.example.com/en/article/budget-2025"
        );
        assert_eq!(links.whatsapp, "https://wa.me/?text=Budget%202025%20Unveiled");
    }

    #[test]
    fn sidebar_items_drop_unlinkable_entries() {
        let created = Utc.with_ymd_and_hms(2025, 3, 2, 0, 0, 0).unwrap();
        let articles = vec![
            Article {
                slug: Some("first".to_string()),
                title: None,
                created_at: Some(created),
                ..Default::default()
            },
            Article {
                slug: None,
                title: Some("No slug".to_string()),
                ..Default::default()
            },
        ];

        let items = sidebar_items(articles, &resolver(), Locale::En, Strings::for_lang("en"));

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].slug, "first");
        assert_eq!(items[0].title, "Untitled");
        assert_eq!(items[0].date_label.as_deref(), Some("March 2, 2025"));
        assert_eq!(items[0].thumbnail_url, None);
    }
}
