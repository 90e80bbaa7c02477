use std::sync::Arc;

use tokio::task::JoinError;

use super::embed::youtube_embed;
use super::fields;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::i18n::{format_date, Locale, Strings};
use crate::models::{
    Article, ArticleViewModel, Category, FetchOutcome, GlobalSettings, NotFoundPage, PageOutcome,
};
use crate::services::{ContentSource, MediaResolver};

/// Everything the lookups produced, already degraded to defaults.
struct Gathered {
    article: Option<Article>,
    related: Vec<Article>,
    most_viewed: Vec<Article>,
    popular: Vec<Article>,
    settings: Option<GlobalSettings>,
    trending: Vec<Category>,
}

/// Builds article pages from the content source.
pub struct PageAggregator {
    source: Arc<dyn ContentSource>,
    resolver: MediaResolver,
    sidebar_limit: usize,
    ad_placeholder: String,
    site_url: String,
}

impl PageAggregator {
    pub fn new(source: Arc<dyn ContentSource>, config: &Config) -> Result<Self> {
        Ok(Self {
            source,
            resolver: MediaResolver::new(config.media_base())?,
            sidebar_limit: config.sidebar_limit,
            ad_placeholder: config.ad_placeholder.clone(),
            site_url: config.site_url.clone(),
        })
    }

    /// Load the page for `slug` in `lang`. Never fails: anything that keeps
    /// the article itself from loading becomes a not-found page.
    pub async fn load(&self, slug: &str, lang: &str) -> PageOutcome {
        let locale = Locale::from_lang(lang);

        let gathered = match self.gather(slug, locale).await {
            Ok(gathered) => gathered,
            Err(e) => {
                tracing::error!("Error fetching data for article page {}: {}", slug, e);
                return self.not_found(slug, lang);
            }
        };

        if gathered.article.is_none() {
            tracing::info!("Article {} ({}) not found", slug, locale.as_str());
            return self.not_found(slug, lang);
        }

        PageOutcome::Article(Box::new(self.assemble(slug, lang, locale, gathered)))
    }

    /// Run all five lookups concurrently and wait for every one of them to
    /// settle. Related articles need the article's category, so they are
    /// fetched as soon as the primary lookup returns, alongside the sidebar
    /// lookups that may still be running. Only a broken primary task is an
    /// error here.
    async fn gather(&self, slug: &str, locale: Locale) -> Result<Gathered> {
        let limit = self.sidebar_limit;

        let article = {
            let source = Arc::clone(&self.source);
            let slug = slug.to_string();
            tokio::spawn(async move { source.article(&slug, locale).await })
        };
        let most_viewed = {
            let source = Arc::clone(&self.source);
            tokio::spawn(async move { source.most_viewed(limit, locale).await })
        };
        let popular = {
            let source = Arc::clone(&self.source);
            tokio::spawn(async move { source.popular(limit, locale).await })
        };
        let settings = {
            let source = Arc::clone(&self.source);
            tokio::spawn(async move { source.global_settings(locale).await })
        };
        let trending = {
            let source = Arc::clone(&self.source);
            tokio::spawn(async move { source.trending_categories(limit, locale).await })
        };

        let primary = async {
            let article = match article.await? {
                Ok(found) => found,
                Err(e) => {
                    tracing::warn!("Article lookup for {} failed: {}", slug, e);
                    None
                }
            };
            let related = match &article {
                Some(found) => self.related(found, slug, locale).await,
                None => Vec::new(),
            };
            Ok::<_, AppError>((article, related))
        };

        let (primary, most_viewed, popular, settings, trending) =
            tokio::join!(primary, most_viewed, popular, settings, trending);
        let (article, related) = primary?;

        Ok(Gathered {
            article,
            related,
            most_viewed: settle("most viewed", most_viewed).unwrap_or_default(),
            popular: settle("popular", popular).unwrap_or_default(),
            settings: settle("global settings", settings).unwrap_or_default(),
            trending: settle("trending categories", trending).unwrap_or_default(),
        })
    }

    async fn related(&self, article: &Article, slug: &str, locale: Locale) -> Vec<Article> {
        let source = Arc::clone(&self.source);
        let category = fields::category_slug(article);
        let slug = slug.to_string();
        let limit = self.sidebar_limit;
        let joined = tokio::spawn(async move {
            source.related(&category, &slug, limit, locale).await
        })
        .await;
        settle("related articles", joined).unwrap_or_default()
    }

    fn assemble(
        &self,
        slug: &str,
        lang: &str,
        locale: Locale,
        gathered: Gathered,
    ) -> ArticleViewModel {
        let strings = Strings::for_lang(lang);
        let article = gathered.article.unwrap_or_default();

        let cover_url = self.resolver.resolve(article.cover.as_ref());
        let title = article.title.clone().unwrap_or_default();
        let settings = gathered.settings;

        ArticleViewModel {
            slug: slug.to_string(),
            lang: lang.to_string(),
            locale,
            meta: fields::article_meta(&article, cover_url.as_deref()),
            view_key: article.view_key(),
            view_count: article.view_count.unwrap_or(0),
            breadcrumb: fields::breadcrumb(&title),
            share: fields::share_links(&self.site_url, lang, slug, &title),
            body_html: article.content.clone().unwrap_or_default(),
            excerpt: article.excerpt.clone().filter(|e| !e.trim().is_empty()),
            published_at: article.published_at,
            published_label: article.published_at.map(|date| format_date(&date, locale)),
            category_name: fields::category_name(&article, strings),
            category_slug: fields::category_slug(&article),
            author_name: fields::author_name(&article, strings),
            tags: fields::tag_names(&article),
            video: youtube_embed(article.video_url.as_deref()),
            cover_url,
            title,
            related: fields::sidebar_items(gathered.related, &self.resolver, locale, strings),
            most_viewed: fields::sidebar_items(
                gathered.most_viewed,
                &self.resolver,
                locale,
                strings,
            ),
            popular: fields::sidebar_items(gathered.popular, &self.resolver, locale, strings),
            ad_banner: fields::ad_banner(settings.as_ref(), &self.resolver, &self.ad_placeholder),
            social: fields::social_stats(settings.as_ref(), lang),
            settings,
            trending: gathered.trending,
        }
    }

    fn not_found(&self, slug: &str, lang: &str) -> PageOutcome {
        PageOutcome::NotFound(NotFoundPage {
            slug: slug.to_string(),
            lang: lang.to_string(),
            meta: fields::not_found_meta(),
        })
    }
}

/// Collapse a secondary lookup to its outcome, logging anything that went
/// wrong on the way.
fn settle<T>(
    section: &str,
    joined: std::result::Result<Result<T>, JoinError>,
) -> FetchOutcome<T> {
    match joined {
        Ok(Ok(value)) => FetchOutcome::Ready(value),
        Ok(Err(e)) => {
            tracing::warn!("Failed to fetch {}: {}", section, e);
            FetchOutcome::Missing
        }
        Err(e) => {
            tracing::warn!("{} lookup task failed: {}", section, e);
            FetchOutcome::Missing
        }
    }
}
