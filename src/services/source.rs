use async_trait::async_trait;

use crate::error::Result;
use crate::i18n::Locale;
use crate::models::{Article, Category, GlobalSettings};

/// Read and write access to the content back end.
///
/// Every call is network-backed and may fail or stall independently of the
/// others; callers decide how much a failure matters.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Primary lookup. `Ok(None)` when no article has this slug.
    async fn article(&self, slug: &str, locale: Locale) -> Result<Option<Article>>;

    async fn most_viewed(&self, limit: usize, locale: Locale) -> Result<Vec<Article>>;

    async fn popular(&self, limit: usize, locale: Locale) -> Result<Vec<Article>>;

    /// Latest articles in `category_slug`, without the one at `exclude_slug`.
    async fn related(
        &self,
        category_slug: &str,
        exclude_slug: &str,
        limit: usize,
        locale: Locale,
    ) -> Result<Vec<Article>>;

    async fn global_settings(&self, locale: Locale) -> Result<Option<GlobalSettings>>;

    async fn trending_categories(&self, limit: usize, locale: Locale) -> Result<Vec<Category>>;

    /// Record one more view. `current_count` is the count the page was
    /// rendered with.
    async fn increment_view_count(&self, article_id: &str, current_count: u64) -> Result<()>;
}
