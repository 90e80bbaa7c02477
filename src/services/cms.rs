use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::source::ContentSource;
use super::strapi;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::i18n::Locale;
use crate::models::{Article, Category, GlobalSettings};

const USER_AGENT_STRING: &str = "article-desk/1.0";

#[derive(Debug, Serialize)]
struct ViewCountUpdate {
    data: ViewCountData,
}

#[derive(Debug, Serialize)]
struct ViewCountData {
    #[serde(rename = "viewCount")]
    view_count: u64,
}

/// Content source backed by a Strapi REST API.
pub struct CmsClient {
    client: Client,
    base_url: String,
    api_token: Option<String>,
}

impl CmsClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(USER_AGENT_STRING)
            .build()?;

        Ok(Self {
            client,
            base_url: config.cms_url.trim_end_matches('/').to_string(),
            api_token: config.cms_token.clone(),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        match &self.api_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// GET a normalized payload. `Ok(None)` on 404.
    async fn get_data(&self, path: &str, query: &[(&str, String)]) -> Result<Option<Value>> {
        let response = self.request(Method::GET, path).query(query).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            tracing::debug!("{} returned 404", path);
            return Ok(None);
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::CmsApi(format!(
                "GET {} returned {}: {}",
                path, status, error_text
            )));
        }

        let body: Value = response.json().await?;
        Ok(Some(strapi::normalize(body)))
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        match self.get_data(path, query).await? {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(data) => Ok(serde_json::from_value(data)?),
        }
    }
}

fn locale_param(locale: Locale) -> (&'static str, String) {
    ("locale", locale.as_str().to_string())
}

fn populate_all() -> (&'static str, String) {
    ("populate", "*".to_string())
}

#[async_trait]
impl ContentSource for CmsClient {
    async fn article(&self, slug: &str, locale: Locale) -> Result<Option<Article>> {
        let query = [
            ("filters[slug][$eq]", slug.to_string()),
            locale_param(locale),
            populate_all(),
        ];
        let mut articles: Vec<Article> = self.get_list("/api/articles", &query).await?;
        if articles.is_empty() {
            return Ok(None);
        }
        Ok(Some(articles.swap_remove(0)))
    }

    async fn most_viewed(&self, limit: usize, locale: Locale) -> Result<Vec<Article>> {
        let query = [
            ("sort", "viewCount:desc".to_string()),
            ("pagination[limit]", limit.to_string()),
            locale_param(locale),
            populate_all(),
        ];
        self.get_list("/api/articles", &query).await
    }

    async fn popular(&self, limit: usize, locale: Locale) -> Result<Vec<Article>> {
        let query = [
            ("filters[isPopular][$eq]", "true".to_string()),
            ("sort", "publishedAt:desc".to_string()),
            ("pagination[limit]", limit.to_string()),
            locale_param(locale),
            populate_all(),
        ];
        self.get_list("/api/articles", &query).await
    }

    async fn related(
        &self,
        category_slug: &str,
        exclude_slug: &str,
        limit: usize,
        locale: Locale,
    ) -> Result<Vec<Article>> {
        let query = [
            ("filters[category][slug][$eq]", category_slug.to_string()),
            ("filters[slug][$ne]", exclude_slug.to_string()),
            ("sort", "publishedAt:desc".to_string()),
            ("pagination[limit]", limit.to_string()),
            locale_param(locale),
            populate_all(),
        ];
        self.get_list("/api/articles", &query).await
    }

    async fn global_settings(&self, locale: Locale) -> Result<Option<GlobalSettings>> {
        let query = [locale_param(locale), populate_all()];
        match self.get_data("/api/global", &query).await? {
            None | Some(Value::Null) => Ok(None),
            Some(data) => Ok(Some(serde_json::from_value(data)?)),
        }
    }

    async fn trending_categories(&self, limit: usize, locale: Locale) -> Result<Vec<Category>> {
        let query = [
            ("filters[isTrending][$eq]", "true".to_string()),
            ("pagination[limit]", limit.to_string()),
            locale_param(locale),
        ];
        self.get_list("/api/categories", &query).await
    }

    async fn increment_view_count(&self, article_id: &str, current_count: u64) -> Result<()> {
        let request = ViewCountUpdate {
            data: ViewCountData {
                view_count: current_count + 1,
            },
        };

        let response = self
            .request(Method::PUT, &format!("/api/articles/{}", article_id))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::CmsApi(format!(
                "view count update for {} returned {}: {}",
                article_id, status, error_text
            )));
        }

        Ok(())
    }
}
