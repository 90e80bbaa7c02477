use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// An article as the CMS returns it, after envelope normalization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Article {
    pub id: Option<i64>,
    pub document_id: Option<String>,
    pub slug: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub cover: Option<Media>,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub category: Option<Category>,
    pub author: Option<Author>,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<Tag>,
    pub video_url: Option<String>,
    pub view_count: Option<u64>,
}

impl Article {
    /// Identifier used for view counting: the document id when present,
    /// otherwise the numeric id.
    pub fn view_key(&self) -> Option<String> {
        self.document_id
            .clone()
            .filter(|id| !id.is_empty())
            .or_else(|| self.id.map(|id| id.to_string()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Media {
    pub url: Option<String>,
    pub alternative_text: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Category {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Author {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Tag {
    pub id: Option<i64>,
    pub name: Option<String>,
}

/// Site-wide settings: sidebar ad banner and social counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GlobalSettings {
    pub ad_banner_sidebar: Option<Media>,
    pub ad_banner_sidebar_link: Option<String>,
    pub social_facebook_fans: Option<u64>,
    pub social_twitter_followers: Option<u64>,
    pub social_youtube_subscribers: Option<u64>,
    pub social_facebook_url: Option<String>,
    pub social_twitter_url: Option<String>,
    pub social_youtube_url: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
